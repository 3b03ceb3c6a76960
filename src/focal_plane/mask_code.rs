//! Mask code expansion
//!
//! A mask code is a comma separated list of two-character tokens naming
//! sensors to blank. Each character is a decimal digit or the wildcard `*`,
//! which stands for every digit, so `3*` covers `30..=39` and `*` alone covers
//! `00..=99`. Anything else in a token (empty, `--`, too long, stray
//! characters) is noise from hand-edited metadata and is skipped silently.

use std::collections::BTreeSet;

use tracing::trace;

use crate::focal_plane::layout::InstrumentLayout;

/// Placeholder written by table tools for an empty cell.
const EMPTY_SENTINEL: &str = "--";
const WILDCARD: char = '*';

/// Expand `code` into the extension ids it names, restricted to `valid`.
pub fn expand(code: &str, valid: &BTreeSet<u32>) -> BTreeSet<u32> {
    code.split(',')
        .map(str::trim)
        .filter_map(token_digits)
        .flat_map(|(tens, units)| {
            tens.iter()
                .flat_map(|&t| units.iter().map(move |&u| t * 10 + u))
                .collect::<Vec<_>>()
        })
        .filter(|id| valid.contains(id))
        .collect()
}

/// Expand `code` against the sensors of `layout`.
pub fn expand_for_layout(code: &str, layout: &InstrumentLayout) -> BTreeSet<u32> {
    let ids = expand(code, &layout.valid_extension_ids());
    trace!(code, ?ids, layout = layout.name(), "Expanded mask code");
    ids
}

/// Whether `ids` blanks every sensor of `layout`, leaving nothing to keep.
pub fn blanks_all(layout: &InstrumentLayout, ids: &BTreeSet<u32>) -> bool {
    layout
        .enumerate_sensors()
        .all(|(extension_id, _)| ids.contains(&extension_id))
}

/// Digit sets for the two positions of a token, or `None` if it is skipped.
fn token_digits(token: &str) -> Option<(Vec<u32>, Vec<u32>)> {
    if token.is_empty() || token == EMPTY_SENTINEL {
        return None;
    }
    let token = if token == "*" { "**" } else { token };
    let mut chars = token.chars();
    let (first, second) = match (chars.next(), chars.next(), chars.next()) {
        (Some(first), Some(second), None) => (first, second),
        _ => return None,
    };
    Some((position_digits(first)?, position_digits(second)?))
}

fn position_digits(c: char) -> Option<Vec<u32>> {
    if c == WILDCARD {
        Some((0..10).collect())
    } else {
        c.to_digit(10).map(|d| vec![d])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(range: std::ops::RangeInclusive<u32>) -> BTreeSet<u32> {
        range.collect()
    }

    #[test]
    fn test_single_tokens() {
        let valid = ids(1..=62);

        assert_eq!(expand("33", &valid), BTreeSet::from([33]));
        assert_eq!(expand("07", &valid), BTreeSet::from([7]));
        assert_eq!(expand(" 12 , 5 ", &valid), BTreeSet::from([12]));
    }

    #[test]
    fn test_full_wildcard() {
        let valid = ids(1..=62);

        assert_eq!(expand("**", &valid), valid);
        assert_eq!(expand("*", &valid), valid);
    }

    #[test]
    fn test_row_and_column_wildcards() {
        let valid = ids(1..=62);

        assert_eq!(expand("5*", &valid), ids(50..=59));
        assert_eq!(expand("*3", &valid), BTreeSet::from([3, 13, 23, 33, 43, 53]));
        assert_eq!(expand("6*", &valid), BTreeSet::from([60, 61, 62]));
    }

    #[test]
    fn test_wildcards_in_both_positions_of_one_code() {
        let valid = ids(1..=62);
        let expanded = expand("*1, 2*, 62", &valid);

        let expected: BTreeSet<u32> = [1, 11, 21, 31, 41, 51, 61, 62]
            .into_iter()
            .chain(20..=29)
            .collect();
        assert_eq!(expanded, expected);
    }

    #[test]
    fn test_noise_tokens_are_skipped() {
        let valid = ids(1..=99);

        assert!(expand("--, , 123", &valid).is_empty());
        assert!(expand("", &valid).is_empty());
        assert!(expand("1a", &valid).is_empty());
        assert!(expand("a*", &valid).is_empty());
        assert!(expand("*x", &valid).is_empty());
        assert_eq!(expand("1a,22,--,xyz", &valid), BTreeSet::from([22]));
    }

    #[test]
    fn test_result_is_sorted_union() {
        let valid = ids(1..=62);
        let expanded: Vec<_> = expand("41,1*,12,03", &valid).into_iter().collect();

        assert_eq!(expanded, vec![3, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 41]);
    }

    #[test]
    fn test_ids_outside_valid_set_are_dropped() {
        let valid = BTreeSet::from([11, 22, 33]);

        assert_eq!(expand("00,11,99,3*", &valid), BTreeSet::from([11, 33]));
        assert!(expand("**", &BTreeSet::new()).is_empty());
    }

    #[test]
    fn test_blanks_all() {
        let layout = crate::focal_plane::layout::get_layout("podi", 1.0).unwrap();

        let everything = expand_for_layout("*", &layout);
        assert!(blanks_all(&layout, &everything));
        let core = expand_for_layout("2*,3*,4*", &layout);
        assert_eq!(core.len(), 9);
        assert!(!blanks_all(&layout, &core));
    }
}
