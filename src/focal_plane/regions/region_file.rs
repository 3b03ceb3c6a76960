//! Parser for per-sensor region files.
//!
//! One rectangle per line, written as `box(center_x, center_y, width, height)`
//! in sensor-local pixels. Lines that do not start with `box` (headers,
//! comments, coordinate-system declarations) are ignored. A line that starts
//! with `box` but cannot be read as a rectangle is an error, never skipped.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::focal_plane::common::error::{MaskError, Result};
use crate::focal_plane::regions::types::RegionRecord;

const BOX_KEYWORD: &str = "box";

/// Name of the region file for `chip_name`.
pub fn region_file_name(chip_name: &str) -> String {
    format!("bpm_xy{}.reg", chip_name)
}

fn box_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^box\(([0-9+\-., ]+)\)").unwrap())
}

/// Parse region file contents. `path` is only used in error messages.
pub fn parse_regions(text: &str, path: &Path) -> Result<Vec<RegionRecord>> {
    let mut regions = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        let malformed = || MaskError::MalformedInputError {
            path: path.to_path_buf(),
            line: index + 1,
            text: line.to_string(),
        };

        let Some(captures) = box_pattern().captures(line) else {
            if line.starts_with(BOX_KEYWORD) {
                return Err(malformed());
            }
            continue;
        };

        let values = captures[1]
            .split(',')
            .map(|v| v.trim().parse::<f64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| malformed())?;
        // A fifth value is a rotation angle, which axis-aligned masking ignores.
        let [center_x, center_y, width, height, ..] = values[..] else {
            return Err(malformed());
        };
        regions.push(RegionRecord::from_center(center_x, center_y, width, height));
    }
    Ok(regions)
}

/// Read and parse one region file.
pub fn read_region_file(path: &Path) -> Result<Vec<RegionRecord>> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        MaskError::InputReadError(format!("{}: {}", path.display(), e))
    })?;
    let regions = parse_regions(&text, path)?;
    debug!(path = %path.display(), count = regions.len(), "Read region file");
    Ok(regions)
}
