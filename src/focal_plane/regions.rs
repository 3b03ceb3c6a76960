//! Static bad-pixel regions module
//!
//! Rectangles to blank on individual sensors, read from per-chip region files
//! or supplied in memory.

mod catalog;
pub mod region_file;
mod source;
pub mod types;

pub use catalog::RegionCatalog;
pub use region_file::{parse_regions, read_region_file, region_file_name};
pub use source::RegionSource;
pub use types::RegionRecord;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_window_includes_far_edge() {
        let region = RegionRecord::new(2.0, 4.5, 1.2, 3.0);

        assert_eq!(region.pixel_window(10, 10), (1..4, 2..5));
    }

    #[test]
    fn test_pixel_window_clipped_to_buffer() {
        let region = RegionRecord::from_center(95.0, 48.0, 20.0, 10.0);

        assert_eq!(region.pixel_window(50, 100), (43..50, 85..100));
    }

    #[test]
    fn test_pixel_window_outside_buffer_is_empty() {
        let beyond = RegionRecord::new(200.0, 210.0, 0.0, 5.0);
        let (rows, cols) = beyond.pixel_window(50, 100);
        assert!(cols.is_empty());
        assert_eq!(rows, 0..6);

        let negative = RegionRecord::new(-20.0, -10.0, -20.0, -10.0);
        let (rows, cols) = negative.pixel_window(50, 100);
        assert!(rows.is_empty() && cols.is_empty());
    }
}
