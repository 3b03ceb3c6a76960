use std::collections::HashMap;

use crate::focal_plane::common::error::Result;
use crate::focal_plane::regions::types::RegionRecord;

/// Supplies the static bad-pixel rectangles of a sensor, looked up by chip name.
pub trait RegionSource {
    fn regions_for(&self, chip_name: &str) -> Result<Vec<RegionRecord>>;
}

/// Regions already loaded in memory. Chips without an entry have none.
impl RegionSource for HashMap<String, Vec<RegionRecord>> {
    fn regions_for(&self, chip_name: &str) -> Result<Vec<RegionRecord>> {
        Ok(self.get(chip_name).cloned().unwrap_or_default())
    }
}
