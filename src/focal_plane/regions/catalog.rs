use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::focal_plane::common::error::Result;
use crate::focal_plane::layout::InstrumentLayout;
use crate::focal_plane::regions::region_file::{read_region_file, region_file_name};
use crate::focal_plane::regions::source::RegionSource;
use crate::focal_plane::regions::types::RegionRecord;

/// Region files on disk, one per chip.
///
/// The static directory is the instrument's registry: every chip must have a
/// file there. The override directory is optional per chip and adds to the
/// static regions.
#[derive(Debug, Clone, Default)]
pub struct RegionCatalog {
    static_dir: Option<PathBuf>,
    override_dir: Option<PathBuf>,
}

impl RegionCatalog {
    pub fn new(static_dir: Option<PathBuf>, override_dir: Option<PathBuf>) -> Self {
        Self {
            static_dir,
            override_dir,
        }
    }

    /// Catalog for `layout`, with the static directory resolved under `region_root`.
    pub fn for_layout(
        layout: &InstrumentLayout,
        region_root: Option<&Path>,
        override_dir: Option<&Path>,
    ) -> Self {
        let subdir = layout.kind().and_then(|kind| kind.region_subdir());
        let static_dir = match (region_root, subdir) {
            (Some(root), Some(subdir)) => Some(root.join(subdir)),
            (None, Some(subdir)) => {
                warn!(
                    layout = layout.name(),
                    subdir, "No region root configured, static regions skipped"
                );
                None
            }
            _ => None,
        };
        debug!(?static_dir, ?override_dir, "Region catalog");
        Self::new(static_dir, override_dir.map(Path::to_path_buf))
    }

    /// Files to read for `chip_name`, static first.
    pub fn files_for(&self, chip_name: &str) -> Vec<PathBuf> {
        let name = region_file_name(chip_name);
        let mut files = Vec::new();
        if let Some(dir) = &self.static_dir {
            files.push(dir.join(&name));
        }
        if let Some(dir) = &self.override_dir {
            let path = dir.join(&name);
            if path.is_file() {
                files.push(path);
            }
        }
        files
    }
}

impl RegionSource for RegionCatalog {
    fn regions_for(&self, chip_name: &str) -> Result<Vec<RegionRecord>> {
        let mut regions = Vec::new();
        for path in self.files_for(chip_name) {
            regions.extend(read_region_file(&path)?);
        }
        Ok(regions)
    }
}
