//! Types shared by the masking engine and its callers

use std::collections::{BTreeMap, BTreeSet};

use ndarray::Array2;

/// Value written to masked pixels.
pub const INVALID_PIXEL: f32 = f32::NAN;

/// Pixel buffers keyed by extension id, shaped `(rows, cols)` = `(y, x)`.
pub type SensorBuffers = BTreeMap<u32, Array2<f32>>;

/// What one masking pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaskStats {
    /// Sensors set entirely to [`INVALID_PIXEL`]
    pub sensors_blanked: usize,
    /// Static rectangles written, including ones clipped to nothing
    pub regions_applied: usize,
    /// Pixels flagged by external defect buffers
    pub defect_pixels: usize,
}

/// One image's worth of masking input, for [`super::RegionMaskEngine::apply_batch`].
#[derive(Debug, Clone, Default)]
pub struct MaskJob {
    pub full_blank: BTreeSet<u32>,
    pub buffers: SensorBuffers,
    pub defects: Option<SensorBuffers>,
}
