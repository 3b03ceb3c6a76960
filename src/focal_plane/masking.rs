//! Region masking module
//!
//! Blanks whole sensors, static bad-pixel rectangles and externally flagged
//! defect pixels in per-sensor buffers.

mod engine;
pub mod types;


pub use engine::RegionMaskEngine;
pub use types::{INVALID_PIXEL, MaskJob, MaskStats, SensorBuffers};
