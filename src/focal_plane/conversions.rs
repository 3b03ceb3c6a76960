//! Pipeline conversions module
//!
//! Orchestrates reading a sensor stack, masking it and writing it back.

mod mask_pipeline;
pub mod types;


pub use mask_pipeline::MaskPipeline;
pub use types::{MaskConfig, MaskConfigBuilder};
