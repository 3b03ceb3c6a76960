//! Focal plane masking module
//!
//! Instrument geometry for tiled mosaic cameras, mask code expansion and the
//! region masking engine that blanks bad sensors and pixels before stacking.

pub mod common;
pub mod conversions;
pub mod layout;
pub mod mask_code;
pub mod masking;
pub mod regions;
pub mod tiff;

pub use common::{MaskError, Result};

pub use layout::{
    InstrumentKind, InstrumentLayout, InstrumentLayoutBuilder, Rect, SensorRecord, SkyFootprint,
    TileExtent, get_layout,
};

pub use masking::{INVALID_PIXEL, MaskJob, MaskStats, RegionMaskEngine, SensorBuffers};

pub use regions::{RegionCatalog, RegionRecord, RegionSource};

pub use tiff::{
    SensorStackReader, SensorStackWriter, StackCompression, TiffStackReader, TiffStackWriter,
};

pub use conversions::{MaskConfig, MaskConfigBuilder, MaskPipeline};
