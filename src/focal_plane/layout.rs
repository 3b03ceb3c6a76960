//! Instrument geometry module
//!
//! Describes where each sensor of an instrument sits on its tile grid and
//! maps between sensor-local, tile and mosaic coordinates.

mod builder;
mod decam;
mod instrument;
mod odi;
pub mod registry;
pub mod types;

#[cfg(test)]
mod tests;

pub use builder::InstrumentLayoutBuilder;
pub use instrument::InstrumentLayout;
pub use registry::{InstrumentKind, get_layout};
pub use types::{Rect, SensorRecord, SkyFootprint, TileExtent};
