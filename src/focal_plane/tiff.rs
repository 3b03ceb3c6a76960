//! Sensor stack I/O module
//!
//! Reads and writes the per-sensor pixel buffers of one exposure as a
//! multi-page TIFF file.

mod reader;
mod stack_reader;
mod stack_writer;
pub mod types;
mod writer;

pub use reader::SensorStackReader;
pub use stack_reader::TiffStackReader;
pub use stack_writer::TiffStackWriter;
pub use types::StackCompression;
pub use writer::SensorStackWriter;
