use std::io::Write;

use crate::focal_plane::common::error::Result;
use crate::focal_plane::layout::InstrumentLayout;
use crate::focal_plane::masking::SensorBuffers;
use crate::focal_plane::tiff::types::StackCompression;

pub trait SensorStackWriter {
    fn write_stack(
        &self,
        buffers: &SensorBuffers,
        layout: &InstrumentLayout,
        output: &mut dyn Write,
        compression: StackCompression,
    ) -> Result<()>;
}
