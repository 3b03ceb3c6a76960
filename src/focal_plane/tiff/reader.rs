use crate::focal_plane::common::error::Result;
use crate::focal_plane::layout::InstrumentLayout;
use crate::focal_plane::masking::SensorBuffers;

pub trait SensorStackReader {
    fn read_stack(&self, data: &[u8], layout: &InstrumentLayout) -> Result<SensorBuffers>;
}
