//! Multi-page TIFF reader for sensor stacks.
//!
//! Page `k` holds the `k`-th sensor of the layout, in enumeration order. Any
//! single-channel sample type is accepted and widened or narrowed to `f32`.

use std::io::Cursor;

use ndarray::Array2;
use tiff::decoder::{Decoder, DecodingResult};
use tracing::debug;

use crate::focal_plane::common::error::{MaskError, Result};
use crate::focal_plane::layout::InstrumentLayout;
use crate::focal_plane::masking::SensorBuffers;
use crate::focal_plane::tiff::reader::SensorStackReader;

pub struct TiffStackReader;

fn decode_error(e: impl std::fmt::Display) -> MaskError {
    MaskError::DecodeError(e.to_string())
}

fn to_f32(result: DecodingResult) -> Result<Vec<f32>> {
    let pixels = match result {
        DecodingResult::U8(v) => v.into_iter().map(f32::from).collect(),
        DecodingResult::U16(v) => v.into_iter().map(f32::from).collect(),
        DecodingResult::U32(v) => v.into_iter().map(|p| p as f32).collect(),
        DecodingResult::U64(v) => v.into_iter().map(|p| p as f32).collect(),
        DecodingResult::I8(v) => v.into_iter().map(f32::from).collect(),
        DecodingResult::I16(v) => v.into_iter().map(f32::from).collect(),
        DecodingResult::I32(v) => v.into_iter().map(|p| p as f32).collect(),
        DecodingResult::I64(v) => v.into_iter().map(|p| p as f32).collect(),
        DecodingResult::F32(v) => v,
        DecodingResult::F64(v) => v.into_iter().map(|p| p as f32).collect(),
        #[allow(unreachable_patterns)]
        _ => return Err(decode_error("unsupported sample format")),
    };
    Ok(pixels)
}

impl SensorStackReader for TiffStackReader {
    fn read_stack(&self, data: &[u8], layout: &InstrumentLayout) -> Result<SensorBuffers> {
        debug!("Decoding sensor stack, {} bytes", data.len());

        let mut decoder = Decoder::new(Cursor::new(data)).map_err(decode_error)?;
        let mut buffers = SensorBuffers::new();

        for (page, (extension_id, chip_name)) in layout.enumerate_sensors().enumerate() {
            if page > 0 {
                if !decoder.more_images() {
                    return Err(MaskError::ConfigurationError(format!(
                        "stack has {} pages, layout {} has {} sensors",
                        page,
                        layout.name(),
                        layout.sensor_count()
                    )));
                }
                decoder.next_image().map_err(decode_error)?;
            }

            let (width, height) = decoder.dimensions().map_err(decode_error)?;
            let pixels = to_f32(decoder.read_image().map_err(decode_error)?)?;
            let buffer = Array2::from_shape_vec((height as usize, width as usize), pixels)
                .map_err(|e| decode_error(format!("page {} ({}): {}", page, chip_name, e)))?;

            debug!(page, extension_id, chip = chip_name, width, height, "Decoded page");
            buffers.insert(extension_id, buffer);
        }

        if decoder.more_images() {
            return Err(MaskError::ConfigurationError(format!(
                "stack has more pages than the {} sensors of layout {}",
                layout.sensor_count(),
                layout.name()
            )));
        }

        Ok(buffers)
    }
}
