use std::io::{Cursor, Write};

use tiff::encoder::{Compression, TiffEncoder, colortype::Gray32Float, compression::DeflateLevel};
use tracing::debug;

use crate::focal_plane::common::error::{MaskError, Result};
use crate::focal_plane::layout::InstrumentLayout;
use crate::focal_plane::masking::SensorBuffers;
use crate::focal_plane::tiff::types::StackCompression;
use crate::focal_plane::tiff::writer::SensorStackWriter;

/// Writes one 32-bit float page per sensor, in layout order.
pub struct TiffStackWriter;

impl SensorStackWriter for TiffStackWriter {
    fn write_stack(
        &self,
        buffers: &SensorBuffers,
        layout: &InstrumentLayout,
        output: &mut dyn Write,
        compression: StackCompression,
    ) -> Result<()> {
        debug!(sensors = layout.sensor_count(), ?compression, "Encoding sensor stack");

        let compression = match compression {
            StackCompression::None => Compression::Uncompressed,
            StackCompression::Lzw => Compression::Lzw,
            StackCompression::Deflate => Compression::Deflate(DeflateLevel::Balanced),
        };

        let mut buffer = Vec::new();
        {
            let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
                .map_err(|e| MaskError::EncodeError(e.to_string()))?
                .with_compression(compression);

            for (extension_id, chip_name) in layout.enumerate_sensors() {
                let pixels = buffers.get(&extension_id).ok_or_else(|| {
                    MaskError::ConfigurationError(format!(
                        "no pixel buffer for extension {} ({})",
                        extension_id, chip_name
                    ))
                })?;
                let (rows, cols) = pixels.dim();
                let samples: Vec<f32> = pixels.iter().copied().collect();
                encoder
                    .write_image::<Gray32Float>(cols as u32, rows as u32, &samples)
                    .map_err(|e| MaskError::EncodeError(e.to_string()))?;
            }
        }

        output.write_all(&buffer)?;

        debug!("Sensor stack encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use ndarray::Array2;

    use super::*;
    use crate::focal_plane::layout::SensorRecord;
    use crate::focal_plane::tiff::{SensorStackReader, TiffStackReader};

    fn layout() -> InstrumentLayout {
        InstrumentLayout::builder()
            .tile_grid(3, 1)
            .tile_size(4.0, 3.0)
            .sensor(SensorRecord::new(7, "C", (2, 3), (0, 1)))
            .sensor(SensorRecord::new(3, "A", (0, 1), (0, 1)))
            .build()
            .unwrap()
    }

    #[test]
    fn test_pages_follow_layout_order() {
        let layout = layout();
        let mut first = Array2::from_shape_fn((3, 4), |(r, c)| (r * 4 + c) as f32);
        first[[1, 2]] = f32::NAN;
        let buffers = SensorBuffers::from([(7, first.clone()), (3, Array2::from_elem((3, 4), -1.5))]);

        let mut encoded = Vec::new();
        TiffStackWriter
            .write_stack(&buffers, &layout, &mut encoded, StackCompression::Lzw)
            .unwrap();
        let decoded = TiffStackReader.read_stack(&encoded, &layout).unwrap();

        assert_eq!(decoded.keys().copied().collect::<BTreeSet<_>>(), BTreeSet::from([3, 7]));
        assert!(decoded[&7][[1, 2]].is_nan());
        assert_eq!(decoded[&7][[2, 3]], 11.0);
        assert_eq!(decoded[&7][[0, 1]], 1.0);
        assert!(decoded[&3].iter().all(|&v| v == -1.5));
    }

    #[test]
    fn test_page_count_must_match_layout() {
        let layout = layout();
        let single = InstrumentLayout::builder()
            .tile_grid(1, 1)
            .tile_size(4.0, 3.0)
            .sensor(SensorRecord::new(7, "C", (0, 1), (0, 1)))
            .build()
            .unwrap();
        let buffers = SensorBuffers::from([(7, Array2::zeros((3, 4)))]);

        let mut encoded = Vec::new();
        TiffStackWriter
            .write_stack(&buffers, &single, &mut encoded, StackCompression::None)
            .unwrap();

        assert!(matches!(
            TiffStackReader.read_stack(&encoded, &layout),
            Err(MaskError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_garbage_input_is_decode_error() {
        assert!(matches!(
            TiffStackReader.read_stack(b"not a tiff", &layout()),
            Err(MaskError::DecodeError(_))
        ));
    }
}
