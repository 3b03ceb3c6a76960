//! Rectangular bad-pixel regions in sensor-local pixel coordinates

use std::ops::Range;

/// An axis-aligned rectangle on one sensor, `[left, right] x [bottom, top]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionRecord {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl RegionRecord {
    pub fn new(left: f64, right: f64, bottom: f64, top: f64) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// Rectangle from a center and a full size, as written in region files.
    ///
    /// The near edges are clamped to zero; the far edges are left as given.
    pub fn from_center(center_x: f64, center_y: f64, width: f64, height: f64) -> Self {
        Self {
            left: (center_x - width * 0.5).max(0.0),
            right: center_x + width * 0.5,
            bottom: (center_y - height * 0.5).max(0.0),
            top: center_y + height * 0.5,
        }
    }

    /// Row and column index ranges covered in a `rows x cols` buffer.
    ///
    /// The far edge pixel is included. Both ranges are clipped to the buffer,
    /// so either may come back empty.
    pub fn pixel_window(&self, rows: usize, cols: usize) -> (Range<usize>, Range<usize>) {
        (
            pixel_span(self.bottom, self.top, rows),
            pixel_span(self.left, self.right, cols),
        )
    }
}

fn pixel_span(low: f64, high: f64, len: usize) -> Range<usize> {
    let start = to_index(low.floor(), len);
    let end = to_index(high.floor() + 1.0, len);
    start..end.max(start)
}

fn to_index(value: f64, len: usize) -> usize {
    if value.is_nan() || value <= 0.0 {
        0
    } else if value >= len as f64 {
        len
    } else {
        value as usize
    }
}
