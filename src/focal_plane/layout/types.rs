//! Plain data types describing one instrument's focal plane

/// A rectangle in mosaic coordinates, `((left, right), (bottom, top))`.
pub type Rect = ((f64, f64), (f64, f64));

/// A half-open box in tile-index space, `((x_start, x_end), (y_start, y_end))`.
pub type TileExtent = ((usize, usize), (usize, usize));

/// One physical sensor and the tile cells it occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorRecord {
    /// Position of the sensor in the source data container
    pub extension_id: u32,
    /// Short unique name, also used to find region files
    pub chip_name: String,
    pub tile_x_start: usize,
    pub tile_x_end: usize,
    pub tile_y_start: usize,
    pub tile_y_end: usize,
}

impl SensorRecord {
    pub fn new(
        extension_id: u32,
        chip_name: impl Into<String>,
        tile_x: (usize, usize),
        tile_y: (usize, usize),
    ) -> Self {
        Self {
            extension_id,
            chip_name: chip_name.into(),
            tile_x_start: tile_x.0,
            tile_x_end: tile_x.1,
            tile_y_start: tile_y.0,
            tile_y_end: tile_y.1,
        }
    }

    /// Whether the tile cell `(tile_x, tile_y)` lies inside this sensor's bounds.
    pub fn contains_tile(&self, tile_x: usize, tile_y: usize) -> bool {
        (self.tile_x_start..self.tile_x_end).contains(&tile_x)
            && (self.tile_y_start..self.tile_y_end).contains(&tile_y)
    }
}

/// Angular footprint of the instrument on the sky.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyFootprint {
    /// West offset from the pointing center, degrees
    pub west: f64,
    /// East offset from the pointing center, degrees
    pub east: f64,
    /// South offset from the pointing center, degrees
    pub south: f64,
    /// North offset from the pointing center, degrees
    pub north: f64,
    /// Arcseconds per (binned) pixel
    pub pixel_scale: f64,
}

impl SkyFootprint {
    /// RA/Dec range `(ra_west, ra_east, dec_south, dec_north)` around `center`.
    ///
    /// RA offsets are stretched by `1 / cos(dec)`. A missing center means `(0, 0)`.
    pub fn bbox(&self, center: Option<(f64, f64)>) -> (f64, f64, f64, f64) {
        let (ra, dec) = center.unwrap_or((0.0, 0.0));
        let cos_dec = dec.to_radians().cos();
        (
            ra + self.west / cos_dec,
            ra + self.east / cos_dec,
            dec + self.south,
            dec + self.north,
        )
    }

    /// Footprint as `(center_ra, center_dec, width_ra, height_dec)`.
    pub fn cbox(&self, center: Option<(f64, f64)>) -> (f64, f64, f64, f64) {
        let (w, e, s, n) = self.bbox(center);
        let center_ra = (w + e) * 0.5;
        let center_dec = (s + n) * 0.5;
        let width_ra = (e - w) * center_dec.to_radians().cos();
        (center_ra, center_dec, width_ra, n - s)
    }
}
