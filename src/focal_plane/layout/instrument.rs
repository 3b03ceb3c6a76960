//! Coordinate queries over one instrument's tile grid and sensor table.
//!
//! Three spaces are involved: sensor-local pixels, tile cells and the global
//! mosaic. Every query is built on [`InstrumentLayout::xy_from_tile`], which
//! maps a tile index plus a local offset to mosaic pixels:
//!
//! ```text
//! mosaic_x = tile_x * (tile_width  + tile_gap) + local_x
//! mosaic_y = tile_y * (tile_height + tile_gap) + local_y
//! ```

use std::collections::{BTreeSet, HashMap};

use crate::focal_plane::common::error::{MaskError, Result};
use crate::focal_plane::layout::builder::InstrumentLayoutBuilder;
use crate::focal_plane::layout::registry::InstrumentKind;
use crate::focal_plane::layout::types::{Rect, SensorRecord, SkyFootprint, TileExtent};

/// Static geometry of one instrument. Immutable once built.
#[derive(Debug, Clone)]
pub struct InstrumentLayout {
    pub(crate) name: String,
    pub(crate) kind: Option<InstrumentKind>,
    pub(crate) binning: f64,
    pub(crate) ntx: usize,
    pub(crate) nty: usize,
    pub(crate) tile_width: f64,
    pub(crate) tile_height: f64,
    pub(crate) tile_gap: f64,
    pub(crate) chip_width: f64,
    pub(crate) chip_height: f64,
    pub(crate) sky: SkyFootprint,
    pub(crate) sensors: Vec<SensorRecord>,
    pub(crate) by_extension: HashMap<u32, usize>,
    pub(crate) by_name: HashMap<String, usize>,
    pub(crate) extent: TileExtent,
}

impl InstrumentLayout {
    pub fn builder() -> InstrumentLayoutBuilder {
        InstrumentLayoutBuilder::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The built-in instrument this layout was made for, if any.
    pub fn kind(&self) -> Option<InstrumentKind> {
        self.kind
    }

    pub fn binning(&self) -> f64 {
        self.binning
    }

    /// Tile grid dimensions `(ntx, nty)`.
    pub fn tile_grid(&self) -> (usize, usize) {
        (self.ntx, self.nty)
    }

    /// Tile `(width, height, gap)` in mosaic pixels.
    pub fn tile_size(&self) -> (f64, f64, f64) {
        (self.tile_width, self.tile_height, self.tile_gap)
    }

    /// Per-sensor pixel dimensions `(width, height)`.
    pub fn chip_size(&self) -> (f64, f64) {
        (self.chip_width, self.chip_height)
    }

    pub fn sky_footprint(&self) -> &SkyFootprint {
        &self.sky
    }

    fn check_tile(&self, tile_x: usize, tile_y: usize) -> Result<()> {
        if tile_x >= self.ntx || tile_y >= self.nty {
            return Err(MaskError::OutOfRangeError {
                tile_x,
                tile_y,
                ntx: self.ntx,
                nty: self.nty,
            });
        }
        Ok(())
    }

    /// Mosaic coordinates of the local offset `(x, y)` inside tile `(tile_x, tile_y)`.
    pub fn xy_from_tile(&self, tile_x: usize, tile_y: usize, x: f64, y: f64) -> Result<(f64, f64)> {
        self.check_tile(tile_x, tile_y)?;
        let mosaic_x = tile_x as f64 * (self.tile_width + self.tile_gap) + x;
        let mosaic_y = tile_y as f64 * (self.tile_height + self.tile_gap) + y;
        Ok((mosaic_x, mosaic_y))
    }

    /// Mosaic bounding box of a single tile cell.
    pub fn tile_rect(&self, tile_x: usize, tile_y: usize) -> Result<Rect> {
        let (left, bottom) = self.xy_from_tile(tile_x, tile_y, 0.0, 0.0)?;
        let (right, top) = self.xy_from_tile(tile_x, tile_y, self.tile_width, self.tile_height)?;
        Ok(((left, right), (bottom, top)))
    }

    /// Edges of every tile column and every tile row, for tick or bin grids.
    ///
    /// Rows share one y-span regardless of column, so each row is taken at column 0.
    pub fn tile_bin_edges(&self) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
        let x_edges = (0..self.ntx)
            .filter_map(|t| self.tile_rect(t, 0).ok())
            .map(|(x_span, _)| x_span)
            .collect();
        let y_edges = (0..self.nty)
            .filter_map(|t| self.tile_rect(0, t).ok())
            .map(|(_, y_span)| y_span)
            .collect();
        (x_edges, y_edges)
    }

    pub fn lookup_by_extension(&self, extension_id: u32) -> Result<&SensorRecord> {
        self.by_extension
            .get(&extension_id)
            .map(|&i| &self.sensors[i])
            .ok_or_else(|| MaskError::NotFoundError(format!("extension {}", extension_id)))
    }

    pub fn lookup_by_name(&self, chip_name: &str) -> Result<&SensorRecord> {
        self.by_name
            .get(chip_name)
            .map(|&i| &self.sensors[i])
            .ok_or_else(|| MaskError::NotFoundError(format!("chip {}", chip_name)))
    }

    /// Mosaic coordinates of the sensor-local pixel `(x, y)` on `chip_name`.
    pub fn xy_from_sensor(&self, chip_name: &str, x: f64, y: f64) -> Result<(f64, f64)> {
        let sensor = self.lookup_by_name(chip_name)?;
        self.xy_from_tile(sensor.tile_x_start, sensor.tile_y_start, x, y)
    }

    /// Mosaic bounding box of a sensor.
    pub fn sensor_rect(&self, chip_name: &str) -> Result<Rect> {
        let (left, bottom) = self.xy_from_sensor(chip_name, 0.0, 0.0)?;
        let (right, top) = self.xy_from_sensor(chip_name, self.chip_width, self.chip_height)?;
        Ok(((left, right), (bottom, top)))
    }

    /// The sensor covering tile cell `(tile_x, tile_y)`, if any.
    pub fn locate_tile(&self, tile_x: usize, tile_y: usize) -> Option<&SensorRecord> {
        self.sensors.iter().find(|s| s.contains_tile(tile_x, tile_y))
    }

    /// The sensor whose tile cells contain the mosaic point, if any.
    ///
    /// Points in inter-tile gaps, at negative coordinates or beyond the grid
    /// fall on no sensor. For sensors spanning several tiles this includes the
    /// gap bands between their own tiles, so a point inside
    /// [`Self::sensor_rect`] can still return `None`.
    pub fn locate(&self, mosaic_x: f64, mosaic_y: f64) -> Option<&SensorRecord> {
        let tile_x = tile_index(mosaic_x, self.tile_width, self.tile_gap, self.ntx)?;
        let tile_y = tile_index(mosaic_y, self.tile_height, self.tile_gap, self.nty)?;
        self.locate_tile(tile_x, tile_y)
    }

    /// `(extension_id, chip_name)` pairs in declaration order.
    pub fn enumerate_sensors(&self) -> impl Iterator<Item = (u32, &str)> + '_ {
        self.sensors
            .iter()
            .map(|s| (s.extension_id, s.chip_name.as_str()))
    }

    pub fn sensors(&self) -> &[SensorRecord] {
        &self.sensors
    }

    pub fn sensor_count(&self) -> usize {
        self.sensors.len()
    }

    pub fn valid_extension_ids(&self) -> BTreeSet<u32> {
        self.sensors.iter().map(|s| s.extension_id).collect()
    }

    /// Tile-index bounding box of all sensors.
    pub fn layout_extent(&self) -> TileExtent {
        self.extent
    }

    /// Size of [`Self::layout_extent`] in tiles, `(nx, ny)`.
    pub fn layout_size(&self) -> (usize, usize) {
        let ((left, right), (bottom, top)) = self.extent;
        (right - left, top - bottom)
    }

    pub fn sky_bbox(&self, center: Option<(f64, f64)>) -> (f64, f64, f64, f64) {
        self.sky.bbox(center)
    }

    pub fn sky_cbox(&self, center: Option<(f64, f64)>) -> (f64, f64, f64, f64) {
        self.sky.cbox(center)
    }
}

/// Tile index along one axis, or `None` if the coordinate is in a gap or off the grid.
fn tile_index(coord: f64, size: f64, gap: f64, count: usize) -> Option<usize> {
    if !coord.is_finite() || coord < 0.0 {
        return None;
    }
    let pitch = size + gap;
    let index = (coord / pitch).floor();
    if index >= count as f64 {
        return None;
    }
    let offset = coord - index * pitch;
    (offset < size).then_some(index as usize)
}
