use std::collections::HashMap;

use tracing::debug;

use crate::focal_plane::common::error::{MaskError, Result};
use crate::focal_plane::layout::instrument::InstrumentLayout;
use crate::focal_plane::layout::registry::InstrumentKind;
use crate::focal_plane::layout::types::{SensorRecord, SkyFootprint, TileExtent};

/// Builder for [`InstrumentLayout`]. `build` checks the sensor table.
#[derive(Default)]
pub struct InstrumentLayoutBuilder {
    name: Option<String>,
    kind: Option<InstrumentKind>,
    binning: Option<f64>,
    tile_grid: Option<(usize, usize)>,
    tile_size: Option<(f64, f64)>,
    tile_gap: Option<f64>,
    chip_size: Option<(f64, f64)>,
    sky: Option<SkyFootprint>,
    sensors: Vec<SensorRecord>,
}

impl InstrumentLayoutBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn kind(mut self, kind: InstrumentKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn binning(mut self, binning: f64) -> Self {
        self.binning = Some(binning);
        self
    }

    pub fn tile_grid(mut self, ntx: usize, nty: usize) -> Self {
        self.tile_grid = Some((ntx, nty));
        self
    }

    pub fn tile_size(mut self, width: f64, height: f64) -> Self {
        self.tile_size = Some((width, height));
        self
    }

    pub fn tile_gap(mut self, gap: f64) -> Self {
        self.tile_gap = Some(gap);
        self
    }

    pub fn chip_size(mut self, width: f64, height: f64) -> Self {
        self.chip_size = Some((width, height));
        self
    }

    pub fn sky_footprint(mut self, sky: SkyFootprint) -> Self {
        self.sky = Some(sky);
        self
    }

    pub fn sensor(mut self, sensor: SensorRecord) -> Self {
        self.sensors.push(sensor);
        self
    }

    pub fn sensors(mut self, sensors: impl IntoIterator<Item = SensorRecord>) -> Self {
        self.sensors.extend(sensors);
        self
    }

    pub fn build(self) -> Result<InstrumentLayout> {
        let name = self.name.unwrap_or_else(|| "custom".to_string());
        let (ntx, nty) = self
            .tile_grid
            .ok_or_else(|| invalid(&name, "tile grid not set"))?;
        let (tile_width, tile_height) = self
            .tile_size
            .ok_or_else(|| invalid(&name, "tile size not set"))?;
        let tile_gap = self.tile_gap.unwrap_or(0.0);
        let (chip_width, chip_height) = self.chip_size.unwrap_or((tile_width, tile_height));
        let binning = self.binning.unwrap_or(1.0);

        if ntx == 0 || nty == 0 {
            return Err(invalid(&name, "tile grid must be non-empty"));
        }
        if !(positive(tile_width) && positive(tile_height) && positive(chip_width) && positive(chip_height)) {
            return Err(invalid(&name, "tile and chip dimensions must be positive"));
        }
        if !tile_gap.is_finite() || tile_gap < 0.0 {
            return Err(invalid(&name, "tile gap must be non-negative"));
        }
        if self.sensors.is_empty() {
            return Err(invalid(&name, "no sensors declared"));
        }

        let mut by_extension = HashMap::with_capacity(self.sensors.len());
        let mut by_name = HashMap::with_capacity(self.sensors.len());
        for (i, sensor) in self.sensors.iter().enumerate() {
            validate_sensor(&name, sensor, ntx, nty)?;
            if by_extension.insert(sensor.extension_id, i).is_some() {
                return Err(invalid(
                    &name,
                    &format!("duplicate extension id {}", sensor.extension_id),
                ));
            }
            if by_name.insert(sensor.chip_name.clone(), i).is_some() {
                return Err(invalid(
                    &name,
                    &format!("duplicate chip name {}", sensor.chip_name),
                ));
            }
        }

        for (i, a) in self.sensors.iter().enumerate() {
            if let Some(b) = self.sensors[i + 1..].iter().find(|b| overlaps(a, b)) {
                return Err(invalid(
                    &name,
                    &format!("chips {} and {} share tile cells", a.chip_name, b.chip_name),
                ));
            }
        }

        let extent = extent_of(&self.sensors);
        debug!(
            layout = %name,
            sensors = self.sensors.len(),
            ?extent,
            "Built instrument layout"
        );

        Ok(InstrumentLayout {
            name,
            kind: self.kind,
            binning,
            ntx,
            nty,
            tile_width,
            tile_height,
            tile_gap,
            chip_width,
            chip_height,
            sky: self.sky.unwrap_or(SkyFootprint {
                west: 0.0,
                east: 0.0,
                south: 0.0,
                north: 0.0,
                pixel_scale: 1.0,
            }),
            sensors: self.sensors,
            by_extension,
            by_name,
            extent,
        })
    }
}

fn invalid(layout: &str, reason: &str) -> MaskError {
    MaskError::ConfigurationError(format!("layout {}: {}", layout, reason))
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn validate_sensor(layout: &str, sensor: &SensorRecord, ntx: usize, nty: usize) -> Result<()> {
    if sensor.extension_id == 0 {
        return Err(invalid(
            layout,
            &format!("chip {} has extension id 0", sensor.chip_name),
        ));
    }
    if sensor.tile_x_start >= sensor.tile_x_end || sensor.tile_y_start >= sensor.tile_y_end {
        return Err(invalid(
            layout,
            &format!("chip {} has an empty tile range", sensor.chip_name),
        ));
    }
    if sensor.tile_x_end > ntx || sensor.tile_y_end > nty {
        return Err(invalid(
            layout,
            &format!("chip {} extends past the {}x{} tile grid", sensor.chip_name, ntx, nty),
        ));
    }
    Ok(())
}

fn overlaps(a: &SensorRecord, b: &SensorRecord) -> bool {
    a.tile_x_start < b.tile_x_end
        && b.tile_x_start < a.tile_x_end
        && a.tile_y_start < b.tile_y_end
        && b.tile_y_start < a.tile_y_end
}

fn extent_of(sensors: &[SensorRecord]) -> TileExtent {
    let x_start = sensors.iter().map(|s| s.tile_x_start).min().unwrap_or(0);
    let x_end = sensors.iter().map(|s| s.tile_x_end).max().unwrap_or(0);
    let y_start = sensors.iter().map(|s| s.tile_y_start).min().unwrap_or(0);
    let y_end = sensors.iter().map(|s| s.tile_y_end).max().unwrap_or(0);
    ((x_start, x_end), (y_start, y_end))
}
