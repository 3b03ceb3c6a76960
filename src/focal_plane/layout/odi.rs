//! WIYN One Degree Imager focal planes.
//!
//! Sensors are orthogonal transfer arrays (OTAs) addressed by a two-digit
//! `xy` code. The code is used as the extension id and as the chip name, so a
//! mask code such as `3*` selects a whole OTA column. OTA `xy` sits on tile
//! `(x - 1, y - 1)`.

use crate::focal_plane::common::error::Result;
use crate::focal_plane::layout::instrument::InstrumentLayout;
use crate::focal_plane::layout::registry::InstrumentKind;
use crate::focal_plane::layout::types::{SensorRecord, SkyFootprint};

const OTA_SIZE: f64 = 4096.0;
const OTA_GAP: f64 = 200.0;
const PIXEL_SCALE: f64 = 0.11;

/// Full 5x6 OTA array, column by column.
const OTAS_5X6: [u32; 30] = [
    11, 12, 13, 14, 15, 16, //
    21, 22, 23, 24, 25, 26, //
    31, 32, 33, 34, 35, 36, //
    41, 42, 43, 44, 45, 46, //
    51, 52, 53, 54, 55, 56, //
];

/// Partially populated array: the 3x3 science core followed by the outlying OTAs.
const OTAS_PARTIAL: [u32; 12] = [33, 34, 44, 43, 42, 32, 22, 23, 24, 55, 61, 16];

fn ota_sensor(ota: u32) -> SensorRecord {
    let x = (ota / 10) as usize;
    let y = (ota % 10) as usize;
    SensorRecord::new(ota, format!("{:02}", ota), (x - 1, x), (y - 1, y))
}

fn build(
    kind: InstrumentKind,
    binning: f64,
    grid: (usize, usize),
    otas: &[u32],
    sky: (f64, f64),
) -> Result<InstrumentLayout> {
    let (half_width_deg, half_height_deg) = sky;
    InstrumentLayout::builder()
        .name(kind.key())
        .kind(kind)
        .binning(binning)
        .tile_grid(grid.0, grid.1)
        .tile_size(OTA_SIZE / binning, OTA_SIZE / binning)
        .tile_gap(OTA_GAP / binning)
        .chip_size(OTA_SIZE / binning, OTA_SIZE / binning)
        .sky_footprint(SkyFootprint {
            west: -half_width_deg,
            east: half_width_deg,
            south: -half_height_deg,
            north: half_height_deg,
            pixel_scale: PIXEL_SCALE * binning,
        })
        .sensors(otas.iter().copied().map(ota_sensor))
        .build()
}

pub(crate) fn layout_5x6(binning: f64) -> Result<InstrumentLayout> {
    build(
        InstrumentKind::Odi5x6,
        binning,
        (5, 6),
        &OTAS_5X6,
        (20.0 / 60.0, 24.0 / 60.0),
    )
}

pub(crate) fn layout_partial(binning: f64) -> Result<InstrumentLayout> {
    build(
        InstrumentKind::OdiPartial,
        binning,
        (6, 6),
        &OTAS_PARTIAL,
        (24.0 / 60.0, 24.0 / 60.0),
    )
}
