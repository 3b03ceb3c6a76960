//! Dark Energy Camera focal plane.
//!
//! 60 science CCDs of 2046x4094 pixels placed on a 14x14 grid of 2048 pixel
//! tiles. Each CCD spans one tile column and two tile rows. S30 and N30 are
//! dead and absent from the table.

use crate::focal_plane::common::error::Result;
use crate::focal_plane::layout::instrument::InstrumentLayout;
use crate::focal_plane::layout::registry::InstrumentKind;
use crate::focal_plane::layout::types::{SensorRecord, SkyFootprint};

const NTX: usize = 14;
const NTY: usize = 14;
const TILE_SIZE: f64 = 2048.0;
/// Approximate physical gap between CCDs, unbinned pixels
const TILE_GAP: f64 = 180.0;
const CHIP_WIDTH: f64 = 2046.0;
const CHIP_HEIGHT: f64 = 4094.0;
const PIXEL_SCALE: f64 = 0.2623;
const HALF_FIELD_DEG: f64 = 70.0 / 60.0;

/// `(extension, chip, tile_x_start, tile_x_end, tile_y_start, tile_y_end)`
const CHIPS: [(u32, &str, usize, usize, usize, usize); 60] = [
    (1, "S29", 1, 2, 4, 6),
    (2, "S31", 1, 2, 8, 10),
    (3, "S25", 2, 3, 3, 5),
    (4, "S26", 2, 3, 5, 7),
    (5, "S27", 2, 3, 7, 9),
    (6, "S28", 2, 3, 9, 11),
    (7, "S20", 3, 4, 2, 4),
    (8, "S21", 3, 4, 4, 6),
    (9, "S22", 3, 4, 6, 8),
    (10, "S23", 3, 4, 8, 10),
    (11, "S24", 3, 4, 10, 12),
    (12, "S14", 4, 5, 1, 3),
    (13, "S15", 4, 5, 3, 5),
    (14, "S16", 4, 5, 5, 7),
    (15, "S17", 4, 5, 7, 9),
    (16, "S18", 4, 5, 9, 11),
    (17, "S19", 4, 5, 11, 13),
    (18, "S8", 5, 6, 1, 3),
    (19, "S9", 5, 6, 3, 5),
    (20, "S10", 5, 6, 5, 7),
    (21, "S11", 5, 6, 7, 9),
    (22, "S12", 5, 6, 9, 11),
    (23, "S13", 5, 6, 11, 13),
    (24, "S1", 6, 7, 0, 2),
    (25, "S2", 6, 7, 2, 4),
    (26, "S3", 6, 7, 4, 6),
    (27, "S4", 6, 7, 6, 8),
    (28, "S5", 6, 7, 8, 10),
    (29, "S6", 6, 7, 10, 12),
    (30, "S7", 6, 7, 12, 14),
    (31, "N1", 7, 8, 0, 2),
    (32, "N2", 7, 8, 2, 4),
    (33, "N3", 7, 8, 4, 6),
    (34, "N4", 7, 8, 6, 8),
    (35, "N5", 7, 8, 8, 10),
    (36, "N6", 7, 8, 10, 12),
    (37, "N7", 7, 8, 12, 14),
    (38, "N8", 8, 9, 1, 3),
    (39, "N9", 8, 9, 3, 5),
    (40, "N10", 8, 9, 5, 7),
    (41, "N11", 8, 9, 7, 9),
    (42, "N12", 8, 9, 9, 11),
    (43, "N13", 8, 9, 11, 13),
    (44, "N14", 9, 10, 1, 3),
    (45, "N15", 9, 10, 3, 5),
    (46, "N16", 9, 10, 5, 7),
    (47, "N17", 9, 10, 7, 9),
    (48, "N18", 9, 10, 9, 11),
    (49, "N19", 9, 10, 11, 13),
    (50, "N20", 10, 11, 2, 4),
    (51, "N21", 10, 11, 4, 6),
    (52, "N22", 10, 11, 6, 8),
    (53, "N23", 10, 11, 8, 10),
    (54, "N24", 10, 11, 10, 12),
    (55, "N25", 11, 12, 3, 5),
    (56, "N26", 11, 12, 5, 7),
    (57, "N27", 11, 12, 7, 9),
    (58, "N28", 11, 12, 9, 11),
    (59, "N29", 12, 13, 4, 6),
    (60, "N31", 12, 13, 8, 10),
];

pub(crate) fn layout(binning: f64) -> Result<InstrumentLayout> {
    InstrumentLayout::builder()
        .name("decam")
        .kind(InstrumentKind::Decam)
        .binning(binning)
        .tile_grid(NTX, NTY)
        .tile_size(TILE_SIZE / binning, TILE_SIZE / binning)
        .tile_gap(TILE_GAP / binning)
        .chip_size(CHIP_WIDTH / binning, CHIP_HEIGHT / binning)
        .sky_footprint(SkyFootprint {
            west: -HALF_FIELD_DEG,
            east: HALF_FIELD_DEG,
            south: -HALF_FIELD_DEG,
            north: HALF_FIELD_DEG,
            pixel_scale: PIXEL_SCALE * binning,
        })
        .sensors(
            CHIPS
                .iter()
                .map(|&(ext, chip, xs, xe, ys, ye)| SensorRecord::new(ext, chip, (xs, xe), (ys, ye))),
        )
        .build()
}
