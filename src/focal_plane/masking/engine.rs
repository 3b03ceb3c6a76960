use std::collections::BTreeSet;

use ndarray::{Zip, s};
use rayon::prelude::*;
use tracing::{debug, info, instrument};

use crate::focal_plane::common::error::{MaskError, Result};
use crate::focal_plane::layout::InstrumentLayout;
use crate::focal_plane::masking::types::{INVALID_PIXEL, MaskJob, MaskStats, SensorBuffers};
use crate::focal_plane::regions::{RegionRecord, RegionSource};

/// Writes [`INVALID_PIXEL`] into sensor buffers.
///
/// Every input is checked before the first pixel is touched: a call that
/// returns an error leaves all buffers as they were. Masking never restores
/// a pixel, so running a pass twice gives the same result as running it once.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionMaskEngine;

enum SensorStep {
    Blank {
        extension_id: u32,
    },
    Partial {
        extension_id: u32,
        regions: Vec<RegionRecord>,
        use_defects: bool,
    },
}

impl RegionMaskEngine {
    pub fn new() -> Self {
        Self
    }

    /// Mask `buffers` in place and hand them back.
    pub fn apply<'a>(
        &self,
        layout: &InstrumentLayout,
        full_blank: &BTreeSet<u32>,
        buffers: &'a mut SensorBuffers,
        regions: Option<&dyn RegionSource>,
        defects: Option<&SensorBuffers>,
    ) -> Result<&'a mut SensorBuffers> {
        self.apply_with_stats(layout, full_blank, buffers, regions, defects)?;
        Ok(buffers)
    }

    #[instrument(skip_all, fields(layout = layout.name(), blank = full_blank.len()))]
    pub fn apply_with_stats(
        &self,
        layout: &InstrumentLayout,
        full_blank: &BTreeSet<u32>,
        buffers: &mut SensorBuffers,
        regions: Option<&dyn RegionSource>,
        defects: Option<&SensorBuffers>,
    ) -> Result<MaskStats> {
        let steps = {
            let _span = tracing::debug_span!("plan").entered();
            self.plan(layout, full_blank, buffers, regions, defects)?
        };

        let stats = {
            let _span = tracing::debug_span!("write").entered();
            self.execute(steps, buffers, defects)
        };

        info!(
            sensors_blanked = stats.sensors_blanked,
            regions = stats.regions_applied,
            defect_pixels = stats.defect_pixels,
            "Masking complete"
        );
        Ok(stats)
    }

    /// Mask several independent images in parallel, sharing one layout.
    ///
    /// Fails with the first error encountered; jobs that already finished
    /// stay masked.
    pub fn apply_batch(
        &self,
        layout: &InstrumentLayout,
        jobs: &mut [MaskJob],
        regions: Option<&(dyn RegionSource + Sync)>,
    ) -> Result<Vec<MaskStats>> {
        info!(jobs = jobs.len(), layout = layout.name(), "Masking batch");
        jobs.par_iter_mut()
            .map(|job| {
                self.apply_with_stats(
                    layout,
                    &job.full_blank,
                    &mut job.buffers,
                    regions.map(|r| r as &dyn RegionSource),
                    job.defects.as_ref(),
                )
            })
            .collect()
    }

    fn plan(
        &self,
        layout: &InstrumentLayout,
        full_blank: &BTreeSet<u32>,
        buffers: &SensorBuffers,
        regions: Option<&dyn RegionSource>,
        defects: Option<&SensorBuffers>,
    ) -> Result<Vec<SensorStep>> {
        let mut steps = Vec::with_capacity(layout.sensor_count());
        for (extension_id, chip_name) in layout.enumerate_sensors() {
            let buffer = buffers.get(&extension_id).ok_or_else(|| {
                MaskError::ConfigurationError(format!(
                    "no pixel buffer for extension {} ({})",
                    extension_id, chip_name
                ))
            })?;

            if full_blank.contains(&extension_id) {
                steps.push(SensorStep::Blank { extension_id });
                continue;
            }

            let sensor_regions = match regions {
                Some(source) => source.regions_for(chip_name)?,
                None => Vec::new(),
            };

            let defect = defects.and_then(|d| d.get(&extension_id));
            if let Some(defect) = defect {
                if defect.dim() != buffer.dim() {
                    return Err(MaskError::ConfigurationError(format!(
                        "defect buffer for extension {} is {:?}, pixel buffer is {:?}",
                        extension_id,
                        defect.dim(),
                        buffer.dim()
                    )));
                }
            }

            debug!(
                extension_id,
                chip = chip_name,
                regions = sensor_regions.len(),
                defects = defect.is_some(),
                "Planned sensor"
            );
            steps.push(SensorStep::Partial {
                extension_id,
                regions: sensor_regions,
                use_defects: defect.is_some(),
            });
        }
        Ok(steps)
    }

    fn execute(
        &self,
        steps: Vec<SensorStep>,
        buffers: &mut SensorBuffers,
        defects: Option<&SensorBuffers>,
    ) -> MaskStats {
        let mut stats = MaskStats::default();
        for step in steps {
            match step {
                SensorStep::Blank { extension_id } => {
                    if let Some(buffer) = buffers.get_mut(&extension_id) {
                        buffer.fill(INVALID_PIXEL);
                        stats.sensors_blanked += 1;
                    }
                }
                SensorStep::Partial {
                    extension_id,
                    regions,
                    use_defects,
                } => {
                    let Some(buffer) = buffers.get_mut(&extension_id) else {
                        continue;
                    };
                    let (rows, cols) = buffer.dim();
                    for region in &regions {
                        let (row_span, col_span) = region.pixel_window(rows, cols);
                        buffer
                            .slice_mut(s![row_span, col_span])
                            .fill(INVALID_PIXEL);
                        stats.regions_applied += 1;
                    }

                    let defect = defects
                        .filter(|_| use_defects)
                        .and_then(|d| d.get(&extension_id));
                    if let Some(defect) = defect {
                        Zip::from(&mut *buffer).and(defect).for_each(|pixel, &flag| {
                            if flag > 0.0 {
                                *pixel = INVALID_PIXEL;
                                stats.defect_pixels += 1;
                            }
                        });
                    }
                }
            }
        }
        stats
    }
}
