use std::io::Write;
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::focal_plane::{
    common::error::{MaskError, Result},
    conversions::types::MaskConfig,
    layout::{InstrumentLayout, get_layout},
    mask_code,
    masking::{MaskStats, RegionMaskEngine, SensorBuffers},
    regions::RegionCatalog,
    tiff::{SensorStackReader, SensorStackWriter, TiffStackReader, TiffStackWriter},
};

pub struct MaskPipeline<R: SensorStackReader, W: SensorStackWriter> {
    reader: R,
    writer: W,
    engine: RegionMaskEngine,
    config: MaskConfig,
}

impl MaskPipeline<TiffStackReader, TiffStackWriter> {
    pub fn new(config: MaskConfig) -> Self {
        Self {
            reader: TiffStackReader,
            writer: TiffStackWriter,
            engine: RegionMaskEngine::new(),
            config,
        }
    }
}

impl<R: SensorStackReader, W: SensorStackWriter> MaskPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: MaskConfig) -> Self {
        Self {
            reader,
            writer,
            engine: RegionMaskEngine::new(),
            config,
        }
    }

    fn validate_dimensions(&self, buffers: &SensorBuffers) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if let Some((rows, cols)) = buffers
            .values()
            .map(|b| b.dim())
            .find(|&(rows, cols)| rows == 0 || cols == 0)
        {
            return Err(MaskError::InvalidDimensions(cols, rows));
        }

        Ok(())
    }

    #[instrument(skip_all, fields(layout = layout.name(), input_size = input_data.len()))]
    pub fn mask(
        &self,
        layout: &InstrumentLayout,
        input_data: &[u8],
        defect_data: Option<&[u8]>,
        output: &mut dyn Write,
    ) -> Result<MaskStats> {
        info!("Starting sensor stack masking");

        let mut buffers = {
            let _span = tracing::info_span!("read_stack").entered();
            self.reader.read_stack(input_data, layout)?
        };

        let defects = match defect_data {
            Some(data) => {
                let _span = tracing::info_span!("read_defects").entered();
                Some(self.reader.read_stack(data, layout)?)
            }
            None => None,
        };

        {
            let _span = tracing::info_span!("validate_dimensions", sensors = buffers.len()).entered();
            self.validate_dimensions(&buffers)?;
        }

        let full_blank = mask_code::expand_for_layout(&self.config.mask_code, layout);
        info!(code = %self.config.mask_code, blanked = ?full_blank, "Mask code expanded");
        if mask_code::blanks_all(layout, &full_blank) {
            warn!("Mask code blanks every sensor of {}", layout.name());
        }

        let catalog = RegionCatalog::for_layout(
            layout,
            self.config.static_region_root.as_deref(),
            self.config.override_region_dir.as_deref(),
        );

        let stats = {
            let _span = tracing::info_span!("apply_mask").entered();
            self.engine.apply_with_stats(
                layout,
                &full_blank,
                &mut buffers,
                Some(&catalog),
                defects.as_ref(),
            )?
        };

        {
            let _span = tracing::info_span!("write_stack").entered();
            self.writer
                .write_stack(&buffers, layout, output, self.config.compression)?;
        }

        info!(
            sensors = buffers.len(),
            blanked = stats.sensors_blanked,
            "Sensor stack written"
        );
        Ok(stats)
    }

    #[instrument(skip(self, input_path, defect_path, output_path))]
    pub fn mask_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        instrument: &str,
        input_path: P,
        defect_path: Option<&Path>,
        output_path: Q,
    ) -> Result<MaskStats> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Masking file"
        );

        let layout = get_layout(instrument, self.config.binning)?;

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            read_file(input_path)?
        };

        let defect_data = match defect_path {
            Some(path) => {
                let _span = tracing::info_span!("read_defect_file").entered();
                Some(read_file(path)?)
            }
            None => None,
        };

        // Encode in memory so a failed run never leaves a partial output behind
        let mut encoded = Vec::new();
        let stats = self.mask(
            &layout,
            &input_data,
            defect_data.as_deref(),
            &mut encoded,
        )?;

        {
            let _span = tracing::info_span!("write_output_file", bytes = encoded.len()).entered();
            std::fs::write(output_path, &encoded).map_err(|e| {
                MaskError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?;
        }

        Ok(stats)
    }

    pub fn config(&self) -> &MaskConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: MaskConfig) {
        self.config = config;
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path)
        .map_err(|e| MaskError::InputReadError(format!("{}: {}", path.display(), e)))
}
