//! Masking pipeline configuration types

use std::path::PathBuf;

use crate::focal_plane::tiff::StackCompression;

/// Configuration for masking one exposure
#[derive(Debug, Clone)]
pub struct MaskConfig {
    /// Mask code naming whole sensors to blank
    pub mask_code: String,
    /// Binning factor of the input pixels
    pub binning: f64,
    /// Directory holding each instrument's static region files
    pub static_region_root: Option<PathBuf>,
    /// Directory of per-chip region files added to the static ones
    pub override_region_dir: Option<PathBuf>,
    /// Compression of the written stack
    pub compression: StackCompression,
    /// Whether to reject empty sensor buffers before masking
    pub validate_dimensions: bool,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            mask_code: String::new(),
            binning: 1.0,
            static_region_root: None,
            override_region_dir: None,
            compression: StackCompression::None,
            validate_dimensions: true,
        }
    }
}

impl MaskConfig {
    pub fn builder() -> MaskConfigBuilder {
        MaskConfigBuilder::default()
    }
}

/// Builder for MaskConfig
#[derive(Default)]
pub struct MaskConfigBuilder {
    mask_code: Option<String>,
    binning: Option<f64>,
    static_region_root: Option<Option<PathBuf>>,
    override_region_dir: Option<Option<PathBuf>>,
    compression: Option<StackCompression>,
    validate_dimensions: Option<bool>,
}

impl MaskConfigBuilder {
    pub fn mask_code(mut self, code: impl Into<String>) -> Self {
        self.mask_code = Some(code.into());
        self
    }

    pub fn binning(mut self, binning: f64) -> Self {
        self.binning = Some(binning);
        self
    }

    pub fn static_region_root(mut self, root: Option<PathBuf>) -> Self {
        self.static_region_root = Some(root);
        self
    }

    pub fn override_region_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.override_region_dir = Some(dir);
        self
    }

    pub fn compression(mut self, compression: StackCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn build(self) -> MaskConfig {
        let default = MaskConfig::default();
        MaskConfig {
            mask_code: self.mask_code.unwrap_or(default.mask_code),
            binning: self.binning.unwrap_or(default.binning),
            static_region_root: self.static_region_root.unwrap_or(default.static_region_root),
            override_region_dir: self.override_region_dir.unwrap_or(default.override_region_dir),
            compression: self.compression.unwrap_or(default.compression),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
        }
    }
}
