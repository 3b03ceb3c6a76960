//! Selects a built-in [`InstrumentLayout`] by instrument identifier.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::focal_plane::common::error::{MaskError, Result};
use crate::focal_plane::layout::instrument::InstrumentLayout;
use crate::focal_plane::layout::{decam, odi};

/// The closed set of instruments with built-in layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstrumentKind {
    /// Dark Energy Camera
    Decam,
    /// One Degree Imager with the full 5x6 OTA array
    Odi5x6,
    /// One Degree Imager in its partially populated configuration
    OdiPartial,
}

impl InstrumentKind {
    pub const ALL: [InstrumentKind; 3] = [Self::Decam, Self::Odi5x6, Self::OdiPartial];

    /// Canonical identifier, as written in image headers.
    pub fn key(self) -> &'static str {
        match self {
            Self::Decam => "decam",
            Self::Odi5x6 => "5odi",
            Self::OdiPartial => "podi",
        }
    }

    /// Directory holding this instrument's static region files, relative to
    /// the region root. `None` when the instrument ships no static registry.
    pub fn region_subdir(self) -> Option<&'static str> {
        match self {
            Self::Decam => None,
            Self::Odi5x6 => Some("odi_5x6"),
            Self::OdiPartial => Some("podi"),
        }
    }

    /// Build the layout, with tile and chip sizes divided by `binning`.
    pub fn layout(self, binning: f64) -> Result<InstrumentLayout> {
        if !binning.is_finite() || binning <= 0.0 {
            return Err(MaskError::ConfigurationError(format!(
                "binning must be positive, got {}",
                binning
            )));
        }
        debug!(instrument = self.key(), binning, "Constructing layout");
        match self {
            Self::Decam => decam::layout(binning),
            Self::Odi5x6 => odi::layout_5x6(binning),
            Self::OdiPartial => odi::layout_partial(binning),
        }
    }
}

impl FromStr for InstrumentKind {
    type Err = MaskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "decam" => Ok(Self::Decam),
            "5odi" | "odi5x6" | "odi_5x6" => Ok(Self::Odi5x6),
            "podi" | "odipartial" => Ok(Self::OdiPartial),
            other => Err(MaskError::ConfigurationError(format!(
                "unknown instrument {}",
                other
            ))),
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Layout for the instrument named `instrument` (case-insensitive).
pub fn get_layout(instrument: &str, binning: f64) -> Result<InstrumentLayout> {
    instrument.parse::<InstrumentKind>()?.layout(binning)
}
