use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MaskError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Tile index ({tile_x}, {tile_y}) outside the {ntx}x{nty} tile grid")]
    OutOfRangeError {
        tile_x: usize,
        tile_y: usize,
        ntx: usize,
        nty: usize,
    },

    #[error("Sensor not found: {0}")]
    NotFoundError(String),

    #[error("Malformed region in {}:{line}: {text}", path.display())]
    MalformedInputError {
        path: PathBuf,
        line: usize,
        text: String,
    },

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode sensor stack: {0}")]
    DecodeError(String),

    #[error("Failed to encode sensor stack: {0}")]
    EncodeError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MaskError>;
