//! Sensor stack file options

/// Compression applied to every page of a written sensor stack
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StackCompression {
    /// No compression (fastest, largest file)
    #[default]
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression, balanced level
    Deflate,
}

impl std::str::FromStr for StackCompression {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "lzw" => Ok(Self::Lzw),
            "deflate" => Ok(Self::Deflate),
            other => Err(format!("unknown compression {}", other)),
        }
    }
}
