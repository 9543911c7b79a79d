//! Decompression of directory payloads.
//!
//! The archive header names one of:
//! - Unknown (0)
//! - None (1): payload is stored as-is
//! - Gzip (2): inflated with flate2
//! - Brotli (3) and Zstd (4): recognised, not inflated by this crate

use std::fmt;
use std::io::Read;

use flate2::read::GzDecoder;
use log::trace;

use crate::pmtiles::types::error::{DirectoryError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Unknown,
    None,
    Gzip,
    Brotli,
    Zstd,
}

impl TryFrom<u8> for Compression {
    type Error = DirectoryError;
    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Unknown),
            1 => Ok(Self::None),
            2 => Ok(Self::Gzip),
            3 => Ok(Self::Brotli),
            4 => Ok(Self::Zstd),
            _ => Err(DirectoryError::InvalidFormat(format!("Unknown compression type: {}", value))),
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unknown => "unknown",
            Self::None => "none",
            Self::Gzip => "gzip",
            Self::Brotli => "brotli",
            Self::Zstd => "zstd",
        };
        f.write_str(name)
    }
}

/// Decompress a payload according to `compression`.
///
/// # Errors
/// Returns [`DirectoryError::UnsupportedCompression`] for algorithms this crate
/// cannot inflate, and [`DirectoryError::DecompressionError`] for corrupt gzip data.
pub fn decompress(payload: &[u8], compression: Compression) -> Result<Vec<u8>> {
    match compression {
        Compression::None => {
            trace!("No compression, copying {} bytes", payload.len());
            Ok(payload.to_vec())
        }
        Compression::Gzip => {
            let mut output = Vec::with_capacity(payload.len() * 4);
            GzDecoder::new(payload)
                .read_to_end(&mut output)
                .map_err(|e| DirectoryError::DecompressionError(e.to_string()))?;
            trace!("Inflated {} gzip bytes into {}", payload.len(), output.len());
            Ok(output)
        }
        other => Err(DirectoryError::UnsupportedCompression(other.to_string())),
    }
}
