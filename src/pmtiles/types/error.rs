//! Custom error types for the pmtiles-directory crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
///
/// Every variant except [`UnsupportedCompression`](Self::UnsupportedCompression),
/// [`InvalidTileCoord`](Self::InvalidTileCoord) and
/// [`TileIdOutOfRange`](Self::TileIdOutOfRange) is a decode fault: the whole
/// directory blob must be treated as corrupt.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The buffer ended in the middle of one of the directory columns.
    #[error("Truncated input: unexpected end of buffer at byte {position}")]
    TruncatedInput { position: usize },

    /// A varint does not fit the integer width it is read as.
    #[error("Malformed varint at byte {position}")]
    MalformedVarint { position: usize },

    /// The first entry uses the "contiguous with previous" offset encoding.
    #[error("Invalid first offset: entry 0 cannot be contiguous with a previous entry")]
    InvalidFirstOffset,

    /// Bytes remain after all declared entries have been read.
    #[error("Trailing bytes: {remaining} bytes left after {entries} entries")]
    TrailingBytes { remaining: usize, entries: u64 },

    /// Entries are not strictly ascending by last tile id, or their ranges overlap.
    #[error("Ordering violation at entry {index}: {detail}")]
    OrderingViolation { index: usize, detail: String },

    /// Tile id or offset arithmetic left the u64 range.
    #[error("Arithmetic overflow in {context} at entry {index}")]
    ArithmeticOverflow { context: &'static str, index: usize },

    /// The payload is compressed with an algorithm this crate does not inflate.
    #[error("Unsupported compression: {0}")]
    UnsupportedCompression(String),

    /// Inflating a compressed payload failed.
    #[error("Decompression failed: {0}")]
    DecompressionError(String),

    /// A header field holds a value outside the format's enumeration.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A zoom/x/y triple outside the tile pyramid.
    #[error("Invalid tile coordinate {z}/{x}/{y}")]
    InvalidTileCoord { z: u8, x: u32, y: u32 },

    /// A tile id past the last tile of the deepest supported zoom level.
    #[error("Tile id {0} is out of range")]
    TileIdOutOfRange(u64),
}

/// A convenience `Result` type alias using the crate's `DirectoryError` type.
pub type Result<T> = std::result::Result<T, DirectoryError>;
