//! # pmtiles-directory
//!
//! Decoder and lookup for the tile directory of PMTiles archives.
//!
//! A directory maps runs of tile ids to byte ranges in the tile-data section,
//! or to nested leaf directories. This crate turns the (uncompressed) directory
//! bytes into an immutable [`Directory`] and resolves tile ids against it.
//! Fetching bytes from storage and caching decoded directories are left to the
//! caller.
pub mod pmtiles;

// Re-export the main types for convenience
pub use pmtiles::{
    Directory,
    DirectoryError,
    Result,
    codec::compression::Compression,
    tile_id::TileCoord,
    types::models::Entry,
};
