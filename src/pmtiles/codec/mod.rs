//! Codec layer for directory payloads.
//!
//! Directories are usually stored compressed; the decoder itself only accepts
//! uncompressed bytes, so callers inflate with [`compression`] first.

pub mod compression;
