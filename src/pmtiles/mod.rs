//! Core PMTiles directory module
//!
//! Decoding pipeline: compressed bytes → [`codec`] → [`format`] → [`Directory`],
//! then [`Directory::find`] resolves tile ids to entries.

pub mod codec;
pub mod format;
pub mod tile_id;
pub mod types;
mod directory;

pub use directory::Directory;
pub use types::error::{DirectoryError, Result};
