//! Core data structures for directory entries.

use std::cmp::Ordering;
use std::fmt;

use crate::pmtiles::tile_id::TileCoord;

/// A single directory entry.
///
/// Either a run of tiles `[tile_id, last_tile_id)` that all share the payload
/// at `offset`/`length` in the tile-data section, or, when the range is empty,
/// a pointer to a nested leaf directory stored at `offset`/`length` in the
/// leaf-directory section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entry {
    /// First tile id covered by this entry.
    pub tile_id: u64,
    /// Exclusive upper bound of the covered range.
    pub last_tile_id: u64,
    pub offset: u64,
    pub length: u64,
}

impl Entry {
    /// Synthetic search key for "a single tile at id `tile_id`".
    ///
    /// Returns `None` for `u64::MAX`, which no exclusive range can cover.
    pub fn probe(tile_id: u64) -> Option<Self> {
        Some(Self {
            tile_id,
            last_tile_id: tile_id.checked_add(1)?,
            offset: 0,
            length: 0,
        })
    }

    /// Number of tile ids covered by this entry; zero for leaf pointers and
    /// inverted ranges.
    pub fn run_length(&self) -> u64 {
        self.last_tile_id.saturating_sub(self.tile_id)
    }

    /// Whether this entry points at a leaf directory rather than tile data.
    pub fn is_leaf(&self) -> bool {
        self.tile_id == self.last_tile_id
    }

    /// Whether `tile_id` lies in `[self.tile_id, self.last_tile_id)`.
    pub fn contains(&self, tile_id: u64) -> bool {
        self.tile_id <= tile_id && tile_id < self.last_tile_id
    }

    /// Directory order: by `last_tile_id` only.
    ///
    /// Kept separate from `Ord` so that equality still compares every field.
    pub fn cmp_by_end(&self, other: &Self) -> Ordering {
        self.last_tile_id.cmp(&other.last_tile_id)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_leaf() {
            write!(f, "leaf at tile {}", self.tile_id)?;
            if let Ok(coord) = TileCoord::from_tile_id(self.tile_id) {
                write!(f, " ({})", coord)?;
            }
        } else {
            write!(f, "tiles [{}, {})", self.tile_id, self.last_tile_id)?;
            if self.last_tile_id > self.tile_id {
                let first = TileCoord::from_tile_id(self.tile_id);
                let last = TileCoord::from_tile_id(self.last_tile_id - 1);
                match (first, last) {
                    (Ok(first), Ok(_)) if self.run_length() == 1 => write!(f, " ({})", first)?,
                    (Ok(first), Ok(last)) => write!(f, " ({} .. {})", first, last)?,
                    _ => {}
                }
            }
        }
        write!(f, " @ {}+{}", self.offset, self.length)
    }
}
