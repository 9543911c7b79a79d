use std::cmp::Ordering;
use std::slice::Iter;

use log::{debug, warn};

use super::codec::compression::{self, Compression};
use super::format::entries;
use super::types::error::Result;
use super::types::models::Entry;

/// A decoded tile directory.
///
/// Entries are sorted by `last_tile_id` and never change after decoding, so a
/// `Directory` can be shared between threads and queried without locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    entries: Vec<Entry>,
    total_tiles: Option<u64>,
}

impl Directory {
    /// Decode a directory from its uncompressed bytes.
    ///
    /// # Errors
    /// Returns an error if the buffer is truncated, has trailing bytes, starts
    /// with a contiguous offset, or yields unordered ranges. No partial
    /// directory is ever returned.
    pub fn from(bytes: &[u8]) -> Result<Self> {
        let (entries, total_tiles) = entries::parse(bytes)?;
        Ok(Self { entries, total_tiles })
    }

    /// Decompress `bytes` with the archive's internal compression, then decode.
    pub fn from_compressed(bytes: &[u8], compression: Compression) -> Result<Self> {
        debug!("Decoding {} byte directory ({})", bytes.len(), compression);
        let raw = compression::decompress(bytes, compression)?;
        Self::from(&raw)
    }

    /// Encode this directory back into the uncompressed wire layout.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        entries::encode(&self.entries)
    }

    /// Find the entry covering `tile_id`.
    ///
    /// A run entry is returned when `tile_id` lies in its range. A leaf entry is
    /// returned for ids from its `tile_id` up to the next entry's start; the
    /// caller must then fetch and decode that leaf directory and query it again.
    /// Ids between a leaf and the next entry therefore count as covered by the
    /// leaf, not as a gap; only gaps after a run entry yield `None`.
    /// `None` is a normal outcome for tiles the archive does not hold.
    pub fn find(&self, tile_id: u64) -> Option<&Entry> {
        // First entry whose exclusive end lies past `tile_id`
        let index = match Entry::probe(tile_id) {
            Some(key) => self
                .entries
                .partition_point(|entry| entry.cmp_by_end(&key) == Ordering::Less),
            None => self.entries.len(),
        };

        if let Some(candidate) = self.entries.get(index) {
            if candidate.contains(tile_id) {
                return Some(candidate);
            }
        }

        // Leaves have empty ranges and sort before the ids they stand for
        let previous = self.entries.get(index.checked_sub(1)?)?;
        (previous.is_leaf() && previous.tile_id <= tile_id).then_some(previous)
    }

    /// All entries in directory order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all run lengths, or `None` if it overflowed during decoding.
    pub fn total_tiles(&self) -> Option<u64> {
        self.total_tiles
    }

    /// Compare the decoded tile total with a count recorded elsewhere, such as
    /// the archive header. A mismatch is only reported, never fatal.
    pub fn check_total_tiles(&self, expected: u64) -> bool {
        if self.total_tiles == Some(expected) {
            return true;
        }
        warn!(
            "Directory tile total mismatch: header says {}, entries sum to {:?}",
            expected, self.total_tiles
        );
        false
    }
}

impl<'a> IntoIterator for &'a Directory {
    type Item = &'a Entry;
    type IntoIter = Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl TryFrom<&[u8]> for Directory {
    type Error = super::types::error::DirectoryError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from(bytes)
    }
}
