//! Columnar directory encoding.
//!
//! Structure (all values are unsigned varints):
//! - `n`: number of entries
//! - `n` tile id deltas (the first relative to 0)
//! - `n` run lengths
//! - `n` payload lengths
//! - `n` offsets: `0` means "directly after the previous payload",
//!   any other value `v` is the absolute offset `v - 1`
//!
//! Columns are decoded into parallel vectors and zipped into entries in one
//! final pass.

use log::{debug, trace};

use super::varint::{encode_varint, VarintReader};
use crate::pmtiles::types::error::{DirectoryError, Result};
use crate::pmtiles::types::models::Entry;

/// Result of parsing a directory buffer.
///
/// Contains:
/// - the entries, in directory order
/// - the sum of all run lengths, or `None` when it does not fit in a u64
pub type ParseResult = (Vec<Entry>, Option<u64>);

/// Decode the uncompressed directory bytes.
///
/// # Errors
/// - [`DirectoryError::TruncatedInput`] if any column ends early
/// - [`DirectoryError::InvalidFirstOffset`] if entry 0 uses the contiguous encoding
/// - [`DirectoryError::TrailingBytes`] if bytes remain after the offset column
/// - [`DirectoryError::OrderingViolation`] if the reconstructed ranges are unordered
pub fn parse(data: &[u8]) -> Result<ParseResult> {
    let mut reader = VarintReader::new(data);
    let num_entries = reader.read_var_u64()?;
    debug!("Parsing directory: {} entries in {} bytes", num_entries, data.len());

    // Every entry needs at least one byte per column; don't trust `n` for the allocation
    let capacity = usize::try_from(num_entries)
        .unwrap_or(usize::MAX)
        .min(reader.remaining() / 4);

    let mut tile_ids = Vec::with_capacity(capacity);
    let mut last_id = 0u64;
    for index in 0..num_entries {
        let delta = reader.read_var_u64()?;
        last_id = last_id.checked_add(delta).ok_or(DirectoryError::ArithmeticOverflow {
            context: "tile id delta",
            index: index as usize,
        })?;
        tile_ids.push(last_id);
    }
    trace!("Tile id column ends at byte {}", reader.position());

    let mut last_tile_ids = Vec::with_capacity(tile_ids.len());
    let mut total_tiles = Some(0u64);
    for (index, &tile_id) in tile_ids.iter().enumerate() {
        let run = reader.read_var_u64()?;
        let last_tile_id = tile_id.checked_add(run).ok_or(DirectoryError::ArithmeticOverflow {
            context: "run length",
            index,
        })?;
        last_tile_ids.push(last_tile_id);
        total_tiles = total_tiles.and_then(|total| total.checked_add(run));
    }
    trace!("Run length column ends at byte {}", reader.position());

    let mut lengths = Vec::with_capacity(tile_ids.len());
    for _ in 0..tile_ids.len() {
        lengths.push(reader.read_var_u64()?);
    }
    trace!("Length column ends at byte {}", reader.position());

    let mut offsets: Vec<u64> = Vec::with_capacity(tile_ids.len());
    for index in 0..tile_ids.len() {
        let encoded = reader.read_var_u64()?;
        let offset = if encoded == 0 {
            let previous = index.checked_sub(1).ok_or(DirectoryError::InvalidFirstOffset)?;
            offsets[previous]
                .checked_add(lengths[previous])
                .ok_or(DirectoryError::ArithmeticOverflow {
                    context: "contiguous offset",
                    index,
                })?
        } else {
            encoded - 1
        };
        offsets.push(offset);
    }
    trace!("Offset column ends at byte {}", reader.position());

    if !reader.is_at_end() {
        return Err(DirectoryError::TrailingBytes {
            remaining: reader.remaining(),
            entries: num_entries,
        });
    }

    let entries: Vec<Entry> = tile_ids
        .into_iter()
        .zip(last_tile_ids)
        .zip(lengths.into_iter().zip(offsets))
        .map(|((tile_id, last_tile_id), (length, offset))| Entry {
            tile_id,
            last_tile_id,
            offset,
            length,
        })
        .collect();

    verify_order(&entries)?;

    debug!(
        "Directory parsed: {} entries, {} leaves, total tiles {:?}",
        entries.len(),
        entries.iter().filter(|e| e.is_leaf()).count(),
        total_tiles
    );
    Ok((entries, total_tiles))
}

/// Encode entries into the columnar layout accepted by [`parse`].
///
/// Offsets that continue the previous entry's payload are written as `0`.
///
/// # Errors
/// - [`DirectoryError::OrderingViolation`] if the entries could not be decoded back
/// - [`DirectoryError::ArithmeticOverflow`] for an offset of `u64::MAX`
pub fn encode(entries: &[Entry]) -> Result<Vec<u8>> {
    verify_order(entries)?;

    let mut buf = Vec::with_capacity(1 + entries.len() * 4);
    encode_varint(entries.len() as u64, &mut buf);

    let mut last_id = 0u64;
    for entry in entries {
        encode_varint(entry.tile_id - last_id, &mut buf);
        last_id = entry.tile_id;
    }
    for entry in entries {
        encode_varint(entry.run_length(), &mut buf);
    }
    for entry in entries {
        encode_varint(entry.length, &mut buf);
    }

    let mut previous: Option<&Entry> = None;
    for (index, entry) in entries.iter().enumerate() {
        let contiguous = previous
            .and_then(|p| p.offset.checked_add(p.length))
            .is_some_and(|end| end == entry.offset);
        if contiguous {
            encode_varint(0, &mut buf);
        } else {
            let biased = entry.offset.checked_add(1).ok_or(DirectoryError::ArithmeticOverflow {
                context: "offset bias",
                index,
            })?;
            encode_varint(biased, &mut buf);
        }
        previous = Some(entry);
    }

    debug!("Encoded {} directory entries into {} bytes", entries.len(), buf.len());
    Ok(buf)
}

/// Check that entries are well-formed ranges, strictly ascending by
/// `last_tile_id`, and do not overlap.
fn verify_order(entries: &[Entry]) -> Result<()> {
    for (index, entry) in entries.iter().enumerate() {
        if entry.last_tile_id < entry.tile_id {
            return Err(DirectoryError::OrderingViolation {
                index,
                detail: format!("range [{}, {}) is inverted", entry.tile_id, entry.last_tile_id),
            });
        }
    }
    for (index, pair) in entries.windows(2).enumerate() {
        let (previous, current) = (&pair[0], &pair[1]);
        if current.cmp_by_end(previous).is_le() {
            return Err(DirectoryError::OrderingViolation {
                index: index + 1,
                detail: format!(
                    "last tile id {} does not follow {}",
                    current.last_tile_id, previous.last_tile_id
                ),
            });
        }
        if current.tile_id < previous.last_tile_id {
            return Err(DirectoryError::OrderingViolation {
                index: index + 1,
                detail: format!(
                    "tile {} overlaps previous range ending at {}",
                    current.tile_id, previous.last_tile_id
                ),
            });
        }
    }
    Ok(())
}
