//! Conversion between tile ids and `z/x/y` coordinates.
//!
//! Tile ids number every tile of the pyramid: all tiles of zoom 0, then all of
//! zoom 1, and so on, each level walked along a Hilbert curve. Only used here
//! to render entries for diagnostics.

use std::fmt;

use crate::pmtiles::types::error::{DirectoryError, Result};

/// Deepest zoom level whose tile ids fit in a u64.
pub const MAX_ZOOM: u8 = 31;

/// A tile position in the pyramid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

impl TileCoord {
    /// Create a coordinate, checking that it lies inside its zoom level.
    pub fn new(z: u8, x: u32, y: u32) -> Result<Self> {
        if z > MAX_ZOOM || u64::from(x) >= 1u64 << z || u64::from(y) >= 1u64 << z {
            return Err(DirectoryError::InvalidTileCoord { z, x, y });
        }
        Ok(Self { z, x, y })
    }

    /// Position of this tile in the global traversal order.
    pub fn to_tile_id(&self) -> u64 {
        let n = 1u64 << self.z;
        let (mut x, mut y) = (u64::from(self.x), u64::from(self.y));
        let mut d = 0u64;
        let mut s = n / 2;
        while s > 0 {
            let rx = u64::from(x & s > 0);
            let ry = u64::from(y & s > 0);
            d += s * s * ((3 * rx) ^ ry);
            rotate(n, &mut x, &mut y, rx, ry);
            s /= 2;
        }
        level_base(self.z) + d
    }

    /// Inverse of [`to_tile_id`](Self::to_tile_id).
    pub fn from_tile_id(tile_id: u64) -> Result<Self> {
        let mut base = 0u64;
        for z in 0..=MAX_ZOOM {
            let level_tiles = 1u64 << (2 * u32::from(z));
            let position = tile_id - base;
            if position < level_tiles {
                return Ok(position_on_level(z, position));
            }
            base += level_tiles;
        }
        Err(DirectoryError::TileIdOutOfRange(tile_id))
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// Id of the first tile at zoom `z`: `(4^z - 1) / 3`.
fn level_base(z: u8) -> u64 {
    ((1u64 << (2 * u32::from(z))) - 1) / 3
}

fn position_on_level(z: u8, position: u64) -> TileCoord {
    let n = 1u64 << z;
    let (mut x, mut y) = (0u64, 0u64);
    let mut t = position;
    let mut s = 1u64;
    while s < n {
        let rx = 1 & (t / 2);
        let ry = 1 & (t ^ rx);
        rotate(s, &mut x, &mut y, rx, ry);
        x += s * rx;
        y += s * ry;
        t /= 4;
        s *= 2;
    }
    // x, y < 2^z <= 2^31
    TileCoord { z, x: x as u32, y: y as u32 }
}

fn rotate(n: u64, x: &mut u64, y: &mut u64, rx: u64, ry: u64) {
    if ry == 0 {
        if rx == 1 {
            *x = n - 1 - *x;
            *y = n - 1 - *y;
        }
        std::mem::swap(x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(z: u8, x: u32, y: u32) -> u64 {
        TileCoord::new(z, x, y).unwrap().to_tile_id()
    }

    #[test]
    fn test_low_zoom_ids() {
        assert_eq!(id(0, 0, 0), 0);
        assert_eq!(id(1, 0, 0), 1);
        assert_eq!(id(1, 0, 1), 2);
        assert_eq!(id(1, 1, 1), 3);
        assert_eq!(id(1, 1, 0), 4);
        assert_eq!(id(2, 0, 0), 5);
        assert_eq!(id(3, 0, 0), 21);
    }

    #[test]
    fn test_every_tile_round_trips_through_zoom_5() {
        let mut seen = Vec::new();
        for z in 0..=5u8 {
            for x in 0..(1u32 << z) {
                for y in 0..(1u32 << z) {
                    let coord = TileCoord::new(z, x, y).unwrap();
                    let tile_id = coord.to_tile_id();
                    assert_eq!(TileCoord::from_tile_id(tile_id).unwrap(), coord);
                    seen.push(tile_id);
                }
            }
        }
        // Ids are dense: 0..(4^6 - 1) / 3
        seen.sort_unstable();
        assert_eq!(seen, (0..level_base(6)).collect::<Vec<_>>());
    }

    #[test]
    fn test_deepest_zoom_bounds() {
        let last = TileCoord::from_tile_id(u64::MAX / 3 - 1).unwrap();
        assert_eq!(last.z, MAX_ZOOM);
        assert_eq!(last.to_tile_id(), u64::MAX / 3 - 1);
        assert!(matches!(
            TileCoord::from_tile_id(u64::MAX / 3),
            Err(DirectoryError::TileIdOutOfRange(_))
        ));
    }

    #[test]
    fn test_rejects_coordinates_outside_level() {
        assert!(TileCoord::new(2, 4, 0).is_err());
        assert!(TileCoord::new(32, 0, 0).is_err());
        assert_eq!(TileCoord::new(3, 7, 7).unwrap().to_string(), "3/7/7");
    }
}
