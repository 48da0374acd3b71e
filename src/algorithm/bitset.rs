use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset recording which tiles of a tile set are currently placed
///
/// Indexed by tile position in the tile set. Provides O(1) insert, remove and
/// membership testing for the push/pop discipline of the search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBitset {
    bits: BitVec,
}

impl TileBitset {
    /// Create a bitset with no tiles present
    pub fn new(max_tiles: usize) -> Self {
        Self {
            bits: bitvec![0; max_tiles],
        }
    }

    /// Number of tiles the set can track
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Insert a tile index, returning whether it was newly added
    ///
    /// Indices beyond the capacity are ignored.
    pub fn insert(&mut self, tile: usize) -> bool {
        if self.bits.get(tile).as_deref() == Some(&false) {
            self.bits.set(tile, true);
            true
        } else {
            false
        }
    }

    /// Remove a tile index, returning whether it was present
    pub fn remove(&mut self, tile: usize) -> bool {
        if self.contains(tile) {
            self.bits.set(tile, false);
            true
        } else {
            false
        }
    }

    /// Test tile membership
    pub fn contains(&self, tile: usize) -> bool {
        self.bits.get(tile).as_deref() == Some(&true)
    }

    /// Test if no tiles are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count tiles in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Indices of tiles not in the set, ascending
    pub fn iter_absent(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_zeros()
    }

    /// Extract all tile indices as a vector, ascending
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for TileBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileBitset({} tiles: {:?})", self.count(), self.to_vec())
    }
}
