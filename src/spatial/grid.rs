//! Board state for the placement search
//!
//! The board is pure state plus accessors: an R×C array of optional
//! placements and the set of tiles currently on it. It never iterates cells on
//! its own; the search drives it with cheap push (`place`) and pop (`remove`)
//! operations in strict stack order.

use ndarray::Array2;

use crate::algorithm::bitset::TileBitset;
use crate::algorithm::collector::Solution;
use crate::io::error::{Result, SolverError};
use crate::spatial::tiles::{Orientation, Side, Symbol, Tile, TileSet};

/// Grid coordinates as (row, col)
pub type Cell = (usize, usize);

/// A tile occupying one cell at a given orientation
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Placement {
    /// Index of the tile within the tile set
    pub tile: usize,
    /// Clockwise quarter turns applied to the tile
    pub orientation: Orientation,
}

impl Placement {
    /// Create a placement of `tile` turned `orientation` quarter turns
    pub const fn new(tile: usize, orientation: Orientation) -> Self {
        Self { tile, orientation }
    }
}

/// Mutable grid of placed tiles for one search
#[derive(Clone, Debug)]
pub struct Board<'t> {
    tiles: &'t TileSet,
    cells: Array2<Option<Placement>>,
    in_use: TileBitset,
}

impl<'t> Board<'t> {
    /// Create an empty board shaped for the tile set
    pub fn new(tiles: &'t TileSet) -> Self {
        Self {
            tiles,
            cells: Array2::from_elem((tiles.rows(), tiles.cols()), None),
            in_use: TileBitset::new(tiles.len()),
        }
    }

    /// Tile set the board draws from
    pub const fn tile_set(&self) -> &'t TileSet {
        self.tiles
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Placement occupying `cell`, if any
    pub fn get(&self, cell: Cell) -> Option<Placement> {
        self.cells.get(cell).copied().flatten()
    }

    /// Whether the tile at `tile` index is on the board
    pub fn is_in_use(&self, tile: usize) -> bool {
        self.in_use.contains(tile)
    }

    /// Tile indices not yet on the board, ascending
    pub fn unused_tiles(&self) -> impl Iterator<Item = usize> + '_ {
        self.in_use.iter_absent()
    }

    /// Number of occupied cells
    pub fn placed_count(&self) -> usize {
        self.in_use.count()
    }

    /// Whether no cell is occupied
    pub fn is_empty(&self) -> bool {
        self.in_use.is_empty()
    }

    /// Whether every cell is occupied
    pub fn is_complete(&self) -> bool {
        self.placed_count() == self.cells.len()
    }

    /// Put `tile` on `cell` at `orientation`
    ///
    /// Adjacency is not checked here; see [`Board::accepts`].
    ///
    /// # Errors
    ///
    /// Returns an error if the cell is outside the grid, the cell is already
    /// occupied, or the tile is already placed elsewhere. The board is left
    /// unchanged on error.
    pub fn place(&mut self, cell: Cell, tile: usize, orientation: Orientation) -> Result<()> {
        let grid_dimensions = (self.rows(), self.cols());
        let slot = self
            .cells
            .get_mut(cell)
            .ok_or(SolverError::CellOutOfBounds {
                row: cell.0,
                col: cell.1,
                grid_dimensions,
            })?;
        if slot.is_some() {
            return Err(SolverError::CellOccupied {
                row: cell.0,
                col: cell.1,
            });
        }
        if tile >= self.in_use.capacity() || !self.in_use.insert(tile) {
            return Err(SolverError::TileInUse { tile });
        }
        *slot = Some(Placement::new(tile, orientation));
        Ok(())
    }

    /// Clear `cell` and free its tile for reuse
    ///
    /// Removing from an empty or out-of-range cell is a no-op returning `None`.
    pub fn remove(&mut self, cell: Cell) -> Option<Placement> {
        let placement = self.cells.get_mut(cell)?.take()?;
        self.in_use.remove(placement.tile);
        Some(placement)
    }

    /// Symbol the neighbour of `cell` in direction `side` shows towards `cell`
    ///
    /// Returns `None` ("no constraint") when that neighbour lies outside the
    /// grid or is unoccupied.
    pub fn neighbor_edge(&self, cell: Cell, side: Side) -> Option<Symbol> {
        let (row_step, col_step) = side.offset();
        let row = cell.0.checked_add_signed(row_step)?;
        let col = cell.1.checked_add_signed(col_step)?;
        let neighbor = self.get((row, col))?;
        let tile = self.tiles.tile(neighbor.tile)?;
        Some(tile.edge(side.opposite(), neighbor.orientation))
    }

    /// Whether `tile` at `orientation` matches every occupied neighbour of `cell`
    pub fn accepts(&self, cell: Cell, tile: &Tile, orientation: Orientation) -> bool {
        Side::ALL
            .iter()
            .all(|&side| tile.fits(orientation, side, self.neighbor_edge(cell, side)))
    }

    /// Immutable copy of a completely filled board
    ///
    /// Returns `None` while any cell is empty.
    pub fn snapshot(&self) -> Option<Solution> {
        let placements = self.cells.iter().copied().collect::<Option<Vec<_>>>()?;
        Solution::from_row_major(self.rows(), self.cols(), placements)
    }
}
