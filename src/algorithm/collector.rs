//! Immutable solution snapshots and the append-only record of raw solutions

use ndarray::Array2;

use crate::spatial::grid::{Cell, Placement};
use crate::spatial::tiles::{Side, TileSet};

/// A completely filled grid of placements
///
/// Created once from a full board and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Solution {
    cells: Array2<Placement>,
}

impl Solution {
    /// Build a solution from placements listed row by row
    ///
    /// Returns `None` if the placement count does not equal `rows * cols`.
    pub fn from_row_major(rows: usize, cols: usize, placements: Vec<Placement>) -> Option<Self> {
        Array2::from_shape_vec((rows, cols), placements)
            .ok()
            .map(|cells| Self { cells })
    }

    pub(crate) const fn from_cells(cells: Array2<Placement>) -> Self {
        Self { cells }
    }

    pub(crate) const fn cells(&self) -> &Array2<Placement> {
        &self.cells
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Placement at `cell`
    pub fn get(&self, cell: Cell) -> Option<Placement> {
        self.cells.get(cell).copied()
    }

    /// All placements row by row from the top left
    pub fn placements(&self) -> Vec<Placement> {
        self.cells.iter().copied().collect()
    }

    /// Iterate over `((row, col), placement)` in row-major order
    pub fn indexed_placements(&self) -> impl Iterator<Item = (Cell, Placement)> + '_ {
        self.cells.indexed_iter().map(|(cell, &placement)| (cell, placement))
    }

    /// Check every touching pair of edges directly against the tile set
    ///
    /// Independent of how the solution was produced: verifies the shape, that
    /// each tile is used exactly once, and that all right/bottom neighbours match.
    pub fn satisfies_constraints(&self, tiles: &TileSet) -> bool {
        if self.rows() != tiles.rows() || self.cols() != tiles.cols() {
            return false;
        }

        let mut used = vec![false; tiles.len()];
        for placement in &self.cells {
            match used.get_mut(placement.tile) {
                Some(seen) if !*seen => *seen = true,
                _ => return false,
            }
        }

        self.indexed_placements().all(|((row, col), placement)| {
            let Some(tile) = tiles.tile(placement.tile) else {
                return false;
            };
            let right_ok = self.get((row, col + 1)).is_none_or(|right| {
                tiles.tile(right.tile).is_some_and(|neighbor| {
                    tile.edge(Side::Right, placement.orientation)
                        == neighbor.edge(Side::Left, right.orientation)
                })
            });
            let below_ok = self.get((row + 1, col)).is_none_or(|below| {
                tiles.tile(below.tile).is_some_and(|neighbor| {
                    tile.edge(Side::Bottom, placement.orientation)
                        == neighbor.edge(Side::Top, below.orientation)
                })
            });
            right_ok && below_ok
        })
    }
}

/// Append-only record of every raw solution found by a search
///
/// No deduplication happens here; symmetric images are kept as separate entries.
#[derive(Clone, Debug, Default)]
pub struct SolutionCollector {
    solutions: Vec<Solution>,
}

impl SolutionCollector {
    /// Create an empty collector
    pub const fn new() -> Self {
        Self {
            solutions: Vec::new(),
        }
    }

    /// Append a solution snapshot
    pub fn record(&mut self, solution: Solution) {
        self.solutions.push(solution);
    }

    /// Append every solution from another collector, preserving order
    pub fn extend(&mut self, other: Self) {
        self.solutions.extend(other.solutions);
    }

    /// Number of raw solutions recorded
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    /// Recorded solutions in discovery order
    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    /// Consume the collector, yielding solutions in discovery order
    pub fn into_solutions(self) -> Vec<Solution> {
        self.solutions
    }
}
