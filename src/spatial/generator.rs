//! Seeded random puzzle construction
//!
//! Builds a solved grid by drawing a random symbol for every edge between and
//! around cells, cuts it into tiles, then shuffles and randomly turns the
//! tiles. The result always has at least one solution.

use ndarray::Array2;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::io::error::{Result, invalid_parameter};
use crate::spatial::tiles::{Orientation, Side, Symbol, Tile, TileSet};

/// Generate a solvable `rows` × `cols` puzzle drawing from `symbol_count` symbols
///
/// The same arguments always produce the same tile set.
///
/// # Errors
///
/// Returns an error if the grid is empty or `symbol_count` is zero
pub fn generate_puzzle(rows: usize, cols: usize, symbol_count: u16, seed: u64) -> Result<TileSet> {
    if rows == 0 || cols == 0 {
        return Err(invalid_parameter(
            "grid",
            &format!("{rows}x{cols}"),
            &"grid must have at least one cell",
        ));
    }
    if symbol_count == 0 {
        return Err(invalid_parameter(
            "symbol_count",
            &symbol_count,
            &"at least one symbol is required",
        ));
    }

    let mut rng = StdRng::seed_from_u64(seed);

    // above[(r, c)] is the edge on top of cell (r, c); row `rows` is the bottom border
    let above = Array2::from_shape_fn((rows + 1, cols), |_| {
        Symbol(rng.random_range(0..symbol_count))
    });
    // left_of[(r, c)] is the edge left of cell (r, c); column `cols` is the right border
    let left_of = Array2::from_shape_fn((rows, cols + 1), |_| {
        Symbol(rng.random_range(0..symbol_count))
    });

    let mut shown: Vec<[Symbol; 4]> = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            let edge = |grid: &Array2<Symbol>, cell: (usize, usize)| {
                grid.get(cell).copied().unwrap_or(Symbol(0))
            };
            shown.push([
                edge(&above, (row, col)),
                edge(&left_of, (row, col + 1)),
                edge(&above, (row + 1, col)),
                edge(&left_of, (row, col)),
            ]);
        }
    }
    shown.shuffle(&mut rng);

    let tiles = shown
        .into_iter()
        .enumerate()
        .map(|(id, solved_edges)| {
            // Store edges so that turning the tile by `turns` restores the solved view
            let turns = Orientation::new(rng.random_range(0..4));
            let stored: Vec<Symbol> = Side::ALL
                .iter()
                .map(|&side| {
                    let shown_on = (side.index() + turns.value() as usize) % 4;
                    solved_edges.get(shown_on).copied().unwrap_or(Symbol(0))
                })
                .collect();
            Tile::new(id, &stored)
        })
        .collect::<Result<Vec<_>>>()?;

    let symbol_names = (0..symbol_count).map(|symbol| format!("s{symbol}")).collect();
    TileSet::new(rows, cols, tiles, symbol_names)
}
