//! Spatial data structures for tiles and the board
//!
//! This module contains spatial-related functionality including:
//! - Tile edges and quarter-turn orientation arithmetic
//! - Board state with placement prechecks
//! - Random solvable puzzle construction

/// Seeded random puzzle generator
pub mod generator;
/// Board state manipulated by the search
pub mod grid;
/// Tile model and validated tile sets
pub mod tiles;

pub use grid::{Board, Placement};
pub use tiles::{Orientation, Side, Symbol, Tile, TileSet};
