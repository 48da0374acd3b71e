//! Exhaustive solver for edge-matching tile puzzles
//!
//! Square tiles carry one symbol per edge and may be turned in quarter turns.
//! The search enumerates every arrangement that fills a rectangular grid with
//! all touching edges matching, and the reducer collapses arrangements that are
//! physically identical (whole-grid turns, swapped duplicate tiles, re-oriented
//! self-symmetric tiles) to one representative each.

#![forbid(unsafe_code)]

/// Placement search, solution collection and symmetry reduction
pub mod algorithm;
/// Tile-set loading, reporting, rendering and error handling
pub mod io;
/// Tile model, board state and puzzle generation
pub mod spatial;

pub use io::error::{Result, SolverError};
