/// Fixed-size bitset tracking which tiles are on the board
pub mod bitset;
/// Immutable solution snapshots and the raw solution record
pub mod collector;
/// Exhaustive backtracking placement search
pub mod search;
/// Symmetry reduction of raw solutions to distinct arrangements
pub mod symmetry;
