//! Loading, reporting, rendering and command-line orchestration

/// Command-line parsing and the solve pipeline
pub mod cli;
/// Solver constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// Rendering solved grids from tile artwork
pub mod image;
/// Terminal progress display for the search
pub mod progress;
/// Text and JSON reporting of solutions
pub mod report;
/// JSON tile-set descriptions
pub mod tileset;
