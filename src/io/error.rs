//! Error types for tile-set validation, board prechecks and file output

use std::fmt;
use std::path::PathBuf;

/// Main error type for all solver operations
#[derive(Debug)]
pub enum SolverError {
    /// Tile set or grid shape is unusable; raised before any search work
    Configuration {
        /// Description of what's wrong with the configuration
        reason: String,
    },

    /// Tile is already placed elsewhere on the board
    TileInUse {
        /// Index of the tile within the tile set
        tile: usize,
    },

    /// Target cell already holds a tile
    CellOccupied {
        /// Row of the occupied cell
        row: usize,
        /// Column of the occupied cell
        col: usize,
    },

    /// Target cell lies outside the grid
    CellOutOfBounds {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
        /// Grid dimensions (rows, cols)
        grid_dimensions: (usize, usize),
    },

    /// Tile-set description could not be parsed
    TileSetParse {
        /// Path of the description file
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Failed to save a rendered solution to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Runtime parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration { reason } => {
                write!(f, "Invalid configuration: {reason}")
            }
            Self::TileInUse { tile } => {
                write!(f, "Tile {tile} is already placed on the board")
            }
            Self::CellOccupied { row, col } => {
                write!(f, "Cell ({row}, {col}) is already occupied")
            }
            Self::CellOutOfBounds {
                row,
                col,
                grid_dimensions,
            } => {
                write!(
                    f,
                    "Cell ({row}, {col}) is outside the grid (grid size {}x{})",
                    grid_dimensions.0, grid_dimensions.1
                )
            }
            Self::TileSetParse { path, source } => {
                write!(
                    f,
                    "Failed to parse tile set '{}': {source}",
                    path.display()
                )
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TileSetParse { source, .. } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, SolverError>;

impl From<std::io::Error> for SolverError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl SolverError {
    /// Whether this error belongs to the configuration family raised before search
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    /// Whether this error is one of the board placement prechecks
    pub const fn is_precheck(&self) -> bool {
        matches!(
            self,
            Self::TileInUse { .. } | Self::CellOccupied { .. } | Self::CellOutOfBounds { .. }
        )
    }
}

/// Create a configuration error
pub fn configuration_error(reason: &impl ToString) -> SolverError {
    SolverError::Configuration {
        reason: reason.to_string(),
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> SolverError {
    SolverError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
