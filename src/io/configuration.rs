//! Solver constants and runtime configuration defaults

/// Number of edges on every tile
pub const EDGES_PER_TILE: usize = 4;

/// Tile-set description read when no target is given
pub const DEFAULT_TILE_SET_FILE: &str = "card_list.json";

/// Placeholder puzzle name when the description omits one
pub const DEFAULT_PUZZLE_NAME: &str = "Unnamed";
/// Placeholder manufacturer when the description omits one
pub const DEFAULT_MANUFACTURER: &str = "Unknown";

// Tile artwork lookup: <dir>/<prefix><id padded to width>.<extension>
/// Directory holding one image per tile
pub const DEFAULT_IMAGE_DIR: &str = "images";
/// File name prefix for tile images
pub const DEFAULT_IMAGE_PREFIX: &str = "tile_";
/// File extension for tile images
pub const DEFAULT_IMAGE_EXTENSION: &str = "jpg";
/// Zero-padded width of the tile identity in image file names
pub const IMAGE_INDEX_WIDTH: usize = 2;

/// Edge length in pixels of each tile in a rendered solution
pub const TILE_IMAGE_SIZE: u32 = 200;
/// Suffix added to rendered solution file names before the solution number
pub const SOLUTION_IMAGE_SUFFIX: &str = "_solution";
/// Directory for rendered solutions when none is given
pub const DEFAULT_OUTPUT_DIR: &str = "solutions";

/// Worker threads used by the search unless overridden
pub const DEFAULT_THREADS: usize = 1;

// Progress display settings
/// Spinner refresh interval in milliseconds
pub const PROGRESS_TICK_MS: u64 = 120;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
