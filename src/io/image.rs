//! Rendering solved grids from per-tile artwork

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::algorithm::collector::Solution;
use crate::io::configuration::{
    DEFAULT_IMAGE_DIR, DEFAULT_IMAGE_EXTENSION, DEFAULT_IMAGE_PREFIX, IMAGE_INDEX_WIDTH,
    TILE_IMAGE_SIZE,
};
use crate::io::error::{Result, SolverError};
use crate::spatial::tiles::{Orientation, TileSet};

/// Where to find the picture of each tile
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileImageSource {
    /// Directory holding the tile images
    pub directory: PathBuf,
    /// File name prefix before the tile identity
    pub prefix: String,
    /// File extension without the dot
    pub extension: String,
    /// Zero-padded width of the identity
    pub index_width: usize,
    /// Edge length in pixels of each rendered tile
    pub tile_size: u32,
}

impl Default for TileImageSource {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_IMAGE_DIR),
            prefix: DEFAULT_IMAGE_PREFIX.to_string(),
            extension: DEFAULT_IMAGE_EXTENSION.to_string(),
            index_width: IMAGE_INDEX_WIDTH,
            tile_size: TILE_IMAGE_SIZE,
        }
    }
}

impl TileImageSource {
    /// Image path for the tile with identity `id`
    pub fn path_for(&self, id: usize) -> PathBuf {
        self.directory.join(format!(
            "{}{id:0width$}.{}",
            self.prefix,
            self.extension,
            width = self.index_width
        ))
    }

    // Missing or unreadable artwork renders as a black square
    fn load_tile(&self, id: usize) -> RgbImage {
        let path = self.path_for(id);
        match image::open(&path) {
            Ok(picture) => picture
                .resize_exact(self.tile_size, self.tile_size, FilterType::Triangle)
                .to_rgb8(),
            Err(error) => {
                warn!(tile = id, path = %path.display(), %error, "could not load tile image");
                RgbImage::new(self.tile_size, self.tile_size)
            }
        }
    }
}

// Turn artwork clockwise to match the tile's orientation
fn orient(picture: &RgbImage, orientation: Orientation) -> RgbImage {
    match orientation.value() {
        1 => imageops::rotate90(picture),
        2 => imageops::rotate180(picture),
        3 => imageops::rotate270(picture),
        _ => picture.clone(),
    }
}

/// Compose a solution into one image
///
/// # Errors
///
/// Returns an error if the grid is too large to express in pixel coordinates
pub fn compose_solution(
    solution: &Solution,
    tiles: &TileSet,
    source: &TileImageSource,
) -> Result<RgbImage> {
    let size = source.tile_size;
    let too_large = || SolverError::InvalidParameter {
        parameter: "grid",
        value: format!("{}x{}", solution.rows(), solution.cols()),
        reason: "rendered image exceeds pixel limits".to_string(),
    };
    let width = u32::try_from(solution.cols())
        .ok()
        .and_then(|cols| cols.checked_mul(size))
        .ok_or_else(too_large)?;
    let height = u32::try_from(solution.rows())
        .ok()
        .and_then(|rows| rows.checked_mul(size))
        .ok_or_else(too_large)?;

    let mut canvas = RgbImage::new(width, height);
    for ((row, col), placement) in solution.indexed_placements() {
        let id = tiles
            .tile(placement.tile)
            .map_or(placement.tile, |tile| tile.id());
        let picture = orient(&source.load_tile(id), placement.orientation);
        let x = i64::from(size) * col as i64;
        let y = i64::from(size) * row as i64;
        imageops::replace(&mut canvas, &picture, x, y);
    }
    Ok(canvas)
}

/// Render a solution and save it as an image file
///
/// # Errors
///
/// Returns an error if:
/// - The grid is too large to render
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn render_solution(
    solution: &Solution,
    tiles: &TileSet,
    source: &TileImageSource,
    output_path: &Path,
) -> Result<()> {
    let canvas = compose_solution(solution, tiles, source)?;

    if let Some(parent) = output_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent).map_err(|e| SolverError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    DynamicImage::ImageRgb8(canvas)
        .save(output_path)
        .map_err(|e| SolverError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    debug!(path = %output_path.display(), "rendered solution");
    Ok(())
}
