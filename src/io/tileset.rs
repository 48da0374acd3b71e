//! JSON tile-set descriptions
//!
//! A description names the puzzle, optionally fixes the grid size and the
//! symbol vocabulary, and lists each card's four symbols clockwise from the
//! top. Card position in the list is the tile's identity.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

use crate::io::configuration::{DEFAULT_MANUFACTURER, DEFAULT_PUZZLE_NAME, EDGES_PER_TILE};
use crate::io::error::{Result, SolverError, configuration_error};
use crate::spatial::tiles::{Symbol, Tile, TileSet};

/// Puzzle description as stored on disk
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSetDescription {
    /// Puzzle name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Puzzle maker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    /// Grid shape as `[rows, cols]`; estimated from the card count when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_size: Option<[usize; 2]>,
    /// Symbol vocabulary; inferred from the cards when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbols: Option<Vec<String>>,
    /// Each card's symbols, clockwise from the top
    #[serde(default)]
    pub cards: Vec<Vec<String>>,
}

/// Estimate grid shape from the number of cards
///
/// A perfect square count gives a square grid, anything else a single row.
pub fn estimate_grid_size(card_count: usize) -> [usize; 2] {
    let root = card_count.isqrt();
    if root * root == card_count {
        [root, root]
    } else {
        [1, card_count]
    }
}

impl TileSetDescription {
    /// Parse a description from JSON text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid description
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| SolverError::TileSetParse {
            path: "<inline>".into(),
            source,
        })
    }

    /// Read and parse a description file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SolverError::FileSystem {
            path: path.to_path_buf(),
            operation: "read tile set",
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| SolverError::TileSetParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Puzzle name, or a placeholder
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_PUZZLE_NAME)
    }

    /// Puzzle maker, or a placeholder
    pub fn display_manufacturer(&self) -> &str {
        self.manufacturer.as_deref().unwrap_or(DEFAULT_MANUFACTURER)
    }

    /// Grid shape, explicit or estimated
    pub fn resolved_grid_size(&self) -> [usize; 2] {
        self.grid_size
            .unwrap_or_else(|| estimate_grid_size(self.cards.len()))
    }

    /// Symbol vocabulary, explicit or the sorted distinct card symbols
    pub fn resolved_symbols(&self) -> Vec<String> {
        self.symbols.clone().unwrap_or_else(|| {
            let mut symbols: Vec<String> = self.cards.iter().flatten().cloned().collect();
            symbols.sort_unstable();
            symbols.dedup();
            symbols
        })
    }

    /// Intern symbols and validate the cards against the grid
    ///
    /// `grid_override` replaces the described or estimated grid shape.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if there are no cards, a card does not
    /// have four symbols, a card uses a symbol missing from an explicit
    /// vocabulary, the vocabulary is too large, or the cards do not fill the grid
    pub fn build_tile_set(&self, grid_override: Option<[usize; 2]>) -> Result<TileSet> {
        if self.cards.is_empty() {
            return Err(configuration_error(&"description contains no cards"));
        }

        let symbols = self.resolved_symbols();
        if symbols.len() > usize::from(u16::MAX) {
            return Err(configuration_error(&format!(
                "{} symbols exceed the supported maximum of {}",
                symbols.len(),
                u16::MAX
            )));
        }
        let lookup: HashMap<&str, Symbol> = symbols
            .iter()
            .enumerate()
            .map(|(index, name)| (name.as_str(), Symbol(index as u16)))
            .collect();

        let tiles = self
            .cards
            .iter()
            .enumerate()
            .map(|(id, card)| {
                if card.len() != EDGES_PER_TILE {
                    return Err(configuration_error(&format!(
                        "card {id} has {} symbols, expected {EDGES_PER_TILE}: {card:?}",
                        card.len()
                    )));
                }
                let edges = card
                    .iter()
                    .map(|name| {
                        lookup.get(name.as_str()).copied().ok_or_else(|| {
                            configuration_error(&format!(
                                "card {id} uses symbol '{name}' missing from the symbol list"
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Tile::new(id, &edges)
            })
            .collect::<Result<Vec<_>>>()?;

        let [rows, cols] = grid_override.unwrap_or_else(|| self.resolved_grid_size());
        debug!(rows, cols, symbols = symbols.len(), "interned tile set");
        let tile_set = TileSet::new(rows, cols, tiles, symbols)?;

        info!(
            name = self.display_name(),
            manufacturer = self.display_manufacturer(),
            rows,
            cols,
            tiles = tile_set.len(),
            symbols = tile_set.distinct_symbols().len(),
            "loaded tile set"
        );
        Ok(tile_set)
    }
}
