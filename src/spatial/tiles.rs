//! Tile model: edge symbols, quarter-turn orientation arithmetic and validated tile sets
//!
//! Edges are stored clockwise starting from the top in the tile's unrotated
//! orientation. A tile turned `o` quarter turns clockwise shows
//! `edges[(side - o) mod 4]` on `side`.

use std::collections::HashSet;
use std::fmt;

use crate::io::configuration::EDGES_PER_TILE;
use crate::io::error::{Result, configuration_error};

/// Opaque edge motif identifier
///
/// Only equality matters for matching; the ordering exists so that canonical
/// forms can be chosen deterministically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(
    /// Interned symbol number
    pub u16,
);

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Logical side of a grid cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Upper edge
    Top = 0,
    /// Right-hand edge
    Right = 1,
    /// Lower edge
    Bottom = 2,
    /// Left-hand edge
    Left = 3,
}

impl Side {
    /// All sides in clockwise order from the top
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Position of this side in clockwise order
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Side facing this one across a shared edge
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// Row and column step towards the neighbour on this side
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Top => (-1, 0),
            Self::Right => (0, 1),
            Self::Bottom => (1, 0),
            Self::Left => (0, -1),
        }
    }
}

/// Clockwise quarter-turn count, always in `0..4`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Orientation(u8);

impl Orientation {
    /// Unrotated orientation
    pub const IDENTITY: Self = Self(0);

    /// Every orientation in ascending order
    pub const ALL: [Self; 4] = [Self(0), Self(1), Self(2), Self(3)];

    /// Build an orientation from any turn count, reduced modulo 4
    pub const fn new(turns: u8) -> Self {
        Self(turns % 4)
    }

    /// Quarter turns in `0..4`
    pub const fn value(self) -> u8 {
        self.0
    }

    /// This orientation turned a further `turns` quarter turns clockwise
    #[must_use]
    pub const fn rotated_by(self, turns: u8) -> Self {
        Self::new(self.0 + turns % 4)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A physical square tile with four edge symbols
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    id: usize,
    edges: [Symbol; 4],
}

impl Tile {
    /// Create a tile from its identity and clockwise edges starting at the top
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless exactly four edges are given
    pub fn new(id: usize, edges: &[Symbol]) -> Result<Self> {
        let edges: [Symbol; 4] = edges.try_into().map_err(|_| {
            configuration_error(&format!(
                "tile {id} has {} edges, expected {EDGES_PER_TILE}",
                edges.len()
            ))
        })?;
        Ok(Self { id, edges })
    }

    /// Identity distinguishing this physical tile from all others
    pub const fn id(&self) -> usize {
        self.id
    }

    /// Edges in the unrotated orientation
    pub const fn edges(&self) -> &[Symbol; 4] {
        &self.edges
    }

    /// Symbol shown on `side` when the tile sits at `orientation`
    pub const fn edge(&self, side: Side, orientation: Orientation) -> Symbol {
        self.edges[(side.index() + 4 - orientation.value() as usize) % 4]
    }

    /// All four visible symbols at `orientation`, clockwise from the top
    pub const fn shown_edges(&self, orientation: Orientation) -> [Symbol; 4] {
        [
            self.edge(Side::Top, orientation),
            self.edge(Side::Right, orientation),
            self.edge(Side::Bottom, orientation),
            self.edge(Side::Left, orientation),
        ]
    }

    /// Whether this tile at `orientation` can touch `neighbor_symbol` on `side`
    ///
    /// A missing neighbour symbol imposes no constraint.
    pub fn fits(&self, orientation: Orientation, side: Side, neighbor_symbol: Option<Symbol>) -> bool {
        neighbor_symbol.is_none_or(|symbol| self.edge(side, orientation) == symbol)
    }

    /// Smallest number of quarter turns that leaves the tile looking unchanged
    ///
    /// Always 1, 2 or 4.
    pub fn rotational_period(&self) -> u8 {
        [1, 2]
            .into_iter()
            .find(|&turns| self.shown_edges(Orientation::new(turns)) == self.edges)
            .unwrap_or(4)
    }

    /// Whether distinct orientations of this tile can look identical
    pub fn is_self_symmetric(&self) -> bool {
        self.rotational_period() < 4
    }

    /// Lexicographically smallest rotation of the edge sequence
    ///
    /// Two tiles are indistinguishable exactly when their canonical edges agree.
    pub fn canonical_edges(&self) -> [Symbol; 4] {
        Orientation::ALL
            .iter()
            .map(|&orientation| self.shown_edges(orientation))
            .min()
            .unwrap_or(self.edges)
    }

    /// Turns `k` such that `other` at orientation `o + k` looks like `self` at `o`
    ///
    /// Returns the smallest such `k`, or `None` when the tiles are not duplicates.
    pub fn rotation_to(&self, other: &Self) -> Option<u8> {
        (0..4).find(|&turns| other.shown_edges(Orientation::new(turns)) == self.edges)
    }

    /// Whether both tiles show the same edges under some rotation
    pub fn is_duplicate_of(&self, other: &Self) -> bool {
        self.rotation_to(other).is_some()
    }
}

/// Validated tiles together with the grid they must fill
///
/// Tiles are held in ascending identity order; searches and solutions refer to
/// tiles by their index in this order.
#[derive(Clone, Debug)]
pub struct TileSet {
    rows: usize,
    cols: usize,
    tiles: Vec<Tile>,
    symbol_names: Vec<String>,
}

impl TileSet {
    /// Validate tiles against the grid shape
    ///
    /// `symbol_names[i]` names `Symbol(i)`; it may be empty when names are unknown.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the grid has no cells, the tile count
    /// differs from `rows * cols`, or two tiles share an identity
    pub fn new(
        rows: usize,
        cols: usize,
        mut tiles: Vec<Tile>,
        symbol_names: Vec<String>,
    ) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(configuration_error(&format!(
                "grid {rows}x{cols} has no cells"
            )));
        }

        let cells = rows.checked_mul(cols).ok_or_else(|| {
            configuration_error(&format!("grid {rows}x{cols} is too large"))
        })?;
        if tiles.len() != cells {
            return Err(configuration_error(&format!(
                "{} tiles cannot fill a {rows}x{cols} grid of {cells} cells",
                tiles.len()
            )));
        }

        let mut seen = HashSet::with_capacity(tiles.len());
        for tile in &tiles {
            if !seen.insert(tile.id) {
                return Err(configuration_error(&format!(
                    "tile identity {} appears more than once",
                    tile.id
                )));
            }
        }

        tiles.sort_by_key(Tile::id);

        Ok(Self {
            rows,
            cols,
            tiles,
            symbol_names,
        })
    }

    /// Build a tile set from raw edge lists, using list position as identity
    ///
    /// # Errors
    ///
    /// Returns a configuration error for malformed tiles or a grid mismatch
    pub fn from_edges(rows: usize, cols: usize, edges: &[Vec<Symbol>]) -> Result<Self> {
        let tiles = edges
            .iter()
            .enumerate()
            .map(|(id, tile_edges)| Tile::new(id, tile_edges))
            .collect::<Result<Vec<_>>>()?;
        Self::new(rows, cols, tiles, Vec::new())
    }

    /// Number of grid rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of grid columns
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of tiles, equal to the number of cells
    pub const fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false for a validated set, kept for API symmetry with `len`
    pub const fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Whether the grid is square
    pub const fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Tile at `index` in ascending identity order
    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// All tiles in ascending identity order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Human-readable name of a symbol, falling back to its numeric form
    pub fn symbol_name(&self, symbol: Symbol) -> String {
        self.symbol_names
            .get(symbol.0 as usize)
            .cloned()
            .unwrap_or_else(|| symbol.to_string())
    }

    /// Distinct symbols appearing on any tile, in ascending order
    pub fn distinct_symbols(&self) -> Vec<Symbol> {
        let mut symbols: Vec<Symbol> = self
            .tiles
            .iter()
            .flat_map(|tile| tile.edges.iter().copied())
            .collect();
        symbols.sort_unstable();
        symbols.dedup();
        symbols
    }
}
