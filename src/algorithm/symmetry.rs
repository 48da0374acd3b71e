//! Symmetry reduction of raw solutions
//!
//! Raw solutions that describe the same physical arrangement are collapsed to
//! one representative. The symmetry group combines three independent moves:
//!
//! - turning the whole grid (all quarter turns for square grids, only the half
//!   turn for rectangular ones), which also turns every tile;
//! - swapping tiles that are indistinguishable duplicates of each other;
//! - re-orienting a self-symmetric tile among orientations that look alike.
//!
//! Each solution is keyed by a canonical form: every cell is relabelled to its
//! duplicate group's representative with the orientation normalised modulo
//! that tile's rotational period, and the smallest such serialisation over all
//! grid rotations wins. Equal keys mean equal physical arrangements.

use ndarray::Axis;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::debug;

use crate::algorithm::collector::Solution;
use crate::spatial::grid::Placement;
use crate::spatial::tiles::{Orientation, TileSet};

/// Clockwise rotation of an entire solved grid by a number of quarter turns
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridRotation(u8);

impl GridRotation {
    /// No rotation
    pub const IDENTITY: Self = Self(0);
    /// Half turn, valid for every grid shape
    pub const HALF_TURN: Self = Self(2);

    /// Rotation by `turns` quarter turns, reduced modulo 4
    pub const fn quarter_turns(turns: u8) -> Self {
        Self(turns % 4)
    }

    /// Quarter turns in `0..4`
    pub const fn turns(self) -> u8 {
        self.0
    }

    /// Turn the grid, moving cell (r, c) of an R×C grid to (c, R−1−r) per
    /// quarter turn and turning every tile along with it
    pub fn apply(self, solution: &Solution) -> Solution {
        let mut cells = solution.cells().clone();
        for _ in 0..self.0 {
            let mut turned = cells.t();
            turned.invert_axis(Axis(1));
            cells = turned.mapv(|placement| {
                Placement::new(placement.tile, placement.orientation.rotated_by(1))
            });
        }
        Solution::from_cells(cells.as_standard_layout().into_owned())
    }
}

/// Grid rotations that map a grid onto itself
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymmetryGroup {
    rotations: Vec<GridRotation>,
}

impl SymmetryGroup {
    /// Rotations valid for an R×C grid
    ///
    /// Quarter turns swap the row and column counts, so a rectangular grid only
    /// admits the identity and the half turn.
    pub fn for_grid(rows: usize, cols: usize) -> Self {
        let rotations = if rows == cols {
            (0..4).map(GridRotation::quarter_turns).collect()
        } else {
            vec![GridRotation::IDENTITY, GridRotation::HALF_TURN]
        };
        Self { rotations }
    }

    /// Valid rotations, identity first
    pub fn rotations(&self) -> &[GridRotation] {
        &self.rotations
    }
}

/// Key shared by all raw solutions in one equivalence class
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalForm(Vec<Placement>);

impl CanonicalForm {
    /// Normalised placements, row-major
    pub fn placements(&self) -> &[Placement] {
        &self.0
    }
}

/// A distinct solution together with the number of raw solutions it stands for
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EquivalenceClass {
    /// First raw solution seen in this class
    pub representative: Solution,
    /// Raw solutions that fell into this class
    pub raw_members: usize,
}

// How a single tile relates to its duplicate group
#[derive(Clone, Copy, Debug)]
struct TileClass {
    representative: usize,
    // Quarter turns mapping this tile's orientations onto the representative's
    offset: u8,
    period: u8,
}

/// Canonicalises solutions of one tile set under its symmetry group
#[derive(Clone, Debug)]
pub struct SymmetryReducer {
    group: SymmetryGroup,
    classes: Vec<TileClass>,
    duplicate_groups: Vec<Vec<usize>>,
}

impl SymmetryReducer {
    /// Precompute duplicate groups and rotational periods for a tile set
    pub fn new(tiles: &TileSet) -> Self {
        let mut by_appearance: BTreeMap<_, Vec<usize>> = BTreeMap::new();
        for (index, tile) in tiles.tiles().iter().enumerate() {
            by_appearance
                .entry(tile.canonical_edges())
                .or_default()
                .push(index);
        }

        let mut classes: Vec<TileClass> = tiles
            .tiles()
            .iter()
            .enumerate()
            .map(|(index, tile)| TileClass {
                representative: index,
                offset: 0,
                period: tile.rotational_period(),
            })
            .collect();

        let mut duplicate_groups: Vec<Vec<usize>> = by_appearance
            .into_values()
            .filter(|members| members.len() > 1)
            .collect();
        duplicate_groups.sort();

        for members in &duplicate_groups {
            let Some((&representative, _)) = members.split_first() else {
                continue;
            };
            let Some(rep_tile) = tiles.tile(representative) else {
                continue;
            };
            for &member in members {
                let offset = tiles
                    .tile(member)
                    .and_then(|tile| tile.rotation_to(rep_tile))
                    .unwrap_or(0);
                if let Some(class) = classes.get_mut(member) {
                    class.representative = representative;
                    class.offset = offset;
                }
            }
        }

        let reducer = Self {
            group: SymmetryGroup::for_grid(tiles.rows(), tiles.cols()),
            classes,
            duplicate_groups,
        };
        debug!(
            rotations = reducer.group.rotations().len(),
            duplicate_groups = ?reducer.duplicate_groups,
            self_symmetric = ?reducer.self_symmetric_tiles(),
            "prepared symmetry reducer"
        );
        reducer
    }

    /// Rotations considered for this grid
    pub const fn group(&self) -> &SymmetryGroup {
        &self.group
    }

    /// Sets of two or more indistinguishable tiles, each sorted ascending
    pub fn duplicate_groups(&self) -> &[Vec<usize>] {
        &self.duplicate_groups
    }

    /// Tiles whose appearance repeats under a partial rotation
    pub fn self_symmetric_tiles(&self) -> Vec<usize> {
        self.classes
            .iter()
            .enumerate()
            .filter(|(_, class)| class.period < 4)
            .map(|(index, _)| index)
            .collect()
    }

    fn class(&self, tile: usize) -> TileClass {
        self.classes.get(tile).copied().unwrap_or(TileClass {
            representative: tile,
            offset: 0,
            period: 4,
        })
    }

    // Relabel to the duplicate representative and fold equivalent orientations
    fn normalize(&self, placement: Placement) -> Placement {
        let class = self.class(placement.tile);
        let turns = (placement.orientation.value() + class.offset) % class.period;
        Placement::new(class.representative, Orientation::new(turns))
    }

    /// Canonical key of a solution's equivalence class
    pub fn canonical_form(&self, solution: &Solution) -> CanonicalForm {
        self.group
            .rotations()
            .iter()
            .map(|rotation| {
                rotation
                    .apply(solution)
                    .placements()
                    .into_iter()
                    .map(|placement| self.normalize(placement))
                    .collect::<Vec<_>>()
            })
            .min()
            .map_or_else(|| CanonicalForm(Vec::new()), CanonicalForm)
    }

    /// Whether two solutions show the same physical arrangement
    pub fn equivalent(&self, first: &Solution, second: &Solution) -> bool {
        self.canonical_form(first) == self.canonical_form(second)
    }

    /// Group raw solutions into classes, in order of first appearance
    pub fn classify(&self, solutions: &[Solution]) -> Vec<EquivalenceClass> {
        let mut positions: BTreeMap<CanonicalForm, usize> = BTreeMap::new();
        let mut classes: Vec<EquivalenceClass> = Vec::new();

        for solution in solutions {
            let form = self.canonical_form(solution);
            if let Some(class) = positions
                .get(&form)
                .and_then(|&position| classes.get_mut(position))
            {
                class.raw_members += 1;
            } else {
                positions.insert(form, classes.len());
                classes.push(EquivalenceClass {
                    representative: solution.clone(),
                    raw_members: 1,
                });
            }
        }

        classes
    }

    /// One representative per equivalence class, in order of first appearance
    ///
    /// Idempotent: reducing the output again returns it unchanged.
    pub fn reduce(&self, solutions: &[Solution]) -> Vec<Solution> {
        let mut seen = HashSet::new();
        solutions
            .iter()
            .filter(|solution| seen.insert(self.canonical_form(solution)))
            .cloned()
            .collect()
    }

    /// Every concrete solution physically identical to `solution`
    ///
    /// Enumerates all valid grid rotations, all permutations inside each
    /// duplicate group and all look-alike orientations of self-symmetric tiles.
    /// The result is deduplicated, sorted, and includes `solution` itself.
    pub fn orbit(&self, solution: &Solution) -> Vec<Solution> {
        let mut members = BTreeSet::new();

        for rotation in self.group.rotations() {
            let rotated = rotation.apply(solution);
            let shape = (rotated.rows(), rotated.cols());

            let mut layouts = vec![rotated.placements()];
            for group in &self.duplicate_groups {
                layouts = layouts
                    .iter()
                    .flat_map(|layout| self.relabelings(layout, group))
                    .collect();
            }
            for layout in layouts {
                for variant in self.reorientations(&layout) {
                    members.insert((shape, variant));
                }
            }
        }

        members
            .into_iter()
            .filter_map(|((rows, cols), layout)| Solution::from_row_major(rows, cols, layout))
            .collect()
    }

    // All ways of permuting one duplicate group over the cells it occupies
    fn relabelings(&self, layout: &[Placement], group: &[usize]) -> Vec<Vec<Placement>> {
        let positions: Vec<usize> = layout
            .iter()
            .enumerate()
            .filter(|(_, placement)| group.contains(&placement.tile))
            .map(|(position, _)| position)
            .collect();

        permutations(group)
            .into_iter()
            .map(|order| {
                let mut next = layout.to_vec();
                for (&position, &tile) in positions.iter().zip(&order) {
                    if let Some(slot) = next.get_mut(position) {
                        let from = self.class(slot.tile).offset;
                        let to = self.class(tile).offset;
                        *slot = Placement::new(tile, slot.orientation.rotated_by(from + 4 - to));
                    }
                }
                next
            })
            .collect()
    }

    // All look-alike orientation choices for self-symmetric tiles
    fn reorientations(&self, layout: &[Placement]) -> Vec<Vec<Placement>> {
        let mut variants = vec![layout.to_vec()];
        for (position, placement) in layout.iter().enumerate() {
            let period = self.class(placement.tile).period;
            if period >= 4 {
                continue;
            }
            variants = variants
                .into_iter()
                .flat_map(|variant| {
                    (0..4 / period).map(move |step| {
                        let mut next = variant.clone();
                        if let Some(slot) = next.get_mut(position) {
                            slot.orientation = slot.orientation.rotated_by(step * period);
                        }
                        next
                    })
                })
                .collect();
        }
        variants
    }
}

fn permutations(items: &[usize]) -> Vec<Vec<usize>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut result = Vec::new();
    for (index, &first) in items.iter().enumerate() {
        let rest: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|&(other, _)| other != index)
            .map(|(_, &item)| item)
            .collect();
        for mut tail in permutations(&rest) {
            tail.insert(0, first);
            result.push(tail);
        }
    }
    result
}
