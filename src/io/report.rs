//! Text and JSON reporting of solutions

use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

use crate::algorithm::collector::Solution;
use crate::algorithm::search::{SearchStats, StopReason};
use crate::algorithm::symmetry::EquivalenceClass;
use crate::io::error::{Result, SolverError};
use crate::spatial::tiles::{Side, TileSet};

/// One line per grid row listing `(tile id, orientation)` for each cell
pub fn format_placements(solution: &Solution, tiles: &TileSet) -> String {
    let mut text = String::new();
    for row in 0..solution.rows() {
        let cells: Vec<String> = (0..solution.cols())
            .filter_map(|col| solution.get((row, col)))
            .map(|placement| {
                let id = tiles.tile(placement.tile).map_or(placement.tile, |tile| tile.id());
                format!("({id}, {})", placement.orientation)
            })
            .collect();
        let _ = writeln!(text, "{}", cells.join(" "));
    }
    text
}

/// Symbol layout of a solution, three text lines per grid row
///
/// Each cell shows its top symbol, then left symbol, tile id and right
/// symbol, then its bottom symbol.
pub fn format_layout(solution: &Solution, tiles: &TileSet) -> String {
    let shown = |row: usize, col: usize, side: Side| -> String {
        solution
            .get((row, col))
            .and_then(|placement| {
                tiles
                    .tile(placement.tile)
                    .map(|tile| tiles.symbol_name(tile.edge(side, placement.orientation)))
            })
            .unwrap_or_default()
    };
    let id_of = |row: usize, col: usize| -> String {
        solution
            .get((row, col))
            .and_then(|placement| tiles.tile(placement.tile))
            .map(|tile| tile.id().to_string())
            .unwrap_or_default()
    };

    let width = tiles
        .distinct_symbols()
        .into_iter()
        .map(|symbol| tiles.symbol_name(symbol).chars().count())
        .max()
        .unwrap_or(1)
        .max(2);

    let mut text = String::new();
    for row in 0..solution.rows() {
        let mut top = String::new();
        let mut middle = String::new();
        let mut bottom = String::new();
        for col in 0..solution.cols() {
            let _ = write!(top, "|{:^w$}|", shown(row, col, Side::Top), w = 3 * width + 2);
            let _ = write!(
                middle,
                "|{:<width$} {:^width$} {:>width$}|",
                shown(row, col, Side::Left),
                id_of(row, col),
                shown(row, col, Side::Right),
            );
            let _ = write!(bottom, "|{:^w$}|", shown(row, col, Side::Bottom), w = 3 * width + 2);
        }
        let _ = writeln!(text, "{top}");
        let _ = writeln!(text, "{middle}");
        let _ = writeln!(text, "{bottom}");
    }
    text
}

/// Placement listing followed by the symbol layout
pub fn format_solution(solution: &Solution, tiles: &TileSet) -> String {
    let mut text = format_placements(solution, tiles);
    text.push_str(&format_layout(solution, tiles));
    text
}

/// Human-readable summary of a full solve
pub fn format_summary(
    stats: &SearchStats,
    classes: &[EquivalenceClass],
    tiles: &TileSet,
) -> String {
    let mut text = String::new();
    let _ = writeln!(
        text,
        "Found {} raw solution{} in {:.2?} ({} placements tried).",
        stats.raw_solutions,
        if stats.raw_solutions == 1 { "" } else { "s" },
        stats.elapsed,
        stats.nodes_visited
    );
    match stats.stop_reason {
        StopReason::Exhausted => {}
        StopReason::SolutionLimit => {
            let _ = writeln!(text, "Search stopped early at the solution limit.");
        }
        StopReason::TimeLimit => {
            let _ = writeln!(text, "Search stopped early at the time limit.");
        }
    }
    let _ = writeln!(
        text,
        "Pruned to {} distinct solution{}, given row-wise from top left (tile id, orientation).",
        classes.len(),
        if classes.len() == 1 { "" } else { "s" }
    );

    for (number, class) in classes.iter().enumerate() {
        let _ = writeln!(
            text,
            "\nSolution {} (covers {} raw solution{}):",
            number + 1,
            class.raw_members,
            if class.raw_members == 1 { "" } else { "s" }
        );
        text.push_str(&format_solution(&class.representative, tiles));
    }
    text
}

/// Serialisable record of a solve
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SolveReport {
    /// Puzzle name
    pub name: String,
    /// Grid shape as `[rows, cols]`
    pub grid_size: [usize; 2],
    /// Raw solutions found by the search
    pub raw_solutions: usize,
    /// Solutions left after symmetry reduction
    pub distinct_solutions: usize,
    /// Tiles placed during the search
    pub nodes_visited: u64,
    /// Search duration in milliseconds
    pub elapsed_ms: u128,
    /// Why the search ended
    pub stop_reason: StopReason,
    /// Distinct solutions, each row-major `[tile id, orientation]` pairs
    pub solutions: Vec<Vec<[usize; 2]>>,
}

impl SolveReport {
    /// Assemble a report from search statistics and distinct solutions
    pub fn new(name: &str, tiles: &TileSet, stats: &SearchStats, distinct: &[Solution]) -> Self {
        let solutions = distinct
            .iter()
            .map(|solution| {
                solution
                    .placements()
                    .into_iter()
                    .map(|placement| {
                        let id = tiles.tile(placement.tile).map_or(placement.tile, |tile| tile.id());
                        [id, usize::from(placement.orientation.value())]
                    })
                    .collect()
            })
            .collect();

        Self {
            name: name.to_string(),
            grid_size: [tiles.rows(), tiles.cols()],
            raw_solutions: stats.raw_solutions,
            distinct_solutions: distinct.len(),
            nodes_visited: stats.nodes_visited,
            elapsed_ms: stats.elapsed.as_millis(),
            stop_reason: stats.stop_reason,
            solutions,
        }
    }

    /// Write the report as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the file
    /// cannot be written
    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| SolverError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| SolverError::FileSystem {
            path: path.to_path_buf(),
            operation: "serialize report",
            source: source.into(),
        })?;
        std::fs::write(path, json).map_err(|source| SolverError::FileSystem {
            path: path.to_path_buf(),
            operation: "write report",
            source,
        })
    }
}
