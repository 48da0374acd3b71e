//! Command-line interface for solving a tile-set description

use crate::algorithm::search::{
    CellOrder, PlacementSearch, SearchConfig, SearchLimits, SearchStats,
};
use crate::algorithm::symmetry::{EquivalenceClass, SymmetryReducer};
use crate::io::configuration::{
    DEFAULT_IMAGE_DIR, DEFAULT_IMAGE_EXTENSION, DEFAULT_IMAGE_PREFIX, DEFAULT_OUTPUT_DIR,
    DEFAULT_THREADS, DEFAULT_TILE_SET_FILE, IMAGE_INDEX_WIDTH, SOLUTION_IMAGE_SUFFIX,
    TILE_IMAGE_SIZE,
};
use crate::io::error::Result;
use crate::io::image::{TileImageSource, render_solution};
use crate::io::progress::SearchProgress;
use crate::io::report::{SolveReport, format_summary};
use crate::io::tileset::TileSetDescription;
use crate::spatial::tiles::TileSet;
use clap::{ArgAction, Parser, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{Level, info};

/// Cell visiting order as named on the command line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    /// Fill rows left to right, top row first
    #[default]
    Row,
    /// Fill columns top to bottom, left column first
    Column,
}

impl From<OrderArg> for CellOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Row => Self::RowMajor,
            OrderArg::Column => Self::ColumnMajor,
        }
    }
}

fn parse_thread_count(value: &str) -> std::result::Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("at least one thread is required".to_string()),
        Ok(count) => Ok(count),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_seconds(value: &str) -> std::result::Result<Duration, String> {
    let seconds: f64 = value.parse().map_err(|e: std::num::ParseFloatError| e.to_string())?;
    Duration::try_from_secs_f64(seconds).map_err(|e| e.to_string())
}

#[derive(Parser, Debug)]
#[command(name = "edgematch")]
#[command(
    author,
    version,
    about = "Find every solution of an edge-matching tile puzzle"
)]
/// Command-line arguments for the solver
// Output toggles are independent switches
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Tile-set description (JSON); defaults to card_list.json
    #[arg(value_name = "TILE_SET")]
    pub target: Option<PathBuf>,

    /// Grid rows, overriding the description
    #[arg(long, requires = "cols")]
    pub rows: Option<usize>,

    /// Grid columns, overriding the description
    #[arg(long, requires = "rows")]
    pub cols: Option<usize>,

    /// Order in which cells are filled
    #[arg(long, value_enum, default_value_t = OrderArg::Row)]
    pub order: OrderArg,

    /// Worker threads for the search
    #[arg(short, long, default_value_t = DEFAULT_THREADS, value_parser = parse_thread_count)]
    pub threads: usize,

    /// Stop after this many raw solutions
    #[arg(long)]
    pub max_solutions: Option<usize>,

    /// Stop after this many seconds
    #[arg(long, value_name = "SECS", value_parser = parse_seconds)]
    pub time_limit: Option<Duration>,

    /// Render each distinct solution from tile artwork
    #[arg(long)]
    pub render: bool,

    /// Directory holding tile images
    #[arg(long, default_value = DEFAULT_IMAGE_DIR)]
    pub images: PathBuf,

    /// Tile image file name prefix
    #[arg(long, default_value = DEFAULT_IMAGE_PREFIX)]
    pub image_prefix: String,

    /// Tile image file extension
    #[arg(long, default_value = DEFAULT_IMAGE_EXTENSION)]
    pub image_extension: String,

    /// Directory for rendered solutions
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Also write a JSON report to this path
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log detail (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Tile-set description to load
    pub fn target_path(&self) -> PathBuf {
        self.target
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TILE_SET_FILE))
    }

    /// Grid shape given on the command line, if any
    pub const fn grid_override(&self) -> Option<[usize; 2]> {
        match (self.rows, self.cols) {
            (Some(rows), Some(cols)) => Some([rows, cols]),
            _ => None,
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Most detailed log level to emit
    pub const fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    /// Search parameters from the command line
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            order: self.order.into(),
            limits: SearchLimits {
                max_solutions: self.max_solutions,
                time_limit: self.time_limit,
            },
            threads: self.threads,
        }
    }

    /// Tile artwork location from the command line
    pub fn image_source(&self) -> TileImageSource {
        TileImageSource {
            directory: self.images.clone(),
            prefix: self.image_prefix.clone(),
            extension: self.image_extension.clone(),
            index_width: IMAGE_INDEX_WIDTH,
            tile_size: TILE_IMAGE_SIZE,
        }
    }
}

/// Everything produced by one solve, before any output is written
#[derive(Debug)]
pub struct SolveRun {
    /// Description that was loaded
    pub description: TileSetDescription,
    /// Validated tile set
    pub tiles: TileSet,
    /// Search statistics
    pub stats: SearchStats,
    /// Distinct solutions with the raw solutions each stands for
    pub classes: Vec<EquivalenceClass>,
}

/// Loads a tile set, solves it and writes the requested outputs
pub struct PuzzleRunner {
    cli: Cli,
}

impl PuzzleRunner {
    /// Create a runner for the given arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Arguments in use
    pub const fn cli(&self) -> &Cli {
        &self.cli
    }

    /// Load, search and reduce without writing any output
    ///
    /// # Errors
    ///
    /// Returns an error if the description cannot be read or is invalid, or
    /// if the search fails
    pub fn solve(&self) -> Result<SolveRun> {
        let path = self.cli.target_path();
        let description = TileSetDescription::from_file(&path)?;
        let tiles = description.build_tile_set(self.cli.grid_override())?;

        let progress = if self.cli.should_show_progress() {
            SearchProgress::new()
        } else {
            SearchProgress::hidden()
        };
        let outcome = PlacementSearch::new(&tiles, self.cli.search_config()).run(&progress)?;

        let reducer = SymmetryReducer::new(&tiles);
        let classes = reducer.classify(outcome.solutions.solutions());
        info!(
            raw = outcome.stats.raw_solutions,
            distinct = classes.len(),
            "reduced solutions"
        );

        let stats = outcome.stats;
        Ok(SolveRun {
            description,
            tiles,
            stats,
            classes,
        })
    }

    /// Solve and write the report, images and JSON as requested
    ///
    /// # Errors
    ///
    /// Returns an error if solving fails or any output cannot be written
    pub fn run(&self) -> Result<()> {
        let run = self.solve()?;

        let mut stdout = std::io::stdout().lock();
        writeln!(
            stdout,
            "{} ({}), {}x{} grid, {} tiles",
            run.description.display_name(),
            run.description.display_manufacturer(),
            run.tiles.rows(),
            run.tiles.cols(),
            run.tiles.len()
        )?;
        write!(stdout, "{}", format_summary(&run.stats, &run.classes, &run.tiles))?;
        stdout.flush()?;

        if self.cli.render {
            self.render(&run)?;
        }

        if let Some(json_path) = &self.cli.json {
            let distinct: Vec<_> = run
                .classes
                .iter()
                .map(|class| class.representative.clone())
                .collect();
            SolveReport::new(
                run.description.display_name(),
                &run.tiles,
                &run.stats,
                &distinct,
            )
            .write_json(json_path)?;
            info!(path = %json_path.display(), "wrote JSON report");
        }

        Ok(())
    }

    /// Render every distinct solution into the output directory
    ///
    /// # Errors
    ///
    /// Returns an error if any image cannot be written
    pub fn render(&self, run: &SolveRun) -> Result<Vec<PathBuf>> {
        let source = self.cli.image_source();
        let stem = Self::output_stem(&self.cli.target_path());

        run.classes
            .iter()
            .enumerate()
            .map(|(index, class)| {
                let path = self
                    .cli
                    .output
                    .join(format!("{stem}{SOLUTION_IMAGE_SUFFIX}_{:02}.png", index + 1));
                render_solution(&class.representative, &run.tiles, &source, &path)?;
                info!(path = %path.display(), "rendered solution");
                Ok(path)
            })
            .collect()
    }

    fn output_stem(target: &Path) -> String {
        target
            .file_stem()
            .map_or_else(|| "puzzle".to_string(), |stem| stem.to_string_lossy().into_owned())
    }
}
