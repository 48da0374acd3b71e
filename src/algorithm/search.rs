//! Exhaustive depth-first placement search
//!
//! Cells are visited in a fixed order; at each cell every unused tile is tried
//! in ascending index order and, for each, every orientation from 0 to 3.
//! A candidate only has to agree with neighbours that are already placed, so
//! pruning happens as soon as a touching edge mismatches. Every return path
//! un-places what it placed, leaving the board empty when the search ends.
//!
//! The first cell's candidates split the search into independent branches.
//! With more than one thread, branches run on a rayon pool where each worker
//! owns a private board, and results are collected back in branch order.

use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::algorithm::collector::SolutionCollector;
use crate::io::configuration::DEFAULT_THREADS;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::grid::{Board, Cell};
use crate::spatial::tiles::{Orientation, TileSet};

// Deadline checks read the clock only once per this many polls
const CLOCK_POLL_INTERVAL: u32 = 4096;

/// Order in which the search fills grid cells
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellOrder {
    /// Row 0 left to right, then row 1, and so on
    #[default]
    RowMajor,
    /// Column 0 top to bottom, then column 1, and so on
    ColumnMajor,
}

impl CellOrder {
    /// Every cell of a `rows` × `cols` grid in visiting order
    pub fn cells(self, rows: usize, cols: usize) -> Vec<Cell> {
        match self {
            Self::RowMajor => (0..rows)
                .flat_map(|row| (0..cols).map(move |col| (row, col)))
                .collect(),
            Self::ColumnMajor => (0..cols)
                .flat_map(|col| (0..rows).map(move |row| (row, col)))
                .collect(),
        }
    }
}

/// Caller-imposed budget, checked between candidate placements
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Stop once this many raw solutions have been recorded
    pub max_solutions: Option<usize>,
    /// Stop once this much wall-clock time has elapsed
    pub time_limit: Option<Duration>,
}

/// Parameters for one search run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Cell visiting order
    pub order: CellOrder,
    /// Optional budget
    pub limits: SearchLimits,
    /// Worker threads; values above one fan out over first-cell candidates
    pub threads: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            order: CellOrder::default(),
            limits: SearchLimits::default(),
            threads: DEFAULT_THREADS,
        }
    }
}

/// Why a search stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Every branch was explored
    Exhausted,
    /// The solution budget was reached
    SolutionLimit,
    /// The time budget ran out
    TimeLimit,
}

impl StopReason {
    const fn from_code(code: u8) -> Option<Self> {
        match code {
            STOP_NONE => Some(Self::Exhausted),
            STOP_SOLUTIONS => Some(Self::SolutionLimit),
            STOP_TIME => Some(Self::TimeLimit),
            _ => None,
        }
    }

    /// Whether the search explored its whole space
    pub const fn is_exhaustive(self) -> bool {
        matches!(self, Self::Exhausted)
    }
}

/// Counters describing a finished search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchStats {
    /// Tiles placed over the whole search, including those later backtracked
    pub nodes_visited: u64,
    /// Raw solutions recorded
    pub raw_solutions: usize,
    /// Wall-clock duration of the search
    pub elapsed: Duration,
    /// Why the search ended
    pub stop_reason: StopReason,
}

/// Raw solutions and statistics from one search run
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// Every raw solution in discovery order
    pub solutions: SolutionCollector,
    /// Run statistics
    pub stats: SearchStats,
}

/// Observer notified as the search advances
///
/// Branches are the first cell's candidate placements. Callbacks may arrive
/// from several worker threads at once.
pub trait SearchMonitor: Sync {
    /// Called once before any branch starts
    fn search_started(&self, _total_branches: usize) {}

    /// Called after each branch completes, with the raw solutions found so far
    fn branch_finished(&self, _raw_solutions: usize) {}

    /// Called once after all workers have stopped
    fn search_finished(&self, _stats: &SearchStats) {}
}

impl SearchMonitor for () {}

const STOP_NONE: u8 = 0;
const STOP_SOLUTIONS: u8 = 1;
const STOP_TIME: u8 = 2;

/// Budget shared by every worker of one run
struct Budget {
    limits: SearchLimits,
    started: Instant,
    found: AtomicUsize,
    stop: AtomicU8,
}

impl Budget {
    fn new(limits: SearchLimits) -> Self {
        Self {
            limits,
            started: Instant::now(),
            found: AtomicUsize::new(0),
            stop: AtomicU8::new(STOP_NONE),
        }
    }

    fn found(&self) -> usize {
        self.found.load(Ordering::Relaxed)
    }

    fn stop_code(&self) -> u8 {
        self.stop.load(Ordering::Relaxed)
    }

    fn halt(&self, code: u8) {
        let _ = self
            .stop
            .compare_exchange(STOP_NONE, code, Ordering::Relaxed, Ordering::Relaxed);
    }

    fn is_halted(&self) -> bool {
        self.stop_code() != STOP_NONE
    }

    /// Whether pending work must be skipped
    ///
    /// Only call this right before work that a `true` answer skips: it
    /// records the reason, so a budget that runs out exactly as the search
    /// finishes still reports an exhaustive run.
    fn should_stop(&self, check_clock: bool) -> bool {
        if self.is_halted() {
            return true;
        }
        if self
            .limits
            .max_solutions
            .is_some_and(|max| self.found() >= max)
        {
            self.halt(STOP_SOLUTIONS);
            return true;
        }
        if check_clock
            && self
                .limits
                .time_limit
                .is_some_and(|limit| self.started.elapsed() >= limit)
        {
            self.halt(STOP_TIME);
            return true;
        }
        false
    }

    /// Reserve a slot for one more solution; false once the budget is spent
    fn claim_solution(&self) -> bool {
        let Some(max) = self.limits.max_solutions else {
            self.found.fetch_add(1, Ordering::Relaxed);
            return true;
        };
        let previous = self.found.fetch_add(1, Ordering::Relaxed);
        if previous < max {
            true
        } else {
            self.found.fetch_sub(1, Ordering::Relaxed);
            self.halt(STOP_SOLUTIONS);
            false
        }
    }
}

/// One depth-first explorer owning a private board
struct Worker<'s, 't> {
    order: &'s [Cell],
    budget: &'s Budget,
    board: Board<'t>,
    collector: SolutionCollector,
    nodes: u64,
    polls: u32,
}

impl<'s, 't> Worker<'s, 't> {
    fn new(tiles: &'t TileSet, order: &'s [Cell], budget: &'s Budget) -> Self {
        Self {
            order,
            budget,
            board: Board::new(tiles),
            collector: SolutionCollector::new(),
            nodes: 0,
            polls: 0,
        }
    }

    fn stopped(&mut self) -> bool {
        self.polls = self.polls.wrapping_add(1);
        self.budget
            .should_stop(self.polls % CLOCK_POLL_INTERVAL == 0)
    }

    /// Explore the subtree rooted at one first-cell candidate
    ///
    /// Returns the branch's solutions and the tiles it placed.
    fn explore_branch(&mut self, branch: Branch) -> Result<(SolutionCollector, u64)> {
        if let Some(&first) = self.order.first() {
            if !self.budget.should_stop(true) {
                self.board.place(first, branch.tile, branch.orientation)?;
                self.nodes += 1;
                let result = self.descend(1);
                self.board.remove(first);
                result?;
            }
        }
        Ok((
            std::mem::take(&mut self.collector),
            std::mem::take(&mut self.nodes),
        ))
    }

    fn descend(&mut self, depth: usize) -> Result<()> {
        let Some(&cell) = self.order.get(depth) else {
            if let Some(solution) = self.board.snapshot() {
                if self.budget.claim_solution() {
                    self.collector.record(solution);
                }
            }
            return Ok(());
        };

        let tiles = self.board.tile_set();
        for (index, tile) in tiles.tiles().iter().enumerate() {
            if self.board.is_in_use(index) {
                continue;
            }
            for orientation in Orientation::ALL {
                if !self.board.accepts(cell, tile, orientation) {
                    continue;
                }
                if self.stopped() {
                    return Ok(());
                }
                self.board.place(cell, index, orientation)?;
                self.nodes += 1;
                let result = self.descend(depth + 1);
                self.board.remove(cell);
                result?;
            }
        }
        Ok(())
    }
}

/// First-cell candidate rooting an independent subtree
#[derive(Clone, Copy, Debug)]
struct Branch {
    tile: usize,
    orientation: Orientation,
}

/// Exhaustive backtracking search over one tile set
pub struct PlacementSearch<'t> {
    tiles: &'t TileSet,
    config: SearchConfig,
}

impl<'t> PlacementSearch<'t> {
    /// Prepare a search; no work happens until [`PlacementSearch::run`]
    pub const fn new(tiles: &'t TileSet, config: SearchConfig) -> Self {
        Self { tiles, config }
    }

    /// Search configuration in use
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn branches(&self) -> Vec<Branch> {
        (0..self.tiles.len())
            .flat_map(|tile| {
                Orientation::ALL
                    .into_iter()
                    .map(move |orientation| Branch { tile, orientation })
            })
            .collect()
    }

    /// Enumerate every complete assignment, in deterministic order
    ///
    /// With a single thread, or when no limit cuts the run short, the returned
    /// solutions are in exactly the order a plain recursive search finds them.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker pool cannot be started, or if the board
    /// rejects a placement the search believed legal, which indicates a broken
    /// board invariant
    pub fn run(&self, monitor: &dyn SearchMonitor) -> Result<SearchOutcome> {
        let order = self.config.order.cells(self.tiles.rows(), self.tiles.cols());
        let branches = self.branches();
        let budget = Budget::new(self.config.limits);
        let threads = self.config.threads.clamp(1, branches.len().max(1));

        debug!(
            rows = self.tiles.rows(),
            cols = self.tiles.cols(),
            branches = branches.len(),
            threads,
            "starting placement search"
        );
        monitor.search_started(branches.len());

        let (solutions, nodes_visited) = if threads == 1 {
            self.run_sequential(&order, &branches, &budget, monitor)?
        } else {
            self.run_parallel(&order, &branches, &budget, monitor, threads)?
        };

        let code = budget.stop_code();
        let stop_reason = StopReason::from_code(code)
            .ok_or_else(|| invalid_parameter("stop_code", &code, &"unknown stop code"))?;
        let stats = SearchStats {
            nodes_visited,
            raw_solutions: solutions.len(),
            elapsed: budget.started.elapsed(),
            stop_reason,
        };
        debug!(
            nodes = stats.nodes_visited,
            raw = stats.raw_solutions,
            elapsed_ms = stats.elapsed.as_millis(),
            "placement search finished"
        );
        monitor.search_finished(&stats);

        Ok(SearchOutcome { solutions, stats })
    }

    fn run_sequential(
        &self,
        order: &[Cell],
        branches: &[Branch],
        budget: &Budget,
        monitor: &dyn SearchMonitor,
    ) -> Result<(SolutionCollector, u64)> {
        let mut worker = Worker::new(self.tiles, order, budget);
        let mut solutions = SolutionCollector::new();
        let mut nodes_visited = 0;
        for &branch in branches {
            let (found, nodes) = worker.explore_branch(branch)?;
            solutions.extend(found);
            nodes_visited += nodes;
            monitor.branch_finished(budget.found());
            if budget.is_halted() {
                break;
            }
        }
        Ok((solutions, nodes_visited))
    }

    fn run_parallel(
        &self,
        order: &[Cell],
        branches: &[Branch],
        budget: &Budget,
        monitor: &dyn SearchMonitor,
        threads: usize,
    ) -> Result<(SolutionCollector, u64)> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| invalid_parameter("threads", &threads, &e))?;
        let tiles = self.tiles;

        let per_branch = pool.install(|| {
            branches
                .par_iter()
                .map_init(
                    || Worker::new(tiles, order, budget),
                    |worker, &branch| {
                        let result = worker.explore_branch(branch);
                        monitor.branch_finished(budget.found());
                        result
                    },
                )
                .collect::<Result<Vec<_>>>()
        })?;

        let mut solutions = SolutionCollector::new();
        let mut nodes_visited = 0;
        for (found, nodes) in per_branch {
            solutions.extend(found);
            nodes_visited += nodes;
        }
        Ok((solutions, nodes_visited))
    }
}

/// Run an exhaustive single-threaded row-major search with no monitor
///
/// # Errors
///
/// Propagates errors from [`PlacementSearch::run`]
pub fn find_all_solutions(tiles: &TileSet) -> Result<SolutionCollector> {
    PlacementSearch::new(tiles, SearchConfig::default())
        .run(&())
        .map(|outcome| outcome.solutions)
}
