//! CLI entry point for the edge-matching puzzle solver

use clap::Parser;
use edgematch::io::cli::{Cli, PuzzleRunner};

fn main() -> edgematch::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_target(false)
        .with_ansi(!cli.quiet)
        .with_writer(std::io::stderr)
        .init();

    PuzzleRunner::new(cli).run()
}
