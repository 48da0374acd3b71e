//! Tests for command-line parsing and the solve pipeline

#[cfg(test)]
mod tests {
    use clap::Parser;
    use edgematch::algorithm::search::CellOrder;
    use edgematch::io::cli::{Cli, OrderArg, PuzzleRunner};
    use edgematch::io::configuration::{DEFAULT_THREADS, DEFAULT_TILE_SET_FILE};
    use std::path::{Path, PathBuf};
    use std::time::Duration;
    use tracing::Level;

    // Edges clockwise from the top; the pair only joins through "x"
    const PAIRING: &str = r#"{
        "name": "Pair",
        "cards": [["a1", "x", "a3", "a4"], ["b1", "b2", "b3", "x"]]
    }"#;

    fn write_puzzle(directory: &Path) -> PathBuf {
        let path = directory.join("pair.json");
        std::fs::write(&path, PAIRING).expect("Failed to write puzzle");
        path
    }

    // Tests CLI parsing with no arguments uses the defaults
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["edgematch"]);

        assert_eq!(cli.target_path(), PathBuf::from(DEFAULT_TILE_SET_FILE));
        assert_eq!(cli.threads, DEFAULT_THREADS);
        assert_eq!(cli.order, OrderArg::Row);
        assert_eq!(cli.grid_override(), None);
        assert!(cli.should_show_progress());
        assert_eq!(cli.log_level(), Level::WARN);
    }

    // Tests CLI parsing with all search and output arguments
    // Verified by modifying custom parsers to ensure they're invoked
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "edgematch",
            "puzzle.json",
            "--rows",
            "2",
            "--cols",
            "3",
            "--order",
            "column",
            "--threads",
            "4",
            "--max-solutions",
            "10",
            "--time-limit",
            "1.5",
            "--render",
            "--json",
            "out.json",
            "--quiet",
            "-vv",
        ]);

        assert_eq!(cli.target_path(), PathBuf::from("puzzle.json"));
        assert_eq!(cli.grid_override(), Some([2, 3]));
        assert_eq!(cli.log_level(), Level::DEBUG);
        assert!(cli.render);
        assert!(!cli.should_show_progress());

        let config = cli.search_config();
        assert_eq!(config.order, CellOrder::ColumnMajor);
        assert_eq!(config.threads, 4);
        assert_eq!(config.limits.max_solutions, Some(10));
        assert_eq!(config.limits.time_limit, Some(Duration::from_millis(1500)));
    }

    // Tests invalid thread counts and lone grid dimensions are rejected
    // Verified by accepting zero threads
    #[test]
    fn test_cli_rejects_invalid_args() {
        assert!(Cli::try_parse_from(["edgematch", "--threads", "0"]).is_err());
        assert!(Cli::try_parse_from(["edgematch", "--rows", "2"]).is_err());
        assert!(Cli::try_parse_from(["edgematch", "--time-limit", "-1"]).is_err());
    }

    // Tests image arguments build the tile image source
    // Verified by ignoring the image prefix argument
    #[test]
    fn test_image_source_from_args() {
        let cli = Cli::parse_from([
            "edgematch",
            "--images",
            "art",
            "--image-prefix",
            "card",
            "--image-extension",
            "png",
        ]);

        assert_eq!(cli.image_source().path_for(4), Path::new("art").join("card04.png"));
    }

    // Tests the runner loads, searches and reduces a description
    // Verified by skipping the symmetry reduction
    #[test]
    fn test_runner_solves_pairing() {
        let directory = tempfile::tempdir().expect("Failed to create temp dir");
        let path = write_puzzle(directory.path());
        let cli = Cli::parse_from(["edgematch", &*path.to_string_lossy(), "--quiet"]);

        let run = PuzzleRunner::new(cli)
            .solve()
            .expect("Solve failed");

        assert_eq!(run.description.display_name(), "Pair");
        assert_eq!(run.stats.raw_solutions, 2);
        assert_eq!(run.classes.len(), 1);
        assert_eq!(run.classes.first().map(|class| class.raw_members), Some(2));
    }

    // Tests a full run writes rendered images and the JSON report
    // Verified by numbering rendered images from zero
    #[test]
    fn test_runner_writes_outputs() {
        let directory = tempfile::tempdir().expect("Failed to create temp dir");
        let path = write_puzzle(directory.path());
        let output = directory.path().join("rendered");
        let json = directory.path().join("report.json");
        let images = directory.path().join("images");

        let cli = Cli::parse_from([
            "edgematch",
            &*path.to_string_lossy(),
            "--quiet",
            "--render",
            "--images",
            &*images.to_string_lossy(),
            "--output",
            &*output.to_string_lossy(),
            "--json",
            &*json.to_string_lossy(),
        ]);
        let runner = PuzzleRunner::new(cli);
        assert!(runner.run().is_ok());

        assert!(output.join("pair_solution_01.png").exists());
        let report = std::fs::read_to_string(&json).expect("Failed to read report");
        assert!(report.contains("\"distinct_solutions\": 1"));
    }

    // Tests a missing description file is reported as an error
    // Verified by falling back to an empty tile set
    #[test]
    fn test_runner_missing_file() {
        let cli = Cli::parse_from(["edgematch", "/nonexistent/cards.json", "--quiet"]);
        assert!(PuzzleRunner::new(cli).solve().is_err());
    }
}
