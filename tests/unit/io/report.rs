//! Tests for text summaries and JSON solve reports

#[cfg(test)]
mod tests {
    use edgematch::algorithm::collector::Solution;
    use edgematch::algorithm::search::{SearchStats, StopReason};
    use edgematch::algorithm::symmetry::EquivalenceClass;
    use edgematch::io::report::{
        SolveReport, format_layout, format_placements, format_solution, format_summary,
    };
    use edgematch::spatial::{Orientation, Placement, Symbol, Tile, TileSet};
    use std::time::Duration;

    fn pairing() -> (TileSet, Solution) {
        // Identities 7 and 3 are stored as indices 1 and 0
        let tiles = vec![
            Tile::new(7, &[Symbol(0), Symbol(1), Symbol(2), Symbol(3)]),
            Tile::new(3, &[Symbol(4), Symbol(0), Symbol(4), Symbol(1)]),
        ]
        .into_iter()
        .collect::<edgematch::Result<Vec<_>>>()
        .expect("Failed to build tile");
        let names = ["n", "e", "s", "w", "x"].map(String::from).to_vec();
        let tiles = TileSet::new(1, 2, tiles, names).expect("Failed to build tile set");
        let solution = Solution::from_row_major(
            1,
            2,
            vec![
                Placement::new(1, Orientation::IDENTITY),
                Placement::new(0, Orientation::new(2)),
            ],
        )
        .expect("Placement count should match grid");
        (tiles, solution)
    }

    fn stats(stop_reason: StopReason) -> SearchStats {
        SearchStats {
            nodes_visited: 12,
            raw_solutions: 2,
            elapsed: Duration::from_millis(5),
            stop_reason,
        }
    }

    // Tests placements print tile identities rather than internal indices
    // Verified by printing the index
    #[test]
    fn test_format_placements_uses_identities() {
        let (tiles, solution) = pairing();
        assert_eq!(format_placements(&solution, &tiles), "(7, 0) (3, 2)\n");
    }

    // Tests the layout shows named symbols around each tile identity
    // Verified by printing stored edges instead of shown edges
    #[test]
    fn test_format_layout_shows_turned_symbols() {
        let (tiles, solution) = pairing();
        let layout = format_layout(&solution, &tiles);
        let lines: Vec<&str> = layout.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines.first().is_some_and(|top| top.contains('x')));
        assert!(lines.get(1).is_some_and(|middle| middle.contains('7') && middle.contains('3')));
        assert!(lines.get(2).is_some_and(|bottom| bottom.contains('s')));
        assert!(format_solution(&solution, &tiles).starts_with("(7, 0) (3, 2)\n"));
    }

    // Tests the summary reports both counts and early stops
    // Verified by omitting the early stop note
    #[test]
    fn test_format_summary() {
        let (tiles, solution) = pairing();
        let classes = vec![EquivalenceClass {
            representative: solution,
            raw_members: 2,
        }];

        let complete = format_summary(&stats(StopReason::Exhausted), &classes, &tiles);
        assert!(complete.contains("Found 2 raw solutions"));
        assert!(complete.contains("Pruned to 1 distinct solution,"));
        assert!(complete.contains("covers 2 raw solutions"));
        assert!(!complete.contains("stopped early"));

        let limited = format_summary(&stats(StopReason::TimeLimit), &classes, &tiles);
        assert!(limited.contains("stopped early at the time limit"));
    }

    // Tests the JSON report lists identities and the stop reason
    // Verified by serialising tile indices
    #[test]
    fn test_solve_report_json() {
        let (tiles, solution) = pairing();
        let report = SolveReport::new("Pairs", &tiles, &stats(StopReason::SolutionLimit), &[solution]);

        assert_eq!(report.solutions, vec![vec![[7, 0], [3, 2]]]);
        assert_eq!(report.distinct_solutions, 1);

        let directory = tempfile::tempdir().expect("Failed to create temp dir");
        let path = directory.path().join("nested").join("report.json");
        report
            .write_json(&path)
            .expect("Failed to write report");

        let text = std::fs::read_to_string(&path).expect("Failed to read report");
        let value: serde_json::Value =
            serde_json::from_str(&text).expect("Failed to parse report");
        assert_eq!(value["name"], "Pairs");
        assert_eq!(value["stop_reason"], "solution_limit");
        assert_eq!(value["grid_size"], serde_json::json!([1, 2]));
        assert_eq!(value["raw_solutions"], 2);
    }
}
