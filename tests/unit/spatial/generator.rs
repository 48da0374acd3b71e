//! Tests for seeded random puzzle generation

#[cfg(test)]
mod tests {
    use edgematch::SolverError;
    use edgematch::algorithm::search::find_all_solutions;
    use edgematch::spatial::generator::generate_puzzle;

    // Tests the same seed always produces the same tiles
    // Verified by seeding from entropy
    #[test]
    fn test_generation_is_deterministic() {
        let first = generate_puzzle(3, 4, 6, 42).expect("Failed to generate puzzle");
        let second = generate_puzzle(3, 4, 6, 42).expect("Failed to generate puzzle");
        let third = generate_puzzle(3, 4, 6, 43).expect("Failed to generate puzzle");

        assert_eq!(first.tiles(), second.tiles());
        assert_ne!(first.tiles(), third.tiles());
    }

    // Tests generated tiles fill the grid and use only the requested symbols
    // Verified by sizing the edge arrays one row short
    #[test]
    fn test_generation_shape_and_symbols() {
        let tiles = generate_puzzle(2, 5, 3, 7).expect("Failed to generate puzzle");

        assert_eq!((tiles.rows(), tiles.cols(), tiles.len()), (2, 5, 10));
        assert!(tiles.distinct_symbols().iter().all(|symbol| symbol.0 < 3));
        assert_eq!(tiles.symbol_name(tiles.distinct_symbols()[0]).chars().next(), Some('s'));
    }

    // Tests every generated puzzle has at least one valid solution
    // Verified by storing edges with the turn applied in the wrong direction
    #[test]
    fn test_generated_puzzles_are_solvable() {
        for seed in 0..5 {
            let tiles = generate_puzzle(2, 3, 6, seed).expect("Failed to generate puzzle");
            let solutions = find_all_solutions(&tiles).expect("Search failed");

            assert!(!solutions.is_empty(), "seed {seed} produced no solution");
            assert!(
                solutions
                    .solutions()
                    .iter()
                    .all(|solution| solution.satisfies_constraints(&tiles))
            );
        }
    }

    // Tests empty grids and empty symbol alphabets are rejected
    // Verified by removing the symbol count check
    #[test]
    fn test_generation_rejects_degenerate_parameters() {
        assert!(matches!(
            generate_puzzle(0, 3, 4, 1),
            Err(SolverError::InvalidParameter { parameter: "grid", .. })
        ));
        assert!(matches!(
            generate_puzzle(2, 2, 0, 1),
            Err(SolverError::InvalidParameter {
                parameter: "symbol_count",
                ..
            })
        ));
    }
}
