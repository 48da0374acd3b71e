//! Tests for loading and validating JSON tile-set descriptions

#[cfg(test)]
mod tests {
    use edgematch::io::tileset::{TileSetDescription, estimate_grid_size};
    use edgematch::spatial::{Orientation, Side, Symbol};
    use std::io::Write;

    const PUZZLE: &str = r#"{
        "name": "Garden",
        "manufacturer": "Acme",
        "grid_size": [1, 2],
        "symbols": ["leaf", "bee", "rose", "moth"],
        "cards": [
            ["leaf", "bee", "rose", "moth"],
            ["rose", "moth", "leaf", "bee"]
        ]
    }"#;

    fn parse(json: &str) -> TileSetDescription {
        TileSetDescription::from_json_str(json).expect("Failed to parse description")
    }

    // Tests perfect squares give square grids and anything else a single row
    // Verified by rounding the square root up
    #[test]
    fn test_estimate_grid_size() {
        assert_eq!(estimate_grid_size(9), [3, 3]);
        assert_eq!(estimate_grid_size(1), [1, 1]);
        assert_eq!(estimate_grid_size(6), [1, 6]);
    }

    // Tests symbols are interned by their position in the explicit list
    // Verified by interning in sorted order instead of list order
    #[test]
    fn test_build_interns_explicit_symbols() {
        let description = parse(PUZZLE);
        let tiles = description
            .build_tile_set(None)
            .expect("Failed to build tile set");

        assert_eq!((tiles.rows(), tiles.cols()), (1, 2));
        let Some(second) = tiles.tile(1) else {
            panic!("missing tile");
        };
        assert_eq!(second.id(), 1);
        assert_eq!(second.edge(Side::Top, Orientation::IDENTITY), Symbol(2));
        assert_eq!(tiles.symbol_name(Symbol(3)), "moth");
        assert_eq!(description.display_name(), "Garden");
        assert_eq!(description.display_manufacturer(), "Acme");
    }

    // Tests missing optional fields fall back to defaults and inferred values
    // Verified by leaving inferred symbols unsorted
    #[test]
    fn test_defaults_for_missing_fields() {
        let description = parse(r#"{ "cards": [["b", "a", "c", "a"]] }"#);

        assert_eq!(description.display_name(), "Unnamed");
        assert_eq!(description.display_manufacturer(), "Unknown");
        assert_eq!(description.resolved_grid_size(), [1, 1]);
        assert_eq!(description.resolved_symbols(), vec!["a", "b", "c"]);
    }

    // Tests a grid override replaces the described shape
    // Verified by ignoring the override
    #[test]
    fn test_grid_override() {
        let description = parse(PUZZLE);
        let tiles = description
            .build_tile_set(Some([2, 1]))
            .expect("Failed to build tile set");
        assert_eq!((tiles.rows(), tiles.cols()), (2, 1));

        let mismatch = description.build_tile_set(Some([2, 2]));
        assert!(mismatch.is_err_and(|error| error.is_configuration()));
    }

    // Tests malformed cards are configuration errors
    // Verified by truncating long cards to four symbols
    #[test]
    fn test_malformed_cards_rejected() {
        let short = parse(r#"{ "cards": [["a", "b", "c"]] }"#);
        assert!(short.build_tile_set(None).is_err_and(|error| error.is_configuration()));

        let unknown = parse(r#"{ "symbols": ["a"], "cards": [["a", "a", "a", "z"]] }"#);
        assert!(unknown.build_tile_set(None).is_err_and(|error| error.is_configuration()));

        let empty = parse(r#"{ "cards": [] }"#);
        assert!(empty.build_tile_set(None).is_err_and(|error| error.is_configuration()));
    }

    // Tests descriptions load from disk and parse errors keep their path
    // Verified by reporting the inline placeholder for file errors
    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(PUZZLE.as_bytes())
            .expect("Failed to write temp file");
        let description =
            TileSetDescription::from_file(file.path()).expect("Failed to load description");
        assert_eq!(description.cards.len(), 2);

        let mut broken = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        broken
            .write_all(b"{ not json")
            .expect("Failed to write temp file");
        let error = TileSetDescription::from_file(broken.path()).err();
        assert!(
            error.is_some_and(|error| error.to_string().contains(&broken.path().display().to_string()))
        );

        let missing = TileSetDescription::from_file(std::path::Path::new("/nonexistent/cards.json"));
        assert!(missing.is_err());
    }
}
