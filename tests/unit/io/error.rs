//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use edgematch::SolverError;
    use edgematch::io::error::{configuration_error, invalid_parameter};
    use std::error::Error;

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = SolverError::FileSystem {
            path: "/tmp/card_list.json".into(),
            operation: "read tile set",
            source: io_error,
        };

        assert!(error.source().is_some());
        assert!(error.to_string().contains("read tile set"));
        assert!(configuration_error(&"bad").source().is_none());
    }

    // Tests JSON parse failures keep the path and the parser's message
    // Verified by dropping the path from the message
    #[test]
    fn test_tile_set_parse_error() {
        let Err(json_error) = serde_json::from_str::<Vec<u8>>("{") else {
            panic!("invalid JSON should not parse");
        };
        let error = SolverError::TileSetParse {
            path: "puzzle.json".into(),
            source: json_error,
        };

        assert!(error.to_string().contains("puzzle.json"));
        assert!(error.source().is_some());
    }

    // Tests cell errors include the coordinates and grid size
    // Verified by omitting the grid size from the message
    #[test]
    fn test_cell_out_of_bounds_message() {
        let error = SolverError::CellOutOfBounds {
            row: 4,
            col: 1,
            grid_dimensions: (3, 3),
        };

        let message = error.to_string();
        assert!(message.contains("(4, 1)"));
        assert!(message.contains("3x3"));
        assert!(error.is_precheck());
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("threads", &0, &"must be positive");

        let message = error.to_string();
        assert!(message.contains("threads"));
        assert!(message.contains('0'));
        assert!(message.contains("must be positive"));
        assert!(!error.is_configuration());
    }

    // Tests conversion from std::io::Error
    // Verified by changing the operation name in the From impl
    #[test]
    fn test_from_io_error() {
        let io_error = std::io::Error::other("broken pipe");
        let error: SolverError = io_error.into();

        assert!(matches!(
            error,
            SolverError::FileSystem {
                operation: "unknown",
                ..
            }
        ));
    }
}
