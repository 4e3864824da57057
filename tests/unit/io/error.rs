//! Tests for error message formatting and source chaining

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::path::{Path, PathBuf};
    use wavetile::WfcError;
    use wavetile::io::error::{WithPath, invalid_parameter};

    // Tests file system errors chain their I/O source
    // Verified by returning None from source
    #[test]
    fn test_error_source_chain() {
        let error = WfcError::FileSystem {
            path: PathBuf::from("tiles.json"),
            operation: "read",
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        };

        assert!(error.source().is_some());
        let message = error.to_string();
        assert!(message.contains("tiles.json"));
        assert!(message.contains("read"));
    }

    // Tests parse errors name the file and chain the JSON error
    // Verified by omitting the path from the message
    #[test]
    fn test_definition_parse_error() {
        let source = serde_json::from_str::<Vec<u8>>("{").expect_err("Invalid JSON");
        let error = WfcError::DefinitionParse {
            path: PathBuf::from("broken.json"),
            source,
        };

        assert!(error.to_string().contains("broken.json"));
        assert!(error.source().is_some());
    }

    // Tests dimension and index errors carry their values
    // Verified by omitting the cell count from the message
    #[test]
    fn test_dimension_and_index_messages() {
        let dimensions = WfcError::InvalidDimensions { cols: 0, rows: 5 }.to_string();
        assert!(dimensions.contains("0x5"));

        let index = WfcError::CellIndex {
            index: 30,
            cell_count: 25,
        }
        .to_string();
        assert!(index.contains("30"));
        assert!(index.contains("25"));

        assert!(WfcError::EmptyTileSet.source().is_none());
    }

    // Tests invalid_parameter fills every field
    // Verified by swapping value and reason
    #[test]
    fn test_invalid_parameter_helper() {
        let error = invalid_parameter("attempts", &0, &"must be positive");
        let message = error.to_string();

        assert!(message.contains("attempts"));
        assert!(message.contains("'0'"));
        assert!(message.contains("must be positive"));
    }

    // Tests with_path attaches path and operation
    // Verified by discarding the operation name
    #[test]
    fn test_with_path() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));

        match result.with_path(Path::new("out.txt"), "write output") {
            Err(WfcError::FileSystem {
                path, operation, ..
            }) => {
                assert_eq!(path, PathBuf::from("out.txt"));
                assert_eq!(operation, "write output");
            }
            other => unreachable!("Expected FileSystem error, got {other:?}"),
        }
    }
}
