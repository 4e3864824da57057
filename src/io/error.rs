//! Error types for tile set construction, solver configuration and file operations
//!
//! Contradictions are deliberately absent: an over-constrained grid is an
//! expected solver outcome and is reported through return values instead.

use crate::io::configuration::MAX_GRID_DIMENSION;
use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all crate operations
#[derive(Debug)]
pub enum WfcError {
    /// A tile set was requested from an empty definition list
    EmptyTileSet,

    /// Grid dimensions must be positive and within the size limit
    InvalidDimensions {
        /// Requested column count
        cols: usize,
        /// Requested row count
        rows: usize,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Cell index lies outside the grid
    CellIndex {
        /// The rejected cell index
        index: usize,
        /// Number of cells in the grid
        cell_count: usize,
    },

    /// Tile definition file could not be parsed
    DefinitionParse {
        /// Path to the definition file
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Serializing definitions or results failed
    Serialization {
        /// What was being serialized
        context: &'static str,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for WfcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTileSet => {
                write!(f, "Tile set requires at least one tile definition")
            }
            Self::InvalidDimensions { cols, rows } => {
                write!(
                    f,
                    "Invalid grid dimensions {cols}x{rows}: each must lie in 1..={MAX_GRID_DIMENSION}"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::CellIndex { index, cell_count } => {
                write!(
                    f,
                    "Cell index {index} is out of bounds (grid has {cell_count} cells)"
                )
            }
            Self::DefinitionParse { path, source } => {
                write!(
                    f,
                    "Failed to parse tile definitions '{}': {source}",
                    path.display()
                )
            }
            Self::Serialization { context, source } => {
                write!(f, "Failed to serialize {context}: {source}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for WfcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DefinitionParse { source, .. } | Self::Serialization { source, .. } => {
                Some(source)
            }
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for crate results
pub type Result<T> = std::result::Result<T, WfcError>;

/// Attaches the path and operation to raw I/O failures
pub trait WithPath<T> {
    /// Convert an I/O error into [`WfcError::FileSystem`] naming `path`
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path and operation applied
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T> WithPath<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|source| WfcError::FileSystem {
            path: path.to_path_buf(),
            operation,
            source,
        })
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> WfcError {
    WfcError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
