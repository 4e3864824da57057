//! Loading and saving tile definitions as JSON
//!
//! A definition file is either `{ "tiles": [...] }` or a bare array of
//! definitions. Edge tags may mix numbers and strings.

use crate::io::error::{Result, WfcError, WithPath};
use crate::spatial::tiles::TileDefinition;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serialized form of a tile definition list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionFile {
    /// Definitions in index order
    pub tiles: Vec<TileDefinition>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DefinitionDocument {
    Wrapped(DefinitionFile),
    Bare(Vec<TileDefinition>),
}

impl From<DefinitionDocument> for Vec<TileDefinition> {
    fn from(document: DefinitionDocument) -> Self {
        match document {
            DefinitionDocument::Wrapped(file) => file.tiles,
            DefinitionDocument::Bare(tiles) => tiles,
        }
    }
}

/// Parse definitions from JSON text
///
/// # Errors
///
/// Returns [`WfcError::DefinitionParse`] if the text is not a valid definition document
pub fn parse_definitions(text: &str) -> Result<Vec<TileDefinition>> {
    serde_json::from_str::<DefinitionDocument>(text)
        .map(Into::into)
        .map_err(|source| WfcError::DefinitionParse {
            path: "<inline>".into(),
            source,
        })
}

/// Read definitions from a JSON file
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse
pub fn load_definitions(path: &Path) -> Result<Vec<TileDefinition>> {
    let text = std::fs::read_to_string(path).with_path(path, "read definitions")?;
    serde_json::from_str::<DefinitionDocument>(&text)
        .map(Into::into)
        .map_err(|source| WfcError::DefinitionParse {
            path: path.to_path_buf(),
            source,
        })
}

/// Write definitions to a JSON file in the wrapped form
///
/// # Errors
///
/// Returns an error if serialization or the write fails
pub fn save_definitions(path: &Path, tiles: &[TileDefinition]) -> Result<()> {
    let file = DefinitionFile {
        tiles: tiles.to_vec(),
    };
    let text = serde_json::to_string_pretty(&file).map_err(|source| WfcError::Serialization {
        context: "tile definitions",
        source,
    })?;
    std::fs::write(path, text).with_path(path, "write definitions")
}
