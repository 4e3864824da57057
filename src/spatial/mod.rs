//! Spatial data structures and tile modelling
//!
//! This module contains:
//! - Grid geometry and direction numbering
//! - Tile definitions and their transformed variants
//! - The indexed tile set with adjacency masks

/// Directions, linear indexing and neighbor lookup
pub mod grid;
/// Tile definitions, transforms and tile states
pub mod tiles;
/// Tile state indexing and adjacency construction
pub mod tileset;

pub use grid::{Direction, GridShape};
pub use tileset::TileSet;
