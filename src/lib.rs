//! Tile-based wave function collapse over bit-packed constraint sets
//!
//! Tile definitions are expanded into indexed tile states with per-direction
//! adjacency masks. A solve session then narrows every grid cell from "any
//! state" to exactly one, always collapsing the cell of lowest weighted
//! entropy next and propagating neighbor constraints until the grid is
//! complete or a cell runs out of options.

#![forbid(unsafe_code)]

/// Constraint buffers, scheduling and the solver loop
pub mod algorithm;
/// Input/output operations, configuration and error handling
pub mod io;
/// Entropy, hashing and deterministic random utilities
pub mod math;
/// Grid geometry, tile definitions and tile sets
pub mod spatial;

pub use algorithm::solver::{CellState, GridSolver, SolveOutcome, Step};
pub use io::configuration::SolverConfig;
pub use io::error::{Result, WfcError};
pub use spatial::tiles::{EdgeTag, Rotation, TileDefinition, TileState};
pub use spatial::tileset::TileSet;
