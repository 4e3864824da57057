//! Export of collapsed grids as plain text or JSON

use crate::algorithm::solver::GridSolver;
use crate::io::configuration::OPEN_CELL_SYMBOL;
use crate::io::error::{Result, WfcError, WithPath};
use clap::ValueEnum;
use ndarray::Array2;
use serde::Serialize;
use std::path::Path;

/// Output encodings for a collapsed grid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// One line per row of whitespace-aligned state indices
    #[default]
    Text,
    /// Dimensions, seed and a flat row-major cell array
    Json,
}

/// Serializable snapshot of a solve session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridExport {
    /// Number of columns
    pub cols: usize,
    /// Number of rows
    pub rows: usize,
    /// Seed the session ran with
    pub seed: u32,
    /// Whether every cell collapsed
    pub complete: bool,
    /// Row-major tile state indices, `null` for open cells
    pub cells: Vec<Option<usize>>,
    /// Names of the tile states, indexed by state
    pub states: Vec<String>,
}

impl GridExport {
    /// Capture the current state of `solver`
    pub fn from_solver(solver: &GridSolver<'_>) -> Self {
        let shape = solver.shape();
        Self {
            cols: shape.cols,
            rows: shape.rows,
            seed: solver.seed(),
            complete: solver.is_complete(),
            cells: solver.collapsed_grid().iter().copied().collect(),
            states: solver
                .tiles()
                .states()
                .iter()
                .map(|state| state.name.clone())
                .collect(),
        }
    }
}

/// Render a grid as aligned text, one line per row
pub fn render_text(grid: &Array2<Option<usize>>) -> String {
    let width = grid
        .iter()
        .flatten()
        .map(|state| state.to_string().len())
        .max()
        .unwrap_or(1);

    grid.rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .map(|cell| {
                    let symbol = cell
                        .map_or_else(|| OPEN_CELL_SYMBOL.to_string(), |state| state.to_string());
                    format!("{symbol:>width$}")
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a solver's grid in the requested format
///
/// # Errors
///
/// Returns an error if JSON serialization fails
pub fn render(solver: &GridSolver<'_>, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Text => Ok(render_text(&solver.collapsed_grid())),
        ExportFormat::Json => serde_json::to_string_pretty(&GridExport::from_solver(solver))
            .map_err(|source| WfcError::Serialization {
                context: "grid export",
                source,
            }),
    }
}

/// Write rendered output to `path`
///
/// # Errors
///
/// Returns [`WfcError::FileSystem`] if the write fails
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, format!("{content}\n")).with_path(path, "write output")
}
