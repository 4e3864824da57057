//! Command-line interface for solving a tile set over a fixed grid

use crate::algorithm::solver::{SolveOutcome, solve_observed};
use crate::io::configuration::{DEFAULT_ATTEMPTS, DEFAULT_LOG_LEVEL, SolverConfig};
use crate::io::definitions::load_definitions;
use crate::io::error::{Result, invalid_parameter};
use crate::io::export::{ExportFormat, render, write_output};
use crate::io::progress::CollapseProgress;
use crate::math::prng::{SeedPart, combine_seeds, time_seed};
use crate::spatial::tileset::TileSet;
use clap::Parser;
use std::path::PathBuf;
use tracing::level_filters::{LevelFilter, ParseLevelFilterError};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "wavetile")]
#[command(
    author,
    version,
    about = "Fill a grid with tiles whose edges match using wave function collapse"
)]
/// Command-line arguments for the solver
pub struct Cli {
    /// JSON file of tile definitions
    #[arg(value_name = "DEFINITIONS")]
    pub definitions: PathBuf,

    /// Number of grid columns
    #[arg(short, long)]
    pub cols: usize,

    /// Number of grid rows
    #[arg(short, long)]
    pub rows: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, conflicts_with = "seed_phrase")]
    pub seed: Option<u32>,

    /// Phrase hashed into a seed, combined with the grid size
    #[arg(short = 'p', long)]
    pub seed_phrase: Option<String>,

    /// Solve attempts before giving up on contradictions
    #[arg(short, long, default_value_t = DEFAULT_ATTEMPTS)]
    pub attempts: usize,

    /// Cell index to collapse before the solver runs; repeatable
    #[arg(long = "pin", value_name = "INDEX")]
    pub pins: Vec<usize>,

    /// Output encoding
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Text)]
    pub format: ExportFormat,

    /// Write the grid to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Logging level: off, error, warn, info, debug or trace
    #[arg(short, long, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Seed for the first attempt
    ///
    /// An explicit seed wins, then the seed phrase, then the wall clock.
    pub fn resolve_seed(&self) -> u32 {
        if let Some(seed) = self.seed.filter(|&seed| seed != 0) {
            return seed;
        }
        self.seed_phrase.as_deref().map_or_else(time_seed, |phrase| {
            combine_seeds(&[
                SeedPart::Text(phrase),
                SeedPart::Number(self.cols as i64),
                SeedPart::Number(self.rows as i64),
            ])
            .max(1)
        })
    }

    /// Solver configuration built from the arguments
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig::new(self.cols, self.rows).with_seed(self.resolve_seed())
    }

    /// Parsed logging level
    ///
    /// # Errors
    ///
    /// Returns [`crate::WfcError::InvalidParameter`] for an unknown level name
    pub fn log_filter(&self) -> Result<LevelFilter> {
        self.log_level.parse().map_err(|err: ParseLevelFilterError| {
            invalid_parameter("log-level", &self.log_level, &err)
        })
    }
}

/// What a command-line run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Seed of the first attempt
    pub seed: u32,
    /// Attempts made
    pub attempts: usize,
    /// Whether the final attempt collapsed every cell
    pub solved: bool,
    /// Cells left open by the final attempt
    pub remaining_open: usize,
    /// The grid rendered in the requested format
    pub rendered: String,
}

/// Load, solve and render according to `cli`, without writing the result
///
/// # Errors
///
/// Returns an error if:
/// - The definitions cannot be read or parsed, or are empty
/// - The grid dimensions or attempt count are invalid
/// - A pinned cell lies outside the grid
pub fn execute(cli: &Cli) -> Result<RunSummary> {
    let definitions = load_definitions(&cli.definitions)?;
    let tiles = TileSet::new(definitions)?;
    let config = cli.solver_config();
    let seed = config.seed.unwrap_or_default();

    info!(
        path = %cli.definitions.display(),
        states = tiles.len(),
        cols = config.cols,
        rows = config.rows,
        seed,
        "solving"
    );

    let cell_count = config.cell_count();
    let mut progress = if cli.should_show_progress() {
        CollapseProgress::new(cell_count)
    } else {
        CollapseProgress::hidden(cell_count)
    };

    let attempt = solve_observed(&tiles, config, cli.attempts, &cli.pins, |number, solver| {
        progress.update(number, cell_count - solver.remaining_open_count());
    })?;

    let remaining_open = match attempt.outcome {
        SolveOutcome::Solved => {
            progress.finish("solved");
            0
        }
        SolveOutcome::Contradiction {
            contradiction,
            remaining_open,
        } => {
            progress.abandon("contradiction");
            warn!(
                attempts = attempt.attempts,
                cell = contradiction.cell,
                neighbor = ?contradiction.neighbor,
                remaining_open,
                "no solution found; exporting partial grid"
            );
            remaining_open
        }
    };

    info!(
        attempts = attempt.attempts,
        solved = attempt.outcome.is_solved(),
        "finished"
    );

    Ok(RunSummary {
        seed,
        attempts: attempt.attempts,
        solved: attempt.outcome.is_solved(),
        remaining_open,
        rendered: render(&attempt.solver, cli.format)?,
    })
}

/// Run the command line: solve, then write the grid to the output file or stdout
///
/// # Errors
///
/// Returns an error if solving fails to start or the output cannot be written
pub fn run(cli: &Cli) -> Result<RunSummary> {
    let summary = execute(cli)?;

    if let Some(path) = &cli.output {
        write_output(path, &summary.rendered)?;
    } else {
        print_grid(&summary.rendered);
    }

    Ok(summary)
}

// The grid is the program's output
#[allow(clippy::print_stdout)]
fn print_grid(rendered: &str) {
    println!("{rendered}");
}
