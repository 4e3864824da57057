//! Solver constants and runtime configuration defaults

/// Weight assigned to tile definitions that omit one
pub const DEFAULT_TILE_WEIGHT: f64 = 10.0;

/// Weight substituted for non-positive or non-finite definition weights
pub const FALLBACK_TILE_WEIGHT: f64 = 1.0;

// Scales the per-cell jitter added to entropies; small enough to only break exact ties
/// Default entropy tie-break noise amplitude
pub const DEFAULT_NOISE: f64 = 1e-5;

/// Bits stored per options word
pub const BITS_PER_WORD: usize = 32;
/// `log2(BITS_PER_WORD)`, used to split a state index into word and bit
pub const BITS_PER_WORD_LOG2: usize = 5;

/// Default number of solve attempts made by the command-line driver
pub const DEFAULT_ATTEMPTS: usize = 1;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

/// Width of the progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 50;

/// Character printed for cells that never collapsed
pub const OPEN_CELL_SYMBOL: &str = ".";

/// Default logging level for the command-line driver
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Runtime parameters for a single solve attempt
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverConfig {
    /// Number of grid columns
    pub cols: usize,
    /// Number of grid rows
    pub rows: usize,
    /// Seed for the keyed random functions; `None` or `Some(0)` is irreproducible
    pub seed: Option<u32>,
    /// Amplitude of the entropy tie-break jitter
    pub noise: f64,
}

impl SolverConfig {
    /// Configuration for a `cols` x `rows` grid with default noise and no seed
    pub const fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            seed: None,
            noise: DEFAULT_NOISE,
        }
    }

    /// Set the seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the tie-break noise amplitude
    #[must_use]
    pub const fn with_noise(mut self, noise: f64) -> Self {
        self.noise = noise;
        self
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.cols * self.rows
    }
}
