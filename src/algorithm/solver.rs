use crate::{
    algorithm::options::{OptionsBuffer, Propagation},
    algorithm::queue::EntropyQueue,
    algorithm::stack::PropagationStack,
    io::configuration::{MAX_GRID_DIMENSION, SolverConfig},
    io::error::{Result, WfcError, invalid_parameter},
    math::entropy::WeightSums,
    math::prng::{IndexedRandom, SequentialRandom},
    spatial::grid::{Direction, GridShape},
    spatial::tileset::TileSet,
};
use ndarray::Array2;
use tracing::{debug, trace, warn};

/// Observable state of one cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    /// Still admits one or more states
    Open,
    /// Fixed to the given tile state index
    Collapsed(usize),
}

impl CellState {
    /// The collapsed state index, if any
    pub const fn state(self) -> Option<usize> {
        match self {
            Self::Open => None,
            Self::Collapsed(state) => Some(state),
        }
    }
}

/// Where a solve attempt ran out of options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contradiction {
    /// Cell being collapsed or propagated from when the contradiction surfaced
    pub cell: usize,
    /// Cell left without admissible states, when found during propagation
    pub neighbor: Option<usize>,
    /// Direction from `cell` to `neighbor`
    pub direction: Option<Direction>,
}

/// Result of a single collapse request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// A cell was fixed and its constraints propagated
    Collapsed {
        /// The collapsed cell
        cell: usize,
        /// The selected tile state
        state: usize,
        /// Zero-entropy cells collapsed immediately afterwards
        cascaded: usize,
    },
    /// The requested cell had already been collapsed; nothing changed
    AlreadyCollapsed {
        /// The requested cell
        cell: usize,
        /// Its tile state
        state: usize,
    },
    /// No open cell remains
    Complete,
    /// The attempt cannot succeed; the grid keeps its partial state
    Contradiction(Contradiction),
}

impl Step {
    /// Test whether this step ended the attempt unsuccessfully
    pub const fn is_contradiction(&self) -> bool {
        matches!(self, Self::Contradiction(_))
    }
}

/// Result of running a solver to the end
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveOutcome {
    /// Every cell collapsed
    Solved,
    /// A contradiction stopped the attempt
    Contradiction {
        /// Where it happened
        contradiction: Contradiction,
        /// Cells that never collapsed
        remaining_open: usize,
    },
}

impl SolveOutcome {
    /// Test whether every cell collapsed
    pub const fn is_solved(&self) -> bool {
        matches!(self, Self::Solved)
    }
}

/// One weighted selection made by the solver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    /// The collapsed cell
    pub cell: usize,
    /// The chosen tile state
    pub state: usize,
}

/// Single-use solve session over a `cols` x `rows` grid
///
/// Holds every per-cell structure for one attempt. After a contradiction the
/// session refuses further collapses; start a new one to retry.
#[derive(Debug)]
pub struct GridSolver<'a> {
    tiles: &'a TileSet,
    shape: GridShape,
    options: OptionsBuffer,
    queue: EntropyQueue,
    stack: PropagationStack,
    collapsed: Vec<Option<usize>>,
    open: usize,
    random: IndexedRandom,
    noise: f64,
    selections: Vec<Selection>,
    contradiction: Option<Contradiction>,
}

impl<'a> GridSolver<'a> {
    /// Start a solve session with every cell admitting every state
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either dimension is zero or exceeds the maximum grid dimension
    /// - The noise amplitude is negative or not finite
    pub fn new(tiles: &'a TileSet, config: SolverConfig) -> Result<Self> {
        let SolverConfig {
            cols,
            rows,
            seed,
            noise,
        } = config;

        if cols == 0 || rows == 0 || cols > MAX_GRID_DIMENSION || rows > MAX_GRID_DIMENSION {
            return Err(WfcError::InvalidDimensions { cols, rows });
        }
        if !noise.is_finite() || noise < 0.0 {
            return Err(invalid_parameter(
                "noise",
                &noise,
                &"must be finite and non-negative",
            ));
        }

        let shape = GridShape::new(cols, rows);
        let count = shape.cell_count();
        let random = IndexedRandom::from_seed(seed);

        let mut options = OptionsBuffer::new(count, tiles.len());
        let mut queue = EntropyQueue::new(count);
        let initial_entropy = tiles.initial_entropy();
        let single_state = tiles.len() == 1;
        for cell in 0..count {
            options.enable_all(cell);
            let entropy = if single_state {
                0.0
            } else {
                initial_entropy + random.sample(cell) * noise
            };
            queue.push(cell, entropy);
        }

        debug!(
            cols,
            rows,
            states = tiles.len(),
            seed = random.seed(),
            "solver initialized"
        );

        Ok(Self {
            tiles,
            shape,
            options,
            queue,
            stack: PropagationStack::new(count),
            collapsed: vec![None; count],
            open: count,
            random,
            noise,
            selections: Vec::with_capacity(count),
            contradiction: None,
        })
    }

    /// Tile set this session solves over
    pub const fn tiles(&self) -> &'a TileSet {
        self.tiles
    }

    /// Grid shape
    pub const fn shape(&self) -> GridShape {
        self.shape
    }

    /// Seed in use, including one drawn because none was given
    pub const fn seed(&self) -> u32 {
        self.random.seed()
    }

    /// Selections made so far, in order
    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    /// The contradiction that stopped this session, if any
    pub const fn contradiction(&self) -> Option<Contradiction> {
        self.contradiction
    }

    /// Test whether every cell has collapsed
    pub const fn is_complete(&self) -> bool {
        self.open == 0
    }

    /// Number of cells not yet collapsed
    pub const fn remaining_open_count(&self) -> usize {
        self.open
    }

    /// Number of cells still scheduled for collapse
    pub const fn queued_count(&self) -> usize {
        self.queue.len()
    }

    /// Collapse the lowest-entropy cell and propagate its constraints
    ///
    /// Zero-entropy cells surfacing afterwards are collapsed before returning.
    pub fn collapse_one(&mut self) -> Step {
        if let Some(contradiction) = self.contradiction {
            return Step::Contradiction(contradiction);
        }
        let Some(cell) = self.queue.pop() else {
            return Step::Complete;
        };
        self.collapse_and_cascade(cell)
    }

    /// Collapse cells until the grid completes or contradicts
    ///
    /// Performs at most one selection per cell.
    pub fn collapse_all(&mut self) -> SolveOutcome {
        loop {
            match self.collapse_one() {
                Step::Complete => return SolveOutcome::Solved,
                Step::Contradiction(contradiction) => {
                    return SolveOutcome::Contradiction {
                        contradiction,
                        remaining_open: self.open,
                    };
                }
                Step::Collapsed { .. } | Step::AlreadyCollapsed { .. } => {}
            }
        }
    }

    /// Collapse a specific cell, as an editor would on user request
    ///
    /// # Errors
    ///
    /// Returns [`WfcError::CellIndex`] if `index` lies outside the grid
    pub fn collapse_cell_at(&mut self, index: usize) -> Result<Step> {
        self.check_index(index)?;

        if let Some(contradiction) = self.contradiction {
            return Ok(Step::Contradiction(contradiction));
        }
        if let Some(state) = self.collapsed_state(index) {
            return Ok(Step::AlreadyCollapsed { cell: index, state });
        }
        if self.options.is_empty(index) {
            return Ok(Step::Contradiction(self.record(Contradiction {
                cell: index,
                neighbor: None,
                direction: None,
            })));
        }

        Ok(self.collapse_and_cascade(index))
    }

    /// Collapsed state of a cell
    ///
    /// # Errors
    ///
    /// Returns [`WfcError::CellIndex`] if `index` lies outside the grid
    pub fn query_collapsed_state(&self, index: usize) -> Result<CellState> {
        self.check_index(index)?;
        Ok(self
            .collapsed_state(index)
            .map_or(CellState::Open, CellState::Collapsed))
    }

    /// Number of states a cell still admits
    ///
    /// # Errors
    ///
    /// Returns [`WfcError::CellIndex`] if `index` lies outside the grid
    pub fn query_open_option_count(&self, index: usize) -> Result<usize> {
        self.check_index(index)?;
        Ok(self.options.size(index))
    }

    /// States a cell still admits, in ascending order
    ///
    /// The slice borrows the solver's enumeration buffer and must be consumed
    /// before the solver is used again.
    ///
    /// # Errors
    ///
    /// Returns [`WfcError::CellIndex`] if `index` lies outside the grid
    pub fn query_open_option_indices(&mut self, index: usize) -> Result<&[usize]> {
        self.check_index(index)?;
        Ok(self.options.indices(index))
    }

    /// Scheduling entropy of a cell, `+∞` once it left the queue
    ///
    /// # Errors
    ///
    /// Returns [`WfcError::CellIndex`] if `index` lies outside the grid
    pub fn query_entropy(&self, index: usize) -> Result<f64> {
        self.check_index(index)?;
        Ok(self.queue.read(index))
    }

    /// Test whether a cell is waiting in the scheduling queue
    ///
    /// # Errors
    ///
    /// Returns [`WfcError::CellIndex`] if `index` lies outside the grid
    pub fn is_queued(&self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        Ok(self.queue.contains(index))
    }

    /// Snapshot of collapsed states as a rows x cols array
    pub fn collapsed_grid(&self) -> Array2<Option<usize>> {
        let cols = self.shape.cols;
        Array2::from_shape_fn((self.shape.rows, cols), |(y, x)| {
            self.collapsed_state(y * cols + x)
        })
    }

    fn collapsed_state(&self, cell: usize) -> Option<usize> {
        self.collapsed.get(cell).copied().flatten()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if self.shape.contains(index) {
            Ok(())
        } else {
            Err(WfcError::CellIndex {
                index,
                cell_count: self.shape.cell_count(),
            })
        }
    }

    fn record(&mut self, contradiction: Contradiction) -> Contradiction {
        self.contradiction = Some(contradiction);
        contradiction
    }

    fn collapse_and_cascade(&mut self, cell: usize) -> Step {
        let state = match self.collapse_cell(cell) {
            Ok(state) => state,
            Err(contradiction) => return Step::Contradiction(self.record(contradiction)),
        };

        let mut cascaded = 0;
        while self.queue.peek().is_some_and(|entropy| entropy <= 0.0) {
            let Some(next) = self.queue.pop() else {
                break;
            };
            if let Err(contradiction) = self.collapse_cell(next) {
                return Step::Contradiction(self.record(contradiction));
            }
            cascaded += 1;
        }

        Step::Collapsed {
            cell,
            state,
            cascaded,
        }
    }

    fn collapse_cell(&mut self, cell: usize) -> std::result::Result<usize, Contradiction> {
        let Some(state) = self.select(cell) else {
            warn!(cell, "cell has no admissible state left to select");
            self.queue.remove(cell);
            return Err(Contradiction {
                cell,
                neighbor: None,
                direction: None,
            });
        };

        self.options.collapse(cell, state);
        if let Some(slot) = self.collapsed.get_mut(cell) {
            *slot = Some(state);
        }
        self.open -= 1;
        self.queue.remove(cell);
        self.selections.push(Selection { cell, state });
        trace!(cell, state, "cell collapsed");

        self.propagate(cell).inspect_err(|contradiction| {
            warn!(
                cell,
                state,
                neighbor = ?contradiction.neighbor,
                direction = ?contradiction.direction,
                "contradiction during propagation"
            );
        })?;

        Ok(state)
    }

    /// Weighted draw among the admissible states of `cell`
    fn select(&mut self, cell: usize) -> Option<usize> {
        let tiles = self.tiles;
        let options = self.options.indices(cell);
        let count = options.len();
        if count == 0 {
            return None;
        }

        let weight = |state: usize| tiles.weight(state).unwrap_or_default();
        let total: f64 = options.iter().map(|&state| weight(state)).sum();
        let mut remaining = self.random.sample(cell + count) * total;
        for &state in options {
            remaining -= weight(state);
            if remaining <= 0.0 {
                return Some(state);
            }
        }

        // Rounding can leave a sliver of weight unspent
        options.last().copied()
    }

    fn propagate(&mut self, origin: usize) -> std::result::Result<(), Contradiction> {
        let shape = self.shape;
        self.stack.reset().push(origin);

        while let Some(cell) = self.stack.pop() {
            for (direction, neighbor) in shape.neighbors(cell) {
                if self.collapsed_state(neighbor).is_some() {
                    continue;
                }

                match self.options.propagate(cell, neighbor, direction, self.tiles) {
                    Propagation::Unchanged => {}
                    Propagation::Narrowed => {
                        self.refresh_entropy(neighbor);
                        self.stack.push(neighbor);
                    }
                    Propagation::Contradiction => {
                        self.queue.remove(neighbor);
                        return Err(Contradiction {
                            cell,
                            neighbor: Some(neighbor),
                            direction: Some(direction),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    fn refresh_entropy(&mut self, cell: usize) {
        let tiles = self.tiles;
        let options = self.options.indices(cell);

        let entropy = if options.len() == 1 {
            0.0
        } else {
            let sums: WeightSums = options
                .iter()
                .filter_map(|&state| tiles.weight(state))
                .collect();
            sums.entropy() + self.random.sample(cell) * self.noise
        };

        self.queue.update(cell, entropy);
    }
}

/// Outcome of [`solve_with_retries`]
#[derive(Debug)]
pub struct Attempt<'a> {
    /// The last session run
    pub solver: GridSolver<'a>,
    /// How that session ended
    pub outcome: SolveOutcome,
    /// Number of sessions started
    pub attempts: usize,
}

/// Solve, discarding contradicted sessions and retrying with fresh seeds
///
/// Each attempt first collapses the `pinned` cells in order, then the rest of
/// the grid. Follow-up seeds come from a sequential stream seeded by the first
/// attempt's seed, so a seeded run retries reproducibly.
///
/// # Errors
///
/// Returns an error if:
/// - `attempts` is zero
/// - The configuration is rejected by [`GridSolver::new`]
/// - A pinned cell lies outside the grid
pub fn solve_with_retries<'a>(
    tiles: &'a TileSet,
    config: SolverConfig,
    attempts: usize,
    pinned: &[usize],
) -> Result<Attempt<'a>> {
    solve_observed(tiles, config, attempts, pinned, |_, _| {})
}

/// [`solve_with_retries`], reporting every step to `observer`
///
/// The observer receives the attempt number (starting at 1) and the session
/// after each collapse request.
///
/// # Errors
///
/// Same conditions as [`solve_with_retries`]
pub fn solve_observed<'a, F>(
    tiles: &'a TileSet,
    config: SolverConfig,
    attempts: usize,
    pinned: &[usize],
    mut observer: F,
) -> Result<Attempt<'a>>
where
    F: FnMut(usize, &GridSolver<'a>),
{
    if attempts == 0 {
        return Err(invalid_parameter(
            "attempts",
            &attempts,
            &"at least one attempt is required",
        ));
    }

    let mut solver = GridSolver::new(tiles, config)?;
    let mut seeds = SequentialRandom::new(solver.seed());
    let mut attempt = 1;

    loop {
        let outcome = run_attempt(&mut solver, pinned, |session| observer(attempt, session))?;
        if outcome.is_solved() || attempt == attempts {
            return Ok(Attempt {
                solver,
                outcome,
                attempts: attempt,
            });
        }

        attempt += 1;
        let seed = seeds.next_seed();
        debug!(attempt, seed, "retrying after contradiction");
        solver = GridSolver::new(tiles, config.with_seed(seed))?;
    }
}

fn run_attempt<'a>(
    solver: &mut GridSolver<'a>,
    pinned: &[usize],
    mut observer: impl FnMut(&GridSolver<'a>),
) -> Result<SolveOutcome> {
    for &cell in pinned {
        let step = solver.collapse_cell_at(cell)?;
        observer(solver);
        if let Step::Contradiction(contradiction) = step {
            return Ok(SolveOutcome::Contradiction {
                contradiction,
                remaining_open: solver.remaining_open_count(),
            });
        }
    }

    loop {
        let step = solver.collapse_one();
        observer(solver);
        match step {
            Step::Complete => return Ok(SolveOutcome::Solved),
            Step::Contradiction(contradiction) => {
                return Ok(SolveOutcome::Contradiction {
                    contradiction,
                    remaining_open: solver.remaining_open_count(),
                });
            }
            Step::Collapsed { .. } | Step::AlreadyCollapsed { .. } => {}
        }
    }
}
