//! Indexed tile states and their per-direction adjacency masks
//!
//! Built once from the author's definitions and shared read-only by every
//! solver attempt. For a direction `d`, the mask of state `a` has bit `b` set
//! when `a`'s face on `d` equals `b`'s face on the opposite direction read in
//! reverse, meaning the two tiles may sit side by side with `b` across `d`.

use crate::algorithm::options::OptionsBuffer;
use crate::io::error::{Result, WfcError};
use crate::math::entropy::WeightSums;
use crate::math::hashing::{hash_sequence, hash_sequence_reversed};
use crate::spatial::grid::{DIRECTIONS_2D, Direction};
use crate::spatial::tiles::{TileDefinition, TileState, expand_definitions};
use tracing::{debug, warn};

/// Expanded tile states with precomputed compatibility
#[derive(Debug, Clone)]
pub struct TileSet {
    definitions: Vec<TileDefinition>,
    states: Vec<TileState>,
    weights: Vec<f64>,
    adjacency: Vec<OptionsBuffer>,
    initial_entropy: f64,
}

impl TileSet {
    /// Expand `definitions` and build the adjacency tables
    ///
    /// # Errors
    ///
    /// Returns [`WfcError::EmptyTileSet`] if `definitions` is empty
    pub fn new(definitions: Vec<TileDefinition>) -> Result<Self> {
        if definitions.is_empty() {
            return Err(WfcError::EmptyTileSet);
        }

        for definition in &definitions {
            if !definition.has_valid_weight() {
                warn!(
                    name = %definition.name,
                    weight = definition.weight,
                    "non-positive tile weight replaced"
                );
            }
        }

        let states = expand_definitions(&definitions);
        let weights: Vec<f64> = states.iter().map(|state| state.weight).collect();
        let initial_entropy = weights.iter().copied().collect::<WeightSums>().entropy();
        let adjacency = build_adjacency(&states);

        debug!(
            definitions = definitions.len(),
            states = states.len(),
            initial_entropy,
            "tile set built"
        );

        Ok(Self {
            definitions,
            states,
            weights,
            adjacency,
            initial_entropy,
        })
    }

    /// Number of tile states
    pub const fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false; construction rejects empty sets
    pub const fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Definitions the set was built from
    pub fn definitions(&self) -> &[TileDefinition] {
        &self.definitions
    }

    /// All states in index order
    pub fn states(&self) -> &[TileState] {
        &self.states
    }

    /// State at `index`
    pub fn state(&self, index: usize) -> Option<&TileState> {
        self.states.get(index)
    }

    /// Weight of state `index`, if the set has that state
    pub fn weight(&self, index: usize) -> Option<f64> {
        self.weights.get(index).copied()
    }

    /// Entropy of a cell that still admits every state
    pub const fn initial_entropy(&self) -> f64 {
        self.initial_entropy
    }

    /// States allowed across `direction` from `state`, as packed words
    pub fn mask(&self, direction: Direction, state: usize) -> &[u32] {
        self.adjacency
            .get(direction.index())
            .map_or(Default::default(), |table| table.mask(state))
    }

    /// Test whether `b` may sit across `direction` from `a`
    pub fn compatible(&self, direction: Direction, a: usize, b: usize) -> bool {
        self.adjacency
            .get(direction.index())
            .is_some_and(|table| table.contains(a, b))
    }
}

fn build_adjacency(states: &[TileState]) -> Vec<OptionsBuffer> {
    let count = states.len();

    // Per state, the hash of each planar face read forwards and backwards
    let forward: Vec<[u32; DIRECTIONS_2D]> = states
        .iter()
        .map(|state| Direction::PLANAR.map(|direction| hash_sequence(state.edge(direction))))
        .collect();
    let backward: Vec<[u32; DIRECTIONS_2D]> = states
        .iter()
        .map(|state| {
            Direction::PLANAR.map(|direction| hash_sequence_reversed(state.edge(direction)))
        })
        .collect();

    let mut adjacency: Vec<OptionsBuffer> = (0..DIRECTIONS_2D)
        .map(|_| OptionsBuffer::new(count, count))
        .collect();

    for (direction, table) in Direction::PLANAR.into_iter().zip(adjacency.iter_mut()) {
        let opposite = direction.opposite();
        for (a, (state_a, hashes_a)) in states.iter().zip(&forward).enumerate() {
            let face_hash = hashes_a.get(direction.index());
            let face = state_a.edge(direction);
            for (b, (state_b, hashes_b)) in states.iter().zip(&backward).enumerate() {
                if face_hash != hashes_b.get(opposite.index()) {
                    continue;
                }
                // Confirm on content so a hash collision never links unrelated faces
                if face.iter().eq(state_b.edge(opposite).iter().rev()) {
                    table.set_bit(a, b);
                }
            }
        }
    }

    adjacency
}
