//! Deterministic pseudorandom functions keyed by integer indices
//!
//! The solver never advances a shared random stream. Every draw is a pure
//! function of the seed and an index derived from the cell being processed,
//! so two solvers built from the same seed agree draw for draw regardless of
//! the order in which cells are visited.

use rand::Rng;
use std::time::{SystemTime, UNIX_EPOCH};

const GOLDEN_GAMMA: u32 = 0x9e37_79b9;
const STREAM_INCREMENT: u32 = 0x6d2b_79f5;
const UNIT_SCALE: f64 = 4_294_967_296.0;

/// Final avalanche shared by the keyed and sequential generators
const fn mix(mut t: u32) -> u32 {
    t = (t ^ (t >> 15)).wrapping_mul(t | 1);
    t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
    t ^ (t >> 14)
}

/// Pure function from an index to a uniform value in `[0, 1)`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexedRandom {
    seed: u32,
}

impl IndexedRandom {
    /// Generator for a fixed, reproducible seed
    pub const fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Generator for an optional seed
    ///
    /// `None` and `Some(0)` draw a fresh seed from the thread RNG, making every
    /// value irreproducible across runs.
    pub fn from_seed(seed: Option<u32>) -> Self {
        match seed {
            Some(seed) if seed != 0 => Self::new(seed),
            _ => Self::new(rand::rng().random_range(1..=u32::MAX)),
        }
    }

    /// The seed actually in use
    pub const fn seed(&self) -> u32 {
        self.seed
    }

    /// Uniform value in `[0, 1)` for `index`
    pub const fn sample(&self, index: usize) -> f64 {
        let t = self
            .seed
            .wrapping_add((index as u32).wrapping_mul(GOLDEN_GAMMA));
        mix(t) as f64 / UNIT_SCALE
    }
}

/// Small sequential generator for deriving follow-up seeds
#[derive(Clone, Debug)]
pub struct SequentialRandom {
    state: u32,
}

impl SequentialRandom {
    /// Stream starting from `seed`
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next raw 32-bit value
    pub const fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(STREAM_INCREMENT);
        mix(self.state)
    }

    /// Next uniform value in `[0, 1)`
    pub const fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / UNIT_SCALE
    }

    /// Next value usable as a reproducible seed (never zero)
    pub const fn next_seed(&mut self) -> u32 {
        let value = self.next_u32();
        if value == 0 { 1 } else { value }
    }
}

/// One component of a combined seed
#[derive(Clone, Copy, Debug)]
pub enum SeedPart<'a> {
    /// Numeric component
    Number(i64),
    /// Text component, hashed with [`seed_from_phrase`]
    Text(&'a str),
}

/// Derive a seed from text so that memorable phrases reproduce grids
pub fn seed_from_phrase(phrase: &str) -> u32 {
    let hash = phrase.encode_utf16().fold(0_i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    });
    hash.unsigned_abs()
}

/// Fold several seed components into one value
pub fn combine_seeds(parts: &[SeedPart<'_>]) -> u32 {
    let combined = parts.iter().fold(17_i64, |seed, part| {
        let value = match *part {
            SeedPart::Number(value) => value,
            SeedPart::Text(text) => i64::from(seed_from_phrase(text)),
        };
        seed.wrapping_mul(37).wrapping_add(value)
    });
    (combined.unsigned_abs() & u64::from(u32::MAX)) as u32
}

/// Seed derived from the wall clock, for deliberately irreproducible runs
pub fn time_seed() -> u32 {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis());
    let mixed = mix((millis & u128::from(u32::MAX)) as u32 ^ rand::rng().random::<u32>());
    mixed.max(1)
}
