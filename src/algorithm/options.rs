use crate::io::configuration::{BITS_PER_WORD, BITS_PER_WORD_LOG2};
use crate::spatial::grid::Direction;
use crate::spatial::tileset::TileSet;
use bitvec::prelude::*;
use std::fmt;

/// Result of narrowing one cell against a neighbor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Propagation {
    /// The neighbor's admissible set did not change
    Unchanged,
    /// The neighbor lost at least one state and still has some left
    Narrowed,
    /// The neighbor has no admissible state left
    Contradiction,
}

/// Word-packed bitsets, one row per cell, over the tile state index space
///
/// Each row occupies `stride = ceil(states / 32)` words. Bits past the last
/// state in the final word are never trusted: counting, enumeration and
/// change detection all apply the tail mask.
///
/// Rows with a single word take dedicated fast paths.
#[derive(Clone)]
pub struct OptionsBuffer {
    words: Vec<u32>,
    rows: usize,
    state_count: usize,
    stride: usize,
    tail_mask: u32,
    indices: Vec<usize>,
    union: Vec<u32>,
}

impl OptionsBuffer {
    /// Create `rows` empty bitsets over `state_count` states
    pub fn new(rows: usize, state_count: usize) -> Self {
        let stride = state_count.div_ceil(BITS_PER_WORD).max(1);
        let bits_in_last_word = state_count % BITS_PER_WORD;
        let tail_mask = if bits_in_last_word == 0 {
            u32::MAX
        } else {
            (1_u32 << bits_in_last_word) - 1
        };

        Self {
            words: vec![0; rows * stride],
            rows,
            state_count,
            stride,
            tail_mask,
            indices: Vec::with_capacity(state_count),
            union: vec![0; stride],
        }
    }

    /// Number of rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of valid bit positions per row
    pub const fn state_count(&self) -> usize {
        self.state_count
    }

    /// Words per row
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Mask of valid bits in a row's final word
    pub const fn tail_mask(&self) -> u32 {
        self.tail_mask
    }

    const fn is_mono(&self) -> bool {
        self.stride == 1
    }

    /// Raw words of a row, including any bits past the last state
    ///
    /// Rows outside the buffer yield an empty slice.
    pub fn mask(&self, row: usize) -> &[u32] {
        let start = row * self.stride;
        self.words.get(start..start + self.stride).unwrap_or_default()
    }

    fn mask_mut(&mut self, row: usize) -> &mut [u32] {
        let start = row * self.stride;
        self.words
            .get_mut(start..start + self.stride)
            .unwrap_or_default()
    }

    /// Enable every valid state
    pub fn enable_all(&mut self, row: usize) {
        let tail_mask = self.tail_mask;
        if self.is_mono() {
            if let Some(word) = self.words.get_mut(row) {
                *word = tail_mask;
            }
            return;
        }

        if let Some((last, rest)) = self.mask_mut(row).split_last_mut() {
            rest.fill(u32::MAX);
            *last = tail_mask;
        }
    }

    /// Turn on one state
    ///
    /// States past the end of the index space are ignored.
    pub fn set_bit(&mut self, row: usize, state: usize) {
        if state >= self.state_count {
            return;
        }
        let index = row * self.stride + (state >> BITS_PER_WORD_LOG2);
        if let Some(word) = self.words.get_mut(index) {
            *word |= 1_u32 << (state & (BITS_PER_WORD - 1));
        }
    }

    /// Test whether a state is enabled
    pub fn contains(&self, row: usize, state: usize) -> bool {
        state < self.state_count
            && self.mask(row).view_bits::<Lsb0>().get(state).as_deref() == Some(&true)
    }

    /// Restrict a row to exactly one state
    pub fn collapse(&mut self, row: usize, state: usize) {
        if self.is_mono() && state < self.state_count {
            if let Some(word) = self.words.get_mut(row) {
                *word = 1_u32 << state;
            }
            return;
        }

        self.mask_mut(row).fill(0);
        self.set_bit(row, state);
    }

    /// Number of enabled states; zero for rows outside the buffer
    pub fn size(&self, row: usize) -> usize {
        if self.is_mono() {
            return self
                .words
                .get(row)
                .map_or(0, |word| (word & self.tail_mask).count_ones() as usize);
        }

        self.mask(row)
            .view_bits::<Lsb0>()
            .get(..self.state_count)
            .map_or(0, BitSlice::count_ones)
    }

    /// Test whether a row has no enabled state
    pub fn is_empty(&self, row: usize) -> bool {
        self.size(row) == 0
    }

    /// Enabled states in ascending order
    ///
    /// The returned slice lives in a scratch buffer owned by `self` and is
    /// overwritten by the next call; the borrow ends before that call can happen.
    pub fn indices(&mut self, row: usize) -> &[usize] {
        let (stride, state_count, tail_mask) = (self.stride, self.state_count, self.tail_mask);
        let start = row * stride;
        let Self { words, indices, .. } = self;
        let mask = words.get(start..start + stride).unwrap_or_default();
        indices.clear();

        if stride == 1 {
            let mut bits = mask.first().map_or(0, |word| word & tail_mask);
            while bits != 0 {
                indices.push(bits.trailing_zeros() as usize);
                bits &= bits - 1;
            }
        } else if let Some(bits) = mask.view_bits::<Lsb0>().get(..state_count) {
            indices.extend(bits.iter_ones());
        }

        indices
    }

    /// AND a row with an external mask in place
    ///
    /// Returns whether any valid bit changed. Missing mask words count as zero.
    pub fn intersect(&mut self, row: usize, mask: &[u32]) -> bool {
        let tail_mask = self.tail_mask;
        intersect_words(self.mask_mut(row), mask, tail_mask)
    }

    /// Position of the sole enabled state, or `None` if the row is empty
    ///
    /// Assumes the caller has established that the row holds at most one
    /// state; with several enabled the lowest one is returned.
    pub fn tile(&self, row: usize) -> Option<usize> {
        let mask = self.mask(row);
        let last = mask.len().saturating_sub(1);

        mask.iter().enumerate().find_map(|(index, &word)| {
            let word = if index == last { word & self.tail_mask } else { word };
            (word != 0).then(|| index * BITS_PER_WORD + word.trailing_zeros() as usize)
        })
    }

    /// Narrow `neighbor` to the states compatible with some state of `source`
    ///
    /// `direction` points from `source` to `neighbor`; `adjacency` supplies,
    /// for every state, the states allowed across that face.
    pub fn propagate(
        &mut self,
        source: usize,
        neighbor: usize,
        direction: Direction,
        adjacency: &TileSet,
    ) -> Propagation {
        let (stride, state_count, tail_mask) = (self.stride, self.state_count, self.tail_mask);
        let Self { words, union, .. } = self;
        let source_words = words
            .get(source * stride..(source + 1) * stride)
            .unwrap_or_default();
        union.fill(0);

        for (chunk, &word) in source_words.iter().enumerate() {
            let mut remaining = word;
            let base = chunk * BITS_PER_WORD;
            while remaining != 0 {
                let state = base + remaining.trailing_zeros() as usize;
                remaining &= remaining - 1;
                if state >= state_count {
                    continue;
                }
                for (slot, &allowed) in union.iter_mut().zip(adjacency.mask(direction, state)) {
                    *slot |= allowed;
                }
            }
        }

        let target = words
            .get_mut(neighbor * stride..(neighbor + 1) * stride)
            .unwrap_or_default();
        let changed = intersect_words(target, union, tail_mask);

        if !changed {
            Propagation::Unchanged
        } else if self.is_empty(neighbor) {
            Propagation::Contradiction
        } else {
            Propagation::Narrowed
        }
    }
}

fn intersect_words(target: &mut [u32], mask: &[u32], tail_mask: u32) -> bool {
    let last = target.len().saturating_sub(1);
    let mut changed = false;

    for (index, word) in target.iter_mut().enumerate() {
        let original = *word;
        let narrowed = original & mask.get(index).copied().unwrap_or(0);
        let valid = if index == last { tail_mask } else { u32::MAX };
        changed |= (narrowed & valid) != (original & valid);
        *word = narrowed;
    }

    changed
}

impl fmt::Debug for OptionsBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionsBuffer")
            .field("rows", &self.rows)
            .field("state_count", &self.state_count)
            .field("stride", &self.stride)
            .finish_non_exhaustive()
    }
}
