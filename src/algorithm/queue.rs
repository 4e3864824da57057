//! Indexable binary min-heap of cells ordered by entropy
//!
//! Keys are dense cell indices in `[0, capacity)`. A key-to-position table
//! lets any key be re-prioritized or removed in `O(log n)`, which the solver
//! needs every time propagation narrows a cell that is not at the top.

/// Min-heap over `(cell, entropy)` pairs with arbitrary update and removal
#[derive(Clone, Debug)]
pub struct EntropyQueue {
    heap: Vec<(usize, f64)>,
    positions: Vec<Option<usize>>,
}

impl EntropyQueue {
    /// Empty queue accepting keys below `capacity`
    pub fn new(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            positions: vec![None; capacity],
        }
    }

    /// Number of queued keys
    pub const fn len(&self) -> usize {
        self.heap.len()
    }

    /// Test whether no key is queued
    pub const fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Test whether `key` is queued
    pub fn contains(&self, key: usize) -> bool {
        self.position(key).is_some()
    }

    /// Entropy of `key`, or `+∞` if it is not queued
    pub fn read(&self, key: usize) -> f64 {
        self.position(key)
            .map_or(f64::INFINITY, |position| self.entropy_at(position))
    }

    /// Queue `key`, or re-prioritize it if already present
    ///
    /// Returns false, changing nothing, if `key` is not below the capacity.
    pub fn push(&mut self, key: usize, entropy: f64) -> bool {
        if self.update(key, entropy) {
            return true;
        }

        let position = self.heap.len();
        let Some(slot) = self.positions.get_mut(key) else {
            return false;
        };
        *slot = Some(position);
        self.heap.push((key, entropy));
        self.sift_up(position);
        true
    }

    /// Change the entropy of a queued key
    ///
    /// Returns false, changing nothing, if `key` is not queued.
    pub fn update(&mut self, key: usize, entropy: f64) -> bool {
        let Some(position) = self.position(key) else {
            return false;
        };
        let Some(entry) = self.heap.get_mut(position) else {
            return false;
        };

        let previous = std::mem::replace(&mut entry.1, entropy);
        if entropy < previous {
            self.sift_up(position);
        } else {
            self.sift_down(position);
        }
        true
    }

    /// Remove and return the key with the lowest entropy
    pub fn pop(&mut self) -> Option<usize> {
        let key = self.peek_key()?;
        self.remove(key);
        Some(key)
    }

    /// Lowest entropy without removing it
    pub fn peek(&self) -> Option<f64> {
        self.heap.first().map(|&(_, entropy)| entropy)
    }

    /// Key with the lowest entropy without removing it
    pub fn peek_key(&self) -> Option<usize> {
        self.heap.first().map(|&(key, _)| key)
    }

    /// Remove `key` wherever it sits
    ///
    /// Returns false if `key` was not queued.
    pub fn remove(&mut self, key: usize) -> bool {
        let Some(slot) = self.positions.get_mut(key) else {
            return false;
        };
        let Some(position) = slot.take() else {
            return false;
        };

        self.heap.swap_remove(position);
        let Some(&(moved, entropy)) = self.heap.get(position) else {
            return true;
        };
        self.set_position(moved, position);

        if position > 0 && entropy < self.entropy_at((position - 1) / 2) {
            self.sift_up(position);
        } else {
            self.sift_down(position);
        }
        true
    }

    /// Drop every key
    pub fn clear(&mut self) {
        self.heap.clear();
        self.positions.fill(None);
    }

    fn position(&self, key: usize) -> Option<usize> {
        self.positions.get(key).copied().flatten()
    }

    fn set_position(&mut self, key: usize, position: usize) {
        if let Some(slot) = self.positions.get_mut(key) {
            *slot = Some(position);
        }
    }

    fn entropy_at(&self, position: usize) -> f64 {
        self.heap
            .get(position)
            .map_or(f64::INFINITY, |&(_, entropy)| entropy)
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        for position in [i, j] {
            if let Some(&(key, _)) = self.heap.get(position) {
                self.set_position(key, position);
            }
        }
    }

    fn sift_up(&mut self, mut position: usize) {
        let entropy = self.entropy_at(position);
        while position > 0 {
            let parent = (position - 1) / 2;
            if self.entropy_at(parent) <= entropy {
                break;
            }
            self.swap(position, parent);
            position = parent;
        }
    }

    fn sift_down(&mut self, mut position: usize) {
        loop {
            let left = 2 * position + 1;
            let right = left + 1;
            let mut smallest = position;

            if self.entropy_at(left) < self.entropy_at(smallest) {
                smallest = left;
            }
            if self.entropy_at(right) < self.entropy_at(smallest) {
                smallest = right;
            }
            if smallest == position {
                break;
            }
            self.swap(position, smallest);
            position = smallest;
        }
    }
}
