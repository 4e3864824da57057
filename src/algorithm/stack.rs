/// Deduplicating LIFO work-list of cell indices
///
/// A cell already waiting on the stack is not pushed again; once popped it
/// may be pushed anew.
#[derive(Clone, Debug)]
pub struct PropagationStack {
    items: Vec<usize>,
    queued: Vec<bool>,
}

impl PropagationStack {
    /// Empty stack for cells below `capacity`
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            queued: vec![false; capacity],
        }
    }

    /// Push `cell` unless it is already waiting or outside the capacity
    pub fn push(&mut self, cell: usize) {
        let Some(queued) = self.queued.get_mut(cell) else {
            return;
        };
        if *queued {
            return;
        }
        *queued = true;
        self.items.push(cell);
    }

    /// Pop the most recently pushed cell
    pub fn pop(&mut self) -> Option<usize> {
        let cell = self.items.pop()?;
        if let Some(queued) = self.queued.get_mut(cell) {
            *queued = false;
        }
        Some(cell)
    }

    /// Number of waiting cells
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Test whether nothing is waiting
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop every waiting cell
    pub fn reset(&mut self) -> &mut Self {
        for &cell in &self.items {
            if let Some(queued) = self.queued.get_mut(cell) {
                *queued = false;
            }
        }
        self.items.clear();
        self
    }
}
