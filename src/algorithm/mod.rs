/// Word-packed admissible-state bitsets and constraint propagation between cells
pub mod options;
/// Indexable entropy min-heap used to schedule collapses
pub mod queue;
/// Grid solve sessions, collapse scheduling and the retry driver
pub mod solver;
/// Deduplicating work-list for propagation
pub mod stack;
