//! Mathematical utilities for the solver

/// Weighted Shannon entropy
pub mod entropy;
/// Order-sensitive hashing of tag sequences
pub mod hashing;
/// Index-keyed and sequential pseudorandom generators
pub mod prng;
