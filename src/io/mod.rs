/// Command-line driver
pub mod cli;
/// Constants and solver configuration
pub mod configuration;
/// Tile definition files
pub mod definitions;
/// Error types
pub mod error;
/// Collapsed grid export
pub mod export;
/// Terminal progress display
pub mod progress;
