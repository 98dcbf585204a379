// ABOUTME: Core utilities shared across Drafter packages
// ABOUTME: ID generation and application data directory resolution

pub mod constants;
pub mod utils;

// Re-export constants
pub use constants::{database_file, drafter_dir};

// Re-export utilities
pub use utils::generate_id;
