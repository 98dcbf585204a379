// ABOUTME: Configuration constants for Drafter
// ABOUTME: Centralizes environment variable names used across packages

pub mod constants;

pub use constants::*;
