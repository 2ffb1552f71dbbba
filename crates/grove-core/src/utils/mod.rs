//! Utility functions and helpers.
//!
//! Common functionality used across multiple Grove crates.

pub mod colors;

// Re-export commonly used utilities
pub use colors::ColorSupport;
