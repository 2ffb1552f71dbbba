//! # grove-core
//!
//! Core types and utilities shared across all Grove crates.
//!
//! This crate provides:
//! - `PackageName`, the typed identifier used as a registry key
//! - `Package` and `Config`, the decoded manifest model handed to resolvers and fetchers
//! - `GroveError` for the I/O side of manifest loading
//! - Terminal colour support shared by the renderer and the CLI
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Manifest data types (PackageName, Package, Config)
//! - `error`: Error types and result aliases
//! - `utils`: Utility functions and helpers

pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{GroveError, GroveResult};
pub use types::{Config, Package, PackageName, Packages};
