//! Core data types for Grove manifests.
//!
//! This module provides the immutable value types produced by decoding a manifest:
//! - Package identifiers
//! - Package registry entries
//! - The project configuration

pub mod config;
pub mod name;
pub mod package;

// Re-export all public types
pub use config::Config;
pub use name::PackageName;
pub use package::{Package, Packages};
