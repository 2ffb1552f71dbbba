//! Manifest decoding for Grove
//!
//! This crate turns the normal-form expression produced by the configuration
//! language evaluator into a typed [`Config`](grove_core::Config), reporting
//! exactly which assumption about the manifest's shape failed.
//!
//! The pipeline is:
//! - `eval`: run the external evaluator and convert its output into an [`Expr`]
//! - `decode`: validate the tree and extract the typed model
//! - `error`: the decode failure taxonomy and its human-readable renderer
//! - `loader`: find the manifest on disk and drive the steps above
//! - `json`: the JSON contract consumed by downstream tools

pub mod decode;
pub mod error;
pub mod eval;
pub mod expr;
pub mod json;
pub mod loader;
pub mod view;

// Re-export main types
pub use decode::decode;
pub use error::{ConfigError, ConfigReadError, DecodeError};
pub use eval::{Dhall, Evaluator, JsonEvaluator};
pub use expr::{Expr, Fields, Type, TypeError};
pub use loader::{LoaderSettings, ManifestLoader};

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
