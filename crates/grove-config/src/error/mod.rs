//! Manifest decoding errors and their rendering.
//!
//! `ConfigReadError` is the closed set of ways a normal-form manifest can fail
//! to decode. Each variant keeps only what is needed to explain the failure:
//! the offending expression, its inferred type or the name of the missing key.

use crate::expr::{Expr, Type, TypeError};
use crate::view::FromExpr;
use grove_core::utils::ColorSupport;
use grove_core::{GroveError, Package};
use std::fmt;
use thiserror::Error;

/// Marker placed before the offending expression
const MARKER: &str = "↳ ";

/// Why a manifest could not be decoded into a `Config`
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigReadError {
    /// A value inside `packages` is not a package
    WrongPackageType { expr: Expr },
    /// The manifest is not a record; carries the type it has instead
    ConfigIsNotRecord { inferred: Type },
    /// The value under `packages` is not a record
    PackagesIsNotRecord { expr: Expr },
    /// A required top-level key is absent
    KeyIsMissing { key: String },
    /// A required top-level key is present with a value of the wrong type
    KeyHasWrongType {
        key: String,
        expected: Type,
        expr: Expr,
    },
}

/// Failure of [`decode`](crate::decode)
///
/// Type errors raised while inspecting a malformed root are passed through as-is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error(transparent)]
    Read(#[from] ConfigReadError),

    #[error(transparent)]
    Type(#[from] TypeError),
}

/// Any failure while loading a manifest
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Grove(#[from] GroveError),
}

impl From<ConfigReadError> for ConfigError {
    fn from(err: ConfigReadError) -> Self {
        ConfigError::Decode(err.into())
    }
}

impl ConfigReadError {
    /// One-line summary shown in the banner
    pub fn summary(&self) -> &'static str {
        match self {
            ConfigReadError::WrongPackageType { .. } => "Invalid package in the package set",
            ConfigReadError::ConfigIsNotRecord { .. } => "The configuration is not a record",
            ConfigReadError::PackagesIsNotRecord { .. } => "The `packages` key is not a record",
            ConfigReadError::KeyIsMissing { .. } => "Missing key in the configuration",
            ConfigReadError::KeyHasWrongType { .. } => "Configuration key has the wrong type",
        }
    }

    /// The general rule that was violated
    pub fn explanation(&self) -> String {
        match self {
            ConfigReadError::WrongPackageType { .. } => format!(
                "Every value in the `packages` record must be a package, that is a record\n\
                 of type:\n\
                 \n\
                 \x20   {}\n\
                 \n\
                 The following value does not have that type:",
                Package::expected_type()
            ),
            ConfigReadError::ConfigIsNotRecord { .. } => {
                "The configuration must evaluate to a record with the keys `name`,\n\
                 `dependencies` and `packages`, but it evaluates to a value of type:"
                    .to_string()
            }
            ConfigReadError::PackagesIsNotRecord { .. } => {
                "The `packages` key must hold a record mapping package names to packages,\n\
                 for example `{ prelude = { dependencies = [] : List Text, repo = \"...\", version = \"v4.1.1\" } }`.\n\
                 It holds this value instead:"
                    .to_string()
            }
            ConfigReadError::KeyIsMissing { .. } => {
                "The configuration must be a record containing the keys `name`,\n\
                 `dependencies` and `packages`. This key is missing:"
                    .to_string()
            }
            ConfigReadError::KeyHasWrongType { key, expected, .. } => format!(
                "The key `{}` must hold a value of type `{}`, but it holds:",
                key, expected
            ),
        }
    }

    /// The offending part of the manifest, pretty-printed in full
    pub fn subject(&self) -> String {
        match self {
            ConfigReadError::WrongPackageType { expr }
            | ConfigReadError::PackagesIsNotRecord { expr }
            | ConfigReadError::KeyHasWrongType { expr, .. } => expr.to_string(),
            ConfigReadError::ConfigIsNotRecord { inferred } => inferred.to_string(),
            ConfigReadError::KeyIsMissing { key } => key.clone(),
        }
    }

    /// Render the full explanation
    pub fn render(&self, colors: &ColorSupport) -> String {
        let mut out = format!(
            "{}: {}\n\nExplanation: {}\n\n",
            colors.bold_red("Error"),
            self.summary(),
            self.explanation()
        );
        for (i, line) in self.subject().lines().enumerate() {
            if i == 0 {
                out.push_str(MARKER);
            } else {
                out.push('\n');
                out.push_str("  ");
            }
            out.push_str(line);
        }
        out.push('\n');
        out
    }
}

impl fmt::Display for ConfigReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&ColorSupport::disabled()))
    }
}

impl std::error::Error for ConfigReadError {}
