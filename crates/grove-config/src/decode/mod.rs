//! Decoding normal-form manifests into [`Config`].
//!
//! The expected shape is:
//!
//! ```text
//! { name : Text
//! , dependencies : List Text
//! , packages : { <package> : { dependencies : List Text, repo : Text, version : Text }, ... }
//! }
//! ```
//!
//! Decoding stops at the first failure.

use crate::error::{ConfigReadError, DecodeError};
use crate::expr::{infer, Expr, Fields};
use crate::view::{self, FromExpr};
use grove_core::{Config, Package, PackageName, Packages};
use tracing::debug;

/// Decode a normal-form manifest
pub fn decode(expr: &Expr) -> Result<Config, DecodeError> {
    let fields = match view::as_record(expr) {
        Ok(fields) => fields,
        Err(_) => {
            let inferred = infer(expr)?;
            return Err(ConfigReadError::ConfigIsNotRecord { inferred }.into());
        }
    };
    let keys: Vec<&String> = fields.keys().collect();
    debug!(keys = ?keys, "Decoding manifest record");

    let name: String = required(fields, "name")?;
    let dependencies: Vec<PackageName> = required(fields, "dependencies")?;

    let packages_expr = fields.get("packages").ok_or_else(|| missing("packages"))?;
    let entries = view::as_record(packages_expr).map_err(|_| {
        ConfigReadError::PackagesIsNotRecord {
            expr: packages_expr.clone(),
        }
    })?;
    let packages = entries
        .iter()
        .map(|(key, entry)| Ok((PackageName::from(key.as_str()), decode_package(key, entry)?)))
        .collect::<Result<Packages, ConfigReadError>>()?;

    debug!(
        name = %name,
        dependencies = dependencies.len(),
        packages = packages.len(),
        "Decoded manifest"
    );
    Ok(Config::new(name, dependencies, packages))
}

/// Extract a required top-level key
fn required<T: FromExpr>(fields: &Fields<Expr>, key: &str) -> Result<T, ConfigReadError> {
    let expr = fields.get(key).ok_or_else(|| missing(key))?;
    view::extract(expr).map_err(|err| {
        debug!(key, error = %err, "Top-level key has the wrong type");
        ConfigReadError::KeyHasWrongType {
            key: key.to_string(),
            expected: T::expected_type(),
            expr: expr.clone(),
        }
    })
}

fn decode_package(name: &str, entry: &Expr) -> Result<Package, ConfigReadError> {
    view::extract(entry).map_err(|err| {
        debug!(package = name, error = %err, "Package entry failed to decode");
        ConfigReadError::WrongPackageType {
            expr: entry.clone(),
        }
    })
}

fn missing(key: &str) -> ConfigReadError {
    ConfigReadError::KeyIsMissing {
        key: key.to_string(),
    }
}
