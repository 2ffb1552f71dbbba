//! Typed views over normal-form expressions.
//!
//! Small extraction functions that either return a borrowed, typed view of a
//! node or say which shape was expected. The decoder is written by composing
//! these rather than matching on `Expr` directly.

use crate::expr::{check, Expr, Fields, Type, TypeError};
use grove_core::{Package, PackageName};
use std::fmt;
use thiserror::Error;

/// Coarse shape of an expression, used in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Bool,
    Natural,
    Integer,
    Double,
    Text,
    List,
    Optional,
    Record,
    Union,
}

/// Why a view could not be taken
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("expected {expected}, found {found}")]
    Expected { expected: Shape, found: Shape },

    #[error("missing key `{key}`")]
    MissingKey { key: String },
}

/// Result type for view operations
pub type ViewResult<T> = Result<T, ViewError>;

impl Shape {
    /// Shape of `expr`
    pub fn of(expr: &Expr) -> Self {
        match expr {
            Expr::Bool(_) => Shape::Bool,
            Expr::Natural(_) => Shape::Natural,
            Expr::Integer(_) => Shape::Integer,
            Expr::Double(_) => Shape::Double,
            Expr::Text(_) => Shape::Text,
            Expr::List { .. } => Shape::List,
            Expr::Some(_) | Expr::None(_) => Shape::Optional,
            Expr::Record(_) => Shape::Record,
            Expr::Union { .. } => Shape::Union,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::Bool => "a boolean",
            Shape::Natural => "a natural number",
            Shape::Integer => "an integer",
            Shape::Double => "a double",
            Shape::Text => "text",
            Shape::List => "a list",
            Shape::Optional => "an optional value",
            Shape::Record => "a record",
            Shape::Union => "a union alternative",
        };
        f.write_str(name)
    }
}

fn expected(expected: Shape, expr: &Expr) -> ViewError {
    ViewError::Expected {
        expected,
        found: Shape::of(expr),
    }
}

/// View a record literal's fields
pub fn as_record(expr: &Expr) -> ViewResult<&Fields<Expr>> {
    match expr {
        Expr::Record(fields) => Ok(fields),
        other => Err(expected(Shape::Record, other)),
    }
}

/// View a text literal
pub fn as_text(expr: &Expr) -> ViewResult<&str> {
    match expr {
        Expr::Text(text) => Ok(text),
        other => Err(expected(Shape::Text, other)),
    }
}

/// View a list literal, converting each element with `each`
pub fn as_list<'a, T, F>(expr: &'a Expr, each: F) -> ViewResult<Vec<T>>
where
    F: FnMut(&'a Expr) -> ViewResult<T>,
{
    match expr {
        Expr::List { items, .. } => items.iter().map(each).collect(),
        other => Err(expected(Shape::List, other)),
    }
}

/// View a text literal as a package name
pub fn as_identifier(expr: &Expr) -> ViewResult<PackageName> {
    as_text(expr).map(PackageName::from)
}

/// Look up a required record field
pub fn field<'a>(fields: &'a Fields<Expr>, key: &str) -> ViewResult<&'a Expr> {
    fields.get(key).ok_or_else(|| ViewError::MissingKey {
        key: key.to_string(),
    })
}

/// Values that can be extracted from a normal-form expression of a known type
pub trait FromExpr: Sized {
    /// Type an expression must have to be extracted as `Self`
    fn expected_type() -> Type;

    /// Structural extraction; does not type-check
    fn from_expr(expr: &Expr) -> ViewResult<Self>;
}

impl FromExpr for String {
    fn expected_type() -> Type {
        Type::Text
    }

    fn from_expr(expr: &Expr) -> ViewResult<Self> {
        as_text(expr).map(str::to_owned)
    }
}

impl FromExpr for PackageName {
    fn expected_type() -> Type {
        Type::Text
    }

    fn from_expr(expr: &Expr) -> ViewResult<Self> {
        as_identifier(expr)
    }
}

impl<T: FromExpr> FromExpr for Vec<T> {
    fn expected_type() -> Type {
        Type::list(T::expected_type())
    }

    fn from_expr(expr: &Expr) -> ViewResult<Self> {
        as_list(expr, T::from_expr)
    }
}

impl FromExpr for Package {
    fn expected_type() -> Type {
        Type::record([
            ("dependencies", Vec::<PackageName>::expected_type()),
            ("repo", Type::Text),
            ("version", Type::Text),
        ])
    }

    fn from_expr(expr: &Expr) -> ViewResult<Self> {
        let fields = as_record(expr)?;
        Ok(Package::new(
            Vec::from_expr(field(fields, "dependencies")?)?,
            String::from_expr(field(fields, "repo")?)?,
            String::from_expr(field(fields, "version")?)?,
        ))
    }
}

/// Failure of [`extract`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    View(#[from] ViewError),
}

/// Annotate `expr` with `T`'s type, check it, then extract a `T`
pub fn extract<T: FromExpr>(expr: &Expr) -> Result<T, ExtractError> {
    check(expr, &T::expected_type())?;
    Ok(T::from_expr(expr)?)
}
