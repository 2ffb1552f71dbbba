//! Normal-form expressions of the configuration language.
//!
//! The evaluator resolves imports and reduces the manifest before Grove ever
//! sees it, so only literal values can appear here: no variables, functions
//! or unresolved imports. Types are kept alongside because an empty list or an
//! empty optional only carries its element type in an annotation, and a union
//! value carries the full union type it was built from.

mod pretty;
pub mod typecheck;

use std::collections::BTreeMap;
use std::fmt;

pub use typecheck::{check, infer, TypeError};

/// Record fields, sorted by label as in normal form
pub type Fields<T> = BTreeMap<String, T>;

/// A value in normal form
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Bool(bool),
    Natural(u64),
    Integer(i64),
    Double(f64),
    Text(String),
    /// List literal; `annotation` is the element type of `[] : List T`
    List {
        items: Vec<Expr>,
        annotation: Option<Type>,
    },
    Some(Box<Expr>),
    /// Empty optional; the element type is unknown when the value came from JSON `null`
    None(Option<Type>),
    Record(Fields<Expr>),
    /// Union alternative `< A | B : T >.B payload`
    Union {
        alternatives: Fields<Option<Type>>,
        alternative: String,
        payload: Option<Box<Expr>>,
    },
}

/// Type of a normal-form value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Bool,
    Natural,
    Integer,
    Double,
    Text,
    List(Box<Type>),
    Optional(Box<Type>),
    Record(Fields<Type>),
    /// Alternatives mapped to their payload type, if any
    Union(Fields<Option<Type>>),
}

impl Expr {
    /// Text literal
    pub fn text(value: impl Into<String>) -> Self {
        Expr::Text(value.into())
    }

    /// Non-empty list literal, or an unannotated empty one
    pub fn list(items: Vec<Expr>) -> Self {
        Expr::List {
            items,
            annotation: None,
        }
    }

    /// `[] : List element`
    pub fn empty_list(element: Type) -> Self {
        Expr::List {
            items: Vec::new(),
            annotation: Some(element),
        }
    }

    /// Record literal from `(label, value)` pairs
    pub fn record<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Expr)>,
    {
        Expr::Record(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl Type {
    /// `List element`
    pub fn list(element: Type) -> Self {
        Type::List(Box::new(element))
    }

    /// `Optional element`
    pub fn optional(element: Type) -> Self {
        Type::Optional(Box::new(element))
    }

    /// Record type from `(label, type)` pairs
    pub fn record<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Type)>,
    {
        Type::Record(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&pretty::render(self))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&pretty::render(self))
    }
}
