//! Reading the standard binary encoding of normal-form expressions.
//!
//! `dhall encode` writes an expression as CBOR. Built-in names are CBOR
//! strings, booleans and doubles are CBOR primitives, and every other term is
//! an array whose first element is a numeric label saying what kind of term
//! it is. Only the labels a fully reduced manifest can contain are accepted.

use crate::expr::{Expr, Fields, Type};
use ciborium::value::Value;
use grove_core::error::{GroveError, GroveResult};

/// Tag some encoders wrap the whole expression in
const SELF_DESCRIBE_TAG: u64 = 55799;

mod label {
    pub const APPLICATION: u64 = 0;
    pub const LIST: u64 = 4;
    pub const SOME: u64 = 5;
    pub const RECORD_TYPE: u64 = 7;
    pub const RECORD: u64 = 8;
    pub const FIELD: u64 = 9;
    pub const UNION_TYPE: u64 = 11;
    pub const NATURAL: u64 = 15;
    pub const INTEGER: u64 = 16;
    pub const TEXT: u64 = 18;
}

/// Decode an encoded expression
pub fn expr_from_cbor_slice(bytes: &[u8]) -> GroveResult<Expr> {
    let value: Value = ciborium::de::from_reader(bytes).map_err(|e| GroveError::NotNormalForm {
        message: format!("invalid binary expression: {}", e),
    })?;
    expr_from_cbor(&value)
}

/// Convert a decoded CBOR term into a normal-form expression
pub fn expr_from_cbor(value: &Value) -> GroveResult<Expr> {
    let (tag, rest) = match value {
        Value::Tag(SELF_DESCRIBE_TAG, inner) => return expr_from_cbor(inner),
        Value::Bool(b) => return Ok(Expr::Bool(*b)),
        Value::Float(d) => return Ok(Expr::Double(*d)),
        Value::Array(items) => match items.split_first() {
            Some((first, rest)) => match label_of(first) {
                Some(tag) => (tag, rest),
                None => return Err(unsupported(value)),
            },
            None => return Err(unsupported(value)),
        },
        _ => return Err(unsupported(value)),
    };

    match (tag, rest) {
        (label::APPLICATION, [Value::Text(builtin), element]) if builtin == "None" => {
            Ok(Expr::None(Some(type_from_cbor(element)?)))
        }
        (label::APPLICATION, [constructor, payload]) => {
            let (alternatives, alternative) = union_constructor(constructor)?;
            Ok(Expr::Union {
                alternatives,
                alternative,
                payload: Some(Box::new(expr_from_cbor(payload)?)),
            })
        }
        (label::LIST, [element]) => Ok(Expr::empty_list(type_from_cbor(element)?)),
        (label::LIST, [Value::Null, items @ ..]) if !items.is_empty() => Ok(Expr::list(
            items.iter().map(expr_from_cbor).collect::<GroveResult<_>>()?,
        )),
        (label::SOME, [Value::Null, inner]) => Ok(Expr::Some(Box::new(expr_from_cbor(inner)?))),
        (label::RECORD, [Value::Map(entries)]) => Ok(Expr::Record(fields(entries, expr_from_cbor)?)),
        (label::FIELD, _) => {
            let (alternatives, alternative) = union_constructor(value)?;
            Ok(Expr::Union {
                alternatives,
                alternative,
                payload: None,
            })
        }
        (label::NATURAL, [Value::Integer(n)]) => u64::try_from(*n)
            .map(Expr::Natural)
            .map_err(|_| not_normal_form("natural number out of range".to_string())),
        (label::INTEGER, [Value::Integer(n)]) => i64::try_from(*n)
            .map(Expr::Integer)
            .map_err(|_| not_normal_form("integer out of range".to_string())),
        (label::NATURAL | label::INTEGER, [Value::Tag(..)]) => {
            Err(not_normal_form("number out of range".to_string()))
        }
        (label::TEXT, [Value::Text(text)]) => Ok(Expr::Text(text.clone())),
        (tag, _) => Err(not_normal_form(format!(
            "{} cannot appear in a manifest",
            describe(tag)
        ))),
    }
}

/// Convert a decoded CBOR term into a type
pub fn type_from_cbor(value: &Value) -> GroveResult<Type> {
    match value {
        Value::Tag(SELF_DESCRIBE_TAG, inner) => type_from_cbor(inner),
        Value::Text(name) => match name.as_str() {
            "Bool" => Ok(Type::Bool),
            "Natural" => Ok(Type::Natural),
            "Integer" => Ok(Type::Integer),
            "Double" => Ok(Type::Double),
            "Text" => Ok(Type::Text),
            other => Err(not_normal_form(format!("unsupported type `{}`", other))),
        },
        Value::Array(items) => match items.split_first() {
            Some((first, rest)) => match (label_of(first), rest) {
                (Some(label::APPLICATION), [Value::Text(builtin), element]) if builtin == "List" => {
                    Ok(Type::list(type_from_cbor(element)?))
                }
                (Some(label::APPLICATION), [Value::Text(builtin), element]) if builtin == "Optional" => {
                    Ok(Type::optional(type_from_cbor(element)?))
                }
                (Some(label::RECORD_TYPE), [Value::Map(entries)]) => {
                    Ok(Type::Record(fields(entries, type_from_cbor)?))
                }
                (Some(label::UNION_TYPE), [Value::Map(entries)]) => {
                    Ok(Type::Union(fields(entries, alternative_type)?))
                }
                _ => Err(not_normal_form("unsupported type".to_string())),
            },
            None => Err(unsupported(value)),
        },
        _ => Err(not_normal_form("unsupported type".to_string())),
    }
}

fn alternative_type(value: &Value) -> GroveResult<Option<Type>> {
    match value {
        Value::Null => Ok(None),
        other => type_from_cbor(other).map(Some),
    }
}

/// `< A | B : T >.A`, the constructor of a union alternative
fn union_constructor(value: &Value) -> GroveResult<(Fields<Option<Type>>, String)> {
    if let Value::Array(items) = value {
        if let [first, union, Value::Text(alternative)] = items.as_slice() {
            if label_of(first) == Some(label::FIELD) {
                if let Ok(Type::Union(alternatives)) = type_from_cbor(union) {
                    return Ok((alternatives, alternative.clone()));
                }
            }
        }
    }
    Err(not_normal_form(
        "only union alternatives can be applied in a manifest".to_string(),
    ))
}

fn fields<T>(
    entries: &[(Value, Value)],
    mut convert: impl FnMut(&Value) -> GroveResult<T>,
) -> GroveResult<Fields<T>> {
    entries
        .iter()
        .map(|(key, value)| match key {
            Value::Text(label) => Ok((label.clone(), convert(value)?)),
            _ => Err(not_normal_form("record labels must be text".to_string())),
        })
        .collect()
}

fn label_of(value: &Value) -> Option<u64> {
    match value {
        Value::Integer(n) => u64::try_from(*n).ok(),
        _ => None,
    }
}

fn describe(tag: u64) -> &'static str {
    match tag {
        0 => "a function application",
        1 => "a function",
        2 => "a function type",
        3 => "an operator",
        6 => "a merge expression",
        7 => "a record type",
        10 => "a record projection",
        11 => "a union type",
        14 => "an if expression",
        18 => "interpolated text",
        19 => "an assertion",
        24 => "an import",
        25 => "a let binding",
        26 => "a type annotation",
        27 => "a toMap expression",
        _ => "this expression",
    }
}

fn unsupported(value: &Value) -> GroveError {
    let what = match value {
        Value::Text(name) => format!("`{}`", name),
        Value::Integer(_) => "a bound variable".to_string(),
        Value::Array(items) if matches!(items.first(), Some(Value::Text(_))) => {
            "a free variable".to_string()
        }
        _ => "an unrecognised term".to_string(),
    };
    not_normal_form(format!("{} cannot appear in a manifest", what))
}

fn not_normal_form(message: String) -> GroveError {
    GroveError::NotNormalForm { message }
}
