//! Type inference and annotation checking for normal-form values.
//!
//! `infer` answers "what type does this value have"; `check` answers "does
//! this value fit the annotation `expr : ty`". Checking is the more lenient of
//! the two: an unannotated `[]` or `None` cannot be inferred on its own but
//! fits any list or optional type.

use super::{Expr, Type};
use thiserror::Error;

/// Failure to type a normal-form value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("An empty list requires a type annotation")]
    EmptyListNeedsAnnotation,

    #[error("An empty optional requires a type annotation")]
    NoneNeedsAnnotation,

    #[error("List elements should all have the same type: expected {expected}, found {found}")]
    HeterogeneousList { expected: Type, found: Type },

    #[error("Expression doesn't match annotation: expected {expected}, found {found}")]
    Mismatch { expected: Type, found: Type },

    #[error("Missing record field `{field}` of type {expected}")]
    MissingField { field: String, expected: Type },

    #[error("Unexpected record field `{field}`")]
    UnexpectedField { field: String },

    #[error("`{alternative}` is not a valid alternative of {union}")]
    InvalidAlternative { alternative: String, union: Type },
}

/// Infer the type of a normal-form value
pub fn infer(expr: &Expr) -> Result<Type, TypeError> {
    match expr {
        Expr::Bool(_) => Ok(Type::Bool),
        Expr::Natural(_) => Ok(Type::Natural),
        Expr::Integer(_) => Ok(Type::Integer),
        Expr::Double(_) => Ok(Type::Double),
        Expr::Text(_) => Ok(Type::Text),
        Expr::List {
            items,
            annotation: Some(element),
        } => {
            for item in items {
                check(item, element)?;
            }
            Ok(Type::list(element.clone()))
        }
        Expr::List {
            items,
            annotation: None,
        } => {
            let element = infer_element(items)?;
            for item in items {
                if let Err(err) = check(item, &element) {
                    return Err(match infer(item) {
                        Ok(found) if found != element => TypeError::HeterogeneousList {
                            expected: element,
                            found,
                        },
                        _ => err,
                    });
                }
            }
            Ok(Type::list(element))
        }
        Expr::Some(inner) => Ok(Type::optional(infer(inner)?)),
        Expr::None(Some(element)) => Ok(Type::optional(element.clone())),
        Expr::None(None) => Err(TypeError::NoneNeedsAnnotation),
        Expr::Record(fields) => {
            let types = fields
                .iter()
                .map(|(label, value)| Ok((label.clone(), infer(value)?)))
                .collect::<Result<_, TypeError>>()?;
            Ok(Type::Record(types))
        }
        Expr::Union {
            alternatives,
            alternative,
            payload,
        } => {
            match (alternatives.get(alternative), payload) {
                (Some(None), None) => {}
                (Some(Some(ty)), Some(value)) => check(value, ty)?,
                _ => {
                    return Err(TypeError::InvalidAlternative {
                        alternative: alternative.clone(),
                        union: Type::Union(alternatives.clone()),
                    })
                }
            }
            Ok(Type::Union(alternatives.clone()))
        }
    }
}

/// Check `expr : expected`
pub fn check(expr: &Expr, expected: &Type) -> Result<(), TypeError> {
    match (expr, expected) {
        (Expr::Record(fields), Type::Record(field_types)) => {
            for (label, ty) in field_types {
                match fields.get(label) {
                    Some(value) => check(value, ty)?,
                    None => {
                        return Err(TypeError::MissingField {
                            field: label.clone(),
                            expected: ty.clone(),
                        })
                    }
                }
            }
            match fields.keys().find(|label| !field_types.contains_key(*label)) {
                Some(label) => Err(TypeError::UnexpectedField {
                    field: label.clone(),
                }),
                None => Ok(()),
            }
        }
        (Expr::List { items, annotation }, Type::List(element)) => {
            if let Some(annotated) = annotation {
                if annotated != element.as_ref() {
                    return Err(TypeError::Mismatch {
                        expected: expected.clone(),
                        found: Type::list(annotated.clone()),
                    });
                }
            }
            items.iter().try_for_each(|item| check(item, element))
        }
        (Expr::Some(inner), Type::Optional(element)) => check(inner, element),
        (Expr::None(Some(annotated)), Type::Optional(element)) if annotated != element.as_ref() => {
            Err(TypeError::Mismatch {
                expected: expected.clone(),
                found: Type::optional(annotated.clone()),
            })
        }
        (Expr::None(_), Type::Optional(_)) => Ok(()),
        _ => {
            let found = infer(expr)?;
            if &found == expected {
                Ok(())
            } else {
                Err(TypeError::Mismatch {
                    expected: expected.clone(),
                    found,
                })
            }
        }
    }
}

/// Element type of an unannotated list, taken from the first element that can be inferred
fn infer_element(items: &[Expr]) -> Result<Type, TypeError> {
    let mut first_error = None;
    for item in items {
        match infer(item) {
            Ok(ty) => return Ok(ty),
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
    }
    Err(first_error.unwrap_or(TypeError::EmptyListNeedsAnnotation))
}
