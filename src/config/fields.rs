// src/config/fields.rs

//! Leaf validation primitives shared by the config validator.
//!
//! - [`validate_fields`]: object shape + required fields with coarse kinds.
//! - [`validate_enum`]: membership in a fixed set of string literals.
//!
//! Both stop at the first violation and never recurse; callers re-invoke them
//! on nested values explicitly.

use std::fmt;
use std::sync::LazyLock;

use serde_json::{Map, Value};

use crate::errors::ConfigValidationError;
use crate::types::Policy;

type Result<T> = std::result::Result<T, ConfigValidationError>;

/// Arrays pass the object precondition as objects without members.
static NO_MEMBERS: LazyLock<Map<String, Value>> = LazyLock::new(Map::new);

/// Coarse JSON kind a required field must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Array,
    /// A JSON object (never an array, never `null`).
    Object,
}

impl FieldKind {
    pub fn matches(self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Array => value.is_array(),
            FieldKind::Object => value.is_object(),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldKind::String => "string",
            FieldKind::Array => "array",
            FieldKind::Object => "object",
        };
        f.write_str(s)
    }
}

/// An object that passed [`validate_fields`].
///
/// The typed getters narrow one member at a time. Asking for a member or kind
/// that was not declared reports the same error `validate_fields` would have.
#[derive(Debug, Clone)]
pub struct CheckedObject<'a> {
    map: &'a Map<String, Value>,
    context: String,
}

impl<'a> CheckedObject<'a> {
    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn as_map(&self) -> &'a Map<String, Value> {
        self.map
    }

    pub fn get(&self, field: &str) -> Result<&'a Value> {
        self.map
            .get(field)
            .ok_or_else(|| ConfigValidationError::MissingField {
                field: field.to_string(),
                context: self.context.clone(),
            })
    }

    pub fn str(&self, field: &str) -> Result<&'a str> {
        self.get(field)?
            .as_str()
            .ok_or_else(|| self.wrong_type(field, FieldKind::String))
    }

    pub fn array(&self, field: &str) -> Result<&'a [Value]> {
        self.get(field)?
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| self.wrong_type(field, FieldKind::Array))
    }

    pub fn object(&self, field: &str) -> Result<&'a Map<String, Value>> {
        self.get(field)?
            .as_object()
            .ok_or_else(|| self.wrong_type(field, FieldKind::Object))
    }

    fn wrong_type(&self, field: &str, kind: FieldKind) -> ConfigValidationError {
        ConfigValidationError::WrongType {
            field: field.to_string(),
            context: self.context.clone(),
            kind,
        }
    }
}

/// Check that `value` is an object carrying every field in `fields` with the
/// declared kind, in declaration order.
///
/// `context` is the position of `value` in the document (e.g.
/// `"shifts.M.period"`) and only appears in error messages. `null` and
/// scalars fail the object precondition; an array passes it with no members,
/// so its first declared field is reported missing.
pub fn validate_fields<'a>(
    value: &'a Value,
    fields: &[(&str, FieldKind)],
    context: &str,
) -> Result<CheckedObject<'a>> {
    let map = match value {
        Value::Object(map) => map,
        Value::Array(_) => &*NO_MEMBERS,
        _ => {
            return Err(ConfigValidationError::NotAnObject {
                context: context.to_string(),
            });
        }
    };

    let checked = CheckedObject {
        map,
        context: context.to_string(),
    };

    for &(field, kind) in fields {
        let v = checked.get(field)?;
        if !kind.matches(v) {
            return Err(checked.wrong_type(field, kind));
        }
    }

    Ok(checked)
}

/// Check that `value` is a string equal to one of `allowed`.
///
/// Comparison is exact and case-sensitive.
pub fn validate_enum<'a>(
    value: &'a Value,
    allowed: &[&'static str],
    field: &str,
) -> Result<&'a str> {
    match value.as_str() {
        Some(s) if allowed.contains(&s) => Ok(s),
        _ => Err(ConfigValidationError::InvalidEnum {
            field: field.to_string(),
            allowed: allowed.to_vec(),
        }),
    }
}

/// [`validate_enum`] against a policy's literal set, returning the typed value.
pub fn validate_policy<P: Policy>(value: &Value, field: &str) -> Result<P> {
    let literal = validate_enum(value, P::ALLOWED, field)?;
    // `ALLOWED` and `from_literal` are generated from the same table.
    P::from_literal(literal).ok_or_else(|| ConfigValidationError::InvalidEnum {
        field: field.to_string(),
        allowed: P::ALLOWED.to_vec(),
    })
}
