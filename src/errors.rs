// src/errors.rs

//! Crate-wide error types.
//!
//! Validation problems of any kind (including malformed JSON) are reported as
//! [`ConfigValidationError`]. Failing to read the config file at all is a
//! separate [`ShiftSyncError::ConfigLoad`], so callers can tell "bad input
//! file" apart from "bad config contents" by matching on the variant.

use thiserror::Error;

use crate::config::fields::FieldKind;

/// A configuration document was readable but not acceptable.
///
/// Every variant carries enough context to render a single message that
/// pinpoints the first offending field by its dotted/bracketed path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("{context} must be an object")]
    NotAnObject { context: String },

    #[error("Missing required field '{field}' in {context}")]
    MissingField { field: String, context: String },

    #[error("Field '{field}' in {context} must be a {kind}")]
    WrongType {
        field: String,
        context: String,
        kind: FieldKind,
    },

    #[error("Invalid value for '{field}'. Must be one of: {}", .allowed.join(", "))]
    InvalidEnum {
        field: String,
        allowed: Vec<&'static str>,
    },

    #[error("Invalid time format for {field}: '{value}' (expected HH:MM)")]
    InvalidTime { field: String, value: String },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid JSON in config file: {0}")]
    InvalidJson(String),

    /// Typed conversion failed on a document that passed validation.
    ///
    /// Every member the typed model reads is checked by the validator first
    /// (employees and calendar members are kept as raw JSON), so a validated
    /// document always converts and this variant is not produced.
    #[error("Config does not match the expected shape: {0}")]
    Shape(String),
}

impl ConfigValidationError {
    /// Enum membership failures.
    pub fn is_enum(&self) -> bool {
        matches!(self, ConfigValidationError::InvalidEnum { .. })
    }

    /// Everything that is not an enum failure: missing or mistyped fields,
    /// malformed times, unknown timezones and unparsable JSON.
    pub fn is_structural(&self) -> bool {
        !self.is_enum()
    }
}

#[derive(Error, Debug)]
pub enum ShiftSyncError {
    #[error(transparent)]
    ConfigValidation(#[from] ConfigValidationError),

    #[error("Failed to load config file: {0}")]
    ConfigLoad(String),
}

impl ShiftSyncError {
    /// The validation error, if this failure was about config contents.
    pub fn as_validation(&self) -> Option<&ConfigValidationError> {
        match self {
            ShiftSyncError::ConfigValidation(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ShiftSyncError>;
