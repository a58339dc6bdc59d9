//! Error types for record parsing and the schema registry

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Schema registry errors
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),
}

/// Why a single field was rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum FieldErrorKind {
    /// Required field absent or null
    Missing,
    /// Value has the wrong JSON type
    WrongType { expected: &'static str },
    InvalidEmail,
    InvalidDate,
    InvalidNumber,
    /// Field not declared by the record (strict mode only)
    UnknownField,
    /// The payload itself is not a JSON object
    NotAnObject,
}

impl fmt::Display for FieldErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldErrorKind::Missing => write!(f, "field required"),
            FieldErrorKind::WrongType { expected } => write!(f, "expected {}", expected),
            FieldErrorKind::InvalidEmail => write!(f, "not a valid email address"),
            FieldErrorKind::InvalidDate => write!(f, "not a valid calendar date (YYYY-MM-DD)"),
            FieldErrorKind::InvalidNumber => write!(f, "not a valid number"),
            FieldErrorKind::UnknownField => write!(f, "unknown field"),
            FieldErrorKind::NotAnObject => write!(f, "expected a JSON object"),
        }
    }
}

/// A rejected field and the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Wire name of the field; list elements are reported as `name[index]`,
    /// the payload root as an empty string
    pub field: String,
    #[serde(flatten)]
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(field: impl Into<String>, kind: FieldErrorKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.field, self.kind)
        }
    }
}

/// Every field of a payload that failed its declared type, presence or format
/// constraint. Never empty when returned from a parse.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{entity} failed validation: {}", summarize(.errors))]
pub struct ValidationError {
    pub entity: &'static str,
    pub errors: Vec<FieldError>,
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn new(entity: &'static str, errors: Vec<FieldError>) -> Self {
        Self { entity, errors }
    }

    /// Names of the offending fields, in report order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.field.as_str())
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields().any(|f| f == field)
    }

    /// The first reported problem for `field`
    pub fn kind_of(&self, field: &str) -> Option<&FieldErrorKind> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| &e.kind)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}
