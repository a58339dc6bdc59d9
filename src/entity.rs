//! The contract shared by every record type

use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{FieldError, FieldErrorKind, ValidationError};
use crate::field::{FieldReader, FieldSpec, ParseMode};

/// A fixed-shape record parsed at the system boundary.
///
/// Implementors declare their wire fields and a `read` function; parsing,
/// strict mode and encoding come for free.
pub trait Entity: Serialize + Sized {
    /// Record name as exposed to clients (e.g. `"Patient"`)
    const NAME: &'static str;

    /// Wire fields in declaration order
    const FIELDS: &'static [FieldSpec];

    /// Read every field through `reader`. Must read all fields before
    /// assembling the record so that all errors are collected.
    fn read(reader: &mut FieldReader<'_>) -> Option<Self>;

    fn id(&self) -> Option<&str>;

    fn set_id(&mut self, id: String);

    /// Parse a raw mapping, ignoring unknown fields
    fn parse(input: &Map<String, Value>) -> Result<Self, ValidationError> {
        Self::parse_with(input, ParseMode::Lenient)
    }

    fn parse_with(input: &Map<String, Value>, mode: ParseMode) -> Result<Self, ValidationError> {
        let mut reader = FieldReader::new(Self::NAME, input);
        let record = Self::read(&mut reader);
        if mode == ParseMode::Strict {
            reader.reject_unknown(Self::FIELDS);
        }
        let result = reader.finish(record);
        match &result {
            Ok(_) => tracing::trace!(entity = Self::NAME, "parsed record"),
            Err(e) => tracing::debug!(entity = Self::NAME, errors = e.len(), "record rejected"),
        }
        result
    }

    /// Parse any JSON value; non-objects fail with a root-level error
    fn parse_value(value: &Value, mode: ParseMode) -> Result<Self, ValidationError> {
        match value {
            Value::Object(map) => Self::parse_with(map, mode),
            _ => Err(ValidationError::new(
                Self::NAME,
                vec![FieldError::new("", FieldErrorKind::NotAnObject)],
            )),
        }
    }

    /// Canonical wire form: defaults present, absent optionals omitted
    fn encode(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Assign a fresh identifier if the record has none; returns the id
    fn ensure_id(&mut self) -> &str {
        if self.id().is_none() {
            self.set_id(Uuid::new_v4().to_string());
        }
        self.id().unwrap_or_default()
    }
}
