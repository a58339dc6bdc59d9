//! Field descriptors and the error-accumulating field reader
//!
//! Every record declares its wire fields once as a `&'static [FieldSpec]`.
//! The descriptors drive JSON Schema export and strict-mode unknown field
//! detection; the typed reads in each record's parser go through
//! [`FieldReader`], which records a [`FieldError`] for every bad field and
//! keeps going so that one parse reports all of them.

use chrono::NaiveDate;
use serde_json::{Map, Number, Value};

use crate::error::{FieldError, FieldErrorKind, ValidationError};
use crate::validate;

/// Semantic type of a field on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    /// String holding a syntactically valid email address
    Email,
    /// Calendar date, `YYYY-MM-DD`
    Date,
    Number,
    /// Ordered sequence of strings
    StringList,
}

impl FieldType {
    /// JSON Schema `type` keyword
    pub fn json_type(&self) -> &'static str {
        match self {
            FieldType::String | FieldType::Email | FieldType::Date => "string",
            FieldType::Number => "number",
            FieldType::StringList => "array",
        }
    }

    /// JSON Schema `format` keyword, if any
    pub fn format(&self) -> Option<&'static str> {
        match self {
            FieldType::Email => Some("email"),
            FieldType::Date => Some("date"),
            _ => None,
        }
    }

    /// Short name used in field summaries and type errors
    pub fn describe(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Email => "email",
            FieldType::Date => "date",
            FieldType::Number => "number",
            FieldType::StringList => "array of strings",
        }
    }
}

/// Value taken by a defaulted field when it is absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Str(&'static str),
    EmptyList,
}

impl FieldDefault {
    pub fn to_json(&self) -> Value {
        match self {
            FieldDefault::Str(s) => Value::String((*s).to_string()),
            FieldDefault::EmptyList => Value::Array(Vec::new()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
    Default(FieldDefault),
}

/// Declaration of one wire field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
    pub presence: Presence,
}

impl FieldSpec {
    pub const fn required(name: &'static str, ty: FieldType) -> Self {
        Self { name, ty, presence: Presence::Required }
    }

    pub const fn optional(name: &'static str, ty: FieldType) -> Self {
        Self { name, ty, presence: Presence::Optional }
    }

    pub const fn defaulted(name: &'static str, ty: FieldType, default: FieldDefault) -> Self {
        Self { name, ty, presence: Presence::Default(default) }
    }

    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }

    pub fn default_value(&self) -> Option<Value> {
        match self.presence {
            Presence::Default(d) => Some(d.to_json()),
            _ => None,
        }
    }

    /// One-line summary, e.g. `email: email?`
    pub fn summary(&self) -> String {
        match self.presence {
            Presence::Required => format!("{}: {}", self.name, self.ty.describe()),
            Presence::Optional => format!("{}: {}?", self.name, self.ty.describe()),
            Presence::Default(d) => format!("{}: {} = {}", self.name, self.ty.describe(), d.to_json()),
        }
    }
}

/// How unknown fields in a payload are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Unknown fields are ignored
    #[default]
    Lenient,
    /// Unknown fields are reported as errors
    Strict,
}

/// Reads typed fields out of a raw JSON mapping, collecting errors.
///
/// Readers return `None` both for an absent optional field and for a field
/// that failed; in the latter case an error has been recorded and
/// [`FieldReader::finish`] will fail.
pub struct FieldReader<'a> {
    entity: &'static str,
    input: &'a Map<String, Value>,
    errors: Vec<FieldError>,
}

impl<'a> FieldReader<'a> {
    pub fn new(entity: &'static str, input: &'a Map<String, Value>) -> Self {
        Self {
            entity,
            input,
            errors: Vec::new(),
        }
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Absent and `null` are the same thing at this layer
    fn lookup(&self, name: &str) -> Option<&'a Value> {
        self.input.get(name).filter(|v| !v.is_null())
    }

    fn reject(&mut self, name: &str, kind: FieldErrorKind) {
        self.errors.push(FieldError::new(name, kind));
    }

    fn missing<T>(&mut self, name: &str) -> Option<T> {
        self.reject(name, FieldErrorKind::Missing);
        None
    }

    fn read_string(&mut self, name: &str, value: &'a Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => {
                self.reject(name, FieldErrorKind::WrongType { expected: "string" });
                None
            }
        }
    }

    fn read_email(&mut self, name: &str, value: &'a Value) -> Option<String> {
        let s = self.read_string(name, value)?;
        if validate::is_valid_email(&s) {
            Some(s)
        } else {
            self.reject(name, FieldErrorKind::InvalidEmail);
            None
        }
    }

    fn read_date(&mut self, name: &str, value: &'a Value) -> Option<NaiveDate> {
        match value {
            Value::String(s) => {
                let date = validate::parse_date(s);
                if date.is_none() {
                    self.reject(name, FieldErrorKind::InvalidDate);
                }
                date
            }
            _ => {
                self.reject(name, FieldErrorKind::WrongType { expected: "date string" });
                None
            }
        }
    }

    fn read_number(&mut self, name: &str, value: &'a Value) -> Option<Number> {
        let number = match value {
            Value::Number(n) => Some(n.clone()),
            Value::String(s) => validate::parse_number(s),
            _ => {
                self.reject(name, FieldErrorKind::WrongType { expected: "number" });
                return None;
            }
        };
        if number.is_none() {
            self.reject(name, FieldErrorKind::InvalidNumber);
        }
        number
    }

    pub fn required_string(&mut self, name: &str) -> Option<String> {
        match self.lookup(name) {
            Some(v) => self.read_string(name, v),
            None => self.missing(name),
        }
    }

    pub fn optional_string(&mut self, name: &str) -> Option<String> {
        let v = self.lookup(name)?;
        self.read_string(name, v)
    }

    /// String field that falls back to `default` when absent
    pub fn string_or(&mut self, name: &str, default: &str) -> Option<String> {
        match self.lookup(name) {
            Some(v) => self.read_string(name, v),
            None => Some(default.to_string()),
        }
    }

    pub fn required_email(&mut self, name: &str) -> Option<String> {
        match self.lookup(name) {
            Some(v) => self.read_email(name, v),
            None => self.missing(name),
        }
    }

    pub fn optional_email(&mut self, name: &str) -> Option<String> {
        let v = self.lookup(name)?;
        self.read_email(name, v)
    }

    pub fn required_date(&mut self, name: &str) -> Option<NaiveDate> {
        match self.lookup(name) {
            Some(v) => self.read_date(name, v),
            None => self.missing(name),
        }
    }

    pub fn optional_date(&mut self, name: &str) -> Option<NaiveDate> {
        let v = self.lookup(name)?;
        self.read_date(name, v)
    }

    /// Numbers keep their JSON representation; integers stay integers
    pub fn optional_number(&mut self, name: &str) -> Option<Number> {
        let v = self.lookup(name)?;
        self.read_number(name, v)
    }

    /// List of strings, empty when absent. Each non-string element is
    /// reported as `name[index]`.
    pub fn string_list(&mut self, name: &str) -> Option<Vec<String>> {
        let Some(value) = self.lookup(name) else {
            return Some(Vec::new());
        };
        let Value::Array(items) = value else {
            self.reject(name, FieldErrorKind::WrongType { expected: "array of strings" });
            return None;
        };
        let before = self.errors.len();
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            match item {
                Value::String(s) => out.push(s.clone()),
                _ => self.reject(&format!("{}[{}]", name, i), FieldErrorKind::WrongType { expected: "string" }),
            }
        }
        (self.errors.len() == before).then_some(out)
    }

    /// Report every input key that is not one of `fields`
    pub fn reject_unknown(&mut self, fields: &[FieldSpec]) {
        let unknown: Vec<String> = self
            .input
            .keys()
            .filter(|k| !fields.iter().any(|f| f.name == k.as_str()))
            .cloned()
            .collect();
        for key in unknown {
            self.reject(&key, FieldErrorKind::UnknownField);
        }
    }

    /// Turn the read result into the parse outcome
    pub fn finish<T>(self, record: Option<T>) -> Result<T, ValidationError> {
        match record {
            Some(record) if self.errors.is_empty() => Ok(record),
            _ => Err(ValidationError::new(self.entity, self.errors)),
        }
    }
}
