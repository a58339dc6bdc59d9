//! Dento Schema Registry
//!
//! Record definitions for the Dento dental practice backend and the boundary
//! validation that turns raw JSON payloads into typed records.
//!
//! ## Features
//!
//! - **Typed Records**: User, Patient, Doctor, Appointment, Clinic, Treatment,
//!   Report and TreatmentPlan, with wire field names preserved
//! - **Complete Error Reports**: a failed parse lists every offending field
//! - **Strict Mode**: optionally reject fields a record does not declare
//! - **Published Contract**: JSON Schema export with SHA256 checksums
//!
//! ## Example
//!
//! ```
//! use dento_schemas::{Entity, Patient};
//! use serde_json::json;
//!
//! let input = json!({"name": "Jane", "dob": "2020-01-01", "gender": "F"});
//! let patient = Patient::parse(input.as_object().unwrap()).unwrap();
//! assert!(patient.medical_history.is_empty());
//! ```

pub mod checksum;
pub mod config;
pub mod entities;
pub mod entity;
pub mod error;
pub mod field;
pub mod registry;
pub mod schema;
pub mod validate;

pub use checksum::Checksum;
pub use config::{OutputFormat, RegistryConfig};
pub use entities::{Appointment, Clinic, Doctor, Patient, Report, Treatment, TreatmentPlan, User};
pub use entity::Entity;
pub use error::{FieldError, FieldErrorKind, Result, SchemaError, ValidationError};
pub use field::{FieldSpec, FieldType, ParseMode};
pub use registry::{RegistryManifest, SchemaRegistry};
pub use schema::{EntityKind, Record};
