//! Record definitions
//!
//! Cross-record relations are soft references: `Appointment`, `Treatment`
//! and `Report` name a patient and a doctor by identifier, `Doctor` names its
//! clinic, `TreatmentPlan` names a patient and a clinic. Nothing here checks
//! that the referenced records exist.

pub mod appointment;
pub mod clinic;
pub mod doctor;
pub mod patient;
pub mod report;
pub mod treatment;
pub mod treatment_plan;
pub mod user;

pub use appointment::Appointment;
pub use clinic::Clinic;
pub use doctor::Doctor;
pub use patient::Patient;
pub use report::Report;
pub use treatment::Treatment;
pub use treatment_plan::TreatmentPlan;
pub use user::User;

#[cfg(test)]
pub(crate) fn object(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}
