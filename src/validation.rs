//! Roster integrity checks.
//!
//! Verifies the structural invariants the scheduler is supposed to keep:
//! - No duplicate patient or doctor IDs
//! - Every doctor's patient reference resolves
//! - No two doctors treat the same patient (double booking)
//! - No doctor holds a patient whose treatment already completed
//!
//! The scheduler never produces these states on its own; the checks exist
//! for tests and for callers that build rosters by hand.

use std::collections::HashSet;

use crate::models::{Doctor, DoctorState, Patient};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A doctor references a patient that doesn't exist.
    UnknownPatientReference,
    /// Two doctors reference the same patient.
    DoubleBooking,
    /// A doctor holds a patient whose treatment has completed.
    TreatingCompletedPatient,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates patient and doctor collections.
///
/// Returns `Ok(())` if all checks pass, `Err(errors)` with every detected
/// issue otherwise.
pub fn validate_roster(patients: &[Patient], doctors: &[Doctor]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut patient_ids = HashSet::new();
    for p in patients {
        if !patient_ids.insert(p.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate patient ID: {}", p.id),
            ));
        }
    }

    let mut doctor_ids = HashSet::new();
    let mut treated = HashSet::new();
    for d in doctors {
        if !doctor_ids.insert(d.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate doctor ID: {}", d.id),
            ));
        }

        if let DoctorState::Treating(patient_id) = &d.state {
            if !treated.insert(patient_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DoubleBooking,
                    format!("Patient '{patient_id}' is held by more than one doctor"),
                ));
            }

            match patients.iter().find(|p| &p.id == patient_id) {
                None => errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownPatientReference,
                    format!("Doctor '{}' references unknown patient '{patient_id}'", d.id),
                )),
                Some(p) if p.is_completed() => errors.push(ValidationError::new(
                    ValidationErrorKind::TreatingCompletedPatient,
                    format!(
                        "Doctor '{}' still holds completed patient '{patient_id}'",
                        d.id
                    ),
                )),
                Some(_) => {}
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
