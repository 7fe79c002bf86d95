//! Doctor model.
//!
//! A doctor is either idle or treating exactly one patient. The single
//! tagged state replaces the `available` flag + nullable patient reference
//! pair such a roster is often modelled with; "available exactly when not
//! holding a patient" is therefore guaranteed by construction instead of
//! re-checked after every scheduler pass.

use serde::{Deserialize, Serialize};

use super::Patient;

/// What a doctor is doing right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoctorState {
    /// Free to receive the next waiting patient.
    Idle,
    /// Treating the patient with this id. The reference is non-owning;
    /// the patient itself lives in the scheduler's patient collection.
    Treating(String),
}

/// A doctor on the roster.
///
/// The roster is static: doctors are created once at startup and never
/// added or removed at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    /// Unique doctor identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Specialty label. Decorative: the scheduler never matches it against
    /// patient needs.
    pub specialty: String,
    /// Current state.
    pub state: DoctorState,
}

impl Doctor {
    /// Creates an idle doctor.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            specialty: String::new(),
            state: DoctorState::Idle,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the specialty label.
    pub fn with_specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialty = specialty.into();
        self
    }

    /// Whether this doctor is idle.
    pub fn is_available(&self) -> bool {
        self.state == DoctorState::Idle
    }

    /// Id of the patient under treatment, if any.
    pub fn current_patient(&self) -> Option<&str> {
        match &self.state {
            DoctorState::Idle => None,
            DoctorState::Treating(id) => Some(id),
        }
    }

    /// Whether this doctor may receive a new assignment.
    ///
    /// Idle doctors are always eligible. A doctor still holding a patient
    /// is eligible only if that patient's remaining time has already
    /// lapsed, or the reference no longer resolves. In normal operation
    /// that branch never fires (completion releases the doctor in the same
    /// pass that zeroes the countdown); it guards against stale state.
    pub fn is_eligible(&self, patients: &[Patient]) -> bool {
        match &self.state {
            DoctorState::Idle => true,
            DoctorState::Treating(id) => patients
                .iter()
                .find(|p| &p.id == id)
                .map(|p| p.remaining_minutes())
                .unwrap_or(0)
                == 0,
        }
    }
}

/// The fixed default roster: three general-practice doctors.
pub fn default_roster() -> Vec<Doctor> {
    vec![
        Doctor::new("1").with_name("Dr. Smith").with_specialty("General"),
        Doctor::new("2")
            .with_name("Dr. Johnson")
            .with_specialty("General"),
        Doctor::new("3")
            .with_name("Dr. Williams")
            .with_specialty("General"),
    ]
}
