//! Clinic domain models.
//!
//! Two entity kinds only: patients flowing through the queue and a static
//! roster of doctors. A doctor's link to its patient is a non-owning id
//! reference; a patient's assignment is implicit (found by scanning the
//! roster), never stored on the patient.

mod doctor;
mod intake;
mod patient;

pub use doctor::{default_roster, Doctor, DoctorState};
pub use intake::{
    fresh_patient_id, parse_duration_minutes, parse_duration_minutes_or,
    DEFAULT_ESTIMATED_MINUTES,
};
pub use patient::{Patient, PatientStatus};
