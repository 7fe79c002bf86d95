//! Read-only board rows derived from current state.
//!
//! Pure projection, no mutation: the doctor board shows each doctor with an
//! availability label and the name of the patient under treatment; the
//! queue board lists non-completed patients with arrival time, status
//! label, and remaining minutes. A patient reference that does not resolve
//! renders blank rather than failing.

use serde::Serialize;

use crate::scheduler::QueueScheduler;

/// One line of the doctor board.
#[derive(Debug, Clone, Serialize)]
pub struct DoctorRow {
    /// Doctor display name.
    pub name: String,
    /// Specialty label.
    pub specialty: String,
    /// "Available" or "Busy".
    pub status: &'static str,
    /// Name of the patient under treatment, if the reference resolves.
    pub current_patient: Option<String>,
}

/// One line of the patient queue board.
#[derive(Debug, Clone, Serialize)]
pub struct QueueRow {
    /// Patient name.
    pub name: String,
    /// Arrival time, formatted `HH:MM:SS`.
    pub waiting_since: String,
    /// "Waiting" or "In Progress".
    pub status: &'static str,
    /// Minutes of treatment remaining (full estimate while waiting).
    pub remaining_minutes: u32,
}

/// Builds the doctor board in roster order.
pub fn doctor_board(scheduler: &QueueScheduler) -> Vec<DoctorRow> {
    scheduler
        .doctors()
        .iter()
        .map(|d| DoctorRow {
            name: d.name.clone(),
            specialty: d.specialty.clone(),
            status: if d.is_available() { "Available" } else { "Busy" },
            current_patient: d
                .current_patient()
                .and_then(|id| scheduler.find_patient(id))
                .map(|p| p.name.clone()),
        })
        .collect()
}

/// Builds the queue board: non-completed patients in arrival order.
pub fn queue_board(scheduler: &QueueScheduler) -> Vec<QueueRow> {
    scheduler
        .patients()
        .iter()
        .filter(|p| !p.is_completed())
        .map(|p| QueueRow {
            name: p.name.clone(),
            waiting_since: p.arrival.format("%H:%M:%S").to_string(),
            status: if p.is_waiting() { "Waiting" } else { "In Progress" },
            remaining_minutes: p.remaining_minutes(),
        })
        .collect()
}
