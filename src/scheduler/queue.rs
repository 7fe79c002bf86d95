//! Fixed-tick queue scheduler.
//!
//! # Algorithm (per tick)
//!
//! 1. Collect eligible doctors in roster order: idle, or holding a patient
//!    whose remaining time has already lapsed (stale-state guard).
//! 2. Order the waiting list by the configured discipline (FIFO by default)
//!    and zip it against the eligible doctors; each pair becomes an
//!    assignment. Whichever side runs out first ends the loop.
//! 3. Decrement every in-progress patient by one minute, excluding patients
//!    assigned in step 2; a patient reaching zero becomes completed and its
//!    doctor is released within the same pass.
//!
//! Steps 1-2 see the state captured at the start of the tick, so a patient
//! assigned this tick keeps its full estimate until the next tick: the
//! first in-progress tick costs zero progress. That is the simulated
//! system's observable behavior and is pinned by test.
//!
//! # Complexity
//! O(p * d) per tick where p=patients, d=doctors (id lookups scan).

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::dispatching::{Fifo, QueueDiscipline};
use crate::models::{
    fresh_patient_id, parse_duration_minutes_or, Doctor, DoctorState, Patient, PatientStatus,
    DEFAULT_ESTIMATED_MINUTES,
};

/// Scheduler tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Treatment estimate used when intake gives none (minutes).
    pub default_estimated_minutes: u32,
    /// Round-robin time quantum (minutes). Declared by the simulated
    /// system but never applied: treatment runs to completion without
    /// preemption. Kept as configuration for fidelity.
    pub time_quantum_minutes: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            default_estimated_minutes: DEFAULT_ESTIMATED_MINUTES,
            time_quantum_minutes: 10,
        }
    }
}

/// What one tick did.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickReport {
    /// Tick number (1-based, counted from scheduler creation).
    pub tick: u64,
    /// Assignments made this tick: `(doctor_id, patient_id)`.
    pub assigned: Vec<(String, String)>,
    /// Patients whose treatment completed this tick.
    pub completed: Vec<String>,
    /// Patients still waiting after the pass.
    pub waiting_after: usize,
    /// Patients in treatment after the pass.
    pub in_progress_after: usize,
}

impl TickReport {
    /// Whether the tick changed nothing worth reporting.
    pub fn is_quiet(&self) -> bool {
        self.assigned.is_empty() && self.completed.is_empty()
    }
}

/// The queue scheduler: single owner of the patient and doctor collections.
///
/// `submit_patient` and `advance_tick` are the only mutating entry points.
/// The scheduler itself is single-threaded; callers that need a wall-clock
/// cadence wrap it in [`crate::clock::TickDriver`], which serializes both
/// entry points behind one mutex. `advance_tick` is independently callable,
/// so tests drive simulated time directly.
///
/// # Example
///
/// ```
/// use clinic_queue::models::default_roster;
/// use clinic_queue::scheduler::QueueScheduler;
///
/// let mut scheduler = QueueScheduler::new(default_roster());
/// let id = scheduler.submit_patient("Alice", 2).unwrap();
///
/// let report = scheduler.advance_tick();
/// assert_eq!(report.assigned, vec![("1".to_string(), id)]);
/// ```
#[derive(Debug, Clone)]
pub struct QueueScheduler {
    patients: Vec<Patient>,
    doctors: Vec<Doctor>,
    config: SchedulerConfig,
    discipline: Arc<dyn QueueDiscipline>,
    tick: u64,
}

impl QueueScheduler {
    /// Creates a scheduler over the given roster with FIFO dispatch.
    pub fn new(doctors: Vec<Doctor>) -> Self {
        Self {
            patients: Vec::new(),
            doctors,
            config: SchedulerConfig::default(),
            discipline: Arc::new(Fifo),
            tick: 0,
        }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the waiting-list discipline.
    pub fn with_discipline<D: QueueDiscipline + 'static>(mut self, discipline: D) -> Self {
        self.discipline = Arc::new(discipline);
        self
    }

    /// All patients, in arrival order (completed patients included).
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    /// The doctor roster, in fixed order.
    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    /// Number of ticks processed so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Current configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Looks up a patient by id.
    pub fn find_patient(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    /// Registers a new waiting patient and returns its id.
    ///
    /// An empty (after trim) name is silently ignored and yields `None`;
    /// no error is surfaced. The arrival time is stamped with the current
    /// wall clock. There is no duplicate-name check and no capacity limit.
    pub fn submit_patient(&mut self, name: &str, estimated_minutes: u32) -> Option<String> {
        let name = name.trim();
        if name.is_empty() {
            log::debug!("ignoring intake with empty name");
            return None;
        }
        let patient = Patient::new(fresh_patient_id(), name, estimated_minutes, Local::now());
        let id = patient.id.clone();
        log::info!("intake: {name} ({estimated_minutes} min) -> {id}");
        self.patients.push(patient);
        Some(id)
    }

    /// Registers a patient from raw intake form fields.
    ///
    /// The duration field is coerced: non-numeric, zero, or negative input
    /// falls back to the configured default.
    pub fn submit_intake(&mut self, name: &str, raw_duration: &str) -> Option<String> {
        let minutes =
            parse_duration_minutes_or(raw_duration, self.config.default_estimated_minutes);
        self.submit_patient(name, minutes)
    }

    /// Adds a pre-built patient as-is. Intended for tests and replay.
    pub fn admit(&mut self, patient: Patient) {
        self.patients.push(patient);
    }

    /// Runs one scheduling pass over the current state.
    pub fn advance_tick(&mut self) -> TickReport {
        self.tick += 1;
        let mut report = TickReport {
            tick: self.tick,
            ..TickReport::default()
        };

        // Eligibility and waiting list are both derived from the state at
        // the start of the tick.
        let eligible: Vec<usize> = self
            .doctors
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_eligible(&self.patients))
            .map(|(i, _)| i)
            .collect();

        let waiting: Vec<usize> = self
            .patients
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_waiting())
            .map(|(i, _)| i)
            .collect();
        let waiting_refs: Vec<&Patient> = waiting.iter().map(|&i| &self.patients[i]).collect();
        let order = self.discipline.order(&waiting_refs);

        // Assignment: eligible doctors in roster order, waiting patients in
        // discipline order, one each until either side runs out.
        let mut assigned_now: HashSet<String> = HashSet::new();
        for (&doctor_idx, &pos) in eligible.iter().zip(order.iter()) {
            let patient_idx = waiting[pos];
            let patient_id = self.patients[patient_idx].id.clone();
            let estimate = self.patients[patient_idx].estimated_minutes;

            self.patients[patient_idx].status = PatientStatus::InProgress {
                remaining_minutes: estimate,
            };
            self.doctors[doctor_idx].state = DoctorState::Treating(patient_id.clone());

            log::debug!(
                "tick {}: assigned patient {} to doctor {}",
                self.tick,
                patient_id,
                self.doctors[doctor_idx].id
            );
            report
                .assigned
                .push((self.doctors[doctor_idx].id.clone(), patient_id.clone()));
            assigned_now.insert(patient_id);
        }

        // Progress: decrement everyone in treatment, except patients that
        // entered treatment within this same tick. Completion releases the
        // treating doctor immediately.
        for i in 0..self.patients.len() {
            if assigned_now.contains(&self.patients[i].id) {
                continue;
            }
            if let PatientStatus::InProgress { remaining_minutes } = self.patients[i].status {
                let left = remaining_minutes.saturating_sub(1);
                if left == 0 {
                    let id = self.patients[i].id.clone();
                    self.patients[i].status = PatientStatus::Completed;
                    for doctor in &mut self.doctors {
                        if doctor.current_patient() == Some(id.as_str()) {
                            doctor.state = DoctorState::Idle;
                        }
                    }
                    log::debug!("tick {}: patient {} completed", self.tick, id);
                    report.completed.push(id);
                } else {
                    self.patients[i].status = PatientStatus::InProgress {
                        remaining_minutes: left,
                    };
                }
            }
        }

        report.waiting_after = self.patients.iter().filter(|p| p.is_waiting()).count();
        report.in_progress_after = self
            .patients
            .iter()
            .filter(|p| matches!(p.status, PatientStatus::InProgress { .. }))
            .count();
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::PriorityFirst;
    use crate::models::default_roster;
    use crate::validation::validate_roster;

    fn make_scheduler() -> QueueScheduler {
        QueueScheduler::new(default_roster())
    }

    fn admit_named(scheduler: &mut QueueScheduler, id: &str, minutes: u32) {
        scheduler.admit(Patient::new(id, id, minutes, Local::now()));
    }

    fn status_of<'a>(scheduler: &'a QueueScheduler, id: &str) -> &'a PatientStatus {
        &scheduler.find_patient(id).unwrap().status
    }

    #[test]
    fn test_empty_tick_is_noop() {
        let mut scheduler = make_scheduler();
        let report = scheduler.advance_tick();
        assert!(report.is_quiet());
        assert_eq!(report.waiting_after, 0);
        assert!(scheduler.doctors().iter().all(|d| d.is_available()));
    }

    #[test]
    fn test_submit_patient_appends_waiting() {
        let mut scheduler = make_scheduler();
        let id = scheduler.submit_patient("Alice", 20).unwrap();
        let p = scheduler.find_patient(&id).unwrap();
        assert!(p.is_waiting());
        assert_eq!(p.estimated_minutes, 20);
        assert_eq!(p.name, "Alice");
    }

    #[test]
    fn test_empty_name_silently_ignored() {
        let mut scheduler = make_scheduler();
        assert!(scheduler.submit_patient("", 10).is_none());
        assert!(scheduler.submit_patient("   ", 10).is_none());
        assert!(scheduler.patients().is_empty());
    }

    #[test]
    fn test_intake_duration_coercion() {
        let mut scheduler = make_scheduler();
        let id = scheduler.submit_intake("Bob", "not a number").unwrap();
        assert_eq!(scheduler.find_patient(&id).unwrap().estimated_minutes, 15);

        let id = scheduler.submit_intake("Carol", "0").unwrap();
        assert_eq!(scheduler.find_patient(&id).unwrap().estimated_minutes, 15);

        let id = scheduler.submit_intake("Dave", "25").unwrap();
        assert_eq!(scheduler.find_patient(&id).unwrap().estimated_minutes, 25);
    }

    #[test]
    fn test_alice_scenario() {
        // Three idle doctors, Alice with a 2-minute estimate.
        let mut scheduler = make_scheduler();
        admit_named(&mut scheduler, "alice", 2);

        // Tick 1: assigned to doctor 1, estimate untouched (the first
        // in-progress tick costs zero progress).
        let report = scheduler.advance_tick();
        assert_eq!(report.assigned, vec![("1".into(), "alice".into())]);
        assert_eq!(
            *status_of(&scheduler, "alice"),
            PatientStatus::InProgress {
                remaining_minutes: 2
            }
        );
        assert!(!scheduler.doctors()[0].is_available());

        // Tick 2: 2 -> 1.
        scheduler.advance_tick();
        assert_eq!(
            *status_of(&scheduler, "alice"),
            PatientStatus::InProgress {
                remaining_minutes: 1
            }
        );

        // Tick 3: 1 -> 0, completed, doctor released in the same tick.
        let report = scheduler.advance_tick();
        assert_eq!(report.completed, vec!["alice".to_string()]);
        assert_eq!(*status_of(&scheduler, "alice"), PatientStatus::Completed);
        assert!(scheduler.doctors()[0].is_available());
    }

    #[test]
    fn test_assignment_tick_costs_no_progress() {
        let mut scheduler = make_scheduler();
        admit_named(&mut scheduler, "p1", 5);
        scheduler.advance_tick();
        // Still the full estimate after the assignment tick.
        assert_eq!(scheduler.find_patient("p1").unwrap().remaining_minutes(), 5);
        scheduler.advance_tick();
        assert_eq!(scheduler.find_patient("p1").unwrap().remaining_minutes(), 4);
    }

    #[test]
    fn test_four_patients_three_doctors() {
        let mut scheduler = make_scheduler();
        for id in ["p1", "p2", "p3", "p4"] {
            admit_named(&mut scheduler, id, 10);
        }

        let report = scheduler.advance_tick();
        assert_eq!(report.assigned.len(), 3);
        assert_eq!(report.waiting_after, 1);

        // Arrival order, distinct doctors in roster order.
        assert_eq!(
            report.assigned,
            vec![
                ("1".into(), "p1".into()),
                ("2".into(), "p2".into()),
                ("3".into(), "p3".into()),
            ]
        );
        assert!(scheduler.find_patient("p4").unwrap().is_waiting());
    }

    #[test]
    fn test_fifo_fairness_more_doctors_than_patients() {
        let mut scheduler = make_scheduler();
        admit_named(&mut scheduler, "first", 10);
        admit_named(&mut scheduler, "second", 10);

        let report = scheduler.advance_tick();
        assert_eq!(
            report.assigned,
            vec![("1".into(), "first".into()), ("2".into(), "second".into())]
        );
        // The third doctor stays idle this tick.
        assert!(scheduler.doctors()[2].is_available());
    }

    #[test]
    fn test_no_double_booking_across_ticks() {
        let mut scheduler = make_scheduler();
        for i in 0..6 {
            admit_named(&mut scheduler, &format!("p{i}"), 2);
        }
        for _ in 0..10 {
            scheduler.advance_tick();
            validate_roster(scheduler.patients(), scheduler.doctors())
                .expect("roster invariants must hold after every tick");
        }
        // Everyone eventually flows through.
        assert!(scheduler.patients().iter().all(|p| p.is_completed()));
        assert!(scheduler.doctors().iter().all(|d| d.is_available()));
    }

    #[test]
    fn test_waiting_patient_not_decremented() {
        let mut scheduler = make_scheduler();
        for i in 0..4 {
            admit_named(&mut scheduler, &format!("p{i}"), 8);
        }
        scheduler.advance_tick();
        scheduler.advance_tick();
        // p3 never got a doctor; its estimate is untouched.
        let p3 = scheduler.find_patient("p3").unwrap();
        assert!(p3.is_waiting());
        assert_eq!(p3.remaining_minutes(), 8);
    }

    #[test]
    fn test_completion_frees_doctor_for_next_patient() {
        let roster = vec![Doctor::new("1").with_name("Dr. Solo")];
        let mut scheduler = QueueScheduler::new(roster);
        admit_named(&mut scheduler, "short", 1);
        admit_named(&mut scheduler, "next", 1);

        scheduler.advance_tick(); // short assigned
        let report = scheduler.advance_tick(); // short completes, doctor freed
        assert_eq!(report.completed, vec!["short".to_string()]);
        assert!(scheduler.doctors()[0].is_available());
        assert!(scheduler.find_patient("next").unwrap().is_waiting());

        let report = scheduler.advance_tick(); // next assigned
        assert_eq!(report.assigned, vec![("1".into(), "next".into())]);
    }

    #[test]
    fn test_stale_doctor_state_recovers() {
        // A doctor left pointing at a vanished patient must still be able
        // to receive work (defensive eligibility branch).
        let mut roster = default_roster();
        roster[0].state = DoctorState::Treating("vanished".into());
        let mut scheduler = QueueScheduler::new(roster);
        admit_named(&mut scheduler, "p1", 3);

        let report = scheduler.advance_tick();
        assert_eq!(report.assigned, vec![("1".into(), "p1".into())]);
        assert_eq!(scheduler.doctors()[0].current_patient(), Some("p1"));
    }

    #[test]
    fn test_priority_discipline_overrides_fifo() {
        let mut scheduler = QueueScheduler::new(vec![Doctor::new("1")])
            .with_discipline(PriorityFirst);
        scheduler.admit(Patient::new("routine", "routine", 5, Local::now()).with_priority(1));
        scheduler.admit(Patient::new("urgent", "urgent", 5, Local::now()).with_priority(9));

        let report = scheduler.advance_tick();
        assert_eq!(report.assigned, vec![("1".into(), "urgent".into())]);
        assert!(scheduler.find_patient("routine").unwrap().is_waiting());
    }

    #[test]
    fn test_completed_patient_never_changes_again() {
        let mut scheduler = make_scheduler();
        admit_named(&mut scheduler, "p1", 1);
        scheduler.advance_tick();
        scheduler.advance_tick();
        assert!(scheduler.find_patient("p1").unwrap().is_completed());

        for _ in 0..5 {
            scheduler.advance_tick();
        }
        let p1 = scheduler.find_patient("p1").unwrap();
        assert!(p1.is_completed());
        assert_eq!(p1.remaining_minutes(), 0);
    }

    #[test]
    fn test_tick_counter_advances() {
        let mut scheduler = make_scheduler();
        assert_eq!(scheduler.tick(), 0);
        scheduler.advance_tick();
        scheduler.advance_tick();
        assert_eq!(scheduler.tick(), 2);
    }

    #[test]
    fn test_report_serializes() {
        let mut scheduler = make_scheduler();
        admit_named(&mut scheduler, "p1", 2);
        let report = scheduler.advance_tick();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"assigned\""));
        let back: TickReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tick, 1);
        assert_eq!(back.assigned.len(), 1);
    }
}
