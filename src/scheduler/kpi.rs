//! Queue health metrics.
//!
//! Computed from the current patient and doctor collections; read-only.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Waiting / In Progress / Completed | Status counts |
//! | Doctor Utilization | Busy doctors ÷ roster size |
//! | Backlog | Sum of remaining minutes over non-completed patients |
//! | Avg Wait | Mean (now − arrival) of waiting patients, minutes |

use chrono::{DateTime, Local};

use crate::models::{Doctor, Patient, PatientStatus};

/// A point-in-time snapshot of queue health.
#[derive(Debug, Clone)]
pub struct QueueKpi {
    /// Patients waiting for a doctor.
    pub waiting: usize,
    /// Patients in treatment.
    pub in_progress: usize,
    /// Patients whose treatment finished.
    pub completed: usize,
    /// Busy doctors ÷ roster size (0.0 for an empty roster).
    pub doctor_utilization: f64,
    /// Remaining treatment minutes across waiting and in-progress patients.
    pub backlog_minutes: u32,
    /// Mean minutes waiting patients have been in the queue, against `now`.
    pub avg_wait_minutes: f64,
}

impl QueueKpi {
    /// Computes KPIs from the current collections.
    ///
    /// `now` is supplied by the caller so tests stay deterministic.
    pub fn calculate(now: DateTime<Local>, patients: &[Patient], doctors: &[Doctor]) -> Self {
        let mut waiting = 0usize;
        let mut in_progress = 0usize;
        let mut completed = 0usize;
        let mut backlog: u32 = 0;
        let mut wait_sum_minutes = 0.0f64;

        for p in patients {
            match p.status {
                PatientStatus::Waiting => {
                    waiting += 1;
                    backlog += p.remaining_minutes();
                    let waited = (now - p.arrival).num_seconds().max(0) as f64 / 60.0;
                    wait_sum_minutes += waited;
                }
                PatientStatus::InProgress { .. } => {
                    in_progress += 1;
                    backlog += p.remaining_minutes();
                }
                PatientStatus::Completed => completed += 1,
            }
        }

        let busy = doctors.iter().filter(|d| !d.is_available()).count();
        let doctor_utilization = if doctors.is_empty() {
            0.0
        } else {
            busy as f64 / doctors.len() as f64
        };

        let avg_wait_minutes = if waiting == 0 {
            0.0
        } else {
            wait_sum_minutes / waiting as f64
        };

        Self {
            waiting,
            in_progress,
            completed,
            doctor_utilization,
            backlog_minutes: backlog,
            avg_wait_minutes,
        }
    }

    /// Whether the queue is fully drained (nobody waiting or in treatment).
    pub fn is_drained(&self) -> bool {
        self.waiting == 0 && self.in_progress == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn make_patient(id: &str, minutes: u32, status: PatientStatus) -> Patient {
        let mut p = Patient::new(id, id, minutes, Local::now());
        p.status = status;
        p
    }

    #[test]
    fn test_kpi_counts_and_backlog() {
        let patients = vec![
            make_patient("w1", 10, PatientStatus::Waiting),
            make_patient(
                "t1",
                20,
                PatientStatus::InProgress {
                    remaining_minutes: 6,
                },
            ),
            make_patient("c1", 5, PatientStatus::Completed),
        ];
        let mut doctors = vec![Doctor::new("1"), Doctor::new("2")];
        doctors[0].state = crate::models::DoctorState::Treating("t1".into());

        let kpi = QueueKpi::calculate(Local::now(), &patients, &doctors);
        assert_eq!(kpi.waiting, 1);
        assert_eq!(kpi.in_progress, 1);
        assert_eq!(kpi.completed, 1);
        // Backlog: 10 (waiting estimate) + 6 (in-progress remaining).
        assert_eq!(kpi.backlog_minutes, 16);
        assert!((kpi.doctor_utilization - 0.5).abs() < 1e-10);
        assert!(!kpi.is_drained());
    }

    #[test]
    fn test_kpi_avg_wait() {
        let now = Local::now();
        let mut early = make_patient("early", 10, PatientStatus::Waiting);
        early.arrival = now - Duration::minutes(10);
        let mut late = make_patient("late", 10, PatientStatus::Waiting);
        late.arrival = now - Duration::minutes(2);

        let kpi = QueueKpi::calculate(now, &[early, late], &[]);
        assert!((kpi.avg_wait_minutes - 6.0).abs() < 0.05);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = QueueKpi::calculate(Local::now(), &[], &[]);
        assert!(kpi.is_drained());
        assert_eq!(kpi.backlog_minutes, 0);
        assert!((kpi.doctor_utilization - 0.0).abs() < 1e-10);
        assert!((kpi.avg_wait_minutes - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_drained_with_only_completed() {
        let patients = vec![make_patient("c1", 5, PatientStatus::Completed)];
        let kpi = QueueKpi::calculate(Local::now(), &patients, &[Doctor::new("1")]);
        assert!(kpi.is_drained());
        assert_eq!(kpi.completed, 1);
    }
}
