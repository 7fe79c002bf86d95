//! Patient model.
//!
//! A patient carries an opaque id, an arrival timestamp, the intake
//! estimate, and a status tag. Remaining treatment time lives only in the
//! `InProgress` variant, so "duration defined only while in progress" and
//! "completed means zero remaining" hold structurally rather than by
//! convention.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Treatment lifecycle of a patient.
///
/// Transitions are driven only by the scheduler:
/// `Waiting → InProgress → Completed`. `Completed` is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatientStatus {
    /// In the queue, not yet seen by a doctor.
    Waiting,
    /// Being treated; `remaining_minutes` counts down one per tick.
    InProgress {
        /// Treatment minutes left.
        remaining_minutes: u32,
    },
    /// Treatment finished. Never leaves this state.
    Completed,
}

/// A patient in the simulation.
///
/// Created by intake with status `Waiting`; mutated only by the scheduler;
/// never removed from the collection (completed patients are filtered from
/// the queue board, not deleted).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    /// Opaque unique identifier.
    pub id: String,
    /// Patient name as entered at intake.
    pub name: String,
    /// Scheduling priority (higher = more urgent). Carried for the
    /// `PriorityFirst` discipline; the default FIFO discipline ignores it.
    pub priority: i32,
    /// Wall-clock arrival time.
    pub arrival: DateTime<Local>,
    /// Treatment estimate from intake, in minutes. Immutable; the countdown
    /// is held in `PatientStatus::InProgress`.
    pub estimated_minutes: u32,
    /// Current lifecycle state.
    pub status: PatientStatus,
}

impl Patient {
    /// Creates a waiting patient.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        estimated_minutes: u32,
        arrival: DateTime<Local>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            priority: 1,
            arrival,
            estimated_minutes,
            status: PatientStatus::Waiting,
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Whether this patient is waiting for a doctor.
    pub fn is_waiting(&self) -> bool {
        self.status == PatientStatus::Waiting
    }

    /// Whether treatment has finished.
    pub fn is_completed(&self) -> bool {
        self.status == PatientStatus::Completed
    }

    /// Minutes of treatment still ahead of this patient.
    ///
    /// Waiting patients report their full intake estimate, in-progress
    /// patients their countdown, completed patients zero. The doctor
    /// eligibility guard relies on this mapping: a doctor holding a patient
    /// that reports zero is treated as free.
    pub fn remaining_minutes(&self) -> u32 {
        match self.status {
            PatientStatus::Waiting => self.estimated_minutes,
            PatientStatus::InProgress { remaining_minutes } => remaining_minutes,
            PatientStatus::Completed => 0,
        }
    }
}
