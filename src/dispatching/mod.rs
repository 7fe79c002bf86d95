//! Waiting-list ordering disciplines.
//!
//! A discipline decides the order in which waiting patients are offered to
//! eligible doctors each tick. The default is plain FIFO by arrival, which
//! is what the simulator models; `PriorityFirst` exists as the explicit
//! extension point for the priority field patients already carry.
//!
//! # Usage
//!
//! ```
//! use clinic_queue::dispatching::{Fifo, QueueDiscipline};
//! use clinic_queue::models::Patient;
//! use chrono::Local;
//!
//! let waiting = vec![
//!     Patient::new("a", "Alice", 10, Local::now()),
//!     Patient::new("b", "Bob", 10, Local::now()),
//! ];
//! let refs: Vec<&Patient> = waiting.iter().collect();
//! assert_eq!(Fifo.order(&refs), vec![0, 1]);
//! ```

use std::fmt::Debug;

use crate::models::Patient;

/// Orders the waiting list for assignment.
///
/// `order` receives the waiting patients in their current collection order
/// (arrival order) and returns indices into that slice, highest priority
/// first. Implementations must be stable: patients the rule considers equal
/// keep their arrival order.
pub trait QueueDiscipline: Send + Sync + Debug {
    /// Discipline name (e.g., "FIFO").
    fn name(&self) -> &'static str;

    /// Returns indices into `waiting`, in assignment order.
    fn order(&self, waiting: &[&Patient]) -> Vec<usize>;
}

/// First-in, first-out: assignment order is arrival order.
///
/// This is the default discipline and matches the simulator's round-robin
/// pass, which pops waiting patients front-to-back.
#[derive(Debug, Clone, Copy)]
pub struct Fifo;

impl QueueDiscipline for Fifo {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn order(&self, waiting: &[&Patient]) -> Vec<usize> {
        (0..waiting.len()).collect()
    }
}

/// Higher priority first, FIFO within a priority class.
///
/// Opt-in: the scheduler defaults to [`Fifo`]. Uses the `priority` field on
/// [`Patient`], which the default discipline ignores.
#[derive(Debug, Clone, Copy)]
pub struct PriorityFirst;

impl QueueDiscipline for PriorityFirst {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn order(&self, waiting: &[&Patient]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..waiting.len()).collect();
        // Stable sort keeps arrival order within equal priorities.
        indices.sort_by_key(|&i| std::cmp::Reverse(waiting[i].priority));
        indices
    }
}
