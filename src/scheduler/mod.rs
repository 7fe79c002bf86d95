//! The tick scheduler and queue metrics.
//!
//! `QueueScheduler` runs one scheduling pass per tick: assign waiting
//! patients to eligible doctors in roster order, then advance treatment by
//! one minute and release doctors whose patient finished. `QueueKpi`
//! summarizes queue health from the same state.

mod kpi;
mod queue;

pub use kpi::QueueKpi;
pub use queue::{QueueScheduler, SchedulerConfig, TickReport};
