//! Hospital waiting-room simulator.
//!
//! Simulates a clinic queue: patients arrive over time, a fixed-tick
//! scheduler assigns waiting patients to idle doctors in roster order and
//! decrements treatment time by one minute per tick, releasing the doctor
//! when treatment completes.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Patient`, `PatientStatus`, `Doctor`,
//!   `DoctorState`, intake helpers
//! - **`scheduler`**: The tick algorithm — `QueueScheduler`, `TickReport`,
//!   `QueueKpi`
//! - **`dispatching`**: Waiting-list ordering — `QueueDiscipline`, `Fifo`,
//!   `PriorityFirst`
//! - **`validation`**: Roster integrity checks (duplicate IDs, double
//!   booking, dangling patient references)
//! - **`clock`**: `TickDriver`, a wall-clock loop calling the scheduler at
//!   a fixed cadence
//! - **`display`**: Read-only board rows derived from current state
//!
//! # Concurrency
//!
//! `QueueScheduler` is single-threaded by design: `submit_patient` and
//! `advance_tick` are its only mutating entry points, and `TickDriver`
//! serializes them behind one mutex. `advance_tick` is independently
//! callable, so tests drive simulated time without waiting on a clock.
//!
//! # Example
//!
//! ```
//! use clinic_queue::models::default_roster;
//! use clinic_queue::scheduler::QueueScheduler;
//!
//! let mut scheduler = QueueScheduler::new(default_roster());
//! scheduler.submit_patient("Alice", 2);
//! let report = scheduler.advance_tick();
//! assert_eq!(report.assigned.len(), 1);
//! ```

pub mod clock;
pub mod dispatching;
pub mod display;
pub mod models;
pub mod scheduler;
pub mod validation;
