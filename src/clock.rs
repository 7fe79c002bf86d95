//! Wall-clock tick driver.
//!
//! Runs `advance_tick` at a fixed cadence on a background thread. The
//! scheduler sits behind a single mutex shared with the caller, so intake
//! and ticks serialize and two ticks can never overlap. There is no
//! pause/resume and no catch-up for missed ticks: each period produces at
//! most one tick, and the loop ends when the driver is stopped or dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use parking_lot::Mutex;

use crate::scheduler::QueueScheduler;

/// Drives a [`QueueScheduler`] from the wall clock.
///
/// One tick nominally represents one simulated minute, fired every `period`
/// of real time (the simulated system uses one second).
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use clinic_queue::clock::TickDriver;
/// use clinic_queue::models::default_roster;
/// use clinic_queue::scheduler::QueueScheduler;
///
/// let driver = TickDriver::start(
///     QueueScheduler::new(default_roster()),
///     Duration::from_secs(1),
/// );
/// driver.handle().lock().submit_patient("Alice", 15);
/// // ... later
/// driver.stop();
/// ```
pub struct TickDriver {
    shared: Arc<Mutex<QueueScheduler>>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl TickDriver {
    /// Takes ownership of the scheduler and starts ticking it every `period`.
    pub fn start(scheduler: QueueScheduler, period: Duration) -> Self {
        let shared = Arc::new(Mutex::new(scheduler));
        let stop = Arc::new(AtomicBool::new(false));

        let loop_shared = Arc::clone(&shared);
        let loop_stop = Arc::clone(&stop);
        let handle = std::thread::spawn(move || {
            log::debug!("tick loop started, period {period:?}");
            while !loop_stop.load(Ordering::Relaxed) {
                std::thread::sleep(period);
                if loop_stop.load(Ordering::Relaxed) {
                    break;
                }
                let report = loop_shared.lock().advance_tick();
                if !report.is_quiet() {
                    log::info!(
                        "tick {}: {} assigned, {} completed, {} waiting",
                        report.tick,
                        report.assigned.len(),
                        report.completed.len(),
                        report.waiting_after
                    );
                }
            }
            log::debug!("tick loop stopped");
        });

        Self {
            shared,
            stop,
            handle: Some(handle),
        }
    }

    /// The shared scheduler, for intake and display.
    ///
    /// Lock it briefly; a held lock delays the next tick (which is also the
    /// mechanism that keeps intake and ticks from interleaving).
    pub fn handle(&self) -> Arc<Mutex<QueueScheduler>> {
        Arc::clone(&self.shared)
    }

    /// Stops the loop and joins the thread.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        self.shutdown();
    }
}
