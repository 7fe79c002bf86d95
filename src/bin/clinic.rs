//! Interactive clinic queue demo.
//!
//! Starts the tick loop at one tick per second over the default roster and
//! reads intake commands from stdin:
//!
//! ```text
//! add <name> [minutes]   register a patient (duration defaults to 15)
//! board                  print the doctor and queue boards
//! kpi                    print queue health metrics
//! quit                   stop the loop and exit
//! ```

use std::io::{self, BufRead};
use std::time::Duration;

use chrono::Local;

use clinic_queue::clock::TickDriver;
use clinic_queue::display::{doctor_board, queue_board};
use clinic_queue::models::default_roster;
use clinic_queue::scheduler::{QueueKpi, QueueScheduler};

fn main() {
    env_logger::init();

    let driver = TickDriver::start(
        QueueScheduler::new(default_roster()),
        Duration::from_secs(1),
    );
    let shared = driver.handle();

    println!("clinic-queue: one tick per second, one simulated minute per tick");
    println!("commands: add <name> [minutes] | board | kpi | quit");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("add") => {
                let name = parts.next().unwrap_or("");
                let raw_duration = parts.next().unwrap_or("");
                let mut scheduler = shared.lock();
                match scheduler.submit_intake(name, raw_duration) {
                    Some(id) => println!("admitted {name} ({id})"),
                    None => println!("a patient needs a name"),
                }
            }
            Some("board") => {
                let scheduler = shared.lock();
                print_boards(&scheduler);
            }
            Some("kpi") => {
                let scheduler = shared.lock();
                let kpi = QueueKpi::calculate(
                    Local::now(),
                    scheduler.patients(),
                    scheduler.doctors(),
                );
                println!(
                    "waiting {} | in progress {} | completed {} | utilization {:.0}% | backlog {} min | avg wait {:.1} min",
                    kpi.waiting,
                    kpi.in_progress,
                    kpi.completed,
                    kpi.doctor_utilization * 100.0,
                    kpi.backlog_minutes,
                    kpi.avg_wait_minutes
                );
            }
            Some("quit") => break,
            Some(other) => println!("unknown command: {other}"),
            None => {}
        }
    }

    driver.stop();
}

fn print_boards(scheduler: &QueueScheduler) {
    println!("-- {} --", Local::now().format("%H:%M:%S"));
    println!("Doctors:");
    for row in doctor_board(scheduler) {
        let patient = row
            .current_patient
            .map(|p| format!(" ({p})"))
            .unwrap_or_default();
        println!("  {:<14} {:<8} {}{}", row.name, row.specialty, row.status, patient);
    }
    println!("Queue:");
    let queue = queue_board(scheduler);
    if queue.is_empty() {
        println!("  no patients in queue");
    }
    for row in queue {
        println!(
            "  {:<14} since {}  {:<11} {} min left",
            row.name, row.waiting_since, row.status, row.remaining_minutes
        );
    }
}
