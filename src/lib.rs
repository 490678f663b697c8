//! Conflict-free appointment scheduling.
//!
//! Assigns every patient to one doctor, one room and one time slot so that
//! no doctor, room or patient is booked twice in the same slot, or reports
//! exactly why that is impossible. Patients, doctors and rooms are opaque,
//! case-sensitive identifiers.
//!
//! # Modules
//!
//! - **`models`**: Domain types (`Problem`, `Appointment`, `Schedule`,
//!   `Violation`, `ResourceKind`)
//! - **`validation`**: Input integrity checks (empty lists, blank and
//!   duplicate IDs, slot count)
//! - **`scheduler`**: `SlotScheduler`, the feasibility bound (`Shortfall`,
//!   `CapacityReport`) and `audit`
//! - **`error`**: `SolveError` (`InvalidInput` / `Infeasible`)
//! - **`config`**: `SchedulerConfig`
//! - **`service`**: JSON request / response documents
//! - **`form`**: Comma-separated field parsing and table rendering
//!
//! # Example
//!
//! ```
//! use clinic_schedule::form::{render_table, FormInput};
//! use clinic_schedule::scheduler::SlotScheduler;
//!
//! let request = FormInput::new("Alice, Bob, Charlie, Diana", "Dr. Smith, Dr. Jones", "101, 102, 103", 5)
//!     .into_request()
//!     .unwrap();
//! let schedule = SlotScheduler::new().solve(&request).unwrap();
//! assert_eq!(schedule.len(), 4);
//! print!("{}", render_table(schedule.appointments()));
//! ```
//!
//! # Concurrency
//!
//! Solving is pure and synchronous. `SlotScheduler` holds only its
//! configuration, so one instance can serve concurrent callers.
//!
//! # References
//!
//! - de Werra (1985), "An introduction to timetabling"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod scheduler;
pub mod service;
pub mod validation;

pub use config::SchedulerConfig;
pub use error::{ErrorKind, Infeasibility, SolveError};
pub use models::{Appointment, Problem, Schedule};
pub use scheduler::{ScheduleRequest, SlotScheduler};
