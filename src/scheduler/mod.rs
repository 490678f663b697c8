//! Appointment scheduler, feasibility bound and schedule audit.
//!
//! # Algorithm
//!
//! `SlotScheduler` places patients one by one, in input order, into the
//! first slot whose first free doctor and first free room can take them.
//! The result is complete and conflict-free whenever
//! `patients <= slots * min(doctors, rooms)`, and is rejected with a
//! [`Shortfall`] otherwise.
//!
//! # Audit
//!
//! [`audit`] re-checks any list of appointments against the schedule
//! invariants, whether it came from this solver or from elsewhere.
//!
//! # References
//!
//! - de Werra (1985), "An introduction to timetabling"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4

mod audit;
mod capacity;
mod slot;

pub use audit::audit;
pub use capacity::{CapacityReport, Shortfall};
pub use slot::{ScheduleRequest, SlotScheduler};
