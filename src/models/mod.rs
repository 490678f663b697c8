//! Scheduling domain models.
//!
//! Provides the core data types for describing an appointment problem and
//! its solution. Identifiers are opaque: nothing here looks inside a name.
//!
//! # Domain Mappings
//!
//! | clinic-schedule | Timetabling | Bipartite view |
//! |-----------------|-------------|----------------|
//! | Patient | Event | Left vertex |
//! | Doctor | Teacher | Right vertex (per slot) |
//! | Room | Room | Second right vertex (per slot) |
//! | Appointment | Placement | Matched triple |

mod problem;
mod resource;
mod schedule;

pub use problem::Problem;
pub use resource::ResourceKind;
pub use schedule::{Appointment, Schedule, Violation, ViolationType};
