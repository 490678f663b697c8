//! Feasibility bound and capacity metrics.
//!
//! At most `min(doctors, rooms)` appointments fit in one slot, so a complete
//! conflict-free schedule exists only if
//!
//! ```text
//! patients <= slots * min(doctors, rooms)
//! ```
//!
//! The bound is also sufficient: the slot-major greedy fills every slot to
//! its per-slot capacity before moving on.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Per-slot capacity | min(doctors, rooms) |
//! | Capacity | slots x per-slot capacity |
//! | Load | patients / capacity |
//! | Slots used | Distinct slots holding an appointment |
//! | Last slot | Latest slot in use |

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Problem, Schedule};

/// How far capacity falls short of demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shortfall {
    /// Patients to place.
    pub patients: u64,
    /// Configured slot count.
    pub slots: u32,
    /// min(doctors, rooms).
    pub per_slot_capacity: u64,
    /// slots x per-slot capacity.
    pub capacity: u64,
    /// Patients that cannot be placed.
    pub unplaced: u64,
    /// Extra slots needed with the current doctors and rooms.
    pub extra_slots: u64,
    /// Extra doctors needed with the current slot count.
    pub extra_doctors: u64,
    /// Extra rooms needed with the current slot count.
    pub extra_rooms: u64,
}

impl Shortfall {
    /// Computes the shortfall of a problem, or `None` if the bound holds.
    pub fn of(problem: &Problem) -> Option<Self> {
        let patients = problem.patients().len() as u64;
        let doctors = problem.doctors().len() as u64;
        let rooms = problem.rooms().len() as u64;
        let slots = problem.slots();
        let per_slot_capacity = problem.per_slot_capacity() as u64;
        let capacity = problem.capacity();

        if patients <= capacity || per_slot_capacity == 0 {
            return None;
        }

        let needed_slots = patients.div_ceil(per_slot_capacity);
        let needed_per_slot = patients.div_ceil(u64::from(slots));

        Some(Self {
            patients,
            slots,
            per_slot_capacity,
            capacity,
            unplaced: patients - capacity,
            extra_slots: needed_slots - u64::from(slots),
            extra_doctors: needed_per_slot.saturating_sub(doctors),
            extra_rooms: needed_per_slot.saturating_sub(rooms),
        })
    }
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} patients exceed capacity {} ({} slots x {} per slot); {} cannot be placed. \
             Add {} time slot(s), or {} doctor(s) and {} room(s)",
            self.patients,
            self.capacity,
            self.slots,
            self.per_slot_capacity,
            self.unplaced,
            self.extra_slots,
            self.extra_doctors,
            self.extra_rooms,
        )
    }
}

/// Capacity indicators of a problem, optionally with a solved schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityReport {
    /// min(doctors, rooms).
    pub per_slot_capacity: u64,
    /// slots x per-slot capacity.
    pub capacity: u64,
    /// Number of patients.
    pub demand: u64,
    /// demand / capacity.
    pub load: f64,
    /// Present when demand exceeds capacity.
    pub shortfall: Option<Shortfall>,
    /// Distinct slots in use (set by [`CapacityReport::with_schedule`]).
    pub slots_used: Option<usize>,
    /// Latest slot in use (set by [`CapacityReport::with_schedule`]).
    pub last_slot: Option<u32>,
}

impl CapacityReport {
    /// Computes capacity indicators of a problem.
    pub fn calculate(problem: &Problem) -> Self {
        let capacity = problem.capacity();
        let demand = problem.patients().len() as u64;
        let load = if capacity == 0 {
            0.0
        } else {
            demand as f64 / capacity as f64
        };

        Self {
            per_slot_capacity: problem.per_slot_capacity() as u64,
            capacity,
            demand,
            load,
            shortfall: Shortfall::of(problem),
            slots_used: None,
            last_slot: None,
        }
    }

    /// Adds slot usage of a schedule.
    pub fn with_schedule(mut self, schedule: &Schedule) -> Self {
        self.slots_used = Some(schedule.slots_used());
        self.last_slot = Some(schedule.last_slot());
        self
    }

    /// Whether the feasibility bound holds.
    pub fn is_feasible(&self) -> bool {
        self.shortfall.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Appointment;

    fn problem(patients: usize, doctors: usize, rooms: usize, slots: i64) -> Problem {
        let ids = |prefix: &str, n: usize| -> Vec<String> {
            (1..=n).map(|i| format!("{prefix}{i}")).collect()
        };
        Problem::new(&ids("P", patients), &ids("D", doctors), &ids("R", rooms), slots).unwrap()
    }

    #[test]
    fn test_bound_holds() {
        assert!(Shortfall::of(&problem(4, 2, 3, 5)).is_none());
        // Exactly at capacity
        assert!(Shortfall::of(&problem(10, 2, 3, 5)).is_none());
    }

    #[test]
    fn test_single_doctor_single_room() {
        // 5 patients, 1 doctor, 1 room, 2 slots → capacity 2
        let s = Shortfall::of(&problem(5, 1, 1, 2)).unwrap();
        assert_eq!(s.capacity, 2);
        assert_eq!(s.unplaced, 3);
        assert_eq!(s.extra_slots, 3); // 5 slots needed
        assert_eq!(s.extra_doctors, 2); // ceil(5/2) = 3 per slot
        assert_eq!(s.extra_rooms, 2);
    }

    #[test]
    fn test_rooms_are_binding() {
        // 7 patients, 4 doctors, 2 rooms, 3 slots → capacity 6
        let s = Shortfall::of(&problem(7, 4, 2, 3)).unwrap();
        assert_eq!(s.per_slot_capacity, 2);
        assert_eq!(s.unplaced, 1);
        assert_eq!(s.extra_slots, 1); // ceil(7/2) = 4
        assert_eq!(s.extra_doctors, 0); // ceil(7/3) = 3 <= 4
        assert_eq!(s.extra_rooms, 1);
    }

    #[test]
    fn test_display_mentions_numbers() {
        let s = Shortfall::of(&problem(5, 1, 1, 2)).unwrap();
        let text = s.to_string();
        assert!(text.contains("capacity 2"));
        assert!(text.contains("3 cannot be placed"));
    }

    #[test]
    fn test_report() {
        let p = problem(4, 2, 3, 5);
        let report = CapacityReport::calculate(&p);
        assert!(report.is_feasible());
        assert_eq!(report.capacity, 10);
        assert!((report.load - 0.4).abs() < 1e-10);
        assert!(report.slots_used.is_none());

        let schedule = Schedule::from_appointments(vec![
            Appointment::new("P1", "D1", "R1", 1),
            Appointment::new("P2", "D2", "R2", 1),
            Appointment::new("P3", "D1", "R1", 2),
        ]);
        let report = report.with_schedule(&schedule);
        assert_eq!(report.slots_used, Some(2));
        assert_eq!(report.last_slot, Some(2));
    }

    #[test]
    fn test_report_overloaded() {
        let report = CapacityReport::calculate(&problem(5, 1, 1, 2));
        assert!(!report.is_feasible());
        assert!((report.load - 2.5).abs() < 1e-10);
    }
}
