//! Schedule audit.
//!
//! Checks a list of appointments against a [`Problem`] and reports every
//! breach of the schedule invariants:
//!
//! 1. Every patient appears in exactly one appointment
//! 2. Per slot, no doctor appears twice
//! 3. Per slot, no room appears twice
//! 4. Per slot, no patient appears twice
//!
//! plus references to unknown identifiers and slots outside `1..=slots`.
//! The appointments need not come from this crate's solver.

use std::collections::{HashMap, HashSet};

use crate::models::{Appointment, Problem, ResourceKind, Violation};

/// Audits appointments against a problem.
///
/// # Returns
/// An empty vector for a complete conflict-free schedule; otherwise all
/// violations, slot-specific ones in appointment order followed by coverage
/// violations in patient input order.
pub fn audit(problem: &Problem, appointments: &[Appointment]) -> Vec<Violation> {
    let mut violations = Vec::new();

    let mut doctor_busy: HashSet<(u32, &str)> = HashSet::new();
    let mut room_busy: HashSet<(u32, &str)> = HashSet::new();
    let mut patient_busy: HashSet<(u32, &str)> = HashSet::new();
    let mut bookings: HashMap<&str, usize> = HashMap::new();

    for appt in appointments {
        let slot = appt.time_slot;

        if !problem.is_valid_slot(slot) {
            violations.push(Violation::slot_out_of_range(
                &appt.patient,
                slot,
                problem.slots(),
            ));
        }

        for (kind, id) in [
            (ResourceKind::Patient, &appt.patient),
            (ResourceKind::Doctor, &appt.doctor),
            (ResourceKind::Room, &appt.room),
        ] {
            if !problem.contains(kind, id) {
                violations.push(Violation::unknown(kind, id, slot));
            }
        }

        if !doctor_busy.insert((slot, appt.doctor.as_str())) {
            violations.push(Violation::doctor_double_booked(&appt.doctor, slot));
        }
        if !room_busy.insert((slot, appt.room.as_str())) {
            violations.push(Violation::room_double_booked(&appt.room, slot));
        }
        if !patient_busy.insert((slot, appt.patient.as_str())) {
            violations.push(Violation::patient_double_booked(&appt.patient, slot));
        }

        *bookings.entry(appt.patient.as_str()).or_insert(0) += 1;
    }

    for patient in problem.patients() {
        match bookings.get(patient.as_str()).copied().unwrap_or(0) {
            0 => violations.push(Violation::patient_missing(patient)),
            1 => {}
            count => violations.push(Violation::patient_duplicated(patient, count)),
        }
    }

    violations
}
