//! Schedule (solution) model.
//!
//! A schedule is a list of appointments, each pairing one patient with one
//! doctor and one room in one time slot. Schedules are built once and never
//! mutated; the natural order is ascending slot, then the order in which the
//! appointments were supplied within a slot.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ResourceKind;

/// A patient-doctor-room-slot assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Patient identifier.
    pub patient: String,
    /// Doctor identifier.
    pub doctor: String,
    /// Room identifier.
    pub room: String,
    /// Time slot, 1-based.
    pub time_slot: u32,
}

impl Appointment {
    /// Creates a new appointment.
    pub fn new(
        patient: impl Into<String>,
        doctor: impl Into<String>,
        room: impl Into<String>,
        time_slot: u32,
    ) -> Self {
        Self {
            patient: patient.into(),
            doctor: doctor.into(),
            room: room.into(),
            time_slot,
        }
    }
}

/// An immutable, slot-ordered set of appointments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Schedule {
    appointments: Vec<Appointment>,
}

impl Schedule {
    /// Builds a schedule, ordering appointments by slot.
    ///
    /// The sort is stable: appointments sharing a slot keep their relative
    /// order.
    pub fn from_appointments(mut appointments: Vec<Appointment>) -> Self {
        appointments.sort_by_key(|a| a.time_slot);
        Self { appointments }
    }

    /// All appointments in schedule order.
    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    /// Iterates appointments in schedule order.
    pub fn iter(&self) -> std::slice::Iter<'_, Appointment> {
        self.appointments.iter()
    }

    /// Number of appointments.
    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    /// Whether the schedule is empty.
    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    /// Appointments held in a given slot.
    pub fn in_slot(&self, slot: u32) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.time_slot == slot)
            .collect()
    }

    /// The appointment of a patient, if any.
    pub fn for_patient(&self, patient: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.patient == patient)
    }

    /// All appointments of a doctor.
    pub fn for_doctor(&self, doctor: &str) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.doctor == doctor)
            .collect()
    }

    /// All appointments in a room.
    pub fn for_room(&self, room: &str) -> Vec<&Appointment> {
        self.appointments.iter().filter(|a| a.room == room).collect()
    }

    /// Latest slot in use (0 if empty).
    pub fn last_slot(&self) -> u32 {
        self.appointments
            .iter()
            .map(|a| a.time_slot)
            .max()
            .unwrap_or(0)
    }

    /// Number of distinct slots holding at least one appointment.
    pub fn slots_used(&self) -> usize {
        let mut slots: Vec<u32> = self.appointments.iter().map(|a| a.time_slot).collect();
        slots.dedup();
        slots.len()
    }

    /// Consumes the schedule, returning its appointments.
    pub fn into_appointments(self) -> Vec<Appointment> {
        self.appointments
    }
}

impl From<Vec<Appointment>> for Schedule {
    fn from(appointments: Vec<Appointment>) -> Self {
        Self::from_appointments(appointments)
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Appointment;
    type IntoIter = std::slice::Iter<'a, Appointment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A breach of a schedule invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity ID (patient, doctor, or room).
    pub entity_id: String,
    /// Slot in which the breach happens, when it is slot-specific.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<u32>,
    /// Human-readable description.
    pub message: String,
    /// Severity (0-100, higher = worse).
    pub severity: i32,
}

/// Classification of schedule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationType {
    /// A patient has no appointment.
    PatientMissing,
    /// A patient has more than one appointment overall.
    PatientDuplicated,
    /// A doctor is booked twice in the same slot.
    DoctorDoubleBooked,
    /// A room is booked twice in the same slot.
    RoomDoubleBooked,
    /// A patient is booked twice in the same slot.
    PatientDoubleBooked,
    /// The appointment names a patient outside the problem.
    UnknownPatient,
    /// The appointment names a doctor outside the problem.
    UnknownDoctor,
    /// The appointment names a room outside the problem.
    UnknownRoom,
    /// The slot lies outside `1..=slots`.
    SlotOutOfRange,
}

impl Violation {
    fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        time_slot: Option<u32>,
        message: impl Into<String>,
        severity: i32,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            time_slot,
            message: message.into(),
            severity,
        }
    }

    /// Creates a missing-patient violation.
    pub fn patient_missing(patient: impl Into<String>) -> Self {
        let patient = patient.into();
        let message = format!("Patient '{patient}' has no appointment");
        Self::new(ViolationType::PatientMissing, patient, None, message, 80)
    }

    /// Creates a duplicated-patient violation.
    pub fn patient_duplicated(patient: impl Into<String>, count: usize) -> Self {
        let patient = patient.into();
        let message = format!("Patient '{patient}' has {count} appointments, expected 1");
        Self::new(ViolationType::PatientDuplicated, patient, None, message, 85)
    }

    /// Creates a doctor double-booking violation.
    pub fn doctor_double_booked(doctor: impl Into<String>, slot: u32) -> Self {
        let doctor = doctor.into();
        let message = format!("Doctor '{doctor}' is booked more than once in slot {slot}");
        Self::new(ViolationType::DoctorDoubleBooked, doctor, Some(slot), message, 90)
    }

    /// Creates a room double-booking violation.
    pub fn room_double_booked(room: impl Into<String>, slot: u32) -> Self {
        let room = room.into();
        let message = format!("Room '{room}' is booked more than once in slot {slot}");
        Self::new(ViolationType::RoomDoubleBooked, room, Some(slot), message, 90)
    }

    /// Creates a patient double-booking violation.
    pub fn patient_double_booked(patient: impl Into<String>, slot: u32) -> Self {
        let patient = patient.into();
        let message = format!("Patient '{patient}' is booked more than once in slot {slot}");
        Self::new(ViolationType::PatientDoubleBooked, patient, Some(slot), message, 95)
    }

    /// Creates an unknown-identifier violation for the given kind.
    pub fn unknown(kind: ResourceKind, id: impl Into<String>, slot: u32) -> Self {
        let id = id.into();
        let violation_type = match kind {
            ResourceKind::Patient => ViolationType::UnknownPatient,
            ResourceKind::Doctor => ViolationType::UnknownDoctor,
            ResourceKind::Room => ViolationType::UnknownRoom,
        };
        let message = format!("Unknown {kind} '{id}' in slot {slot}");
        Self::new(violation_type, id, Some(slot), message, 70)
    }

    /// Creates an out-of-range slot violation.
    pub fn slot_out_of_range(patient: impl Into<String>, slot: u32, slots: u32) -> Self {
        let patient = patient.into();
        let message = format!("Patient '{patient}' is booked in slot {slot}, outside 1..={slots}");
        Self::new(ViolationType::SlotOutOfRange, patient, Some(slot), message, 75)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schedule() -> Schedule {
        Schedule::from_appointments(vec![
            Appointment::new("Charlie", "Smith", "101", 2),
            Appointment::new("Alice", "Smith", "101", 1),
            Appointment::new("Bob", "Jones", "102", 1),
            Appointment::new("Diana", "Jones", "102", 2),
        ])
    }

    #[test]
    fn test_sorted_by_slot_stable() {
        let s = sample_schedule();
        let order: Vec<&str> = s.iter().map(|a| a.patient.as_str()).collect();
        assert_eq!(order, vec!["Alice", "Bob", "Charlie", "Diana"]);
    }

    #[test]
    fn test_queries() {
        let s = sample_schedule();
        assert_eq!(s.len(), 4);
        assert_eq!(s.in_slot(1).len(), 2);
        assert_eq!(s.for_patient("Diana").unwrap().time_slot, 2);
        assert!(s.for_patient("Eve").is_none());
        assert_eq!(s.for_doctor("Smith").len(), 2);
        assert_eq!(s.for_room("102").len(), 2);
    }

    #[test]
    fn test_last_slot_and_slots_used() {
        let s = sample_schedule();
        assert_eq!(s.last_slot(), 2);
        assert_eq!(s.slots_used(), 2);

        let sparse = Schedule::from_appointments(vec![
            Appointment::new("A", "D", "R", 7),
            Appointment::new("B", "D", "R", 3),
        ]);
        assert_eq!(sparse.last_slot(), 7);
        assert_eq!(sparse.slots_used(), 2);
    }

    #[test]
    fn test_empty_schedule() {
        let s = Schedule::default();
        assert!(s.is_empty());
        assert_eq!(s.last_slot(), 0);
        assert_eq!(s.slots_used(), 0);
    }

    #[test]
    fn test_wire_field_names() {
        let a = Appointment::new("Alice", "Dr. Smith", "101", 3);
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["timeSlot"], 3);
        assert_eq!(json["doctor"], "Dr. Smith");

        let s = Schedule::from_appointments(vec![a]);
        let json = serde_json::to_value(&s).unwrap();
        assert!(json.is_array());
    }

    #[test]
    fn test_violation_factories() {
        let v = Violation::doctor_double_booked("Smith", 2);
        assert_eq!(v.violation_type, ViolationType::DoctorDoubleBooked);
        assert_eq!(v.entity_id, "Smith");
        assert_eq!(v.time_slot, Some(2));

        let v = Violation::unknown(ResourceKind::Room, "999", 1);
        assert_eq!(v.violation_type, ViolationType::UnknownRoom);
        assert!(v.message.contains("room"));

        let v = Violation::patient_missing("Eve");
        assert_eq!(v.time_slot, None);
        assert!(v.severity > 0);
    }
}
