//! Validated scheduling problem.
//!
//! A [`Problem`] is the trimmed, duplicate-free form of a request. It can
//! only be obtained through [`Problem::new`] (or the validation module),
//! so holding one means the lists are non-empty and the slot count is
//! at least 1.

use std::collections::HashMap;

use super::ResourceKind;
use crate::validation::{self, ValidationResult};

/// Patients, doctors, rooms and a slot count that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    patients: Vec<String>,
    doctors: Vec<String>,
    rooms: Vec<String>,
    slots: u32,
}

impl Problem {
    /// Validates raw lists and builds a problem.
    ///
    /// Identifiers are trimmed. See [`validation::validate_input`] for the
    /// full list of checks.
    pub fn new<S: AsRef<str>>(
        patients: &[S],
        doctors: &[S],
        rooms: &[S],
        slots: i64,
    ) -> ValidationResult<Self> {
        validation::validate_input(patients, doctors, rooms, slots, None)
    }

    pub(crate) fn from_validated(
        patients: Vec<String>,
        doctors: Vec<String>,
        rooms: Vec<String>,
        slots: u32,
    ) -> Self {
        Self {
            patients,
            doctors,
            rooms,
            slots,
        }
    }

    /// Patients in input order.
    pub fn patients(&self) -> &[String] {
        &self.patients
    }

    /// Doctors in input order.
    pub fn doctors(&self) -> &[String] {
        &self.doctors
    }

    /// Rooms in input order.
    pub fn rooms(&self) -> &[String] {
        &self.rooms
    }

    /// Number of time slots; valid slots are `1..=slots`.
    pub fn slots(&self) -> u32 {
        self.slots
    }

    /// Identifiers of the given kind.
    pub fn ids(&self, kind: ResourceKind) -> &[String] {
        match kind {
            ResourceKind::Patient => &self.patients,
            ResourceKind::Doctor => &self.doctors,
            ResourceKind::Room => &self.rooms,
        }
    }

    /// Whether `id` names a known resource of the given kind.
    pub fn contains(&self, kind: ResourceKind, id: &str) -> bool {
        self.ids(kind).iter().any(|known| known == id)
    }

    /// Whether `slot` lies in `1..=slots`.
    #[inline]
    pub fn is_valid_slot(&self, slot: u32) -> bool {
        (1..=self.slots).contains(&slot)
    }

    /// Appointments that fit in one slot: `min(doctors, rooms)`.
    #[inline]
    pub fn per_slot_capacity(&self) -> usize {
        self.doctors.len().min(self.rooms.len())
    }

    /// Total capacity over all slots.
    #[inline]
    pub fn capacity(&self) -> u64 {
        u64::from(self.slots) * self.per_slot_capacity() as u64
    }

    /// Patient id → input position.
    pub fn patient_positions(&self) -> HashMap<&str, usize> {
        self.patients
            .iter()
            .enumerate()
            .map(|(i, p)| (p.as_str(), i))
            .collect()
    }
}
