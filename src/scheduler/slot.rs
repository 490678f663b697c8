//! Slot-major greedy appointment scheduler.
//!
//! # Algorithm
//!
//! 1. Validate and trim the request (see [`crate::validation`]).
//! 2. Reject it if `patients > slots * min(doctors, rooms)`.
//! 3. For each patient in input order, take the first `(slot, doctor, room)`
//!    in slot-major order whose doctor and room are both free in that slot,
//!    scanning doctors and rooms in input order.
//! 4. Mark the doctor and room busy in that slot.
//!
//! Every slot is filled to `min(doctors, rooms)` before the next one is
//! opened, so a single pass places every patient whenever the bound in
//! step 2 holds.
//!
//! # Complexity
//! O(p * (d + r)) where p=patients, d=doctors, r=rooms. Slot state is only
//! allocated for slots that are actually opened, so the slot count itself
//! does not cost memory.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use super::audit::audit;
use super::capacity::Shortfall;
use crate::config::SchedulerConfig;
use crate::error::{Infeasibility, SolveError};
use crate::models::{Appointment, Problem, Schedule};
use crate::validation::validate_input;

/// Input container for scheduling.
///
/// Field names follow the wire format (`timeSlots`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    /// Patients to place, in priority (input) order.
    #[serde(default)]
    pub patients: Vec<String>,
    /// Available doctors.
    #[serde(default)]
    pub doctors: Vec<String>,
    /// Available rooms.
    #[serde(default)]
    pub rooms: Vec<String>,
    /// Number of time slots; signed so that non-positive counts can be
    /// rejected instead of failing to decode.
    #[serde(default)]
    pub time_slots: i64,
}

impl ScheduleRequest {
    /// Creates a new schedule request.
    pub fn new<P, D, R>(patients: P, doctors: D, rooms: R, time_slots: i64) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            patients: patients.into_iter().map(Into::into).collect(),
            doctors: doctors.into_iter().map(Into::into).collect(),
            rooms: rooms.into_iter().map(Into::into).collect(),
            time_slots,
        }
    }
}

/// Conflict-free appointment scheduler.
///
/// Assigns each patient to exactly one doctor, room and slot so that no
/// doctor, room or patient is booked twice in a slot. The output is fully
/// determined by the input order.
///
/// # Example
///
/// ```
/// use clinic_schedule::scheduler::{ScheduleRequest, SlotScheduler};
///
/// let request = ScheduleRequest::new(
///     ["Alice", "Bob", "Charlie", "Diana"],
///     ["Dr. Smith", "Dr. Jones"],
///     ["101", "102", "103"],
///     5,
/// );
///
/// let scheduler = SlotScheduler::new();
/// let schedule = scheduler.solve(&request).unwrap();
/// assert_eq!(schedule.len(), 4);
/// assert_eq!(schedule.last_slot(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SlotScheduler {
    config: SchedulerConfig,
}

/// Busy flags of one opened slot.
#[derive(Debug, Clone)]
struct SlotState {
    doctor_busy: Vec<bool>,
    room_busy: Vec<bool>,
    booked: usize,
}

impl SlotState {
    fn new(doctors: usize, rooms: usize) -> Self {
        Self {
            doctor_busy: vec![false; doctors],
            room_busy: vec![false; rooms],
            booked: 0,
        }
    }

    /// First free doctor and first free room, if both exist.
    fn first_free_pair(&self) -> Option<(usize, usize)> {
        let doctor = self.doctor_busy.iter().position(|busy| !busy)?;
        let room = self.room_busy.iter().position(|busy| !busy)?;
        Some((doctor, room))
    }

    fn book(&mut self, doctor: usize, room: usize) {
        self.doctor_busy[doctor] = true;
        self.room_busy[room] = true;
        self.booked += 1;
    }

    fn is_full(&self, per_slot_capacity: usize) -> bool {
        self.booked >= per_slot_capacity
    }
}

impl SlotScheduler {
    /// Creates a scheduler with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scheduler with the given configuration.
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Validates a request and schedules it.
    pub fn solve(&self, request: &ScheduleRequest) -> Result<Schedule, SolveError> {
        self.solve_parts(
            &request.patients,
            &request.doctors,
            &request.rooms,
            request.time_slots,
        )
    }

    /// Validates raw lists and schedules them.
    pub fn solve_parts<S: AsRef<str>>(
        &self,
        patients: &[S],
        doctors: &[S],
        rooms: &[S],
        slots: i64,
    ) -> Result<Schedule, SolveError> {
        let problem = self.validate(patients, doctors, rooms, slots)?;
        self.solve_problem(&problem)
    }

    /// Validates raw lists against this scheduler's configuration.
    pub fn validate<S: AsRef<str>>(
        &self,
        patients: &[S],
        doctors: &[S],
        rooms: &[S],
        slots: i64,
    ) -> Result<Problem, SolveError> {
        validate_input(patients, doctors, rooms, slots, self.config.max_slots).map_err(|errors| {
            debug!(count = errors.len(), "rejected invalid scheduling input");
            SolveError::InvalidInput(errors)
        })
    }

    /// Schedules an already validated problem.
    #[instrument(
        level = "debug",
        skip_all,
        fields(
            patients = problem.patients().len(),
            doctors = problem.doctors().len(),
            rooms = problem.rooms().len(),
            slots = problem.slots(),
        )
    )]
    pub fn solve_problem(&self, problem: &Problem) -> Result<Schedule, SolveError> {
        if let Some(shortfall) = Shortfall::of(problem) {
            warn!(
                capacity = shortfall.capacity,
                unplaced = shortfall.unplaced,
                "not enough capacity for every patient"
            );
            return Err(Infeasibility::Capacity(shortfall).into());
        }

        let appointments = self.assign(problem)?;
        let schedule = Schedule::from_appointments(appointments);

        if self.config.verify {
            let violations = audit(problem, schedule.appointments());
            if !violations.is_empty() {
                error!(
                    violations = violations.len(),
                    "constructed schedule failed its audit"
                );
                return Err(Infeasibility::InvariantViolated(violations).into());
            }
        }

        info!(
            appointments = schedule.len(),
            last_slot = schedule.last_slot(),
            "schedule constructed"
        );
        Ok(schedule)
    }

    /// Places every patient with the slot-major first-fit rule.
    fn assign(&self, problem: &Problem) -> Result<Vec<Appointment>, SolveError> {
        let doctors = problem.doctors();
        let rooms = problem.rooms();
        let per_slot = problem.per_slot_capacity();
        let slot_count = problem.slots() as usize;

        let mut opened: Vec<SlotState> = Vec::new();
        // Slots before this index are full
        let mut first_open = 0usize;
        let mut appointments = Vec::with_capacity(problem.patients().len());

        for patient in problem.patients() {
            while first_open < opened.len() && opened[first_open].is_full(per_slot) {
                first_open += 1;
            }

            let mut placed = None;
            for index in first_open..slot_count {
                if index == opened.len() {
                    opened.push(SlotState::new(doctors.len(), rooms.len()));
                }
                let state = &mut opened[index];
                if let Some((doctor, room)) = state.first_free_pair() {
                    state.book(doctor, room);
                    placed = Some((index, doctor, room));
                    break;
                }
            }

            let Some((index, doctor, room)) = placed else {
                error!(%patient, "no free doctor and room although capacity allowed it");
                return Err(Infeasibility::Exhausted {
                    patient: patient.clone(),
                }
                .into());
            };

            let time_slot = (index + 1) as u32;
            debug!(%patient, doctor = %doctors[doctor], room = %rooms[room], time_slot, "placed");
            appointments.push(Appointment::new(
                patient.as_str(),
                doctors[doctor].as_str(),
                rooms[room].as_str(),
                time_slot,
            ));
        }

        Ok(appointments)
    }
}
