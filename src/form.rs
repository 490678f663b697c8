//! Free-text form helpers.
//!
//! Front ends usually collect each resource list as one comma-separated text
//! field. [`FormInput`] turns those fields into a [`ScheduleRequest`], and
//! [`render_table`] lays a schedule out as a plain-text table.

use thiserror::Error;

use crate::models::Appointment;
use crate::scheduler::ScheduleRequest;

/// A form with an empty field or a non-positive slot count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Please fill in all fields and ensure time slots are greater than 0.")]
pub struct IncompleteForm;

/// Raw form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub patients: String,
    pub doctors: String,
    pub rooms: String,
    pub time_slots: i64,
}

impl FormInput {
    /// Creates a form from raw field values.
    pub fn new(
        patients: impl Into<String>,
        doctors: impl Into<String>,
        rooms: impl Into<String>,
        time_slots: i64,
    ) -> Self {
        Self {
            patients: patients.into(),
            doctors: doctors.into(),
            rooms: rooms.into(),
            time_slots,
        }
    }

    /// Rejects blank fields and slot counts below 1.
    pub fn check(&self) -> Result<(), IncompleteForm> {
        let blank = [&self.patients, &self.doctors, &self.rooms]
            .iter()
            .any(|field| field.trim().is_empty());
        if blank || self.time_slots <= 0 {
            return Err(IncompleteForm);
        }
        Ok(())
    }

    /// Checks the form and splits its fields into a request.
    pub fn into_request(self) -> Result<ScheduleRequest, IncompleteForm> {
        self.check()?;
        Ok(ScheduleRequest {
            patients: split_field(&self.patients),
            doctors: split_field(&self.doctors),
            rooms: split_field(&self.rooms),
            time_slots: self.time_slots,
        })
    }
}

/// Splits a comma-separated field into trimmed, non-empty identifiers.
///
/// ```
/// use clinic_schedule::form::split_field;
///
/// assert_eq!(split_field("Dr. Smith, Dr. Jones,"), vec!["Dr. Smith", "Dr. Jones"]);
/// ```
pub fn split_field(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

const HEADERS: [&str; 4] = ["Time Slot", "Patient", "Doctor", "Room"];

/// Renders appointments as a table sorted by slot.
///
/// Rows sharing a slot keep their given order. The slot column reads
/// `Slot N`.
pub fn render_table(appointments: &[Appointment]) -> String {
    let mut rows: Vec<&Appointment> = appointments.iter().collect();
    rows.sort_by_key(|a| a.time_slot);

    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|a| {
            [
                format!("Slot {}", a.time_slot),
                a.patient.clone(),
                a.doctor.clone(),
                a.room.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    let rule = widths.map(|w| "-".repeat(w));
    push_row(&mut out, &rule, &widths);
    for row in &cells {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    for (cell, width) in cells.iter().zip(widths) {
        out.push_str("| ");
        out.push_str(cell);
        out.push_str(&" ".repeat(width - cell.chars().count()));
        out.push(' ');
    }
    out.push_str("|\n");
}
