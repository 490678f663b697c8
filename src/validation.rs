//! Input validation for appointment problems.
//!
//! Checks and normalises the raw lists before any assignment work. Detects:
//! - Empty patient, doctor or room lists
//! - Identifiers that are blank after trimming
//! - Duplicate identifiers within a list (after trimming)
//! - Non-positive slot counts, or counts above a configured maximum
//!
//! Every problem found is reported, not just the first, and each error names
//! the request field it came from.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::models::{Problem, ResourceKind};

/// Validation result.
pub type ValidationResult<T = ()> = Result<T, Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending request field.
    pub field: InputField,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// A resource list has no entries.
    EmptyList,
    /// An identifier is empty after trimming.
    BlankId,
    /// Two identifiers in the same list are equal after trimming.
    DuplicateId,
    /// The slot count is below 1 or does not fit in `u32`.
    InvalidSlotCount,
    /// The slot count exceeds the configured maximum.
    TooManySlots,
    /// The request body could not be decoded.
    MalformedBody,
}

/// Request fields, named as on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputField {
    Patients,
    Doctors,
    Rooms,
    TimeSlots,
    Body,
}

impl InputField {
    /// Wire name of the field.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Patients => "patients",
            Self::Doctors => "doctors",
            Self::Rooms => "rooms",
            Self::TimeSlots => "timeSlots",
            Self::Body => "body",
        }
    }
}

impl From<ResourceKind> for InputField {
    fn from(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Patient => Self::Patients,
            ResourceKind::Doctor => Self::Doctors,
            ResourceKind::Room => Self::Rooms,
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ValidationError {
    pub(crate) fn new(
        kind: ValidationErrorKind,
        field: InputField,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validates raw input and builds a [`Problem`].
///
/// Checks:
/// 1. Each of patients, doctors and rooms is non-empty
/// 2. No identifier is blank after trimming
/// 3. No duplicate identifiers within a list after trimming
/// 4. `slots >= 1` and fits in `u32`
/// 5. `slots <= max_slots` when a maximum is given
///
/// # Returns
/// The trimmed problem if all checks pass, `Err(errors)` with all detected
/// issues otherwise.
pub fn validate_input<S: AsRef<str>>(
    patients: &[S],
    doctors: &[S],
    rooms: &[S],
    slots: i64,
    max_slots: Option<u32>,
) -> ValidationResult<Problem> {
    let mut errors = Vec::new();

    let patients = normalize_ids(ResourceKind::Patient, patients, &mut errors);
    let doctors = normalize_ids(ResourceKind::Doctor, doctors, &mut errors);
    let rooms = normalize_ids(ResourceKind::Room, rooms, &mut errors);
    let slots = check_slots(slots, max_slots, &mut errors);

    match slots {
        Some(slots) if errors.is_empty() => {
            Ok(Problem::from_validated(patients, doctors, rooms, slots))
        }
        _ => Err(errors),
    }
}

/// Trims identifiers of one kind, recording empty lists, blanks and duplicates.
fn normalize_ids<S: AsRef<str>>(
    kind: ResourceKind,
    raw: &[S],
    errors: &mut Vec<ValidationError>,
) -> Vec<String> {
    let field = InputField::from(kind);

    if raw.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyList,
            field,
            format!("At least one {kind} is required"),
        ));
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut ids = Vec::with_capacity(raw.len());

    for (index, id) in raw.iter().enumerate() {
        let id = id.as_ref().trim();
        if id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::BlankId,
                field,
                format!("Entry {} is blank", index + 1),
            ));
            continue;
        }
        if !seen.insert(id) {
            // One error per repeated identifier, however often it repeats
            if reported.insert(id) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    field,
                    format!("Duplicate {kind} ID: {id}"),
                ));
            }
            continue;
        }
        ids.push(id.to_string());
    }

    ids
}

fn check_slots(
    slots: i64,
    max_slots: Option<u32>,
    errors: &mut Vec<ValidationError>,
) -> Option<u32> {
    let Ok(slots) = u32::try_from(slots) else {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidSlotCount,
            InputField::TimeSlots,
            format!("Time slot count must be between 1 and {}, got {slots}", u32::MAX),
        ));
        return None;
    };

    if slots == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidSlotCount,
            InputField::TimeSlots,
            "Time slot count must be at least 1, got 0",
        ));
        return None;
    }

    if let Some(max) = max_slots {
        if slots > max {
            errors.push(ValidationError::new(
                ValidationErrorKind::TooManySlots,
                InputField::TimeSlots,
                format!("Time slot count {slots} exceeds the configured maximum of {max}"),
            ));
            return None;
        }
    }

    Some(slots)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_valid_input() {
        let problem = validate_input(
            &["Alice", "Bob", "Charlie", "Diana"],
            &["Smith", "Jones"],
            &["101", "102", "103"],
            5,
            None,
        )
        .unwrap();
        assert_eq!(problem.patients().len(), 4);
        assert_eq!(problem.slots(), 5);
    }

    #[test]
    fn test_empty_doctors() {
        let empty: [&str; 0] = [];
        let errors = validate_input(&["P1"], &empty, &["R1"], 3, None).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::EmptyList);
        assert_eq!(errors[0].field, InputField::Doctors);
    }

    #[test]
    fn test_zero_slots() {
        let errors = validate_input(&["P1"], &["D1"], &["R1"], 0, None).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidSlotCount
                && e.field == InputField::TimeSlots));
    }

    #[test]
    fn test_negative_slots() {
        let errors = validate_input(&["P1"], &["D1"], &["R1"], -4, None).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidSlotCount);
        assert!(errors[0].message.contains("-4"));
    }

    #[test]
    fn test_slots_above_u32() {
        let errors =
            validate_input(&["P1"], &["D1"], &["R1"], i64::from(u32::MAX) + 1, None).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidSlotCount);
    }

    #[test]
    fn test_duplicate_after_trim() {
        let errors = validate_input(&["P1", " P1 "], &["D1"], &["R1"], 2, None).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateId);
        assert_eq!(errors[0].field, InputField::Patients);
    }

    #[test]
    fn test_duplicate_reported_once() {
        let errors = validate_input(&["P1", "P1", "P1"], &["D1"], &["R1"], 2, None).unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_case_sensitive_ids_are_distinct() {
        let problem = validate_input(&["p1", "P1"], &["D1"], &["R1"], 2, None).unwrap();
        assert_eq!(problem.patients(), &strings(&["p1", "P1"])[..]);
    }

    #[test]
    fn test_blank_id() {
        let errors = validate_input(&["P1"], &["D1", "   "], &["R1"], 1, None).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::BlankId);
        assert_eq!(errors[0].field, InputField::Doctors);
        assert!(errors[0].message.contains("Entry 2"));
    }

    #[test]
    fn test_max_slots() {
        let errors = validate_input(&["P1"], &["D1"], &["R1"], 50, Some(10)).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::TooManySlots);
        assert!(validate_input(&["P1"], &["D1"], &["R1"], 10, Some(10)).is_ok());
    }

    #[test]
    fn test_multiple_errors() {
        let empty: Vec<String> = Vec::new();
        let rooms = strings(&["R1", "R1"]);
        let errors = validate_input(&empty, &empty, &rooms, 0, None).unwrap_err();
        let fields: Vec<InputField> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                InputField::Patients,
                InputField::Doctors,
                InputField::Rooms,
                InputField::TimeSlots
            ]
        );
    }

    #[test]
    fn test_display_names_field() {
        let e = ValidationError::new(ValidationErrorKind::EmptyList, InputField::Rooms, "none");
        assert_eq!(e.to_string(), "rooms: none");
        assert_eq!(InputField::TimeSlots.name(), "timeSlots");
    }
}
