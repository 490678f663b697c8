//! JSON service boundary.
//!
//! Maps requests and results to the documents exchanged with a caller:
//!
//! ```text
//! request  { "patients": [..], "doctors": [..], "rooms": [..], "timeSlots": n }
//! success  { "schedule": [{ "patient", "doctor", "room", "timeSlot" }] }
//! failure  { "kind": "InvalidInput" | "Infeasible", "message", "errors"?, "shortfall"? }
//! ```
//!
//! The same documents can be used to check a schedule that was produced
//! somewhere else, see [`verify_response`].

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::error::{ErrorKind, SolveError};
use crate::models::{Appointment, Schedule, Violation};
use crate::scheduler::{audit, ScheduleRequest, Shortfall, SlotScheduler};
use crate::validation::{InputField, ValidationError, ValidationErrorKind};

/// Successful response: the schedule, ascending by slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub schedule: Vec<Appointment>,
}

impl From<Schedule> for ScheduleResponse {
    fn from(schedule: Schedule) -> Self {
        Self {
            schedule: schedule.into_appointments(),
        }
    }
}

/// A single offending field in an `InvalidInput` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: InputField,
    pub message: String,
}

/// Failure response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortfall: Option<Shortfall>,
    /// Set when the failure reflects a solver defect.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub internal: bool,
}

impl From<&SolveError> for ErrorResponse {
    fn from(err: &SolveError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
            errors: err
                .validation_errors()
                .iter()
                .map(|e| FieldError {
                    field: e.field,
                    message: e.message.clone(),
                })
                .collect(),
            shortfall: err.shortfall().cloned(),
            internal: err.is_internal(),
        }
    }
}

impl From<SolveError> for ErrorResponse {
    fn from(err: SolveError) -> Self {
        Self::from(&err)
    }
}

/// Solves a decoded request.
pub fn handle(
    scheduler: &SlotScheduler,
    request: &ScheduleRequest,
) -> Result<ScheduleResponse, ErrorResponse> {
    match scheduler.solve(request) {
        Ok(schedule) => Ok(schedule.into()),
        Err(err) => {
            if err.is_internal() {
                error!(error = %err, "scheduler invariant failure");
            } else {
                debug!(kind = %err.kind(), "request rejected");
            }
            Err(err.into())
        }
    }
}

/// Decodes a JSON request, solves it and encodes the outcome.
///
/// A body that does not decode is answered with an `InvalidInput`
/// document on field `body`. Only encoding the answer can fail.
pub fn handle_json(scheduler: &SlotScheduler, body: &str) -> serde_json::Result<String> {
    let request: ScheduleRequest = match serde_json::from_str(body) {
        Ok(request) => request,
        Err(err) => {
            warn!(error = %err, "undecodable schedule request");
            let invalid = SolveError::InvalidInput(vec![ValidationError::new(
                ValidationErrorKind::MalformedBody,
                InputField::Body,
                format!("Request body is not a valid schedule request: {err}"),
            )]);
            return serde_json::to_string(&ErrorResponse::from(invalid));
        }
    };

    match handle(scheduler, &request) {
        Ok(response) => serde_json::to_string(&response),
        Err(response) => serde_json::to_string(&response),
    }
}

/// Audits a schedule document against the request it claims to answer.
///
/// Fails with `InvalidInput` if the request itself is malformed; otherwise
/// returns every violation found (empty when the schedule is complete and
/// conflict-free).
pub fn verify_response(
    request: &ScheduleRequest,
    response: &ScheduleResponse,
) -> Result<Vec<Violation>, SolveError> {
    let problem = SlotScheduler::new().validate(
        &request.patients,
        &request.doctors,
        &request.rooms,
        request.time_slots,
    )?;
    let violations = audit(&problem, &response.schedule);
    if !violations.is_empty() {
        warn!(violations = violations.len(), "schedule document failed audit");
    }
    Ok(violations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SchedulerConfig;
    use crate::models::ViolationType;
    use serde_json::{json, Value};

    fn scenario_a() -> ScheduleRequest {
        ScheduleRequest::new(
            ["Alice", "Bob", "Charlie", "Diana"],
            ["Dr. Smith", "Dr. Jones"],
            ["101", "102", "103"],
            5,
        )
    }

    #[test]
    fn test_handle_success() {
        let response = handle(&SlotScheduler::new(), &scenario_a()).unwrap();
        assert_eq!(response.schedule.len(), 4);
        assert!(response
            .schedule
            .windows(2)
            .all(|w| w[0].time_slot <= w[1].time_slot));
    }

    #[test]
    fn test_handle_json_success() {
        let body = r#"{"patients":["Alice","Bob"],"doctors":["Dr. Smith"],"rooms":["101"],"timeSlots":2}"#;
        let out: Value = serde_json::from_str(&handle_json(&SlotScheduler::new(), body).unwrap()).unwrap();
        assert_eq!(
            out,
            json!({
                "schedule": [
                    {"patient": "Alice", "doctor": "Dr. Smith", "room": "101", "timeSlot": 1},
                    {"patient": "Bob", "doctor": "Dr. Smith", "room": "101", "timeSlot": 2}
                ]
            })
        );
    }

    #[test]
    fn test_handle_json_infeasible() {
        let body = r#"{"patients":["P1","P2","P3","P4","P5"],"doctors":["D1"],"rooms":["R1"],"timeSlots":2}"#;
        let out: Value = serde_json::from_str(&handle_json(&SlotScheduler::new(), body).unwrap()).unwrap();
        assert_eq!(out["kind"], "Infeasible");
        assert_eq!(out["shortfall"]["capacity"], 2);
        assert_eq!(out["shortfall"]["unplaced"], 3);
        assert_eq!(out["shortfall"]["extraSlots"], 3);
        assert!(out.get("errors").is_none());
        assert!(out.get("internal").is_none());
    }

    #[test]
    fn test_handle_json_invalid_fields() {
        let body = r#"{"patients":["P1"," P1"],"doctors":[],"rooms":["R1"],"timeSlots":0}"#;
        let out: Value = serde_json::from_str(&handle_json(&SlotScheduler::new(), body).unwrap()).unwrap();
        assert_eq!(out["kind"], "InvalidInput");
        let fields: Vec<&str> = out["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["patients", "doctors", "timeSlots"]);
    }

    #[test]
    fn test_handle_json_malformed_body() {
        let out: Value =
            serde_json::from_str(&handle_json(&SlotScheduler::new(), "{not json").unwrap()).unwrap();
        assert_eq!(out["kind"], "InvalidInput");
        assert_eq!(out["errors"][0]["field"], "body");
    }

    #[test]
    fn test_handle_json_wrong_type() {
        let body = r#"{"patients":"Alice, Bob","doctors":["D"],"rooms":["R"],"timeSlots":1}"#;
        let out: Value = serde_json::from_str(&handle_json(&SlotScheduler::new(), body).unwrap()).unwrap();
        assert_eq!(out["errors"][0]["field"], "body");
    }

    #[test]
    fn test_handle_respects_config() {
        let scheduler = SlotScheduler::with_config(SchedulerConfig::new().with_max_slots(3));
        let err = handle(&scheduler, &scenario_a()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidInput);
        assert_eq!(err.errors[0].field, InputField::TimeSlots);
    }

    #[test]
    fn test_verify_own_response() {
        let request = scenario_a();
        let response = handle(&SlotScheduler::new(), &request).unwrap();
        assert!(verify_response(&request, &response).unwrap().is_empty());
    }

    #[test]
    fn test_verify_external_response_with_conflicts() {
        let request = scenario_a();
        let response: ScheduleResponse = serde_json::from_value(json!({
            "schedule": [
                {"patient": "Alice", "doctor": "Dr. Smith", "room": "101", "timeSlot": 1},
                {"patient": "Bob", "doctor": "Dr. Smith", "room": "102", "timeSlot": 1},
                {"patient": "Charlie", "doctor": "Dr. Jones", "room": "101", "timeSlot": 1},
                {"patient": "Diana", "doctor": "Dr. Jones", "room": "103", "timeSlot": 6}
            ]
        }))
        .unwrap();

        let types: Vec<ViolationType> = verify_response(&request, &response)
            .unwrap()
            .iter()
            .map(|v| v.violation_type)
            .collect();
        assert_eq!(
            types,
            vec![
                ViolationType::DoctorDoubleBooked,
                ViolationType::RoomDoubleBooked,
                ViolationType::SlotOutOfRange,
            ]
        );
    }

    #[test]
    fn test_verify_rejects_bad_request() {
        let request = ScheduleRequest::new(["A"], ["D"], ["R"], -1);
        let response = ScheduleResponse { schedule: vec![] };
        let err = verify_response(&request, &response).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
