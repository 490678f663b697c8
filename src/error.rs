//! Solver errors.
//!
//! There are exactly two kinds of failure: the input is malformed
//! ([`SolveError::InvalidInput`]) or no complete conflict-free schedule can be
//! produced ([`SolveError::Infeasible`]). A failed solve never carries a
//! partial schedule.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::models::Violation;
use crate::scheduler::Shortfall;
use crate::validation::ValidationError;

/// Error returned by [`crate::scheduler::SlotScheduler`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// One or more request fields are malformed.
    #[error("invalid input: {}", join(.0))]
    InvalidInput(Vec<ValidationError>),
    /// No complete conflict-free schedule exists or could be built.
    #[error("infeasible: {0}")]
    Infeasible(Infeasibility),
}

/// Why a valid request produced no schedule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Infeasibility {
    /// The feasibility bound does not hold.
    #[error("{0}")]
    Capacity(Shortfall),
    /// The bound held but a patient found no free doctor and room.
    #[error("no free doctor and room for patient '{patient}' although capacity allows it")]
    Exhausted { patient: String },
    /// The constructed schedule failed its audit.
    #[error("constructed schedule breaks {} invariant(s): {}", .0.len(), join(.0))]
    InvariantViolated(Vec<Violation>),
}

/// Wire-level error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidInput,
    Infeasible,
}

impl SolveError {
    /// The error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Infeasible(_) => ErrorKind::Infeasible,
        }
    }

    /// Whether the error points at a solver defect rather than the input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Infeasible(Infeasibility::Exhausted { .. } | Infeasibility::InvariantViolated(_))
        )
    }

    /// The capacity shortfall, for capacity rejections.
    pub fn shortfall(&self) -> Option<&Shortfall> {
        match self {
            Self::Infeasible(Infeasibility::Capacity(shortfall)) => Some(shortfall),
            _ => None,
        }
    }

    /// The validation errors, for input rejections.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::InvalidInput(errors) => errors,
            Self::Infeasible(_) => &[],
        }
    }
}

impl From<Vec<ValidationError>> for SolveError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::InvalidInput(errors)
    }
}

impl From<Infeasibility> for SolveError {
    fn from(cause: Infeasibility) -> Self {
        Self::Infeasible(cause)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput => f.write_str("InvalidInput"),
            Self::Infeasible => f.write_str("Infeasible"),
        }
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
