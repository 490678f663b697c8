//! Resource kinds.
//!
//! Patients, doctors and rooms are all opaque identifiers. The kind only
//! decides which list an identifier belongs to and how it is reported.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 1.2

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a schedulable identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceKind {
    /// A person to be seen exactly once.
    Patient,
    /// A person who sees at most one patient per slot.
    Doctor,
    /// A place that hosts at most one appointment per slot.
    Room,
}

impl ResourceKind {
    /// All kinds, in request field order.
    pub const ALL: [ResourceKind; 3] = [Self::Patient, Self::Doctor, Self::Room];

    /// Lowercase singular label ("patient", "doctor", "room").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Doctor => "doctor",
            Self::Room => "room",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(ResourceKind::Patient.label(), "patient");
        assert_eq!(ResourceKind::Doctor.to_string(), "doctor");
        assert_eq!(ResourceKind::ALL.len(), 3);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ResourceKind::Room).unwrap();
        assert_eq!(json, "\"room\"");
        let kind: ResourceKind = serde_json::from_str("\"doctor\"").unwrap();
        assert_eq!(kind, ResourceKind::Doctor);
    }
}
