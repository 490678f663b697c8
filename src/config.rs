//! Scheduler configuration.
//!
//! Settings can be built in code or read from the environment:
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `CLINIC_SCHEDULE_VERIFY` | `verify` | `true` |
//! | `CLINIC_SCHEDULE_MAX_SLOTS` | `max_slots` | unlimited |

use serde::{Deserialize, Serialize};
use std::env;
use tracing::warn;

/// Environment variable toggling the post-solve audit.
pub const VERIFY_VAR: &str = "CLINIC_SCHEDULE_VERIFY";
/// Environment variable capping the accepted slot count.
pub const MAX_SLOTS_VAR: &str = "CLINIC_SCHEDULE_MAX_SLOTS";

/// Solver settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchedulerConfig {
    /// Audit every constructed schedule before returning it.
    pub verify: bool,
    /// Reject requests with more slots than this.
    pub max_slots: Option<u32>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            verify: true,
            max_slots: None,
        }
    }
}

impl SchedulerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables the post-solve audit.
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Caps the accepted slot count.
    pub fn with_max_slots(mut self, max_slots: u32) -> Self {
        self.max_slots = Some(max_slots);
        self
    }

    /// Reads the configuration from process environment variables.
    ///
    /// Unset variables keep their defaults; unparsable ones are logged and
    /// ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(VERIFY_VAR) {
            match parse_bool(&raw) {
                Some(verify) => config.verify = verify,
                None => warn!("{VERIFY_VAR}={raw:?} is not a boolean, keeping {}", config.verify),
            }
        }

        if let Some(raw) = lookup(MAX_SLOTS_VAR) {
            match raw.trim().parse::<u32>() {
                Ok(0) => warn!("{MAX_SLOTS_VAR}=0 would reject every request, ignoring"),
                Ok(max) => config.max_slots = Some(max),
                Err(_) => warn!("{MAX_SLOTS_VAR}={raw:?} is not a slot count, ignoring"),
            }
        }

        config
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
