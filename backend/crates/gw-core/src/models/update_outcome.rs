use crate::{UpdateStatus, UpdateStep};

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Mode reported when the update procedure never got far enough to pick one.
pub const MODE_UNKNOWN: &str = "unknown";

/// Structured result of running the update procedure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub status: UpdateStatus,
    pub mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(default)]
    pub before: Option<String>,
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub steps: Vec<UpdateStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub duration_ms: u64,
}

impl UpdateOutcome {
    /// Canonical outcome for a runner that failed before producing a result.
    pub fn synthetic_error(error: impl Display) -> Self {
        Self {
            status: UpdateStatus::Error,
            mode: String::from(MODE_UNKNOWN),
            root: None,
            before: None,
            after: None,
            steps: Vec::new(),
            reason: Some(error.to_string()),
            duration_ms: 0,
        }
    }

    /// Map the runner boundary result onto a well-formed outcome.
    pub fn from_runner_result<E: Display>(result: Result<UpdateOutcome, E>) -> Self {
        match result {
            Ok(outcome) => outcome,
            Err(e) => Self::synthetic_error(e),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == UpdateStatus::Ok
    }

    pub fn is_error(&self) -> bool {
        self.status == UpdateStatus::Error
    }
}
