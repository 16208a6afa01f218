use crate::MIN_UPDATE_TIMEOUT_MS;

use serde::{Deserialize, Serialize};

/// Validated `update.run` parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRunRequest {
    pub session_key: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub restart_delay_ms: Option<u64>,
    #[serde(default)]
    pub timeout_ms: Option<f64>,
}

impl UpdateRunRequest {
    /// Timeout handed to the update runner.
    ///
    /// Finite values are floored and raised to at least one second; anything
    /// else leaves the runner on its own default.
    pub fn effective_timeout_ms(&self) -> Option<u64> {
        let raw = self.timeout_ms?;
        if !raw.is_finite() {
            return None;
        }
        Some(raw.floor().max(MIN_UPDATE_TIMEOUT_MS as f64) as u64)
    }
}
