use crate::{SentinelStep, UpdateOutcome};

use serde::{Deserialize, Serialize};

/// Dashboard summary of an update, nested inside the sentinel payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentinelStats {
    pub mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    pub before: Option<String>,
    pub after: Option<String>,
    pub steps: Vec<SentinelStep>,
    pub reason: Option<String>,
    pub duration_ms: u64,
}

impl From<&UpdateOutcome> for SentinelStats {
    fn from(outcome: &UpdateOutcome) -> Self {
        Self {
            mode: outcome.mode.clone(),
            root: outcome.root.clone(),
            before: outcome.before.clone(),
            after: outcome.after.clone(),
            steps: outcome.steps.iter().map(SentinelStep::from).collect(),
            reason: outcome.reason.clone(),
            duration_ms: outcome.duration_ms,
        }
    }
}
