use crate::RestartAudit;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestartScheduleRequest {
    /// Scheduler default applies when absent
    pub delay_ms: Option<u64>,
    pub reason: String,
    pub audit: RestartAudit,
}
