use crate::{RestartScheduleResult, RestartSentinelPayload, UpdateOutcome};

use serde::{Deserialize, Serialize};

/// Response to `update.run`, always produced regardless of how the run went
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRunResponse {
    /// False only when the outcome status is `error`
    pub ok: bool,
    pub result: UpdateOutcome,
    /// `None` when no restart was attempted
    pub restart: Option<RestartScheduleResult>,
    pub sentinel: SentinelInfo,
}

/// Where the sentinel landed, and what was in it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentinelInfo {
    /// `None` when the write failed
    pub path: Option<String>,
    pub payload: RestartSentinelPayload,
}
