use serde::{Deserialize, Serialize};

/// What the restart scheduler decided for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestartScheduleResult {
    /// True when the request merged into an already pending restart
    pub coalesced: bool,
    /// The delay that will actually be honored
    pub delay_ms: u64,
}
