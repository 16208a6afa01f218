use crate::UpdateStep;

use serde::{Deserialize, Serialize};

/// Step record as stored in the restart sentinel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentinelStep {
    pub name: String,
    pub command: String,
    pub cwd: String,
    pub duration_ms: u64,
    pub log: SentinelStepLog,
}

/// Captured process output for a sentinel step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentinelStepLog {
    pub stdout_tail: Option<String>,
    pub stderr_tail: Option<String>,
    pub exit_code: Option<i32>,
}

impl From<&UpdateStep> for SentinelStep {
    fn from(step: &UpdateStep) -> Self {
        Self {
            name: step.name.clone(),
            command: step.command.clone(),
            cwd: step.cwd.clone(),
            duration_ms: step.duration_ms,
            log: SentinelStepLog {
                stdout_tail: step.stdout_tail.clone(),
                stderr_tail: step.stderr_tail.clone(),
                exit_code: step.exit_code,
            },
        }
    }
}
