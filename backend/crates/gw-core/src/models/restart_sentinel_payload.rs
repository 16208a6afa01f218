use crate::{DeliveryContext, DeliveryInfo, SentinelStats, UpdateOutcome, UpdateStatus};

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Action family tag for sentinels written by `update.run`.
pub const SENTINEL_KIND_UPDATE: &str = "update";

/// Durable record of the most recent restart-triggering action.
///
/// Built once per orchestration run and never mutated afterwards; the
/// sentinel store owns the persisted copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestartSentinelPayload {
    pub kind: String,
    pub status: UpdateStatus,
    /// Creation time in epoch milliseconds
    pub ts: i64,
    pub session_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_context: Option<DeliveryContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
    pub message: Option<String>,
    pub doctor_hint: String,
    pub stats: SentinelStats,
}

impl RestartSentinelPayload {
    /// Build the sentinel for an `update.run` outcome.
    pub fn for_update(
        outcome: &UpdateOutcome,
        session_key: &str,
        note: Option<&str>,
        doctor_hint: &str,
    ) -> Self {
        let DeliveryInfo {
            delivery_context,
            thread_id,
        } = DeliveryInfo::from_session_key(session_key);

        Self {
            kind: String::from(SENTINEL_KIND_UPDATE),
            status: outcome.status,
            ts: Utc::now().timestamp_millis(),
            session_key: session_key.to_string(),
            delivery_context,
            thread_id,
            message: note.map(str::to_string),
            doctor_hint: doctor_hint.to_string(),
            stats: SentinelStats::from(outcome),
        }
    }
}
