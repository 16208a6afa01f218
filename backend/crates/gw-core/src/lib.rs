pub mod error;
pub mod models;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result};
pub use models::control_plane_actor::ControlPlaneActor;
pub use models::delivery_context::{DeliveryContext, DeliveryInfo};
pub use models::restart_audit::RestartAudit;
pub use models::restart_schedule_request::RestartScheduleRequest;
pub use models::restart_schedule_result::RestartScheduleResult;
pub use models::restart_sentinel_payload::{RestartSentinelPayload, SENTINEL_KIND_UPDATE};
pub use models::sentinel_stats::SentinelStats;
pub use models::sentinel_step::{SentinelStep, SentinelStepLog};
pub use models::update_channel::UpdateChannel;
pub use models::update_outcome::{MODE_UNKNOWN, UpdateOutcome};
pub use models::update_run_request::UpdateRunRequest;
pub use models::update_run_response::{SentinelInfo, UpdateRunResponse};
pub use models::update_status::UpdateStatus;
pub use models::update_step::UpdateStep;

/// Reason attached to every restart requested by a successful `update.run`.
pub const UPDATE_RUN_RESTART_REASON: &str = "update.run";

/// Lower bound applied to caller-supplied update timeouts.
pub const MIN_UPDATE_TIMEOUT_MS: u64 = 1000;
