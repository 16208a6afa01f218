pub mod control_plane_actor;
pub mod delivery_context;
pub mod restart_audit;
pub mod restart_schedule_request;
pub mod restart_schedule_result;
pub mod restart_sentinel_payload;
pub mod sentinel_stats;
pub mod sentinel_step;
pub mod update_channel;
pub mod update_outcome;
pub mod update_run_request;
pub mod update_run_response;
pub mod update_status;
pub mod update_step;
