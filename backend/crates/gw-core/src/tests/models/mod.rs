mod control_plane_actor;
mod delivery_context;
mod restart_sentinel_payload;
mod update_channel;
mod update_outcome;
mod update_run_request;
mod update_status;
