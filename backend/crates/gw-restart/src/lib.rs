pub mod error;
pub mod restart_scheduler;
pub mod restart_sentinel;
pub mod restart_signal;
pub mod restart_state;

#[cfg(test)]
mod tests;

pub use error::{RestartError, Result};
pub use restart_scheduler::RestartScheduler;
pub use restart_sentinel::{
    FileSentinelStore, SENTINEL_RECORD_VERSION, SentinelRecord, SentinelStore, format_doctor_hint,
};
pub use restart_signal::{ProcessRestartSignal, RestartSignal};
pub use restart_state::{PendingRestart, RestartState};
