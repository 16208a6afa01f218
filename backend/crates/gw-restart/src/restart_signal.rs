use crate::Result as RestartErrorResult;

/// Delivers the "restart now" notification to the running service.
pub trait RestartSignal: Send + Sync {
    fn raise(&self) -> RestartErrorResult<()>;
}

/// Sends SIGUSR1 to the current process.
///
/// The server's signal listener turns SIGUSR1 into a graceful shutdown
/// followed by a re-exec of the same binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRestartSignal;

#[cfg(unix)]
impl RestartSignal for ProcessRestartSignal {
    fn raise(&self) -> RestartErrorResult<()> {
        use crate::RestartError;

        use std::panic::Location;

        use error_location::ErrorLocation;
        use nix::sys::signal::{Signal, kill};
        use nix::unistd::Pid;

        kill(Pid::this(), Signal::SIGUSR1).map_err(|errno| RestartError::Signal {
            message: format!("kill(SIGUSR1) failed: {errno}"),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

#[cfg(not(unix))]
impl RestartSignal for ProcessRestartSignal {
    fn raise(&self) -> RestartErrorResult<()> {
        use crate::RestartError;

        use std::panic::Location;

        use error_location::ErrorLocation;

        Err(RestartError::Unsupported {
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
