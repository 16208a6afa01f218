//! Process signal handling.
//!
//! - SIGUSR1: graceful shutdown, then re-exec (raised by the restart scheduler)
//! - SIGINT / SIGTERM: graceful shutdown, then exit
//!
//! The listener must be installed before the first restart can be scheduled;
//! the default SIGUSR1 disposition terminates the process.

use crate::error::Result as ServerErrorResult;
use crate::{ShutdownCoordinator, ShutdownKind};

#[cfg(unix)]
pub fn install(shutdown: ShutdownCoordinator) -> ServerErrorResult<()> {
    use crate::ServerError;

    use std::panic::Location;

    use error_location::ErrorLocation;
    use log::info;
    use signal_hook::consts::{SIGINT, SIGTERM, SIGUSR1};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGUSR1, SIGINT, SIGTERM]).map_err(|e| ServerError::Signal {
        message: format!("Failed to register signal handlers: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    std::thread::Builder::new()
        .name(String::from("gw-signals"))
        .spawn(move || {
            for sig in signals.forever() {
                let kind = shutdown_kind(sig == SIGUSR1);
                info!("Received signal {sig}, initiating graceful shutdown ({kind:?})");
                shutdown.shutdown(kind);
            }
        })
        .map_err(|e| ServerError::Signal {
            message: format!("Failed to spawn signal thread: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(())
}

#[cfg(not(unix))]
pub fn install(shutdown: ShutdownCoordinator) -> ServerErrorResult<()> {
    use log::{error, info};

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received Ctrl+C, initiating graceful shutdown");
                shutdown.shutdown(ShutdownKind::Stop);
            }
            Err(e) => error!("Failed to listen for Ctrl+C: {}", e),
        }
    });

    Ok(())
}

pub fn shutdown_kind(restart_requested: bool) -> ShutdownKind {
    if restart_requested {
        ShutdownKind::Restart
    } else {
        ShutdownKind::Stop
    }
}
