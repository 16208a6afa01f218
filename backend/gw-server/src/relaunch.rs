use crate::error::{Result as ServerErrorResult, ServerError};

use std::panic::Location;
use std::process::Command;

use error_location::ErrorLocation;
use log::info;

/// Replace the current process with a fresh copy of the same binary.
///
/// On unix this only returns on failure. Elsewhere a child is spawned and
/// the caller is expected to exit.
pub fn relaunch() -> ServerErrorResult<()> {
    let exe = std::env::current_exe().map_err(|e| ServerError::Exec {
        path: std::path::PathBuf::from("<current executable>"),
        source: e,
        location: ErrorLocation::from(Location::caller()),
    })?;

    let mut command = Command::new(&exe);
    command.args(std::env::args_os().skip(1));

    info!("Relaunching {}", exe.display());

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;

        let e = command.exec();
        Err(ServerError::Exec {
            path: exe,
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })
    }

    #[cfg(not(unix))]
    {
        command.spawn().map_err(|e| ServerError::Exec {
            path: exe.clone(),
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })?;
        Ok(())
    }
}
