use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("Failed to resolve package root: {message} {location}")]
    RootResolution {
        message: String,
        location: ErrorLocation,
    },

    #[error("Cannot determine working directory: {source} {location}")]
    WorkingDirectory {
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to spawn `{command}`: {source} {location}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("IO error at {path}: {source} {location}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    /// Failure reported by an update runner; the message becomes the
    /// outcome reason verbatim
    #[error("{message}")]
    Runner {
        message: String,
        location: ErrorLocation,
    },

    #[error("Service metadata refresh failed: {message} {location}")]
    Metadata {
        message: String,
        location: ErrorLocation,
    },
}

pub type Result<T> = std::result::Result<T, UpdateError>;
