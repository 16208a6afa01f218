use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RestartError {
    #[error("Sentinel IO error at {path}: {source} {location}")]
    SentinelIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Sentinel serialization failed: {source} {location}")]
    SentinelSerialize {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("Failed to raise restart signal: {message} {location}")]
    Signal {
        message: String,
        location: ErrorLocation,
    },

    #[error("Self-restart is not supported on this platform {location}")]
    Unsupported { location: ErrorLocation },

    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

pub type Result<T> = std::result::Result<T, RestartError>;
