//! Restart sentinel file.
//!
//! A single-slot JSON record describing the most recent restart-triggering
//! action. The service writes it right before scheduling a restart so the
//! next process (or whoever supervises it) can explain why the restart
//! happened.
//!
//! File location: configured `sentinel.path`, else
//! `<state_dir>/restart-sentinel.json`.
//!
//! ## Atomic replace
//!
//! The record is written to a temp file in the target directory and renamed
//! over the previous sentinel, so a concurrent reader sees either the old
//! record or the new one, never a torn write.

use crate::{RestartError, Result as RestartErrorResult};

use gw_core::RestartSentinelPayload;

use std::io::Write;
use std::panic::Location;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

pub const SENTINEL_RECORD_VERSION: u32 = 1;

const DOCTOR_COMMAND: &str = "gw-server doctor --non-interactive";

/// On-disk envelope around the payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentinelRecord {
    pub version: u32,
    pub payload: RestartSentinelPayload,
}

/// Hint stored in every sentinel for non-interactive troubleshooting.
pub fn format_doctor_hint() -> String {
    format!("Run: {DOCTOR_COMMAND}")
}

/// Durable single-slot storage for restart sentinels.
#[async_trait]
pub trait SentinelStore: Send + Sync {
    /// Persist the payload, replacing any previous sentinel.
    /// Returns the location written to.
    async fn write(&self, payload: &RestartSentinelPayload) -> RestartErrorResult<PathBuf>;
}

/// Sentinel stored as a JSON file at a well-known path
#[derive(Debug, Clone)]
pub struct FileSentinelStore {
    path: PathBuf,
}

impl FileSentinelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current sentinel, if any.
    ///
    /// Only the `doctor` command reads sentinels; the update flow never does.
    pub fn read(&self) -> RestartErrorResult<Option<SentinelRecord>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;

        let record = serde_json::from_str(&content).map_err(|e| {
            RestartError::SentinelSerialize {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        Ok(Some(record))
    }

    /// Blocking write used by [`SentinelStore::write`].
    pub fn write_blocking(&self, payload: &RestartSentinelPayload) -> RestartErrorResult<PathBuf> {
        let record = SentinelRecord {
            version: SENTINEL_RECORD_VERSION,
            payload: payload.clone(),
        };

        let content = serde_json::to_vec_pretty(&record).map_err(|e| {
            RestartError::SentinelSerialize {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        std::fs::create_dir_all(&dir).map_err(|e| RestartError::SentinelIo {
            path: dir.clone(),
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| self.io_error(e))?;
        tmp.write_all(&content).map_err(|e| self.io_error(e))?;
        tmp.as_file().sync_all().map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        Ok(self.path.clone())
    }

    #[track_caller]
    fn io_error(&self, source: std::io::Error) -> RestartError {
        RestartError::SentinelIo {
            path: self.path.clone(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

#[async_trait]
impl SentinelStore for FileSentinelStore {
    async fn write(&self, payload: &RestartSentinelPayload) -> RestartErrorResult<PathBuf> {
        let store = self.clone();
        let payload = payload.clone();

        tokio::task::spawn_blocking(move || store.write_blocking(&payload))
            .await
            .map_err(|e| RestartError::Internal {
                message: format!("sentinel write task failed: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })?
    }
}
