//! Service installation metadata.
//!
//! After a successful update the supervisor-facing metadata (what to launch,
//! from where, on which channel) is rewritten so it matches the new build.

use crate::{Result as UpdateErrorResult, UpdateError};

use gw_core::UpdateChannel;

use std::io::Write;
use std::panic::Location;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshOptions {
    /// Rewrite even when metadata already exists
    pub force: bool,
    /// Suppress info-level logging
    pub silent: bool,
    /// Root the update just ran in; overrides the configured root
    pub root: Option<PathBuf>,
    /// Revision now checked out (the outcome's `after` marker)
    pub revision: Option<String>,
}

/// Contents of `service.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMetadata {
    pub executable: String,
    pub args: Vec<String>,
    pub root: Option<String>,
    pub channel: Option<UpdateChannel>,
    #[serde(default)]
    pub revision: Option<String>,
    /// Version of the binary that wrote this file
    pub version: String,
    pub refreshed_at: DateTime<Utc>,
}

#[async_trait]
pub trait ServiceMetadataRefresher: Send + Sync {
    async fn refresh(&self, options: RefreshOptions) -> UpdateErrorResult<()>;
}

/// Writes service metadata as JSON next to the config file.
#[derive(Debug, Clone)]
pub struct ServiceFileRefresher {
    path: PathBuf,
    root: Option<PathBuf>,
    channel: Option<UpdateChannel>,
}

impl ServiceFileRefresher {
    pub fn new(path: impl Into<PathBuf>, root: Option<PathBuf>, channel: Option<UpdateChannel>) -> Self {
        Self {
            path: path.into(),
            root,
            channel,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> UpdateErrorResult<Option<ServiceMetadata>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| UpdateError::Metadata {
                message: format!("invalid {}: {e}", self.path.display()),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    fn current_metadata(&self, options: &RefreshOptions) -> UpdateErrorResult<ServiceMetadata> {
        let executable = std::env::current_exe().map_err(|e| UpdateError::Metadata {
            message: format!("cannot locate current executable: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(ServiceMetadata {
            executable: executable.display().to_string(),
            args: std::env::args().skip(1).collect(),
            root: options
                .root
                .as_ref()
                .or(self.root.as_ref())
                .map(|r| r.display().to_string()),
            channel: self.channel,
            revision: options.revision.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            refreshed_at: Utc::now(),
        })
    }

    fn write_blocking(&self, metadata: &ServiceMetadata) -> UpdateErrorResult<()> {
        let content = serde_json::to_vec_pretty(metadata).map_err(|e| UpdateError::Metadata {
            message: format!("cannot serialize service metadata: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;

        // Readers see either the old file or the new one
        let mut tmp = NamedTempFile::new_in(parent).map_err(|e| self.io_error(e))?;
        tmp.write_all(&content).map_err(|e| self.io_error(e))?;
        tmp.as_file().sync_all().map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        Ok(())
    }

    #[track_caller]
    fn io_error(&self, source: std::io::Error) -> UpdateError {
        UpdateError::Io {
            path: self.path.clone(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

#[async_trait]
impl ServiceMetadataRefresher for ServiceFileRefresher {
    async fn refresh(&self, options: RefreshOptions) -> UpdateErrorResult<()> {
        if !options.force && self.path.exists() {
            debug!("service metadata present at {}, skipping", self.path.display());
            return Ok(());
        }

        let metadata = self.current_metadata(&options)?;
        let refresher = self.clone();

        tokio::task::spawn_blocking(move || refresher.write_blocking(&metadata))
            .await
            .map_err(|e| UpdateError::Metadata {
                message: format!("metadata write task failed: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })??;

        if !options.silent {
            info!("service metadata refreshed at {}", self.path.display());
        }

        Ok(())
    }
}
