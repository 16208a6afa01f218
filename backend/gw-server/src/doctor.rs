//! `gw-server doctor`: explain the last restart and the effective setup.
//!
//! Read-only. Problems found while reading state are reported in the output
//! rather than failing the command.

use crate::SERVICE_FILENAME;
use crate::error::Result as ServerErrorResult;

use gw_config::Config;
use gw_restart::{FileSentinelStore, SentinelRecord};
use gw_update::{ServiceFileRefresher, ServiceMetadata};

use std::fmt::Write;

use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorReport {
    pub version: String,
    pub sentinel_path: String,
    pub sentinel: Option<SentinelRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentinel_error: Option<String>,
    pub service_metadata: Option<ServiceMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_metadata_error: Option<String>,
    pub update_channel: Option<String>,
    pub update_mode: String,
    pub restart_default_delay_ms: u64,
    pub restart_max_delay_ms: u64,
}

impl DoctorReport {
    pub fn collect(config: &Config) -> ServerErrorResult<Self> {
        let sentinel_path = config.sentinel_path()?;
        let (sentinel, sentinel_error) = match FileSentinelStore::new(&sentinel_path).read() {
            Ok(record) => (record, None),
            Err(e) => (None, Some(e.to_string())),
        };

        let refresher = ServiceFileRefresher::new(
            Config::config_dir()?.join(SERVICE_FILENAME),
            None,
            None,
        );
        let (service_metadata, service_metadata_error) = match refresher.read() {
            Ok(metadata) => (metadata, None),
            Err(e) => (None, Some(e.to_string())),
        };

        Ok(Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            sentinel_path: sentinel_path.display().to_string(),
            sentinel,
            sentinel_error,
            service_metadata,
            service_metadata_error,
            update_channel: config
                .update
                .normalized_channel()
                .map(|c| c.as_str().to_string()),
            update_mode: if config.update.command.is_some() {
                gw_update::MODE_COMMAND.to_string()
            } else {
                gw_update::MODE_GIT.to_string()
            },
            restart_default_delay_ms: config.restart.default_delay_ms,
            restart_max_delay_ms: config.restart.max_delay_ms,
        })
    }

    /// Machine-readable form used by `--non-interactive`
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "gw-server {}", self.version);
        let _ = writeln!(out, "sentinel: {}", self.sentinel_path);

        match (&self.sentinel, &self.sentinel_error) {
            (_, Some(e)) => {
                let _ = writeln!(out, "  unreadable: {e}");
            }
            (Some(record), None) => {
                let payload = &record.payload;
                let stats = &payload.stats;
                let _ = writeln!(
                    out,
                    "  last {} status={} mode={} ts={}",
                    payload.kind, payload.status, stats.mode, payload.ts
                );
                let _ = writeln!(
                    out,
                    "  before={} after={}",
                    stats.before.as_deref().unwrap_or("-"),
                    stats.after.as_deref().unwrap_or("-")
                );
                if let Some(reason) = &stats.reason {
                    let _ = writeln!(out, "  reason: {reason}");
                }
                if let Some(message) = &payload.message {
                    let _ = writeln!(out, "  note: {message}");
                }
                for step in &stats.steps {
                    let _ = writeln!(
                        out,
                        "  step {} exit={} {}ms",
                        step.name,
                        step.log
                            .exit_code
                            .map(|c| c.to_string())
                            .unwrap_or_else(|| String::from("-")),
                        step.duration_ms
                    );
                }
            }
            (None, None) => {
                let _ = writeln!(out, "  none recorded");
            }
        }

        match (&self.service_metadata, &self.service_metadata_error) {
            (_, Some(e)) => {
                let _ = writeln!(out, "service metadata: unreadable: {e}");
            }
            (Some(metadata), None) => {
                let _ = writeln!(
                    out,
                    "service metadata: {} v{} revision {} refreshed {}",
                    metadata.executable,
                    metadata.version,
                    metadata.revision.as_deref().unwrap_or("unknown"),
                    metadata.refreshed_at
                );
            }
            (None, None) => {
                let _ = writeln!(out, "service metadata: none");
            }
        }

        let _ = writeln!(
            out,
            "update: mode={} channel={}",
            self.update_mode,
            self.update_channel.as_deref().unwrap_or("default")
        );
        let _ = writeln!(
            out,
            "restart: default_delay={}ms max_delay={}ms",
            self.restart_default_delay_ms, self.restart_max_delay_ms
        );

        out
    }
}
