//! `update.run`: apply an update, record it, and restart on success.
//!
//! Sequence for a single request:
//! 1. run the update (any raised error becomes a synthetic `error` outcome)
//! 2. write the restart sentinel (best-effort)
//! 3. on `ok` only: refresh service metadata (best-effort), schedule restart
//!
//! The orchestrator always produces a response. Nothing here returns `Err`.

use crate::{
    PackageRootOptions, PackageRootResolver, RefreshOptions, Result as UpdateErrorResult,
    ServiceMetadataRefresher, UpdateRunOptions, UpdateRunner,
};

use gw_core::{
    ControlPlaneActor, RestartAudit, RestartScheduleRequest, RestartScheduleResult,
    RestartSentinelPayload, SentinelInfo, UPDATE_RUN_RESTART_REASON, UpdateChannel,
    UpdateOutcome, UpdateRunRequest, UpdateRunResponse,
};
use gw_restart::{RestartScheduler, SentinelStore, format_doctor_hint};

use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::sync::Arc;

use futures::FutureExt;
use log::{error, info, warn};

/// External services the orchestrator depends on
#[derive(Clone)]
pub struct UpdateCollaborators {
    pub runner: Arc<dyn UpdateRunner>,
    pub root_resolver: Arc<dyn PackageRootResolver>,
    pub metadata_refresher: Arc<dyn ServiceMetadataRefresher>,
    pub sentinel_store: Arc<dyn SentinelStore>,
}

pub struct UpdateOrchestrator {
    collaborators: UpdateCollaborators,
    scheduler: Arc<RestartScheduler>,
    channel: Option<UpdateChannel>,
}

impl UpdateOrchestrator {
    pub fn new(
        collaborators: UpdateCollaborators,
        scheduler: Arc<RestartScheduler>,
        channel: Option<UpdateChannel>,
    ) -> Self {
        Self {
            collaborators,
            scheduler,
            channel,
        }
    }

    pub fn scheduler(&self) -> &Arc<RestartScheduler> {
        &self.scheduler
    }

    pub async fn run(
        &self,
        request: UpdateRunRequest,
        actor: &ControlPlaneActor,
    ) -> UpdateRunResponse {
        let outcome = self.run_update(request.effective_timeout_ms()).await;

        let payload = RestartSentinelPayload::for_update(
            &outcome,
            &request.session_key,
            request.note.as_deref(),
            &format_doctor_hint(),
        );

        let sentinel_path = match self.collaborators.sentinel_store.write(&payload).await {
            Ok(path) => Some(path.display().to_string()),
            Err(e) => {
                error!("update.run sentinel write failed {actor}: {e}");
                None
            }
        };

        let restart = if outcome.is_ok() {
            Some(self.restart_after_update(&request, &outcome, actor).await)
        } else {
            None
        };

        info!(
            "update.run completed {actor} changedPaths=<n/a> restartReason={} status={}",
            UPDATE_RUN_RESTART_REASON, outcome.status
        );
        if let Some(restart) = &restart
            && restart.coalesced
        {
            warn!(
                "update.run restart coalesced {actor} delayMs={}",
                restart.delay_ms
            );
        }

        UpdateRunResponse {
            ok: !outcome.is_error(),
            result: outcome,
            restart,
            sentinel: SentinelInfo {
                path: sentinel_path,
                payload,
            },
        }
    }

    /// Runner boundary: errors and panics both collapse into an outcome.
    async fn run_update(&self, timeout_ms: Option<u64>) -> UpdateOutcome {
        match AssertUnwindSafe(self.invoke_runner(timeout_ms))
            .catch_unwind()
            .await
        {
            Ok(result) => UpdateOutcome::from_runner_result(result),
            Err(_) => UpdateOutcome::synthetic_error("update runner panicked"),
        }
    }

    async fn invoke_runner(&self, timeout_ms: Option<u64>) -> UpdateErrorResult<UpdateOutcome> {
        let options = PackageRootOptions::current()?;
        let root = self.collaborators.root_resolver.resolve(&options).await?;
        let cwd = root.unwrap_or(options.cwd);

        self.collaborators
            .runner
            .run(UpdateRunOptions {
                timeout_ms,
                cwd,
                channel: self.channel,
            })
            .await
    }

    async fn restart_after_update(
        &self,
        request: &UpdateRunRequest,
        outcome: &UpdateOutcome,
        actor: &ControlPlaneActor,
    ) -> RestartScheduleResult {
        let refresh = RefreshOptions {
            force: true,
            silent: true,
            root: outcome.root.as_ref().map(PathBuf::from),
            revision: outcome.after.clone(),
        };
        if let Err(e) = self.collaborators.metadata_refresher.refresh(refresh).await {
            warn!("update.run service env refresh failed {actor} error={e}");
        }

        self.scheduler.schedule(RestartScheduleRequest {
            delay_ms: request.restart_delay_ms,
            reason: String::from(UPDATE_RUN_RESTART_REASON),
            audit: RestartAudit::from(actor),
        })
    }
}

impl std::fmt::Debug for UpdateOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateOrchestrator")
            .field("scheduler", &self.scheduler)
            .field("channel", &self.channel)
            .finish()
    }
}
