#![allow(dead_code)]

//! Test infrastructure for gw-server HTTP tests

use gw_core::{UpdateOutcome, UpdateStatus};
use gw_restart::{FileSentinelStore, RestartError, RestartScheduler, RestartSignal};
use gw_server::{AppState, ShutdownCoordinator};
use gw_update::{
    PackageRootOptions, PackageRootResolver, RefreshOptions, ServiceMetadataRefresher,
    UpdateCollaborators, UpdateError, UpdateOrchestrator, UpdateRunOptions, UpdateRunner,
};

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tempfile::TempDir;

pub const DEFAULT_DELAY_MS: u64 = 2000;
pub const MAX_DELAY_MS: u64 = 60_000;

/// Runner returning a fixed outcome, or failing with a fixed message
pub struct FixedRunner(pub Result<UpdateOutcome, String>);

#[async_trait]
impl UpdateRunner for FixedRunner {
    async fn run(&self, options: UpdateRunOptions) -> gw_update::Result<UpdateOutcome> {
        match &self.0 {
            Ok(outcome) => Ok(UpdateOutcome {
                root: Some(options.cwd.display().to_string()),
                ..outcome.clone()
            }),
            Err(message) => Err(UpdateError::Runner {
                message: message.clone(),
                location: error_location::ErrorLocation::from(std::panic::Location::caller()),
            }),
        }
    }
}

pub struct FixedRoot(pub PathBuf);

#[async_trait]
impl PackageRootResolver for FixedRoot {
    async fn resolve(&self, _options: &PackageRootOptions) -> gw_update::Result<Option<PathBuf>> {
        Ok(Some(self.0.clone()))
    }
}

pub struct NoopRefresher;

#[async_trait]
impl ServiceMetadataRefresher for NoopRefresher {
    async fn refresh(&self, _options: RefreshOptions) -> gw_update::Result<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingSignal(AtomicUsize);

impl RecordingSignal {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl RestartSignal for RecordingSignal {
    fn raise(&self) -> Result<(), RestartError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub struct TestApp {
    pub state: AppState,
    pub signal: Arc<RecordingSignal>,
    pub sentinel_path: PathBuf,
    pub dir: TempDir,
}

pub fn ok_outcome() -> UpdateOutcome {
    UpdateOutcome {
        status: UpdateStatus::Ok,
        mode: String::from("git"),
        root: None,
        before: Some(String::from("1.2.0")),
        after: Some(String::from("1.3.0")),
        steps: Vec::new(),
        reason: None,
        duration_ms: 300,
    }
}

pub fn create_test_app(runner: FixedRunner) -> TestApp {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let sentinel_path = dir.path().join("state").join("restart-sentinel.json");
    let signal = Arc::new(RecordingSignal::default());

    let collaborators = UpdateCollaborators {
        runner: Arc::new(runner),
        root_resolver: Arc::new(FixedRoot(dir.path().to_path_buf())),
        metadata_refresher: Arc::new(NoopRefresher),
        sentinel_store: Arc::new(FileSentinelStore::new(&sentinel_path)),
    };
    let scheduler = Arc::new(RestartScheduler::new(
        DEFAULT_DELAY_MS,
        MAX_DELAY_MS,
        signal.clone(),
    ));
    let orchestrator = UpdateOrchestrator::new(collaborators, scheduler, None);

    TestApp {
        state: AppState::new(Arc::new(orchestrator), ShutdownCoordinator::new()),
        signal,
        sentinel_path,
        dir,
    }
}
