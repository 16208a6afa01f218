
use crate::{
    PackageRootOptions, PackageRootResolver, RefreshOptions, Result as UpdateErrorResult,
    ServiceMetadataRefresher, UpdateError, UpdateRunOptions, UpdateRunner,
};

use gw_core::{RestartSentinelPayload, UpdateOutcome};
use gw_restart::{RestartError, RestartScheduler, RestartSignal, SentinelStore};

use std::panic::Location;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use error_location::ErrorLocation;

/// What a [`StubRunner`] does when invoked
pub(crate) enum RunnerBehavior {
    Return(UpdateOutcome),
    Raise(String),
    Panic,
}

pub(crate) struct StubRunner {
    behavior: RunnerBehavior,
    calls: Mutex<Vec<UpdateRunOptions>>,
}

impl StubRunner {
    pub(crate) fn new(behavior: RunnerBehavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<UpdateRunOptions> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpdateRunner for StubRunner {
    async fn run(&self, options: UpdateRunOptions) -> UpdateErrorResult<UpdateOutcome> {
        self.calls.lock().unwrap().push(options);
        match &self.behavior {
            RunnerBehavior::Return(outcome) => Ok(outcome.clone()),
            RunnerBehavior::Raise(message) => Err(UpdateError::Runner {
                message: message.clone(),
                location: ErrorLocation::from(Location::caller()),
            }),
            RunnerBehavior::Panic => panic!("runner exploded"),
        }
    }
}

pub(crate) enum ResolverBehavior {
    Found(PathBuf),
    NotFound,
    Raise,
}

pub(crate) struct StubResolver {
    behavior: ResolverBehavior,
}

impl StubResolver {
    pub(crate) fn new(behavior: ResolverBehavior) -> Self {
        Self { behavior }
    }
}

#[async_trait]
impl PackageRootResolver for StubResolver {
    async fn resolve(&self, _options: &PackageRootOptions) -> UpdateErrorResult<Option<PathBuf>> {
        match &self.behavior {
            ResolverBehavior::Found(path) => Ok(Some(path.clone())),
            ResolverBehavior::NotFound => Ok(None),
            ResolverBehavior::Raise => Err(UpdateError::RootResolution {
                message: String::from("no package root"),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

#[derive(Default)]
pub(crate) struct StubRefresher {
    fail: bool,
    calls: Mutex<Vec<RefreshOptions>>,
}

impl StubRefresher {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<RefreshOptions> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ServiceMetadataRefresher for StubRefresher {
    async fn refresh(&self, options: RefreshOptions) -> UpdateErrorResult<()> {
        self.calls.lock().unwrap().push(options);
        if self.fail {
            return Err(UpdateError::Metadata {
                message: String::from("install failed"),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct StubSentinelStore {
    fail: bool,
    written: Mutex<Vec<RestartSentinelPayload>>,
    scheduler: Mutex<Option<Arc<RestartScheduler>>>,
    pending_at_write: Mutex<Vec<bool>>,
}

impl StubSentinelStore {
    pub(crate) const PATH: &'static str = "/state/restart-sentinel.json";

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Record the scheduler's pending state every time a write happens.
    pub(crate) fn observe(&self, scheduler: Arc<RestartScheduler>) {
        *self.scheduler.lock().unwrap() = Some(scheduler);
    }

    pub(crate) fn pending_at_write(&self) -> Vec<bool> {
        self.pending_at_write.lock().unwrap().clone()
    }

    pub(crate) fn written(&self) -> Vec<RestartSentinelPayload> {
        self.written.lock().unwrap().clone()
    }
}

#[async_trait]
impl SentinelStore for StubSentinelStore {
    async fn write(&self, payload: &RestartSentinelPayload) -> Result<PathBuf, RestartError> {
        if let Some(scheduler) = self.scheduler.lock().unwrap().as_ref() {
            self.pending_at_write
                .lock()
                .unwrap()
                .push(scheduler.is_pending());
        }
        if self.fail {
            return Err(RestartError::SentinelIo {
                path: PathBuf::from(Self::PATH),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.written.lock().unwrap().push(payload.clone());
        Ok(PathBuf::from(Self::PATH))
    }
}

#[derive(Default)]
pub(crate) struct RecordingSignal {
    raised: AtomicUsize,
}

impl RecordingSignal {
    pub(crate) fn count(&self) -> usize {
        self.raised.load(Ordering::SeqCst)
    }
}

impl RestartSignal for RecordingSignal {
    fn raise(&self) -> Result<(), RestartError> {
        self.raised.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
