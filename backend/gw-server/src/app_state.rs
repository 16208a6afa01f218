use crate::ShutdownCoordinator;
use crate::error::Result as ServerErrorResult;

use gw_config::Config;
use gw_restart::{FileSentinelStore, ProcessRestartSignal, RestartScheduler};
use gw_update::{
    CommandUpdateRunner, ExecutableRootResolver, ServiceFileRefresher, UpdateCollaborators,
    UpdateOrchestrator,
};

use std::path::PathBuf;
use std::sync::Arc;

/// Service install metadata, kept next to config.toml
pub const SERVICE_FILENAME: &str = "service.json";

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<UpdateOrchestrator>,
    pub shutdown: ShutdownCoordinator,
    /// Browser origins the CORS layer admits
    pub cors_origins: Vec<String>,
}

impl AppState {
    pub fn new(orchestrator: Arc<UpdateOrchestrator>, shutdown: ShutdownCoordinator) -> Self {
        Self {
            orchestrator,
            shutdown,
            cors_origins: Vec::new(),
        }
    }

    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }

    /// Wire the production collaborators from configuration.
    pub fn from_config(config: &Config, shutdown: ShutdownCoordinator) -> ServerErrorResult<Self> {
        let channel = config.update.normalized_channel();
        let root_override = config.update.root.as_ref().map(PathBuf::from);

        let collaborators = UpdateCollaborators {
            runner: Arc::new(CommandUpdateRunner::new(
                config.update.command.clone(),
                config.update.build_command.clone(),
                config.update.timeout_ms,
            )),
            root_resolver: Arc::new(ExecutableRootResolver::new(root_override.clone())),
            metadata_refresher: Arc::new(ServiceFileRefresher::new(
                Config::config_dir()?.join(SERVICE_FILENAME),
                root_override,
                channel,
            )),
            sentinel_store: Arc::new(FileSentinelStore::new(config.sentinel_path()?)),
        };

        let scheduler = Arc::new(RestartScheduler::new(
            config.restart.default_delay_ms,
            config.restart.max_delay_ms,
            Arc::new(ProcessRestartSignal),
        ));

        let orchestrator = UpdateOrchestrator::new(collaborators, scheduler, channel);

        Ok(Self::new(Arc::new(orchestrator), shutdown)
            .with_cors_origins(config.server.cors_origins.clone()))
    }

    pub fn scheduler(&self) -> &Arc<RestartScheduler> {
        self.orchestrator.scheduler()
    }
}
