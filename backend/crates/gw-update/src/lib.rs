pub mod command_update_runner;
pub mod error;
pub mod metadata_refresher;
pub mod package_root;
pub mod step_runner;
pub mod update_orchestrator;
pub mod update_runner;

#[cfg(test)]
mod tests;

pub use command_update_runner::{CommandUpdateRunner, MODE_COMMAND, MODE_GIT};
pub use error::{Result, UpdateError};
pub use metadata_refresher::{
    RefreshOptions, ServiceFileRefresher, ServiceMetadata, ServiceMetadataRefresher,
};
pub use package_root::{ExecutableRootResolver, PackageRootOptions, PackageRootResolver};
pub use update_orchestrator::{UpdateCollaborators, UpdateOrchestrator};
pub use update_runner::{UpdateRunOptions, UpdateRunner};
