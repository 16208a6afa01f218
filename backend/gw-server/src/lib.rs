pub mod api;
pub mod app_state;
pub mod cli;
pub mod doctor;
pub mod error;
pub mod health;
pub mod logger;
pub mod relaunch;
pub mod routes;
pub mod shutdown_coordinator;
pub mod signals;

#[cfg(test)]
mod tests;

pub use api::error::{ApiError, Result as ApiResult};
pub use api::extractors::actor::Actor;
pub use app_state::{AppState, SERVICE_FILENAME};
pub use error::{Result as ServerResult, ServerError};
pub use shutdown_coordinator::{ShutdownCoordinator, ShutdownGuard, ShutdownKind};

pub use crate::routes::build_router;
