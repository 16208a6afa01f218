use crate::Result as UpdateErrorResult;

use gw_core::{UpdateChannel, UpdateOutcome};

use std::path::PathBuf;

use async_trait::async_trait;

/// Inputs for one update run
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRunOptions {
    /// Overall budget; the runner default applies when unset
    pub timeout_ms: Option<u64>,
    /// Installation root the update operates on
    pub cwd: PathBuf,
    pub channel: Option<UpdateChannel>,
}

/// Performs the actual software update.
///
/// Two failure shapes are possible and both are valid: returning `Err`
/// (the update could not be run at all) and returning an outcome whose
/// status is `error` (the update ran and failed, possibly with step data).
#[async_trait]
pub trait UpdateRunner: Send + Sync {
    async fn run(&self, options: UpdateRunOptions) -> UpdateErrorResult<UpdateOutcome>;
}
