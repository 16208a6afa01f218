use crate::{ConfigError, ConfigErrorResult, DEFAULT_UPDATE_TIMEOUT_MS};

use gw_core::{MIN_UPDATE_TIMEOUT_MS, UpdateChannel};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpdateConfig {
    /// Release channel: stable, beta or dev. Anything else counts as unset.
    pub channel: Option<String>,
    /// Installation root override; resolved from the executable when unset
    pub root: Option<String>,
    /// Shell command that performs the whole update instead of the git flow
    pub command: Option<String>,
    /// Shell command run after a successful git update
    pub build_command: Option<String>,
    /// Runner default when the request carries no timeout
    pub timeout_ms: u64,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            channel: None,
            root: None,
            command: None,
            build_command: None,
            timeout_ms: DEFAULT_UPDATE_TIMEOUT_MS,
        }
    }
}

impl UpdateConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.timeout_ms < MIN_UPDATE_TIMEOUT_MS {
            return Err(ConfigError::update(format!(
                "update.timeout_ms must be >= {}, got {}",
                MIN_UPDATE_TIMEOUT_MS, self.timeout_ms
            )));
        }

        if let Some(command) = &self.command
            && command.trim().is_empty()
        {
            return Err(ConfigError::update("update.command cannot be blank"));
        }

        Ok(())
    }

    /// Configured channel after normalization
    pub fn normalized_channel(&self) -> Option<UpdateChannel> {
        UpdateChannel::normalize(self.channel.as_deref())
    }
}
