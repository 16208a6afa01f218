use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_MAX_RESTART_DELAY_MS, DEFAULT_RESTART_DELAY_MS,
    MAX_MAX_RESTART_DELAY_MS,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RestartConfig {
    /// Delay used when a restart request does not specify one
    pub default_delay_ms: u64,
    /// Upper clamp for requested delays
    pub max_delay_ms: u64,
}

impl Default for RestartConfig {
    fn default() -> Self {
        Self {
            default_delay_ms: DEFAULT_RESTART_DELAY_MS,
            max_delay_ms: DEFAULT_MAX_RESTART_DELAY_MS,
        }
    }
}

impl RestartConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.max_delay_ms > MAX_MAX_RESTART_DELAY_MS {
            return Err(ConfigError::restart(format!(
                "restart.max_delay_ms must be <= {}, got {}",
                MAX_MAX_RESTART_DELAY_MS, self.max_delay_ms
            )));
        }

        if self.default_delay_ms > self.max_delay_ms {
            return Err(ConfigError::restart(format!(
                "restart.default_delay_ms ({}) cannot exceed restart.max_delay_ms ({})",
                self.default_delay_ms, self.max_delay_ms
            )));
        }

        Ok(())
    }
}
