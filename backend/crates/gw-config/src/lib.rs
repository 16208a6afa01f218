mod config;
mod error;
mod log_level;
mod logging_config;
mod restart_config;
mod sentinel_config;
mod server_config;
mod update_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use restart_config::RestartConfig;
pub use sentinel_config::SentinelConfig;
pub use server_config::ServerConfig;
pub use update_config::UpdateConfig;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8700;
const MIN_PORT: u16 = 1024;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;

/// Runner-side default when the caller supplies no timeout (20 minutes)
const DEFAULT_UPDATE_TIMEOUT_MS: u64 = 20 * 60 * 1000;

const DEFAULT_RESTART_DELAY_MS: u64 = 2000;
const DEFAULT_MAX_RESTART_DELAY_MS: u64 = 60_000;
const MAX_MAX_RESTART_DELAY_MS: u64 = 60 * 60 * 1000;

const CONFIG_DIR_ENV: &str = "GW_CONFIG_DIR";
const STATE_DIR_ENV: &str = "GW_STATE_DIR";
const DEFAULT_CONFIG_DIR_NAME: &str = ".gw";
const DEFAULT_STATE_DIR_NAME: &str = ".gw";
const CONFIG_FILENAME: &str = "config.toml";
const SENTINEL_FILENAME: &str = "restart-sentinel.json";
