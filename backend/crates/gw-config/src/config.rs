use crate::{
    CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR_NAME,
    DEFAULT_STATE_DIR_NAME, LoggingConfig, RestartConfig, SENTINEL_FILENAME, STATE_DIR_ENV,
    SentinelConfig, ServerConfig, UpdateConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub update: UpdateConfig,
    pub restart: RestartConfig,
    pub sentinel: SentinelConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for GW_CONFIG_DIR env var, else use ./.gw/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply GW_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: GW_CONFIG_DIR env var > ./.gw/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR_NAME))
    }

    /// Get the state directory that holds the restart sentinel.
    ///
    /// Lives under the home directory so a redeploy of the service tree
    /// does not wipe it. Priority: GW_STATE_DIR env var > ~/.gw/
    pub fn state_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(STATE_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(DEFAULT_STATE_DIR_NAME))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.update.validate()?;
        self.restart.validate()?;

        if let Some(path) = &self.sentinel.path {
            if path.trim().is_empty() {
                return Err(ConfigError::config("sentinel.path cannot be blank"));
            }
            // A relative path would land wherever the process was started
            if !Path::new(path).is_absolute() {
                return Err(ConfigError::config(format!(
                    "sentinel.path must be absolute, got '{path}'"
                )));
            }
        }

        Ok(())
    }

    /// Location of the restart sentinel file.
    ///
    /// `validate()` rejects a relative `sentinel.path`.
    pub fn sentinel_path(&self) -> ConfigErrorResult<PathBuf> {
        match &self.sentinel.path {
            Some(path) => Ok(PathBuf::from(path)),
            None => Ok(Self::state_dir()?.join(SENTINEL_FILENAME)),
        }
    }

    /// Absolute path of the log file, if file logging is configured.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match &self.logging.file {
            Some(filename) => {
                let log_dir = Self::config_dir()?.join(&self.logging.dir);
                Ok(Some(log_dir.join(filename)))
            }
            None => Ok(None),
        }
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        if !self.server.cors_origins.is_empty() {
            info!("  cors origins: {}", self.server.cors_origins.join(", "));
        }

        info!(
            "  update: channel={}, root={}, mode={}, timeout={}ms",
            self.update
                .normalized_channel()
                .map(|c| c.as_str())
                .unwrap_or("default"),
            self.update.root.as_deref().unwrap_or("<auto>"),
            if self.update.command.is_some() {
                "command"
            } else {
                "git"
            },
            self.update.timeout_ms
        );

        info!(
            "  restart: default_delay={}ms, max_delay={}ms",
            self.restart.default_delay_ms, self.restart.max_delay_ms
        );

        match self.sentinel_path() {
            Ok(path) => info!("  sentinel: {}", path.display()),
            Err(e) => info!("  sentinel: <unresolved> ({e})"),
        }

        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("GW_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("GW_SERVER_PORT", &mut self.server.port);
        Self::apply_env_list("GW_SERVER_CORS_ORIGINS", &mut self.server.cors_origins);

        // Update
        Self::apply_env_option_string("GW_UPDATE_CHANNEL", &mut self.update.channel);
        Self::apply_env_option_string("GW_UPDATE_ROOT", &mut self.update.root);
        Self::apply_env_option_string("GW_UPDATE_COMMAND", &mut self.update.command);
        Self::apply_env_option_string(
            "GW_UPDATE_BUILD_COMMAND",
            &mut self.update.build_command,
        );
        Self::apply_env_parse("GW_UPDATE_TIMEOUT_MS", &mut self.update.timeout_ms);

        // Restart
        Self::apply_env_parse(
            "GW_RESTART_DEFAULT_DELAY_MS",
            &mut self.restart.default_delay_ms,
        );
        Self::apply_env_parse("GW_RESTART_MAX_DELAY_MS", &mut self.restart.max_delay_ms);

        // Sentinel
        Self::apply_env_option_string("GW_SENTINEL_PATH", &mut self.sentinel.path);

        // Logging
        Self::apply_env_parse("GW_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("GW_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("GW_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for comma-separated lists
    fn apply_env_list(var_name: &str, target: &mut Vec<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect();
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
