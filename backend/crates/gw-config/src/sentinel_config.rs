use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SentinelConfig {
    /// Explicit sentinel file location. Defaults to the state directory.
    pub path: Option<String>,
}
