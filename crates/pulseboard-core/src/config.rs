use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 8090;
pub const DEFAULT_BIND: &str = "127.0.0.1";
/// Per-topic buffer for the broadcast emitter. A subscriber that falls more
/// than this many updates behind starts losing the oldest ones.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Top-level config (pulseboard.toml + PULSEBOARD_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PulseboardConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub dashboards: DashboardsConfig,
}

impl Default for PulseboardConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            dashboards: DashboardsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Broadcast buffer per dashboard topic.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardsConfig {
    /// Directory scanned for `*.json` descriptor documents at startup.
    #[serde(default = "default_dashboards_dir")]
    pub dir: String,
}

impl Default for DashboardsConfig {
    fn default() -> Self {
        Self { dir: default_dashboards_dir() }
    }
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_channel_capacity() -> usize {
    DEFAULT_CHANNEL_CAPACITY
}
fn default_dashboards_dir() -> String {
    "./dashboards".to_string()
}

impl PulseboardConfig {
    /// Load config from a TOML file with PULSEBOARD_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. ./pulseboard.toml
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path.unwrap_or("pulseboard.toml");

        let config: PulseboardConfig = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("PULSEBOARD_").split("_"))
            .extract()
            .map_err(|e| crate::error::CoreError::Config(e.to_string()))?;

        Ok(config)
    }
}
