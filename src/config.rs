use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable that overrides the configured backend URL.
pub const BACKEND_URL_ENV: &str = "TRPG_BACKEND_URL";

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tui: TuiConfig,
    pub backend: BackendConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
    /// Enable mouse support in the terminal.
    pub mouse_enabled: bool,
}

/// Game-master backend connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 50,
            mouse_enabled: false,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, or `~/.config/trpg-client/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load(path: Option<&Path>) -> Self {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_path);
        match std::fs::read_to_string(&config_path) {
            Ok(contents) => Self::parse(&contents, &config_path),
            Err(_) => {
                log::debug!(
                    "No config file at {}, using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    fn parse(contents: &str, origin: &Path) -> Self {
        match toml::from_str(contents) {
            Ok(config) => {
                log::info!("Loaded config from {}", origin.display());
                config
            }
            Err(e) => {
                log::warn!(
                    "Failed to parse config at {}: {e}, using defaults",
                    origin.display()
                );
                Self::default()
            }
        }
    }

    /// Backend base URL: CLI flag, then environment, then file, then default.
    /// Blank overrides are ignored.
    pub fn resolve_base_url(&self, cli: Option<&str>, env: Option<&str>) -> String {
        [cli, env, Some(self.backend.base_url.as_str())]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|url| !url.is_empty())
            .unwrap_or(DEFAULT_BACKEND_URL)
            .to_string()
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("trpg-client").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
