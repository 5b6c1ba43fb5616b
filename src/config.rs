//! Configuration for the lineups client.
//!
//! Settings are layered: `lineups.toml` → environment → CLI flags.
//!
//! # Configuration File Format
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:5000/api"
//! timeout_secs = 30
//! ```
//!
//! The file lives at `<config dir>/lineups/lineups.toml` unless `--config`
//! points elsewhere. `LINEUPS_API_URL` and `LINEUPS_TIMEOUT_SECS` override
//! the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::ClientConfig;

pub const CONFIG_FILE_NAME: &str = "lineups.toml";
pub const ENV_API_URL: &str = "LINEUPS_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "LINEUPS_TIMEOUT_SECS";

/// REST API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSection {
    /// Base URL every endpoint is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// The complete lineups.toml structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupsToml {
    #[serde(default)]
    pub api: ApiSection,
}

impl LineupsToml {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse lineups.toml")
    }

    /// Load `path`, or defaults if it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize lineups.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration and return any warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !is_http_url(&self.api.base_url) {
            warnings.push(format!(
                "Invalid base_url '{}': should start with http:// or https://",
                self.api.base_url
            ));
        }
        if self.api.timeout_secs == 0 {
            warnings.push("timeout_secs is 0: every request would time out".to_string());
        }

        warnings
    }
}

fn is_http_url(value: &str) -> bool {
    url::Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host().is_some())
        .unwrap_or(false)
}

/// Default config file location: `<config dir>/lineups/lineups.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("lineups").join(CONFIG_FILE_NAME))
}

/// Values given on the command line; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Effective settings after layering file, environment, and CLI.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Config file consulted, whether or not it exists
    pub config_path: Option<PathBuf>,
    /// Parsed file contents (defaults when absent)
    pub toml: LineupsToml,
    pub cli: CliOverrides,
}

impl Settings {
    /// Load the file at `config_path` (or the default location) and attach
    /// CLI overrides.
    pub fn load(config_path: Option<PathBuf>, cli: CliOverrides) -> Result<Self> {
        let config_path = config_path.or_else(default_config_path);
        let toml = match &config_path {
            Some(path) => LineupsToml::load_or_default(path)?,
            None => LineupsToml::default(),
        };
        Ok(Self {
            config_path,
            toml,
            cli,
        })
    }

    /// Base URL (CLI → env → file → default).
    pub fn api_url(&self) -> String {
        self.cli
            .api_url
            .clone()
            .or_else(|| std::env::var(ENV_API_URL).ok().filter(|v| !v.is_empty()))
            .unwrap_or_else(|| self.toml.api.base_url.clone())
    }

    /// Timeout (CLI → env → file → default). Unparseable env values are ignored.
    pub fn timeout(&self) -> Duration {
        let secs = self
            .cli
            .timeout_secs
            .or_else(|| {
                std::env::var(ENV_TIMEOUT_SECS)
                    .ok()
                    .and_then(|v| v.parse().ok())
            })
            .unwrap_or(self.toml.api.timeout_secs);
        Duration::from_secs(secs)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_url()).with_timeout(self.timeout())
    }

    /// Validate the effective configuration and return warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut effective = self.toml.clone();
        effective.api.base_url = self.api_url();
        effective.api.timeout_secs = self.timeout().as_secs();
        effective.validate()
    }
}
