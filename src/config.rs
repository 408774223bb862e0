//! Persisted UI configuration, loaded from `config/gnosis.toml`.
//!
//! The committed endpoint, the operating mode and the optional AgentOS token
//! survive restarts. Missing or unreadable files fall back to defaults so a
//! fresh checkout starts against the local backend.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::app::Mode;

/// Default backend the client talks to before the user commits anything else.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:7777";

/// Environment variable carrying the AgentOS bearer token.
pub const TOKEN_ENV: &str = "GNOSIS_OS_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Committed backend base URL, already normalized (no trailing slash).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Last selected operating mode.
    #[serde(default)]
    pub mode: Mode,
    /// Optional bearer token sent on API and radar calls.
    #[serde(default)]
    pub auth_token: Option<String>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            mode: Mode::default(),
            auth_token: None,
        }
    }
}

impl UiConfig {
    /// Reads the configuration from `<root>/config/gnosis.toml`.
    ///
    /// A missing file yields the defaults. The environment token overrides
    /// whatever the file carries so deployments can inject credentials
    /// without writing them to disk.
    pub fn load(root: &Path) -> Result<Self> {
        let path = Self::path(root);
        let mut config = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str(&raw)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        } else {
            Self::default()
        };
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            if !token.trim().is_empty() {
                config.auth_token = Some(token);
            }
        }
        Ok(config)
    }

    /// Writes the configuration back to `<root>/config/gnosis.toml`,
    /// creating the directory if needed.
    pub fn save(&self, root: &Path) -> Result<()> {
        let dir = root.join("config");
        if !dir.exists() {
            fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create config dir: {}", dir.display()))?;
        }
        let path = Self::path(root);
        let serialized = toml::to_string_pretty(self).context("failed to serialize config")?;
        fs::write(&path, serialized)
            .with_context(|| format!("failed to write config: {}", path.display()))?;
        Ok(())
    }

    fn path(root: &Path) -> PathBuf {
        root.join("config/gnosis.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let config = UiConfig::load(dir.path()).expect("load");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.mode, Mode::Agent);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().expect("temp dir");
        let config = UiConfig {
            endpoint: String::from("http://localhost:9999"),
            mode: Mode::Team,
            auth_token: Some(String::from("secret")),
        };
        config.save(dir.path()).expect("save");
        let loaded = UiConfig::load(dir.path()).expect("load");
        assert_eq!(loaded.endpoint, "http://localhost:9999");
        assert_eq!(loaded.mode, Mode::Team);
        assert_eq!(loaded.auth_token.as_deref(), Some("secret"));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let config_dir = dir.path().join("config");
        std::fs::create_dir_all(&config_dir).expect("mkdir");
        std::fs::write(
            config_dir.join("gnosis.toml"),
            "endpoint = \"http://localhost:8888\"\n",
        )
        .expect("write");
        let loaded = UiConfig::load(dir.path()).expect("load");
        assert_eq!(loaded.endpoint, "http://localhost:8888");
        assert_eq!(loaded.mode, Mode::Agent);
    }
}
