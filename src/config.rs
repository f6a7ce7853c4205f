//! Configuration discovery and loading.
//!
//! Discovery hierarchy:
//! 1. Current directory: ./blendchat.toml or ./.blendchat/config.toml
//! 2. User config: ~/.blendchat/config.toml
//! 3. Built-in defaults
//!
//! API keys are never read from config files; they come from the
//! `CLAUDE_API_KEY` and `DEEPSEEK_API_KEY` environment variables.

use crate::env;
use crate::provider::ProviderSettings;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env as std_env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub claude: ProviderSettings,
    pub deepseek: ProviderSettings,
}

impl AppConfig {
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    pub fn to_toml_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("writing config file {}", path.display()))?;
        Ok(())
    }

    /// Inject credentials from the environment. Always applied after file
    /// loading so a config file can never carry a key.
    pub fn with_env_credentials(mut self) -> Self {
        self.claude.api_key = std_env::var(env::provider::CLAUDE_API_KEY_ENV).ok();
        self.deepseek.api_key = std_env::var(env::provider::DEEPSEEK_API_KEY_ENV).ok();
        self
    }
}

/// Configuration discovery system
pub struct ConfigDiscovery;

impl ConfigDiscovery {
    /// Discover and load configuration using the hierarchy, then inject
    /// environment credentials.
    pub fn discover() -> Result<AppConfig> {
        let config = if let Some(config_path) = Self::find_config_file() {
            info!("loading configuration from {}", config_path.display());
            AppConfig::from_toml_file(config_path)?
        } else {
            info!("no configuration file found, using defaults");
            AppConfig::default()
        };
        Ok(config.with_env_credentials())
    }

    /// Find the first existing configuration file in priority order
    pub fn find_config_file() -> Option<PathBuf> {
        for candidate in Self::config_candidates() {
            debug!("checking for config file: {}", candidate.display());
            if candidate.is_file() {
                debug!("found config file: {}", candidate.display());
                return Some(candidate);
            }
        }
        None
    }

    fn config_candidates() -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        if let Ok(current_dir) = std_env::current_dir() {
            candidates.push(current_dir.join(env::CONFIG_FILE_NAME));
            candidates.push(
                current_dir
                    .join(env::USER_CONFIG_DIR_NAME)
                    .join("config.toml"),
            );
        }

        if let Some(home_dir) = Self::home_dir() {
            candidates.push(home_dir.join(env::USER_CONFIG_DIR_NAME).join("config.toml"));
        }

        candidates
    }

    fn home_dir() -> Option<PathBuf> {
        std_env::var("HOME")
            .ok()
            .or_else(|| std_env::var("USERPROFILE").ok())
            .map(PathBuf::from)
    }
}
