//! Layered configuration loading.
//!
//! Sources, highest priority first:
//! 1. Environment variables (`GHBATCH_*` prefix, `__` as separator)
//! 2. Project-level `.ghbatch.toml`
//! 3. User-level `~/.config/ghbatch/config.toml`
//! 4. Built-in defaults
//!
//! Command-line flags override whatever this produces.

use std::path::PathBuf;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),
}

fn default_gh_program() -> String {
    "gh".to_string()
}

fn default_base_branch() -> String {
    "main".to_string()
}

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Default `owner/name` repository. `None` lets `gh` pick the current repo.
    #[serde(default)]
    pub repo: Option<String>,

    /// Program used as the operation executor.
    #[serde(default = "default_gh_program")]
    pub gh_program: String,

    /// Base branch for pull requests.
    #[serde(default = "default_base_branch")]
    pub base_branch: String,
}

impl Default for Config {
    fn default() -> Self {
        Self { repo: None, gh_program: default_gh_program(), base_branch: default_base_branch() }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Does not read `.env`; see [`Config::load_with_dotenv`].
    ///
    /// # Errors
    ///
    /// Returns an error if a config file or environment value fails to parse.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load `.env` from the current directory, then all other sources.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file or environment value fails to parse.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".ghbatch.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("GHBATCH_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ghbatch").join("config.toml"))
    }
}
