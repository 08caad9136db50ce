// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Mandate Countdown config (saved to disk as JSON)
//!

use directories_next::ProjectDirs;
use mandate_countdown_core::Language;
use mandate_countdown_wikidata::{ClientSettings, DEFAULT_ENDPOINT, DEFAULT_USER_AGENT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const PROJECT_QUALIFIER: &str = "org";
const ORG_NAME: &str = "MandateCountdown";
const APPLICATION_NAME: &str = "MandateCountdown";
const CONFIG_FILE_NAME: &str = "config.json";

/// Errors that can occur when loading or saving the config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    StdIo(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error("Could not determine the config directory")]
    ProjectDirs,
}

/// The config that's saved to disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Language for messages & names (`None` means detect from the
    /// environment)
    language: Option<Language>,

    /// SPARQL endpoint
    endpoint: String,

    /// User agent sent to the endpoint
    user_agent: String,

    /// Request timeout in seconds
    timeout_secs: u64,

    /// Whether to run the "position held" query when a start date is missing
    fallback_query: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            endpoint: String::from(DEFAULT_ENDPOINT),
            user_agent: String::from(DEFAULT_USER_AGENT),
            timeout_secs: 30,
            fallback_query: true,
        }
    }
}

impl Config {
    /// Load the config from the default location
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path()?)
    }

    /// Load the config from a file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        info!("Loading config from {}", path.display());
        let data = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&data)?;
        debug!("Config loaded = {config:?}");
        Ok(config)
    }

    /// Save the config to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path()?)
    }

    /// Save the config to a file, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        info!("Saving config to {}", path.display());
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Ensure the config file exists at the default location (creating a
    /// default one if not) and load it
    pub fn ensure_setup() -> Result<Self, ConfigError> {
        Self::ensure_setup_at(&config_file_path()?)
    }

    /// Ensure the config file exists at the path (creating a default one if
    /// not) and load it
    pub fn ensure_setup_at(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("No config file found, creating default");
            Config::default().save_to(path)?;
        }
        Self::load_from(path)
    }

    /// The configured language, or the environment's if none is configured
    pub fn language(&self) -> Language {
        self.language.unwrap_or_else(Language::detect)
    }

    pub fn set_language(&mut self, language: Option<Language>) {
        self.language = language;
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn set_endpoint(&mut self, endpoint: impl ToString) {
        self.endpoint = endpoint.to_string();
    }

    pub fn fallback_query(&self) -> bool {
        self.fallback_query
    }

    pub fn set_fallback_query(&mut self, fallback_query: bool) {
        self.fallback_query = fallback_query;
    }

    /// Settings for the Wikidata client
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            endpoint: self.endpoint.clone(),
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
            fallback_query: self.fallback_query,
        }
    }
}

/// Get the project directories (e.g. where the config is stored)
#[cfg(debug_assertions)]
fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from(
        PROJECT_QUALIFIER,
        ORG_NAME,
        &format!("{APPLICATION_NAME} Dev"),
    )
    .ok_or(ConfigError::ProjectDirs)
}

/// Get the project directories (e.g. where the config is stored)
#[cfg(not(debug_assertions))]
fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from(PROJECT_QUALIFIER, ORG_NAME, APPLICATION_NAME).ok_or(ConfigError::ProjectDirs)
}

/// Get the path to the config file
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    let config_file = project_dirs()?.config_dir().join(CONFIG_FILE_NAME);
    debug!("Config file path = {config_file:?}");
    Ok(config_file)
}
