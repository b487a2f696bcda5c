//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration, read from `config.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the admin API
    pub admin_endpoint: String,

    /// Directory holding `MissionMonitor_<timestamp>.txt` files
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    /// Character weight table for the KPI upload
    #[serde(default = "defaults::kpi_data_path")]
    pub kpi_data_path: PathBuf,

    /// Entity table for the KPI upload
    #[serde(default = "defaults::entity_list_path")]
    pub entity_list_path: PathBuf,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
}

impl Config {
    /// Create a configuration with defaults for everything but the endpoint.
    pub fn new(admin_endpoint: impl Into<String>) -> Self {
        Self {
            admin_endpoint: admin_endpoint.into(),
            log_path: None,
            kpi_data_path: defaults::kpi_data_path(),
            entity_list_path: defaults::entity_list_path(),
            http: HttpConfig::default(),
        }
    }

    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read(path).map_err(|e| AppError::file(path, e))?;
        serde_json::from_slice(&content)
            .map_err(|e| AppError::config(format!("invalid {}: {}", path.display(), e)))
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.admin_endpoint.trim().is_empty() {
            return Err(AppError::validation("admin_endpoint is empty"));
        }
        Url::parse(&self.admin_endpoint)?;
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == Some(0) {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        Ok(())
    }

    /// The log directory, required by the mission upload.
    pub fn log_dir(&self) -> Result<&Path> {
        self.log_path
            .as_deref()
            .ok_or_else(|| AppError::config("cannot get required key: log_path"))
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds; unset keeps the client default
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: None,
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    pub fn user_agent() -> String {
        concat!("mission-uploader/", env!("CARGO_PKG_VERSION")).into()
    }
    pub fn kpi_data_path() -> PathBuf {
        "kpi_data.txt".into()
    }
    pub fn entity_list_path() -> PathBuf {
        "entity_list_combined.csv".into()
    }
}
