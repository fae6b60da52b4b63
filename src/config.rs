//! Dashboard configuration.
//!
//! Defaults match the bundled sample data. An optional `dashboard.json` in the
//! working directory overrides any subset of fields, and the
//! `DASHBOARD_DATA_PATH` environment variable overrides the CSV location.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

/// Environment variable that overrides [`DashboardConfig::data_path`].
pub const DATA_PATH_ENV: &str = "DASHBOARD_DATA_PATH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// CSV file shown on startup.
    pub data_path: PathBuf,
    /// Column parsed as timestamps.
    pub time_column: String,
    /// Rows shown in the table preview.
    pub head_rows: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data").join("open-meteo-subset.csv"),
            time_column: "time".to_string(),
            head_rows: 5,
        }
    }
}

impl DashboardConfig {
    /// Read [`CONFIG_FILE`] if present, then apply the environment override.
    pub fn load() -> Result<Self> {
        let mut config = Self::from_file(Path::new(CONFIG_FILE))?;
        if let Ok(path) = std::env::var(DATA_PATH_ENV) {
            if !path.is_empty() {
                config.data_path = PathBuf::from(path);
            }
        }
        Ok(config)
    }

    /// Parse a JSON config file; a missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}
