use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::service::driver_filter::ALL_STATUSES;

const APP_DIR_NAME: &str = ".fleetdash";
const CONFIG_FILE_NAME: &str = "config.json";
pub const DATA_DIR_ENV: &str = "FLEETDASH_DATA_DIR";
pub const DEFAULT_TOP_PARTS: usize = 3;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FleetConfig {
    pub data_dir: PathBuf,
    /// How many ranked parts the summary views show.
    pub top_parts: usize,
    pub default_status: String,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            data_dir: default_app_dir().unwrap_or_else(|_| PathBuf::from(APP_DIR_NAME)),
            top_parts: DEFAULT_TOP_PARTS,
            default_status: ALL_STATUSES.to_string(),
        }
    }
}

impl FleetConfig {
    /// Loads `~/.fleetdash/config.json`, then applies `FLEETDASH_DATA_DIR`.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&default_app_dir()?.join(CONFIG_FILE_NAME))?;
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.is_empty() {
                config.data_dir = PathBuf::from(dir);
            }
        }
        Ok(config)
    }

    /// A missing file yields the defaults; missing fields fall back individually.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read config {}", path.display()))?;
        let config: FleetConfig = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        self
    }
}

fn default_app_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(APP_DIR_NAME))
}
