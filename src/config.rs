//! Application configuration. The decision threshold is fixed and deliberately absent here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Path to the pre-trained classifier artifact (`.onnx` or `.json`)
    pub model_path: PathBuf,
    /// Display strings for the monitored region
    pub region: RegionConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    /// Target region shown in the page header
    pub target: String,
    /// Authority named in the alert recommendation
    pub authority: String,
    /// Provenance of the training data, shown in the page header
    pub data_source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("cloudburst_rf_model.json"),
            region: RegionConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            target: "Mandi & Kullu, Himachal Pradesh".to_string(),
            authority: "Mandi & Kullu administration".to_string(),
            data_source: "Historical Satellite & Weather Station Data".to_string(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            if let Ok(data) = std::fs::read_to_string(path) {
                if let Ok(c) = serde_json::from_str::<AppConfig>(&data) {
                    return c;
                }
            }
        }
        Self::default()
    }
}
