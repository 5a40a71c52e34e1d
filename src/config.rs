use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::analysis::Granularity;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scanner: ScannerConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    #[serde(default = "default_image_extensions")]
    pub image_extensions: Vec<String>,

    /// Descend into subfolders.
    #[serde(default = "default_recursive")]
    pub recursive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Timeline bucket width: day, week, month or year.
    /// Kept as text so a bad value is reported when the timeline is built.
    #[serde(default = "default_timeline")]
    pub timeline: String,

    #[serde(default = "default_show_gps")]
    pub show_gps: bool,
}

impl DashboardConfig {
    pub fn granularity(&self) -> Result<Granularity> {
        self.timeline.parse()
    }
}

fn default_image_extensions() -> Vec<String> {
    vec![
        "jpg".to_string(),
        "jpeg".to_string(),
        "png".to_string(),
        "tiff".to_string(),
        "tif".to_string(),
        "heic".to_string(),
        "cr2".to_string(),
        "nef".to_string(),
        "arw".to_string(),
        "dng".to_string(),
    ]
}

fn default_recursive() -> bool {
    true
}

fn default_timeline() -> String {
    Granularity::default().name().to_string()
}

fn default_show_gps() -> bool {
    true
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            image_extensions: default_image_extensions(),
            recursive: default_recursive(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            timeline: default_timeline(),
            show_gps: default_show_gps(),
        }
    }
}

impl Config {
    /// Load from `EXIFDASH_CONFIG` or the default location, falling back to
    /// defaults when no file exists.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os("EXIFDASH_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(Self::config_path);

        if path.exists() {
            Self::load_from(&path)
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Ok(Config::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("exifdash")
    }

    fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }
}
