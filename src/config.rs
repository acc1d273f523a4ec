use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::view::ViewSettings;

/// Optional JSON config read from the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";
/// Overrides `data_path` when set.
pub const DATA_PATH_ENV: &str = "PRODUCT_DASHBOARD_DATA";
pub const DEFAULT_DATA_FILE: &str = "Amazon_bestsellers_items_2025.csv";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("'{0}' must be greater than zero")]
    Zero(&'static str),
}

/// Startup configuration. Every field has a default, so the config file may
/// set any subset of them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub overview_rows: usize,
    pub price_bins: usize,
    pub rating_bins: usize,
    pub top_n: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let view = ViewSettings::default();
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            overview_rows: view.overview_rows,
            price_bins: view.price_bins,
            rating_bins: view.rating_bins,
            top_n: view.top_n,
        }
    }
}

impl DashboardConfig {
    /// Read [`CONFIG_FILE`] (if present) and apply [`DATA_PATH_ENV`].
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE), std::env::var_os(DATA_PATH_ENV))
    }

    pub fn load_from(path: &Path, data_override: Option<OsString>) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let config: DashboardConfig =
                serde_json::from_str(&text).map_err(|source| ConfigError::Json {
                    path: path.to_path_buf(),
                    source,
                })?;
            log::info!("Read configuration from {}", path.display());
            config
        } else {
            DashboardConfig::default()
        };

        if let Some(data_path) = data_override.filter(|p| !p.is_empty()) {
            config.data_path = PathBuf::from(data_path);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.price_bins == 0 {
            return Err(ConfigError::Zero("price_bins"));
        }
        if self.rating_bins == 0 {
            return Err(ConfigError::Zero("rating_bins"));
        }
        Ok(())
    }

    pub fn view_settings(&self) -> ViewSettings {
        ViewSettings {
            overview_rows: self.overview_rows,
            price_bins: self.price_bins,
            rating_bins: self.rating_bins,
            top_n: self.top_n,
        }
    }
}
