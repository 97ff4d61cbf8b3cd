//! Configuration file loading.
//!
//! Settings come from an optional YAML file. Every key has a default, so an
//! empty file (or no file at all) is a valid configuration. Command-line
//! flags override whatever is loaded here.
//!
//! ```yaml
//! data: catalogs/netflix.csv
//! page_size: 12
//! card_width: 38
//! years:
//!   from: 2010
//!   to: 2021
//! defaults:
//!   rating: NR
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::CardLayout;

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "reelscan.yaml";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Catalog CSV path.
    #[serde(default = "default_data")]
    pub data: PathBuf,

    /// Records shown when results are not sorted.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Cards per row in text output.
    #[serde(default = "default_card_columns")]
    pub card_columns: usize,

    /// Maximum rows of cards in text output.
    #[serde(default = "default_card_rows")]
    pub card_rows: usize,

    /// Terminal columns taken by each card.
    #[serde(default = "default_card_width")]
    pub card_width: usize,

    /// Characters of description shown on a card.
    #[serde(default = "default_description_width")]
    pub description_width: usize,

    /// Entries in the top countries table.
    #[serde(default = "default_top_countries")]
    pub top_countries: usize,

    /// Initial release year window.
    #[serde(default)]
    pub years: YearWindow,

    /// Fill values for empty catalog cells.
    #[serde(default)]
    pub defaults: FillDefaults,

    /// Log filter used when neither flags nor `RUST_LOG` set one.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Release year window applied before any user narrowing.
///
/// `None` on either side means the catalog's own bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct YearWindow {
    #[serde(default)]
    pub from: Option<i64>,
    #[serde(default)]
    pub to: Option<i64>,
}

impl Default for YearWindow {
    fn default() -> Self {
        Self {
            from: Some(2010),
            to: Some(2021),
        }
    }
}

/// Values substituted for empty cells when the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FillDefaults {
    #[serde(default = "unknown")]
    pub director: String,
    #[serde(default = "unknown")]
    pub cast: String,
    #[serde(default = "unknown")]
    pub country: String,
    #[serde(default = "unrated")]
    pub rating: String,
}

impl Default for FillDefaults {
    fn default() -> Self {
        Self {
            director: unknown(),
            cast: unknown(),
            country: unknown(),
            rating: unrated(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: default_data(),
            page_size: default_page_size(),
            card_columns: default_card_columns(),
            card_rows: default_card_rows(),
            card_width: default_card_width(),
            description_width: default_description_width(),
            top_countries: default_top_countries(),
            years: YearWindow::default(),
            defaults: FillDefaults::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Loads configuration.
    ///
    /// With an explicit `path` the file must exist. Without one,
    /// [`DEFAULT_CONFIG_FILE`] is read if present and defaults are used
    /// otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Reads and validates a YAML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Parses and validates YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as an empty map.
        let config: Config = if text.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
                path: PathBuf::new(),
                source,
            })?
        };
        config.validate()?;
        Ok(config)
    }

    /// Card grid settings for text output.
    pub fn card_layout(&self) -> CardLayout {
        CardLayout {
            columns: self.card_columns,
            rows: self.card_rows,
            card_width: self.card_width,
            description_width: self.description_width,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".into()));
        }
        if self.card_columns == 0 || self.card_rows == 0 {
            return Err(ConfigError::Invalid(
                "card_columns and card_rows must be at least 1".into(),
            ));
        }
        if self.card_width == 0 {
            return Err(ConfigError::Invalid("card_width must be at least 1".into()));
        }
        if let (Some(from), Some(to)) = (self.years.from, self.years.to) {
            if from > to {
                return Err(ConfigError::Invalid(format!(
                    "years.from ({from}) is after years.to ({to})"
                )));
            }
        }
        Ok(())
    }
}

fn default_data() -> PathBuf {
    PathBuf::from("netflix.csv")
}

fn default_page_size() -> usize {
    12
}

fn default_card_columns() -> usize {
    3
}

fn default_card_rows() -> usize {
    4
}

fn default_card_width() -> usize {
    38
}

fn default_description_width() -> usize {
    120
}

fn default_top_countries() -> usize {
    10
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn unknown() -> String {
    "Unknown".to_string()
}

fn unrated() -> String {
    "UR".to_string()
}
