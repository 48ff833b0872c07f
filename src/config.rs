//! Configuration for the search cascade.
//!
//! Configuration is stored in TOML format at
//! `~/.config/catalog-search/config.toml` (or XDG equivalent), or loaded
//! from an explicit path.
//!
//! # Example Configuration
//!
//! ```toml
//! [search]
//! maximum_results = 100
//! use_boolean_fulltext = true
//! extra_fulltext_fields = ["Description"]
//! results_path = "searchresults"
//!
//! [[replacements]]
//! search = "tee, t shirt"
//! replace = "tshirt"
//! ```

use crate::search::replacements::{Replacement, ReplacementTable};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or saving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Root configuration: cascade tuning plus the replacement table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub replacements: Vec<Replacement>,
}

/// `[search]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Hard cap on the results listing. The listing is limited because no
    /// user is really interested in wading through an unbounded one.
    #[serde(default = "default_maximum_results")]
    pub maximum_results: usize,

    /// Full-text tier: require every token of a term (boolean mode) rather
    /// than any token.
    #[serde(default = "default_use_boolean_fulltext")]
    pub use_boolean_fulltext: bool,

    /// Extra product fields searched alongside `Title` and `MenuTitle`.
    #[serde(default)]
    pub extra_fulltext_fields: Vec<String>,

    /// Path component of the results-listing URL.
    #[serde(default = "default_results_path")]
    pub results_path: String,

    /// Which inputs the host form exposes.
    #[serde(default)]
    pub layout: FormLayout,
}

fn default_maximum_results() -> usize {
    100
}

fn default_use_boolean_fulltext() -> bool {
    true
}

fn default_results_path() -> String {
    "searchresults".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            maximum_results: default_maximum_results(),
            use_boolean_fulltext: default_use_boolean_fulltext(),
            extra_fulltext_fields: Vec::new(),
            results_path: default_results_path(),
            layout: FormLayout::default(),
        }
    }
}

/// Form variant: which inputs the host exposes. Replaces the original's
/// "short form" subclassing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormLayout {
    /// Keyword plus price bounds and subsection restriction.
    #[default]
    Full,
    /// Keyword box only.
    Short,
}

impl FormLayout {
    pub fn exposes_price(self) -> bool {
        matches!(self, Self::Full)
    }

    pub fn exposes_section(self) -> bool {
        matches!(self, Self::Full)
    }
}

impl AppConfig {
    /// Load from an explicit path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the default platform location, falling back to defaults
    /// when no file exists yet.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = default_config_path().ok_or(ConfigError::NoConfigDir)?;
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Persist to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.maximum_results == 0 {
            return Err(ConfigError::Validation(
                "search.maximum_results must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The replacement table configured for this catalog.
    pub fn replacement_table(&self) -> ReplacementTable {
        ReplacementTable::new(self.replacements.clone())
    }
}

fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "catalog-search", "catalog-search")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
