//! Configuration for the game data mirror.
//!
//! Loadable from TOML; every field has a default so an empty document is
//! a valid configuration pointing at the upstream game-data repository.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::Dataset;

/// Top-level mirror configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// Remote source location.
    #[serde(default)]
    pub source: SourceConfig,
    /// HTTP behavior.
    #[serde(default)]
    pub http: HttpConfig,
}

impl MirrorConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] if the document is not valid TOML.
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> std::result::Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Full URL of the document backing a dataset.
    #[must_use]
    pub fn endpoint(&self, dataset: Dataset) -> String {
        let path = match dataset {
            Dataset::Stage => &self.source.stage_path,
            Dataset::Zone => &self.source.zone_path,
            Dataset::Activity => &self.source.activity_path,
            Dataset::Character => &self.source.character_path,
            Dataset::Tower => &self.source.tower_path,
        };
        format!("{}/{}", self.source.base_url.trim_end_matches('/'), path)
    }
}

/// Remote game-data source.
///
/// Defaults point at the upstream table dump the platform mirrors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL all dataset paths are joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Stage table document path.
    #[serde(default = "default_stage_path")]
    pub stage_path: String,
    /// Zone table document path.
    #[serde(default = "default_zone_path")]
    pub zone_path: String,
    /// Activity table document path.
    #[serde(default = "default_activity_path")]
    pub activity_path: String,
    /// Character table document path.
    #[serde(default = "default_character_path")]
    pub character_path: String,
    /// Tower table document path.
    #[serde(default = "default_tower_path")]
    pub tower_path: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            stage_path: default_stage_path(),
            zone_path: default_zone_path(),
            activity_path: default_activity_path(),
            character_path: default_character_path(),
            tower_path: default_tower_path(),
        }
    }
}

/// HTTP client behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Hard timeout for a single document fetch in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub request_timeout_ms: u64,
    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_base_url() -> String {
    "https://raw.githubusercontent.com/Kengxxiao/ArknightsGameData/master/zh_CN/gamedata/excel"
        .to_string()
}
fn default_stage_path() -> String {
    "stage_table.json".to_string()
}
fn default_zone_path() -> String {
    "zone_table.json".to_string()
}
fn default_activity_path() -> String {
    "activity_table.json".to_string()
}
fn default_character_path() -> String {
    "character_table.json".to_string()
}
fn default_tower_path() -> String {
    "climb_tower_table.json".to_string()
}
fn default_timeout_ms() -> u64 {
    30_000
}
fn default_user_agent() -> String {
    concat!("atlas/", env!("CARGO_PKG_VERSION")).to_string()
}
