//! Configuration management
//!
//! Handles loading, validation, and management of the settings that control
//! the optional integrations: the term rich-text field scan and the merge
//! into an external structured-data graph.

use crate::error::{Result, SchemaLinksError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod validator;

pub use validator::ConfigValidator;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "_meta")]
    pub meta: MetaConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub integrations: IntegrationsConfig,
}

/// Metadata about the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaConfig {
    pub schema_version: String,
    #[serde(default = "current_timestamp")]
    pub created_at: String,
    #[serde(default = "current_timestamp")]
    pub last_modified: String,
}

fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

/// Optional integration toggles
///
/// These are read once per rendering pass and threaded into the emitter and
/// the term body resolution, never consulted as ambient global state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntegrationsConfig {
    /// Scan a term rich-text field instead of the term description
    #[serde(default)]
    pub term_fields: bool,
    /// Name of the rich-text field to scan; may be empty
    #[serde(default)]
    pub term_field_name: String,
    /// Merge into an external structured-data graph instead of emitting a
    /// standalone JSON-LD block
    #[serde(default)]
    pub seo_graph: bool,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SchemaLinksError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| SchemaLinksError::Io {
            source: e,
            context: format!("Failed to read config file: {:?}", path),
        })?;
        let mut config: Config = toml::from_str(&content)?;

        // Apply environment variable overrides
        config.apply_env_overrides();

        // Validate configuration
        ConfigValidator::validate(&config)?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| SchemaLinksError::Io {
            source: e,
            context: format!("Failed to write config file: {:?}", path),
        })?;
        Ok(())
    }

    /// Apply environment variable overrides
    /// Environment variables in format: SCHEMALINKS_SECTION__KEY=value
    pub fn apply_env_overrides(&mut self) {
        for (key, value) in std::env::vars() {
            if let Some(config_key) = key.strip_prefix("SCHEMALINKS_") {
                if let Err(e) = self.set_value_from_env(config_key, &value) {
                    tracing::warn!("Failed to apply env override {}: {}", key, e);
                }
            }
        }
    }

    fn set_value_from_env(&mut self, path: &str, value: &str) -> Result<()> {
        match path {
            "STORAGE__DATA_DIR" => {
                self.storage.data_dir = PathBuf::from(value);
            }
            "INTEGRATIONS__TERM_FIELDS" => {
                self.integrations.term_fields = parse_env_bool(path, value)?;
            }
            "INTEGRATIONS__TERM_FIELD_NAME" => {
                self.integrations.term_field_name = value.to_string();
            }
            "INTEGRATIONS__SEO_GRAPH" => {
                self.integrations.seo_graph = parse_env_bool(path, value)?;
            }
            _ => {
                tracing::debug!("Unknown env config key: {}", path);
            }
        }
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            SchemaLinksError::Config("Cannot determine config directory".to_string())
        })?;

        Ok(config_dir.join("schemalinks").join("config.toml"))
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().ok_or_else(|| {
            SchemaLinksError::Config("Cannot determine home directory".to_string())
        })?;

        Ok(home_dir.join(".schemalinks"))
    }
}

fn parse_env_bool(path: &str, value: &str) -> Result<bool> {
    value
        .parse()
        .map_err(|_| SchemaLinksError::InvalidConfigValue {
            path: path.to_string(),
            message: format!("Cannot parse '{}' as boolean", value),
        })
}

impl Default for Config {
    fn default() -> Self {
        Self {
            meta: MetaConfig {
                schema_version: "1.0.0".to_string(),
                created_at: current_timestamp(),
                last_modified: current_timestamp(),
            },
            storage: StorageConfig {
                data_dir: PathBuf::from("~/.schemalinks"),
            },
            integrations: IntegrationsConfig::default(),
        }
    }
}
