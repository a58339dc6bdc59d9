//! Configuration management for the schema registry
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (dento-schemas.toml)
//! - Environment variables (DENTO_SCHEMAS__*)
//!
//! ## Example config file (dento-schemas.toml):
//! ```toml
//! [parse]
//! mode = "strict"
//!
//! [export]
//! dir = "./contract"
//! output_format = "compact"
//! include_checksums = true
//! include_manifest = true
//!
//! [logging]
//! level = "debug"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::field::ParseMode;

/// Main configuration for the schema registry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub parse: ParseConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Payload parsing settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseConfig {
    /// Whether unknown fields are ignored or rejected
    #[serde(default)]
    pub mode: ParseMode,
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory the JSON Schema contract is written to
    #[serde(default = "default_export_dir")]
    pub dir: PathBuf,

    #[serde(default)]
    pub output_format: OutputFormat,

    /// Write checksums.sha256
    #[serde(default = "default_true")]
    pub include_checksums: bool,

    /// Write manifest.json
    #[serde(default = "default_true")]
    pub include_manifest: bool,
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

impl OutputFormat {
    pub fn render(&self, value: &serde_json::Value) -> serde_json::Result<String> {
        match self {
            OutputFormat::Pretty => serde_json::to_string_pretty(value),
            OutputFormat::Compact => serde_json::to_string(value),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_export_dir() -> PathBuf {
    PathBuf::from("schemas")
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: default_export_dir(),
            output_format: OutputFormat::Pretty,
            include_checksums: true,
            include_manifest: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl RegistryConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, layering an explicit file over the default locations
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = [
            "dento-schemas.toml",
            ".dento-schemas.toml",
            "config/dento-schemas.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(dirs) = directories::ProjectDirs::from("com", "dento", "dento-schemas") {
            let xdg_config = dirs.config_dir().join("dento-schemas.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("DENTO_SCHEMAS")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let loaded: Self = config.try_deserialize()?;
        tracing::debug!(mode = ?loaded.parse.mode, export_dir = ?loaded.export.dir, "configuration loaded");
        Ok(loaded)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Export directory, resolved against the working directory
    pub fn export_dir(&self) -> PathBuf {
        if self.export.dir.is_absolute() {
            self.export.dir.clone()
        } else {
            std::env::current_dir()
                .unwrap_or_default()
                .join(&self.export.dir)
        }
    }
}
