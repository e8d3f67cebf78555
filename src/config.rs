//! Run configuration loaded from TOML
//!
//! Every field has a default, so an empty file (or no file) is valid:
//!
//! ```toml
//! [input]
//! cfg_dir = "samples"
//! extension = "cfg"
//!
//! [output]
//! file = "nagconf.cfg"
//! mode = "full"
//! indent = 4
//! key_width = 30
//!
//! [logging]
//! level = "DEBUG"
//! file = "nagconf.log"
//! stdout = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::renderer::{EmitConfig, EmitMode};

/// Errors that can occur when loading or parsing a run configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Unknown log level '{0}'; expected CRITICAL, ERROR, WARNING, INFO, DEBUG or 3..-1")]
    InvalidLevel(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Where object definitions are read from
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub cfg_dir: PathBuf,
    /// File extension, without the dot
    pub extension: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            cfg_dir: PathBuf::from("samples"),
            extension: "cfg".to_string(),
        }
    }
}

/// Where and how resolved objects are written
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output file; stdout when absent
    pub file: Option<PathBuf>,
    pub mode: EmitMode,
    pub indent: usize,
    pub key_width: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        let emit = EmitConfig::default();
        Self {
            file: None,
            mode: emit.mode,
            indent: emit.indent,
            key_width: emit.key_width,
        }
    }
}

impl OutputConfig {
    pub fn emit_config(&self) -> EmitConfig {
        EmitConfig::new()
            .with_mode(self.mode)
            .with_indent(self.indent)
            .with_key_width(self.key_width)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Log file; stderr when neither this nor `stdout` is set
    pub file: Option<PathBuf>,
    /// Print log lines to stdout
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "WARNING".to_string(),
            file: None,
            stdout: false,
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        parse_level(&self.level)
    }
}

impl RunConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: RunConfig = toml::from_str(content)?;
        config.logging.level_filter()?;
        Ok(config)
    }
}

/// Parse a log level name or number.
///
/// Accepts `CRITICAL` (3), `ERROR` (2), `WARNING` (1), `INFO` (0), `DEBUG` (-1),
/// plus `TRACE` and `OFF`, case-insensitively. `CRITICAL` maps to `ERROR`.
pub fn parse_level(level: &str) -> Result<LevelFilter, ConfigError> {
    let filter = match level.trim().to_ascii_uppercase().as_str() {
        "OFF" => LevelFilter::OFF,
        "CRITICAL" | "ERROR" | "3" | "2" => LevelFilter::ERROR,
        "WARNING" | "WARN" | "1" => LevelFilter::WARN,
        "INFO" | "0" => LevelFilter::INFO,
        "DEBUG" | "-1" => LevelFilter::DEBUG,
        "TRACE" => LevelFilter::TRACE,
        _ => return Err(ConfigError::InvalidLevel(level.to_string())),
    };
    Ok(filter)
}
