//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → CLI flags.
//!
//! Config lives at `newsdesk.toml` beside the executable, next to the data
//! file it points at. If missing on first run, a commented-out default is
//! generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::store::DATA_FILE_NAME;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NewsdeskConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Data file, relative to the program directory unless absolute.
    pub data_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: Option<LogLevel>,
    /// Log file, relative to the program directory unless absolute.
    pub file: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

// ============================================================================
// Defaults
// ============================================================================

pub const CONFIG_FILE_NAME: &str = "newsdesk.toml";
pub const DEFAULT_LOG_FILE: &str = "newsdesk.log";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub data_path: PathBuf,
    pub log_path: PathBuf,
    pub log_level: LevelFilter,
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub data_file: Option<PathBuf>,
    pub log_level: Option<LogLevel>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Load config from `newsdesk.toml` in `base_dir`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `NewsdeskConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config(base_dir: &Path) -> Result<NewsdeskConfig, ConfigError> {
    let path = base_dir.join(CONFIG_FILE_NAME);

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(NewsdeskConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: NewsdeskConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Newsdesk Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → CLI flags.
# Relative paths are resolved against the directory of this file.

# [general]
# data_file = "news.json"

# [logging]
# level = "off"                      # "off", "error", "warn", "info", "debug", "trace"
# file = "newsdesk.log"
"#;

    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → CLI.
pub fn resolve(config: &NewsdeskConfig, base_dir: &Path, cli: &CliOverrides) -> ResolvedConfig {
    // Data file: CLI → config → default (config paths are relative to base_dir)
    let data_path = cli.data_file.clone().unwrap_or_else(|| {
        base_dir.join(config.general.data_file.as_deref().unwrap_or(DATA_FILE_NAME))
    });

    let log_path = base_dir.join(config.logging.file.as_deref().unwrap_or(DEFAULT_LOG_FILE));

    // Log level: CLI → config → default (off)
    let log_level = cli
        .log_level
        .or(config.logging.level)
        .unwrap_or_default()
        .into();

    ResolvedConfig {
        data_path,
        log_path,
        log_level,
    }
}
