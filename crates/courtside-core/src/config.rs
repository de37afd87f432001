// Configuration loading (config/courtside.toml plus the PORT environment variable).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Port used when neither the config file nor `PORT` sets one.
pub const DEFAULT_PORT: u16 = 8050;

/// Dataset file searched for in every candidate directory.
pub const DEFAULT_DATA_FILE: &str = "PlayerIndex_nba_stats.csv";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".into(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// File name looked up in each candidate directory.
    pub file_name: String,
    /// Directories searched after the built-in candidates.
    pub extra_dirs: Vec<PathBuf>,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            file_name: DEFAULT_DATA_FILE.into(),
            extra_dirs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` takes precedence.
    pub filter: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load configuration from `config/courtside.toml` under `base_dir`, then
/// apply the port override (the raw value of `PORT`, if set).
///
/// A missing config file is not an error: every section has defaults.
pub fn load_config_from(
    base_dir: &Path,
    port_override: Option<&str>,
) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join("courtside.toml");

    let mut config = if path.exists() {
        let text = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;
        toml::from_str::<Config>(&text).map_err(|e| ConfigError::ParseError {
            path: path.clone(),
            source: e,
        })?
    } else {
        Config::default()
    };

    if let Some(raw) = port_override {
        config.server.port = parse_port(raw)?;
    }

    validate(&config)?;

    Ok(config)
}

/// Convenience wrapper: loads config relative to the current working
/// directory, honouring the `PORT` environment variable.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|e| ConfigError::Io {
        path: PathBuf::from("."),
        source: e,
    })?;
    let port = std::env::var("PORT").ok();
    load_config_from(&cwd, port.as_deref())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    raw.trim()
        .parse::<u16>()
        .map_err(|_| ConfigError::ValidationError {
            field: "PORT".into(),
            message: format!("expected a port number, got {raw:?}"),
        })
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError {
            field: "server.port".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.server.host.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "server.host".into(),
            message: "must not be empty".into(),
        });
    }

    if config.data.file_name.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.file_name".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
