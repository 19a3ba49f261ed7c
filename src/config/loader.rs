//! Configuration loading from disk and the command line.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid configuration: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML file without validating it.
pub fn read_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let config = read_config(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Command-line flags. Any flag given overrides the config file.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "auth-proxy")]
#[command(about = "Reverse proxy that gates a single backend behind HTTP Basic auth", long_about = None)]
pub struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Backend URL to connect to.
    #[arg(long, value_name = "URL")]
    pub backend_url: Option<String>,

    /// Basic auth username ("*" accepts any username) [default: bubbles]
    #[arg(long)]
    pub username: Option<String>,

    /// Basic auth password [default: bubbles]
    #[arg(long)]
    pub password: Option<String>,

    /// Port to listen on [default: 8080]
    #[arg(long, value_name = "PORT")]
    pub listen: Option<u16>,

    /// Interface to bind [default: 0.0.0.0]
    #[arg(long)]
    pub host: Option<String>,

    /// Log level (trace, debug, info, warn, error) [default: info]
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Build the final configuration: defaults, then file, then flags.
    pub fn load(&self) -> Result<ProxyConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => ProxyConfig::default(),
        };
        self.apply(&mut config);
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }

    fn apply(&self, config: &mut ProxyConfig) {
        if let Some(url) = &self.backend_url {
            config.backend.url = url.clone();
        }
        if let Some(username) = &self.username {
            config.auth.username = username.clone();
        }
        if let Some(password) = &self.password {
            config.auth.password = password.clone();
        }
        if let Some(port) = self.listen {
            config.listener.port = port;
        }
        if let Some(host) = &self.host {
            config.listener.host = host.clone();
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
    }
}
