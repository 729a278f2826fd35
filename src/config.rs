//! Server configuration.
//!
//! Settings come from an optional TOML file followed by environment
//! overrides:
//!
//! | Setting          | TOML key         | Environment            | Default        |
//! |------------------|------------------|------------------------|----------------|
//! | listen address   | `bind_addr`      | `ITOPS_BIND_ADDR`      | `0.0.0.0:8080` |
//! | log filter       | `log_filter`     | `ITOPS_LOG_FILTER`     | `info`         |
//! | CORS origin      | `allowed_origin` | `ITOPS_ALLOWED_ORIGIN` | `*`            |
//!
//! The file is read from `ITOPS_CONFIG`, or `itops.toml` in the working
//! directory. A missing file is not an error.

use serde::Deserialize;
use std::{
    fs, io,
    net::{AddrParseError, SocketAddr},
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "ITOPS_CONFIG";

/// Configuration file used when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "itops.toml";

const BIND_ADDR_ENV: &str = "ITOPS_BIND_ADDR";
const LOG_FILTER_ENV: &str = "ITOPS_LOG_FILTER";
const ALLOWED_ORIGIN_ENV: &str = "ITOPS_ALLOWED_ORIGIN";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The configuration file is not valid TOML for [`ServerConfig`].
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// The listen address is not a socket address.
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        /// Configured value.
        value: String,
        /// Underlying parse error.
        source: AddrParseError,
    },
}

/// Runtime settings of the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address the server listens on.
    pub bind_addr: String,
    /// `tracing-subscriber` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Origin allowed by CORS; `*` allows any.
    pub allowed_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_owned(),
            log_filter: "info".to_owned(),
            allowed_origin: "*".to_owned(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from the file named by [`CONFIG_PATH_ENV`] and
    /// the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file exists but cannot be read or
    /// parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_owned());
        Self::load_from(Path::new(&path), |key| std::env::var(key).ok())
    }

    /// Loads configuration from `path`, then applies overrides from `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file exists but cannot be read or
    /// parsed.
    pub fn load_from(
        path: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let base = match fs::read_to_string(path) {
            Ok(raw) => toml::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Ok(base.with_overrides(lookup))
    }

    /// Replaces settings for which `lookup` returns a non-empty value.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(value) = non_empty(BIND_ADDR_ENV) {
            self.bind_addr = value;
        }
        if let Some(value) = non_empty(LOG_FILTER_ENV) {
            self.log_filter = value;
        }
        if let Some(value) = non_empty(ALLOWED_ORIGIN_ENV) {
            self.allowed_origin = value;
        }
        self
    }

    /// Parses the listen address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBindAddr`] when `bind_addr` is not a
    /// socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_addr
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: self.bind_addr.clone(),
                source,
            })
    }
}
