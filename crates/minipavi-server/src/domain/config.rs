//! Server configuration.
//!
//! [`ServerConfig`] holds everything the HTTP host needs: where to listen,
//! which route the gateway posts to, and the service version echoed back in
//! every response.  `main.rs` builds it from defaults, an optional TOML file
//! and CLI flags, in that order of precedence.
//!
//! # TOML layout (for beginners)
//!
//! Every key is optional.  Missing keys take the value of the matching
//! `default_*` function through `#[serde(default = "...")]`:
//!
//! ```toml
//! bind_address = "127.0.0.1"
//! port = 8080
//! path = "/annuaire"
//! service_version = "0.3"
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for building a [`ServerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("I/O error reading config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// `bind_address` and `port` do not form a socket address.
    #[error("invalid bind address '{0}'")]
    InvalidAddress(String),

    /// Routes must be absolute.
    #[error("route path must start with '/', got '{0}'")]
    InvalidPath(String),
}

/// Runtime settings of the HTTP host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// IP address to listen on.  `0.0.0.0` accepts connections on every
    /// interface.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Route the gateway posts to, e.g. `/` or `/annuaire`.
    #[serde(default = "default_path")]
    pub path: String,

    /// Sent back to the gateway in the `version` field of every response.
    #[serde(default = "default_service_version")]
    pub service_version: String,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_path() -> String {
    "/".to_string()
}

fn default_service_version() -> String {
    "0.1".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            path: default_path(),
            service_version: default_service_version(),
        }
    }
}

impl ServerConfig {
    /// Parses a TOML document, filling missing keys with defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed TOML, and the errors of
    /// [`ServerConfig::validate`].
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses the TOML file at `path`.  A missing file is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// The address to bind the listener to.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.bind_address, self.port);
        raw.parse().map_err(|_| ConfigError::InvalidAddress(raw))
    }

    /// Checks the fields that serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.socket_addr()?;
        if !self.path.starts_with('/') {
            return Err(ConfigError::InvalidPath(self.path.clone()));
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
