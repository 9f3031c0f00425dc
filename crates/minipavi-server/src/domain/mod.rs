//! Domain layer for minipavi-server.
//!
//! Only configuration lives here.  The request and response model belongs to
//! `minipavi-core` and is shared with every service.

pub mod config;

pub use config::{ConfigError, ServerConfig};
