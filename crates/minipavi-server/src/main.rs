//! MiniPavi sample server: entry point.
//!
//! Serves the three-page hello-world service to a MiniPavi gateway.
//!
//! # Usage
//!
//! ```text
//! minipavi-server [OPTIONS]
//!
//! Options:
//!   --bind <ADDR>                IP address to listen on [default: 0.0.0.0]
//!   --port <PORT>                TCP port [default: 8080]
//!   --path <PATH>                Route the gateway posts to [default: /]
//!   --service-version <VERSION>  Version sent back to the gateway [default: 0.1]
//!   --config <FILE>              TOML file with any of the above
//! ```
//!
//! # Precedence
//!
//! Built-in defaults, then the TOML file, then flags or environment
//! variables.  A flag beats its environment variable.
//!
//! | Variable            | Flag                |
//! |---------------------|---------------------|
//! | `MINIPAVI_BIND`     | `--bind`            |
//! | `MINIPAVI_PORT`     | `--port`            |
//! | `MINIPAVI_PATH`     | `--path`            |
//! | `MINIPAVI_VERSION`  | `--service-version` |
//! | `MINIPAVI_CONFIG`   | `--config`          |

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use minipavi_server::application::HelloWorldService;
use minipavi_server::domain::ServerConfig;
use minipavi_server::infrastructure::{router, run_server};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Sample MiniPavi videotex service.
///
/// Every option is optional so that a value absent from the command line
/// leaves the config file's value in place.
#[derive(Debug, Parser)]
#[command(
    name = "minipavi-server",
    about = "Sample videotex service for a MiniPavi gateway",
    version
)]
struct Cli {
    /// IP address to listen on.
    #[arg(long, env = "MINIPAVI_BIND")]
    bind: Option<String>,

    /// TCP port to listen on.
    #[arg(long, env = "MINIPAVI_PORT")]
    port: Option<u16>,

    /// Route the gateway posts to.
    #[arg(long, env = "MINIPAVI_PATH")]
    path: Option<String>,

    /// Service version echoed in every response.
    #[arg(long, env = "MINIPAVI_VERSION")]
    service_version: Option<String>,

    /// TOML config file.
    #[arg(long, env = "MINIPAVI_CONFIG")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Layers the CLI values over the config file (or the defaults).
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or the final
    /// configuration is invalid.
    fn into_server_config(self) -> anyhow::Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => ServerConfig::default(),
        };

        if let Some(bind) = self.bind {
            config.bind_address = bind;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(path) = self.path {
            config.path = path;
        }
        if let Some(version) = self.service_version {
            config.service_version = version;
        }

        config.validate().context("invalid server configuration")?;
        Ok(config)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Program entry point.
///
/// 1. Logging is initialised from `RUST_LOG`, defaulting to `info`.
/// 2. CLI arguments and the optional config file become a [`ServerConfig`].
/// 3. The hello-world service is mounted and served until Ctrl+C.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_server_config()?;
    info!(
        "MiniPavi service starting on {}:{}{}",
        config.bind_address, config.port, config.path
    );

    let app = router(&config, Arc::new(HelloWorldService));

    let shutdown = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl+C, shutting down"),
            Err(e) => tracing::error!("failed to listen for Ctrl+C signal: {e}"),
        }
    };

    run_server(&config, app, shutdown).await
}

// ── Tests ─────────────────────────────────────────────────────────────────────
