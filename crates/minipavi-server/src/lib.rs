//! minipavi-server library crate.
//!
//! Hosts MiniPavi services over HTTP: the gateway posts one JSON request per
//! user action and reads the next page from the response body.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! MiniPavi gateway (JSON over HTTP POST)
//!         ↕
//! [minipavi-server]
//!   ├── domain/           ServerConfig (bind address, route, version)
//!   ├── application/      MinitelService trait, process_request, sample service
//!   └── infrastructure/
//!         └── http_server  axum router and listener
//! ```
//!
//! # Layer rules
//!
//! - `domain` does no networking.
//! - `application` depends on `domain` and `minipavi-core` only.
//! - `infrastructure` depends on all other layers plus `tokio` and `axum`.
//!
//! # Writing a service (for beginners)
//!
//! Implement [`application::MinitelService`] with a serde-friendly `State`,
//! then mount it:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use minipavi_server::application::HelloWorldService;
//! use minipavi_server::domain::ServerConfig;
//! use minipavi_server::infrastructure::router;
//!
//! let config = ServerConfig::default();
//! let app = router(&config, Arc::new(HelloWorldService));
//! ```

/// Domain layer: configuration types.
pub mod domain;

/// Application layer: service contract and request pipeline.
pub mod application;

/// Infrastructure layer: HTTP routing and listener.
pub mod infrastructure;
