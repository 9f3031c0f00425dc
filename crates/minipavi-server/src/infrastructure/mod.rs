//! Infrastructure layer for minipavi-server.
//!
//! Owns the TCP listener and the axum router.  Everything protocol-related is
//! delegated to the application layer, so this layer only turns bytes into
//! HTTP responses.

pub mod http_server;

pub use http_server::{router, router_with_codec, run_server};
