//! Application layer for minipavi-server.
//!
//! Defines what a service is ([`MinitelService`]), runs one gateway request
//! through it ([`process_request`]), and ships a sample service.
//!
//! # What does NOT belong here?
//!
//! - Sockets, routes and the Tokio runtime (infrastructure)
//! - Reading config files or CLI flags (`main.rs` and `domain::config`)

pub mod hello_world;
pub mod service;

pub use hello_world::{HelloWorldService, HelloWorldState};
pub use service::{process_request, MinitelService, RequestError, ServiceError};
