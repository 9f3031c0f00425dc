//! # minipavi-core
//!
//! Domain model and JSON wire codec for services behind a MiniPavi videotex
//! gateway.
//!
//! # Architecture overview (for beginners)
//!
//! A MiniPavi gateway keeps the connection to the user's terminal (over
//! WebSocket, Telnet or a phone line) and turns every key press into an
//! HTTP POST to a service.  The service answers with a page of videotex
//! bytes and, optionally, an instruction such as "open an input zone".
//!
//! This crate has no I/O of its own:
//!
//! - **`domain`** – Typed requests, responses and commands, with the
//!   gateway's constraints (screen coordinates, submission keys) checked on
//!   construction.
//!
//! - **`protocol`** – Maps the domain to the gateway's JSON envelopes, embeds
//!   the page as base64, and round-trips the service's session state through
//!   a caller-supplied [`StateCodec`].
//!
//! The page itself is built with the `videotex` crate, re-exported here as
//! [`videotex`] for convenience.

pub mod domain;
pub mod protocol;

pub use videotex;

pub use domain::{
    Command, CommandError, DirectCallSetting, FunctionKey, FunctionKeySet, GatewayEvent,
    GatewayRequest, ServiceResponse, SocketType,
};
pub use protocol::{
    JsonStateCodec, ProtocolError, StateCodec, StateError, StateFallbackHook, WireCodec,
};
