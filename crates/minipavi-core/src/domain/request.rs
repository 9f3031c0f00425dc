//! The gateway's request to a service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::function_key::FunctionKey;

/// How the terminal is connected to the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocketType {
    #[serde(rename = "WS")]
    WebSocket,
    #[serde(rename = "WSS")]
    WebSocketSsl,
    /// Phone line through an Asterisk server.
    #[serde(rename = "AST")]
    Asterisk,
    #[serde(rename = "TELN")]
    Telnet,
}

/// What caused the gateway to call the service.
///
/// The first eight variants are function key presses; the rest are
/// connection lifecycle and scheduling events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GatewayEvent {
    #[serde(rename = "ENVOI")]
    Envoi,
    #[serde(rename = "SUITE")]
    Suite,
    #[serde(rename = "RETOUR")]
    Retour,
    #[serde(rename = "ANNULATION")]
    Annulation,
    #[serde(rename = "CORRECTION")]
    Correction,
    #[serde(rename = "GUIDE")]
    Guide,
    #[serde(rename = "REPETITION")]
    Repetition,
    #[serde(rename = "SOMMAIRE")]
    Sommaire,
    /// A new user has just connected to the service.
    #[serde(rename = "CNX")]
    Connection,
    /// The user has disconnected.  Any response is discarded.
    #[serde(rename = "FIN")]
    Disconnection,
    /// Immediate call requested by the previous response's `directCall`.
    #[serde(rename = "DIRECT")]
    Direct,
    #[serde(rename = "DIRECTCNX")]
    DirectConnection,
    /// A `connectTo*` or `duplicateStream` session could not be established.
    #[serde(rename = "DIRECTCALLFAILED")]
    DirectCallFailed,
    /// A `connectTo*` or `duplicateStream` session ended normally.
    #[serde(rename = "DIRECTCALLENDED")]
    DirectCallEnded,
    /// Scheduled background call; the service may only push messages back.
    #[serde(rename = "BGCALL")]
    BackgroundCall,
    /// Scheduled call on behalf of a user; the response is shown to them.
    #[serde(rename = "BGCALL_SIMU")]
    BackgroundCallSimulated,
}

impl GatewayEvent {
    /// The function key behind this event, if it is a key press.
    pub fn function_key(self) -> Option<FunctionKey> {
        match self {
            GatewayEvent::Envoi => Some(FunctionKey::Envoi),
            GatewayEvent::Suite => Some(FunctionKey::Suite),
            GatewayEvent::Retour => Some(FunctionKey::Retour),
            GatewayEvent::Annulation => Some(FunctionKey::Annulation),
            GatewayEvent::Correction => Some(FunctionKey::Correction),
            GatewayEvent::Guide => Some(FunctionKey::Guide),
            GatewayEvent::Repetition => Some(FunctionKey::Repetition),
            GatewayEvent::Sommaire => Some(FunctionKey::Sommaire),
            GatewayEvent::Connection
            | GatewayEvent::Disconnection
            | GatewayEvent::Direct
            | GatewayEvent::DirectConnection
            | GatewayEvent::DirectCallFailed
            | GatewayEvent::DirectCallEnded
            | GatewayEvent::BackgroundCall
            | GatewayEvent::BackgroundCallSimulated => None,
        }
    }
}

impl From<FunctionKey> for GatewayEvent {
    fn from(key: FunctionKey) -> Self {
        match key {
            FunctionKey::Envoi => GatewayEvent::Envoi,
            FunctionKey::Suite => GatewayEvent::Suite,
            FunctionKey::Retour => GatewayEvent::Retour,
            FunctionKey::Annulation => GatewayEvent::Annulation,
            FunctionKey::Correction => GatewayEvent::Correction,
            FunctionKey::Guide => GatewayEvent::Guide,
            FunctionKey::Repetition => GatewayEvent::Repetition,
            FunctionKey::Sommaire => GatewayEvent::Sommaire,
        }
    }
}

/// One call from the gateway, with the service's session state restored.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayRequest<T> {
    /// Version of the gateway software.
    pub gateway_version: String,
    /// Unique identifier of the user's session on the gateway.
    pub session_id: String,
    /// IP address, or caller number for phone connections.
    pub remote_address: String,
    pub socket_type: SocketType,
    /// Identification string reported by the terminal.
    pub terminal_version: String,
    /// What the user typed, one entry per input line or form field.
    pub user_input: Vec<String>,
    /// Session state returned by the service's previous response.
    pub state: T,
    pub event: GatewayEvent,
    /// Query parameters of the URL the gateway called, if any.
    pub url_params: Option<BTreeMap<String, String>>,
}

impl<T> GatewayRequest<T> {
    /// First input line, or `""` when the user typed nothing.
    pub fn first_input(&self) -> &str {
        self.user_input.first().map(String::as_str).unwrap_or_default()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
