//! The service contract and the per-request pipeline.
//!
//! A MiniPavi service is a function from "what the user just did" to "the
//! next page".  [`MinitelService`] captures that function and its session
//! state type; [`process_request`] wraps it with the wire codec so the HTTP
//! layer only moves bytes.
//!
//! # One request, step by step (for beginners)
//!
//! ```text
//! body bytes ──decode──► GatewayRequest<State> ──handle──► ServiceResponse<State>
//!                                                               │
//! response JSON ◄──────────────────encode───────────────────────┘
//! ```
//!
//! Nothing here touches a socket, so the whole pipeline is testable with a
//! string in and a string out.

use minipavi_core::domain::{CommandError, GatewayRequest, ServiceResponse};
use minipavi_core::protocol::{ProtocolError, StateCodec, StateFallbackHook, WireCodec};
use minipavi_core::videotex::VideotexError;
use thiserror::Error;
use tracing::{debug, info};

// ── Error types ───────────────────────────────────────────────────────────────

/// A service could not produce a response.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("page rendering failed: {0}")]
    Render(#[from] VideotexError),

    #[error("invalid command: {0}")]
    Command(#[from] CommandError),

    /// Any other failure, described for the log.
    #[error("{0}")]
    Other(String),
}

/// Failure of one pass through [`process_request`].
///
/// The variants map to HTTP statuses: a bad body is the caller's fault, the
/// other two are ours.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("malformed gateway request: {0}")]
    Decode(#[source] ProtocolError),

    #[error("service failed: {0}")]
    Service(#[from] ServiceError),

    #[error("response could not be encoded: {0}")]
    Encode(#[source] ProtocolError),
}

// ── Service contract ──────────────────────────────────────────────────────────

/// A videotex service reachable through a MiniPavi gateway.
///
/// Implementations are shared across concurrent requests, hence
/// `Send + Sync`.  All per-user data travels in `State`, which the gateway
/// stores between calls.
pub trait MinitelService: Send + Sync + 'static {
    /// Session state carried in the gateway's `context` field.
    type State;

    /// State of a new session, and of any session whose context could not
    /// be read back.
    fn initial_state(&self) -> Self::State;

    /// Produces the next page for `request`.
    fn handle(
        &self,
        request: GatewayRequest<Self::State>,
    ) -> Result<ServiceResponse<Self::State>, ServiceError>;
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

/// Decodes `body`, runs `service`, and encodes its response.
///
/// # Errors
///
/// [`RequestError::Decode`] if `body` is not a gateway request,
/// [`RequestError::Service`] if the service fails, and
/// [`RequestError::Encode`] if its response breaks a gateway constraint.
pub fn process_request<S, C, H>(
    service: &S,
    codec: &WireCodec<C, H>,
    body: &[u8],
) -> Result<String, RequestError>
where
    S: MinitelService,
    C: StateCodec<State = S::State>,
    H: StateFallbackHook,
{
    let request = codec
        .decode_request_slice(body)
        .map_err(RequestError::Decode)?;
    info!(
        session_id = %request.session_id,
        event = ?request.event,
        inputs = request.user_input.len(),
        "gateway request"
    );

    let response = service.handle(request)?;

    let json = codec
        .encode_response(&response)
        .map_err(RequestError::Encode)?;
    debug!(bytes = json.len(), "service response ready");
    Ok(json)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
