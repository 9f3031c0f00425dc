//! JSON codec between the gateway's envelopes and the domain model.
//!
//! Request:
//! ```text
//! {"PAVI":{"version","uniqueId","remoteAddr","typesocket","versionminitel",
//!          "content":[...],"context","fctn"},"URLPARAMS":{...}}
//! ```
//! Response:
//! ```text
//! {"version","content"(base64),"context","echo","directcall","next","COMMAND"?}
//! ```
//!
//! A [`WireCodec`] is immutable once built.  Share one per route across all
//! request handlers; each call allocates its own buffers.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use thiserror::Error;
use tracing::debug;

use crate::domain::{Command, CommandError, FunctionKeySet, GatewayRequest, ServiceResponse};
use crate::protocol::dto::{CommandDto, GatewayRequestDto, PayloadDto, ServiceResponseDto};
use crate::protocol::state::{StateCodec, StateError, StateFallbackHook, TracingFallbackHook};

/// Errors that can occur while encoding or decoding an envelope.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Not JSON, a missing field, or an unknown enum token.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(#[from] serde_json::Error),

    /// The state codec failed to encode (or, for responses, decode) the state.
    #[error("session state error: {0}")]
    StateEncoding(#[from] StateError),

    /// A command breaks a gateway constraint.
    #[error("invalid command: {0}")]
    InvalidCommand(#[from] CommandError),

    /// The response `content` field is not valid base64.
    #[error("invalid content: {0}")]
    InvalidContent(#[from] base64::DecodeError),
}

// ── Function key bitmask ──────────────────────────────────────────────────────

/// The `validwith` value for `keys`: the bitwise OR of each member's bit.
pub fn encode_function_keys(keys: &FunctionKeySet) -> u8 {
    keys.bits()
}

/// Parses a `validwith` value, keeping the six defined key bits.
pub fn decode_function_keys(bits: u32) -> FunctionKeySet {
    FunctionKeySet::from_bits_truncate(bits)
}

// ── Codec ─────────────────────────────────────────────────────────────────────

/// Gateway envelope codec for one service.
///
/// `C` turns the service's state into the `context` string and back; `H`
/// is told whenever an unreadable `context` is replaced by the initial
/// state.
///
/// # Examples
///
/// ```rust
/// use minipavi_core::protocol::{JsonStateCodec, WireCodec};
///
/// let codec = WireCodec::new("1.0", JsonStateCodec::<u32>::default());
/// let request = codec
///     .decode_request(
///         r#"{"PAVI":{"version":"1.2","uniqueId":"171481397","remoteAddr":"82.65.112.8",
///         "typesocket":"WSS","versionminitel":"Cv;","content":[],"context":"","fctn":"CNX"}}"#,
///     )
///     .unwrap();
/// assert_eq!(request.state, 0);
/// ```
#[derive(Debug)]
pub struct WireCodec<C, H = TracingFallbackHook> {
    version: String,
    state_codec: C,
    hook: H,
}

impl<C: StateCodec> WireCodec<C> {
    /// Codec reporting state fallbacks through `tracing`.
    pub fn new(version: impl Into<String>, state_codec: C) -> Self {
        Self::with_hook(version, state_codec, TracingFallbackHook)
    }
}

impl<C, H> WireCodec<C, H>
where
    C: StateCodec,
    H: StateFallbackHook,
{
    /// Codec reporting state fallbacks to `hook`.
    pub fn with_hook(version: impl Into<String>, state_codec: C, hook: H) -> Self {
        Self {
            version: version.into(),
            state_codec,
            hook,
        }
    }

    /// Service version written into every response.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn state_codec(&self) -> &C {
        &self.state_codec
    }

    // ── Requests ──────────────────────────────────────────────────────────────

    /// Decodes a gateway request.
    ///
    /// An empty `context` yields the initial state.  An unreadable one also
    /// yields the initial state, after notifying the fallback hook.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::MalformedEnvelope`] if the JSON does not match the
    /// envelope, including an unknown `typesocket` or `fctn` token.
    pub fn decode_request(&self, json: &str) -> Result<GatewayRequest<C::State>, ProtocolError> {
        let dto: GatewayRequestDto = serde_json::from_str(json)?;
        Ok(self.request_from_dto(dto))
    }

    /// [`decode_request`](Self::decode_request) over raw body bytes.
    ///
    /// # Errors
    ///
    /// As for `decode_request`; invalid UTF-8 is a malformed envelope.
    pub fn decode_request_slice(
        &self,
        bytes: &[u8],
    ) -> Result<GatewayRequest<C::State>, ProtocolError> {
        let dto: GatewayRequestDto = serde_json::from_slice(bytes)?;
        Ok(self.request_from_dto(dto))
    }

    /// Encodes a request the way the gateway sends it.
    ///
    /// Used by tests and tools that stand in for the gateway.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::StateEncoding`] if the state cannot be serialized.
    pub fn encode_request(
        &self,
        request: &GatewayRequest<C::State>,
    ) -> Result<String, ProtocolError> {
        let dto = GatewayRequestDto {
            payload: PayloadDto {
                version: request.gateway_version.clone(),
                unique_id: request.session_id.clone(),
                remote_addr: request.remote_address.clone(),
                socket_type: request.socket_type,
                terminal_version: request.terminal_version.clone(),
                content: request.user_input.clone(),
                context: self.state_codec.encode(&request.state)?,
                event: request.event,
            },
            url_params: request.url_params.clone(),
        };
        Ok(serde_json::to_string(&dto)?)
    }

    fn request_from_dto(&self, dto: GatewayRequestDto) -> GatewayRequest<C::State> {
        let GatewayRequestDto {
            payload,
            url_params,
        } = dto;
        debug!(
            session_id = %payload.unique_id,
            event = ?payload.event,
            socket = ?payload.socket_type,
            inputs = payload.content.len(),
            "decoded gateway request"
        );
        let state = self.restore_state(&payload.context);
        GatewayRequest {
            gateway_version: payload.version,
            session_id: payload.unique_id,
            remote_address: payload.remote_addr,
            socket_type: payload.socket_type,
            terminal_version: payload.terminal_version,
            user_input: payload.content,
            state,
            event: payload.event,
            url_params,
        }
    }

    fn restore_state(&self, context: &str) -> C::State {
        if context.is_empty() {
            return self.state_codec.initial_state();
        }
        match self.state_codec.decode(context) {
            Ok(state) => state,
            Err(err) => {
                self.hook.on_state_fallback(context, &err);
                self.state_codec.initial_state()
            }
        }
    }

    // ── Responses ─────────────────────────────────────────────────────────────

    /// Encodes a service response.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::InvalidCommand`] if the command breaks a gateway
    /// constraint, or [`ProtocolError::StateEncoding`] if the state cannot
    /// be serialized.
    pub fn encode_response(
        &self,
        response: &ServiceResponse<C::State>,
    ) -> Result<String, ProtocolError> {
        let command = match &response.command {
            Some(command) => {
                command.validate()?;
                Some(CommandDto::from(command))
            }
            None => None,
        };
        let dto = ServiceResponseDto {
            version: self.version.clone(),
            content: BASE64.encode(&response.content),
            context: self.state_codec.encode(&response.state)?,
            echo: response.echo.into(),
            direct_call: response.direct_call,
            next: response.next_url.clone(),
            command,
        };
        debug!(
            content_len = response.content.len(),
            has_command = dto.command.is_some(),
            "encoded service response"
        );
        Ok(serde_json::to_string(&dto)?)
    }

    /// Decodes a response as the gateway would read it.
    ///
    /// Unlike request decoding this is strict about the state: a test
    /// asserting on a response wants to see a broken context.
    ///
    /// # Errors
    ///
    /// Any [`ProtocolError`].
    pub fn decode_response(&self, json: &str) -> Result<ServiceResponse<C::State>, ProtocolError> {
        let dto: ServiceResponseDto = serde_json::from_str(json)?;
        let command = dto.command.map(Command::try_from).transpose()?;
        Ok(ServiceResponse {
            state: self.state_codec.decode(&dto.context)?,
            content: BASE64.decode(dto.content)?,
            echo: dto.echo.into(),
            next_url: dto.next,
            direct_call: dto.direct_call,
            command,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::domain::{FunctionKey, GatewayEvent, InputText, SocketType};
    use crate::protocol::state::JsonStateCodec;

    const CNX_REQUEST: &str = r#"{"PAVI":{"version":"1.2","uniqueId":"171481397","remoteAddr":"82.65.112.8","typesocket":"WSS","versionminitel":"Cv;","content":[],"context":"","fctn":"CNX"}}"#;

    /// Records every fallback it sees.
    #[derive(Default)]
    struct RecordingHook {
        seen: RefCell<Vec<String>>,
    }

    impl StateFallbackHook for RecordingHook {
        fn on_state_fallback(&self, context: &str, _error: &StateError) {
            self.seen.borrow_mut().push(context.to_string());
        }
    }

    fn codec() -> WireCodec<JsonStateCodec<Vec<u32>>> {
        WireCodec::new("1.0", JsonStateCodec::default())
    }

    #[test]
    fn test_decode_connection_request() {
        // Act
        let request = codec().decode_request(CNX_REQUEST).unwrap();

        // Assert
        assert_eq!(request.gateway_version, "1.2");
        assert_eq!(request.session_id, "171481397");
        assert_eq!(request.remote_address, "82.65.112.8");
        assert_eq!(request.socket_type, SocketType::WebSocketSsl);
        assert_eq!(request.terminal_version, "Cv;");
        assert!(request.user_input.is_empty());
        assert_eq!(request.event, GatewayEvent::Connection);
        assert_eq!(request.state, Vec::<u32>::new());
        assert_eq!(request.url_params, None);
    }

    #[test]
    fn test_decode_restores_state_from_context() {
        let json = CNX_REQUEST.replace(r#""context":"""#, r#""context":"[1,2,3]""#);
        let request = codec().decode_request(&json).unwrap();
        assert_eq!(request.state, vec![1, 2, 3]);
    }

    #[test]
    fn test_malformed_context_falls_back_and_notifies_hook() {
        // Arrange
        let codec = WireCodec::with_hook(
            "1.0",
            JsonStateCodec::new(|| vec![42u32]),
            RecordingHook::default(),
        );
        let json = CNX_REQUEST.replace(r#""context":"""#, r#""context":"{not json""#);

        // Act
        let request = codec.decode_request(&json).unwrap();

        // Assert
        assert_eq!(request.state, vec![42]);
        assert_eq!(*codec.hook.seen.borrow(), vec!["{not json".to_string()]);
    }

    #[test]
    fn test_empty_context_does_not_notify_hook() {
        let codec = WireCodec::with_hook(
            "1.0",
            JsonStateCodec::<Vec<u32>>::default(),
            RecordingHook::default(),
        );
        codec.decode_request(CNX_REQUEST).unwrap();
        assert!(codec.hook.seen.borrow().is_empty());
    }

    #[test]
    fn test_unknown_socket_type_fails() {
        let json = CNX_REQUEST.replace("WSS", "UDP");
        assert!(matches!(
            codec().decode_request(&json),
            Err(ProtocolError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn test_decode_request_slice_matches_str() {
        let codec = codec();
        let from_str = codec.decode_request(CNX_REQUEST).unwrap();
        let from_slice = codec.decode_request_slice(CNX_REQUEST.as_bytes()).unwrap();
        assert_eq!(from_str, from_slice);
    }

    #[test]
    fn test_encode_response_without_command_omits_field() {
        let response = ServiceResponse::new(vec![1u32], b"Hi".to_vec());
        let json = codec().encode_response(&response).unwrap();
        assert_eq!(
            json,
            r#"{"version":"1.0","content":"SGk=","context":"[1]","echo":"on","directcall":"no","next":""}"#
        );
    }

    #[test]
    fn test_encode_response_revalidates_command() {
        let mut input = InputText::new(1, 1, 5).unwrap();
        input.length = 99;
        let response = ServiceResponse::new(vec![], Vec::new()).with_command(input);
        assert!(matches!(
            codec().encode_response(&response),
            Err(ProtocolError::InvalidCommand(CommandError::OutOfRange { field: "length", .. }))
        ));
    }

    #[test]
    fn test_decode_response_rejects_bad_base64() {
        let json = r#"{"version":"1.0","content":"not base64!","context":"[]","echo":"on","directcall":"no","next":""}"#;
        assert!(matches!(
            codec().decode_response(json),
            Err(ProtocolError::InvalidContent(_))
        ));
    }

    #[test]
    fn test_function_key_bitmask_helpers() {
        let keys = FunctionKeySet::new([FunctionKey::Sommaire, FunctionKey::Guide]).unwrap();
        assert_eq!(encode_function_keys(&keys), 17);
        assert_eq!(decode_function_keys(17), keys);
        assert_eq!(decode_function_keys(2 | 32), FunctionKeySet::empty());
    }
}
