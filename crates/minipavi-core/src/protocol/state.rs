//! Session state (de)serialization and the fallback hook.
//!
//! The gateway carries the service's state in the string `context` field and
//! hands it back verbatim.  Services pick how that string is produced by
//! supplying a [`StateCodec`]; [`JsonStateCodec`] covers the usual case of a
//! serde type encoded as JSON.
//!
//! A stored context can become unreadable (the state type changed between
//! deployments, or the gateway lost it).  Decoding then falls back to the
//! codec's initial state and reports the event through a
//! [`StateFallbackHook`] instead of failing the request.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

/// Errors raised while encoding or decoding session state.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("state JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised by custom codecs.
    #[error("{0}")]
    Custom(String),
}

/// Converts a service's session state to and from the `context` string.
pub trait StateCodec {
    type State;

    /// Serializes `state` into the string the gateway will hand back.
    fn encode(&self, state: &Self::State) -> Result<String, StateError>;

    /// Parses a non-empty `context` string.
    fn decode(&self, context: &str) -> Result<Self::State, StateError>;

    /// State of a brand new session, also used when `context` is unreadable.
    fn initial_state(&self) -> Self::State;
}

/// JSON state codec backed by serde.
pub struct JsonStateCodec<T, F = fn() -> T> {
    initial: F,
    _state: PhantomData<fn() -> T>,
}

impl<T, F> JsonStateCodec<T, F>
where
    F: Fn() -> T,
{
    /// `initial` produces the state of a new session.
    pub fn new(initial: F) -> Self {
        Self {
            initial,
            _state: PhantomData,
        }
    }
}

impl<T: Default> Default for JsonStateCodec<T> {
    fn default() -> Self {
        Self::new(T::default)
    }
}

impl<T, F> fmt::Debug for JsonStateCodec<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonStateCodec")
            .field("state", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T, F> StateCodec for JsonStateCodec<T, F>
where
    T: Serialize + DeserializeOwned,
    F: Fn() -> T,
{
    type State = T;

    fn encode(&self, state: &T) -> Result<String, StateError> {
        Ok(serde_json::to_string(state)?)
    }

    fn decode(&self, context: &str) -> Result<T, StateError> {
        Ok(serde_json::from_str(context)?)
    }

    fn initial_state(&self) -> T {
        (self.initial)()
    }
}

/// Observes the requests whose `context` could not be decoded.
///
/// Implementations must not fail: the request continues with the initial
/// state whatever the hook does.
pub trait StateFallbackHook {
    fn on_state_fallback(&self, context: &str, error: &StateError);
}

/// Characters of an unreadable context included in the log event.
pub const LOGGED_CONTEXT_PREFIX: usize = 32;

/// Default hook: one `warn!` event per fallback.
///
/// The context comes from the client, so only its length and a short prefix
/// are logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFallbackHook;

impl StateFallbackHook for TracingFallbackHook {
    fn on_state_fallback(&self, context: &str, error: &StateError) {
        warn!(
            context_len = context.len(),
            context_prefix = context_prefix(context),
            error = %error,
            "session state could not be decoded, using initial state"
        );
    }
}

/// First [`LOGGED_CONTEXT_PREFIX`] characters of `context`.
fn context_prefix(context: &str) -> &str {
    match context.char_indices().nth(LOGGED_CONTEXT_PREFIX) {
        Some((end, _)) => &context[..end],
        None => context,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
