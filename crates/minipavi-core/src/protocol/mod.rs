//! Wire protocol: JSON envelopes, session state codecs and the codec itself.

pub mod codec;
pub mod dto;
pub mod state;

pub use codec::{decode_function_keys, encode_function_keys, ProtocolError, WireCodec};
pub use state::{JsonStateCodec, StateCodec, StateError, StateFallbackHook, TracingFallbackHook};
