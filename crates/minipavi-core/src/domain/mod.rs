//! Domain model of a gateway exchange.
//!
//! # The exchange in one picture (for beginners)
//!
//! ```text
//!  terminal ──► gateway ──POST GatewayRequest──► service
//!                  ▲                                │
//!                  └─────── ServiceResponse ◄───────┘
//! ```
//!
//! The gateway owns the terminal connection.  Each time the user presses a
//! function key (or connects, or a scheduled call fires), it POSTs a
//! [`GatewayRequest`] to the service.  The service answers with a
//! [`ServiceResponse`]: a videotex page to display, optionally a [`Command`]
//! such as "open a 10-character input zone on line 20", and its own session
//! state, which the gateway hands back untouched on the next call.
//!
//! Nothing here knows about JSON or HTTP.  The `protocol` module maps these
//! types to and from the wire format.

pub mod function_key;
pub mod request;
pub mod response;

pub use function_key::{FunctionKey, FunctionKeySet};
pub use request::{GatewayEvent, GatewayRequest, SocketType};
pub use response::{
    BackgroundCall, Command, CommandError, ConnectToExt, ConnectToTelnet, ConnectToWebSocket,
    DirectCallSetting, DuplicateStream, InputForm, InputMessage, InputText, KeyboardCase,
    PushServiceMessage, ServiceResponse,
};
