//! The service's response to the gateway, and the commands it can carry.
//!
//! Commands with screen coordinates validate them on construction.  The
//! fields stay public for pattern matching, so the codec re-runs
//! [`Command::validate`] before anything is written to the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use videotex::KeyboardCase;

use crate::domain::function_key::{FunctionKey, FunctionKeySet};

/// Widest input zone, and the last column.
pub const MAX_COLUMN: u8 = 40;
/// Last line an input zone may occupy.  Line 0 is the status line and
/// belongs to the gateway.
pub const MAX_LINE: u8 = 25;
/// Most fields an [`InputForm`] may define.
pub const MAX_FORM_FIELDS: usize = 30;

/// Default character drawn in empty input positions.
pub const DEFAULT_SPACE_CHAR: &str = ".";

/// Errors raised when a command is built with values the gateway rejects.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    /// `Correction` and `Annulation` are reserved for the gateway's line editor.
    #[error("function key {0} is handled by the gateway and cannot submit an input")]
    UnsupportedFunctionKey(FunctionKey),

    /// `Suite` and `Retour` move between lines of a multi-line zone.
    #[error("function key {key} cannot submit a {command} zone")]
    KeyNotAllowed {
        key: FunctionKey,
        command: &'static str,
    },

    #[error("{field} has {actual} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A background call time that cannot be represented.
    #[error("invalid background call time: {0}")]
    InvalidTimestamp(i64),
}

fn check_range(field: &'static str, value: u32, min: u32, max: u32) -> Result<(), CommandError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(CommandError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

fn check_position(col: u8, line: u8) -> Result<(), CommandError> {
    check_range("col", col.into(), 1, MAX_COLUMN.into())?;
    check_range("line", line.into(), 1, MAX_LINE.into())
}

/// Multi-line zones use `Suite` and `Retour` for navigation.
fn check_multiline_keys(keys: FunctionKeySet, command: &'static str) -> Result<(), CommandError> {
    for key in [FunctionKey::Suite, FunctionKey::Retour] {
        if keys.contains(key) {
            return Err(CommandError::KeyNotAllowed { key, command });
        }
    }
    Ok(())
}

// ── Response ──────────────────────────────────────────────────────────────────

/// Whether the gateway should call the `next` URL straight away.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DirectCallSetting {
    /// Wait for the user.
    #[default]
    #[serde(rename = "no")]
    No,
    /// Call immediately with event `DIRECT`.
    #[serde(rename = "yes")]
    Yes,
    /// Call immediately with event `DIRECTCNX`.
    #[serde(rename = "yes-cnx")]
    YesCnx,
}

/// What the service sends back for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceResponse<T> {
    /// Session state, returned verbatim by the gateway on the next call.
    pub state: T,
    /// Videotex page to display.
    pub content: Vec<u8>,
    /// Gateway echoes typed characters back to the terminal.
    pub echo: bool,
    /// URL the gateway calls next.
    pub next_url: String,
    pub direct_call: DirectCallSetting,
    /// `None` simply displays `content`.
    pub command: Option<Command>,
}

impl<T> ServiceResponse<T> {
    /// A response that displays `content`, with echo on and no command.
    pub fn new(state: T, content: Vec<u8>) -> Self {
        Self {
            state,
            content,
            echo: true,
            next_url: String::new(),
            direct_call: DirectCallSetting::No,
            command: None,
        }
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn with_next_url(mut self, next_url: impl Into<String>) -> Self {
        self.next_url = next_url.into();
        self
    }

    pub fn with_direct_call(mut self, direct_call: DirectCallSetting) -> Self {
        self.direct_call = direct_call;
        self
    }

    pub fn with_command(mut self, command: impl Into<Command>) -> Self {
        self.command = Some(command.into());
        self
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

/// A special action for the gateway to perform after displaying the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    InputText(InputText),
    InputMessage(InputMessage),
    InputForm(InputForm),
    /// Sends the user back to the gateway's default service.
    Disconnect,
    PushServiceMessage(PushServiceMessage),
    BackgroundCall(BackgroundCall),
    ConnectToWebSocket(ConnectToWebSocket),
    ConnectToTelnet(ConnectToTelnet),
    ConnectToExt(ConnectToExt),
    DuplicateStream(DuplicateStream),
}

impl Command {
    /// Re-checks every constraint the constructors enforce.
    ///
    /// # Errors
    ///
    /// The first [`CommandError`] found.
    pub fn validate(&self) -> Result<(), CommandError> {
        match self {
            Command::InputText(cmd) => cmd.validate(),
            Command::InputMessage(cmd) => cmd.validate(),
            Command::InputForm(cmd) => cmd.validate(),
            Command::PushServiceMessage(cmd) => cmd.validate(),
            Command::Disconnect
            | Command::BackgroundCall(_)
            | Command::ConnectToWebSocket(_)
            | Command::ConnectToTelnet(_)
            | Command::ConnectToExt(_)
            | Command::DuplicateStream(_) => Ok(()),
        }
    }
}

/// Single-line input zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputText {
    /// Column, `1..=40`.
    pub col: u8,
    /// Line, `1..=25`.
    pub line: u8,
    /// Zone length, `1..=40`.
    pub length: u8,
    /// When not empty, displayed instead of every typed character (passwords).
    pub substitute_char: String,
    pub space_char: String,
    pub prefill: String,
    pub cursor_visible: bool,
    pub submit_with: FunctionKeySet,
}

impl InputText {
    /// # Errors
    ///
    /// [`CommandError::OutOfRange`] if a coordinate or the length is invalid.
    pub fn new(col: u8, line: u8, length: u8) -> Result<Self, CommandError> {
        let cmd = Self {
            col,
            line,
            length,
            substitute_char: String::new(),
            space_char: DEFAULT_SPACE_CHAR.to_string(),
            prefill: String::new(),
            cursor_visible: true,
            submit_with: FunctionKeySet::default(),
        };
        cmd.validate()?;
        Ok(cmd)
    }

    pub fn with_prefill(mut self, prefill: impl Into<String>) -> Self {
        self.prefill = prefill.into();
        self
    }

    pub fn with_substitute_char(mut self, substitute: impl Into<String>) -> Self {
        self.substitute_char = substitute.into();
        self
    }

    pub fn with_space_char(mut self, space_char: impl Into<String>) -> Self {
        self.space_char = space_char.into();
        self
    }

    pub fn with_cursor(mut self, visible: bool) -> Self {
        self.cursor_visible = visible;
        self
    }

    pub fn with_submit_with(mut self, keys: FunctionKeySet) -> Self {
        self.submit_with = keys;
        self
    }

    pub fn validate(&self) -> Result<(), CommandError> {
        check_position(self.col, self.line)?;
        check_range("length", self.length.into(), 1, MAX_COLUMN.into())
    }
}

/// Multi-line free text zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputMessage {
    pub col: u8,
    pub line: u8,
    /// Zone width, `1..=40`.
    pub width: u8,
    /// Number of lines; the zone must end on line 25 at the latest.
    pub height: u8,
    pub space_char: String,
    /// Prefilled text, one entry per line.
    pub prefill: Vec<String>,
    pub cursor_visible: bool,
    pub submit_with: FunctionKeySet,
}

impl InputMessage {
    /// # Errors
    ///
    /// [`CommandError::OutOfRange`] if the zone does not fit on screen.
    pub fn new(col: u8, line: u8, width: u8, height: u8) -> Result<Self, CommandError> {
        let cmd = Self {
            col,
            line,
            width,
            height,
            space_char: DEFAULT_SPACE_CHAR.to_string(),
            prefill: Vec::new(),
            cursor_visible: true,
            submit_with: FunctionKeySet::default(),
        };
        cmd.validate()?;
        Ok(cmd)
    }

    pub fn with_prefill(mut self, lines: Vec<String>) -> Self {
        self.prefill = lines;
        self
    }

    pub fn with_space_char(mut self, space_char: impl Into<String>) -> Self {
        self.space_char = space_char.into();
        self
    }

    pub fn with_cursor(mut self, visible: bool) -> Self {
        self.cursor_visible = visible;
        self
    }

    /// # Errors
    ///
    /// [`CommandError::KeyNotAllowed`] if `keys` contains `Suite` or `Retour`.
    pub fn with_submit_with(mut self, keys: FunctionKeySet) -> Result<Self, CommandError> {
        check_multiline_keys(keys, "message")?;
        self.submit_with = keys;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), CommandError> {
        check_position(self.col, self.line)?;
        check_range("width", self.width.into(), 1, MAX_COLUMN.into())?;
        let max_height = u32::from(MAX_LINE) - u32::from(self.line) + 1;
        check_range("height", self.height.into(), 1, max_height)?;
        check_multiline_keys(self.submit_with, "message")
    }
}

/// Several single-line zones the user moves between with `Suite`/`Retour`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputForm {
    pub cols: Vec<u8>,
    pub lines: Vec<u8>,
    pub lengths: Vec<u8>,
    pub space_char: String,
    /// Prefilled value of each field.
    pub prefill: Vec<String>,
    pub cursor_visible: bool,
    pub submit_with: FunctionKeySet,
}

impl InputForm {
    /// Builds a form from parallel vectors, one entry per field.
    ///
    /// # Errors
    ///
    /// [`CommandError::LengthMismatch`] if the vectors differ in length, or
    /// [`CommandError::OutOfRange`] for a bad field count or position.
    pub fn new(cols: Vec<u8>, lines: Vec<u8>, lengths: Vec<u8>) -> Result<Self, CommandError> {
        let cmd = Self {
            cols,
            lines,
            lengths,
            space_char: DEFAULT_SPACE_CHAR.to_string(),
            prefill: Vec::new(),
            cursor_visible: true,
            submit_with: FunctionKeySet::default(),
        };
        cmd.validate()?;
        Ok(cmd)
    }

    pub fn with_prefill(mut self, values: Vec<String>) -> Self {
        self.prefill = values;
        self
    }

    pub fn with_space_char(mut self, space_char: impl Into<String>) -> Self {
        self.space_char = space_char.into();
        self
    }

    pub fn with_cursor(mut self, visible: bool) -> Self {
        self.cursor_visible = visible;
        self
    }

    /// # Errors
    ///
    /// [`CommandError::KeyNotAllowed`] if `keys` contains `Suite` or `Retour`.
    pub fn with_submit_with(mut self, keys: FunctionKeySet) -> Result<Self, CommandError> {
        check_multiline_keys(keys, "form")?;
        self.submit_with = keys;
        Ok(self)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.cols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cols.is_empty()
    }

    pub fn validate(&self) -> Result<(), CommandError> {
        let count = self.cols.len();
        check_range(
            "fields",
            u32::try_from(count).unwrap_or(u32::MAX),
            1,
            MAX_FORM_FIELDS as u32,
        )?;
        for (field, actual) in [("lines", self.lines.len()), ("lengths", self.lengths.len())] {
            if actual != count {
                return Err(CommandError::LengthMismatch {
                    field,
                    expected: count,
                    actual,
                });
            }
        }
        for ((&col, &line), &length) in self.cols.iter().zip(&self.lines).zip(&self.lengths) {
            check_position(col, line)?;
            check_range("length", length.into(), 1, MAX_COLUMN.into())?;
        }
        check_multiline_keys(self.submit_with, "form")
    }
}

/// Line 0 messages pushed to other connected users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushServiceMessage {
    /// Session ids of the recipients.
    pub target_ids: Vec<String>,
    /// One message per recipient, same order.
    pub messages: Vec<String>,
}

impl PushServiceMessage {
    /// # Errors
    ///
    /// [`CommandError::LengthMismatch`] unless there is one message per target.
    pub fn new(target_ids: Vec<String>, messages: Vec<String>) -> Result<Self, CommandError> {
        let cmd = Self {
            target_ids,
            messages,
        };
        cmd.validate()?;
        Ok(cmd)
    }

    pub fn validate(&self) -> Result<(), CommandError> {
        if self.messages.len() == self.target_ids.len() {
            Ok(())
        } else {
            Err(CommandError::LengthMismatch {
                field: "messages",
                expected: self.target_ids.len(),
                actual: self.messages.len(),
            })
        }
    }
}

/// Asks the gateway to call a URL at a given time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundCall {
    /// Scheduled time; sent with second precision.
    pub send_at: DateTime<Utc>,
    /// `false`: call `url_or_payload` as an independent background call.
    /// `true`: call each target's next URL as if they had typed
    /// `url_or_payload`.
    pub simulate: bool,
    pub target_ids: Vec<String>,
    pub url_or_payload: String,
}

/// Connects the user to a videotex service reachable over WebSocket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectToWebSocket {
    /// Authorisation key configured on the gateway.
    pub key: String,
    /// `host:port`, prefixed with `ssl://` for a secure socket.
    pub host: String,
    /// Defaults to `/` on the gateway side.
    pub path: Option<String>,
    /// Extra WebSocket sub-protocol.
    pub proto: Option<String>,
    /// `true`: the gateway echoes; `false`: the remote server does.
    pub echo: bool,
    pub case: KeyboardCase,
}

/// Connects the user to a videotex service reachable over Telnet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectToTelnet {
    pub key: String,
    pub host: String,
    pub echo: bool,
    pub case: KeyboardCase,
    /// Sent to the server as soon as the connection opens.
    pub start_sequence: String,
}

/// Dials a videotex service over the phone network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectToExt {
    pub key: String,
    pub phone_number: String,
    /// Minimum receive level in dB, for example `-35`.
    pub rx_level: i32,
    /// Transmit level in dB, for example `-30`.
    pub tx_level: i32,
}

/// Mirrors another user's output stream to this user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateStream {
    pub key: String,
    pub source_session_id: String,
}

macro_rules! impl_into_command {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Command {
                fn from(cmd: $variant) -> Self {
                    Command::$variant(cmd)
                }
            }
        )*
    };
}

impl_into_command!(
    InputText,
    InputMessage,
    InputForm,
    PushServiceMessage,
    BackgroundCall,
    ConnectToWebSocket,
    ConnectToTelnet,
    ConnectToExt,
    DuplicateStream,
);

// ── Tests ─────────────────────────────────────────────────────────────────────
