//! Serde mirror of the gateway's JSON envelopes.
//!
//! Field names, field order and enum tokens follow the gateway exactly;
//! these structs are the static table between domain types and the wire.
//! Conversions to and from the domain live at the bottom of this file.

use std::collections::BTreeMap;

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{
    BackgroundCall, Command, CommandError, ConnectToExt, ConnectToTelnet, ConnectToWebSocket,
    DirectCallSetting, DuplicateStream, FunctionKeySet, GatewayEvent, InputForm, InputMessage,
    InputText, KeyboardCase, PushServiceMessage, SocketType,
};

// ── Request envelope ──────────────────────────────────────────────────────────

/// `{"PAVI": {...}, "URLPARAMS": {...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayRequestDto {
    #[serde(rename = "PAVI")]
    pub payload: PayloadDto,

    #[serde(rename = "URLPARAMS", default, skip_serializing_if = "Option::is_none")]
    pub url_params: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadDto {
    pub version: String,
    #[serde(rename = "uniqueId")]
    pub unique_id: String,
    #[serde(rename = "remoteAddr")]
    pub remote_addr: String,
    #[serde(rename = "typesocket")]
    pub socket_type: SocketType,
    #[serde(rename = "versionminitel")]
    pub terminal_version: String,
    pub content: Vec<String>,
    /// Serialized session state; empty on the first call of a session.
    pub context: String,
    #[serde(rename = "fctn")]
    pub event: GatewayEvent,
}

// ── Response envelope ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceResponseDto {
    pub version: String,
    /// Base64 of the videotex page.
    pub content: String,
    pub context: String,
    pub echo: OnOff,
    #[serde(rename = "directcall")]
    pub direct_call: DirectCallSetting,
    pub next: String,
    #[serde(rename = "COMMAND", default, skip_serializing_if = "Option::is_none")]
    pub command: Option<CommandDto>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnOff {
    On,
    Off,
}

impl From<bool> for OnOff {
    fn from(on: bool) -> Self {
        if on {
            OnOff::On
        } else {
            OnOff::Off
        }
    }
}

impl From<OnOff> for bool {
    fn from(value: OnOff) -> Self {
        value == OnOff::On
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseDto {
    Upper,
    Lower,
}

impl From<KeyboardCase> for CaseDto {
    fn from(case: KeyboardCase) -> Self {
        match case {
            KeyboardCase::Upper => CaseDto::Upper,
            KeyboardCase::Lower => CaseDto::Lower,
        }
    }
}

impl From<CaseDto> for KeyboardCase {
    fn from(case: CaseDto) -> Self {
        match case {
            CaseDto::Upper => KeyboardCase::Upper,
            CaseDto::Lower => KeyboardCase::Lower,
        }
    }
}

/// `{"name": <tag>, "param": {...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "param")]
pub enum CommandDto {
    #[serde(rename = "InputTxt")]
    InputText(InputTextParams),
    #[serde(rename = "InputMsg")]
    InputMessage(InputMessageParams),
    #[serde(rename = "InputForm")]
    InputForm(InputFormParams),
    #[serde(rename = "libCnx")]
    Disconnect,
    #[serde(rename = "PushServiceMsg")]
    PushServiceMessage(PushServiceMessageParams),
    #[serde(rename = "BackgroundCall")]
    BackgroundCall(BackgroundCallParams),
    #[serde(rename = "connectToWs")]
    ConnectToWebSocket(ConnectToWebSocketParams),
    #[serde(rename = "connectToTln")]
    ConnectToTelnet(ConnectToTelnetParams),
    #[serde(rename = "connectToExt")]
    ConnectToExt(ConnectToExtParams),
    #[serde(rename = "duplicateStream")]
    DuplicateStream(DuplicateStreamParams),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputTextParams {
    pub x: u8,
    pub y: u8,
    #[serde(rename = "l")]
    pub length: u8,
    #[serde(rename = "char")]
    pub substitute_char: String,
    #[serde(rename = "spacechar")]
    pub space_char: String,
    pub prefill: String,
    pub cursor: OnOff,
    #[serde(rename = "validwith")]
    pub valid_with: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputMessageParams {
    pub x: u8,
    pub y: u8,
    #[serde(rename = "w")]
    pub width: u8,
    #[serde(rename = "h")]
    pub height: u8,
    #[serde(rename = "spacechar")]
    pub space_char: String,
    pub prefill: Vec<String>,
    pub cursor: OnOff,
    #[serde(rename = "validwith")]
    pub valid_with: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFormParams {
    pub x: Vec<u8>,
    pub y: Vec<u8>,
    #[serde(rename = "l")]
    pub length: Vec<u8>,
    #[serde(rename = "spacechar")]
    pub space_char: String,
    pub prefill: Vec<String>,
    pub cursor: OnOff,
    #[serde(rename = "validwith")]
    pub valid_with: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushServiceMessageParams {
    #[serde(rename = "uniqueid")]
    pub unique_ids: Vec<String>,
    pub message: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundCallParams {
    /// Unix timestamp in seconds.
    pub time: i64,
    pub simulate: bool,
    #[serde(rename = "uniqueid")]
    pub unique_ids: Vec<String>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectToWebSocketParams {
    pub key: String,
    pub host: String,
    /// Sent as `null` when absent.
    pub path: Option<String>,
    pub proto: Option<String>,
    pub echo: OnOff,
    pub case: CaseDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectToTelnetParams {
    pub key: String,
    pub host: String,
    pub echo: OnOff,
    pub case: CaseDto,
    #[serde(rename = "startseq")]
    pub start_sequence: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectToExtParams {
    pub key: String,
    pub number: String,
    #[serde(rename = "RX")]
    pub rx: i32,
    #[serde(rename = "TX")]
    pub tx: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateStreamParams {
    pub key: String,
    #[serde(rename = "uniqueid")]
    pub unique_id: String,
}

// ── Domain conversions ────────────────────────────────────────────────────────

impl From<&Command> for CommandDto {
    fn from(command: &Command) -> Self {
        match command {
            Command::InputText(cmd) => CommandDto::InputText(InputTextParams {
                x: cmd.col,
                y: cmd.line,
                length: cmd.length,
                substitute_char: cmd.substitute_char.clone(),
                space_char: cmd.space_char.clone(),
                prefill: cmd.prefill.clone(),
                cursor: cmd.cursor_visible.into(),
                valid_with: cmd.submit_with.bits().into(),
            }),
            Command::InputMessage(cmd) => CommandDto::InputMessage(InputMessageParams {
                x: cmd.col,
                y: cmd.line,
                width: cmd.width,
                height: cmd.height,
                space_char: cmd.space_char.clone(),
                prefill: cmd.prefill.clone(),
                cursor: cmd.cursor_visible.into(),
                valid_with: cmd.submit_with.bits().into(),
            }),
            Command::InputForm(cmd) => CommandDto::InputForm(InputFormParams {
                x: cmd.cols.clone(),
                y: cmd.lines.clone(),
                length: cmd.lengths.clone(),
                space_char: cmd.space_char.clone(),
                prefill: cmd.prefill.clone(),
                cursor: cmd.cursor_visible.into(),
                valid_with: cmd.submit_with.bits().into(),
            }),
            Command::Disconnect => CommandDto::Disconnect,
            Command::PushServiceMessage(cmd) => {
                CommandDto::PushServiceMessage(PushServiceMessageParams {
                    unique_ids: cmd.target_ids.clone(),
                    message: cmd.messages.clone(),
                })
            }
            Command::BackgroundCall(cmd) => CommandDto::BackgroundCall(BackgroundCallParams {
                time: cmd.send_at.timestamp(),
                simulate: cmd.simulate,
                unique_ids: cmd.target_ids.clone(),
                url: cmd.url_or_payload.clone(),
            }),
            Command::ConnectToWebSocket(cmd) => {
                CommandDto::ConnectToWebSocket(ConnectToWebSocketParams {
                    key: cmd.key.clone(),
                    host: cmd.host.clone(),
                    path: cmd.path.clone(),
                    proto: cmd.proto.clone(),
                    echo: cmd.echo.into(),
                    case: cmd.case.into(),
                })
            }
            Command::ConnectToTelnet(cmd) => CommandDto::ConnectToTelnet(ConnectToTelnetParams {
                key: cmd.key.clone(),
                host: cmd.host.clone(),
                echo: cmd.echo.into(),
                case: cmd.case.into(),
                start_sequence: cmd.start_sequence.clone(),
            }),
            Command::ConnectToExt(cmd) => CommandDto::ConnectToExt(ConnectToExtParams {
                key: cmd.key.clone(),
                number: cmd.phone_number.clone(),
                rx: cmd.rx_level,
                tx: cmd.tx_level,
            }),
            Command::DuplicateStream(cmd) => CommandDto::DuplicateStream(DuplicateStreamParams {
                key: cmd.key.clone(),
                unique_id: cmd.source_session_id.clone(),
            }),
        }
    }
}

impl TryFrom<CommandDto> for Command {
    type Error = CommandError;

    fn try_from(dto: CommandDto) -> Result<Self, Self::Error> {
        let command = match dto {
            CommandDto::InputText(p) => Command::InputText(InputText {
                col: p.x,
                line: p.y,
                length: p.length,
                substitute_char: p.substitute_char,
                space_char: p.space_char,
                prefill: p.prefill,
                cursor_visible: p.cursor.into(),
                submit_with: FunctionKeySet::from_bits_truncate(p.valid_with),
            }),
            CommandDto::InputMessage(p) => Command::InputMessage(InputMessage {
                col: p.x,
                line: p.y,
                width: p.width,
                height: p.height,
                space_char: p.space_char,
                prefill: p.prefill,
                cursor_visible: p.cursor.into(),
                submit_with: FunctionKeySet::from_bits_truncate(p.valid_with),
            }),
            CommandDto::InputForm(p) => Command::InputForm(InputForm {
                cols: p.x,
                lines: p.y,
                lengths: p.length,
                space_char: p.space_char,
                prefill: p.prefill,
                cursor_visible: p.cursor.into(),
                submit_with: FunctionKeySet::from_bits_truncate(p.valid_with),
            }),
            CommandDto::Disconnect => Command::Disconnect,
            CommandDto::PushServiceMessage(p) => Command::PushServiceMessage(PushServiceMessage {
                target_ids: p.unique_ids,
                messages: p.message,
            }),
            CommandDto::BackgroundCall(p) => Command::BackgroundCall(BackgroundCall {
                send_at: DateTime::from_timestamp(p.time, 0)
                    .ok_or(CommandError::InvalidTimestamp(p.time))?,
                simulate: p.simulate,
                target_ids: p.unique_ids,
                url_or_payload: p.url,
            }),
            CommandDto::ConnectToWebSocket(p) => Command::ConnectToWebSocket(ConnectToWebSocket {
                key: p.key,
                host: p.host,
                path: p.path,
                proto: p.proto,
                echo: p.echo.into(),
                case: p.case.into(),
            }),
            CommandDto::ConnectToTelnet(p) => Command::ConnectToTelnet(ConnectToTelnet {
                key: p.key,
                host: p.host,
                echo: p.echo.into(),
                case: p.case.into(),
                start_sequence: p.start_sequence,
            }),
            CommandDto::ConnectToExt(p) => Command::ConnectToExt(ConnectToExt {
                key: p.key,
                phone_number: p.number,
                rx_level: p.rx,
                tx_level: p.tx,
            }),
            CommandDto::DuplicateStream(p) => Command::DuplicateStream(DuplicateStream {
                key: p.key,
                source_session_id: p.unique_id,
            }),
        };
        command.validate()?;
        Ok(command)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
