//! Integration tests for the minipavi-core wire codec.
//!
//! These tests go through the public API only: JSON text in, domain values
//! out, and back again, with the exact envelopes a MiniPavi gateway sends and
//! expects.

use std::collections::BTreeMap;

use chrono::DateTime;
use minipavi_core::{
    domain::{
        BackgroundCall, Command, ConnectToExt, ConnectToTelnet, ConnectToWebSocket,
        DuplicateStream, FunctionKey, FunctionKeySet, GatewayEvent, GatewayRequest, InputForm,
        InputMessage, InputText, KeyboardCase, PushServiceMessage, ServiceResponse, SocketType,
    },
    protocol::{
        decode_function_keys, encode_function_keys, JsonStateCodec, ProtocolError, StateCodec,
        StateError, StateFallbackHook, WireCodec,
    },
    DirectCallSetting,
};
use mockall::mock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

mock! {
    Hook {}

    impl StateFallbackHook for Hook {
        fn on_state_fallback(&self, context: &str, error: &StateError);
    }
}

/// A state with no fields; serializes to `{}`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
struct NoState {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Session {
    page: u8,
    name: String,
}

/// Passes the context string through untouched, for services that keep
/// their state in a foreign format.
struct RawContext;

impl StateCodec for RawContext {
    type State = String;

    fn encode(&self, state: &String) -> Result<String, StateError> {
        Ok(state.clone())
    }

    fn decode(&self, context: &str) -> Result<String, StateError> {
        Ok(context.to_string())
    }

    fn initial_state(&self) -> String {
        String::new()
    }
}

const EXAMPLE_REQUEST: &str = r#"{"PAVI":{"version":"1.2","uniqueId":"171481397","remoteAddr":"82.65.112.8",
 "typesocket":"WSS","versionminitel":"Cv;","content":[],"context":"","fctn":"CNX"}}"#;

fn parse(json: &str) -> Value {
    serde_json::from_str(json).expect("test JSON must parse")
}

// ── Requests ──────────────────────────────────────────────────────────────────

#[test]
fn test_example_request_decodes_to_domain_values() {
    let codec = WireCodec::new("1.0", JsonStateCodec::<NoState>::default());

    let request = codec.decode_request(EXAMPLE_REQUEST).expect("decode must succeed");

    assert_eq!(
        request,
        GatewayRequest {
            gateway_version: "1.2".to_string(),
            session_id: "171481397".to_string(),
            remote_address: "82.65.112.8".to_string(),
            socket_type: SocketType::WebSocketSsl,
            terminal_version: "Cv;".to_string(),
            user_input: vec![],
            state: NoState {},
            event: GatewayEvent::Connection,
            url_params: None,
        }
    );
}

#[test]
fn test_request_round_trip_preserves_every_field() {
    // Arrange
    let codec = WireCodec::new(
        "1.0",
        JsonStateCodec::new(|| Session {
            page: 0,
            name: String::new(),
        }),
    );
    let mut params = BTreeMap::new();
    params.insert("step".to_string(), "20".to_string());
    let original = GatewayRequest {
        gateway_version: "1.2".to_string(),
        session_id: "171481397".to_string(),
        remote_address: "82.65.112.8".to_string(),
        socket_type: SocketType::Asterisk,
        terminal_version: "Cv;".to_string(),
        user_input: vec!["ligne 1".to_string(), "ligne 2".to_string()],
        state: Session {
            page: 3,
            name: "Zoé".to_string(),
        },
        event: GatewayEvent::BackgroundCallSimulated,
        url_params: Some(params),
    };

    // Act
    let json = codec.encode_request(&original).expect("encode must succeed");
    let decoded = codec.decode_request(&json).expect("decode must succeed");

    // Assert
    assert_eq!(decoded, original);
    let value = parse(&json);
    assert_eq!(value["PAVI"]["typesocket"], "AST");
    assert_eq!(value["PAVI"]["fctn"], "BGCALL_SIMU");
    assert_eq!(value["URLPARAMS"]["step"], "20");
}

#[test]
fn test_every_event_token_decodes() {
    let codec = WireCodec::new("1.0", JsonStateCodec::<NoState>::default());
    let tokens = [
        ("ENVOI", GatewayEvent::Envoi),
        ("SUITE", GatewayEvent::Suite),
        ("RETOUR", GatewayEvent::Retour),
        ("ANNULATION", GatewayEvent::Annulation),
        ("CORRECTION", GatewayEvent::Correction),
        ("GUIDE", GatewayEvent::Guide),
        ("REPETITION", GatewayEvent::Repetition),
        ("SOMMAIRE", GatewayEvent::Sommaire),
        ("CNX", GatewayEvent::Connection),
        ("FIN", GatewayEvent::Disconnection),
        ("DIRECT", GatewayEvent::Direct),
        ("DIRECTCNX", GatewayEvent::DirectConnection),
        ("DIRECTCALLFAILED", GatewayEvent::DirectCallFailed),
        ("DIRECTCALLENDED", GatewayEvent::DirectCallEnded),
        ("BGCALL", GatewayEvent::BackgroundCall),
        ("BGCALL_SIMU", GatewayEvent::BackgroundCallSimulated),
    ];
    for (token, expected) in tokens {
        let json = EXAMPLE_REQUEST.replace("\"CNX\"", &format!("\"{token}\""));
        let request = codec.decode_request(&json).expect("known token must decode");
        assert_eq!(request.event, expected, "token {token}");
    }
}

#[test]
fn test_unknown_fctn_fails_the_whole_request() {
    let codec = WireCodec::new("1.0", JsonStateCodec::<NoState>::default());
    let json = EXAMPLE_REQUEST.replace("\"CNX\"", "\"PAUSE\"");

    let result = codec.decode_request(&json);

    assert!(matches!(result, Err(ProtocolError::MalformedEnvelope(_))));
}

#[test]
fn test_missing_payload_field_fails() {
    let codec = WireCodec::new("1.0", JsonStateCodec::<NoState>::default());
    let json = EXAMPLE_REQUEST.replace(r#""uniqueId":"171481397","#, "");
    assert!(codec.decode_request(&json).is_err());
}

#[test]
fn test_malformed_context_yields_initial_state_and_calls_hook_once() {
    // Arrange
    let mut hook = MockHook::new();
    hook.expect_on_state_fallback()
        .withf(|context, error| {
            context == "{\"page\":\"x\"}" && matches!(error, StateError::Json(_))
        })
        .times(1)
        .return_const(());
    let initial = Session {
        page: 1,
        name: "guest".to_string(),
    };
    let expected = initial.clone();
    let codec = WireCodec::with_hook(
        "1.0",
        JsonStateCodec::new(move || initial.clone()),
        hook,
    );
    let json = EXAMPLE_REQUEST.replace(r#""context":"""#, r#""context":"{\"page\":\"x\"}""#);

    // Act
    let request = codec.decode_request(&json).expect("bad state must not fail the request");

    // Assert
    assert_eq!(request.state, expected);
}

#[test]
fn test_valid_context_never_calls_hook() {
    let mut hook = MockHook::new();
    hook.expect_on_state_fallback().never();
    let codec = WireCodec::with_hook("1.0", JsonStateCodec::<NoState>::default(), hook);
    let json = EXAMPLE_REQUEST.replace(r#""context":"""#, r#""context":"{}""#);

    codec.decode_request(&json).expect("decode must succeed");
}

// ── Responses ─────────────────────────────────────────────────────────────────

#[test]
fn test_input_text_response_matches_gateway_example_exactly() {
    // Arrange
    let codec = WireCodec::new("1.0", JsonStateCodec::<NoState>::default());
    let keys = FunctionKeySet::new([FunctionKey::Repetition, FunctionKey::Envoi]).unwrap();
    let command = InputText::new(2, 20, 10)
        .unwrap()
        .with_prefill("Salut!")
        .with_submit_with(keys);
    let response = ServiceResponse::new(NoState {}, b"Hello World!".to_vec()).with_command(command);

    // Act
    let json = codec.encode_response(&response).expect("encode must succeed");

    // Assert
    assert_eq!(
        json,
        r#"{"version":"1.0","content":"SGVsbG8gV29ybGQh","context":"{}","echo":"on","directcall":"no","next":"","COMMAND":{"name":"InputTxt","param":{"x":2,"y":20,"l":10,"char":"","spacechar":".","prefill":"Salut!","cursor":"on","validwith":136}}}"#
    );
}

#[test]
fn test_input_message_response_with_foreign_context() {
    let codec = WireCodec::new("1.0", RawContext);
    let keys = FunctionKeySet::new([
        FunctionKey::Repetition,
        FunctionKey::Guide,
        FunctionKey::Envoi,
    ])
    .unwrap();
    let command = InputMessage::new(1, 13, 40, 2)
        .unwrap()
        .with_submit_with(keys)
        .unwrap();
    let response = ServiceResponse::new(
        r#"a:1:{s:3:"url";s:0:"";}"#.to_string(),
        b"Hello World!".to_vec(),
    )
    .with_next_url("http://www.monsite.fr/index.php?step=20")
    .with_command(command);

    let json = codec.encode_response(&response).unwrap();

    assert_eq!(
        parse(&json),
        parse(
            r#"{
              "version": "1.0",
              "context": "a:1:{s:3:\"url\";s:0:\"\";}",
              "content": "SGVsbG8gV29ybGQh",
              "echo": "on",
              "directcall": "no",
              "next": "http://www.monsite.fr/index.php?step=20",
              "COMMAND": {
                "name": "InputMsg",
                "param": {
                  "x": 1, "y": 13, "w": 40, "h": 2,
                  "spacechar": ".", "prefill": [], "cursor": "on",
                  "validwith": 152
                }
              }
            }"#
        )
    );
}

#[test]
fn test_response_round_trip_for_every_command_kind() {
    let codec = WireCodec::new("1.0", JsonStateCodec::<NoState>::default());
    let commands: Vec<Command> = vec![
        InputText::new(5, 24, 20)
            .unwrap()
            .with_substitute_char("*")
            .with_cursor(false)
            .into(),
        InputMessage::new(1, 10, 38, 5)
            .unwrap()
            .with_prefill(vec!["a".into(), "b".into()])
            .into(),
        InputForm::new(vec![10, 10], vec![5, 7], vec![20, 8])
            .unwrap()
            .with_prefill(vec!["nom".into(), String::new()])
            .with_space_char(" ")
            .into(),
        Command::Disconnect,
        PushServiceMessage::new(vec!["1".into(), "2".into()], vec!["hi".into(), "yo".into()])
            .unwrap()
            .into(),
        BackgroundCall {
            send_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            simulate: false,
            target_ids: vec!["1".into()],
            url_or_payload: "http://localhost/bg".into(),
        }
        .into(),
        ConnectToWebSocket {
            key: "secret".into(),
            host: "ssl://example.org:443".into(),
            path: None,
            proto: None,
            echo: false,
            case: KeyboardCase::Lower,
        }
        .into(),
        ConnectToWebSocket {
            key: "secret".into(),
            host: "3611.re:80".into(),
            path: Some("/ws".into()),
            proto: Some("tty".into()),
            echo: true,
            case: KeyboardCase::Upper,
        }
        .into(),
        ConnectToExt {
            key: "secret".into(),
            phone_number: "0836151515".into(),
            rx_level: -35,
            tx_level: -30,
        }
        .into(),
        ConnectToTelnet {
            key: "secret".into(),
            host: "mntl.joher.com:2018".into(),
            echo: true,
            case: KeyboardCase::Upper,
            start_sequence: String::new(),
        }
        .into(),
        DuplicateStream {
            key: "secret".into(),
            source_session_id: "171481397".into(),
        }
        .into(),
    ];

    for command in commands {
        let response = ServiceResponse::new(NoState {}, vec![0x0C, 0x1F, 0x41, 0x41])
            .with_echo(false)
            .with_direct_call(DirectCallSetting::YesCnx)
            .with_command(command);
        let json = codec.encode_response(&response).unwrap();
        let decoded = codec.decode_response(&json).unwrap();
        assert_eq!(decoded, response, "round trip of {json}");
    }
}

#[test]
fn test_decode_response_connect_commands_from_gateway_json() {
    // Arrange
    let codec = WireCodec::new("1.0", JsonStateCodec::<NoState>::default());
    let envelope = |command: &str| {
        format!(
            r#"{{"version":"1.0","content":"","context":"{{}}","echo":"on","directcall":"no","next":"","COMMAND":{command}}}"#
        )
    };
    let websocket = envelope(
        r#"{"name":"connectToWs","param":{"key":"k","host":"example.org:80","path":null,"proto":null,"echo":"off","case":"lower"}}"#,
    );
    let ext = envelope(
        r#"{"name":"connectToExt","param":{"key":"k","number":"3615","RX":-35,"TX":-30}}"#,
    );

    // Act
    let websocket = codec.decode_response(&websocket).unwrap().command;
    let ext = codec.decode_response(&ext).unwrap().command;

    // Assert
    assert_eq!(
        websocket,
        Some(Command::ConnectToWebSocket(ConnectToWebSocket {
            key: "k".into(),
            host: "example.org:80".into(),
            path: None,
            proto: None,
            echo: false,
            case: KeyboardCase::Lower,
        }))
    );
    assert_eq!(
        ext,
        Some(Command::ConnectToExt(ConnectToExt {
            key: "k".into(),
            phone_number: "3615".into(),
            rx_level: -35,
            tx_level: -30,
        }))
    );
}

#[test]
fn test_direct_call_tokens() {
    let codec = WireCodec::new("1.0", JsonStateCodec::<NoState>::default());
    for (setting, token) in [
        (DirectCallSetting::No, "no"),
        (DirectCallSetting::Yes, "yes"),
        (DirectCallSetting::YesCnx, "yes-cnx"),
    ] {
        let response = ServiceResponse::new(NoState {}, Vec::new()).with_direct_call(setting);
        let json = codec.encode_response(&response).unwrap();
        assert_eq!(parse(&json)["directcall"], token);
    }
}

// ── Function key bitmask ──────────────────────────────────────────────────────

#[test]
fn test_bitmask_round_trip_for_all_64_subsets() {
    for subset in 0u32..64 {
        // Arrange: pick the keys whose index bit is set in `subset`
        let keys: Vec<FunctionKey> = FunctionKey::SUBMITTABLE
            .iter()
            .enumerate()
            .filter(|(i, _)| subset & (1 << i) != 0)
            .map(|(_, key)| *key)
            .collect();
        let set = FunctionKeySet::new(keys.clone()).unwrap();

        // Act
        let bits = encode_function_keys(&set);
        let decoded = decode_function_keys(bits.into());

        // Assert
        assert_eq!(decoded, set);
        assert_eq!(decoded.iter().collect::<Vec<_>>(), keys);
        assert_eq!(bits & (2 | 32), 0, "reserved bits must never be set");
    }
}
