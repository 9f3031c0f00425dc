//! Sample service: three pages shown in a loop.
//!
//! 1. An intro page listing what the gateway reported about the caller.
//! 2. Every text and background colour, ending in a one-field input form.
//! 3. Blink, underline and character sizes, followed by what the user typed.
//!
//! Any key press moves to the next page.

use minipavi_core::domain::{GatewayRequest, InputForm, ServiceResponse, SocketType};
use minipavi_core::videotex::{build_videotex, CharacterSize, Color};
use serde::{Deserialize, Serialize};

use crate::application::service::{MinitelService, ServiceError};

/// Which page the user will see next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HelloWorldState {
    #[serde(rename = "intro")]
    IntroPage,
    #[serde(rename = "textColor")]
    TextColorPage,
    #[serde(rename = "textFormat")]
    TextFormatPage,
}

/// Line of the input field on the colour page.
const INPUT_LINE: u8 = 19;
const INPUT_LENGTH: u8 = 30;

#[derive(Debug, Clone, Copy, Default)]
pub struct HelloWorldService;

impl MinitelService for HelloWorldService {
    type State = HelloWorldState;

    fn initial_state(&self) -> HelloWorldState {
        HelloWorldState::IntroPage
    }

    fn handle(
        &self,
        request: GatewayRequest<HelloWorldState>,
    ) -> Result<ServiceResponse<HelloWorldState>, ServiceError> {
        match request.state {
            HelloWorldState::IntroPage => intro_page(&request),
            HelloWorldState::TextColorPage => text_color_page(),
            HelloWorldState::TextFormatPage => text_format_page(&request),
        }
    }
}

fn socket_label(socket: SocketType) -> &'static str {
    match socket {
        SocketType::WebSocket => "WebSocket",
        SocketType::WebSocketSsl => "WebSocket (TLS)",
        SocketType::Asterisk => "ligne téléphonique",
        SocketType::Telnet => "Telnet",
    }
}

fn intro_page(
    request: &GatewayRequest<HelloWorldState>,
) -> Result<ServiceResponse<HelloWorldState>, ServiceError> {
    let content = build_videotex(|b| {
        b.clear_all().append_line("");
        b.with_character_size(CharacterSize::DoubleHeight, |b| {
            b.append_line(" Bonjour le monde !");
            Ok(())
        })?;
        b.append_line("");

        let details = [
            (" Vous êtes ", request.session_id.as_str(), Color::Red),
            (" ou ", request.remote_address.as_str(), Color::Green),
            (" Connecté.e via ", socket_label(request.socket_type), Color::Blue),
            (
                " À l'aide d'un Minitel ",
                request.terminal_version.as_str(),
                Color::Yellow,
            ),
        ];
        for (label, value, color) in details {
            b.append(label);
            b.with_text_color(color, |b| {
                b.append_line(value);
                Ok(())
            })?;
        }
        Ok(())
    })?;

    Ok(ServiceResponse::new(HelloWorldState::TextColorPage, content))
}

fn text_color_page() -> Result<ServiceResponse<HelloWorldState>, ServiceError> {
    let content = build_videotex(|b| {
        b.clear_all();
        for color in Color::ALL {
            b.with_text_color(color, |b| {
                b.append_line(&format!("Texte en {}", color.name()));
                Ok(())
            })?;
        }
        b.append_line("");
        for color in Color::ALL {
            b.with_background_color(color, |b| {
                b.append_line(&format!("Texte sur {}", color.name()));
                Ok(())
            })?;
        }
        b.append_line("");
        b.append_line("Test de l'entrée utilisateur :");
        Ok(())
    })?;

    let form = InputForm::new(vec![1], vec![INPUT_LINE], vec![INPUT_LENGTH])?;
    Ok(ServiceResponse::new(HelloWorldState::TextFormatPage, content).with_command(form))
}

fn text_format_page(
    request: &GatewayRequest<HelloWorldState>,
) -> Result<ServiceResponse<HelloWorldState>, ServiceError> {
    let content = build_videotex(|b| {
        b.clear_all();
        b.with_blink(|b| {
            b.append_line(" Texte clignotant");
            Ok(())
        })?;
        b.with_underline(|b| {
            b.append_line(" Texte souligné");
            Ok(())
        })?;
        b.append_line("");

        let sizes = [
            (CharacterSize::DoubleHeight, " Double hauteur"),
            (CharacterSize::DoubleWidth, " Double largeur"),
            (CharacterSize::DoubleSize, " Double taille"),
        ];
        for (size, label) in sizes {
            b.with_character_size(size, |b| {
                b.append_line(label);
                Ok(())
            })?;
            b.append_line("");
        }

        b.append_line("Entrée utilisateur : ");
        for line in &request.user_input {
            b.append_line(line);
        }
        Ok(())
    })?;

    Ok(ServiceResponse::new(HelloWorldState::IntroPage, content))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
