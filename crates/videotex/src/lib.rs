//! # videotex
//!
//! Byte-level encoder for pages displayed on videotex (Minitel-class)
//! terminals.
//!
//! # Overview (for beginners)
//!
//! A videotex page is not a file format; it is the literal sequence of bytes
//! the terminal will interpret as it receives them.  This crate builds that
//! sequence:
//!
//! - **`constants`** – The control bytes and escape sequences themselves.
//!
//! - **`attributes`** – Typed wrappers (colour, character size, cursor
//!   direction, keyboard case) so callers never write a raw escape by hand.
//!
//! - **`charset`** – Translates Unicode text to the terminal's 7-bit sets,
//!   using the supplementary G2 set for French accents and falling back to
//!   plain ASCII for everything else.
//!
//! - **`builder`** – [`VideotexBuilder`], an append-only document builder with
//!   scoped attributes (`with_text_color`, `with_blink`, ...).
//!
//! The crate has no I/O and no async code.  A finished document is a
//! `Vec<u8>` that the gateway layer base64-encodes into its response.

pub mod attributes;
pub mod builder;
pub mod charset;
pub mod constants;

pub use attributes::{CharacterSize, Color, CursorDirection, KeyboardCase};
pub use builder::{build_videotex, VideotexBuilder, VideotexError};
pub use charset::CharsetTable;
