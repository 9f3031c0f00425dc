//! Control bytes and escape sequences understood by videotex terminals.
//!
//! # How a terminal reads this stream (for beginners)
//!
//! A videotex terminal has no notion of "markup".  It receives a flat stream
//! of 7-bit bytes and interprets each one as it arrives:
//!
//! - `0x20..=0x7F` are printable glyphs from the active character set.
//! - `0x00..=0x1F` are single-byte control codes (move the cursor, clear the
//!   screen, switch character set, ...).
//! - `ESC` (`0x1B`) starts a multi-byte sequence that changes a display
//!   attribute (colour, size, blink) or a terminal mode.
//!
//! Attribute changes stay in effect until another code overrides them, which
//! is why every scoped builder operation emits a fixed "reset" code on exit.

/// Escape byte that introduces attribute and protocol sequences.
pub const ESC: u8 = 0x1B;

// ── Cursor movement ───────────────────────────────────────────────────────────

/// Cursor one column left.
pub const LEFT: u8 = 0x08;
/// Cursor one column right.
pub const RIGHT: u8 = 0x09;
/// Cursor one line down.
pub const DOWN: u8 = 0x0A;
/// Cursor one line up.
pub const UP: u8 = 0x0B;
/// Carriage return: cursor to the start of the current line.
pub const CR: u8 = 0x0D;
/// Carriage return followed by a line feed.
pub const CRLF: [u8; 2] = [CR, DOWN];

/// Absolute positioning: followed by `0x40 + line` then `0x40 + col`.
pub const POSITION: u8 = 0x1F;

/// Offset added to line and column numbers after [`POSITION`].
pub const POSITION_OFFSET: u8 = 0x40;

// ── Screen control ────────────────────────────────────────────────────────────

/// Clears the whole screen (status line excluded) and homes the cursor.
pub const CLEAR_SCREEN: u8 = 0x0C;
/// Clears from the cursor to the end of the current line.
pub const CLEAR_TO_END_OF_LINE: u8 = 0x18;

/// Makes the cursor visible.
pub const CURSOR_ON: u8 = 0x11;
/// Hides the cursor.
pub const CURSOR_OFF: u8 = 0x14;

/// Repeats the previous glyph: followed by `0x3F + count`.
pub const REPEAT: u8 = 0x12;

/// Offset added to the repeat count after [`REPEAT`].
pub const REPEAT_OFFSET: u8 = 0x3F;

// ── Character sets ────────────────────────────────────────────────────────────

/// Shift in: back to the alphanumeric G0 set.
pub const G0: u8 = 0x0F;
/// Shift out: to the semi-graphic (mosaic) G1 set.
pub const G1: u8 = 0x0E;
/// Single shift to the supplementary G2 set for the next glyph.
pub const G2: u8 = 0x19;

/// Re-designates the standard G0 and G1 sets (undoes any DRCS download).
pub const RESET_CHARSETS: [u8; 6] = [ESC, 0x28, 0x40, ESC, 0x29, 0x63];

// ── Display attributes ────────────────────────────────────────────────────────

/// First text colour code (black); colours follow in order.
pub const TEXT_COLOR_BASE: u8 = 0x40;
/// First background colour code (black); colours follow in order.
pub const BACKGROUND_COLOR_BASE: u8 = 0x50;

/// Text colour restored when a colour scope closes.
pub const TEXT_WHITE: [u8; 2] = [ESC, 0x47];

/// Start blinking.
pub const BLINK: [u8; 2] = [ESC, 0x48];
/// Stop blinking.
pub const STEADY: [u8; 2] = [ESC, 0x49];

/// Normal character size.
pub const SIZE_NORMAL: [u8; 2] = [ESC, 0x4C];
/// Double height.
pub const SIZE_DOUBLE_HEIGHT: [u8; 2] = [ESC, 0x4D];
/// Double width.
pub const SIZE_DOUBLE_WIDTH: [u8; 2] = [ESC, 0x4E];
/// Double height and double width.
pub const SIZE_DOUBLE: [u8; 2] = [ESC, 0x4F];

/// Stop underlining (also ends mosaic disjunction).
pub const UNDERLINE_STOP: [u8; 2] = [ESC, 0x59];
/// Start underlining.
pub const UNDERLINE_START: [u8; 2] = [ESC, 0x5A];

/// Normal background.
pub const BACKGROUND_NORMAL: [u8; 2] = [ESC, 0x5C];
/// Inverted background.
pub const BACKGROUND_INVERTED: [u8; 2] = [ESC, 0x5D];

// ── Protocol (PRO) sequences ──────────────────────────────────────────────────

/// Keyboard switched to lower case.
pub const KEYBOARD_LOWER: [u8; 4] = [ESC, 0x3A, 0x69, 0x45];
/// Keyboard switched to upper case.
pub const KEYBOARD_UPPER: [u8; 4] = [ESC, 0x3A, 0x6A, 0x45];

/// Local echo disabled.
pub const LOCAL_ECHO_OFF: [u8; 5] = [ESC, 0x3B, 0x60, 0x58, 0x51];
/// Local echo enabled.
pub const LOCAL_ECHO_ON: [u8; 5] = [ESC, 0x3B, 0x61, 0x58, 0x51];

/// Scroll ("rouleau") mode enabled.
pub const SCROLL_ON: [u8; 4] = [ESC, 0x3A, 0x69, 0x43];
/// Scroll mode disabled.
pub const SCROLL_OFF: [u8; 4] = [ESC, 0x3A, 0x6A, 0x43];
