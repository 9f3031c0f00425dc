//! The videotex document builder.
//!
//! [`VideotexBuilder`] owns a byte buffer and appends control codes and
//! transliterated text to it.  One builder produces one document: [`build`]
//! consumes it and hands back the finished bytes, so a buffer can never be
//! shared between two responses.
//!
//! # Scoped attributes
//!
//! The `with_*` methods open an attribute, run a nested block, then emit a
//! **fixed** reset code.  They do not remember what was active before the
//! scope opened.  Nesting a text colour inside a background colour therefore
//! leaves the background at its default once the inner block has finished
//! and the outer one closes; the enclosing setting is not restored.
//!
//! [`build`]: VideotexBuilder::build

use thiserror::Error;
use tracing::trace;

use crate::attributes::{CharacterSize, Color, CursorDirection, KeyboardCase};
use crate::charset::CharsetTable;
use crate::constants::{
    BACKGROUND_INVERTED, BACKGROUND_NORMAL, BLINK, CLEAR_SCREEN, CLEAR_TO_END_OF_LINE, CRLF,
    CURSOR_OFF, CURSOR_ON, G0, G1, LOCAL_ECHO_OFF, LOCAL_ECHO_ON, POSITION, POSITION_OFFSET,
    REPEAT, REPEAT_OFFSET, RESET_CHARSETS, SCROLL_OFF, SCROLL_ON, STEADY, TEXT_WHITE,
    UNDERLINE_START, UNDERLINE_STOP,
};

/// Errors raised by builder operations.
///
/// These indicate a defect in the calling service's display code (a cursor
/// position or repeat count computed out of range), never a runtime
/// condition.  Values are rejected, not clamped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VideotexError {
    /// A numeric argument is outside its accepted range.
    #[error("invalid argument: {name} = {value}, expected {min}..={max}")]
    InvalidArgument {
        name: &'static str,
        value: u8,
        min: u8,
        max: u8,
    },
}

/// Builds a document in one expression.
///
/// # Errors
///
/// Returns the first [`VideotexError`] raised inside `block`.
///
/// # Examples
///
/// ```rust
/// use videotex::{build_videotex, Color};
///
/// let bytes = build_videotex(|b| {
///     b.clear_screen();
///     b.move_cursor_to(1, 1)?;
///     b.with_text_color(Color::Red, |b| {
///         b.append("Bonjour");
///         Ok(())
///     })?;
///     Ok(())
/// })
/// .unwrap();
/// assert_eq!(bytes[0], 0x0C);
/// ```
pub fn build_videotex<F>(block: F) -> Result<Vec<u8>, VideotexError>
where
    F: FnOnce(&mut VideotexBuilder) -> Result<(), VideotexError>,
{
    let mut builder = VideotexBuilder::new();
    block(&mut builder)?;
    Ok(builder.build())
}

/// Accumulates the exact byte sequence of a videotex page.
#[derive(Debug, Default, Clone)]
pub struct VideotexBuilder {
    buf: Vec<u8>,
}

impl VideotexBuilder {
    /// Number of columns on screen.
    pub const SCREEN_WIDTH: u8 = 40;

    /// Number of lines on screen, status line (line 0) included.
    pub const SCREEN_HEIGHT: u8 = 25;

    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty builder with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// `true` if nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    // ── Text ──────────────────────────────────────────────────────────────────

    /// Appends text, transliterating characters outside ASCII.
    pub fn append(&mut self, text: &str) -> &mut Self {
        CharsetTable::encode_str(text, &mut self.buf);
        self
    }

    /// Appends a single character, transliterated like [`append`](Self::append).
    pub fn append_char(&mut self, c: char) -> &mut Self {
        CharsetTable::encode_char(c, &mut self.buf);
        self
    }

    /// Appends text followed by CR LF.  Pass `""` for an empty line.
    pub fn append_line(&mut self, text: &str) -> &mut Self {
        self.append(text);
        self.buf.extend_from_slice(&CRLF);
        self
    }

    /// Appends pre-encoded videotex bytes untouched.
    pub fn append_raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Emits `c` followed by a repeat instruction for `count` more copies.
    ///
    /// # Errors
    ///
    /// [`VideotexError::InvalidArgument`] if `count` is outside `1..=63`.
    pub fn repeat_char(&mut self, c: char, count: u8) -> Result<&mut Self, VideotexError> {
        check_range("count", count, 1, 63)?;
        self.append_char(c);
        self.push_repeat(count);
        Ok(self)
    }

    // ── Cursor ────────────────────────────────────────────────────────────────

    /// Moves the cursor to an absolute position.
    ///
    /// `col` is `1..=40`; `line` is `0..=24`, line 0 being the status line.
    /// Emits exactly `[0x1F, 0x40 + line, 0x40 + col]`.
    ///
    /// # Errors
    ///
    /// [`VideotexError::InvalidArgument`] if either coordinate is out of range.
    pub fn move_cursor_to(&mut self, col: u8, line: u8) -> Result<&mut Self, VideotexError> {
        check_range("col", col, 1, Self::SCREEN_WIDTH)?;
        check_range("line", line, 0, Self::SCREEN_HEIGHT - 1)?;
        self.push_position(col, line);
        Ok(self)
    }

    /// Moves the cursor one step in `direction`.
    pub fn move_cursor_relative(&mut self, direction: CursorDirection) -> &mut Self {
        self.buf.push(direction.code());
        self
    }

    /// Shows or hides the cursor.
    pub fn show_cursor(&mut self, visible: bool) -> &mut Self {
        self.buf.push(if visible { CURSOR_ON } else { CURSOR_OFF });
        self
    }

    // ── Clearing ──────────────────────────────────────────────────────────────

    /// Clears the screen; the status line is left alone.
    pub fn clear_screen(&mut self) -> &mut Self {
        self.buf.push(CLEAR_SCREEN);
        self
    }

    /// Blanks the status line (line 0) and leaves the cursor at (1, 1).
    pub fn clear_status_line(&mut self) -> &mut Self {
        self.push_position(1, 0);
        self.append_char(' ');
        self.push_repeat(Self::SCREEN_WIDTH - 1);
        self.push_position(1, 1);
        self
    }

    /// Clears from the cursor to the end of the line.
    pub fn clear_to_end_of_line(&mut self) -> &mut Self {
        self.buf.push(CLEAR_TO_END_OF_LINE);
        self
    }

    /// Clears the screen and status line, then hides the cursor.
    pub fn clear_all(&mut self) -> &mut Self {
        self.clear_screen();
        self.clear_status_line();
        self.show_cursor(false)
    }

    /// Re-designates the standard character sets.
    pub fn reset_character_sets(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&RESET_CHARSETS);
        self
    }

    // ── Terminal modes ────────────────────────────────────────────────────────

    /// Enables or disables local echo on the terminal.
    pub fn set_local_echo(&mut self, enabled: bool) -> &mut Self {
        let code: &[u8] = if enabled { &LOCAL_ECHO_ON } else { &LOCAL_ECHO_OFF };
        self.buf.extend_from_slice(code);
        self
    }

    /// Switches the terminal keyboard to upper or lower case.
    pub fn set_keyboard_case(&mut self, case: KeyboardCase) -> &mut Self {
        self.buf.extend_from_slice(&case.code());
        self
    }

    // ── Scoped attributes ─────────────────────────────────────────────────────

    /// Text colour for the block; white afterwards.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by `block`.
    pub fn with_text_color<F>(&mut self, color: Color, block: F) -> Result<&mut Self, VideotexError>
    where
        F: FnOnce(&mut Self) -> Result<(), VideotexError>,
    {
        self.scoped(&color.text_code(), &TEXT_WHITE, block)
    }

    /// Background colour for the block; normal background afterwards.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by `block`.
    pub fn with_background_color<F>(
        &mut self,
        color: Color,
        block: F,
    ) -> Result<&mut Self, VideotexError>
    where
        F: FnOnce(&mut Self) -> Result<(), VideotexError>,
    {
        self.scoped(&color.background_code(), &BACKGROUND_NORMAL, block)
    }

    /// Blinking text for the block.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by `block`.
    pub fn with_blink<F>(&mut self, block: F) -> Result<&mut Self, VideotexError>
    where
        F: FnOnce(&mut Self) -> Result<(), VideotexError>,
    {
        self.scoped(&BLINK, &STEADY, block)
    }

    /// Underlined text for the block.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by `block`.
    pub fn with_underline<F>(&mut self, block: F) -> Result<&mut Self, VideotexError>
    where
        F: FnOnce(&mut Self) -> Result<(), VideotexError>,
    {
        self.scoped(&UNDERLINE_START, &UNDERLINE_STOP, block)
    }

    /// Scroll ("rouleau") mode for the block.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by `block`.
    pub fn with_scroll_mode<F>(&mut self, block: F) -> Result<&mut Self, VideotexError>
    where
        F: FnOnce(&mut Self) -> Result<(), VideotexError>,
    {
        self.scoped(&SCROLL_ON, &SCROLL_OFF, block)
    }

    /// Inverted background for the block.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by `block`.
    pub fn with_inverted_background<F>(&mut self, block: F) -> Result<&mut Self, VideotexError>
    where
        F: FnOnce(&mut Self) -> Result<(), VideotexError>,
    {
        self.scoped(&BACKGROUND_INVERTED, &BACKGROUND_NORMAL, block)
    }

    /// Character size for the block; normal size afterwards.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by `block`.
    pub fn with_character_size<F>(
        &mut self,
        size: CharacterSize,
        block: F,
    ) -> Result<&mut Self, VideotexError>
    where
        F: FnOnce(&mut Self) -> Result<(), VideotexError>,
    {
        self.scoped(&size.code(), &CharacterSize::Normal.code(), block)
    }

    /// Mosaic (G1 semi-graphic) character set for the block.
    ///
    /// Each mosaic glyph is a 2x3 grid of blocks; bytes `0x20..=0x7F` select
    /// which of the six blocks are lit.  Use [`append_raw`](Self::append_raw)
    /// inside the block to write them.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by `block`.
    pub fn with_mosaic_charset<F>(&mut self, block: F) -> Result<&mut Self, VideotexError>
    where
        F: FnOnce(&mut Self) -> Result<(), VideotexError>,
    {
        self.scoped(&[G1], &[G0], block)
    }

    // ── Finalisation ──────────────────────────────────────────────────────────

    /// Returns the finished document.
    pub fn build(self) -> Vec<u8> {
        trace!(len = self.buf.len(), "videotex document built");
        self.buf
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn scoped<F>(&mut self, open: &[u8], close: &[u8], block: F) -> Result<&mut Self, VideotexError>
    where
        F: FnOnce(&mut Self) -> Result<(), VideotexError>,
    {
        self.buf.extend_from_slice(open);
        block(self)?;
        self.buf.extend_from_slice(close);
        Ok(self)
    }

    /// Position bytes without range checks; callers pass known-good values.
    fn push_position(&mut self, col: u8, line: u8) {
        self.buf
            .extend_from_slice(&[POSITION, POSITION_OFFSET + line, POSITION_OFFSET + col]);
    }

    fn push_repeat(&mut self, count: u8) {
        self.buf.extend_from_slice(&[REPEAT, REPEAT_OFFSET + count]);
    }
}

fn check_range(name: &'static str, value: u8, min: u8, max: u8) -> Result<(), VideotexError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(VideotexError::InvalidArgument {
            name,
            value,
            min,
            max,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ESC;

    #[test]
    fn test_new_builder_is_empty() {
        let builder = VideotexBuilder::new();
        assert!(builder.is_empty());
        assert!(builder.build().is_empty());
    }

    #[test]
    fn test_move_cursor_to_emits_three_bytes() {
        // Arrange
        let mut builder = VideotexBuilder::new();

        // Act
        builder.move_cursor_to(2, 20).unwrap();

        // Assert
        assert_eq!(builder.build(), vec![0x1F, 0x40 + 20, 0x40 + 2]);
    }

    #[test]
    fn test_move_cursor_to_accepts_every_valid_position() {
        for line in 0..=24u8 {
            for col in 1..=40u8 {
                let mut builder = VideotexBuilder::new();
                builder.move_cursor_to(col, line).unwrap();
                assert_eq!(builder.build(), vec![0x1F, 0x40 + line, 0x40 + col]);
            }
        }
    }

    #[test]
    fn test_move_cursor_to_rejects_column_zero() {
        let mut builder = VideotexBuilder::new();
        let err = builder.move_cursor_to(0, 1).unwrap_err();
        assert_eq!(
            err,
            VideotexError::InvalidArgument {
                name: "col",
                value: 0,
                min: 1,
                max: 40
            }
        );
    }

    #[test]
    fn test_move_cursor_to_rejects_column_41_and_line_25() {
        let mut builder = VideotexBuilder::new();
        assert!(builder.move_cursor_to(41, 1).is_err());
        assert!(builder.move_cursor_to(1, 25).is_err());
        // Nothing is written for a rejected call.
        assert!(builder.is_empty());
    }

    #[test]
    fn test_repeat_char_emits_char_then_repeat_control() {
        let mut builder = VideotexBuilder::new();
        builder.repeat_char('-', 10).unwrap();
        assert_eq!(builder.build(), vec![b'-', 0x12, 0x3F + 10]);
    }

    #[test]
    fn test_repeat_char_bounds() {
        let mut builder = VideotexBuilder::new();
        assert!(builder.repeat_char('x', 0).is_err());
        assert!(builder.repeat_char('x', 64).is_err());
        assert!(builder.repeat_char('x', 1).is_ok());
        assert!(builder.repeat_char('x', 63).is_ok());
        assert_eq!(builder.build(), vec![b'x', 0x12, 0x40, b'x', 0x12, 0x7E]);
    }

    #[test]
    fn test_append_line_ends_with_crlf() {
        let mut builder = VideotexBuilder::new();
        builder.append_line("ok").append_line("");
        assert_eq!(builder.build(), vec![b'o', b'k', 0x0D, 0x0A, 0x0D, 0x0A]);
    }

    #[test]
    fn test_append_raw_is_not_transliterated() {
        let mut builder = VideotexBuilder::new();
        builder.append_raw("é".as_bytes());
        assert_eq!(builder.build(), "é".as_bytes());
    }

    #[test]
    fn test_clear_status_line_blanks_forty_columns() {
        let mut builder = VideotexBuilder::new();
        builder.clear_status_line();
        assert_eq!(
            builder.build(),
            vec![0x1F, 0x40, 0x41, b' ', 0x12, 0x3F + 39, 0x1F, 0x41, 0x41]
        );
    }

    #[test]
    fn test_clear_all_ends_with_cursor_off() {
        let mut builder = VideotexBuilder::new();
        builder.clear_all();
        let bytes = builder.build();
        assert_eq!(bytes.first(), Some(&0x0C));
        assert_eq!(bytes.last(), Some(&0x14));
    }

    #[test]
    fn test_text_color_scope_resets_to_white() {
        let bytes = build_videotex(|b| {
            b.with_text_color(Color::Red, |b| {
                b.append("A");
                Ok(())
            })?;
            Ok(())
        })
        .unwrap();
        assert_eq!(bytes, vec![ESC, 0x41, b'A', ESC, 0x47]);
    }

    #[test]
    fn test_nested_scopes_reset_to_defaults_not_enclosing_values() {
        // Arrange / Act: red text inside a blue background
        let bytes = build_videotex(|b| {
            b.with_background_color(Color::Blue, |b| {
                b.with_text_color(Color::Red, |b| {
                    b.append("x");
                    Ok(())
                })?;
                b.append("y");
                Ok(())
            })?;
            Ok(())
        })
        .unwrap();

        // Assert: inner scope closes with white text, outer with normal background
        assert_eq!(
            bytes,
            vec![ESC, 0x54, ESC, 0x41, b'x', ESC, 0x47, b'y', ESC, 0x5C]
        );
    }

    #[test]
    fn test_same_kind_nesting_does_not_restore_outer_color() {
        let bytes = build_videotex(|b| {
            b.with_text_color(Color::Green, |b| {
                b.with_text_color(Color::Red, |b| {
                    b.append("r");
                    Ok(())
                })?;
                b.append("g?");
                Ok(())
            })?;
            Ok(())
        })
        .unwrap();
        // After the inner scope the text is white, not green.
        let white_pos = bytes.windows(2).position(|w| w == [ESC, 0x47]).unwrap();
        assert_eq!(&bytes[white_pos + 2..white_pos + 4], b"g?");
    }

    #[test]
    fn test_scope_error_propagates_and_skips_reset() {
        let mut builder = VideotexBuilder::new();
        let result = builder.with_blink(|b| {
            b.move_cursor_to(99, 1)?;
            Ok(())
        });
        assert!(result.is_err());
        assert_eq!(builder.build(), BLINK.to_vec());
    }

    #[test]
    fn test_each_scope_uses_its_reset_code() {
        let ok = |_: &mut VideotexBuilder| -> Result<(), VideotexError> { Ok(()) };
        let mut b = VideotexBuilder::new();
        b.with_blink(ok).unwrap();
        b.with_underline(ok).unwrap();
        b.with_scroll_mode(ok).unwrap();
        b.with_inverted_background(ok).unwrap();
        b.with_character_size(CharacterSize::DoubleSize, ok).unwrap();
        b.with_mosaic_charset(ok).unwrap();
        let expected: Vec<u8> = [
            &BLINK[..],
            &STEADY,
            &UNDERLINE_START,
            &UNDERLINE_STOP,
            &SCROLL_ON,
            &SCROLL_OFF,
            &BACKGROUND_INVERTED,
            &BACKGROUND_NORMAL,
            &[ESC, 0x4F],
            &[ESC, 0x4C],
            &[G1],
            &[G0],
        ]
        .concat();
        assert_eq!(b.build(), expected);
    }

    #[test]
    fn test_show_cursor_and_local_echo_toggle() {
        let mut b = VideotexBuilder::new();
        b.show_cursor(true).show_cursor(false);
        b.set_local_echo(true).set_local_echo(false);
        let expected: Vec<u8> = [
            &[CURSOR_ON, CURSOR_OFF][..],
            &LOCAL_ECHO_ON,
            &LOCAL_ECHO_OFF,
        ]
        .concat();
        assert_eq!(b.build(), expected);
    }

    #[test]
    fn test_move_cursor_relative_and_clear_to_end_of_line() {
        let mut b = VideotexBuilder::new();
        b.move_cursor_relative(CursorDirection::Up)
            .move_cursor_relative(CursorDirection::LineStart)
            .clear_to_end_of_line();
        assert_eq!(b.build(), vec![0x0B, 0x0D, 0x18]);
    }

    #[test]
    fn test_reset_character_sets_sequence() {
        let mut b = VideotexBuilder::new();
        b.reset_character_sets();
        assert_eq!(b.build(), vec![0x1B, 0x28, 0x40, 0x1B, 0x29, 0x63]);
    }

    #[test]
    fn test_error_message_names_the_argument() {
        let err = VideotexBuilder::new().repeat_char('a', 70).unwrap_err();
        assert_eq!(err.to_string(), "invalid argument: count = 70, expected 1..=63");
    }
}
