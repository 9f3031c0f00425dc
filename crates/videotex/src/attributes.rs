//! Attribute enums used by the builder: colours, sizes, cursor directions.

use crate::constants::{
    BACKGROUND_COLOR_BASE, CR, DOWN, ESC, KEYBOARD_LOWER, KEYBOARD_UPPER, LEFT, RIGHT,
    SIZE_DOUBLE, SIZE_DOUBLE_HEIGHT, SIZE_DOUBLE_WIDTH, SIZE_NORMAL, TEXT_COLOR_BASE, UP,
};

// ── Colours ───────────────────────────────────────────────────────────────────

/// The eight colours of a videotex terminal.
///
/// Monochrome terminals render them as grey levels.  The discriminant is the
/// offset from the black code in both the text and background ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
}

impl Color {
    /// All colours, in code order.
    pub const ALL: [Color; 8] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::White,
    ];

    /// Escape sequence selecting this colour for text.
    pub fn text_code(self) -> [u8; 2] {
        [ESC, TEXT_COLOR_BASE + self as u8]
    }

    /// Escape sequence selecting this colour for the background.
    pub fn background_code(self) -> [u8; 2] {
        [ESC, BACKGROUND_COLOR_BASE + self as u8]
    }

    /// Human-readable name, handy for sample pages.
    pub fn name(self) -> &'static str {
        match self {
            Color::Black => "Black",
            Color::Red => "Red",
            Color::Green => "Green",
            Color::Yellow => "Yellow",
            Color::Blue => "Blue",
            Color::Magenta => "Magenta",
            Color::Cyan => "Cyan",
            Color::White => "White",
        }
    }
}

// ── Character size ────────────────────────────────────────────────────────────

/// Glyph size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterSize {
    Normal,
    DoubleHeight,
    DoubleWidth,
    /// Double height and double width.
    DoubleSize,
}

impl CharacterSize {
    /// Escape sequence selecting this size.
    pub fn code(self) -> [u8; 2] {
        match self {
            CharacterSize::Normal => SIZE_NORMAL,
            CharacterSize::DoubleHeight => SIZE_DOUBLE_HEIGHT,
            CharacterSize::DoubleWidth => SIZE_DOUBLE_WIDTH,
            CharacterSize::DoubleSize => SIZE_DOUBLE,
        }
    }
}

// ── Cursor direction ──────────────────────────────────────────────────────────

/// Relative cursor movement, one cell at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorDirection {
    Left,
    Right,
    Down,
    Up,
    /// Back to column 1 of the current line.
    LineStart,
}

impl CursorDirection {
    /// The single control byte for this movement.
    pub fn code(self) -> u8 {
        match self {
            CursorDirection::Left => LEFT,
            CursorDirection::Right => RIGHT,
            CursorDirection::Down => DOWN,
            CursorDirection::Up => UP,
            CursorDirection::LineStart => CR,
        }
    }
}

// ── Keyboard case ─────────────────────────────────────────────────────────────

/// Case the terminal keyboard produces by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyboardCase {
    Upper,
    Lower,
}

impl KeyboardCase {
    /// Protocol sequence switching the keyboard to this case.
    pub fn code(self) -> [u8; 4] {
        match self {
            KeyboardCase::Upper => KEYBOARD_UPPER,
            KeyboardCase::Lower => KEYBOARD_LOWER,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
