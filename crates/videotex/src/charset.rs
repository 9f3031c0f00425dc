//! Unicode to videotex character set translation.
//!
//! The terminal's base G0 set is plain 7-bit ASCII (with a few national
//! substitutions).  Accented letters and a handful of symbols live in the
//! supplementary **G2** set, reached with the single-shift byte `0x19`:
//!
//! | Glyph kind       | Bytes                         | Example         |
//! |------------------|-------------------------------|-----------------|
//! | Accented letter  | `0x19`, diacritic, base letter | `é` = `19 42 65` |
//! | Symbol/ligature  | `0x19`, symbol code            | `°` = `19 30`    |
//!
//! Diacritic codes: grave `0x41`, acute `0x42`, circumflex `0x43`,
//! diaeresis `0x48`, cedilla `0x4B`.
//!
//! Everything else outside ASCII goes through a best-effort fallback that
//! strips diacritics (`ñ` becomes `n`) or substitutes ASCII punctuation.  The
//! fallback is not visually faithful; these terminals cannot display
//! arbitrary Unicode.

use crate::constants::G2;

const GRAVE: u8 = 0x41;
const ACUTE: u8 = 0x42;
const CIRCUMFLEX: u8 = 0x43;
const DIAERESIS: u8 = 0x48;
const CEDILLA: u8 = 0x4B;

/// Glyph substituted when no sensible ASCII approximation exists.
pub const REPLACEMENT: u8 = b'?';

/// Static Unicode to videotex mapping.
///
/// A unit struct grouping the translation directions, in the same way a key
/// mapper groups its platform tables.
pub struct CharsetTable;

impl CharsetTable {
    /// Returns the exact G2 byte sequence for `c`, if the terminal has one.
    pub fn lookup(c: char) -> Option<&'static [u8]> {
        g2_sequence(c)
    }

    /// Appends the encoding of a single character to `out`.
    ///
    /// Order of preference: G2 table, unchanged ASCII, ASCII fallback.
    pub fn encode_char(c: char, out: &mut Vec<u8>) {
        if let Some(seq) = g2_sequence(c) {
            out.extend_from_slice(seq);
        } else if c.is_ascii() {
            out.push(c as u8);
        } else {
            out.extend_from_slice(ascii_fallback(c).as_bytes());
        }
    }

    /// Appends the encoding of every character of `text` to `out`.
    pub fn encode_str(text: &str, out: &mut Vec<u8>) {
        for c in text.chars() {
            Self::encode_char(c, out);
        }
    }
}

// ── G2 table ──────────────────────────────────────────────────────────────────

/// Exact G2 sequences.
///
/// `á` and `í` are composed with the acute accent like the other acute
/// vowels, rather than falling back to a bare `a` or `i`.
fn g2_sequence(c: char) -> Option<&'static [u8]> {
    let seq: &'static [u8] = match c {
        // Lower-case letters with a diacritic
        'à' => &[G2, GRAVE, b'a'],
        'á' => &[G2, ACUTE, b'a'],
        'â' => &[G2, CIRCUMFLEX, b'a'],
        'ä' => &[G2, DIAERESIS, b'a'],
        'è' => &[G2, GRAVE, b'e'],
        'é' => &[G2, ACUTE, b'e'],
        'ê' => &[G2, CIRCUMFLEX, b'e'],
        'ë' => &[G2, DIAERESIS, b'e'],
        'ì' => &[G2, GRAVE, b'i'],
        'í' => &[G2, ACUTE, b'i'],
        'î' => &[G2, CIRCUMFLEX, b'i'],
        'ï' => &[G2, DIAERESIS, b'i'],
        'ò' => &[G2, GRAVE, b'o'],
        'ó' => &[G2, ACUTE, b'o'],
        'ô' => &[G2, CIRCUMFLEX, b'o'],
        'ö' => &[G2, DIAERESIS, b'o'],
        'ù' => &[G2, GRAVE, b'u'],
        'ú' => &[G2, ACUTE, b'u'],
        'û' => &[G2, CIRCUMFLEX, b'u'],
        'ü' => &[G2, DIAERESIS, b'u'],
        'ç' => &[G2, CEDILLA, b'c'],

        // Upper-case letters the terminal composes legibly
        'À' => &[G2, GRAVE, b'A'],
        'Â' => &[G2, CIRCUMFLEX, b'A'],
        'È' => &[G2, GRAVE, b'E'],
        'É' => &[G2, ACUTE, b'E'],
        'Ê' => &[G2, CIRCUMFLEX, b'E'],
        'Ç' => &[G2, CEDILLA, b'C'],

        // Ligatures
        'Œ' => &[G2, 0x6A],
        'œ' => &[G2, 0x7A],
        'ß' | 'β' => &[G2, 0x7B],

        // Symbols
        '£' => &[G2, 0x23],
        '§' => &[G2, 0x27],
        '°' => &[G2, 0x30],
        '±' => &[G2, 0x31],
        '←' => &[G2, 0x2C],
        '↑' => &[G2, 0x2D],
        '→' => &[G2, 0x2E],
        '↓' => &[G2, 0x2F],
        '¼' => &[G2, 0x3C],
        '½' => &[G2, 0x3D],
        '¾' => &[G2, 0x3E],

        _ => return None,
    };
    Some(seq)
}

// ── ASCII fallback ────────────────────────────────────────────────────────────

/// Best-effort ASCII approximation for characters the terminal cannot show.
fn ascii_fallback(c: char) -> &'static str {
    match c {
        // Latin-1 supplement letters
        'Á' | 'Ã' | 'Ä' | 'Å' => "A",
        'Æ' => "AE",
        'Ë' => "E",
        'Ì' | 'Í' | 'Î' | 'Ï' => "I",
        'Ð' => "D",
        'Ñ' => "N",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' => "O",
        'Ù' | 'Ú' | 'Û' | 'Ü' => "U",
        'Ý' => "Y",
        'Þ' => "TH",
        'ã' | 'å' => "a",
        'æ' => "ae",
        'ð' => "d",
        'ñ' => "n",
        'õ' | 'ø' => "o",
        'ý' | 'ÿ' => "y",
        'þ' => "th",

        // Latin extended-A letters
        'Ā' | 'Ă' | 'Ą' => "A",
        'ā' | 'ă' | 'ą' => "a",
        'Ć' | 'Ĉ' | 'Ċ' | 'Č' => "C",
        'ć' | 'ĉ' | 'ċ' | 'č' => "c",
        'Ď' | 'Đ' => "D",
        'ď' | 'đ' => "d",
        'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' => "E",
        'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
        'Ĝ' | 'Ğ' | 'Ġ' | 'Ģ' => "G",
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => "g",
        'Ĥ' | 'Ħ' => "H",
        'ĥ' | 'ħ' => "h",
        'Ĩ' | 'Ī' | 'Ĭ' | 'Į' | 'İ' => "I",
        'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => "i",
        'Ĵ' => "J",
        'ĵ' => "j",
        'Ķ' => "K",
        'ķ' => "k",
        'Ĺ' | 'Ļ' | 'Ľ' | 'Ŀ' | 'Ł' => "L",
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => "l",
        'Ń' | 'Ņ' | 'Ň' => "N",
        'ń' | 'ņ' | 'ň' => "n",
        'Ō' | 'Ŏ' | 'Ő' => "O",
        'ō' | 'ŏ' | 'ő' => "o",
        'Ŕ' | 'Ŗ' | 'Ř' => "R",
        'ŕ' | 'ŗ' | 'ř' => "r",
        'Ś' | 'Ŝ' | 'Ş' | 'Š' => "S",
        'ś' | 'ŝ' | 'ş' | 'š' => "s",
        'Ţ' | 'Ť' | 'Ŧ' => "T",
        'ţ' | 'ť' | 'ŧ' => "t",
        'Ũ' | 'Ū' | 'Ŭ' | 'Ů' | 'Ű' | 'Ų' => "U",
        'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => "u",
        'Ŵ' => "W",
        'ŵ' => "w",
        'Ŷ' | 'Ÿ' => "Y",
        'ŷ' => "y",
        'Ź' | 'Ż' | 'Ž' => "Z",
        'ź' | 'ż' | 'ž' => "z",

        // Spacing and punctuation
        '\u{00A0}' | '\u{2007}' | '\u{202F}' => " ",
        '‘' | '’' | '‚' | '′' | '´' => "'",
        '“' | '”' | '„' | '«' | '»' | '″' => "\"",
        '‐' | '‑' | '‒' | '–' | '—' | '−' => "-",
        '…' => "...",
        '•' | '·' => ".",
        '¡' => "!",
        '¿' => "?",
        '×' => "x",
        '÷' => "/",

        // Currency and marks
        '€' => "EUR",
        '¢' => "c",
        '¥' => "Y",
        '©' => "(c)",
        '®' => "(R)",
        'µ' => "u",
        '¹' => "1",
        '²' => "2",
        '³' => "3",

        _ => "?",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
