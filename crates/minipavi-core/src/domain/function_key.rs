//! Terminal function keys and the set of keys that submit an input zone.

use std::fmt;

use crate::domain::response::CommandError;

/// A function key on the terminal keyboard.
///
/// `Correction` and `Annulation` are handled by the gateway itself for line
/// editing.  They can arrive as request events but can never be requested as
/// submission keys, so they have no bit in a [`FunctionKeySet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FunctionKey {
    Envoi,
    Suite,
    Retour,
    Annulation,
    Correction,
    Guide,
    Repetition,
    Sommaire,
}

impl FunctionKey {
    /// The six keys a service may request, in bit order.
    pub const SUBMITTABLE: [FunctionKey; 6] = [
        FunctionKey::Sommaire,
        FunctionKey::Retour,
        FunctionKey::Repetition,
        FunctionKey::Guide,
        FunctionKey::Suite,
        FunctionKey::Envoi,
    ];

    /// Bit used for this key in the `validwith` mask, or `None` for the
    /// gateway-reserved editing keys.
    pub fn bit(self) -> Option<u8> {
        match self {
            FunctionKey::Sommaire => Some(1),
            FunctionKey::Retour => Some(4),
            FunctionKey::Repetition => Some(8),
            FunctionKey::Guide => Some(16),
            FunctionKey::Suite => Some(64),
            FunctionKey::Envoi => Some(128),
            FunctionKey::Correction | FunctionKey::Annulation => None,
        }
    }
}

impl fmt::Display for FunctionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FunctionKey::Envoi => "Envoi",
            FunctionKey::Suite => "Suite",
            FunctionKey::Retour => "Retour",
            FunctionKey::Annulation => "Annulation",
            FunctionKey::Correction => "Correction",
            FunctionKey::Guide => "Guide",
            FunctionKey::Repetition => "Repetition",
            FunctionKey::Sommaire => "Sommaire",
        };
        f.write_str(name)
    }
}

/// The set of function keys that validate an input zone.
///
/// Stored as the wire bitmask.  The constructor refuses `Correction` and
/// `Annulation`, so the reserved bits `2` and `32` can never be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctionKeySet(u8);

impl FunctionKeySet {
    /// Mask of every bit a set may contain.
    pub const VALID_BITS: u8 = 1 | 4 | 8 | 16 | 64 | 128;

    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Builds a set from any collection of keys.
    ///
    /// # Errors
    ///
    /// [`CommandError::UnsupportedFunctionKey`] if the collection contains
    /// `Correction` or `Annulation`.
    pub fn new(keys: impl IntoIterator<Item = FunctionKey>) -> Result<Self, CommandError> {
        let mut set = Self::empty();
        for key in keys {
            set.insert(key)?;
        }
        Ok(set)
    }

    /// Builds a set from a wire mask, keeping only the six defined bits.
    pub fn from_bits_truncate(bits: u32) -> Self {
        // Truncation to u8 is fine: every defined bit is below 256.
        Self((bits & u32::from(Self::VALID_BITS)) as u8)
    }

    /// The wire mask.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Adds `key` to the set.
    ///
    /// # Errors
    ///
    /// [`CommandError::UnsupportedFunctionKey`] for `Correction` or `Annulation`.
    pub fn insert(&mut self, key: FunctionKey) -> Result<(), CommandError> {
        let bit = key.bit().ok_or(CommandError::UnsupportedFunctionKey(key))?;
        self.0 |= bit;
        Ok(())
    }

    /// Returns `true` if `key` is in the set.
    pub fn contains(self, key: FunctionKey) -> bool {
        key.bit().is_some_and(|bit| self.0 & bit != 0)
    }

    /// Returns `true` if no key can submit the input.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of keys in the set.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates over the members in bit order.
    pub fn iter(self) -> impl Iterator<Item = FunctionKey> {
        FunctionKey::SUBMITTABLE
            .into_iter()
            .filter(move |key| self.contains(*key))
    }
}

impl Default for FunctionKeySet {
    /// `{Envoi}`: the usual way to validate an input.
    fn default() -> Self {
        Self(128)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
