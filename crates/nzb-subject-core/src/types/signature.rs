use std::fmt;

use serde::{Deserialize, Serialize};

use super::token::TokenKind;

/// Bounded fingerprint of a subject's shape.
///
/// Sixteen nibble slots; the low nibble is the most recently closed token.
/// Subjects with more than sixteen tokens only keep the last sixteen kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature(pub u64);

impl Signature {
    /// Signature of a subject with no tokens.
    pub const EMPTY: Signature = Signature(0);

    /// Number of nibble slots.
    pub const SLOTS: usize = 16;

    /// Builds a signature from kinds in token order.
    ///
    /// No collapse rule is applied; this is a plain shift of each nibble.
    #[must_use]
    pub const fn from_kinds(kinds: &[TokenKind]) -> Self {
        let mut value = 0u64;
        let mut i = 0;
        while i < kinds.len() {
            value = (value << 4) | kinds[i].nibble() as u64;
            i += 1;
        }
        Signature(value)
    }

    /// Raw 64-bit value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Shifts `kind` into the low nibble; the oldest nibble falls off the top.
    #[must_use]
    pub const fn push(self, kind: TokenKind) -> Self {
        Signature((self.0 << 4) | kind.nibble() as u64)
    }

    /// Overwrites the low nibble with `kind`.
    #[must_use]
    pub const fn replace_last(self, kind: TokenKind) -> Self {
        Signature((self.0 & !0x0f) | kind.nibble() as u64)
    }

    /// Kind held by the low nibble.
    #[must_use]
    pub const fn last(self) -> TokenKind {
        TokenKind::from_nibble((self.0 & 0x0f) as u8)
    }

    /// Number of significant nibbles (leading `Unset` slots excluded).
    #[must_use]
    pub const fn len(self) -> usize {
        Self::SLOTS - (self.0.leading_zeros() as usize / 4)
    }

    /// Returns `true` if no token was recorded.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Significant kinds, oldest first.
    pub fn kinds(self) -> impl Iterator<Item = TokenKind> {
        let len = self.len();
        (0..len)
            .rev()
            .map(move |slot| TokenKind::from_nibble((self.0 >> (slot * 4)) as u8))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::LowerHex for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}
