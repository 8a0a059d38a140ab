use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Semantic kind of a closed subject token.
///
/// Every kind owns one nibble value; the signature is built by shifting
/// these nibbles in token order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TokenKind {
    /// No token yet. Only ever seen as the zero nibble of a short signature.
    Unset = 0x0,
    /// A structural separator run between tokens (diagnostics only).
    Separator = 0x1,
    /// Reserved nibble for raw unquoted text; plain runs classify as `String`.
    Unquoted = 0x2,
    /// Double-quoted payload, usually the filename.
    Quoted = 0x3,
    /// Zero-length token: `""` or `[]`.
    Empty = 0x4,
    /// Any text that is not a keyword or a number.
    String = 0x5,
    /// All-digit token.
    Number = 0x6,
    /// The `WtFnZb` poster marker.
    WtFnZb = 0x7,
    /// The `PRiVATE` marker.
    Private = 0x8,
    /// `PRiVATE` immediately followed by `WtFnZb`, folded into one marker.
    PrivWtf = 0x9,
    /// The `N3wZ` indexer marker.
    N3wZ = 0xa,
    /// The `newzNZB` indexer marker.
    NewzNzb = 0xb,
    /// The `FULL` marker.
    Full = 0xc,
    /// The `yEnc` encoding marker.
    YEnc = 0xd,
    /// Two digit runs joined by a single `/`, e.g. `01/57`.
    Fraction = 0xe,
    /// The word `of`, as in `3 of 12`.
    Of = 0xf,
}

impl TokenKind {
    /// Every kind, ordered by nibble value.
    pub const ALL: [TokenKind; 16] = [
        TokenKind::Unset,
        TokenKind::Separator,
        TokenKind::Unquoted,
        TokenKind::Quoted,
        TokenKind::Empty,
        TokenKind::String,
        TokenKind::Number,
        TokenKind::WtFnZb,
        TokenKind::Private,
        TokenKind::PrivWtf,
        TokenKind::N3wZ,
        TokenKind::NewzNzb,
        TokenKind::Full,
        TokenKind::YEnc,
        TokenKind::Fraction,
        TokenKind::Of,
    ];

    /// The 4-bit value this kind contributes to a signature.
    #[must_use]
    pub const fn nibble(self) -> u8 {
        self as u8
    }

    /// Maps the low 4 bits of `nibble` back to a kind.
    #[must_use]
    pub const fn from_nibble(nibble: u8) -> Self {
        Self::ALL[(nibble & 0x0f) as usize]
    }

    /// Human readable name, as printed in token dumps.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Separator => "separator",
            Self::Unquoted => "unquoted",
            Self::Quoted => "quoted",
            Self::Empty => "empty",
            Self::String => "string",
            Self::Number => "number",
            Self::WtFnZb => "WtFnZb",
            Self::Private => "PRiVATE",
            Self::PrivWtf => "PRiV-WtF",
            Self::N3wZ => "N3wZ",
            Self::NewzNzb => "newzNZB",
            Self::Full => "FULL",
            Self::YEnc => "yEnc",
            Self::Fraction => "fraction",
            Self::Of => "of",
        }
    }

    /// Returns `true` for the literal marker kinds recognized by hash.
    #[must_use]
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::WtFnZb
                | Self::Private
                | Self::PrivWtf
                | Self::N3wZ
                | Self::NewzNzb
                | Self::Full
                | Self::YEnc
                | Self::Of
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What opened a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opener {
    /// A plain unbracketed run at nesting level 0.
    Plain,
    /// `[` ... `]`
    Bracket,
    /// `(` ... `)`
    Paren,
    /// `"` ... `"`
    Quote,
}

/// Numeric payload of `Number` and `Fraction` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericValue {
    /// Value of an all-digit token.
    Number(u64),
    /// Value of a `numerator/denominator` token.
    Fraction {
        /// Digits before the slash.
        numerator: u64,
        /// Digits after the slash.
        denominator: u64,
    },
}

impl NumericValue {
    /// The value read as an index: the number itself, or the numerator.
    #[must_use]
    pub fn as_index(self) -> u64 {
        match self {
            Self::Number(n) => n,
            Self::Fraction { numerator, .. } => numerator,
        }
    }

    /// The value read as a total: the number itself, or the denominator.
    #[must_use]
    pub fn as_total(self) -> u64 {
        match self {
            Self::Number(n) => n,
            Self::Fraction { denominator, .. } => denominator,
        }
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Fraction {
                numerator,
                denominator,
            } => write!(f, "{numerator}/{denominator}"),
        }
    }
}

/// A closed token of a subject line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Classified kind.
    pub kind: TokenKind,
    /// How the token was opened.
    pub opener: Opener,
    /// Start byte offset in the preprocessed subject.
    pub start: usize,
    /// End byte offset (exclusive) in the preprocessed subject.
    pub end: usize,
    /// Token content, verbatim.
    pub text: String,
    /// Parsed value for `Number` and `Fraction` tokens.
    pub value: Option<NumericValue>,
}

impl Token {
    /// Byte range of the token content.
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Returns `true` if the token has no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, "{}({value})", self.kind),
            None => write!(f, "{}({:?})", self.kind, self.text),
        }
    }
}
