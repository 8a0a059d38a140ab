//! Token classification on close.
//!
//! Markers are matched by rolling hash, then confirmed byte for byte so a
//! hash collision can never masquerade as a marker. Remaining content is
//! tried as a number or a fraction before falling back to a string.

use super::hash::rolling_hash;
use crate::types::{NumericValue, Opener, TokenKind};

/// A marker literal with its precomputed hash.
#[derive(Debug, Clone, Copy)]
pub struct Keyword {
    /// Rolling hash of `literal`.
    pub hash: u64,
    /// Exact spelling.
    pub literal: &'static [u8],
    /// Kind assigned on a match.
    pub kind: TokenKind,
}

impl Keyword {
    const fn new(literal: &'static [u8], kind: TokenKind) -> Self {
        Self {
            hash: rolling_hash(literal),
            literal,
            kind,
        }
    }
}

/// Marker vocabulary.
pub const KEYWORDS: [Keyword; 7] = [
    Keyword::new(b"WtFnZb", TokenKind::WtFnZb),
    Keyword::new(b"PRiVATE", TokenKind::Private),
    Keyword::new(b"N3wZ", TokenKind::N3wZ),
    Keyword::new(b"newzNZB", TokenKind::NewzNzb),
    Keyword::new(b"FULL", TokenKind::Full),
    Keyword::new(b"yEnc", TokenKind::YEnc),
    Keyword::new(b"of", TokenKind::Of),
];

/// Looks up a marker by hash, confirming against the literal bytes.
#[must_use]
pub fn keyword(hash: u64, content: &[u8]) -> Option<TokenKind> {
    KEYWORDS
        .iter()
        .find(|keyword| keyword.hash == hash && keyword.literal == content)
        .map(|keyword| keyword.kind)
}

/// Classifies a closed token.
///
/// `hash` must be the rolling hash of `content`. Quoted content is payload
/// and is never read as a marker or a number.
#[must_use]
pub fn classify_token(
    content: &[u8],
    hash: u64,
    opener: Opener,
) -> (TokenKind, Option<NumericValue>) {
    if content.is_empty() {
        return (TokenKind::Empty, None);
    }
    if opener == Opener::Quote {
        return (TokenKind::Quoted, None);
    }
    if let Some(kind) = keyword(hash, content) {
        return (kind, None);
    }
    if let Some(value) = parse_numeric(content) {
        let kind = match value {
            NumericValue::Number(_) => TokenKind::Number,
            NumericValue::Fraction { .. } => TokenKind::Fraction,
        };
        return (kind, Some(value));
    }
    (TokenKind::String, None)
}

/// Parses `digits` or `digits/digits`. Anything else, overflow included, is `None`.
#[must_use]
pub fn parse_numeric(content: &[u8]) -> Option<NumericValue> {
    match content.iter().position(|&b| b == b'/') {
        None => parse_digits(content).map(NumericValue::Number),
        Some(slash) => {
            let numerator = parse_digits(&content[..slash])?;
            let denominator = parse_digits(&content[slash + 1..])?;
            Some(NumericValue::Fraction {
                numerator,
                denominator,
            })
        }
    }
}

fn parse_digits(digits: &[u8]) -> Option<u64> {
    if digits.is_empty() {
        return None;
    }
    digits.iter().try_fold(0u64, |acc, &b| {
        if !b.is_ascii_digit() {
            return None;
        }
        acc.checked_mul(10)?.checked_add(u64::from(b - b'0'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(content: &str, opener: Opener) -> (TokenKind, Option<NumericValue>) {
        classify_token(content.as_bytes(), rolling_hash(content.as_bytes()), opener)
    }

    #[test]
    fn keyword_hashes_are_distinct() {
        for (i, a) in KEYWORDS.iter().enumerate() {
            for b in &KEYWORDS[i + 1..] {
                assert_ne!(a.hash, b.hash, "{:?} collides with {:?}", a.kind, b.kind);
            }
        }
    }

    #[test]
    fn markers() {
        assert_eq!(classify("PRiVATE", Opener::Bracket).0, TokenKind::Private);
        assert_eq!(classify("WtFnZb", Opener::Bracket).0, TokenKind::WtFnZb);
        assert_eq!(classify("N3wZ", Opener::Bracket).0, TokenKind::N3wZ);
        assert_eq!(classify("newzNZB", Opener::Plain).0, TokenKind::NewzNzb);
        assert_eq!(classify("FULL", Opener::Bracket).0, TokenKind::Full);
        assert_eq!(classify("yEnc", Opener::Plain).0, TokenKind::YEnc);
        assert_eq!(classify("of", Opener::Plain).0, TokenKind::Of);
    }

    #[test]
    fn markers_are_case_sensitive() {
        assert_eq!(classify("private", Opener::Bracket).0, TokenKind::String);
        assert_eq!(classify("full", Opener::Bracket).0, TokenKind::String);
    }

    #[test]
    fn hash_match_without_literal_match_is_rejected() {
        let forged = KEYWORDS[0].hash;
        assert_eq!(keyword(forged, b"WtFnZb"), Some(TokenKind::WtFnZb));
        assert_eq!(keyword(forged, b"something else"), None);
    }

    #[test]
    fn numbers() {
        assert_eq!(
            classify("145943", Opener::Bracket),
            (TokenKind::Number, Some(NumericValue::Number(145_943)))
        );
        assert_eq!(
            classify("01/57", Opener::Bracket),
            (
                TokenKind::Fraction,
                Some(NumericValue::Fraction {
                    numerator: 1,
                    denominator: 57
                })
            )
        );
    }

    #[test]
    fn partial_numbers_downgrade_to_string() {
        for text in ["3/WtF[nZb].nfo", "1/", "/7", "1/2/3", "12a", "99999999999999999999999"] {
            assert_eq!(classify(text, Opener::Bracket), (TokenKind::String, None), "{text}");
        }
    }

    #[test]
    fn quoted_content_is_payload() {
        assert_eq!(classify("yEnc", Opener::Quote).0, TokenKind::Quoted);
        assert_eq!(classify("12", Opener::Quote), (TokenKind::Quoted, None));
    }

    #[test]
    fn empty_content() {
        assert_eq!(classify("", Opener::Quote).0, TokenKind::Empty);
        assert_eq!(classify("", Opener::Bracket).0, TokenKind::Empty);
    }
}
