//! # Shape Table
//!
//! Catalogue of known subject shapes. Each rule is keyed by an exact
//! signature and names the token slots holding the filename, the part
//! index and the part total. Slots count tokens from the left of the
//! signature window.
//!
//! Some posters put the part index in front of the filename inside one
//! bracket, as in `[3/name.nfo]`. Rules marked `index_prefixed`
//! split that prefix off the filename and report it as the index.
//!
//! Subjects whose signature is not listed here come back as
//! [`SubjectOutcome::Unmatched`] with every token, which is the expected
//! result for shapes nobody has catalogued yet.

use std::collections::HashMap;
use std::sync::LazyLock;

use tracing::debug;

use crate::types::TokenKind::{
    Empty, Fraction, Full, N3wZ, NewzNzb, Number, Of, PrivWtf, Private, Quoted, String as Text,
    WtFnZb,
};
use crate::types::{Extraction, Signature, SubjectOutcome, Token, TokenKind};

/// A catalogued subject shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeRule {
    /// Exact signature of the shape.
    pub signature: Signature,
    /// Slot of the filename token.
    pub filename: Option<usize>,
    /// Slot of the part index token.
    pub index: Option<usize>,
    /// Slot of the part total token.
    pub total: Option<usize>,
    /// The filename token may carry the index as a `<digits>/` prefix.
    pub index_prefixed: bool,
}

impl ShapeRule {
    const fn new(
        kinds: &[TokenKind],
        filename: Option<usize>,
        index: Option<usize>,
        total: Option<usize>,
    ) -> Self {
        Self {
            signature: Signature::from_kinds(kinds),
            filename,
            index,
            total,
            index_prefixed: false,
        }
    }

    /// Marks the filename slot as `<index>/<filename>`.
    #[must_use]
    pub const fn index_prefixed(mut self) -> Self {
        self.index_prefixed = true;
        self
    }

    /// Pulls the fields out of `tokens`, taking each value verbatim from its slot.
    ///
    /// `tokens` is the full token list; the signature window covers its tail.
    #[must_use]
    pub fn extract(&self, tokens: &[Token]) -> Extraction {
        let base = tokens.len().saturating_sub(self.signature.len());
        let slot = |slot: Option<usize>| slot.and_then(|s| tokens.get(base + s));

        let mut filename = slot(self.filename).map(|token| token.text.as_str());
        let mut index = slot(self.index)
            .and_then(|token| token.value)
            .map(|value| value.as_index());

        if self.index_prefixed {
            if let Some((prefix, rest)) = filename.and_then(split_index_prefix) {
                index = index.or(Some(prefix));
                filename = Some(rest);
            }
        }

        Extraction {
            signature: self.signature,
            filename: filename.map(str::to_owned),
            index,
            total: slot(self.total)
                .and_then(|token| token.value)
                .map(|value| value.as_total()),
        }
    }
}

/// Splits `12/name.ext` into `(12, "name.ext")`. The rest is kept verbatim.
fn split_index_prefix(text: &str) -> Option<(u64, &str)> {
    let (digits, rest) = text.split_once('/')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().map(|index| (index, rest))
}

/// Every catalogued shape.
pub const SHAPES: &[ShapeRule] = &[
    // "name.par2"
    ShapeRule::new(&[Quoted], Some(0), None, None),
    // "release" "name.par2"
    ShapeRule::new(&[Quoted, Quoted], Some(1), None, None),
    // [ release ] - "name.rar"
    ShapeRule::new(&[Text, Quoted], Some(1), None, None),
    // [01/57] - "name.par2"
    ShapeRule::new(&[Fraction, Quoted], Some(1), Some(0), Some(0)),
    // "name.rar" [1/5]
    ShapeRule::new(&[Quoted, Fraction], Some(0), Some(1), Some(1)),
    // hash [1/40] "name.par2"
    ShapeRule::new(&[Text, Fraction, Quoted], Some(2), Some(1), Some(1)),
    // [01/57] - [release] - "name.par2"
    ShapeRule::new(&[Fraction, Text, Quoted], Some(2), Some(0), Some(0)),
    // [123] [1/5] - "name.rar"
    ShapeRule::new(&[Number, Fraction, Quoted], Some(2), Some(1), Some(1)),
    // [group] release [1/5] - "name.rar"
    ShapeRule::new(&[Text, Text, Fraction, Quoted], Some(3), Some(2), Some(2)),
    // [123] [release] [1/5] - "name.rar"
    ShapeRule::new(&[Number, Text, Fraction, Quoted], Some(3), Some(2), Some(2)),
    // [a] [b] [c] [1/5] - "name.rar"
    ShapeRule::new(
        &[Text, Text, Text, Fraction, Quoted],
        Some(4),
        Some(3),
        Some(3),
    ),
    // [a] b [c] d [1/5] - "name.rar"
    ShapeRule::new(
        &[Text, Text, Text, Text, Fraction, Quoted],
        Some(5),
        Some(4),
        Some(4),
    ),
    // hash [123] release [group] [1/5] - "name.rar"
    ShapeRule::new(
        &[Text, Number, Text, Text, Fraction, Quoted],
        Some(5),
        Some(4),
        Some(4),
    ),
    // [PRiVATE]-[WtFnZb]-[4]-[3/name.nfo] - ""
    ShapeRule::new(&[PrivWtf, Number, Text, Empty], Some(2), None, Some(1)).index_prefixed(),
    // [PRiVATE]-[WtFnZb]-[name.mkv]-[1/7]
    ShapeRule::new(&[PrivWtf, Text, Fraction], Some(1), Some(2), Some(2)),
    // [PRiVATE]-[WtFnZb]-[name.mkv]-[1/7] - ""
    ShapeRule::new(&[PrivWtf, Text, Fraction, Empty], Some(1), Some(2), Some(2)),
    // [PRiVATE]-[WtFnZb]-[release]-[1/7] - "name.mkv"
    ShapeRule::new(&[PrivWtf, Text, Fraction, Quoted], Some(3), Some(2), Some(2)),
    // [PRiVATE] name.mkv [WtFnZb][1/5]
    ShapeRule::new(&[Private, Text, WtFnZb, Fraction], Some(1), Some(3), Some(3)),
    // [PRiVATE] name.mkv [newzNZB][1/5]
    ShapeRule::new(&[Private, Text, NewzNzb, Fraction], Some(1), Some(3), Some(3)),
    // [N3wZ] \id\:: "name.mkv"
    ShapeRule::new(&[N3wZ, Text, Quoted], Some(2), None, None),
    // [N3wZ] \id\:: [1/5] - "name.rar"
    ShapeRule::new(&[N3wZ, Text, Fraction, Quoted], Some(3), Some(2), Some(2)),
    // [N3wZ] \id\:: [release] [1/5] - "name.rar"
    ShapeRule::new(
        &[N3wZ, Text, Text, Fraction, Quoted],
        Some(4),
        Some(3),
        Some(3),
    ),
    // [N3wZ] \id\:: [a] [b] [c] [1/5] - "name.rar"
    ShapeRule::new(
        &[N3wZ, Text, Text, Text, Fraction, Quoted],
        Some(5),
        Some(4),
        Some(4),
    ),
    // [N3wZ] \id\:: [123] [release] [1/5] - "name.rar"
    ShapeRule::new(
        &[N3wZ, Text, Number, Text, Fraction, Quoted],
        Some(5),
        Some(4),
        Some(4),
    ),
    // [N3wZ] \id\::[PRiVATE]-[WtFnZb]-[4]-[1/name.mkv] - ""
    ShapeRule::new(
        &[N3wZ, Text, PrivWtf, Number, Text, Empty],
        Some(4),
        None,
        Some(3),
    )
    .index_prefixed(),
    // [N3wZ] \id\::[PRiVATE]-[WtFnZb]-[name.mkv]-[1/7]
    ShapeRule::new(
        &[N3wZ, Text, PrivWtf, Text, Fraction],
        Some(3),
        Some(4),
        Some(4),
    ),
    // [N3wZ] \id\::[PRiVATE]-[WtFnZb]-[name.mkv]-[1/7] - ""
    ShapeRule::new(
        &[N3wZ, Text, PrivWtf, Text, Fraction, Empty],
        Some(3),
        Some(4),
        Some(4),
    ),
    // [N3wZ] \id\:: [PRiVATE] name.mkv [WtFnZb][1/5]
    ShapeRule::new(
        &[N3wZ, Text, Private, Text, WtFnZb, Fraction],
        Some(3),
        Some(5),
        Some(5),
    ),
    // [N3wZ] \id\:: [PRiVATE] name.mkv [newzNZB][1/5]
    ShapeRule::new(
        &[N3wZ, Text, Private, Text, NewzNzb, Fraction],
        Some(3),
        Some(5),
        Some(5),
    ),
    // [145943]-[FULL]-[#a.b.teevee]-[ release ]-[01/44] - "name.mkv"
    ShapeRule::new(
        &[Number, Full, Text, Text, Fraction, Quoted],
        Some(5),
        Some(4),
        Some(4),
    ),
    // [145943]-[newzNZB]-[#a.b.teevee]-[ release ]-[01/44] - "name.mkv"
    ShapeRule::new(
        &[Number, NewzNzb, Text, Text, Fraction, Quoted],
        Some(5),
        Some(4),
        Some(4),
    ),
    // [N3wZ] \id\:: [145943]-[FULL]-[#a.b.teevee]-[ release ]-[01/44] - "name.mkv"
    ShapeRule::new(
        &[N3wZ, Text, Number, Full, Text, Text, Fraction, Quoted],
        Some(7),
        Some(6),
        Some(6),
    ),
    // [N3wZ] \id\:: [145943]-[newzNZB]-[#a.b.teevee]-[ release ]-[01/44] - "name.mkv"
    ShapeRule::new(
        &[N3wZ, Text, Number, NewzNzb, Text, Text, Fraction, Quoted],
        Some(7),
        Some(6),
        Some(6),
    ),
    // [FULL]-[ release ]-[01/44] - "name.mkv"
    ShapeRule::new(&[Full, Text, Fraction, Quoted], Some(3), Some(2), Some(2)),
    // [newzNZB] [3/9] - "name.rar"
    ShapeRule::new(&[NewzNzb, Fraction, Quoted], Some(2), Some(1), Some(1)),
    // File 3 of 12 "name.rar"
    ShapeRule::new(&[Text, Number, Of, Number, Quoted], Some(4), Some(1), Some(3)),
    // 3 of 12 "name.rar"
    ShapeRule::new(&[Number, Of, Number, Quoted], Some(3), Some(0), Some(2)),
];

static SHAPE_INDEX: LazyLock<HashMap<Signature, &'static ShapeRule>> =
    LazyLock::new(|| SHAPES.iter().map(|rule| (rule.signature, rule)).collect());

/// Finds the rule for an exact signature.
#[must_use]
pub fn lookup(signature: Signature) -> Option<&'static ShapeRule> {
    SHAPE_INDEX.get(&signature).copied()
}

/// Maps a tokenized subject to its outcome. Never fails.
#[must_use]
pub fn extract(signature: Signature, tokens: Vec<Token>) -> SubjectOutcome {
    match lookup(signature) {
        Some(rule) => SubjectOutcome::Matched(rule.extract(&tokens)),
        None => {
            debug!(%signature, tokens = tokens.len(), "unknown subject shape");
            SubjectOutcome::Unmatched { signature, tokens }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::Tokenizer;

    fn outcome(subject: &str) -> SubjectOutcome {
        let tokenized = Tokenizer::new().tokenize(subject);
        extract(tokenized.signature, tokenized.tokens)
    }

    #[test]
    fn signatures_are_unique() {
        assert_eq!(SHAPE_INDEX.len(), SHAPES.len());
    }

    #[test]
    fn known_signature_values() {
        let values: Vec<u64> = SHAPES.iter().map(|rule| rule.signature.value()).collect();
        for expected in [
            0x3, 0x33, 0x53, 0xe3, 0x3e, 0x5e3, 0x6e3, 0x55e3, 0x9654, 0x95e, 0x95e4, 0x857e,
            0x85be, 0xa5e3, 0xa59654, 0xa595e4, 0xa5857e, 0x6c55e3, 0x6b55e3, 0xa56c55e3,
            0xa56b55e3, 0xbe3, 0x56f63,
        ] {
            assert!(values.contains(&expected), "missing {expected:#x}");
        }
    }

    #[test]
    fn slots_point_at_sensible_kinds() {
        for rule in SHAPES {
            let kinds: Vec<TokenKind> = rule.signature.kinds().collect();
            if let Some(slot) = rule.filename {
                assert!(
                    matches!(kinds[slot], Quoted | Text),
                    "{}: filename slot {slot} is {:?}",
                    rule.signature,
                    kinds[slot]
                );
            }
            for slot in [rule.index, rule.total].into_iter().flatten() {
                assert!(
                    matches!(kinds[slot], Number | Fraction),
                    "{}: numeric slot {slot} is {:?}",
                    rule.signature,
                    kinds[slot]
                );
            }
        }
    }

    #[test]
    fn fraction_then_quoted() {
        let outcome = outcome("[01/57] - \"9ciQK4R3mMmKGyhEXWTqlj.par2\"");
        assert_eq!(
            outcome,
            SubjectOutcome::Matched(Extraction {
                signature: Signature(0xe3),
                filename: Some("9ciQK4R3mMmKGyhEXWTqlj.par2".into()),
                index: Some(1),
                total: Some(57),
            })
        );
    }

    #[test]
    fn private_wtfnzb_with_number_total() {
        let outcome = outcome("[PRiVATE]-[WtFnZb]-[4]-[3/WtF[nZb].nfo] - \"\"");
        let extraction = outcome.extraction().unwrap();
        assert_eq!(extraction.signature, Signature(0x9654));
        assert_eq!(
            (extraction.filename.as_deref(), extraction.index, extraction.total),
            (Some("WtF[nZb].nfo"), Some(3), Some(4))
        );
    }

    #[test]
    fn n3wz_private_wtfnzb_with_index_prefix() {
        let outcome = outcome(
            "[N3wZ] \\bdIcha192688\\::[PRiVATE]-[WtFnZb]-[4]-[1/Chuck.S02E01.Chuck.Versus.the.First.Date.REPACK.1080p.BluRay.REMUX.VC-1.DD5.1-EPSiLON.mkv] - \"\"",
        );
        let extraction = outcome.extraction().unwrap();
        assert_eq!(extraction.signature, Signature(0xa59654));
        assert_eq!(
            (extraction.filename.as_deref(), extraction.index, extraction.total),
            (
                Some(
                    "Chuck.S02E01.Chuck.Versus.the.First.Date.REPACK.1080p.BluRay.REMUX.VC-1.DD5.1-EPSiLON.mkv"
                ),
                Some(1),
                Some(4)
            )
        );
    }

    #[test]
    fn index_prefix_needs_leading_digits() {
        let outcome = outcome("[PRiVATE]-[WtFnZb]-[4]-[a/WtF.nfo] - \"\"");
        let extraction = outcome.extraction().unwrap();
        assert_eq!(extraction.filename.as_deref(), Some("a/WtF.nfo"));
        assert_eq!(extraction.index, None);
        assert_eq!(extraction.total, Some(4));

        assert_eq!(split_index_prefix("12/a/b.nfo"), Some((12, "a/b.nfo")));
        assert_eq!(split_index_prefix("/a.nfo"), None);
        assert_eq!(split_index_prefix("99999999999999999999999/a.nfo"), None);
        assert_eq!(split_index_prefix("a.nfo"), None);
    }

    #[test]
    fn plain_rules_keep_the_prefix() {
        let tokenized = Tokenizer::new().tokenize("[3/name.nfo] - \"\"");
        let rule = ShapeRule::new(&[Text, Empty], Some(0), None, None);
        assert_eq!(rule.signature, tokenized.signature);
        let extraction = rule.extract(&tokenized.tokens);
        assert_eq!(extraction.filename.as_deref(), Some("3/name.nfo"));
        assert_eq!(extraction.index, None);
    }

    #[test]
    fn quoted_then_fraction() {
        let outcome = outcome("\"name.rar\" [1/5]");
        let extraction = outcome.extraction().unwrap();
        assert_eq!(extraction.signature, Signature(0x3e));
        assert_eq!(extraction.filename.as_deref(), Some("name.rar"));
        assert_eq!((extraction.index, extraction.total), (Some(1), Some(5)));
    }

    #[test]
    fn private_and_wtfnzb_apart_stay_separate() {
        let outcome = outcome("[PRiVATE] Show.S01E01.mkv [WtFnZb][2/9]");
        let extraction = outcome.extraction().unwrap();
        assert_eq!(extraction.signature, Signature(0x857e));
        assert_eq!(extraction.filename.as_deref(), Some("Show.S01E01.mkv"));
        assert_eq!((extraction.index, extraction.total), (Some(2), Some(9)));
    }

    #[test]
    fn newznzb_release_subject() {
        let outcome = outcome(
            "[145943]-[newzNZB]-[#a.b.teevee]-[ FantomWorks.720p.HDTV.x264-DHD ]-[03/44] - \"fantomworks.r01\"",
        );
        let extraction = outcome.extraction().unwrap();
        assert_eq!(extraction.signature, Signature(0x6b55e3));
        assert_eq!(extraction.filename.as_deref(), Some("fantomworks.r01"));
        assert_eq!((extraction.index, extraction.total), (Some(3), Some(44)));
    }

    #[test]
    fn private_wtfnzb_with_fraction() {
        let outcome = outcome(
            "[PRiVATE]-[WtFnZb]-[Underground.Marvels.S01E01.720p.WEBRip.x264-CAFFEiNE.mkv]-[1/7] - \"\"",
        );
        let extraction = outcome.extraction().unwrap();
        assert_eq!(
            extraction.filename.as_deref(),
            Some("Underground.Marvels.S01E01.720p.WEBRip.x264-CAFFEiNE.mkv")
        );
        assert_eq!(extraction.index, Some(1));
        assert_eq!(extraction.total, Some(7));
    }

    #[test]
    fn full_marker_subject() {
        let outcome = outcome(
            "[145943]-[FULL]-[#a.b.teevee]-[ FantomWorks.720p.HDTV.x264-DHD ]-[01/44] - \"fantomworks-sample.mkv\"",
        );
        let extraction = outcome.extraction().unwrap();
        assert_eq!(extraction.signature, Signature(0x6c55e3));
        assert_eq!(extraction.filename.as_deref(), Some("fantomworks-sample.mkv"));
        assert_eq!(extraction.index, Some(1));
        assert_eq!(extraction.total, Some(44));
    }

    #[test]
    fn of_counter() {
        let outcome = outcome("File 3 of 12 \"show.part03.rar\"");
        let extraction = outcome.extraction().unwrap();
        assert_eq!(extraction.filename.as_deref(), Some("show.part03.rar"));
        assert_eq!(extraction.index, Some(3));
        assert_eq!(extraction.total, Some(12));
    }

    #[test]
    fn unknown_shape_returns_every_token() {
        let outcome = outcome("[1] [2] [3] odd");
        match outcome {
            SubjectOutcome::Unmatched { signature, tokens } => {
                assert_eq!(signature, Signature(0x6665));
                assert_eq!(tokens.len(), 4);
                assert_eq!(tokens[3].text, "odd");
            }
            SubjectOutcome::Matched(_) => panic!("shape should not be catalogued"),
        }
    }

    #[test]
    fn empty_subject_is_unmatched() {
        let outcome = outcome("");
        assert!(!outcome.is_matched());
        assert_eq!(outcome.signature(), Signature::EMPTY);
    }

    #[test]
    fn window_offset_applies_to_long_subjects() {
        // 15 leading strings plus the tail overflow the 16-slot window by one.
        let mut subject = String::new();
        for i in 0..15 {
            subject.push_str(&format!("w{i} "));
        }
        subject.push_str("[01/57] - \"tail.par2\"");
        let tokenized = Tokenizer::new().tokenize(&subject);
        assert_eq!(tokenized.tokens.len(), 17);

        let rule = ShapeRule::new(
            &[
                Text, Text, Text, Text, Text, Text, Text, Text, Text, Text, Text, Text, Text,
                Text, Fraction, Quoted,
            ],
            Some(15),
            Some(14),
            Some(14),
        );
        assert_eq!(rule.signature, tokenized.signature);
        let extraction = rule.extract(&tokenized.tokens);
        assert_eq!(extraction.filename.as_deref(), Some("tail.par2"));
        assert_eq!(extraction.index, Some(1));
        assert_eq!(extraction.total, Some(57));
    }
}
