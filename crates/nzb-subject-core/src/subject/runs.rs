//! Separator-run diagnostics.
//!
//! The bytes between two tokens tell how one token ended and the next one
//! began (`]-[` closes a bracket and opens another). Known runs are looked
//! up by rolling hash. Nothing on the extraction path depends on this.

use super::hash::rolling_hash;
use crate::types::{
    Delimiter::{Bracket, Paren, Quote},
    SeparatorRun, Token, Transition,
    Transition::{Close, Open},
};

/// Where a run sits relative to the tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPosition {
    /// Before the first token.
    Leading,
    /// Between two tokens.
    Inner,
    /// After the last token.
    Trailing,
}

/// A catalogued separator run.
#[derive(Debug, Clone, Copy)]
pub struct RunEntry {
    /// Where the run must sit.
    pub position: RunPosition,
    /// Rolling hash of the run bytes.
    pub hash: u64,
    /// Structural steps taken by the run.
    pub transitions: &'static [Transition],
}

impl RunEntry {
    const fn new(
        position: RunPosition,
        run: &'static [u8],
        transitions: &'static [Transition],
    ) -> Self {
        Self {
            position,
            hash: rolling_hash(run),
            transitions,
        }
    }
}

const CLOSE_OPEN_BRACKET: &[Transition] = &[Close(Bracket), Open(Bracket)];
const CLOSE_BRACKET_OPEN_QUOTE: &[Transition] = &[Close(Bracket), Open(Quote)];
const CLOSE_QUOTE_OPEN_BRACKET: &[Transition] = &[Close(Quote), Open(Bracket)];

/// Every catalogued run.
pub const RUN_TABLE: &[RunEntry] = &[
    RunEntry::new(RunPosition::Leading, b"\"", &[Open(Quote)]),
    RunEntry::new(RunPosition::Leading, b"[", &[Open(Bracket)]),
    RunEntry::new(RunPosition::Leading, b"[ ", &[Open(Bracket)]),
    RunEntry::new(RunPosition::Leading, b"(", &[Open(Paren)]),
    RunEntry::new(RunPosition::Inner, b"]-[", CLOSE_OPEN_BRACKET),
    RunEntry::new(RunPosition::Inner, b"] - [", CLOSE_OPEN_BRACKET),
    RunEntry::new(RunPosition::Inner, b"] [", CLOSE_OPEN_BRACKET),
    RunEntry::new(RunPosition::Inner, b"][", CLOSE_OPEN_BRACKET),
    RunEntry::new(RunPosition::Inner, b"]-[ ", CLOSE_OPEN_BRACKET),
    RunEntry::new(RunPosition::Inner, b" ]-[", CLOSE_OPEN_BRACKET),
    RunEntry::new(RunPosition::Inner, b" ] - [", CLOSE_OPEN_BRACKET),
    RunEntry::new(RunPosition::Inner, b"] - \"", CLOSE_BRACKET_OPEN_QUOTE),
    RunEntry::new(RunPosition::Inner, b" ] - \"", CLOSE_BRACKET_OPEN_QUOTE),
    RunEntry::new(RunPosition::Inner, b"]-\"", CLOSE_BRACKET_OPEN_QUOTE),
    RunEntry::new(RunPosition::Inner, b"] \"", CLOSE_BRACKET_OPEN_QUOTE),
    RunEntry::new(RunPosition::Inner, b"\" - [", CLOSE_QUOTE_OPEN_BRACKET),
    RunEntry::new(RunPosition::Inner, b"\" [", CLOSE_QUOTE_OPEN_BRACKET),
    RunEntry::new(RunPosition::Inner, b" [", &[Open(Bracket)]),
    RunEntry::new(RunPosition::Inner, b"[", &[Open(Bracket)]),
    RunEntry::new(RunPosition::Inner, b" - [", &[Open(Bracket)]),
    RunEntry::new(RunPosition::Inner, b" \"", &[Open(Quote)]),
    RunEntry::new(RunPosition::Inner, b" - \"", &[Open(Quote)]),
    RunEntry::new(RunPosition::Inner, b"] ", &[Close(Bracket)]),
    RunEntry::new(RunPosition::Inner, b"] - ", &[Close(Bracket)]),
    RunEntry::new(RunPosition::Trailing, b"\"", &[Close(Quote)]),
    RunEntry::new(RunPosition::Trailing, b"]", &[Close(Bracket)]),
    RunEntry::new(RunPosition::Trailing, b" ]", &[Close(Bracket)]),
    RunEntry::new(RunPosition::Trailing, b")", &[Close(Paren)]),
];

/// Looks up the transitions of a run.
#[must_use]
pub fn transitions(position: RunPosition, hash: u64) -> Option<&'static [Transition]> {
    RUN_TABLE
        .iter()
        .find(|entry| entry.position == position && entry.hash == hash)
        .map(|entry| entry.transitions)
}

/// Lists the runs around and between `tokens` in `body`.
///
/// `tokens` must index into `body` and be in order.
#[must_use]
pub fn separator_runs(body: &str, tokens: &[Token]) -> Vec<SeparatorRun> {
    let mut runs = Vec::with_capacity(tokens.len() + 1);
    let mut cursor = 0;

    for (i, token) in tokens.iter().enumerate() {
        let position = if i == 0 {
            RunPosition::Leading
        } else {
            RunPosition::Inner
        };
        push_run(&mut runs, body, cursor, token.start, position);
        cursor = token.end;
    }
    let position = if tokens.is_empty() {
        RunPosition::Leading
    } else {
        RunPosition::Trailing
    };
    push_run(&mut runs, body, cursor, body.len(), position);

    runs
}

fn push_run(
    runs: &mut Vec<SeparatorRun>,
    body: &str,
    start: usize,
    end: usize,
    position: RunPosition,
) {
    if start >= end {
        return;
    }
    let bytes = &body.as_bytes()[start..end];
    let hash = rolling_hash(bytes);
    runs.push(SeparatorRun {
        start,
        end,
        hash,
        text: String::from_utf8_lossy(bytes).into_owned(),
        transitions: transitions(position, hash)
            .map(<[Transition]>::to_vec)
            .unwrap_or_default(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::Tokenizer;

    fn runs(body: &str) -> Vec<SeparatorRun> {
        let tokenized = Tokenizer::new().tokenize(body);
        separator_runs(body, &tokenized.tokens)
    }

    #[test]
    fn bracket_then_quote() {
        let runs = runs("[01/57] - \"9ciQK4R3mMmKGyhEXWTqlj.par2\"");
        let texts: Vec<&str> = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, ["[", "] - \"", "\""]);
        assert_eq!(runs[0].transitions, [Open(Bracket)]);
        assert_eq!(runs[1].transitions, [Close(Bracket), Open(Quote)]);
        assert_eq!(runs[2].transitions, [Close(Quote)]);
    }

    #[test]
    fn collapsed_marker_swallows_its_inner_run() {
        let runs = runs("[PRiVATE]-[WtFnZb]-[4]");
        let texts: Vec<&str> = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, ["[", "]-[", "]"]);
        assert_eq!(runs[1].transitions, [Close(Bracket), Open(Bracket)]);
    }

    #[test]
    fn unknown_runs_have_no_transitions() {
        let runs = runs("abc -- def");
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, " -- ");
        assert!(runs[0].transitions.is_empty());
        assert_eq!(runs[0].hash, rolling_hash(b" -- "));
    }

    #[test]
    fn position_disambiguates_lone_quote() {
        assert_eq!(
            transitions(RunPosition::Leading, rolling_hash(b"\"")),
            Some(&[Open(Quote)][..])
        );
        assert_eq!(
            transitions(RunPosition::Trailing, rolling_hash(b"\"")),
            Some(&[Close(Quote)][..])
        );
    }

    #[test]
    fn subject_without_tokens() {
        let runs = runs(" - ");
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].start, 0);
        assert_eq!(runs[0].end, 3);
    }
}
