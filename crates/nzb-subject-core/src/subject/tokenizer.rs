//! # Subject Tokenizer
//!
//! Single forward pass over a (preprocessed) subject line. Bracketed runs,
//! quoted runs and plain unbracketed runs each become one token; separator
//! bytes between them belong to no token. Every token is classified the
//! moment it closes and folded into the signature.
//!
//! Tolerant by construction: an unterminated bracket or quote is closed
//! at end of input, never reported as an error.

use tracing::{debug, trace, warn};

use super::accumulator::SignatureAccumulator;
use super::bytes::{ByteClass, classify_byte, closing_bracket, is_separator};
use super::classify::classify_token;
use super::hash::RollingHash;
use crate::types::{Opener, Signature, Token, TokenKind};

/// Tokens and signature of one subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenized {
    /// Signature of the recorded tokens.
    pub signature: Signature,
    /// Recorded tokens, in order.
    pub tokens: Vec<Token>,
    /// Scanning stopped at a `yEnc` token; it and everything after it were skipped.
    pub stopped_at_yenc: bool,
    /// A bracket or quote was still open at end of input.
    pub unbalanced: bool,
}

/// Tokenizer for subject lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Create a new tokenizer instance.
    pub fn new() -> Self {
        Self
    }

    /// Tokenize a subject line.
    ///
    /// # Examples
    /// ```
    /// use nzb_subject_core::subject::Tokenizer;
    /// use nzb_subject_core::types::TokenKind;
    ///
    /// let tokenized = Tokenizer::new().tokenize("[01/57] - \"9ciQK4R3mMmKGyhEXWTqlj.par2\"");
    /// let kinds: Vec<_> = tokenized.tokens.iter().map(|t| t.kind).collect();
    /// assert_eq!(kinds, [TokenKind::Fraction, TokenKind::Quoted]);
    /// ```
    pub fn tokenize(&self, input: &str) -> Tokenized {
        Scan::new(input.as_bytes()).run()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Level 0, between tokens.
    Idle,
    /// Level 0, inside an unbracketed run.
    Plain,
    /// Inside `"` ... `"`.
    Quoted,
    /// Inside a bracket pair; only `open`/`close` move the level.
    Bracketed { open: u8, close: u8 },
}

enum Flow {
    Continue(usize),
    Stop,
}

struct Scan<'a> {
    bytes: &'a [u8],
    state: State,
    level: usize,
    start: usize,
    end: usize,
    hash: RollingHash,
    unbalanced: bool,
    acc: SignatureAccumulator<'a>,
}

impl<'a> Scan<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            state: State::Idle,
            level: 0,
            start: 0,
            end: 0,
            hash: RollingHash::new(),
            unbalanced: false,
            acc: SignatureAccumulator::new(bytes),
        }
    }

    fn run(mut self) -> Tokenized {
        let mut i = 0;
        while i < self.bytes.len() {
            match self.step(i) {
                Flow::Continue(next) => i = next,
                Flow::Stop => return self.finish(true),
            }
        }

        // The terminator is a separator: it flushes a plain run and
        // force-closes a bracket or quote left open.
        let stopped = match self.state {
            State::Idle => false,
            State::Plain => self.close(Opener::Plain),
            State::Quoted => {
                warn!(start = self.start, "unterminated quote closed at end of subject");
                self.unbalanced = true;
                self.close(Opener::Quote)
            }
            State::Bracketed { open, .. } => {
                warn!(
                    start = self.start,
                    level = self.level,
                    "unterminated bracket closed at end of subject"
                );
                self.unbalanced = true;
                self.close(bracket_opener(open))
            }
        };
        self.finish(stopped)
    }

    fn step(&mut self, i: usize) -> Flow {
        let byte = self.bytes[i];
        let doubled = matches!(byte, b'[' | b']') && self.bytes.get(i + 1) == Some(&byte);

        match self.state {
            State::Idle => {
                if doubled {
                    self.open(State::Plain, i);
                    self.extend(i + 2);
                    return Flow::Continue(i + 2);
                }
                match classify_byte(byte) {
                    ByteClass::Quote => {
                        self.open(State::Quoted, i + 1);
                        Flow::Continue(i + 1)
                    }
                    ByteClass::LeftBracket => {
                        let mut first = i + 1;
                        while first < self.bytes.len() && is_separator(self.bytes[first]) {
                            first += 1;
                        }
                        let state = State::Bracketed {
                            open: byte,
                            close: closing_bracket(byte),
                        };
                        self.open(state, first);
                        Flow::Continue(first)
                    }
                    // A stray closing bracket at level 0 is just another separator.
                    ByteClass::Separator | ByteClass::RightBracket => Flow::Continue(i + 1),
                    ByteClass::Ordinary => {
                        self.open(State::Plain, i);
                        self.extend(i + 1);
                        Flow::Continue(i + 1)
                    }
                }
            }
            State::Plain => {
                if doubled {
                    self.extend(i + 2);
                    return Flow::Continue(i + 2);
                }
                match classify_byte(byte) {
                    ByteClass::Ordinary => {
                        self.extend(i + 1);
                        Flow::Continue(i + 1)
                    }
                    ByteClass::Separator | ByteClass::RightBracket => {
                        if self.close(Opener::Plain) {
                            return Flow::Stop;
                        }
                        Flow::Continue(i + 1)
                    }
                    // Re-read the opener from the idle state.
                    ByteClass::Quote | ByteClass::LeftBracket => {
                        if self.close(Opener::Plain) {
                            return Flow::Stop;
                        }
                        Flow::Continue(i)
                    }
                }
            }
            State::Quoted => {
                if byte == b'"' {
                    if self.close(Opener::Quote) {
                        return Flow::Stop;
                    }
                } else {
                    self.extend(i + 1);
                }
                Flow::Continue(i + 1)
            }
            State::Bracketed { open, close } => {
                if doubled {
                    self.extend(i + 2);
                    return Flow::Continue(i + 2);
                }
                if byte == open {
                    self.level += 1;
                    self.extend(i + 1);
                } else if byte == close {
                    self.level -= 1;
                    if self.level == 0 {
                        if self.close(bracket_opener(open)) {
                            return Flow::Stop;
                        }
                    } else {
                        self.extend(i + 1);
                    }
                } else if !is_separator(byte) {
                    self.extend(i + 1);
                }
                Flow::Continue(i + 1)
            }
        }
    }

    fn open(&mut self, state: State, start: usize) {
        self.state = state;
        self.level = 1;
        self.start = start;
        self.end = start;
        self.hash.reset();
    }

    /// Extends the open token to `end`. Interior separators skipped since
    /// the last extension are mixed in too, so trailing separators never
    /// reach the hash or the span.
    fn extend(&mut self, end: usize) {
        self.hash.mix_all(&self.bytes[self.end..end]);
        self.end = end;
    }

    /// Closes the open token. Returns `true` when scanning must stop.
    fn close(&mut self, opener: Opener) -> bool {
        let content = &self.bytes[self.start..self.end];
        let (kind, value) = classify_token(content, self.hash.finish(), opener);

        self.state = State::Idle;
        self.level = 0;

        if kind == TokenKind::YEnc {
            debug!(start = self.start, "yEnc marker reached, rest of subject skipped");
            return true;
        }

        let token = Token {
            kind,
            opener,
            start: self.start,
            end: self.end,
            text: String::from_utf8_lossy(content).into_owned(),
            value,
        };
        self.acc.push(token);
        trace!(
            %kind,
            start = self.start,
            end = self.end,
            signature = %self.acc.signature(),
            "token closed"
        );
        false
    }

    fn finish(self, stopped_at_yenc: bool) -> Tokenized {
        let unbalanced = self.unbalanced;
        let (signature, tokens) = self.acc.finish();
        Tokenized {
            signature,
            tokens,
            stopped_at_yenc,
            unbalanced,
        }
    }
}

fn bracket_opener(open: u8) -> Opener {
    if open == b'(' {
        Opener::Paren
    } else {
        Opener::Bracket
    }
}
