use std::fmt;

use serde::{Deserialize, Serialize};

use super::signature::Signature;
use super::token::Token;

/// Fields pulled out of a subject whose shape is catalogued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// Signature that selected the shape.
    pub signature: Signature,
    /// Display filename, verbatim from its token.
    pub filename: Option<String>,
    /// Part index within the post.
    pub index: Option<u64>,
    /// Number of parts in the post.
    pub total: Option<u64>,
}

/// Outcome of running one subject through the shape table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubjectOutcome {
    /// The signature is catalogued.
    Matched(Extraction),
    /// The signature is not catalogued; the tokens are handed back untouched.
    Unmatched {
        /// Raw signature of the subject.
        signature: Signature,
        /// Every closed token, in order.
        tokens: Vec<Token>,
    },
}

impl SubjectOutcome {
    /// Returns `true` if a shape matched.
    #[must_use]
    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    /// The extraction, if a shape matched.
    #[must_use]
    pub fn extraction(&self) -> Option<&Extraction> {
        match self {
            Self::Matched(extraction) => Some(extraction),
            Self::Unmatched { .. } => None,
        }
    }

    /// Signature of the subject, matched or not.
    #[must_use]
    pub fn signature(&self) -> Signature {
        match self {
            Self::Matched(extraction) => extraction.signature,
            Self::Unmatched { signature, .. } => *signature,
        }
    }

    /// Display filename, if a shape matched and carries one.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.extraction()
            .and_then(|extraction| extraction.filename.as_deref())
    }
}

/// Article counters found after the trailing `yEnc` marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YencTrailer {
    /// Article part number, from `(part/total)`.
    pub part: Option<u32>,
    /// Article count, from `(part/total)`.
    pub total: Option<u32>,
    /// Bare byte count, when present.
    pub size: Option<u64>,
}

impl YencTrailer {
    /// Returns `true` if nothing was recognized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.part.is_none() && self.total.is_none() && self.size.is_none()
    }
}

/// Delimiter family referenced by a [`Transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Delimiter {
    /// `[` ... `]`
    Bracket,
    /// `(` ... `)`
    Paren,
    /// `"` ... `"`
    Quote,
}

/// Structural step taken by a separator run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transition {
    /// The run opens a delimited token.
    Open(Delimiter),
    /// The run closes a delimited token.
    Close(Delimiter),
}

/// Bytes between two tokens, with their recognized structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeparatorRun {
    /// Start byte offset in the preprocessed subject.
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Rolling hash of the run bytes.
    pub hash: u64,
    /// The run, verbatim.
    pub text: String,
    /// Structural steps, when the run is catalogued. Empty otherwise.
    pub transitions: Vec<Transition>,
}

/// Everything learned from one subject line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSubject {
    /// Original subject string.
    pub subject: String,
    /// Length of the subject after yEnc trimming.
    pub trimmed_len: usize,
    /// Shape table outcome.
    pub outcome: SubjectOutcome,
    /// Counters after the trailing `yEnc`, if any were found.
    pub trailer: Option<YencTrailer>,
    /// Separator runs, when diagnostics are enabled.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub runs: Vec<SeparatorRun>,
}

impl ParsedSubject {
    /// Returns `true` if the subject's shape is catalogued.
    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.outcome.is_matched()
    }

    /// Display filename, if one was extracted.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.outcome.filename()
    }

    /// Subject text the tokenizer saw.
    #[must_use]
    pub fn trimmed(&self) -> &str {
        &self.subject[..self.trimmed_len]
    }
}

impl fmt::Display for ParsedSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            SubjectOutcome::Matched(extraction) => {
                write!(f, "matched: {}, ", extraction.signature)?;
                match &extraction.filename {
                    Some(name) => write!(f, "'{name}', ")?,
                    None => write!(f, "-, ")?,
                }
                match extraction.index {
                    Some(index) => write!(f, "{index}, ")?,
                    None => write!(f, "-, ")?,
                }
                match extraction.total {
                    Some(total) => write!(f, "{total}"),
                    None => write!(f, "-"),
                }
            }
            SubjectOutcome::Unmatched { signature, tokens } => {
                write!(f, "sig: {signature}")?;
                for (i, token) in tokens.iter().enumerate() {
                    write!(f, "\n[{i}] {token}")?;
                }
                Ok(())
            }
        }
    }
}
