//! # Subject Parser
//!
//! Runs the whole pipeline for one subject line: yEnc trimming, tokenizing,
//! shape lookup, and the optional trailer and separator-run passes.

use tracing::trace;

use super::preprocess::trim_yenc;
use super::runs::separator_runs;
use super::shapes;
use super::tokenizer::Tokenizer;
use super::trailer::TrailerParser;
use crate::error::Result;
use crate::types::ParsedSubject;

/// Configuration for the subject parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubjectParserConfig {
    /// Cut the subject at its last ` yEnc` before tokenizing.
    pub trim_yenc: bool,
    /// Collect separator-run diagnostics.
    pub diagnostics: bool,
    /// Parse the counters after the trailing ` yEnc`.
    pub parse_trailer: bool,
}

impl Default for SubjectParserConfig {
    fn default() -> Self {
        Self {
            trim_yenc: true,
            diagnostics: false,
            parse_trailer: true,
        }
    }
}

impl SubjectParserConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable yEnc trimming.
    pub fn with_trim_yenc(mut self, enabled: bool) -> Self {
        self.trim_yenc = enabled;
        self
    }

    /// Enable or disable separator-run diagnostics.
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    /// Enable or disable trailer parsing.
    pub fn with_parse_trailer(mut self, enabled: bool) -> Self {
        self.parse_trailer = enabled;
        self
    }
}

/// Subject parser. Holds only read-only state, so one instance can be
/// reused for every subject of every manifest.
#[derive(Debug, Clone)]
pub struct SubjectParser {
    config: SubjectParserConfig,
    tokenizer: Tokenizer,
    trailer: TrailerParser,
}

impl SubjectParser {
    /// Create a new parser with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `NzbError::RegexError` if the trailer patterns fail to compile.
    pub fn new(config: SubjectParserConfig) -> Result<Self> {
        Ok(Self {
            config,
            tokenizer: Tokenizer::new(),
            trailer: TrailerParser::new()?,
        })
    }

    /// Create a new parser with default configuration.
    ///
    /// # Errors
    ///
    /// See [`SubjectParser::new`].
    pub fn with_defaults() -> Result<Self> {
        Self::new(SubjectParserConfig::default())
    }

    /// Parse one subject line. Never fails: unknown shapes come back as
    /// [`SubjectOutcome::Unmatched`](crate::types::SubjectOutcome::Unmatched).
    ///
    /// # Examples
    /// ```
    /// use nzb_subject_core::subject::SubjectParser;
    ///
    /// let parser = SubjectParser::with_defaults().unwrap();
    /// let parsed = parser.parse("[01/57] - \"9ciQK4R3mMmKGyhEXWTqlj.par2\" yEnc (1/1) 51264");
    ///
    /// assert_eq!(parsed.filename(), Some("9ciQK4R3mMmKGyhEXWTqlj.par2"));
    /// assert_eq!(parsed.trailer.unwrap().size, Some(51264));
    /// ```
    pub fn parse(&self, subject: &str) -> ParsedSubject {
        let (body, trailer_text) = if self.config.trim_yenc {
            let pre = trim_yenc(subject);
            (pre.body, pre.trailer)
        } else {
            (subject, None)
        };

        let tokenized = self.tokenizer.tokenize(body);
        trace!(
            signature = %tokenized.signature,
            tokens = tokenized.tokens.len(),
            "subject tokenized"
        );

        let runs = if self.config.diagnostics {
            separator_runs(body, &tokenized.tokens)
        } else {
            Vec::new()
        };

        let trailer = trailer_text
            .filter(|_| self.config.parse_trailer)
            .map(|text| self.trailer.parse(text))
            .filter(|trailer| !trailer.is_empty());

        ParsedSubject {
            subject: subject.to_owned(),
            trimmed_len: body.len(),
            outcome: shapes::extract(tokenized.signature, tokenized.tokens),
            trailer,
            runs,
        }
    }

    /// Get the parser configuration.
    pub fn config(&self) -> &SubjectParserConfig {
        &self.config
    }
}

/// Convenience function to parse a subject with default settings.
///
/// # Errors
///
/// See [`SubjectParser::new`].
pub fn parse(subject: &str) -> Result<ParsedSubject> {
    let parser = SubjectParser::with_defaults()?;
    Ok(parser.parse(subject))
}
