//! # NZB Subject Core
//!
//! Recognizes the shape of NZB subject lines and pulls out the display
//! filename and the part counters. A subject is tokenized in one pass,
//! its token kinds are folded into a 64-bit signature, and the signature
//! selects a catalogued shape. Unknown shapes are reported with their
//! full token list instead of failing.
//!
//! ## Quick Start
//!
//! ```rust
//! use nzb_subject_core::subject::SubjectParser;
//!
//! let parser = SubjectParser::with_defaults().unwrap();
//! let parsed = parser.parse("[PRiVATE]-[WtFnZb]-[name.mkv]-[1/7] - \"\" yEnc (1/1) 1024");
//!
//! assert_eq!(parsed.filename(), Some("name.mkv"));
//! let extraction = parsed.outcome.extraction().unwrap();
//! assert_eq!((extraction.index, extraction.total), (Some(1), Some(7)));
//! ```
//!
//! Whole manifests go through [`nzb::NzbReader`]:
//!
//! ```rust
//! use nzb_subject_core::nzb::{NzbReader, NzbReaderConfig};
//!
//! let xml = r#"<nzb><file subject="[1/2] - &quot;a.rar&quot; yEnc"/></nzb>"#;
//! for file in NzbReader::from_bytes(xml.as_bytes(), NzbReaderConfig::default()).unwrap() {
//!     assert_eq!(file.unwrap().filename(), Some("a.rar"));
//! }
//! ```
pub mod error;
pub mod nzb;
pub mod subject;
pub mod types;

// Re-export primary API
pub use error::{NzbError, Result};
pub use nzb::{NzbFile, NzbMeta, NzbReader, NzbReaderConfig, Segment};
pub use subject::{SubjectParser, SubjectParserConfig, Tokenizer, parse};
pub use types::{
    Extraction, NumericValue, Opener, ParsedSubject, SeparatorRun, Signature, SubjectOutcome,
    Token, TokenKind, YencTrailer,
};
