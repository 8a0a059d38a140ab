pub mod result;
pub mod signature;
pub mod token;

pub use result::{
    Delimiter, Extraction, ParsedSubject, SeparatorRun, SubjectOutcome, Transition, YencTrailer,
};
pub use signature::Signature;
pub use token::{NumericValue, Opener, Token, TokenKind};
