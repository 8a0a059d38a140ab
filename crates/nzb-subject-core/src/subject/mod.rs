pub mod accumulator;
pub mod bytes;
pub mod classify;
pub mod hash;
pub mod parser;
pub mod preprocess;
pub mod runs;
pub mod shapes;
pub mod tokenizer;
pub mod trailer;

pub use accumulator::SignatureAccumulator;
pub use bytes::{ByteClass, classify_byte, is_separator};
pub use classify::{KEYWORDS, Keyword, classify_token};
pub use hash::{HASH_EMPTY, RollingHash, rolling_hash};
pub use parser::{SubjectParser, SubjectParserConfig, parse};
pub use preprocess::{Preprocessed, YENC_MARKER, trim_yenc};
pub use runs::{RUN_TABLE, RunEntry, RunPosition, separator_runs};
pub use shapes::{SHAPES, ShapeRule};
pub use tokenizer::{Tokenized, Tokenizer};
pub use trailer::TrailerParser;
