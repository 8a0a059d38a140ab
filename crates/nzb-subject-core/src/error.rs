use thiserror::Error;

/// Errors that can occur while reading an NZB manifest.
///
/// The subject engine itself never fails: unknown shapes and unbalanced
/// brackets are ordinary outcomes. Everything here originates in the
/// manifest reader or in constructing the trailer parser.
#[derive(Debug, Error)]
pub enum NzbError {
    /// The XML stream is malformed.
    #[error("xml error at byte {position}: {source}")]
    Xml {
        /// Byte offset reported by the XML reader.
        position: u64,
        /// The underlying reader error.
        #[source]
        source: quick_xml::Error,
    },

    /// The manifest could not be read from its source.
    #[error("failed to read manifest: {0}")]
    Io(#[from] std::io::Error),

    /// Element nesting went past the bounded element stack.
    #[error("element nesting exceeds the maximum depth of {max}")]
    NestingTooDeep {
        /// Configured maximum depth.
        max: usize,
    },

    /// A closing tag arrived with no element open.
    #[error("closing tag </{element}> without a matching open element")]
    UnbalancedClose {
        /// Name of the closing tag.
        element: String,
    },

    /// An attribute arrived with no element open to own it.
    #[error("attribute {attribute:?} outside of any element")]
    DetachedAttribute {
        /// Name of the orphaned attribute.
        attribute: String,
    },

    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),
}

/// Result type alias for manifest operations.
pub type Result<T> = std::result::Result<T, NzbError>;
