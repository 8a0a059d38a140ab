//! Trailing yEnc trimming.
//!
//! Everything from the *last* `" yEnc"` onwards is size and count
//! annotation. An earlier occurrence can sit inside a quoted filename, so
//! the search runs from the end.

use super::bytes::is_separator;

/// Marker that starts the yEnc annotation.
pub const YENC_MARKER: &str = " yEnc";

/// A subject split at its trailing yEnc marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preprocessed<'a> {
    /// Text handed to the tokenizer.
    pub body: &'a str,
    /// Text after the `yEnc` keyword, if the marker was found.
    pub trailer: Option<&'a str>,
}

/// Splits `subject` at the last yEnc marker, dropping separators before it.
///
/// The input is only sliced, never modified.
#[must_use]
pub fn trim_yenc(subject: &str) -> Preprocessed<'_> {
    let Some(marker) = subject.rfind(YENC_MARKER) else {
        return Preprocessed {
            body: subject,
            trailer: None,
        };
    };

    let bytes = subject.as_bytes();
    let mut cut = marker;
    while cut > 0 && is_separator(bytes[cut - 1]) {
        cut -= 1;
    }

    Preprocessed {
        body: &subject[..cut],
        trailer: Some(&subject[marker + YENC_MARKER.len()..]),
    }
}
