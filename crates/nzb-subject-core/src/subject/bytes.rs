//! Byte classification table for the subject tokenizer.

/// Structural role of a subject byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteClass {
    /// Token content.
    Ordinary,
    /// Space, tab, dash, and the string terminator.
    Separator,
    /// `"`
    Quote,
    /// `[` or `(`
    LeftBracket,
    /// `]` or `)`
    RightBracket,
}

/// Byte treated as the end of the subject.
pub const TERMINATOR: u8 = 0;

const BYTE_CLASS_TABLE: [ByteClass; 256] = {
    let mut table = [ByteClass::Ordinary; 256];
    table[TERMINATOR as usize] = ByteClass::Separator;
    table[b' ' as usize] = ByteClass::Separator;
    table[b'\t' as usize] = ByteClass::Separator;
    table[b'-' as usize] = ByteClass::Separator;
    table[b'"' as usize] = ByteClass::Quote;
    table[b'[' as usize] = ByteClass::LeftBracket;
    table[b'(' as usize] = ByteClass::LeftBracket;
    table[b']' as usize] = ByteClass::RightBracket;
    table[b')' as usize] = ByteClass::RightBracket;
    table
};

/// Classifies one byte.
#[inline]
#[must_use]
pub const fn classify_byte(byte: u8) -> ByteClass {
    BYTE_CLASS_TABLE[byte as usize]
}

/// Returns `true` for separator bytes, the terminator included.
#[inline]
#[must_use]
pub const fn is_separator(byte: u8) -> bool {
    matches!(classify_byte(byte), ByteClass::Separator)
}

/// Closing byte paired with an opening bracket.
#[inline]
#[must_use]
pub const fn closing_bracket(open: u8) -> u8 {
    match open {
        b'(' => b')',
        _ => b']',
    }
}
