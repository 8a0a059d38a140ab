//! Element and attribute names of the NZB format, as rolling hashes.
//!
//! The reader dispatches on these values instead of comparing strings.

use crate::subject::rolling_hash;

pub const NZB: u64 = rolling_hash(b"nzb");
pub const HEAD: u64 = rolling_hash(b"head");
pub const META: u64 = rolling_hash(b"meta");
pub const FILE: u64 = rolling_hash(b"file");
pub const GROUPS: u64 = rolling_hash(b"groups");
pub const GROUP: u64 = rolling_hash(b"group");
pub const SEGMENTS: u64 = rolling_hash(b"segments");
pub const SEGMENT: u64 = rolling_hash(b"segment");

pub const XMLNS: u64 = rolling_hash(b"xmlns");
pub const TYPE: u64 = rolling_hash(b"type");
pub const SUBJECT: u64 = rolling_hash(b"subject");
pub const POSTER: u64 = rolling_hash(b"poster");
pub const DATE: u64 = rolling_hash(b"date");
pub const BYTES: u64 = rolling_hash(b"bytes");
pub const NUMBER: u64 = rolling_hash(b"number");

const KNOWN: [(u64, &str); 15] = [
    (NZB, "nzb"),
    (HEAD, "head"),
    (META, "meta"),
    (FILE, "file"),
    (GROUPS, "groups"),
    (GROUP, "group"),
    (SEGMENTS, "segments"),
    (SEGMENT, "segment"),
    (XMLNS, "xmlns"),
    (TYPE, "type"),
    (SUBJECT, "subject"),
    (POSTER, "poster"),
    (DATE, "date"),
    (BYTES, "bytes"),
    (NUMBER, "number"),
];

/// Name behind a known hash, for logging.
#[must_use]
pub fn describe(hash: u64) -> Option<&'static str> {
    KNOWN
        .iter()
        .find(|(known, _)| *known == hash)
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_do_not_collide() {
        for (i, (a, name_a)) in KNOWN.iter().enumerate() {
            for (b, name_b) in &KNOWN[i + 1..] {
                assert_ne!(a, b, "{name_a} collides with {name_b}");
            }
        }
    }

    #[test]
    fn known_values() {
        assert_eq!(FILE, 0x003c_afa0_bdeb_36b1);
        assert_eq!(SUBJECT, 0x78d5_adc5_d7a0_afe2);
        assert_eq!(SEGMENT, 0x78d5_ad74_034d_d104);
        assert_eq!(NZB, 0x0001_51a9_0eb4_74b2);
    }

    #[test]
    fn describe_round_trips() {
        assert_eq!(describe(SEGMENT), Some("segment"));
        assert_eq!(describe(rolling_hash(b"unknown")), None);
    }
}
