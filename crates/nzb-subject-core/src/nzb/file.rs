use serde::{Deserialize, Serialize};

use super::names;
use super::stack::ClosedElement;
use crate::types::ParsedSubject;

/// One `<segment>`: a Usenet article carrying part of a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// 1-based position of the article within the file.
    pub number: Option<u32>,
    /// Encoded article size.
    pub bytes: Option<u64>,
    /// Message-ID, without angle brackets.
    pub message_id: String,
}

impl Segment {
    pub(crate) fn from_element(element: ClosedElement) -> Self {
        let number = element
            .attribute(names::NUMBER)
            .and_then(|value| value.trim().parse().ok());
        let bytes = element
            .attribute(names::BYTES)
            .and_then(|value| value.trim().parse().ok());
        let message_id = element
            .contents
            .trim()
            .trim_start_matches('<')
            .trim_end_matches('>')
            .to_owned();
        Self {
            number,
            bytes,
            message_id,
        }
    }
}

/// One `<head><meta type="..">` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NzbMeta {
    /// The `type` attribute (`title`, `password`, `category`, ...).
    pub kind: Option<String>,
    /// Element text.
    pub value: String,
}

/// One `<file>` entry with its parsed subject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NzbFile {
    /// The `poster` attribute.
    pub poster: Option<String>,
    /// The `date` attribute, seconds since the Unix epoch.
    pub date: Option<u64>,
    /// The `subject` attribute, parsed.
    pub subject: Option<ParsedSubject>,
    /// Newsgroups the file was posted to.
    pub groups: Vec<String>,
    /// Articles making up the file, in document order.
    pub segments: Vec<Segment>,
}

impl NzbFile {
    /// Sum of the segment sizes that are known.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.segments.iter().filter_map(|segment| segment.bytes).sum()
    }

    /// Display filename from the subject, if one was extracted.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.subject.as_ref().and_then(ParsedSubject::filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nzb::stack::Attribute;

    #[test]
    fn segment_from_element() {
        let element = ClosedElement {
            name: names::SEGMENT,
            attributes: vec![
                Attribute {
                    name: names::BYTES,
                    value: "102394".into(),
                },
                Attribute {
                    name: names::NUMBER,
                    value: "1".into(),
                },
            ],
            contents: " <123456789abcdef@news.example.com> ".into(),
        };
        let segment = Segment::from_element(element);
        assert_eq!(segment.number, Some(1));
        assert_eq!(segment.bytes, Some(102_394));
        assert_eq!(segment.message_id, "123456789abcdef@news.example.com");
    }

    #[test]
    fn segment_with_bad_attributes() {
        let element = ClosedElement {
            name: names::SEGMENT,
            attributes: vec![Attribute {
                name: names::NUMBER,
                value: "one".into(),
            }],
            contents: "id@host".into(),
        };
        let segment = Segment::from_element(element);
        assert_eq!(segment.number, None);
        assert_eq!(segment.bytes, None);
    }

    #[test]
    fn total_bytes_skips_unknown_sizes() {
        let file = NzbFile {
            segments: vec![
                Segment {
                    number: Some(1),
                    bytes: Some(10),
                    message_id: "a".into(),
                },
                Segment {
                    number: Some(2),
                    bytes: None,
                    message_id: "b".into(),
                },
                Segment {
                    number: Some(3),
                    bytes: Some(5),
                    message_id: "c".into(),
                },
            ],
            ..NzbFile::default()
        };
        assert_eq!(file.total_bytes(), 15);
        assert_eq!(file.filename(), None);
    }
}
