use regex::Regex;

use crate::error::Result;
use crate::types::YencTrailer;

/// Best-effort reader for the text after the trailing `yEnc` marker,
/// e.g. ` (1/1) 51264`.
///
/// The counter is read from the first parenthesised group only. When that
/// group is not a `(part/total)` counter with a non-zero total, the trailer
/// is garbled and nothing is reported.
#[derive(Debug, Clone)]
pub struct TrailerParser {
    re_counter: Regex,
    re_size_after: Regex,
    re_size_before: Regex,
    re_size: Regex,
}

impl TrailerParser {
    /// Compiles the trailer patterns.
    ///
    /// # Errors
    ///
    /// Returns `NzbError::RegexError` if a pattern fails to compile
    /// (cannot happen with the static patterns used here).
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_counter: Regex::new(r"^\((\d{1,9})/(\d{1,9})\)")?,
            re_size_after: Regex::new(r"^\s+(\d{1,20})(?:\s|$)")?,
            re_size_before: Regex::new(r"(?:^|\s)(\d{1,20})\s+$")?,
            re_size: Regex::new(r"(?:^|\s)(\d{1,20})(?:\s|$)")?,
        })
    }

    /// Reads the part counter and the byte size. Unrecognized text is ignored.
    pub fn parse(&self, trailer: &str) -> YencTrailer {
        let Some(open) = trailer.find('(') else {
            return YencTrailer {
                size: Self::number(&self.re_size, trailer),
                ..YencTrailer::default()
            };
        };

        let Some(caps) = self.re_counter.captures(&trailer[open..]) else {
            return YencTrailer::default();
        };
        let part = caps.get(1).and_then(|m| m.as_str().parse().ok());
        let total = caps
            .get(2)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .filter(|&total| total != 0);
        if total.is_none() {
            return YencTrailer::default();
        }

        let close = open + caps.get(0).map_or(0, |m| m.end());
        let size = Self::number(&self.re_size_after, &trailer[close..])
            .or_else(|| Self::number(&self.re_size_before, &trailer[..open]));

        YencTrailer { part, total, size }
    }

    fn number(re: &Regex, text: &str) -> Option<u64> {
        re.captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(trailer: &str) -> YencTrailer {
        TrailerParser::new().unwrap().parse(trailer)
    }

    #[test]
    fn test_parts_and_size() {
        let trailer = parse(" (1/1) 51264");
        assert_eq!(trailer.part, Some(1));
        assert_eq!(trailer.total, Some(1));
        assert_eq!(trailer.size, Some(51_264));
    }

    #[test]
    fn test_size_before_parts() {
        let trailer = parse(" 716800 (12/48)");
        assert_eq!(trailer.part, Some(12));
        assert_eq!(trailer.total, Some(48));
        assert_eq!(trailer.size, Some(716_800));
    }

    #[test]
    fn test_parts_only() {
        let trailer = parse(" (3/9)");
        assert_eq!(trailer.part, Some(3));
        assert_eq!(trailer.total, Some(9));
        assert_eq!(trailer.size, None);
    }

    #[test]
    fn test_garbage() {
        assert!(parse(" whatever").is_empty());
        assert!(parse("").is_empty());
        assert!(parse(" (1of2) size12").is_empty());
    }

    #[test]
    fn test_size_without_counter() {
        let trailer = parse(" 51264");
        assert_eq!(trailer.part, None);
        assert_eq!(trailer.size, Some(51_264));
    }

    #[test]
    fn test_zero_total_is_not_a_counter() {
        assert!(parse(" (1/0) 512").is_empty());
    }

    #[test]
    fn test_garbled_first_group() {
        let trailer = parse(
            " (1/[PRiVATE] \\7768e6b602\\::6f95c8cbe2b3e0a74f49a2f5e3d1/4f8df0724783/) 1 (1/0) (1/0)",
        );
        assert!(trailer.is_empty(), "{trailer:?}");
    }
}
