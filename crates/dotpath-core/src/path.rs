// SPDX-License-Identifier: MIT OR Apache-2.0
//! Dotted path parsing
//!
//! A path string such as `items.0.name` is a sequence of segments joined by
//! `.`. Each segment is either a map key or a list index. There is no escape
//! syntax, so a map key that itself contains `.` cannot be addressed.
//!
//! A segment counts as an index only when it is a canonical non-negative
//! decimal integer: ASCII digits, no sign, and no leading zero unless the
//! segment is exactly `0`. This is the same form produced when list indices
//! are rendered during flattening, so flattened keys parse back to the same
//! segments.

use crate::error::{DotpathError, Result};
use memchr::memchr_iter;
use smallvec::SmallVec;
use std::fmt;
use std::ops::Range;

/// Path separator
pub const SEPARATOR: char = '.';

/// One classified segment of a [`DotPath`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Map key
    Key(&'a str),
    /// List index (saturates at `usize::MAX` for oversized digit strings)
    Index(usize),
}

impl<'a> Segment<'a> {
    /// Classify a raw segment string.
    #[must_use]
    pub fn classify(raw: &'a str) -> Self {
        if is_index(raw) {
            Self::Index(parse_index_saturating(raw))
        } else {
            Self::Key(raw)
        }
    }

    /// Whether this segment addresses a list slot
    #[must_use]
    pub const fn is_index(&self) -> bool {
        matches!(self, Self::Index(_))
    }
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Returns true when `raw` is a canonical list index.
#[must_use]
pub fn is_index(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    match bytes {
        [] => false,
        [b'0'] => true,
        [b'0', ..] => false,
        _ => bytes.iter().all(u8::is_ascii_digit),
    }
}

fn parse_index_saturating(raw: &str) -> usize {
    raw.bytes().fold(0usize, |acc, b| {
        acc.saturating_mul(10).saturating_add(usize::from(b - b'0'))
    })
}

/// A validated dotted path borrowing its source string.
///
/// Holds byte ranges into the original string so that prefixes can be
/// reported in errors without re-joining segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotPath<'a> {
    raw: &'a str,
    ranges: SmallVec<[Range<usize>; 8]>,
}

impl<'a> DotPath<'a> {
    /// Parse and validate a path string.
    ///
    /// # Errors
    /// Returns [`DotpathError::InvalidPath`] when the path is empty or any
    /// segment is empty (leading, trailing, or doubled separators).
    pub fn parse(raw: &'a str) -> Result<Self> {
        if raw.is_empty() {
            return Err(DotpathError::invalid_path(raw, "path is empty"));
        }

        let mut ranges = SmallVec::new();
        let mut start = 0;
        for dot in memchr_iter(b'.', raw.as_bytes()) {
            if dot == start {
                return Err(DotpathError::invalid_path(raw, "empty segment"));
            }
            ranges.push(start..dot);
            start = dot + 1;
        }
        if start == raw.len() {
            return Err(DotpathError::invalid_path(raw, "empty segment"));
        }
        ranges.push(start..raw.len());

        Ok(Self { raw, ranges })
    }

    /// The original path string
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Number of segments (always at least one)
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Always false; a parsed path has at least one segment
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Raw text of segment `i`
    ///
    /// # Panics
    /// Panics if `i >= self.len()`.
    #[must_use]
    pub fn raw_segment(&self, i: usize) -> &'a str {
        &self.raw[self.ranges[i].clone()]
    }

    /// Classified segment `i`
    ///
    /// # Panics
    /// Panics if `i >= self.len()`.
    #[must_use]
    pub fn segment(&self, i: usize) -> Segment<'a> {
        Segment::classify(self.raw_segment(i))
    }

    /// Path text up to and including segment `i`
    ///
    /// # Panics
    /// Panics if `i >= self.len()`.
    #[must_use]
    pub fn prefix(&self, i: usize) -> &'a str {
        &self.raw[..self.ranges[i].end]
    }

    /// Iterate over raw segment strings
    pub fn raw_segments(&self) -> impl ExactSizeIterator<Item = &'a str> + '_ {
        self.ranges.iter().map(|r| &self.raw[r.clone()])
    }

    /// Iterate over classified segments
    pub fn segments(&self) -> impl ExactSizeIterator<Item = Segment<'a>> + '_ {
        self.raw_segments().map(Segment::classify)
    }
}

impl fmt::Display for DotPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let path = DotPath::parse("a.0.b").unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(
            path.segments().collect::<Vec<_>>(),
            vec![Segment::Key("a"), Segment::Index(0), Segment::Key("b")]
        );
    }

    #[test]
    fn test_parse_single_segment() {
        let path = DotPath::parse("name").unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path.segment(0), Segment::Key("name"));
        assert!(!path.is_empty());
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(
            DotPath::parse(""),
            Err(DotpathError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        for bad in [".a", "a.", "a..b", ".", ".."] {
            assert!(
                matches!(DotPath::parse(bad), Err(DotpathError::InvalidPath { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_prefix() {
        let path = DotPath::parse("users.12.email").unwrap();
        assert_eq!(path.prefix(0), "users");
        assert_eq!(path.prefix(1), "users.12");
        assert_eq!(path.prefix(2), "users.12.email");
    }

    #[test]
    fn test_is_index() {
        assert!(is_index("0"));
        assert!(is_index("7"));
        assert!(is_index("120"));
        assert!(!is_index(""));
        assert!(!is_index("01"));
        assert!(!is_index("-1"));
        assert!(!is_index("+1"));
        assert!(!is_index("1.5"));
        assert!(!is_index("1e3"));
        assert!(!is_index(" 1"));
        assert!(!is_index("x"));
    }

    #[test]
    fn test_oversized_index_saturates() {
        assert_eq!(
            Segment::classify("99999999999999999999999999"),
            Segment::Index(usize::MAX)
        );
    }

    #[test]
    fn test_path_display_is_source_text() {
        let path = DotPath::parse("users.12.email").unwrap();
        assert_eq!(path.to_string(), "users.12.email");
        assert_eq!(path.to_string(), path.as_str());
    }

    #[test]
    fn test_segment_display() {
        assert_eq!(Segment::Key("k").to_string(), "k");
        assert_eq!(Segment::Index(42).to_string(), "42");
    }

    mod props {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn rendered_indices_classify_as_indices(n in 0usize..1_000_000) {
                let raw = n.to_string();
                prop_assert_eq!(Segment::classify(&raw), Segment::Index(n));
            }

            #[test]
            fn joined_segments_parse_back(segs in prop::collection::vec("[a-z0-9_]{1,6}", 1..8)) {
                let raw = segs.join(".");
                let path = DotPath::parse(&raw).unwrap();
                let back: Vec<&str> = path.raw_segments().collect();
                prop_assert_eq!(back, segs.iter().map(String::as_str).collect::<Vec<_>>());
            }
        }
    }
}
