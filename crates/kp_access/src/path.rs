//! The path grammar and its parser.

use alloc::borrow::Cow;
use core::fmt;

use crate::segment::{OffsetSegment, Segment};

// -----------------------------------------------------------------------------
// ParseError

/// An invalid path string, reported before any field access happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError<'a> {
    /// Byte position in `path`.
    pub offset: usize,
    /// The path that the error occurred in.
    pub path: &'a str,
    /// The underlying error.
    pub error: Cow<'a, str>,
}

impl fmt::Display for ParseError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid path `{}`: {} at offset {}",
            self.path, self.error, self.offset,
        )
    }
}

impl core::error::Error for ParseError<'_> {}

// -----------------------------------------------------------------------------
// AccessPath

/// A type that can be parsed as an access path.
///
/// This lets callers supply their own path representation; the crate
/// provides the implementation for [`&str`] using the dotted grammar
/// described in the crate docs: `segment ("." segment)*`, where a segment
/// is one or more non-`.` characters.
///
/// [`&str`]: str
pub trait AccessPath<'a> {
    /// Parses the path and returns an iterator of [`OffsetSegment`].
    fn parse_to_segments(&self)
    -> impl Iterator<Item = Result<OffsetSegment<'a>, ParseError<'a>>>;
}

impl<'a> AccessPath<'a> for &'a str {
    fn parse_to_segments(
        &self,
    ) -> impl Iterator<Item = Result<OffsetSegment<'a>, ParseError<'a>>> {
        SplitSegments {
            path: *self,
            cursor: 0,
            halted: false,
        }
    }
}

// -----------------------------------------------------------------------------
// Parser

struct SplitSegments<'a> {
    path: &'a str,
    cursor: usize,
    halted: bool,
}

impl<'a> SplitSegments<'a> {
    fn fail(&mut self, offset: usize, error: &'static str) -> ParseError<'a> {
        self.halted = true;
        ParseError {
            offset,
            path: self.path,
            error: Cow::Borrowed(error),
        }
    }
}

impl<'a> Iterator for SplitSegments<'a> {
    type Item = Result<OffsetSegment<'a>, ParseError<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.halted {
            return None;
        }

        let offset = self.cursor;
        let rest = &self.path[offset..];

        let segment = match rest.find('.') {
            Some(index) => {
                self.cursor += index + 1;
                &rest[..index]
            }
            None => {
                self.halted = true;
                rest
            }
        };

        if segment.is_empty() {
            let error = if self.path.is_empty() {
                "empty path"
            } else {
                "empty segment"
            };
            return Some(Err(self.fail(offset, error)));
        }

        Some(Ok(OffsetSegment {
            segment: Segment::new(segment),
            offset: Some(offset),
        }))
    }
}

// -----------------------------------------------------------------------------
// Tests
