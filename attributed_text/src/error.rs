// Copyright 2025 the Shadow Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::ops::Range;

/// Error returned when a span cannot be applied to an [`AttributedText`].
///
/// Carries a non-exhaustive [`ErrorKind`] together with the rejected range, the text
/// length at the time of the failure and, depending on the kind, either the UTF-8
/// character enclosing the offending index or the existing span it collided with.
///
/// [`AttributedText`]: crate::AttributedText
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    start: usize,
    end: usize,
    len: usize,
    boundary: Option<BoundaryInfo>,
    conflict: Option<Range<usize>>,
}

#[expect(
    clippy::len_without_is_empty,
    reason = "`Error::len` reports the text length for context, it is not a container."
)]
impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The start byte index of the rejected range.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The end byte index (exclusive) of the rejected range.
    pub fn end(&self) -> usize {
        self.end
    }

    /// The length in bytes of the text when the error occurred.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Details about the misaligned endpoint for [`ErrorKind::NotOnCharBoundary`].
    pub fn boundary(&self) -> Option<BoundaryInfo> {
        self.boundary
    }

    /// The range of the existing span for [`ErrorKind::Overlapping`].
    pub fn conflict(&self) -> Option<Range<usize>> {
        self.conflict.clone()
    }

    fn new(kind: ErrorKind, range: &Range<usize>, len: usize) -> Self {
        Self {
            kind,
            start: range.start,
            end: range.end,
            len,
            boundary: None,
            conflict: None,
        }
    }

    pub(crate) fn invalid_bounds(range: &Range<usize>, len: usize) -> Self {
        Self::new(ErrorKind::InvalidBounds, range, len)
    }

    pub(crate) fn invalid_range(range: &Range<usize>, len: usize) -> Self {
        Self::new(ErrorKind::InvalidRange, range, len)
    }

    pub(crate) fn overlapping(range: &Range<usize>, len: usize, existing: Range<usize>) -> Self {
        Self {
            conflict: Some(existing),
            ..Self::new(ErrorKind::Overlapping, range, len)
        }
    }

    pub(crate) fn not_on_char_boundary(
        text: &str,
        range: &Range<usize>,
        which: Endpoint,
        index: usize,
    ) -> Self {
        let (char_start, char_end) = enclosing_char(text, index);
        Self {
            boundary: Some(BoundaryInfo {
                which,
                index,
                char_start,
                char_end,
            }),
            ..Self::new(ErrorKind::NotOnCharBoundary, range, text.len())
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::InvalidBounds => write!(
                f,
                "range {}..{} out of bounds for len {}",
                self.start, self.end, self.len
            ),
            ErrorKind::InvalidRange => {
                write!(f, "invalid range {}..{}: start > end", self.start, self.end)
            }
            ErrorKind::NotOnCharBoundary => match self.boundary {
                Some(b) => write!(
                    f,
                    "range {}..{}: {} index {} not on UTF-8 boundary (char {}..{})",
                    self.start, self.end, b.which, b.index, b.char_start, b.char_end
                ),
                None => write!(
                    f,
                    "range {}..{} not on UTF-8 boundary",
                    self.start, self.end
                ),
            },
            ErrorKind::Overlapping => match &self.conflict {
                Some(existing) => write!(
                    f,
                    "range {}..{} overlaps or precedes span {}..{}",
                    self.start, self.end, existing.start, existing.end
                ),
                None => write!(f, "range {}..{} overlaps a span", self.start, self.end),
            },
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an [`Error`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Range indices were past the end of the text.
    InvalidBounds,

    /// The range had `start > end`.
    InvalidRange,

    /// An endpoint was not aligned to a UTF-8 character boundary.
    NotOnCharBoundary,

    /// The range starts before the end of the last applied span.
    Overlapping,
}

/// Identifies which endpoint of a range failed boundary validation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// The `start` endpoint of the range.
    Start,

    /// The `end` endpoint of the range.
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::End => "end",
        })
    }
}

/// Details about an index that was not on a UTF-8 character boundary.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoundaryInfo {
    /// Which endpoint was invalid.
    pub which: Endpoint,

    /// The offending byte index.
    pub index: usize,

    /// The start byte index of the enclosing codepoint.
    pub char_start: usize,

    /// The end byte index (exclusive) of the enclosing codepoint.
    pub char_end: usize,
}

/// Byte span of the codepoint containing `index`.
///
/// `index` must be within the text and not itself a boundary, which validation has
/// already established when this is called.
fn enclosing_char(text: &str, index: usize) -> (usize, usize) {
    let start = (0..index)
        .rev()
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(0);
    let end = (index + 1..=text.len())
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(text.len());
    (start, end)
}
