// Copyright 2025 the Shadow Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use crate::text_range::validate_range;
use crate::{Error, Span};

/// A string with attributes applied to sorted, non-overlapping byte ranges.
///
/// Spans must be applied in order: each new span has to start at or after the end of
/// the previously applied one. Empty spans carry no text and are dropped.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttributedText<Attr> {
    text: String,
    spans: Vec<Span<Attr>>,
}

impl<Attr> AttributedText<Attr> {
    /// Create an `AttributedText` with no attributes applied.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spans: Vec::new(),
        }
    }

    /// Borrow the underlying text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the length of the text, in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if the text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Apply `attribute` to `range`.
    ///
    /// Fails if the range is malformed, out of bounds, splits a codepoint, or begins
    /// before the end of the last applied span.
    pub fn apply_attribute(&mut self, range: Range<usize>, attribute: Attr) -> Result<(), Error> {
        validate_range(&self.text, &range)?;
        if range.is_empty() {
            return Ok(());
        }
        if let Some(last) = self.spans.last() {
            if range.start < last.range.end {
                return Err(Error::overlapping(
                    &range,
                    self.text.len(),
                    last.range.clone(),
                ));
            }
        }
        self.spans.push(Span::new(range, attribute));
        Ok(())
    }

    /// All spans, sorted by start offset.
    pub fn spans(&self) -> &[Span<Attr>] {
        &self.spans
    }

    /// Number of applied spans.
    pub fn spans_len(&self) -> usize {
        self.spans.len()
    }

    /// The span covering byte `index`, if any.
    pub fn span_at(&self, index: usize) -> Option<&Span<Attr>> {
        // First span ending after `index`; since spans are sorted and disjoint it is the
        // only candidate.
        let ix = self.spans.partition_point(|span| span.range.end <= index);
        self.spans.get(ix).filter(|span| span.contains(index))
    }

    /// Spans sharing at least one byte with `range`, in order.
    pub fn spans_in(&self, range: Range<usize>) -> impl Iterator<Item = &Span<Attr>> + '_ {
        let first = self.spans.partition_point(|span| span.range.end <= range.start);
        self.spans[first..]
            .iter()
            .take_while(move |span| span.range.start < range.end)
    }

    /// Remove all spans, keeping the text.
    pub fn clear_spans(&mut self) {
        self.spans.clear();
    }

    /// Split into the text and its spans.
    pub fn into_parts(self) -> (String, Vec<Span<Attr>>) {
        (self.text, self.spans)
    }
}

#[cfg(test)]
mod tests {
    use crate::{AttributedText, ErrorKind};
    use alloc::format;
    use alloc::vec::Vec;

    #[derive(Debug, PartialEq)]
    enum Mark {
        Strong,
        Code,
    }

    #[test]
    fn lookups_use_sorted_spans() {
        let mut text = AttributedText::new("bold and code");
        text.apply_attribute(0..4, Mark::Strong).unwrap();
        text.apply_attribute(9..13, Mark::Code).unwrap();

        assert_eq!(text.span_at(0).map(|s| &s.attr), Some(&Mark::Strong));
        assert_eq!(text.span_at(3).map(|s| &s.attr), Some(&Mark::Strong));
        assert!(text.span_at(4).is_none());
        assert!(text.span_at(8).is_none());
        assert_eq!(text.span_at(12).map(|s| &s.attr), Some(&Mark::Code));
        assert!(text.span_at(13).is_none());

        let hit: Vec<_> = text.spans_in(2..10).map(|s| &s.attr).collect();
        assert_eq!(hit, [&Mark::Strong, &Mark::Code]);
        assert_eq!(text.spans_in(4..9).count(), 0);
    }

    #[test]
    fn rejects_overlap_and_disorder() {
        let mut text = AttributedText::new("abcdefgh");
        text.apply_attribute(2..5, Mark::Strong).unwrap();

        let err = text.apply_attribute(4..6, Mark::Code).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overlapping);
        assert_eq!(err.conflict(), Some(2..5));
        assert!(format!("{err}").contains("overlaps"));

        let err = text.apply_attribute(0..1, Mark::Code).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overlapping);

        // Touching is fine.
        assert!(text.apply_attribute(5..6, Mark::Code).is_ok());
        assert_eq!(text.spans_len(), 2);
    }

    #[test]
    fn empty_spans_are_dropped() {
        let mut text = AttributedText::new("abc");
        text.apply_attribute(1..1, Mark::Strong).unwrap();
        assert_eq!(text.spans_len(), 0);
    }

    #[test]
    fn boundary_errors_carry_context() {
        let mut text = AttributedText::new("éclair");
        let err = text.apply_attribute(1..3, Mark::Code).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotOnCharBoundary);
        let msg = format!("{err}");
        assert!(msg.contains("start index 1"));
        assert!(msg.contains("char 0..2"));

        let err = text.apply_attribute(0..9, Mark::Code).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidBounds);
        assert!(format!("{err}").contains("len 7"));
    }
}
