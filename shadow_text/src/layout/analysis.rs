// Copyright 2025 the Shadow Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Splitting text into paragraphs and measured grapheme clusters.

use alloc::vec::Vec;
use core::ops::Range;

use icu_segmenter::{GraphemeClusterSegmenter, LineSegmenter};

use crate::builder::AttributedString;
use crate::metrics::{FontLineMetrics, FontMetrics};
use crate::style::ResolvedStyle;

/// One grapheme cluster with everything line breaking needs to know about it.
#[derive(Clone, Debug)]
pub(crate) struct Cluster {
    /// Byte range in the attributed string.
    pub(crate) range: Range<usize>,
    pub(crate) advance: f32,
    pub(crate) whitespace: bool,
    /// A line may start at this cluster.
    pub(crate) break_before: bool,
    pub(crate) metrics: FontLineMetrics,
    /// Height this cluster asks of its line.
    pub(crate) line_height: f32,
}

/// Byte ranges of the paragraphs of `text`, without their terminators.
///
/// A terminator at the very end still opens a final empty paragraph.
pub(crate) fn paragraphs(text: &str) -> Vec<Range<usize>> {
    let mut paragraphs = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((ix, ch)) = chars.next() {
        let terminator_len = match ch {
            '\r' => match chars.peek() {
                Some(&(_, '\n')) => {
                    chars.next();
                    2
                }
                _ => 1,
            },
            '\n' | '\u{2028}' | '\u{2029}' => ch.len_utf8(),
            _ => continue,
        };
        paragraphs.push(start..ix);
        start = ix + terminator_len;
    }
    paragraphs.push(start..text.len());
    paragraphs
}

/// Tracks the resolved style across consecutive clusters so it is only recomputed when a
/// run or span boundary is crossed.
pub(crate) struct StyleCursor<'a> {
    string: &'a AttributedString,
    boundaries: Vec<usize>,
    scale: f32,
    current: Option<(Range<usize>, ResolvedStyle, FontLineMetrics)>,
}

impl<'a> StyleCursor<'a> {
    pub(crate) fn new(string: &'a AttributedString, scale: f32) -> Self {
        Self {
            string,
            boundaries: string.style_boundaries(),
            scale,
            current: None,
        }
    }

    pub(crate) fn at(
        &mut self,
        index: usize,
        metrics: &dyn FontMetrics,
    ) -> (&ResolvedStyle, FontLineMetrics) {
        let current = match self.current.take() {
            Some(current) if current.0.contains(&index) => current,
            _ => {
                let next = self.boundaries.partition_point(|&b| b <= index);
                let start = next.checked_sub(1).map_or(0, |ix| self.boundaries[ix]);
                let end = self.boundaries.get(next).copied().unwrap_or(usize::MAX);
                let style = self.string.resolve(index, self.scale);
                let line = metrics.line_metrics(&style);
                (start..end, style, line)
            }
        };
        let (_, style, line) = self.current.insert(current);
        (style, *line)
    }
}

/// Effective line height of a style with the given font metrics.
pub(crate) fn line_height(style: &ResolvedStyle, metrics: &FontLineMetrics) -> f32 {
    style.line_height.unwrap_or_else(|| metrics.line_height())
}

/// Measures the clusters of one paragraph.
///
/// With `break_anywhere`, every grapheme boundary is a break opportunity; otherwise only
/// UAX #14 line break opportunities are.
pub(crate) fn clusters(
    string: &AttributedString,
    paragraph: Range<usize>,
    styles: &mut StyleCursor<'_>,
    metrics: &dyn FontMetrics,
    break_anywhere: bool,
) -> Vec<Cluster> {
    let text = &string.text()[paragraph.clone()];
    if text.is_empty() {
        return Vec::new();
    }
    let line_breaks: Vec<usize> = if break_anywhere {
        Vec::new()
    } else {
        LineSegmenter::new_auto(Default::default())
            .segment_str(text)
            .collect()
    };
    let graphemes: Vec<usize> = GraphemeClusterSegmenter::new().segment_str(text).collect();

    let mut clusters = Vec::with_capacity(graphemes.len().saturating_sub(1));
    for bounds in graphemes.windows(2) {
        let (start, end) = (bounds[0], bounds[1]);
        if start == end {
            continue;
        }
        let grapheme = &text[start..end];
        let absolute = paragraph.start + start..paragraph.start + end;
        let (style, line) = styles.at(absolute.start, metrics);
        let advance = metrics.text_advance(grapheme, style) + style.letter_spacing;
        let break_before =
            start != 0 && (break_anywhere || line_breaks.binary_search(&start).is_ok());
        clusters.push(Cluster {
            range: absolute,
            advance,
            whitespace: grapheme.chars().all(char::is_whitespace),
            break_before,
            metrics: line,
            line_height: line_height(style, &line),
        });
    }
    clusters
}
