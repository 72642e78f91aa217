// Copyright 2025 the Shadow Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rewriting the last retained line when content remains after it.

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use super::analysis::Cluster;
use super::line_break::WIDTH_EPSILON;
use crate::config::LineBreakMode;
use crate::metrics::FontLineMetrics;

/// Marker placed where text was cut.
pub const ELLIPSIS: char = '\u{2026}';

/// Something that can be placed on the truncated line: a cluster, or a space standing in
/// for a hard line break.
#[derive(Clone, Debug)]
pub(crate) struct Piece {
    pub(crate) range: Range<usize>,
    pub(crate) advance: f32,
    pub(crate) whitespace: bool,
    pub(crate) separator: bool,
    pub(crate) metrics: FontLineMetrics,
    pub(crate) line_height: f32,
}

impl From<&Cluster> for Piece {
    fn from(cluster: &Cluster) -> Self {
        Self {
            range: cluster.range.clone(),
            advance: cluster.advance,
            whitespace: cluster.whitespace,
            separator: false,
            metrics: cluster.metrics,
            line_height: cluster.line_height,
        }
    }
}

/// The measured ellipsis marker.
#[derive(Clone, Debug)]
pub(crate) struct Ellipsis {
    pub(crate) advance: f32,
    pub(crate) metrics: FontLineMetrics,
    pub(crate) line_height: f32,
}

/// Content of a rewritten line.
#[derive(Clone, Debug, Default)]
pub(crate) struct TruncatedLine {
    pub(crate) text: String,
    pub(crate) range: Range<usize>,
    pub(crate) width: f32,
    pub(crate) metrics: FontLineMetrics,
    pub(crate) line_height: f32,
}

impl TruncatedLine {
    fn push(&mut self, source: &str, pieces: &[Piece]) {
        for piece in pieces {
            if piece.separator {
                self.text.push(' ');
            } else {
                self.text.push_str(&source[piece.range.clone()]);
            }
            self.width += piece.advance;
            self.grow(&piece.metrics, piece.line_height);
        }
    }

    fn push_ellipsis(&mut self, ellipsis: &Ellipsis) {
        self.text.push(ELLIPSIS);
        self.width += ellipsis.advance;
        self.grow(&ellipsis.metrics, ellipsis.line_height);
    }

    fn grow(&mut self, metrics: &FontLineMetrics, line_height: f32) {
        self.metrics.ascent = self.metrics.ascent.max(metrics.ascent);
        self.metrics.descent = self.metrics.descent.max(metrics.descent);
        self.metrics.leading = self.metrics.leading.max(metrics.leading);
        self.metrics.cap_height = self.metrics.cap_height.max(metrics.cap_height);
        self.metrics.x_height = self.metrics.x_height.max(metrics.x_height);
        self.line_height = self.line_height.max(line_height);
    }
}

/// Inputs for rewriting the last line.
#[derive(Debug)]
pub(crate) struct TruncationInput<'a> {
    pub(crate) source: &'a str,
    pub(crate) mode: LineBreakMode,
    /// Clusters from the start of the last line to the end of its paragraph.
    pub(crate) paragraph_rest: &'a [Cluster],
    /// Everything from the start of the last line to the end of the text, with line breaks
    /// as separator pieces.
    pub(crate) text_rest: &'a [Piece],
    /// Width of the last line as it was broken.
    pub(crate) natural_width: f32,
    pub(crate) max_width: f32,
    pub(crate) ellipsis: Ellipsis,
}

/// Rewrites the last line, or returns `None` for modes that keep it as broken.
pub(crate) fn truncate(input: &TruncationInput<'_>) -> Option<TruncatedLine> {
    let ellipsis = &input.ellipsis;
    let mut line = TruncatedLine::default();
    match input.mode {
        LineBreakMode::WordWrap | LineBreakMode::CharWrap => return None,
        LineBreakMode::Clip => {
            let pieces: Vec<Piece> = input.paragraph_rest.iter().map(Piece::from).collect();
            // A clipped line shows at least its first grapheme, even if cut by the edge.
            let end = prefix_fitting(&pieces, input.max_width).max(pieces.len().min(1));
            line.range = span(&pieces[..end], input.paragraph_start());
            line.push(input.source, &pieces[..end]);
        }
        LineBreakMode::TruncateTail => {
            let pieces: Vec<Piece> = input.paragraph_rest.iter().map(Piece::from).collect();
            let end = prefix_fitting(&pieces, input.max_width - ellipsis.advance);
            line.range = span(&pieces[..end], input.paragraph_start());
            line.push(input.source, &pieces[..end]);
            line.push_ellipsis(ellipsis);
        }
        LineBreakMode::TruncateHead => {
            let pieces = input.text_rest;
            let budget = input.budget() - ellipsis.advance;
            let start = suffix_fitting(pieces, budget, 1.min(pieces.len()));
            line.push_ellipsis(ellipsis);
            line.range = span(&pieces[start..], input.text_end());
            line.push(input.source, &pieces[start..]);
        }
        LineBreakMode::TruncateMiddle => {
            let pieces = input.text_rest;
            let budget = input.budget() - ellipsis.advance;
            // At least one visible piece is left out, or there is nothing to mark.
            let last_visible = pieces.iter().rposition(|p| !p.whitespace).unwrap_or(0);
            let limit = (pieces.len() / 2).min(last_visible);
            let end = prefix_fitting(&pieces[..limit], budget * 0.5);
            let used = width(&pieces[..end]);
            let hidden = pieces[end..]
                .iter()
                .position(|p| !p.whitespace)
                .map_or(pieces.len(), |ix| end + ix + 1);
            let start = suffix_fitting(pieces, budget - used, hidden);
            line.range = match (pieces.first(), pieces.last()) {
                (Some(first), Some(last)) => first.range.start..last.range.end,
                _ => input.text_end()..input.text_end(),
            };
            line.push(input.source, &pieces[..end]);
            line.push_ellipsis(ellipsis);
            line.push(input.source, &pieces[start..]);
        }
    }
    Some(line)
}

impl TruncationInput<'_> {
    /// Width available to head and middle truncation.
    ///
    /// Without a width constraint those modes keep the line as wide as it was broken.
    fn budget(&self) -> f32 {
        if self.max_width.is_finite() {
            self.max_width
        } else {
            self.natural_width + self.ellipsis.advance
        }
    }

    fn paragraph_start(&self) -> usize {
        match (self.paragraph_rest.first(), self.text_rest.first()) {
            (Some(cluster), _) => cluster.range.start,
            (None, Some(piece)) => piece.range.start,
            (None, None) => self.text_end(),
        }
    }

    fn text_end(&self) -> usize {
        self.text_rest
            .last()
            .map_or(self.source.len(), |piece| piece.range.end)
    }
}

fn width(pieces: &[Piece]) -> f32 {
    pieces.iter().map(|p| p.advance).sum()
}

fn span(pieces: &[Piece], empty_at: usize) -> Range<usize> {
    match (pieces.first(), pieces.last()) {
        (Some(first), Some(last)) => first.range.start..last.range.end,
        _ => empty_at..empty_at,
    }
}

/// Number of leading pieces that fit in `budget`, without trailing whitespace.
fn prefix_fitting(pieces: &[Piece], budget: f32) -> usize {
    let mut x = 0.0;
    let mut end = 0;
    for (ix, piece) in pieces.iter().enumerate() {
        if !piece.whitespace && x + piece.advance > budget + WIDTH_EPSILON {
            break;
        }
        x += piece.advance;
        end = ix + 1;
    }
    while end > 0 && pieces[end - 1].whitespace {
        end -= 1;
    }
    end
}

/// Index of the first piece of the longest suffix that fits in `budget` and starts no
/// earlier than `min_start`, without leading whitespace.
fn suffix_fitting(pieces: &[Piece], budget: f32, min_start: usize) -> usize {
    let mut x = 0.0;
    let mut start = pieces.len();
    for ix in (min_start..pieces.len()).rev() {
        let piece = &pieces[ix];
        if !piece.whitespace && x + piece.advance > budget + WIDTH_EPSILON {
            break;
        }
        x += piece.advance;
        start = ix;
    }
    while start < pieces.len() && pieces[start].whitespace {
        start += 1;
    }
    start
}
