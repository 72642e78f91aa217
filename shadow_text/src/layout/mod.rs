// Copyright 2025 the Shadow Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measuring, wrapping and truncating an attributed string.

pub(crate) mod analysis;
mod line_break;
mod truncate;

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

pub use line_break::BreakReason;
pub use truncate::ELLIPSIS;

use self::analysis::{Cluster, StyleCursor};
use self::line_break::{break_lines, visible_width, WIDTH_EPSILON};
use self::truncate::{Ellipsis, Piece, TruncationInput};
use crate::builder::AttributedString;
use crate::config::LineBreakMode;
use crate::metrics::{FontLineMetrics, FontMetrics};

/// Size limits for a layout pass, in logical pixels.
///
/// `f32::INFINITY` means unbounded on that axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constraints {
    /// Maximum line width.
    pub max_width: f32,
    /// Maximum total height.
    pub max_height: f32,
}

impl Default for Constraints {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

impl Constraints {
    /// No limits; measures the intrinsic size.
    pub const UNBOUNDED: Self = Self {
        max_width: f32::INFINITY,
        max_height: f32::INFINITY,
    };

    /// Creates constraints, treating NaN as unbounded and negative values as zero.
    pub fn new(max_width: f32, max_height: f32) -> Self {
        Self {
            max_width: sanitize_limit(max_width),
            max_height: sanitize_limit(max_height),
        }
    }

    /// Width-only constraints.
    pub fn width(max_width: f32) -> Self {
        Self::new(max_width, f32::INFINITY)
    }

    /// Returns `true` if either axis is limited.
    pub fn is_bounded(self) -> bool {
        self.max_width.is_finite() || self.max_height.is_finite()
    }
}

fn sanitize_limit(limit: f32) -> f32 {
    if limit.is_nan() {
        f32::INFINITY
    } else {
        limit.max(0.0)
    }
}

/// One laid-out line.
#[derive(Clone, Debug, PartialEq)]
pub struct LineRecord {
    /// Displayed text, including the ellipsis on a truncated line.
    pub text: String,
    /// Byte range of the source text the line was built from.
    pub text_range: Range<usize>,
    /// Horizontal origin.
    pub x: f32,
    /// Top of the line box.
    pub y: f32,
    /// Advance of the visible content; hanging whitespace is excluded.
    pub width: f32,
    /// Height of the line box.
    pub height: f32,
    /// Largest ascent on the line.
    pub ascent: f32,
    /// Largest descent on the line.
    pub descent: f32,
    /// Largest cap height on the line.
    pub cap_height: f32,
    /// Largest x height on the line.
    pub x_height: f32,
    /// Why the line ended where it did.
    pub break_reason: BreakReason,
}

impl LineRecord {
    fn new(
        text: String,
        text_range: Range<usize>,
        width: f32,
        metrics: &FontLineMetrics,
        height: f32,
    ) -> Self {
        Self {
            text,
            text_range,
            x: 0.0,
            y: 0.0,
            width,
            height,
            ascent: metrics.ascent,
            descent: metrics.descent,
            cap_height: metrics.cap_height,
            x_height: metrics.x_height,
            break_reason: BreakReason::None,
        }
    }

    /// Bottom of the line box.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// The outcome of one layout pass.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutResult {
    /// Width of the widest line.
    pub width: f32,
    /// Sum of the line heights.
    pub height: f32,
    /// Lines in display order.
    pub lines: Vec<LineRecord>,
    /// Some content is not shown.
    pub truncated: bool,
    /// Font scale the lines were measured at.
    pub scale: f32,
}

impl LayoutResult {
    /// A result with no lines.
    pub fn empty(scale: f32) -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            lines: Vec::new(),
            truncated: false,
            scale,
        }
    }

    /// `(width, height)`.
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Returns `true` if the result is within `constraints` and nothing was cut.
    pub fn fits(&self, constraints: Constraints) -> bool {
        !self.truncated
            && self.width <= constraints.max_width + WIDTH_EPSILON
            && self.height <= constraints.max_height + WIDTH_EPSILON
    }
}

/// Parameters of a single measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeasureRequest {
    /// Size limits.
    pub constraints: Constraints,
    /// Maximum number of lines; 0 means unlimited.
    pub max_lines: u32,
    /// Wrapping and truncation policy.
    pub mode: LineBreakMode,
    /// Font scale applied to every size in the string.
    pub scale: f32,
}

impl MeasureRequest {
    /// Returns a copy at another scale.
    #[must_use]
    pub fn at_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

/// Lays out attributed strings against a font metrics provider.
///
/// Measurement is pure: the same string and request always produce an equal result.
#[derive(Clone, Copy)]
pub struct LayoutMeasurer<'a> {
    metrics: &'a dyn FontMetrics,
}

impl core::fmt::Debug for LayoutMeasurer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LayoutMeasurer").finish_non_exhaustive()
    }
}

impl<'a> LayoutMeasurer<'a> {
    /// Creates a measurer over `metrics`.
    pub fn new(metrics: &'a dyn FontMetrics) -> Self {
        Self { metrics }
    }

    /// Lays out `string`.
    ///
    /// Lines stop at `max_lines` when it is nonzero. With a line limit, a line that would
    /// cross `max_height` is dropped as well, though the first line is always kept. When
    /// content is left over, the last line is rewritten according to the mode and the
    /// result is marked truncated.
    pub fn measure(&self, string: &AttributedString, request: &MeasureRequest) -> LayoutResult {
        let scale = request.scale;
        if string.is_empty() {
            return LayoutResult::empty(scale);
        }
        let constraints = request.constraints;
        let max_lines = request.max_lines as usize;
        let mut styles = StyleCursor::new(string, scale);
        let paragraphs = analysis::paragraphs(string.text());
        let measured: Vec<Vec<Cluster>> = paragraphs
            .iter()
            .map(|paragraph| {
                analysis::clusters(
                    string,
                    paragraph.clone(),
                    &mut styles,
                    self.metrics,
                    request.mode.breaks_anywhere(),
                )
            })
            .collect();

        let mut lines: Vec<LineRecord> = Vec::new();
        // Paragraph index and first cluster of the last kept line.
        let mut last = None;
        let mut truncated = false;
        let mut y = 0.0;
        'paragraphs: for (ix, (paragraph, clusters)) in
            paragraphs.iter().zip(&measured).enumerate()
        {
            let broken = if clusters.is_empty() {
                alloc::vec![(0..0, BreakReason::None)]
            } else {
                break_lines(clusters, constraints.max_width)
            };
            for (range, reason) in broken {
                let mut line =
                    self.line(string, paragraph.start, &clusters[range.clone()], &mut styles);
                line.break_reason = reason;
                if max_lines > 0 {
                    let too_many = lines.len() >= max_lines;
                    let too_tall = !lines.is_empty()
                        && y + line.height > constraints.max_height + WIDTH_EPSILON;
                    if too_many || too_tall {
                        truncated = true;
                        break 'paragraphs;
                    }
                }
                line.y = y;
                y += line.height;
                lines.push(line);
                last = Some((ix, range.start));
            }
        }

        if truncated {
            if let (Some((ix, first)), Some(line)) = (last, lines.last_mut()) {
                self.truncate_line(
                    string,
                    request,
                    &paragraphs,
                    &measured,
                    ix,
                    first,
                    line,
                    &mut styles,
                );
            }
        }

        let width = lines.iter().map(|line| line.width).fold(0.0, f32::max);
        let height = lines.last().map_or(0.0, LineRecord::bottom);
        log::trace!(
            "measured {} lines at scale {scale}: {width}x{height}, truncated: {truncated}",
            lines.len()
        );
        LayoutResult {
            width,
            height,
            lines,
            truncated,
            scale,
        }
    }

    fn line(
        &self,
        string: &AttributedString,
        paragraph_start: usize,
        clusters: &[Cluster],
        styles: &mut StyleCursor<'_>,
    ) -> LineRecord {
        let (Some(first), Some(last)) = (clusters.first(), clusters.last()) else {
            let (style, metrics) = styles.at(paragraph_start, self.metrics);
            let height = analysis::line_height(style, &metrics);
            return LineRecord::new(
                String::new(),
                paragraph_start..paragraph_start,
                0.0,
                &metrics,
                height,
            );
        };
        let range = first.range.start..last.range.end;
        let mut metrics = FontLineMetrics::default();
        let mut height: f32 = 0.0;
        for cluster in clusters {
            metrics.ascent = metrics.ascent.max(cluster.metrics.ascent);
            metrics.descent = metrics.descent.max(cluster.metrics.descent);
            metrics.cap_height = metrics.cap_height.max(cluster.metrics.cap_height);
            metrics.x_height = metrics.x_height.max(cluster.metrics.x_height);
            height = height.max(cluster.line_height);
        }
        LineRecord::new(
            String::from(&string.text()[range.clone()]),
            range,
            visible_width(clusters),
            &metrics,
            height,
        )
    }

    fn truncate_line(
        &self,
        string: &AttributedString,
        request: &MeasureRequest,
        paragraphs: &[Range<usize>],
        measured: &[Vec<Cluster>],
        paragraph: usize,
        first: usize,
        line: &mut LineRecord,
        styles: &mut StyleCursor<'_>,
    ) {
        let paragraph_rest = &measured[paragraph][first..];
        let mut text_rest: Vec<Piece> = paragraph_rest.iter().map(Piece::from).collect();
        for next in paragraph + 1..paragraphs.len() {
            let terminator = paragraphs[next - 1].end..paragraphs[next].start;
            let (style, metrics) = styles.at(terminator.start, self.metrics);
            text_rest.push(Piece {
                advance: self.metrics.advance(' ', style) + style.letter_spacing,
                line_height: analysis::line_height(style, &metrics),
                range: terminator,
                whitespace: true,
                separator: true,
                metrics,
            });
            text_rest.extend(measured[next].iter().map(Piece::from));
        }

        let (style, metrics) = styles.at(line.text_range.start, self.metrics);
        let ellipsis = Ellipsis {
            advance: self.metrics.advance(ELLIPSIS, style) + style.letter_spacing,
            line_height: analysis::line_height(style, &metrics),
            metrics,
        };
        let input = TruncationInput {
            source: string.text(),
            mode: request.mode,
            paragraph_rest,
            text_rest: &text_rest,
            natural_width: line.width,
            max_width: request.constraints.max_width,
            ellipsis,
        };
        if let Some(rewritten) = truncate::truncate(&input) {
            log::trace!("last line {:?} rewritten as {:?}", line.text, rewritten.text);
            let (y, break_reason) = (line.y, line.break_reason);
            *line = LineRecord::new(
                rewritten.text,
                rewritten.range,
                rewritten.width,
                &rewritten.metrics,
                rewritten.line_height,
            );
            line.y = y;
            line.break_reason = break_reason;
        }
    }
}
