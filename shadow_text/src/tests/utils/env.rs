// Copyright 2025 the Shadow Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::builder::{AttributedString, AttributedStringBuilder};
use crate::config::{LineBreakMode, MarkdownTheme, TextConfig, TextProperty};
use crate::fragment::TextFragment;
use crate::layout::{Constraints, LayoutMeasurer, LayoutResult, MeasureRequest};
use crate::metrics::FixedMetrics;
use crate::style::TextStyle;

/// With [`FixedMetrics`] every glyph is half this wide and lines are exactly this tall.
pub(crate) const TEST_FONT_SIZE: f32 = 10.0;

pub(crate) fn sized(size: f32) -> TextStyle {
    TextStyle {
        font_size: size,
        ..TextStyle::default()
    }
}

pub(crate) fn line_texts(result: &LayoutResult) -> Vec<&str> {
    result.lines.iter().map(|line| line.text.as_str()).collect()
}

/// Measures single-style text with fixed metrics.
pub(crate) struct TestEnv {
    metrics: FixedMetrics,
    config: TextConfig,
    theme: MarkdownTheme,
}

impl TestEnv {
    pub(crate) fn new() -> Self {
        Self {
            metrics: FixedMetrics::default(),
            config: TextConfig::default(),
            theme: MarkdownTheme::default(),
        }
    }

    pub(crate) fn with(mut self, property: TextProperty) -> Self {
        self.config = self.config.apply(property);
        self
    }

    pub(crate) fn mode(self, mode: LineBreakMode) -> Self {
        self.with(TextProperty::LineBreakMode(mode))
    }

    pub(crate) fn max_lines(self, lines: u32) -> Self {
        self.with(TextProperty::MaximumNumberOfLines(lines))
    }

    pub(crate) fn metrics(&self) -> &FixedMetrics {
        &self.metrics
    }

    pub(crate) fn string(&self, text: &str) -> AttributedString {
        self.string_from(&[TextFragment::new(0, text, sized(TEST_FONT_SIZE))])
    }

    pub(crate) fn string_from(&self, fragments: &[TextFragment]) -> AttributedString {
        AttributedStringBuilder::new(fragments)
            .markdown_opt(self.config.parse_basic_markdown.then_some(self.theme))
            .build()
    }

    pub(crate) fn request(&self, constraints: Constraints) -> MeasureRequest {
        MeasureRequest {
            constraints,
            max_lines: self.config.maximum_number_of_lines,
            mode: self.config.line_break_mode,
            scale: 1.0,
        }
    }

    pub(crate) fn measure(&self, text: &str, constraints: Constraints) -> LayoutResult {
        self.measure_string(&self.string(text), constraints)
    }

    pub(crate) fn measure_string(
        &self,
        string: &AttributedString,
        constraints: Constraints,
    ) -> LayoutResult {
        LayoutMeasurer::new(&self.metrics).measure(string, &self.request(constraints))
    }
}
