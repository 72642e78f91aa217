// Copyright 2025 the Shadow Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction of the attributed string a text node measures.

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use attributed_text::{AttributedText, Span};
use peniko::Color;

use crate::config::MarkdownTheme;
use crate::fragment::TextFragment;
use crate::markup::{self, MarkKind, OffsetMap};
use crate::style::{FontWeight, ResolvedStyle, TextStyle};

/// Style override carried by a markup span.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpanStyle {
    /// Bold weight.
    Bold,
    /// Inline code colors.
    Code {
        /// Background fill behind the span.
        background: Color,
        /// Text color inside the span.
        foreground: Color,
    },
}

/// The byte range covered by one fragment, with that fragment's style.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleRun {
    /// Range in the rendered text.
    pub range: Range<usize>,
    /// Sanitized fragment style.
    pub style: TextStyle,
}

/// Concatenated fragment text with fragment style runs and markup spans.
///
/// Runs tile the text in order. Spans are sorted and never overlap.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributedString {
    text: AttributedText<SpanStyle>,
    runs: Vec<StyleRun>,
    base_style: TextStyle,
}

impl Default for AttributedString {
    fn default() -> Self {
        Self {
            text: AttributedText::new(String::new()),
            runs: Vec::new(),
            base_style: TextStyle::default(),
        }
    }
}

impl AttributedString {
    /// The rendered text.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Length of the rendered text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if there is no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Markup spans in order.
    pub fn spans(&self) -> &[Span<SpanStyle>] {
        self.text.spans()
    }

    /// Fragment style runs in order.
    pub fn runs(&self) -> &[StyleRun] {
        &self.runs
    }

    /// The style of the first fragment, used where no run applies.
    pub fn base_style(&self) -> &TextStyle {
        &self.base_style
    }

    /// Fragment style in effect at byte `index`.
    ///
    /// An index at the end of the text gets the style of the last run.
    pub fn run_style_at(&self, index: usize) -> &TextStyle {
        let ix = self.runs.partition_point(|run| run.range.end <= index);
        self.runs
            .get(ix)
            .or_else(|| self.runs.last())
            .map_or(&self.base_style, |run| &run.style)
    }

    /// The measured style at byte `index`, with markup applied and `scale` folded in.
    pub fn resolve(&self, index: usize, scale: f32) -> ResolvedStyle {
        let mut style = ResolvedStyle::new(self.run_style_at(index), scale);
        match self.text.span_at(index).map(|span| span.attr) {
            Some(SpanStyle::Bold) => {
                if style.font_weight < FontWeight::BOLD {
                    style.font_weight = FontWeight::BOLD;
                }
            }
            Some(SpanStyle::Code {
                background,
                foreground,
            }) => {
                style.background = Some(background);
                style.color = foreground;
            }
            None => {}
        }
        style
    }

    /// Byte offsets where the resolved style may change, including 0 and the end.
    pub fn style_boundaries(&self) -> Vec<usize> {
        let mut boundaries: Vec<usize> = self
            .runs
            .iter()
            .flat_map(|run| [run.range.start, run.range.end])
            .chain(
                self.spans()
                    .iter()
                    .flat_map(|span| [span.range.start, span.range.end]),
            )
            .chain([0, self.len()])
            .collect();
        boundaries.sort_unstable();
        boundaries.dedup();
        boundaries
    }
}

/// Merges ordered fragments into one [`AttributedString`].
///
/// The builder is pure: the same fragments and markup settings always produce an equal
/// string.
#[must_use]
#[derive(Debug)]
pub struct AttributedStringBuilder<'a> {
    fragments: &'a [TextFragment],
    markdown: Option<MarkdownTheme>,
}

impl<'a> AttributedStringBuilder<'a> {
    /// Starts a builder over `fragments`, which may be in any order.
    pub fn new(fragments: &'a [TextFragment]) -> Self {
        Self {
            fragments,
            markdown: None,
        }
    }

    /// Enables markup recognition, styling code spans with `theme`.
    pub fn markdown(mut self, theme: MarkdownTheme) -> Self {
        self.markdown = Some(theme);
        self
    }

    /// Enables markup when `theme` is `Some`.
    pub fn markdown_opt(mut self, theme: Option<MarkdownTheme>) -> Self {
        self.markdown = theme;
        self
    }

    /// Builds the attributed string.
    pub fn build(self) -> AttributedString {
        let mut ordered: Vec<&TextFragment> = self.fragments.iter().collect();
        // Stable, so siblings that share a position keep their insertion order.
        ordered.sort_by_key(|fragment| fragment.position());

        let mut source = String::new();
        let mut source_runs = Vec::with_capacity(ordered.len());
        for fragment in &ordered {
            let start = source.len();
            source.push_str(fragment.text());
            source_runs.push((start..source.len(), fragment.style().sanitized()));
        }
        let base_style = source_runs
            .first()
            .map(|(_, style)| style.clone())
            .unwrap_or_default();

        let pairs = match self.markdown {
            Some(_) => markup::scan(&source),
            None => Vec::new(),
        };
        let map = OffsetMap::new(&pairs);

        let mut rendered = String::with_capacity(source.len());
        let mut cursor = 0;
        for removed in map.removed() {
            rendered.push_str(&source[cursor..removed.start]);
            cursor = removed.end;
        }
        rendered.push_str(&source[cursor..]);

        let runs = source_runs
            .into_iter()
            .map(|(range, style)| StyleRun {
                range: map.map(range.start)..map.map(range.end),
                style,
            })
            .filter(|run| !run.range.is_empty())
            .collect();

        let mut text = AttributedText::new(rendered);
        if let Some(theme) = self.markdown {
            for pair in &pairs {
                let content = pair.content();
                let range = map.map(content.start)..map.map(content.end);
                let style = match pair.kind {
                    MarkKind::Bold => SpanStyle::Bold,
                    MarkKind::Code => SpanStyle::Code {
                        background: theme.code_background,
                        foreground: theme.code_foreground,
                    },
                };
                if let Err(err) = text.apply_attribute(range, style) {
                    log::warn!("dropping markup span: {err}");
                }
            }
        }

        AttributedString {
            text,
            runs,
            base_style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AttributedStringBuilder, SpanStyle};
    use crate::config::MarkdownTheme;
    use crate::fragment::TextFragment;
    use crate::style::{FontWeight, TextStyle};

    fn sized(size: f32) -> TextStyle {
        TextStyle {
            font_size: size,
            ..TextStyle::default()
        }
    }

    #[test]
    fn runs_follow_sibling_order() {
        let fragments = [
            TextFragment::new(1, "world", sized(20.0)),
            TextFragment::new(0, "hello ", sized(10.0)),
        ];
        let string = AttributedStringBuilder::new(&fragments).build();
        assert_eq!(string.text(), "hello world");
        assert_eq!(string.runs().len(), 2);
        assert_eq!(string.runs()[0].range, 0..6);
        assert_eq!(string.runs()[0].style.font_size, 10.0);
        assert_eq!(string.runs()[1].range, 6..11);
        assert_eq!(string.run_style_at(11).font_size, 20.0);
    }

    #[test]
    fn markup_ignored_when_disabled() {
        let fragments = [TextFragment::new(0, "**bold**", TextStyle::default())];
        let string = AttributedStringBuilder::new(&fragments).build();
        assert_eq!(string.text(), "**bold**");
        assert!(string.spans().is_empty());
    }

    #[test]
    fn markup_spanning_fragments_remaps_runs() {
        let fragments = [
            TextFragment::new(0, "a **b", sized(10.0)),
            TextFragment::new(1, "c** d", sized(20.0)),
        ];
        let string = AttributedStringBuilder::new(&fragments)
            .markdown(MarkdownTheme::default())
            .build();
        assert_eq!(string.text(), "a bc d");
        assert_eq!(string.runs()[0].range, 0..3);
        assert_eq!(string.runs()[1].range, 3..6);
        assert_eq!(string.spans().len(), 1);
        assert_eq!(string.spans()[0].range, 2..4);

        let bold = string.resolve(3, 1.0);
        assert_eq!(bold.font_weight, FontWeight::BOLD);
        assert_eq!(bold.font_size, 20.0);
        assert_eq!(string.resolve(5, 1.0).font_weight, FontWeight::NORMAL);
    }

    #[test]
    fn code_spans_use_theme_colors() {
        let theme = MarkdownTheme::default();
        let fragments = [TextFragment::new(0, "run `ls`", TextStyle::default())];
        let string = AttributedStringBuilder::new(&fragments)
            .markdown(theme)
            .build();
        assert_eq!(
            string.spans()[0].attr,
            SpanStyle::Code {
                background: theme.code_background,
                foreground: theme.code_foreground,
            }
        );
        let resolved = string.resolve(4, 1.0);
        assert_eq!(resolved.background, Some(theme.code_background));
        assert_eq!(resolved.color, theme.code_foreground);
        assert_eq!(string.style_boundaries(), [0, 4, 6]);
    }

    #[test]
    fn fragments_consisting_of_delimiters_vanish() {
        let fragments = [
            TextFragment::new(0, "**", sized(30.0)),
            TextFragment::new(1, "x", sized(10.0)),
            TextFragment::new(2, "**", sized(30.0)),
        ];
        let string = AttributedStringBuilder::new(&fragments)
            .markdown(MarkdownTheme::default())
            .build();
        assert_eq!(string.text(), "x");
        assert_eq!(string.runs().len(), 1);
        assert_eq!(string.runs()[0].style.font_size, 10.0);
    }

    #[test]
    fn empty_input_builds_empty_string() {
        let string = AttributedStringBuilder::new(&[]).build();
        assert!(string.is_empty());
        assert!(string.runs().is_empty());
        assert_eq!(string.resolve(0, 1.0).font_size, TextStyle::default().font_size);
    }
}
