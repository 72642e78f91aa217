// Copyright 2025 the Shadow Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node configuration and the shared markdown theme.

use alloc::sync::Arc;
use core::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use peniko::color::palette::css;
use peniko::Color;

/// Smallest font scale the scaler will ever try.
///
/// Values at or below zero are clamped up to this.
pub const MIN_FONT_SCALE: f32 = 0.01;

/// Policy governing how text wraps, and how the last line is cut when content remains.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineBreakMode {
    /// Wrap at word boundaries; the last line is filled with whatever fits.
    Clip,
    /// Wrap at word boundaries; the last line ends at its natural break.
    WordWrap,
    /// Wrap at grapheme boundaries.
    CharWrap,
    /// Replace the start of the last line with an ellipsis.
    TruncateHead,
    /// Replace the middle of the last line with an ellipsis.
    TruncateMiddle,
    /// Replace the end of the last line with an ellipsis.
    #[default]
    TruncateTail,
}

impl LineBreakMode {
    /// Parses the mode names used by host descriptions.
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.trim() {
            "clip" | "clipping" => Self::Clip,
            "wordWrapping" | "word-wrap" | "word-wrapping" => Self::WordWrap,
            "charWrapping" | "character-wrap" | "char-wrapping" => Self::CharWrap,
            "head" | "truncate-head" | "truncatingHead" => Self::TruncateHead,
            "middle" | "truncate-middle" | "truncatingMiddle" => Self::TruncateMiddle,
            "tail" | "truncate-tail" | "truncatingTail" => Self::TruncateTail,
            _ => return None,
        })
    }

    /// Returns `true` if lines may break between any two graphemes.
    pub fn breaks_anywhere(self) -> bool {
        self == Self::CharWrap
    }
}

/// Immutable configuration of a text node.
///
/// Built with [`TextConfig::default`] and updated through [`TextConfig::apply`], which keeps
/// every field within its valid range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextConfig {
    /// Maximum number of lines; 0 means unlimited.
    pub maximum_number_of_lines: u32,
    /// Wrapping and truncation policy.
    pub line_break_mode: LineBreakMode,
    /// Enables the font scale search.
    pub adjusts_font_size_to_fit: bool,
    /// Lower bound of the font scale search, in `(0, 1]`.
    pub minimum_font_scale: f32,
    /// Enables `**bold**` and `` `code` `` recognition.
    pub parse_basic_markdown: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            maximum_number_of_lines: 0,
            line_break_mode: LineBreakMode::default(),
            adjusts_font_size_to_fit: false,
            minimum_font_scale: 1.0,
            parse_basic_markdown: false,
        }
    }
}

impl TextConfig {
    /// Returns a copy with the property applied and re-validated.
    #[must_use]
    pub fn apply(mut self, property: TextProperty) -> Self {
        match property {
            TextProperty::MaximumNumberOfLines(lines) => self.maximum_number_of_lines = lines,
            TextProperty::LineBreakMode(mode) => self.line_break_mode = mode,
            TextProperty::AdjustsFontSizeToFit(on) => self.adjusts_font_size_to_fit = on,
            TextProperty::MinimumFontScale(scale) => self.minimum_font_scale = scale,
            TextProperty::ParseBasicMarkdown(on) => self.parse_basic_markdown = on,
        }
        self.validated()
    }

    /// Returns a copy with every field clamped into its valid range.
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.minimum_font_scale = clamp_font_scale(self.minimum_font_scale);
        self
    }

    /// The scale floor used by the scaler, or 1.0 when scaling is off.
    pub fn scale_floor(&self) -> f32 {
        if self.adjusts_font_size_to_fit {
            clamp_font_scale(self.minimum_font_scale)
        } else {
            1.0
        }
    }
}

/// Clamps a font scale into `[MIN_FONT_SCALE, 1.0]`, mapping NaN to 1.0.
pub fn clamp_font_scale(scale: f32) -> f32 {
    if scale.is_nan() {
        log::warn!("minimum font scale is NaN, disabling scaling");
        1.0
    } else if scale < MIN_FONT_SCALE {
        log::debug!("minimum font scale {scale} clamped to {MIN_FONT_SCALE}");
        MIN_FONT_SCALE
    } else {
        scale.min(1.0)
    }
}

/// Single configuration update, as decoded from the host description.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextProperty {
    /// `maximumNumberOfLines`.
    MaximumNumberOfLines(u32),
    /// `lineBreakMode`.
    LineBreakMode(LineBreakMode),
    /// `adjustsFontSizeToFit`.
    AdjustsFontSizeToFit(bool),
    /// `minimumFontScale`.
    MinimumFontScale(f32),
    /// `parseBasicMarkdown`.
    ParseBasicMarkdown(bool),
}

/// Colors applied to recognized inline code spans.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkdownTheme {
    /// `markdownCodeBackgroundColor`.
    pub code_background: Color,
    /// `markdownCodeForegroundColor`.
    pub code_foreground: Color,
}

impl Default for MarkdownTheme {
    fn default() -> Self {
        Self {
            code_background: css::GAINSBORO,
            code_foreground: css::CRIMSON,
        }
    }
}

/// Shared, externally writable markdown theme.
///
/// Writers may live outside the layout pass. Readers take a [`ThemeHandle::snapshot`] once
/// per measurement cycle so a pass never observes a half-applied update.
#[derive(Clone, Debug, Default)]
pub struct ThemeHandle {
    inner: Arc<ThemeCell>,
}

#[derive(Debug, Default)]
struct ThemeCell {
    theme: RwLock<MarkdownTheme>,
    generation: AtomicU64,
}

/// A theme value together with the generation it was read at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemeSnapshot {
    /// The theme.
    pub theme: MarkdownTheme,
    /// Incremented on every write to the handle.
    pub generation: u64,
}

impl ThemeHandle {
    /// Creates a handle holding `theme`.
    pub fn new(theme: MarkdownTheme) -> Self {
        Self {
            inner: Arc::new(ThemeCell {
                theme: RwLock::new(theme),
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Reads the current theme.
    pub fn snapshot(&self) -> ThemeSnapshot {
        let guard = self
            .inner
            .theme
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        ThemeSnapshot {
            theme: *guard,
            generation: self.inner.generation.load(Ordering::Acquire),
        }
    }

    /// Replaces the whole theme.
    pub fn set(&self, theme: MarkdownTheme) {
        self.update(|current| *current = theme);
    }

    /// `markdownCodeBackgroundColor`.
    pub fn set_code_background(&self, color: Color) {
        self.update(|theme| theme.code_background = color);
    }

    /// `markdownCodeForegroundColor`.
    pub fn set_code_foreground(&self, color: Color) {
        self.update(|theme| theme.code_foreground = color);
    }

    fn update(&self, f: impl FnOnce(&mut MarkdownTheme)) {
        let mut guard = self
            .inner
            .theme
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut guard);
        // Bumped while the write lock is held so a snapshot never pairs a new theme with
        // an old generation.
        self.inner.generation.fetch_add(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::{
        LineBreakMode, MarkdownTheme, TextConfig, TextProperty, ThemeHandle, MIN_FONT_SCALE,
    };
    use peniko::color::palette::css;

    #[test]
    fn minimum_font_scale_is_clamped() {
        let config = TextConfig::default();
        assert_eq!(
            config
                .apply(TextProperty::MinimumFontScale(0.0))
                .minimum_font_scale,
            MIN_FONT_SCALE
        );
        assert_eq!(
            config
                .apply(TextProperty::MinimumFontScale(-2.0))
                .minimum_font_scale,
            MIN_FONT_SCALE
        );
        assert_eq!(
            config
                .apply(TextProperty::MinimumFontScale(3.0))
                .minimum_font_scale,
            1.0
        );
        assert_eq!(
            config
                .apply(TextProperty::MinimumFontScale(f32::NAN))
                .minimum_font_scale,
            1.0
        );
        assert_eq!(
            config
                .apply(TextProperty::MinimumFontScale(0.25))
                .minimum_font_scale,
            0.25
        );
    }

    #[test]
    fn scale_floor_requires_opt_in() {
        let config = TextConfig::default().apply(TextProperty::MinimumFontScale(0.5));
        assert_eq!(config.scale_floor(), 1.0);
        let config = config.apply(TextProperty::AdjustsFontSizeToFit(true));
        assert_eq!(config.scale_floor(), 0.5);
    }

    #[test]
    fn parses_host_mode_names() {
        assert_eq!(LineBreakMode::parse("tail"), Some(LineBreakMode::TruncateTail));
        assert_eq!(
            LineBreakMode::parse("character-wrap"),
            Some(LineBreakMode::CharWrap)
        );
        assert_eq!(
            LineBreakMode::parse("wordWrapping"),
            Some(LineBreakMode::WordWrap)
        );
        assert_eq!(LineBreakMode::parse("clip"), Some(LineBreakMode::Clip));
        assert_eq!(LineBreakMode::parse("sideways"), None);
    }

    #[test]
    fn theme_writes_bump_generation() {
        let handle = ThemeHandle::new(MarkdownTheme::default());
        let before = handle.snapshot();
        handle.set_code_background(css::NAVY);
        let after = handle.snapshot();
        assert_eq!(after.generation, before.generation + 1);
        assert_eq!(after.theme.code_background, css::NAVY);
        assert_eq!(after.theme.code_foreground, before.theme.code_foreground);

        // Clones share the cell.
        let other = handle.clone();
        other.set_code_foreground(css::WHITE);
        assert_eq!(handle.snapshot().theme.code_foreground, css::WHITE);
    }
}
