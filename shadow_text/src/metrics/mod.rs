// Copyright 2025 the Shadow Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font metrics used by line breaking.

mod collection;

pub use collection::{FontCollection, FontLoadError};

use crate::style::ResolvedStyle;

/// Vertical metrics of a font at a given size, in logical pixels.
#[derive(Copy, Clone, Default, Debug, PartialEq)]
pub struct FontLineMetrics {
    /// Distance from the baseline to the top of the line box.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the line box, positive downwards.
    pub descent: f32,
    /// Extra space added below the descent.
    pub leading: f32,
    /// Height of capital letters.
    pub cap_height: f32,
    /// Height of lowercase letters.
    pub x_height: f32,
}

impl FontLineMetrics {
    /// Natural line height: ascent, descent and leading.
    pub fn line_height(&self) -> f32 {
        self.ascent + self.descent + self.leading
    }
}

/// Source of glyph advances and line metrics.
///
/// Layout asks once per grapheme it measures, so implementations should be cheap.
pub trait FontMetrics {
    /// Horizontal advance of `ch` at the style's (already scaled) font size.
    fn advance(&self, ch: char, style: &ResolvedStyle) -> f32;

    /// Summed advance of every character in `text`.
    ///
    /// Providers with per-lookup setup cost override this to pay it once for the whole run.
    fn text_advance(&self, text: &str, style: &ResolvedStyle) -> f32 {
        text.chars().map(|ch| self.advance(ch, style)).sum()
    }

    /// Vertical metrics at the style's font size.
    fn line_metrics(&self, style: &ResolvedStyle) -> FontLineMetrics;
}

impl<T: FontMetrics + ?Sized> FontMetrics for &T {
    fn advance(&self, ch: char, style: &ResolvedStyle) -> f32 {
        (**self).advance(ch, style)
    }

    fn text_advance(&self, text: &str, style: &ResolvedStyle) -> f32 {
        (**self).text_advance(text, style)
    }

    fn line_metrics(&self, style: &ResolvedStyle) -> FontLineMetrics {
        (**self).line_metrics(style)
    }
}

/// Metrics where every glyph is a fixed fraction of the font size.
///
/// Deterministic and font-free: the default provider, and the fallback when a real font
/// cannot be found.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedMetrics {
    /// Advance of every printable character, as a fraction of font size.
    pub advance: f32,
    /// Ascent as a fraction of font size.
    pub ascent: f32,
    /// Descent as a fraction of font size.
    pub descent: f32,
    /// Leading as a fraction of font size.
    pub leading: f32,
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self {
            advance: 0.5,
            ascent: 0.8,
            descent: 0.2,
            leading: 0.0,
        }
    }
}

impl FontMetrics for FixedMetrics {
    fn advance(&self, ch: char, style: &ResolvedStyle) -> f32 {
        if ch.is_control() || is_zero_width(ch) {
            0.0
        } else {
            self.advance * style.font_size
        }
    }

    fn line_metrics(&self, style: &ResolvedStyle) -> FontLineMetrics {
        let size = style.font_size;
        FontLineMetrics {
            ascent: self.ascent * size,
            descent: self.descent * size,
            leading: self.leading * size,
            cap_height: 0.7 * size,
            x_height: 0.5 * size,
        }
    }
}

/// Default-ignorable characters that never take horizontal space.
pub(crate) fn is_zero_width(ch: char) -> bool {
    matches!(
        ch,
        '\u{200B}'..='\u{200F}' | '\u{2060}'..='\u{2064}' | '\u{FEFF}' | '\u{FE00}'..='\u{FE0F}'
    ) || ('\u{0300}'..='\u{036F}').contains(&ch)
}
