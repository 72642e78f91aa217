// Copyright 2025 the Shadow Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text styles carried by fragments and resolved per character for measurement.

use alloc::sync::Arc;
use core::fmt;

use peniko::color::palette::css;
use peniko::Color;

/// Font size used when a fragment does not provide a usable one.
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Name of a font family.
///
/// Cheap to clone; fragments produced from the same parent usually share one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FontFamily(Arc<str>);

impl FontFamily {
    /// The platform UI family, used when nothing else is specified.
    pub const SYSTEM_UI: &'static str = "system-ui";

    /// Creates a family from its name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// The family name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Default for FontFamily {
    fn default() -> Self {
        Self::new(Self::SYSTEM_UI)
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FontFamily {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Visual weight class of a font, on a scale from 1.0 to 1000.0.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct FontWeight(f32);

impl FontWeight {
    /// Weight value of 100.
    pub const THIN: Self = Self(100.0);

    /// Weight value of 300.
    pub const LIGHT: Self = Self(300.0);

    /// Weight value of 400. This is the default value.
    pub const NORMAL: Self = Self(400.0);

    /// Weight value of 500.
    pub const MEDIUM: Self = Self(500.0);

    /// Weight value of 600.
    pub const SEMI_BOLD: Self = Self(600.0);

    /// Weight value of 700.
    pub const BOLD: Self = Self(700.0);

    /// Weight value of 900.
    pub const BLACK: Self = Self(900.0);

    /// Creates a new weight value.
    pub fn new(weight: f32) -> Self {
        Self(weight)
    }

    /// Returns the underlying weight value.
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns `true` for semi-bold and heavier weights.
    pub fn is_bold(self) -> bool {
        self.0 >= Self::SEMI_BOLD.0
    }

    /// Parses a weight as written by the host: `normal`, `bold` or a number.
    ///
    /// ```
    /// use shadow_text::style::FontWeight;
    ///
    /// assert_eq!(FontWeight::parse("bold"), Some(FontWeight::BOLD));
    /// assert_eq!(FontWeight::parse(" 500 "), Some(FontWeight::MEDIUM));
    /// assert_eq!(FontWeight::parse("heavy-ish"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "normal" => Some(Self::NORMAL),
            "bold" => Some(Self::BOLD),
            other => other
                .parse::<f32>()
                .ok()
                .filter(|w| (1.0..=1000.0).contains(w))
                .map(Self),
        }
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Upright or slanted glyphs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Upright glyphs.
    #[default]
    Normal,
    /// Italic glyphs.
    Italic,
}

/// Style descriptor attached to a text fragment.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font family.
    pub font_family: FontFamily,
    /// Font size in logical pixels, before any font scale is applied.
    pub font_size: f32,
    /// Font weight.
    pub font_weight: FontWeight,
    /// Font style.
    pub font_style: FontStyle,
    /// Foreground color.
    pub color: Color,
    /// Absolute line height in logical pixels; `None` uses the font's metrics.
    pub line_height: Option<f32>,
    /// Extra spacing after every grapheme, in logical pixels.
    pub letter_spacing: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: FontFamily::default(),
            font_size: DEFAULT_FONT_SIZE,
            font_weight: FontWeight::NORMAL,
            font_style: FontStyle::Normal,
            color: css::BLACK,
            line_height: None,
            letter_spacing: 0.0,
        }
    }
}

impl TextStyle {
    /// Returns a copy with unusable values replaced by defaults.
    ///
    /// Each replacement is logged; measurement never fails on bad style data.
    pub fn sanitized(&self) -> Self {
        let mut style = self.clone();
        if !(style.font_size.is_finite() && style.font_size > 0.0) {
            log::warn!(
                "font size {} is not usable, falling back to {DEFAULT_FONT_SIZE}",
                style.font_size
            );
            style.font_size = DEFAULT_FONT_SIZE;
        }
        if let Some(line_height) = style.line_height {
            if !(line_height.is_finite() && line_height > 0.0) {
                log::warn!("line height {line_height} is not usable, using font metrics");
                style.line_height = None;
            }
        }
        if !style.letter_spacing.is_finite() {
            log::warn!("letter spacing {} ignored", style.letter_spacing);
            style.letter_spacing = 0.0;
        }
        if !(1.0..=1000.0).contains(&style.font_weight.value()) {
            log::warn!(
                "font weight {} out of range, using normal",
                style.font_weight.value()
            );
            style.font_weight = FontWeight::NORMAL;
        }
        if style.font_family.name().trim().is_empty() {
            log::warn!("empty font family, using {}", FontFamily::SYSTEM_UI);
            style.font_family = FontFamily::default();
        }
        style
    }
}

/// A style with markup overrides applied and the font scale folded in.
///
/// This is what font metrics are queried with.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedStyle {
    /// Font family.
    pub font_family: FontFamily,
    /// Scaled font size in logical pixels.
    pub font_size: f32,
    /// Font weight.
    pub font_weight: FontWeight,
    /// Font style.
    pub font_style: FontStyle,
    /// Foreground color.
    pub color: Color,
    /// Background color, set for inline code.
    pub background: Option<Color>,
    /// Scaled absolute line height.
    pub line_height: Option<f32>,
    /// Scaled letter spacing.
    pub letter_spacing: f32,
}

impl ResolvedStyle {
    /// Resolves `style` at `scale` without any markup override.
    pub fn new(style: &TextStyle, scale: f32) -> Self {
        Self {
            font_family: style.font_family.clone(),
            font_size: style.font_size * scale,
            font_weight: style.font_weight,
            font_style: style.font_style,
            color: style.color,
            background: None,
            line_height: style.line_height.map(|h| h * scale),
            letter_spacing: style.letter_spacing * scale,
        }
    }
}
