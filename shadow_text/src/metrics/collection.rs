// Copyright 2025 the Shadow Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Metrics read from font files.

use alloc::sync::Arc;
use core::fmt;
use std::sync::Mutex;

use hashbrown::{HashMap, HashSet};
use skrifa::instance::{LocationRef, Size};
use skrifa::{FontRef, GlyphId, MetadataProvider};

use super::{is_zero_width, FixedMetrics, FontLineMetrics, FontMetrics};
use crate::style::{FontFamily, ResolvedStyle};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum WeightClass {
    Regular,
    Bold,
}

impl WeightClass {
    fn of(style: &ResolvedStyle) -> Self {
        if style.font_weight.is_bold() {
            Self::Bold
        } else {
            Self::Regular
        }
    }

    fn other(self) -> Self {
        match self {
            Self::Regular => Self::Bold,
            Self::Bold => Self::Regular,
        }
    }
}

/// Font data was rejected by [`FontCollection::register`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontLoadError {
    family: FontFamily,
    reason: String,
}

impl FontLoadError {
    /// The family the data was registered for.
    pub fn family(&self) -> &FontFamily {
        &self.family
    }
}

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font data for {} is unreadable: {}", self.family, self.reason)
    }
}

impl core::error::Error for FontLoadError {}

/// Fonts registered by family name, measured with `skrifa`.
///
/// Lookup falls back from the requested weight to the other weight of the same family,
/// then to the default family, then to [`FixedMetrics`]. Each family that needed a
/// fallback is logged once.
#[derive(Debug)]
pub struct FontCollection {
    fonts: HashMap<(FontFamily, WeightClass), Arc<[u8]>>,
    default_family: FontFamily,
    fallback: FixedMetrics,
    warned: Mutex<HashSet<FontFamily>>,
}

impl Default for FontCollection {
    fn default() -> Self {
        Self::new(FontFamily::default())
    }
}

impl FontCollection {
    /// Creates an empty collection that falls back to `default_family`.
    pub fn new(default_family: FontFamily) -> Self {
        Self {
            fonts: HashMap::new(),
            default_family,
            fallback: FixedMetrics::default(),
            warned: Mutex::new(HashSet::new()),
        }
    }

    /// Registers font file data for `family`; `bold` selects the weight slot.
    pub fn register(
        &mut self,
        family: FontFamily,
        bold: bool,
        data: impl Into<Arc<[u8]>>,
    ) -> Result<(), FontLoadError> {
        let data = data.into();
        if let Err(err) = FontRef::new(&data) {
            return Err(FontLoadError {
                family,
                reason: err.to_string(),
            });
        }
        let class = if bold {
            WeightClass::Bold
        } else {
            WeightClass::Regular
        };
        self.fonts.insert((family, class), data);
        Ok(())
    }

    /// Number of registered font files.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Returns `true` if no fonts are registered.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    fn font_data(&self, style: &ResolvedStyle) -> Option<&Arc<[u8]>> {
        let class = WeightClass::of(style);
        let family = &style.font_family;
        if let Some(data) = self
            .fonts
            .get(&(family.clone(), class))
            .or_else(|| self.fonts.get(&(family.clone(), class.other())))
        {
            return Some(data);
        }
        let data = self
            .fonts
            .get(&(self.default_family.clone(), class))
            .or_else(|| self.fonts.get(&(self.default_family.clone(), class.other())));
        self.warn_once(family, data.is_some());
        data
    }

    fn warn_once(&self, family: &FontFamily, found_default: bool) {
        let mut warned = self
            .warned
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if warned.insert(family.clone()) {
            if found_default {
                log::warn!(
                    "font family {family} not registered, using {}",
                    self.default_family
                );
            } else {
                log::warn!("no font registered for {family}, using fixed metrics");
            }
        }
    }
}

impl FontMetrics for FontCollection {
    fn advance(&self, ch: char, style: &ResolvedStyle) -> f32 {
        self.text_advance(ch.encode_utf8(&mut [0; 4]), style)
    }

    fn text_advance(&self, text: &str, style: &ResolvedStyle) -> f32 {
        let Some(font) = self
            .font_data(style)
            .and_then(|data| FontRef::new(data).ok())
        else {
            return self.fallback.text_advance(text, style);
        };
        // Parsed once per run; the charmap and advance tables are reused for every glyph.
        let charmap = font.charmap();
        let glyphs = font.glyph_metrics(Size::new(style.font_size), LocationRef::default());
        text.chars()
            .filter(|&ch| !ch.is_control() && !is_zero_width(ch))
            .map(|ch| {
                let glyph = charmap.map(ch).unwrap_or(GlyphId::NOTDEF);
                glyphs
                    .advance_width(glyph)
                    .unwrap_or_else(|| self.fallback.advance(ch, style))
            })
            .sum()
    }

    fn line_metrics(&self, style: &ResolvedStyle) -> FontLineMetrics {
        let Some(font) = self
            .font_data(style)
            .and_then(|data| FontRef::new(data).ok())
        else {
            return self.fallback.line_metrics(style);
        };
        let metrics = font.metrics(Size::new(style.font_size), LocationRef::default());
        let approx = self.fallback.line_metrics(style);
        FontLineMetrics {
            ascent: metrics.ascent,
            // Fonts report descent below the baseline as a negative value.
            descent: metrics.descent.abs(),
            leading: metrics.leading.max(0.0),
            cap_height: metrics.cap_height.unwrap_or(approx.cap_height),
            x_height: metrics.x_height.unwrap_or(approx.x_height),
        }
    }
}
