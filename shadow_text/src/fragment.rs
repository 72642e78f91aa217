// Copyright 2025 the Shadow Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw text contributed by the children of a text node.

use alloc::sync::Arc;

use crate::style::TextStyle;

/// A run of raw text contributed by one child of a text node.
///
/// Fragments are immutable; the tree replaces them instead of editing them.
#[derive(Clone, Debug, PartialEq)]
pub struct TextFragment {
    text: Arc<str>,
    style: TextStyle,
    position: u32,
}

impl TextFragment {
    /// Creates a fragment at `position` among its siblings.
    pub fn new(position: u32, text: impl Into<Arc<str>>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
            position,
        }
    }

    /// The raw text, markup delimiters included.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The fragment's style.
    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// Ordering position among siblings.
    pub fn position(&self) -> u32 {
        self.position
    }
}
