// Copyright 2025 the Shadow Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

/// An attribute applied to a half-open byte range.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Span<Attr> {
    /// Byte range covered by the attribute.
    pub range: Range<usize>,
    /// The attribute value.
    pub attr: Attr,
}

impl<Attr> Span<Attr> {
    /// Creates a span.
    pub fn new(range: Range<usize>, attr: Attr) -> Self {
        Self { range, attr }
    }

    /// Returns `true` if `index` is inside the span.
    pub fn contains(&self, index: usize) -> bool {
        self.range.contains(&index)
    }
}
