// Copyright 2025 the Shadow Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recognition of the two inline markup forms: `**bold**` and `` `code` ``.
//!
//! Markup is decoration only. Anything that does not form a complete, non-empty pair is
//! left in the text as typed, and pairs never nest: once a delimiter is open, delimiters
//! of the other kind are plain characters until it closes.

use alloc::vec::Vec;
use core::ops::Range;

use smallvec::SmallVec;

/// Kind of a markup pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// `**…**`
    Bold,
    /// `` `…` ``
    Code,
}

impl MarkKind {
    fn delimiter(self) -> &'static [u8] {
        match self {
            Self::Bold => b"**",
            Self::Code => b"`",
        }
    }

    fn at(bytes: &[u8]) -> Option<Self> {
        [Self::Bold, Self::Code]
            .into_iter()
            .find(|kind| bytes.starts_with(kind.delimiter()))
    }
}

/// A matched pair of delimiters, in byte offsets of the scanned text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkPair {
    /// Which form this pair is.
    pub kind: MarkKind,
    /// The opening delimiter.
    pub open: Range<usize>,
    /// The closing delimiter.
    pub close: Range<usize>,
}

impl MarkPair {
    /// The text between the delimiters.
    pub fn content(&self) -> Range<usize> {
        self.open.end..self.close.start
    }
}

#[derive(Clone, Debug)]
struct OpenDelimiter {
    kind: MarkKind,
    range: Range<usize>,
}

/// Finds every complete markup pair in `text`, sorted by position.
///
/// Single left-to-right pass. Both delimiters are ASCII, so stepping by byte never lands
/// inside a multi-byte character in a way that could match.
pub fn scan(text: &str) -> Vec<MarkPair> {
    let bytes = text.as_bytes();
    let mut stack: SmallVec<[OpenDelimiter; 2]> = SmallVec::new();
    let mut pairs = Vec::new();
    let mut ix = 0;
    while ix < bytes.len() {
        let Some(kind) = MarkKind::at(&bytes[ix..]) else {
            ix += 1;
            continue;
        };
        let len = kind.delimiter().len();
        match stack.last() {
            Some(open) if open.kind == kind => {
                if let Some(open) = stack.pop() {
                    // `****` and ``` `` ``` have nothing to style and stay literal.
                    if open.range.end != ix {
                        pairs.push(MarkPair {
                            kind,
                            open: open.range,
                            close: ix..ix + len,
                        });
                    }
                }
                ix += len;
            }
            // Inside the other kind this is an ordinary character.
            Some(_) => ix += 1,
            None => {
                stack.push(OpenDelimiter {
                    kind,
                    range: ix..ix + len,
                });
                ix += len;
            }
        }
    }
    if let Some(open) = stack.last() {
        log::trace!(
            "unterminated {:?} delimiter at {} kept as text",
            open.kind,
            open.range.start
        );
    }
    pairs
}

/// Maps offsets in the scanned text to offsets after the delimiters are removed.
#[derive(Clone, Debug, Default)]
pub(crate) struct OffsetMap {
    /// Removed byte ranges, sorted and disjoint.
    removed: Vec<Range<usize>>,
}

impl OffsetMap {
    pub(crate) fn new(pairs: &[MarkPair]) -> Self {
        let mut removed: Vec<_> = pairs
            .iter()
            .flat_map(|pair| [pair.open.clone(), pair.close.clone()])
            .collect();
        removed.sort_by_key(|range| range.start);
        Self { removed }
    }

    pub(crate) fn removed(&self) -> &[Range<usize>] {
        &self.removed
    }

    /// Offsets inside a removed range map to where that range used to start.
    pub(crate) fn map(&self, offset: usize) -> usize {
        let mut shift = 0;
        for range in &self.removed {
            if range.start >= offset {
                break;
            }
            shift += range.end.min(offset) - range.start;
        }
        offset - shift
    }
}
