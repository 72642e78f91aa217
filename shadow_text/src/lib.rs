// Copyright 2025 the Shadow Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shadow Text lays out the text nodes of a declarative UI's shadow tree.
//!
//! A [`ShadowTextNode`] collects styled [`TextFragment`]s from its children, merges them
//! into one [`AttributedString`] (optionally recognizing `**bold**` and `` `code` ``
//! markup), and measures that string under size constraints. Lines are wrapped at
//! Unicode line break opportunities, limited in number, and truncated with an ellipsis
//! at the head, middle or tail. When asked to, the node shrinks its font scale until the
//! text fits. The committed layout can be reported to a host listener once the node is
//! mounted.
//!
//! Font measurements come from a [`FontMetrics`] provider: [`FixedMetrics`] for
//! deterministic layout, or [`FontCollection`] for metrics read from font files.
//!
//! ## Example
//!
//! ```
//! use shadow_text::{
//!     Constraints, LineBreakMode, MeasurableShadowNode, ShadowTextNode, TextFragment,
//!     TextProperty, TextStyle,
//! };
//!
//! let mut node = ShadowTextNode::new();
//! node.push_fragment(TextFragment::new(0, "Hello **shadow** tree", TextStyle::default()));
//! node.apply(TextProperty::ParseBasicMarkdown(true));
//! node.apply(TextProperty::MaximumNumberOfLines(1));
//! node.apply(TextProperty::LineBreakMode(LineBreakMode::TruncateTail));
//!
//! let result = node.commit_layout(Constraints::width(60.0));
//! assert_eq!(result.lines.len(), 1);
//! assert!(result.truncated);
//! assert!(result.lines[0].text.ends_with('…'));
//! ```

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

pub mod builder;
pub mod config;
pub mod event;
pub mod fragment;
pub mod layout;
pub mod markup;
pub mod metrics;
pub mod node;
pub mod scale;
pub mod style;

#[cfg(test)]
mod tests;

pub use peniko::Color;

pub use builder::{AttributedString, AttributedStringBuilder, SpanStyle, StyleRun};
pub use config::{
    LineBreakMode, MarkdownTheme, TextConfig, TextProperty, ThemeHandle, ThemeSnapshot,
    MIN_FONT_SCALE,
};
pub use event::{LayoutEventEmitter, LayoutListener, PendingLayoutEvent, TextLayoutEvent};
pub use fragment::TextFragment;
pub use layout::{
    BreakReason, Constraints, LayoutMeasurer, LayoutResult, LineRecord, MeasureRequest,
};
pub use metrics::{FixedMetrics, FontCollection, FontLineMetrics, FontMetrics};
pub use node::{MeasurableShadowNode, ShadowTextNode};
pub use scale::{AdaptiveFontScaler, ScaleOutcome};
pub use style::{FontFamily, FontStyle, FontWeight, TextStyle, DEFAULT_FONT_SIZE};
