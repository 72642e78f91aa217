// Copyright 2025 the Shadow Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The text node of the shadow tree.

use alloc::sync::Arc;
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::builder::{AttributedString, AttributedStringBuilder};
use crate::config::{TextConfig, TextProperty, ThemeHandle};
use crate::event::{LayoutEventEmitter, LayoutListener, PendingLayoutEvent};
use crate::fragment::TextFragment;
use crate::layout::{Constraints, LayoutMeasurer, LayoutResult, MeasureRequest};
use crate::metrics::{FixedMetrics, FontMetrics};
use crate::scale::AdaptiveFontScaler;

/// Number of measured constraint sets remembered between mutations.
const MEASURE_CACHE_SIZE: usize = 4;

/// A shadow tree node that the layout engine can ask for its size.
pub trait MeasurableShadowNode {
    /// Returns `(width, height)` under `constraints`.
    fn measure(&mut self, constraints: Constraints) -> (f32, f32);

    /// Lays out under the final `constraints` and keeps the result for mounting.
    fn commit_layout(&mut self, constraints: Constraints) -> &LayoutResult;

    /// Finalizes the layout and returns the event to deliver once mounted, if any.
    fn prepare_for_mount(&mut self) -> Option<PendingLayoutEvent>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct StringStamp {
    theme_generation: Option<u64>,
}

/// Text node: child fragments, configuration and the cached layouts built from them.
///
/// Any mutation invalidates the cached string and layouts; they are rebuilt lazily by the
/// next measurement.
#[derive(Debug)]
pub struct ShadowTextNode<M = FixedMetrics> {
    fragments: Vec<TextFragment>,
    config: TextConfig,
    theme: ThemeHandle,
    metrics: M,
    emitter: LayoutEventEmitter,
    string: AttributedString,
    /// `None` when `string` is stale.
    stamp: Option<StringStamp>,
    layouts: SmallVec<[(Constraints, Arc<LayoutResult>); MEASURE_CACHE_SIZE]>,
    /// Box given by the last commit; survives mutations, unlike `committed`.
    committed_constraints: Option<Constraints>,
    committed: Option<Arc<LayoutResult>>,
}

impl Default for ShadowTextNode {
    fn default() -> Self {
        Self::new()
    }
}

impl ShadowTextNode {
    /// Creates an empty node measured with [`FixedMetrics`].
    pub fn new() -> Self {
        Self::with_metrics(FixedMetrics::default())
    }
}

impl<M: FontMetrics> ShadowTextNode<M> {
    /// Creates an empty node measured with `metrics`.
    pub fn with_metrics(metrics: M) -> Self {
        Self {
            fragments: Vec::new(),
            config: TextConfig::default(),
            theme: ThemeHandle::default(),
            metrics,
            emitter: LayoutEventEmitter::default(),
            string: AttributedString::default(),
            stamp: None,
            layouts: SmallVec::new(),
            committed_constraints: None,
            committed: None,
        }
    }

    /// Replaces all child fragments.
    pub fn set_fragments(&mut self, fragments: Vec<TextFragment>) {
        self.fragments = fragments;
        self.invalidate();
    }

    /// Adds a child fragment.
    pub fn push_fragment(&mut self, fragment: TextFragment) {
        self.fragments.push(fragment);
        self.invalidate();
    }

    /// Child fragments in insertion order.
    pub fn fragments(&self) -> &[TextFragment] {
        &self.fragments
    }

    /// Replaces the configuration.
    pub fn set_config(&mut self, config: TextConfig) {
        let config = config.validated();
        if config != self.config {
            self.config = config;
            self.invalidate();
        }
    }

    /// Applies a single configuration update.
    pub fn apply(&mut self, property: TextProperty) {
        self.set_config(self.config.apply(property));
    }

    /// The current configuration.
    pub fn config(&self) -> &TextConfig {
        &self.config
    }

    /// Shares a theme handle with this node.
    pub fn set_theme_handle(&mut self, theme: ThemeHandle) {
        self.theme = theme;
        self.invalidate();
    }

    /// The theme handle; writes to it are picked up by the next measurement.
    pub fn theme_handle(&self) -> &ThemeHandle {
        &self.theme
    }

    /// `onTextLayout`.
    pub fn set_on_text_layout(&mut self, listener: Option<LayoutListener>) {
        self.emitter.set_listener(listener);
    }

    /// The attributed string for the current fragments, rebuilding it if stale.
    pub fn attributed_string(&mut self) -> &AttributedString {
        self.refresh_string();
        &self.string
    }

    /// The committed layout, if any.
    pub fn layout_result(&self) -> Option<&LayoutResult> {
        self.committed.as_deref()
    }

    /// Size with no constraints.
    pub fn intrinsic_size(&mut self) -> (f32, f32) {
        self.measure(Constraints::UNBOUNDED)
    }

    /// Marks the node as removed from the tree; undelivered events are discarded.
    pub fn detach(&mut self) {
        self.emitter.detach();
    }

    /// Returns `true` until the node is detached or dropped.
    pub fn is_attached(&self) -> bool {
        self.emitter.is_attached()
    }

    fn invalidate(&mut self) {
        self.stamp = None;
        self.layouts.clear();
        self.committed = None;
    }

    fn refresh_string(&mut self) {
        let theme = self
            .config
            .parse_basic_markdown
            .then(|| self.theme.snapshot());
        let stamp = StringStamp {
            theme_generation: theme.map(|snapshot| snapshot.generation),
        };
        if self.stamp == Some(stamp) {
            return;
        }
        log::debug!("rebuilding attributed string from {} fragments", self.fragments.len());
        self.string = AttributedStringBuilder::new(&self.fragments)
            .markdown_opt(theme.map(|snapshot| snapshot.theme))
            .build();
        self.stamp = Some(stamp);
        self.layouts.clear();
    }

    fn layout(&mut self, constraints: Constraints) -> Arc<LayoutResult> {
        self.refresh_string();
        if let Some((_, result)) = self.layouts.iter().find(|(c, _)| *c == constraints) {
            return Arc::clone(result);
        }
        let result = Arc::new(self.compute(constraints));
        if self.layouts.len() == MEASURE_CACHE_SIZE {
            self.layouts.remove(0);
        }
        self.layouts.push((constraints, Arc::clone(&result)));
        result
    }

    fn compute(&self, constraints: Constraints) -> LayoutResult {
        let measurer = LayoutMeasurer::new(&self.metrics);
        let request = MeasureRequest {
            constraints,
            max_lines: self.config.maximum_number_of_lines,
            mode: self.config.line_break_mode,
            scale: 1.0,
        };
        if self.config.adjusts_font_size_to_fit {
            AdaptiveFontScaler::new(measurer)
                .fit(&self.string, &request, self.config.minimum_font_scale)
                .result
        } else {
            measurer.measure(&self.string, &request)
        }
    }
}

impl<M: FontMetrics> MeasurableShadowNode for ShadowTextNode<M> {
    fn measure(&mut self, constraints: Constraints) -> (f32, f32) {
        self.layout(constraints).size()
    }

    fn commit_layout(&mut self, constraints: Constraints) -> &LayoutResult {
        let result = self.layout(constraints);
        self.committed_constraints = Some(constraints);
        self.committed.insert(result)
    }

    fn prepare_for_mount(&mut self) -> Option<PendingLayoutEvent> {
        let constraints = self
            .committed_constraints
            .unwrap_or(Constraints::UNBOUNDED);
        let result = self.layout(constraints);
        let event = self.emitter.prepare(&result);
        self.committed_constraints = Some(constraints);
        self.committed = Some(result);
        event
    }
}

impl<M> Drop for ShadowTextNode<M> {
    fn drop(&mut self) {
        self.emitter.detach();
    }
}
