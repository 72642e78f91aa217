// Copyright 2025 the Shadow Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reporting committed layouts to the host.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};

use crate::layout::{LayoutResult, LineRecord};

/// Payload delivered to a layout listener.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLayoutEvent {
    /// Lines of the committed layout.
    pub lines: Vec<LineRecord>,
    /// Some content is not shown.
    pub truncated: bool,
    /// Font scale of the committed layout.
    pub scale: f32,
}

impl From<&LayoutResult> for TextLayoutEvent {
    fn from(result: &LayoutResult) -> Self {
        Self {
            lines: result.lines.clone(),
            truncated: result.truncated,
            scale: result.scale,
        }
    }
}

/// `onTextLayout`.
pub type LayoutListener = Arc<dyn Fn(&TextLayoutEvent) + Send + Sync>;

/// Produces layout events for one node.
///
/// Events are not delivered here. [`LayoutEventEmitter::prepare`] hands back a
/// [`PendingLayoutEvent`] which the host delivers once it is outside the measurement pass.
#[derive(Clone)]
pub struct LayoutEventEmitter {
    listener: Option<LayoutListener>,
    attached: Arc<AtomicBool>,
}

impl fmt::Debug for LayoutEventEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutEventEmitter")
            .field("listener", &self.listener.is_some())
            .field("attached", &self.is_attached())
            .finish()
    }
}

impl Default for LayoutEventEmitter {
    fn default() -> Self {
        Self {
            listener: None,
            attached: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl LayoutEventEmitter {
    /// Replaces the listener.
    pub fn set_listener(&mut self, listener: Option<LayoutListener>) {
        self.listener = listener;
    }

    /// Returns `true` if a listener is set.
    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    /// Marks the owning node as gone; pending events will be discarded.
    pub fn detach(&self) {
        self.attached.store(false, Ordering::Release);
    }

    /// Returns `true` until [`LayoutEventEmitter::detach`] is called.
    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::Acquire)
    }

    /// Builds the event for a committed `result`.
    ///
    /// Returns `None` without a listener or once detached.
    pub fn prepare(&self, result: &LayoutResult) -> Option<PendingLayoutEvent> {
        let listener = self.listener.clone()?;
        if !self.is_attached() {
            return None;
        }
        Some(PendingLayoutEvent {
            listener,
            event: TextLayoutEvent::from(result),
            attached: Arc::clone(&self.attached),
        })
    }
}

/// A layout event waiting to be delivered.
#[must_use = "a pending event does nothing until delivered"]
pub struct PendingLayoutEvent {
    listener: LayoutListener,
    event: TextLayoutEvent,
    attached: Arc<AtomicBool>,
}

impl fmt::Debug for PendingLayoutEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingLayoutEvent")
            .field("event", &self.event)
            .field("attached", &self.attached.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}

impl PendingLayoutEvent {
    /// The payload.
    pub fn event(&self) -> &TextLayoutEvent {
        &self.event
    }

    /// Invokes the listener, unless the node was detached since the event was prepared.
    ///
    /// Returns whether the listener ran.
    pub fn deliver(self) -> bool {
        if !self.attached.load(Ordering::Acquire) {
            log::trace!("dropping layout event for a detached node");
            return false;
        }
        (self.listener)(&self.event);
        true
    }
}
