//! Scroll-triggered reveal animations.
//!
//! [`RevealAnimationController`] scans the document for elements to animate,
//! binds each one to a viewport trigger and plays a one-shot entrance tween the
//! first time the trigger line is crossed.
//!
//! # Lifecycle
//! - `initialize` schedules a scan after the settle delay (or after
//!   `document_ready` when the page is still loading). A second call replaces
//!   the pending scan.
//! - `refresh` recaptures viewport geometry and re-initializes after the
//!   refresh delay; a burst of calls collapses into one re-initialization.
//! - `cleanup` cancels everything and hands every element back to its authored
//!   style.
//!
//! The host drives time: it calls `advance` once per frame with the current
//! page time and `notify_scroll` whenever the page scrolls.

pub mod target;
pub mod trigger;

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use tracing::{debug, trace};

use crate::model::{AnimationKind, Document, Motion, NodeId, ReadyState};
use crate::timing::{FrameGate, TimerId, TimerQueue};

pub use target::{AnimationTarget, RevealPass, Tween};
pub use trigger::{is_in_viewport, ViewportTrigger};

/// Timing constants for the reveal controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealTiming {
    /// Wait between "document ready" and the scan, letting late layout settle.
    pub settle_delay: Duration,
    /// Debounce window for `refresh`.
    pub refresh_delay: Duration,
    /// Extra delay per marked element, in document order (seconds).
    pub marker_stagger: f64,
    /// Delay per section index (seconds).
    pub section_stagger: f64,
    /// Delay between consecutive cards of the grouped stagger (seconds).
    pub card_stagger: f64,
    /// Where the trigger line sits.
    pub trigger: ViewportTrigger,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(100),
            refresh_delay: Duration::from_millis(100),
            marker_stagger: 0.05,
            section_stagger: 0.1,
            card_stagger: 0.1,
            trigger: ViewportTrigger::default(),
        }
    }
}

/// Motion for unmarked sections.
pub fn section_motion() -> Motion {
    Motion::rise(40.0, 1.0)
}

/// Motion for members of the card stagger.
pub fn card_motion() -> Motion {
    Motion::rise(50.0, 0.8)
}

/// Observable effects of one `advance` call.
#[derive(Debug, Clone, PartialEq)]
pub enum RevealEvent {
    /// A new target was registered and set to its hidden state.
    Bound {
        /// Bound element.
        node: NodeId,
        /// Animation it will play.
        kind: AnimationKind,
        /// Pass that claimed it.
        pass: RevealPass,
        /// Delay after firing, in seconds.
        delay: f64,
    },
    /// A trigger fired; the tween starts at `start_at`.
    Fired {
        /// Fired element.
        node: NodeId,
        /// Animation being played.
        kind: AnimationKind,
        /// When the tween starts moving.
        start_at: Duration,
    },
    /// A tween reached its final visible state.
    Completed {
        /// Finished element.
        node: NodeId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RevealTask {
    Scan,
    Reinitialize,
}

/// Orchestrates one-shot entrance animations for a document.
#[derive(Debug, Clone)]
pub struct RevealAnimationController {
    timing: RevealTiming,
    timers: TimerQueue<RevealTask>,
    scan_timer: Option<TimerId>,
    refresh_timer: Option<TimerId>,
    awaiting_ready: bool,
    viewport_height: f64,
    targets: Vec<AnimationTarget>,
    frame: FrameGate,
    initialized: bool,
}

impl Default for RevealAnimationController {
    fn default() -> Self {
        Self::new(RevealTiming::default())
    }
}

impl RevealAnimationController {
    /// Controller with the given timing.
    pub fn new(timing: RevealTiming) -> Self {
        Self {
            timing,
            timers: TimerQueue::new(),
            scan_timer: None,
            refresh_timer: None,
            awaiting_ready: false,
            viewport_height: 0.0,
            targets: Vec::new(),
            frame: FrameGate::new(),
            initialized: false,
        }
    }

    /// Timing in use.
    pub fn timing(&self) -> &RevealTiming {
        &self.timing
    }

    /// Registered targets in binding order.
    pub fn targets(&self) -> &[AnimationTarget] {
        &self.targets
    }

    /// Target bound to `node`, if any.
    pub fn target(&self, node: NodeId) -> Option<&AnimationTarget> {
        self.targets.iter().find(|t| t.element == node)
    }

    /// Whether `initialize` has run since the last cleanup.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Number of outstanding timers (scan and refresh).
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Whether a scan is waiting for the document to finish loading.
    pub fn is_awaiting_ready(&self) -> bool {
        self.awaiting_ready
    }

    /// Schedule a scan of `doc`. Safe to call repeatedly; each call replaces
    /// any scan still pending.
    pub fn initialize(&mut self, doc: &Document, now: Duration) {
        self.initialized = true;
        self.viewport_height = doc.viewport().height;
        if let Some(id) = self.scan_timer.take() {
            self.timers.cancel(id);
        }
        if doc.ready_state() == ReadyState::Loading {
            debug!("document still loading, deferring reveal scan");
            self.awaiting_ready = true;
            return;
        }
        self.awaiting_ready = false;
        self.schedule_scan(now);
    }

    /// The document finished loading. Starts a deferred scan, if any.
    pub fn document_ready(&mut self, now: Duration) {
        if std::mem::take(&mut self.awaiting_ready) {
            debug!("document ready, scheduling deferred reveal scan");
            self.schedule_scan(now);
        }
    }

    /// Recapture viewport geometry now and re-initialize after the refresh
    /// delay. Repeated calls restart the delay instead of stacking.
    pub fn refresh(&mut self, doc: &Document, now: Duration) {
        self.viewport_height = doc.viewport().height;
        self.frame.request();
        if let Some(id) = self.refresh_timer.take() {
            self.timers.cancel(id);
        }
        let due = now.saturating_add(self.timing.refresh_delay);
        self.refresh_timer = Some(self.timers.schedule(due, RevealTask::Reinitialize));
        trace!(viewport_height = self.viewport_height, "reveal refresh scheduled");
    }

    /// Page scrolled; re-evaluate triggers on the next frame.
    pub fn notify_scroll(&mut self) {
        self.frame.request();
    }

    /// Cancel all timers and triggers and clear every inline override this
    /// controller wrote. A no-op when nothing was initialized.
    pub fn cleanup(&mut self, doc: &mut Document) {
        if !self.initialized && self.targets.is_empty() && self.timers.is_empty() {
            return;
        }
        self.timers.cancel_all();
        self.scan_timer = None;
        self.refresh_timer = None;
        self.awaiting_ready = false;
        self.frame.take();
        for target in self.targets.drain(..) {
            doc.set_inline_style(target.element, None);
        }
        self.initialized = false;
        debug!("reveal animations cleaned up");
    }

    /// Frame callback: run due timers, evaluate triggers if a frame was
    /// requested, and advance running tweens.
    pub fn advance(&mut self, doc: &mut Document, now: Duration) -> Vec<RevealEvent> {
        let mut events = Vec::new();

        while let Some(task) = self.timers.pop_next_due(now) {
            match task {
                RevealTask::Scan => {
                    self.scan_timer = None;
                    events.extend(self.bind(doc));
                }
                RevealTask::Reinitialize => {
                    self.refresh_timer = None;
                    self.initialize(doc, now);
                }
            }
        }

        if self.frame.take() {
            events.extend(self.evaluate_triggers(doc, now));
        }

        for target in &mut self.targets {
            if !doc.is_attached(target.element) {
                continue;
            }
            if let Some((state, finished)) = target.sample(now) {
                doc.set_inline_style(target.element, Some(state));
                if finished {
                    events.push(RevealEvent::Completed {
                        node: target.element,
                    });
                }
            }
        }

        events
    }

    fn schedule_scan(&mut self, now: Duration) {
        let due = now.saturating_add(self.timing.settle_delay);
        self.scan_timer = Some(self.timers.schedule(due, RevealTask::Scan));
    }

    /// Scan the document and replace the current bindings.
    fn bind(&mut self, doc: &mut Document) -> Vec<RevealEvent> {
        let mut previous: HashMap<NodeId, AnimationTarget> = self
            .targets
            .drain(..)
            .map(|t| (t.element, t))
            .collect();
        let mut claimed = HashSet::new();
        let mut fresh = Vec::new();

        for (index, node) in doc.marked().into_iter().enumerate() {
            let Some(spec) = doc.element(node).and_then(|e| e.animation) else {
                continue;
            };
            let delay = spec.delay + index as f64 * self.timing.marker_stagger;
            claimed.insert(node);
            fresh.push(AnimationTarget::new(
                node,
                spec.kind,
                spec.kind.motion(),
                delay,
                RevealPass::Marked,
                node,
            ));
        }

        for (index, node) in doc.sections().into_iter().enumerate() {
            if claimed.contains(&node) {
                continue;
            }
            claimed.insert(node);
            fresh.push(AnimationTarget::new(
                node,
                AnimationKind::SlideUp,
                section_motion(),
                index as f64 * self.timing.section_stagger,
                RevealPass::Section,
                node,
            ));
        }

        let cards: Vec<NodeId> = doc
            .cards()
            .into_iter()
            .filter(|n| !claimed.contains(n))
            .collect();
        if let Some(&anchor) = cards.first() {
            for (index, node) in cards.into_iter().enumerate() {
                fresh.push(AnimationTarget::new(
                    node,
                    AnimationKind::SlideUp,
                    card_motion(),
                    index as f64 * self.timing.card_stagger,
                    RevealPass::Card,
                    anchor,
                ));
            }
        }

        let mut events = Vec::new();
        for target in &mut fresh {
            match previous.remove(&target.element) {
                Some(old) if old.has_fired() => target.inherit(&old),
                _ => {
                    doc.set_inline_style(target.element, Some(target.motion.hidden_state()));
                    events.push(RevealEvent::Bound {
                        node: target.element,
                        kind: target.kind,
                        pass: target.pass,
                        delay: target.delay_seconds,
                    });
                }
            }
        }
        for stale in previous.into_values() {
            doc.set_inline_style(stale.element, None);
        }

        debug!(targets = fresh.len(), "reveal targets bound");
        self.targets = fresh;
        self.frame.request();
        events
    }

    fn evaluate_triggers(&mut self, doc: &Document, now: Duration) -> Vec<RevealEvent> {
        let scroll_y = doc.viewport().scroll_y;
        let trigger = self.timing.trigger;
        let mut events = Vec::new();
        for target in &mut self.targets {
            if target.has_fired() || !doc.is_attached(target.element) {
                continue;
            }
            let anchor = if doc.is_attached(target.anchor) {
                target.anchor
            } else {
                target.element
            };
            let Some(rect) = doc.rect(anchor) else {
                continue;
            };
            if !trigger.is_crossed(rect, scroll_y, self.viewport_height) {
                continue;
            }
            if let Some(start_at) = target.fire(now) {
                trace!(node = %target.element, kind = %target.kind, ?start_at, "reveal fired");
                events.push(RevealEvent::Fired {
                    node: target.element,
                    kind: target.kind,
                    start_at,
                });
            }
        }
        events
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
