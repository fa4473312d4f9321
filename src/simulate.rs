//! Headless replay of a page through a scroll script.
//!
//! Drives a [`RevealAnimationController`] and a [`ScrollTracker`] over a
//! [`Document`] the way a browser would: one callback per frame on a fixed
//! interval, with the page scrolling a fixed distance each frame. Everything
//! observable is collected into a [`Timeline`].

use std::fmt;
use std::time::Duration;

use tracing::{debug, info};

use crate::model::{Document, NodeId, ReadyState};
use crate::reveal::{RevealAnimationController, RevealEvent, RevealPass, RevealTiming};
use crate::scroll::ScrollTracker;

/// Viewport change applied at the start of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resize {
    /// Frame index the resize applies to.
    pub frame: u32,
    /// New viewport width.
    pub width: f64,
    /// New viewport height.
    pub height: f64,
}

/// How the page is scrolled during a replay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollScript {
    /// Pixels scrolled per frame.
    pub step_px: f64,
    /// Number of frames to run.
    pub frames: u32,
    /// Virtual time between frames.
    pub frame_interval: Duration,
    /// Optional viewport change.
    pub resize: Option<Resize>,
}

impl Default for ScrollScript {
    fn default() -> Self {
        Self {
            step_px: 40.0,
            frames: 120,
            frame_interval: Duration::from_millis(16),
            resize: None,
        }
    }
}

/// Something that happened during the replay.
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineEvent {
    /// The document finished loading.
    Ready,
    /// The viewport was resized.
    Resized {
        /// New viewport width.
        width: f64,
        /// New viewport height.
        height: f64,
    },
    /// A reveal controller event.
    Reveal(RevealEvent),
    /// A different section now sits under the navigation line.
    Section(String),
    /// The sticky navigation was hidden (`false`) or shown again (`true`).
    Nav(bool),
}

/// One timestamped event.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    /// Virtual time of the event.
    pub at: Duration,
    /// What happened.
    pub event: TimelineEvent,
}

/// Ordered record of a replay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    /// Entries in time order.
    pub entries: Vec<TimelineEntry>,
    /// Scroll offset after the last frame.
    pub final_scroll: f64,
}

impl Timeline {
    fn push(&mut self, at: Duration, event: TimelineEvent) {
        self.entries.push(TimelineEntry { at, event });
    }

    /// Nodes in the order their reveals fired.
    pub fn fired(&self) -> Vec<NodeId> {
        self.entries
            .iter()
            .filter_map(|e| match e.event {
                TimelineEvent::Reveal(RevealEvent::Fired { node, .. }) => Some(node),
                _ => None,
            })
            .collect()
    }
}

fn pass_name(pass: RevealPass) -> &'static str {
    match pass {
        RevealPass::Marked => "marked",
        RevealPass::Section => "section",
        RevealPass::Card => "card",
    }
}

impl fmt::Display for TimelineEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.3}s ", self.at.as_secs_f64())?;
        match &self.event {
            TimelineEvent::Ready => write!(f, "ready"),
            TimelineEvent::Resized { width, height } => write!(f, "resize {width}x{height}"),
            TimelineEvent::Reveal(RevealEvent::Bound {
                node,
                kind,
                pass,
                delay,
            }) => write!(f, "bound {node} {kind} {} delay={delay:.2}", pass_name(*pass)),
            TimelineEvent::Reveal(RevealEvent::Fired {
                node,
                kind,
                start_at,
            }) => write!(f, "fired {node} {kind} start={:.3}s", start_at.as_secs_f64()),
            TimelineEvent::Reveal(RevealEvent::Completed { node }) => {
                write!(f, "completed {node}")
            }
            TimelineEvent::Section(id) => write!(f, "section {id}"),
            TimelineEvent::Nav(true) => write!(f, "nav shown"),
            TimelineEvent::Nav(false) => write!(f, "nav hidden"),
        }
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        write!(f, "final scroll {}", self.final_scroll)
    }
}

/// Replay `script` over `doc`, starting at page time zero.
///
/// A document that is still loading becomes ready on the first frame.
pub fn run(doc: &mut Document, script: &ScrollScript, timing: RevealTiming) -> Timeline {
    let interval = script.frame_interval.max(Duration::from_millis(1));
    let sections: Vec<String> = doc
        .sections()
        .into_iter()
        .filter_map(|n| doc.element(n).and_then(|e| e.id.clone()))
        .collect();

    let mut timeline = Timeline::default();
    let mut reveal = RevealAnimationController::new(timing);
    let mut tracker = ScrollTracker::new(sections);
    let mut now = Duration::ZERO;

    reveal.initialize(doc, now);
    tracker.on_scroll(doc.viewport().scroll_y);
    let mut last = tracker.compute(doc);
    if let Some(id) = &last.active_section {
        timeline.push(now, TimelineEvent::Section(id.clone()));
    }

    for frame in 1..=script.frames {
        now += interval;

        if doc.ready_state() == ReadyState::Loading {
            doc.set_ready_state(ReadyState::Complete);
            reveal.document_ready(now);
            timeline.push(now, TimelineEvent::Ready);
        }

        if let Some(resize) = script.resize.filter(|r| r.frame == frame) {
            doc.resize(resize.width, resize.height);
            reveal.refresh(doc, now);
            timeline.push(
                now,
                TimelineEvent::Resized {
                    width: resize.width,
                    height: resize.height,
                },
            );
        }

        let before = doc.viewport().scroll_y;
        doc.scroll_to(before + script.step_px);
        let after = doc.viewport().scroll_y;
        if after != before {
            reveal.notify_scroll();
            tracker.on_scroll(after);
        }

        for event in reveal.advance(doc, now) {
            timeline.push(now, TimelineEvent::Reveal(event));
        }

        if let Some(snapshot) = tracker.on_frame(doc) {
            if snapshot.active_section != last.active_section {
                if let Some(id) = &snapshot.active_section {
                    timeline.push(now, TimelineEvent::Section(id.clone()));
                }
            }
            if snapshot.nav_visible != last.nav_visible {
                timeline.push(now, TimelineEvent::Nav(snapshot.nav_visible));
            }
            last = snapshot;
        }
    }

    reveal.cleanup(doc);
    timeline.final_scroll = doc.viewport().scroll_y;
    debug!(frames = script.frames, ?now, "replay finished");
    info!(
        events = timeline.entries.len(),
        fired = timeline.fired().len(),
        "replay summary"
    );
    timeline
}
