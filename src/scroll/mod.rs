//! Scroll progress, navigation visibility and section tracking.
//!
//! One tracker feeds every scroll-driven bit of chrome on the page: the
//! progress bar, the back-to-top button and the sticky navigation. Scroll
//! notifications are coalesced into at most one computation per frame.

use tracing::trace;

use crate::model::Document;
use crate::timing::FrameGate;

/// Scroll offset after which the progress indicator shows.
pub const INDICATOR_THRESHOLD: f64 = 100.0;
/// Scroll offset after which the back-to-top button shows.
pub const BACK_TO_TOP_THRESHOLD: f64 = 300.0;
/// Scroll offset after which the navigation switches to its compact style.
pub const NAV_SCROLLED_THRESHOLD: f64 = 50.0;
/// Scrolling down past this offset hides the navigation.
pub const NAV_HIDE_THRESHOLD: f64 = 150.0;
/// Viewport line a section must span to be the active one.
pub const ACTIVE_SECTION_LINE: f64 = 150.0;
/// Height of the fixed navigation bar.
pub const NAV_HEIGHT: f64 = 100.0;

/// Derived scroll state for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollSnapshot {
    /// Scroll offset this snapshot was computed for.
    pub scroll_y: f64,
    /// Share of the scrollable range already scrolled, 0 to 100.
    pub progress_percent: f64,
    /// Whether the progress indicator shows.
    pub indicator_visible: bool,
    /// Whether the back-to-top button shows.
    pub back_to_top_visible: bool,
    /// Whether the nav uses its scrolled style.
    pub nav_scrolled: bool,
    /// Whether the sticky nav is shown.
    pub nav_visible: bool,
    /// Section under the navigation line.
    pub active_section: Option<String>,
}

/// Frame-coalesced scroll listener for the page chrome.
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    sections: Vec<String>,
    frame: FrameGate,
    pending_y: f64,
    last_y: f64,
    nav_visible: bool,
    active_section: Option<String>,
}

impl ScrollTracker {
    /// Tracker watching the sections with the given element ids, in
    /// navigation order.
    pub fn new<I, S>(sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sections: sections.into_iter().map(Into::into).collect(),
            frame: FrameGate::new(),
            pending_y: 0.0,
            last_y: 0.0,
            nav_visible: true,
            active_section: None,
        }
    }

    /// Tracked section ids.
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// Record a scroll position. Only the latest position before the next
    /// frame is used.
    pub fn on_scroll(&mut self, y: f64) {
        self.pending_y = y;
        self.frame.request();
    }

    /// Whether a scroll is waiting for the next frame.
    pub fn is_pending(&self) -> bool {
        self.frame.is_pending()
    }

    /// Frame callback. Returns `None` when no scroll happened since the last
    /// frame.
    pub fn on_frame(&mut self, doc: &Document) -> Option<ScrollSnapshot> {
        if !self.frame.take() {
            return None;
        }
        Some(self.compute(doc))
    }

    /// Compute the snapshot for the current position unconditionally, e.g. on
    /// mount.
    pub fn compute(&mut self, doc: &Document) -> ScrollSnapshot {
        let y = self.pending_y;

        if y > self.last_y && y > NAV_HIDE_THRESHOLD {
            self.nav_visible = false;
        } else {
            self.nav_visible = true;
        }
        self.last_y = y;

        if let Some(current) = self.section_at_line(doc, y) {
            if self.active_section.as_deref() != Some(current.as_str()) {
                trace!(section = %current, "active section changed");
                self.active_section = Some(current);
            }
        }

        ScrollSnapshot {
            scroll_y: y,
            progress_percent: progress_percent(y, doc.max_scroll()),
            indicator_visible: y > INDICATOR_THRESHOLD,
            back_to_top_visible: y > BACK_TO_TOP_THRESHOLD,
            nav_scrolled: y > NAV_SCROLLED_THRESHOLD,
            nav_visible: self.nav_visible,
            active_section: self.active_section.clone(),
        }
    }

    fn section_at_line(&self, doc: &Document, scroll_y: f64) -> Option<String> {
        self.sections
            .iter()
            .find(|id| {
                doc.get_by_id(id)
                    .and_then(|node| doc.rect(node))
                    .is_some_and(|rect| {
                        let top = rect.top - scroll_y;
                        let bottom = rect.bottom() - scroll_y;
                        top <= ACTIVE_SECTION_LINE && bottom >= ACTIVE_SECTION_LINE
                    })
            })
            .cloned()
    }
}

fn progress_percent(scroll_y: f64, max_scroll: f64) -> f64 {
    if max_scroll <= 0.0 {
        return 0.0;
    }
    (scroll_y / max_scroll * 100.0).clamp(0.0, 100.0)
}

/// Scroll target for an in-page link to `id`, leaving room for the fixed
/// navigation. `None` if no attached element has that id.
pub fn anchor_offset(doc: &Document, id: &str) -> Option<f64> {
    let rect = doc.get_by_id(id).and_then(|node| doc.rect(node))?;
    Some((rect.top - NAV_HEIGHT).max(0.0))
}
