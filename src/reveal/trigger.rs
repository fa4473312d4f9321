//! Viewport intersection triggers.

use crate::model::{Document, NodeId, Rect, Viewport};

/// How far into the viewport an anchor must travel before its target fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTrigger {
    /// Fraction of the viewport height, measured from the bottom edge, that
    /// the anchor's top must pass. 0.15 fires at 85% of the viewport.
    pub threshold_ratio: f64,
    /// Extra pixels added below the trigger line; positive values fire earlier.
    pub root_margin: f64,
}

impl Default for ViewportTrigger {
    fn default() -> Self {
        Self {
            threshold_ratio: 0.15,
            root_margin: 0.0,
        }
    }
}

impl ViewportTrigger {
    /// Document-space y of the trigger line for the given scroll offset and
    /// viewport height.
    ///
    /// A non-finite ratio or margin falls back to the default value.
    pub fn trigger_line(&self, scroll_y: f64, viewport_height: f64) -> f64 {
        let defaults = Self::default();
        let ratio = if self.threshold_ratio.is_finite() {
            self.threshold_ratio.clamp(0.0, 1.0)
        } else {
            defaults.threshold_ratio
        };
        let margin = if self.root_margin.is_finite() {
            self.root_margin
        } else {
            defaults.root_margin
        };
        scroll_y + viewport_height * (1.0 - ratio) + margin
    }

    /// Whether the anchor's top edge has reached the trigger line.
    pub fn is_crossed(&self, anchor: Rect, scroll_y: f64, viewport_height: f64) -> bool {
        anchor.top <= self.trigger_line(scroll_y, viewport_height)
    }
}

/// Whether `node` lies entirely inside the visible viewport.
///
/// Detached nodes are never in view.
pub fn is_in_viewport(doc: &Document, node: NodeId) -> bool {
    if !doc.is_attached(node) {
        return false;
    }
    let Some(rect) = doc.rect(node) else {
        return false;
    };
    let Viewport {
        width,
        height,
        scroll_y,
    } = doc.viewport();
    let top = rect.top - scroll_y;
    top >= 0.0 && rect.left >= 0.0 && top + rect.height <= height && rect.right() <= width
}
