//! Keyboard accessibility for modal overlays.
//!
//! While an overlay is open it owns focus: Tab and Shift+Tab cycle through its
//! focusable elements, Escape closes it, and page scrolling is suspended. On
//! close, focus goes back to whatever had it before the overlay opened.
//!
//! An overlay that shows one of several items (a project detail modal) can
//! also page through them with the left and right arrow keys.

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, trace};

use crate::model::{Document, NodeId};

/// What `handle_keydown` did with a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not handled; the default action proceeds.
    Ignored,
    /// Focus wrapped around the overlay; the default action is suppressed.
    Wrapped,
    /// The overlay closed.
    Closed,
    /// An arrow key moved to another item; `index` is the new position.
    Paged {
        /// Position of the item now shown.
        index: usize,
    },
}

/// Position within the items an overlay pages through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    index: usize,
    count: usize,
}

impl Pager {
    /// Pager over `count` items showing `index`. `None` if `index` is out of
    /// range.
    pub fn new(count: usize, index: usize) -> Option<Self> {
        (index < count).then_some(Self { index, count })
    }

    /// Item being shown.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of items.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Step one item. Stops at both ends; returns the new index if it moved.
    fn step(&mut self, forward: bool) -> Option<usize> {
        let next = if forward {
            Some(self.index + 1).filter(|&i| i < self.count)
        } else {
            self.index.checked_sub(1)
        }?;
        self.index = next;
        Some(next)
    }
}

/// Accessibility state held while an overlay is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayState {
    /// Element focused before opening. A handle only; it may be detached by
    /// the time the overlay closes.
    pub previously_focused: Option<NodeId>,
}

type CloseHandler = Box<dyn FnMut()>;

/// Focus trap, Escape handling and scroll locking for one overlay.
pub struct OverlayFocusController {
    root: NodeId,
    backdrop: Option<NodeId>,
    state: Option<OverlayState>,
    pager: Option<Pager>,
    on_close: Option<CloseHandler>,
}

impl fmt::Debug for OverlayFocusController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayFocusController")
            .field("root", &self.root)
            .field("backdrop", &self.backdrop)
            .field("state", &self.state)
            .field("pager", &self.pager)
            .field("on_close", &self.on_close.is_some())
            .finish()
    }
}

impl OverlayFocusController {
    /// Controller for the overlay rooted at `root` (the dialog content node).
    pub fn new(root: NodeId) -> Self {
        Self {
            root,
            backdrop: None,
            state: None,
            pager: None,
            on_close: None,
        }
    }

    /// Node whose direct clicks close the overlay.
    pub fn with_backdrop(mut self, backdrop: NodeId) -> Self {
        self.backdrop = Some(backdrop);
        self
    }

    /// Enable arrow-key paging over the given items.
    pub fn with_pager(mut self, pager: Pager) -> Self {
        self.pager = Some(pager);
        self
    }

    /// Callback run whenever the overlay closes itself (Escape, backdrop
    /// click or `close`).
    pub fn with_close_handler(mut self, handler: impl FnMut() + 'static) -> Self {
        self.on_close = Some(Box::new(handler));
        self
    }

    /// Overlay root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Whether the overlay is open.
    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    /// Captured state while open.
    pub fn state(&self) -> Option<&OverlayState> {
        self.state.as_ref()
    }

    /// Paging position, if paging is enabled.
    pub fn pager(&self) -> Option<&Pager> {
        self.pager.as_ref()
    }

    /// Follow the host's open flag.
    pub fn set_open(&mut self, doc: &mut Document, open: bool) {
        if open {
            self.on_open(doc);
        } else {
            self.on_close(doc);
        }
    }

    /// Capture the current focus, focus the overlay root and lock scrolling.
    /// A no-op if already open.
    pub fn on_open(&mut self, doc: &mut Document) {
        if self.is_open() {
            return;
        }
        let previously_focused = doc.active_element();
        doc.focus(self.root);
        doc.scroll_lock_mut().acquire(self.root);
        self.state = Some(OverlayState { previously_focused });
        debug!(root = %self.root, ?previously_focused, "overlay opened");
    }

    /// Unlock scrolling and restore the captured focus if that element is
    /// still attached. If nothing had focus before opening, focus returns to
    /// the body. A no-op if not open.
    pub fn on_close(&mut self, doc: &mut Document) {
        let Some(state) = self.state.take() else {
            return;
        };
        doc.scroll_lock_mut().release(self.root);
        let restored = match state.previously_focused {
            Some(prev) => doc.focus(prev),
            None => {
                doc.blur();
                false
            }
        };
        debug!(root = %self.root, restored, "overlay closed");
    }

    /// Close the overlay and notify the close handler.
    pub fn close(&mut self, doc: &mut Document) {
        if !self.is_open() {
            return;
        }
        self.on_close(doc);
        if let Some(handler) = self.on_close.as_mut() {
            handler();
        }
    }

    /// The hosting view is going away. Releases the scroll lock if open,
    /// without touching focus.
    pub fn unmount(&mut self, doc: &mut Document) {
        if self.state.take().is_some() {
            doc.scroll_lock_mut().force_release();
            debug!(root = %self.root, "open overlay unmounted");
        }
    }

    /// Key listener, active only while the overlay is open.
    pub fn handle_keydown(&mut self, doc: &mut Document, key: KeyEvent) -> KeyOutcome {
        if !self.is_open() || key.kind == KeyEventKind::Release {
            return KeyOutcome::Ignored;
        }
        match key.code {
            KeyCode::Esc => {
                self.close(doc);
                KeyOutcome::Closed
            }
            KeyCode::BackTab => self.trap_tab(doc, true),
            KeyCode::Tab => self.trap_tab(doc, key.modifiers.contains(KeyModifiers::SHIFT)),
            KeyCode::Left => self.page(false),
            KeyCode::Right => self.page(true),
            _ => KeyOutcome::Ignored,
        }
    }

    /// Pointer click on `target`. Only a click whose target is the backdrop
    /// itself closes the overlay. Returns `true` if it closed.
    pub fn handle_click(&mut self, doc: &mut Document, target: NodeId) -> bool {
        if !self.is_open() || self.backdrop != Some(target) {
            return false;
        }
        self.close(doc);
        true
    }

    fn page(&mut self, forward: bool) -> KeyOutcome {
        match self.pager.as_mut().and_then(|p| p.step(forward)) {
            Some(index) => {
                trace!(root = %self.root, index, "overlay paged");
                KeyOutcome::Paged { index }
            }
            None => KeyOutcome::Ignored,
        }
    }

    fn trap_tab(&self, doc: &mut Document, backward: bool) -> KeyOutcome {
        let focusable = doc.focusable_within(self.root);
        let (Some(&first), Some(&last)) = (focusable.first(), focusable.last()) else {
            return KeyOutcome::Ignored;
        };
        let active = doc.active_element();
        let wrap_to = match (backward, active) {
            (true, Some(a)) if a == first => last,
            (false, Some(a)) if a == last => first,
            _ => return KeyOutcome::Ignored,
        };
        doc.focus(wrap_to);
        trace!(root = %self.root, to = %wrap_to, backward, "focus wrapped");
        KeyOutcome::Wrapped
    }
}

#[cfg(test)]
#[path = "focus_tests.rs"]
mod tests;
