//! Frame-aligned coalescing of high-frequency notifications.
//!
//! Any number of scroll or resize notifications between two frames collapse
//! into a single pending frame, so expensive recomputation runs at most once
//! per rendered frame.

/// One-slot "frame requested" latch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameGate {
    pending: bool,
}

impl FrameGate {
    /// Gate with no frame pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a frame. Returns `true` only for the request that actually
    /// scheduled one; later requests before the frame runs are absorbed.
    pub fn request(&mut self) -> bool {
        !std::mem::replace(&mut self.pending, true)
    }

    /// Consume the pending frame, if any.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Whether a frame is pending.
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
