//! Single-owner lock over document body scrolling.
//!
//! Only one overlay may hold the lock at a time. Debug builds assert against
//! double-acquire and release-without-acquire; release builds log the misuse
//! and keep "last call wins".

use tracing::{debug, warn};

use super::identifiers::NodeId;

/// Body scroll suspension, owned by at most one overlay.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScrollLockManager {
    owner: Option<NodeId>,
}

impl ScrollLockManager {
    /// Unlocked manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether page scrolling is currently suspended.
    pub fn is_locked(&self) -> bool {
        self.owner.is_some()
    }

    /// Overlay currently holding the lock.
    pub fn owner(&self) -> Option<NodeId> {
        self.owner
    }

    /// Suspend body scrolling on behalf of `owner`.
    pub fn acquire(&mut self, owner: NodeId) {
        if let Some(current) = self.owner {
            debug_assert!(
                current == owner,
                "scroll lock acquired by {owner} while held by {current}"
            );
            if current != owner {
                warn!(%owner, %current, "scroll lock double-acquire, last call wins");
            }
        }
        debug!(%owner, "scroll lock acquired");
        self.owner = Some(owner);
    }

    /// Restore body scrolling. `owner` must be the current holder.
    pub fn release(&mut self, owner: NodeId) {
        debug_assert!(
            self.owner.is_some(),
            "scroll lock released by {owner} without acquire"
        );
        debug_assert!(
            self.owner.is_none_or(|current| current == owner),
            "scroll lock released by {owner} while held by {:?}",
            self.owner
        );
        match self.owner {
            Some(current) if current != owner => {
                warn!(%owner, %current, "scroll lock released by non-owner");
            }
            None => warn!(%owner, "scroll lock released without acquire"),
            Some(_) => {}
        }
        debug!(%owner, "scroll lock released");
        self.owner = None;
    }

    /// Unconditionally restore scrolling. Used when an open overlay unmounts.
    pub fn force_release(&mut self) {
        if let Some(owner) = self.owner.take() {
            debug!(%owner, "scroll lock force-released");
        }
    }
}
