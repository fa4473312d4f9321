//! Identifier newtypes for document nodes.
//!
//! A `NodeId` is a handle into the document arena, not an owning reference.
//! Slots are never reused, so a stale id can be detected (the node is detached)
//! but can never alias a different node.

use std::fmt;

/// Handle to a node in a [`Document`](crate::model::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Arena slot of this node.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
