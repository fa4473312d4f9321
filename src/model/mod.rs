//! Domain model types.
//!
//! The document tree, animation vocabulary and the body scroll lock. Nothing
//! in here schedules work; controllers live in `reveal` and `overlay`.

pub mod animation;
pub mod document;
pub mod error;
pub mod fixture;
pub mod identifiers;
pub mod scroll_lock;

// Re-export for convenience
pub use animation::{AnimationKind, AnimationSpec, Easing, Motion, Offset, VisualState};
pub use document::{Document, Element, Node, ReadyState, Rect, Tag, Viewport};
pub use error::{AppError, FixtureError};
pub use fixture::PageFixture;
pub use identifiers::NodeId;
pub use scroll_lock::ScrollLockManager;
