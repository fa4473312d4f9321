//! Modal overlays.
//!
//! Only one overlay may be open at a time: the body scroll lock has a single
//! owner and focus restoration is not stacked.

pub mod focus;

pub use focus::{KeyOutcome, OverlayFocusController, OverlayState, Pager};
