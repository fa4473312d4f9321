//! Cooperative scheduling primitives.
//!
//! Single-threaded and host-driven: the host owns the clock and calls into
//! the controllers once per frame. Nothing here blocks or spawns.

pub mod frame;
pub mod timers;

pub use frame::FrameGate;
pub use timers::{TimerId, TimerQueue};
