//! folio-motion
//!
//! Interaction logic for a portfolio site, without a browser: scroll-triggered
//! reveal animations, keyboard-accessible modal overlays, scroll-driven page
//! chrome and contact form validation, all running against a headless
//! document model with host-driven time.
//!
//! The controllers are pure state machines over [`model::Document`]. The
//! binary replays a JSON page fixture through [`simulate`] and prints what
//! happened.

pub mod config;
pub mod contact;
pub mod logging;
pub mod model;
pub mod overlay;
pub mod reveal;
pub mod scroll;
pub mod simulate;
pub mod timing;
