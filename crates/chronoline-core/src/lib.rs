#![forbid(unsafe_code)]

//! Core: canonical input events, geometry, and pointer gesture normalization.
//!
//! # Role in Chronoline
//! `chronoline-core` is the input layer. The host (a browser shim, a native
//! window, a test harness) translates its own mouse, touch, wheel and key
//! events into [`event::InputEvent`] values. [`gesture::PointerGesture`]
//! then reduces mouse and touch input to one normalized
//! `Start -> Move* -> End` signal sequence, so the viewport state machine in
//! `chronoline-board` never sees input-source variance.
//!
//! # How it fits in the system
//! `chronoline-layout` is pure data and math and does not depend on input.
//! `chronoline-board` consumes both: layout results for rendering and
//! gesture signals for pan/zoom.

pub mod event;
pub mod geometry;
pub mod gesture;
