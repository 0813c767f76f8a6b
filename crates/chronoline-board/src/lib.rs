#![forbid(unsafe_code)]

//! Interactive timeline board: viewport, selection, and connection overlays.
//!
//! # Role in Chronoline
//! `chronoline-board` is the stateful half of the engine. A
//! [`TimelineBoard`] owns one rendered event set together with the
//! [`ViewportController`] (pan + zoom) and the [`SelectionState`] for it,
//! routes host input through the pointer gesture layer, and hands the
//! renderer a [`BoardSnapshot`] on demand.
//!
//! # How it fits in the system
//! Layout math comes from `chronoline-layout` and input normalization from
//! `chronoline-core`. The board only sequences them; it never mutates the
//! events it was given.

pub mod board;
pub mod config;
pub mod error;
pub mod selection;
pub mod viewport;

pub use board::{BoardSnapshot, NodeView, TimelineBoard};
pub use config::BoardConfig;
pub use error::{ConfigError, Result};
pub use selection::{ConnectionEdge, SelectionState, connections_for};
pub use viewport::{
    DEFAULT_WHEEL_ZOOM_FACTOR, DEFAULT_ZOOM_STEP, MAX_ZOOM, MIN_ZOOM, PanMode, Transform,
    ViewportController, ViewportState, clamp_zoom,
};
