#![forbid(unsafe_code)]

//! Chronoline public facade crate.
//!
//! This crate provides the stable surface area for users. It re-exports the
//! common types from the internal crates and offers a lightweight prelude
//! for day-to-day usage.
//!
//! ```
//! use chronoline::prelude::*;
//!
//! let events = vec![
//!     TimelineEvent::at_millis("a", "Kickoff", 1_704_067_200_000)?,
//!     TimelineEvent::at_millis("b", "Launch", 1_704_931_200_000)?.with_connections(["a"]),
//! ];
//! let mut board = TimelineBoard::new(events, BoardConfig::default());
//! board.click_event("b");
//! assert_eq!(board.connections().len(), 1);
//! # Ok::<(), chronoline::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use chronoline_core::event::{
    InputEvent, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind,
    TouchEvent, TouchPhase, TouchPoint, WheelEvent,
};
pub use chronoline_core::geometry::Point;
pub use chronoline_core::gesture::{GestureSignal, PointerGesture};

// --- Layout re-exports -----------------------------------------------------

pub use chronoline_layout::{
    AxisMarker, Color, EventId, LabelFormat, LayoutError, MilestoneKind, MilestoneStyle,
    Orientation, PlacedEvent, TimeRange, TimelineEvent, markers, position_of, resolve,
};

// --- Board re-exports ------------------------------------------------------

pub use chronoline_board::{
    BoardConfig, BoardSnapshot, ConfigError, ConnectionEdge, NodeView, SelectionState,
    TimelineBoard, Transform, ViewportController, ViewportState,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Chronoline callers.
#[derive(Debug)]
pub enum Error {
    /// Invalid layout input (inverted range, too few markers, ...).
    Layout(LayoutError),
    /// Invalid board configuration or event set.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Layout(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<LayoutError> for Error {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for Chronoline APIs.
pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use crate::{
        BoardConfig, BoardSnapshot, ConnectionEdge, Error, EventId, InputEvent, Orientation,
        Result, SelectionState, TimeRange, TimelineBoard, TimelineEvent, ViewportState,
    };

    pub use crate::{board, core, layout};
}

pub use chronoline_board as board;
pub use chronoline_core as core;
pub use chronoline_layout as layout;
