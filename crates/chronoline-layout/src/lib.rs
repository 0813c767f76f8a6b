#![forbid(unsafe_code)]

//! Timeline layout: data model, time-range resolution, and axis placement.
//!
//! Everything in this crate is pure: given the same events and the same
//! clock reading it produces the same layout. The stateful parts of the
//! engine (viewport, selection) live in `chronoline-board`.
//!
//! # Pipeline
//!
//! ```text
//! &[TimelineEvent] ─▶ range::resolve ─▶ TimeRange ─┬─▶ position::placed ─▶ PlacedEvent { percent }
//!                                                 └─▶ axis::markers     ─▶ AxisMarker { percent, label }
//! ```
//!
//! Percent values are normalized to `[0, 100]` for instants inside the
//! range and are deliberately left unclamped outside it.

pub mod axis;
pub mod error;
pub mod milestone;
pub mod model;
pub mod orientation;
pub mod position;
pub mod range;

pub use axis::{AxisMarker, DEFAULT_MARKER_COUNT, LabelFormat, markers, markers_with};
pub use error::LayoutError;
pub use milestone::{MilestoneKind, MilestoneStyle, UnknownMilestone};
pub use model::{Color, EventId, Metadata, TimelineEvent};
pub use orientation::Orientation;
pub use position::{DEGENERATE_POSITION, PlacedEvent, placed, position_of};
pub use range::{FALLBACK_WINDOW_DAYS, TimeRange, resolve, resolve_at};
