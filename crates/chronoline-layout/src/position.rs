#![forbid(unsafe_code)]

//! Position mapping: instants to normalized axis percentages.
//!
//! `percent = (t - start) / (end - start) * 100`
//!
//! # Invariants
//!
//! 1. Monotone: `t1 <= t2` implies `position_of(t1) <= position_of(t2)`.
//! 2. `position_of(start) == 0.0` and `position_of(end) == 100.0` for any
//!    non-degenerate range.
//! 3. A zero-width range maps every instant to [`DEGENERATE_POSITION`].
//! 4. Instants outside the range map outside `[0, 100]`; nothing clamps.
//!
//! Offsets are measured in exact `i128` nanoseconds and only then converted
//! to `f64`. Both the conversion and the division by a positive span are
//! monotone, so ordering survives for ranges of any length and for ranges
//! narrower than a millisecond.

use chrono::{DateTime, Utc};

use crate::model::TimelineEvent;
use crate::range::{TimeRange, total_nanos};

/// Position assigned to every instant when the range has zero width.
pub const DEGENERATE_POSITION: f64 = 50.0;

/// An event paired with its axis position for one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedEvent<'a> {
    pub event: &'a TimelineEvent,
    pub percent: f64,
}

/// Map `timestamp` onto `range` as a percentage.
#[must_use]
pub fn position_of(timestamp: DateTime<Utc>, range: &TimeRange) -> f64 {
    if range.is_degenerate() {
        return DEGENERATE_POSITION;
    }
    let offset = total_nanos(timestamp - range.start()) as f64;
    let span = total_nanos(range.span()) as f64;
    offset / span * 100.0
}

/// Place every event on `range`, preserving input order.
#[must_use]
pub fn placed<'a>(events: &'a [TimelineEvent], range: &TimeRange) -> Vec<PlacedEvent<'a>> {
    events
        .iter()
        .map(|event| PlacedEvent {
            event,
            percent: position_of(event.timestamp, range),
        })
        .collect()
}
