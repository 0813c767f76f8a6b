#![forbid(unsafe_code)]

//! Time-range resolution: the axis domain for a set of events.
//!
//! # Invariants
//!
//! 1. Every [`TimeRange`] satisfies `start <= end` (enforced by
//!    [`TimeRange::new`] and by deserialization).
//! 2. [`resolve`] is total: an explicit override wins verbatim, an empty
//!    event set yields a fixed fallback window, otherwise the range is the
//!    min/max of the event timestamps.
//! 3. The fallback window is never empty, so downstream position math
//!    does not divide by zero for the no-data case.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::model::TimelineEvent;

/// Length of the fallback window used when there are no events.
pub const FALLBACK_WINDOW_DAYS: i64 = 365;

pub(crate) const NANOS_PER_SECOND: i128 = 1_000_000_000;

/// Exact nanoseconds of a signed delta. `i128` holds every `TimeDelta`, so
/// spans of any length keep full resolution.
pub(crate) fn total_nanos(delta: TimeDelta) -> i128 {
    i128::from(delta.num_seconds()) * NANOS_PER_SECOND + i128::from(delta.subsec_nanos())
}

/// An inclusive `[start, end]` span of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct TimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawRange> for TimeRange {
    type Error = LayoutError;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl TimeRange {
    /// Create a range, rejecting `start > end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, LayoutError> {
        if start > end {
            return Err(LayoutError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A zero-width range at a single instant.
    #[must_use]
    pub const fn instant(at: DateTime<Utc>) -> Self {
        Self { start: at, end: at }
    }

    /// The fallback window: [`FALLBACK_WINDOW_DAYS`] days ending at `now`.
    #[must_use]
    pub fn fallback_ending_at(now: DateTime<Utc>) -> Self {
        let start = now
            .checked_sub_signed(TimeDelta::days(FALLBACK_WINDOW_DAYS))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self { start, end: now }
    }

    #[inline]
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    #[inline]
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// `end - start`; never negative.
    #[must_use]
    pub fn span(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Whether `start == end`.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Whether `at` lies within the inclusive range.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

/// Resolve the axis domain for `events`, reading the wall clock for the
/// empty-set fallback.
#[must_use]
pub fn resolve(events: &[TimelineEvent], override_range: Option<TimeRange>) -> TimeRange {
    resolve_at(events, override_range, Utc::now())
}

/// Resolve the axis domain with an explicit clock reading.
#[must_use]
pub fn resolve_at(
    events: &[TimelineEvent],
    override_range: Option<TimeRange>,
    now: DateTime<Utc>,
) -> TimeRange {
    if let Some(range) = override_range {
        return range;
    }

    let mut stamps = events.iter().map(|e| e.timestamp);
    let Some(first) = stamps.next() else {
        #[cfg(feature = "tracing")]
        tracing::trace!(target: "chronoline.range", %now, "no events, using fallback window");
        return TimeRange::fallback_ending_at(now);
    };

    let (start, end) = stamps.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
    TimeRange { start, end }
}
