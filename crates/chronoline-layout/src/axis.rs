#![forbid(unsafe_code)]

//! Axis markers: evenly spaced, labeled ticks across a time range.
//!
//! Markers depend only on the range, never on the event data.
//!
//! `interval = (end - start) / (count - 1)`; marker `i` sits at
//! `start + i * interval` with position `i / (count - 1) * 100`. The offset
//! is computed in integer nanoseconds so the last marker lands exactly on
//! `end`.

use std::fmt;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::range::{NANOS_PER_SECOND, TimeRange, total_nanos};

/// Marker count used when none is configured.
pub const DEFAULT_MARKER_COUNT: usize = 5;

/// One labeled tick on the axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisMarker {
    pub instant: DateTime<Utc>,
    pub percent: f64,
    pub label: String,
}

/// A validated `strftime` pattern for marker labels.
///
/// The default `%b %-d, %Y` renders like `Jan 5, 2024`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LabelFormat(String);

impl LabelFormat {
    pub const DEFAULT_PATTERN: &'static str = "%b %-d, %Y";

    /// Validate and wrap a `strftime` pattern.
    pub fn new(pattern: impl Into<String>) -> Result<Self, LayoutError> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(LayoutError::InvalidLabelFormat { format: pattern });
        }
        Ok(Self(pattern))
    }

    #[inline]
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.0
    }

    /// Render an instant with this pattern.
    #[must_use]
    pub fn format(&self, at: DateTime<Utc>) -> String {
        at.format(&self.0).to_string()
    }
}

impl Default for LabelFormat {
    fn default() -> Self {
        Self(Self::DEFAULT_PATTERN.to_owned())
    }
}

impl fmt::Display for LabelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LabelFormat {
    type Error = LayoutError;

    fn try_from(pattern: String) -> Result<Self, Self::Error> {
        Self::new(pattern)
    }
}

impl From<LabelFormat> for String {
    fn from(format: LabelFormat) -> Self {
        format.0
    }
}

/// Generate `count` markers with the default label format.
pub fn markers(range: &TimeRange, count: usize) -> Result<Vec<AxisMarker>, LayoutError> {
    markers_with(range, count, &LabelFormat::default())
}

/// Generate `count` markers labeled with `format`.
pub fn markers_with(
    range: &TimeRange,
    count: usize,
    format: &LabelFormat,
) -> Result<Vec<AxisMarker>, LayoutError> {
    if count < 2 {
        return Err(LayoutError::TooFewMarkers { count });
    }

    let span = total_nanos(range.span());
    let last = (count - 1) as i128;
    let out = (0..count)
        .map(|i| {
            let instant = if i == count - 1 {
                range.end()
            } else {
                offset_from(range.start(), span * i as i128 / last).unwrap_or(range.end())
            };
            AxisMarker {
                instant,
                percent: i as f64 / (count - 1) as f64 * 100.0,
                label: format.format(instant),
            }
        })
        .collect();
    Ok(out)
}

fn offset_from(start: DateTime<Utc>, nanos: i128) -> Option<DateTime<Utc>> {
    let secs = i64::try_from(nanos / NANOS_PER_SECOND).ok()?;
    let sub = u32::try_from(nanos % NANOS_PER_SECOND).ok()?;
    start.checked_add_signed(TimeDelta::new(secs, sub)?)
}
