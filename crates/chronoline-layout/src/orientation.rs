#![forbid(unsafe_code)]

//! Axis orientation and node placement.

use chronoline_core::geometry::Point;
use serde::{Deserialize, Serialize};

/// Cross-axis coordinate of the timeline centerline, in percent.
pub const CENTERLINE: f64 = 50.0;

/// Direction the time axis runs across the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Time runs left to right.
    Horizontal,
    /// Time runs top to bottom.
    #[default]
    Vertical,
}

impl Orientation {
    #[inline]
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Horizontal)
    }

    /// Place an axis position on the centerline, as `(x%, y%)` of the
    /// container.
    #[must_use]
    pub const fn place(self, percent: f64) -> Point {
        match self {
            Self::Horizontal => Point::new(percent, CENTERLINE),
            Self::Vertical => Point::new(CENTERLINE, percent),
        }
    }
}
