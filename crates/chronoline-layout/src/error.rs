use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised when constructing layout inputs.
///
/// Layout *operations* are total; only the constructors of their inputs
/// can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("time range start {start} is after end {end}")]
    InvertedRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("axis needs at least 2 markers, got {count}")]
    TooFewMarkers { count: usize },

    #[error("invalid axis label format: {format:?}")]
    InvalidLabelFormat { format: String },

    #[error("timestamp {millis}ms is outside the representable range")]
    TimestampOutOfRange { millis: i64 },
}
