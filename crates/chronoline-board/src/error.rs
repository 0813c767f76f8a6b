use chronoline_layout::{EventId, LayoutError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while loading or validating board input.
///
/// The board's interactive operations never fail; only configuration and
/// strict construction do.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("zoom step must be finite and > 0, got {0}")]
    InvalidZoomStep(f64),

    #[error("wheel zoom factor must be finite and > 0, got {0}")]
    InvalidWheelFactor(f64),

    #[error("zoom level must be finite, got {0}")]
    InvalidZoomLevel(f64),

    #[error("duplicate event id: {0}")]
    DuplicateEventId(EventId),
}
