#![forbid(unsafe_code)]

//! Board configuration, loadable from JSON.
//!
//! ```json
//! {
//!   "orientation": "horizontal",
//!   "timeRange": { "start": "2024-01-01T00:00:00Z", "end": "2024-12-31T00:00:00Z" },
//!   "zoomLevel": 1.25,
//!   "showConnections": true,
//!   "markerCount": 7
//! }
//! ```
//!
//! Every field is optional; `BoardConfig::default()` is the stock vertical
//! timeline at zoom 1 with five axis markers.

use std::path::Path;

use chronoline_layout::{DEFAULT_MARKER_COUNT, LabelFormat, LayoutError, Orientation, TimeRange};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::viewport::{DEFAULT_WHEEL_ZOOM_FACTOR, DEFAULT_ZOOM_STEP};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    pub orientation: Orientation,
    /// Explicit axis range. When absent the range is derived from the
    /// events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,
    /// Initial zoom factor, clamped on use.
    pub zoom_level: f64,
    pub show_connections: bool,
    pub marker_count: usize,
    /// Zoom change per zoom-in/zoom-out control press.
    pub zoom_step: f64,
    /// Zoom change per wheel delta unit.
    pub wheel_zoom_factor: f64,
    /// Only zoom on wheel input when Ctrl or Meta is held.
    pub wheel_requires_modifier: bool,
    pub label_format: LabelFormat,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            time_range: None,
            zoom_level: 1.0,
            show_connections: true,
            marker_count: DEFAULT_MARKER_COUNT,
            zoom_step: DEFAULT_ZOOM_STEP,
            wheel_zoom_factor: DEFAULT_WHEEL_ZOOM_FACTOR,
            wheel_requires_modifier: true,
            label_format: LabelFormat::default(),
        }
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl BoardConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Check every field, reporting the first violation.
    pub fn validate(&self) -> Result<()> {
        if !self.zoom_level.is_finite() {
            return Err(ConfigError::InvalidZoomLevel(self.zoom_level));
        }
        if !positive(self.zoom_step) {
            return Err(ConfigError::InvalidZoomStep(self.zoom_step));
        }
        if !positive(self.wheel_zoom_factor) {
            return Err(ConfigError::InvalidWheelFactor(self.wheel_zoom_factor));
        }
        if self.marker_count < 2 {
            return Err(LayoutError::TooFewMarkers {
                count: self.marker_count,
            }
            .into());
        }
        Ok(())
    }

    /// A copy with every invalid field replaced by a usable value.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if !self.zoom_level.is_finite() {
            self.zoom_level = 1.0;
        }
        if !positive(self.zoom_step) {
            self.zoom_step = DEFAULT_ZOOM_STEP;
        }
        if !positive(self.wheel_zoom_factor) {
            self.wheel_zoom_factor = DEFAULT_WHEEL_ZOOM_FACTOR;
        }
        self.marker_count = self.marker_count.max(2);
        self
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_time_range(mut self, range: TimeRange) -> Self {
        self.time_range = Some(range);
        self
    }

    #[must_use]
    pub fn with_zoom_level(mut self, zoom: f64) -> Self {
        self.zoom_level = zoom;
        self
    }

    #[must_use]
    pub fn with_show_connections(mut self, show: bool) -> Self {
        self.show_connections = show;
        self
    }

    #[must_use]
    pub fn with_marker_count(mut self, count: usize) -> Self {
        self.marker_count = count;
        self
    }

    #[must_use]
    pub fn with_zoom_step(mut self, step: f64) -> Self {
        self.zoom_step = step;
        self
    }

    #[must_use]
    pub fn with_wheel_zoom_factor(mut self, factor: f64) -> Self {
        self.wheel_zoom_factor = factor;
        self
    }

    #[must_use]
    pub fn with_wheel_requires_modifier(mut self, required: bool) -> Self {
        self.wheel_requires_modifier = required;
        self
    }

    #[must_use]
    pub fn with_label_format(mut self, format: LabelFormat) -> Self {
        self.label_format = format;
        self
    }
}
