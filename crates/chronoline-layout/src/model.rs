#![forbid(unsafe_code)]

//! Timeline data records.
//!
//! Records are supplied wholesale by the caller for every render and are
//! never mutated by the engine. `connections` may name ids that are not in
//! the current set (filtered-out events, for example); consumers skip them.

use std::borrow::{Borrow, Cow};
use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Opaque per-event metadata, passed through to renderers untouched.
pub type Metadata = BTreeMap<String, serde_json::Value>;

// ---------------------------------------------------------------------------
// EventId
// ---------------------------------------------------------------------------

/// Identifier of a timeline event, unique within one rendered set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Create an id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for EventId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for EventId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EventId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for EventId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for EventId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// A CSS color string (`#rrggbb`, `rgb(..)`, a named color, ...).
///
/// The engine never interprets colors; it only chooses which one applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(Cow<'static, str>);

impl Color {
    /// Indigo accent used for events without an explicit color.
    pub const DEFAULT: Self = Self::from_static("#6366f1");

    /// Create a color from a string known at compile time.
    #[must_use]
    pub const fn from_static(css: &'static str) -> Self {
        Self(Cow::Borrowed(css))
    }

    /// Create a color from any string.
    #[must_use]
    pub fn new(css: impl Into<String>) -> Self {
        Self(Cow::Owned(css.into()))
    }

    /// The CSS text of this color.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

static DEFAULT_COLOR: Color = Color::DEFAULT;

impl Default for Color {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Color {
    fn from(css: &str) -> Self {
        Self::new(css)
    }
}

// ---------------------------------------------------------------------------
// TimelineEvent
// ---------------------------------------------------------------------------

/// A timestamped event on the timeline.
///
/// `timestamp` deserializes from either an RFC 3339 string or an integer
/// count of Unix milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: EventId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "timestamp_repr")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
    /// Ids of related events, in declared order. Direction matters: an
    /// entry here does not imply the target lists this event back.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connections: Vec<EventId>,
}

impl TimelineEvent {
    /// Create an event with only the required fields.
    #[must_use]
    pub fn new(id: impl Into<EventId>, title: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            timestamp,
            category: None,
            color: None,
            metadata: Metadata::new(),
            connections: Vec::new(),
        }
    }

    /// Create an event from a Unix millisecond timestamp.
    pub fn at_millis(
        id: impl Into<EventId>,
        title: impl Into<String>,
        millis: i64,
    ) -> Result<Self, LayoutError> {
        let timestamp = DateTime::<Utc>::from_timestamp_millis(millis)
            .ok_or(LayoutError::TimestampOutOfRange { millis })?;
        Ok(Self::new(id, title, timestamp))
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Append connection targets, keeping declared order.
    #[must_use]
    pub fn with_connections<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<EventId>,
    {
        self.connections.extend(targets.into_iter().map(Into::into));
        self
    }

    /// The color used to draw this event and its outgoing connections.
    #[must_use]
    pub fn effective_color(&self) -> &Color {
        self.color.as_ref().unwrap_or(&DEFAULT_COLOR)
    }

    /// Unix milliseconds, the numeric timestamp form accepted on input.
    #[inline]
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }
}

mod timestamp_repr {
    use chrono::{DateTime, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Millis(i64),
        Text(DateTime<Utc>),
    }

    pub(super) fn serialize<S: Serializer>(
        timestamp: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        timestamp.serialize(serializer)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Millis(millis) => DateTime::<Utc>::from_timestamp_millis(millis)
                .ok_or_else(|| D::Error::custom(format!("timestamp {millis}ms out of range"))),
            Repr::Text(timestamp) => Ok(timestamp),
        }
    }
}
