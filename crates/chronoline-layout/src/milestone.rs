#![forbid(unsafe_code)]

//! Milestone kinds and their presentation records.
//!
//! Each kind maps to exactly one [`MilestoneStyle`] through an exhaustive
//! `match`, so adding a kind without a style is a compile error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Color, TimelineEvent};

/// Kinds of milestone an event category can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MilestoneKind {
    CeoMeeting,
    Broadcast,
    SurveyStart,
    SurveyEnd,
    Decision,
    Testflight,
    MarketLive,
}

/// Display record for a milestone kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneStyle {
    /// Uppercase badge text.
    pub label: &'static str,
    /// Icon name in the renderer's icon set.
    pub icon: &'static str,
    pub color: Color,
}

const TERMINAL_GREEN: Color = Color::from_static("#33ff00");

impl MilestoneKind {
    pub const ALL: [Self; 7] = [
        Self::CeoMeeting,
        Self::Broadcast,
        Self::SurveyStart,
        Self::SurveyEnd,
        Self::Decision,
        Self::Testflight,
        Self::MarketLive,
    ];

    /// The kebab-case name used in event categories.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CeoMeeting => "ceo-meeting",
            Self::Broadcast => "broadcast",
            Self::SurveyStart => "survey-start",
            Self::SurveyEnd => "survey-end",
            Self::Decision => "decision",
            Self::Testflight => "testflight",
            Self::MarketLive => "market-live",
        }
    }

    #[must_use]
    pub const fn style(self) -> MilestoneStyle {
        let (label, icon) = match self {
            Self::CeoMeeting => ("CEO MEETING", "users"),
            Self::Broadcast => ("BROADCAST", "radio"),
            Self::SurveyStart => ("SURVEY START", "file-text"),
            Self::SurveyEnd => ("SURVEY END", "check-circle"),
            Self::Decision => ("DECISION", "scale"),
            Self::Testflight => ("TESTFLIGHT", "test-tube"),
            Self::MarketLive => ("MARKET LIVE", "rocket"),
        };
        MilestoneStyle {
            label,
            icon,
            color: TERMINAL_GREEN,
        }
    }

    /// The milestone kind named by an event's category, if any.
    #[must_use]
    pub fn of_event(event: &TimelineEvent) -> Option<Self> {
        event.category.as_deref().and_then(|c| c.parse().ok())
    }
}

impl fmt::Display for MilestoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no milestone kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown milestone kind")]
pub struct UnknownMilestone;

impl FromStr for MilestoneKind {
    type Err = UnknownMilestone;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or(UnknownMilestone)
    }
}
