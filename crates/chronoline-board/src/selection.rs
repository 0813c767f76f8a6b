#![forbid(unsafe_code)]

//! Selection state and connection-edge resolution.
//!
//! # Invariants
//!
//! 1. Selecting the already-selected id clears the selection; selecting any
//!    other id replaces it. Two selects of the same id restore the prior
//!    empty state.
//! 2. Edges only follow the selected event's *declared* connections, in
//!    declared order. `A → B` never implies `B → A`.
//! 3. A connection id with no placed event is skipped silently.
//! 4. Every edge of one selection uses the selected event's effective
//!    color.

use ahash::AHashMap;
use chronoline_core::geometry::Point;
use chronoline_layout::{Color, EventId, Orientation, PlacedEvent};

/// The currently selected event, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionState {
    selected: Option<EventId>,
}

impl SelectionState {
    /// Nothing selected.
    #[must_use]
    pub const fn new() -> Self {
        Self { selected: None }
    }

    /// Selection holding `id`.
    #[must_use]
    pub fn of(id: impl Into<EventId>) -> Self {
        Self {
            selected: Some(id.into()),
        }
    }

    #[inline]
    #[must_use]
    pub fn selected(&self) -> Option<&EventId> {
        self.selected.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_ref().is_some_and(|s| s == id)
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }

    /// The state that results from selecting `id` (toggle semantics).
    #[must_use]
    pub fn select(&self, id: &str) -> Self {
        if self.is_selected(id) {
            Self::new()
        } else {
            Self::of(id)
        }
    }

    /// Toggle `id` in place and return the new selection.
    pub fn toggle(&mut self, id: &str) -> Option<&EventId> {
        *self = self.select(id);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "chronoline.selection",
            id,
            selected = self.selected.as_ref().map(EventId::as_str),
            "selection toggled"
        );
        self.selected.as_ref()
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}

/// A directed connection from the selected event to one of its targets.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionEdge {
    pub from: EventId,
    pub to: EventId,
    pub from_percent: f64,
    pub to_percent: f64,
    pub color: Color,
}

impl ConnectionEdge {
    /// Line endpoints as `(x%, y%)` of the container, drawn along the
    /// axis centerline.
    #[must_use]
    pub fn endpoints(&self, orientation: Orientation) -> (Point, Point) {
        (
            orientation.place(self.from_percent),
            orientation.place(self.to_percent),
        )
    }
}

/// Resolve the edges to draw for `selection` over the placed events.
///
/// Ids are unique within a rendered set; if a caller violates that, the
/// first placed event with a given id wins.
#[must_use]
pub fn connections_for(
    selection: &SelectionState,
    placed: &[PlacedEvent<'_>],
) -> Vec<ConnectionEdge> {
    let Some(selected_id) = selection.selected() else {
        return Vec::new();
    };

    let mut by_id: AHashMap<&str, &PlacedEvent<'_>> = AHashMap::with_capacity(placed.len());
    for p in placed {
        by_id.entry(p.event.id.as_str()).or_insert(p);
    }

    let Some(source) = by_id.get(selected_id.as_str()) else {
        return Vec::new();
    };
    let color = source.event.effective_color();

    source
        .event
        .connections
        .iter()
        .filter_map(|target_id| {
            let target = by_id.get(target_id.as_str())?;
            Some(ConnectionEdge {
                from: source.event.id.clone(),
                to: target.event.id.clone(),
                from_percent: source.percent,
                to_percent: target.percent,
                color: color.clone(),
            })
        })
        .collect()
}
