#![forbid(unsafe_code)]

//! The timeline board: one authority for the layout, viewport and
//! selection of a rendered event set.
//!
//! A board is pull-based. Mutating operations update controller state;
//! every read ([`TimelineBoard::placed_events`], [`TimelineBoard::snapshot`])
//! recomputes layout from the current events and configuration.
//!
//! ```text
//!  InputEvent ──▶ PointerGesture ──▶ GestureSignal ──▶ ViewportController
//!       │
//!       └─ Wheel (+Ctrl/Meta) ─────────────────────▶ zoom_by(-dy * factor)
//!
//!  click_event(id) ──▶ SelectionState::toggle ──▶ on_event_click, on_event_select
//! ```
//!
//! # Callback Ordering
//!
//! A click on a known event invokes `on_event_click` and then
//! `on_event_select`, each at most once, synchronously. `reset()` invokes
//! `on_event_select(None)` even when nothing was selected.

use std::fmt;

use ahash::AHashMap;
use chrono::{DateTime, Utc};
use chronoline_core::event::{InputEvent, KeyEvent, WheelEvent};
use chronoline_core::geometry::Point;
use chronoline_core::gesture::PointerGesture;
use chronoline_layout::{
    AxisMarker, Color, EventId, MilestoneKind, Orientation, PlacedEvent, TimeRange,
    TimelineEvent, markers_with, placed, resolve_at,
};

use crate::config::BoardConfig;
use crate::error::{ConfigError, Result};
use crate::selection::{ConnectionEdge, SelectionState, connections_for};
use crate::viewport::{Transform, ViewportController, ViewportState};

type ClickCallback = Box<dyn FnMut(&TimelineEvent)>;
type SelectCallback = Box<dyn FnMut(Option<&TimelineEvent>)>;

/// Map ids to their first position in `events`.
fn index_events(events: &[TimelineEvent]) -> (AHashMap<EventId, usize>, Option<EventId>) {
    let mut index = AHashMap::with_capacity(events.len());
    let mut duplicate = None;
    for (i, event) in events.iter().enumerate() {
        if index.contains_key(event.id.as_str()) {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                target: "chronoline.board",
                id = %event.id,
                "duplicate event id, keeping first occurrence"
            );
            duplicate.get_or_insert_with(|| event.id.clone());
            continue;
        }
        index.insert(event.id.clone(), i);
    }
    (index, duplicate)
}

/// The single authority for one rendered timeline.
///
/// Owns the event set, the board configuration, the viewport controller and
/// pointer gesture recognizer, the selection and hover state, and the
/// optional click/select callbacks. Callers serialize mutation by holding
/// the board by `&mut`; reads recompute layout on demand.
pub struct TimelineBoard {
    events: Vec<TimelineEvent>,
    index: AHashMap<EventId, usize>,
    config: BoardConfig,
    viewport: ViewportController,
    gesture: PointerGesture,
    selection: SelectionState,
    hovered: Option<EventId>,
    on_event_click: Option<ClickCallback>,
    on_event_select: Option<SelectCallback>,
}

impl fmt::Debug for TimelineBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimelineBoard")
            .field("events", &self.events.len())
            .field("config", &self.config)
            .field("viewport", &self.viewport)
            .field("selection", &self.selection)
            .field("hovered", &self.hovered)
            .finish_non_exhaustive()
    }
}

impl TimelineBoard {
    /// Create a board. Invalid configuration values are replaced with
    /// usable ones and duplicate ids resolve to their first occurrence.
    #[must_use]
    pub fn new(events: Vec<TimelineEvent>, config: BoardConfig) -> Self {
        let config = config.sanitized();
        let (index, _) = index_events(&events);
        Self {
            viewport: ViewportController::new(config.zoom_level),
            events,
            index,
            config,
            gesture: PointerGesture::new(),
            selection: SelectionState::new(),
            hovered: None,
            on_event_click: None,
            on_event_select: None,
        }
    }

    /// Create a board, rejecting invalid configuration and duplicate ids.
    pub fn try_new(events: Vec<TimelineEvent>, config: BoardConfig) -> Result<Self> {
        config.validate()?;
        if let (_, Some(id)) = index_events(&events) {
            return Err(ConfigError::DuplicateEventId(id));
        }
        Ok(Self::new(events, config))
    }

    /// Register the callback fired with the clicked event on every click of
    /// a known node, before the select callback.
    #[must_use]
    pub fn with_on_event_click<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&TimelineEvent) + 'static,
    {
        self.on_event_click = Some(Box::new(callback));
        self
    }

    /// Register the callback fired after a click with the newly selected
    /// event, or `None` when the click cleared the selection. Also fired
    /// with `None` by [`reset`](Self::reset).
    #[must_use]
    pub fn with_on_event_select<F>(mut self, callback: F) -> Self
    where
        F: FnMut(Option<&TimelineEvent>) + 'static,
    {
        self.on_event_select = Some(Box::new(callback));
        self
    }

    /// Replace the event set. Selection and hover survive even if their id
    /// is gone; connections from a vanished selection stop resolving.
    pub fn set_events(&mut self, events: Vec<TimelineEvent>) {
        let (index, _) = index_events(&events);
        self.events = events;
        self.index = index;
    }

    /// Replace the configuration. The current zoom is kept; the new
    /// `zoom_level` only applies to boards created from it.
    pub fn set_config(&mut self, config: BoardConfig) {
        self.config = config.sanitized();
    }

    // ── Layout ──────────────────────────────────────────────────────────

    /// The current event set, in the order it was supplied.
    #[inline]
    #[must_use]
    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    /// The sanitized configuration in effect.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.config.orientation
    }

    /// Look up an event by id.
    #[must_use]
    pub fn event(&self, id: &str) -> Option<&TimelineEvent> {
        self.index.get(id).and_then(|&i| self.events.get(i))
    }

    /// The axis domain, reading the wall clock for the empty-set fallback.
    #[must_use]
    pub fn time_range(&self) -> TimeRange {
        self.time_range_at(Utc::now())
    }

    /// [`time_range`](Self::time_range) with an explicit clock reading.
    #[must_use]
    pub fn time_range_at(&self, now: DateTime<Utc>) -> TimeRange {
        resolve_at(&self.events, self.config.time_range, now)
    }

    /// Every event with its axis position, in input order.
    #[must_use]
    pub fn placed_events(&self) -> Vec<PlacedEvent<'_>> {
        placed(&self.events, &self.time_range())
    }

    /// Labeled axis ticks for the current range.
    #[must_use]
    pub fn axis_markers(&self) -> Vec<AxisMarker> {
        self.axis_markers_for(&self.time_range())
    }

    fn axis_markers_for(&self, range: &TimeRange) -> Vec<AxisMarker> {
        // marker_count is sanitized to >= 2, so this never errors.
        markers_with(range, self.config.marker_count, &self.config.label_format)
            .unwrap_or_default()
    }

    // ── Input ───────────────────────────────────────────────────────────

    /// Feed one pointer or wheel event. Returns whether the board consumed
    /// it (a gesture step or a zoom).
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        if let InputEvent::Wheel(wheel) = event {
            return self.handle_wheel(wheel);
        }
        let signals = self.gesture.process(event);
        let consumed = !signals.is_empty();
        for signal in signals {
            self.viewport.apply(signal);
        }
        consumed
    }

    fn handle_wheel(&mut self, wheel: &WheelEvent) -> bool {
        if self.config.wheel_requires_modifier && !wheel.zoom_modifier() {
            return false;
        }
        if !wheel.delta_y.is_finite() {
            return false;
        }
        self.viewport
            .zoom_by(-wheel.delta_y * self.config.wheel_zoom_factor);
        true
    }

    /// Click an event node. Unknown ids are ignored and return `false`.
    pub fn click_event(&mut self, id: &str) -> bool {
        let Some(event) = self.index.get(id).and_then(|&i| self.events.get(i)) else {
            return false;
        };
        let now_selected = self.selection.toggle(id).is_some();
        if let Some(on_click) = self.on_event_click.as_mut() {
            on_click(event);
        }
        if let Some(on_select) = self.on_event_select.as_mut() {
            on_select(now_selected.then_some(event));
        }
        true
    }

    /// Keyboard activation of a focused node: Enter or Space clicks it.
    pub fn activate_key(&mut self, id: &str, key: &KeyEvent) -> bool {
        key.is_activation() && self.click_event(id)
    }

    /// Set or clear the hovered node. Returns whether hover changed.
    pub fn hover(&mut self, id: Option<&str>) -> bool {
        if self.hovered.as_ref().map(EventId::as_str) == id {
            return false;
        }
        self.hovered = id.map(EventId::from);
        true
    }

    // ── View controls ───────────────────────────────────────────────────

    /// Step zoom in by the configured step. Returns the new zoom.
    pub fn zoom_in(&mut self) -> f64 {
        self.viewport.zoom_by(self.config.zoom_step)
    }

    /// Step zoom out by the configured step. Returns the new zoom.
    pub fn zoom_out(&mut self) -> f64 {
        self.viewport.zoom_by(-self.config.zoom_step)
    }

    /// Identity view, no gesture, nothing selected.
    pub fn reset(&mut self) {
        self.viewport.reset();
        self.gesture.reset();
        self.selection.clear();
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "chronoline.board", message = "board.reset");
        if let Some(on_select) = self.on_event_select.as_mut() {
            on_select(None);
        }
    }

    // ── Read side ───────────────────────────────────────────────────────

    /// Current zoom and pan.
    #[inline]
    #[must_use]
    pub fn viewport(&self) -> ViewportState {
        self.viewport.state()
    }

    #[inline]
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.viewport.is_panning()
    }

    /// The viewport as one affine transform for the rendered layer.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.viewport.transform()
    }

    #[must_use]
    pub fn zoom_percent(&self) -> u32 {
        self.viewport.zoom_percent()
    }

    #[inline]
    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// The selected event, if its id is still in the current set.
    #[must_use]
    pub fn selected_event(&self) -> Option<&TimelineEvent> {
        self.selection.selected().and_then(|id| self.event(id.as_str()))
    }

    #[must_use]
    pub fn hovered(&self) -> Option<&EventId> {
        self.hovered.as_ref()
    }

    /// Edges to draw for the current selection; empty when connections
    /// are hidden.
    #[must_use]
    pub fn connections(&self) -> Vec<ConnectionEdge> {
        self.connections_over(&self.placed_events())
    }

    fn connections_over(&self, placed: &[PlacedEvent<'_>]) -> Vec<ConnectionEdge> {
        if !self.config.show_connections {
            return Vec::new();
        }
        connections_for(&self.selection, placed)
    }

    /// Everything a renderer needs for one frame.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot<'_> {
        self.snapshot_at(Utc::now())
    }

    /// [`snapshot`](Self::snapshot) with an explicit clock reading.
    #[must_use]
    pub fn snapshot_at(&self, now: DateTime<Utc>) -> BoardSnapshot<'_> {
        let range = self.time_range_at(now);
        let placed = placed(&self.events, &range);
        #[cfg(feature = "tracing")]
        let snapshot_span = tracing::debug_span!(
            "board.snapshot",
            node_count = placed.len(),
            zoom = self.viewport.zoom(),
            edge_count = tracing::field::Empty
        );
        #[cfg(feature = "tracing")]
        let _snapshot_guard = snapshot_span.enter();
        let orientation = self.config.orientation;
        let hovered = self.hovered.as_ref().map(EventId::as_str);

        let nodes = placed
            .iter()
            .map(|p| {
                let selected = self.selection.is_selected(p.event.id.as_str());
                let is_hovered = hovered == Some(p.event.id.as_str());
                NodeView {
                    event: p.event,
                    percent: p.percent,
                    anchor: orientation.place(p.percent),
                    selected,
                    hovered: is_hovered,
                    label_visible: selected || is_hovered,
                    color: p.event.effective_color(),
                    milestone: MilestoneKind::of_event(p.event),
                }
            })
            .collect();

        let edges = self.connections_over(&placed);
        #[cfg(feature = "tracing")]
        snapshot_span.record("edge_count", edges.len());

        BoardSnapshot {
            orientation,
            range,
            nodes,
            markers: self.axis_markers_for(&range),
            edges,
            transform: self.transform(),
            zoom_percent: self.zoom_percent(),
            selected: self.selected_event(),
        }
    }
}

/// One event node as the renderer should draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeView<'a> {
    pub event: &'a TimelineEvent,
    pub percent: f64,
    /// Node center as `(x%, y%)` of the container.
    pub anchor: Point,
    pub selected: bool,
    pub hovered: bool,
    /// Title and description are shown while selected or hovered.
    pub label_visible: bool,
    pub color: &'a Color,
    pub milestone: Option<MilestoneKind>,
}

/// A full frame of board output.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSnapshot<'a> {
    pub orientation: Orientation,
    pub range: TimeRange,
    pub nodes: Vec<NodeView<'a>>,
    pub markers: Vec<AxisMarker>,
    pub edges: Vec<ConnectionEdge>,
    pub transform: Transform,
    pub zoom_percent: u32,
    pub selected: Option<&'a TimelineEvent>,
}
