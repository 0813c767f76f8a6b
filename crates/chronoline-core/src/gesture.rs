#![forbid(unsafe_code)]

//! Pointer gesture normalization: one signal stream for mouse and touch.
//!
//! [`PointerGesture`] is a stateful processor that converts raw
//! [`InputEvent`]s into a normalized [`GestureSignal`] sequence. Each input
//! modality has its own adapter ([`MouseAdapter`], [`TouchAdapter`]) that
//! knows which host events begin, continue and finish a pan; the
//! `PointerGesture` multiplexes them so that only one modality owns the
//! gesture at a time.
//!
//! # State Machine
//!
//! ```text
//!            primary down / single touch start
//!   Idle ───────────────────────────────────────▶ Active(modality)
//!    ▲                                              │  move ⇒ Move(p)
//!    └──────── up / leave / touch end / cancel ─────┘
//! ```
//!
//! # Invariants
//!
//! 1. Emitted signals are well-formed: `Start` → zero or more `Move` → `End`.
//!    A second `Start` is never emitted before the matching `End`.
//! 2. Only the left mouse button starts a gesture.
//! 3. Multi-touch never starts or continues a gesture: a `Move` with more
//!    than one touch point is dropped (the gesture stays active).
//! 4. While one modality owns the gesture, events from the other modality
//!    are ignored.
//! 5. Events with a non-finite position never start or continue a gesture.
//! 6. After `reset()`, every adapter is idle.
//!
//! # Failure Modes
//!
//! - A host that delivers a gesture start while the same modality is
//!   already active violates the event contract. Debug builds assert;
//!   release builds log a warning and restart the gesture at the new
//!   position, emitting `End` first so invariant 1 still holds.

use crate::event::{InputEvent, MouseButton, MouseEvent, MouseEventKind, TouchEvent, TouchPhase};
use crate::geometry::Point;

/// A normalized gesture step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureSignal {
    /// The gesture began at this pointer position.
    Start(Point),
    /// The pointer moved to this position during the gesture.
    Move(Point),
    /// The gesture finished.
    End,
}

/// Which input device owns the active gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modality {
    Mouse,
    Touch,
}

/// Converts one modality's host events into gesture signals.
pub trait GestureAdapter {
    /// The host event type this adapter understands.
    type Input;

    /// Feed one host event. Returns the signals it produced, in order.
    fn adapt(&mut self, input: &Self::Input) -> Vec<GestureSignal>;

    /// Whether this adapter currently owns a gesture.
    fn is_active(&self) -> bool;

    /// Return to idle without emitting anything.
    fn reset(&mut self);
}

// ---------------------------------------------------------------------------
// Mouse
// ---------------------------------------------------------------------------

/// Pan gestures driven by the left mouse button.
#[derive(Debug, Clone, Default)]
pub struct MouseAdapter {
    pressed: bool,
}

impl MouseAdapter {
    /// Create an idle adapter.
    #[must_use]
    pub const fn new() -> Self {
        Self { pressed: false }
    }
}

impl GestureAdapter for MouseAdapter {
    type Input = MouseEvent;

    fn adapt(&mut self, input: &MouseEvent) -> Vec<GestureSignal> {
        let pos = input.position();
        match input.kind {
            MouseEventKind::Down(_) | MouseEventKind::Moved if !pos.is_finite() => Vec::new(),
            MouseEventKind::Down(MouseButton::Left) => {
                debug_assert!(
                    !self.pressed,
                    "Mouse gesture start delivered while a Mouse gesture is active"
                );
                let mut out = Vec::with_capacity(2);
                if self.pressed {
                    log_overlapping_start(Modality::Mouse);
                    out.push(GestureSignal::End);
                }
                self.pressed = true;
                out.push(GestureSignal::Start(pos));
                out
            }
            MouseEventKind::Down(_) => Vec::new(),
            MouseEventKind::Moved if self.pressed => vec![GestureSignal::Move(pos)],
            MouseEventKind::Moved => Vec::new(),
            // Any button release or leaving the container ends the pan.
            MouseEventKind::Up(_) | MouseEventKind::Leave if self.pressed => {
                self.pressed = false;
                vec![GestureSignal::End]
            }
            MouseEventKind::Up(_) | MouseEventKind::Leave => Vec::new(),
        }
    }

    #[inline]
    fn is_active(&self) -> bool {
        self.pressed
    }

    fn reset(&mut self) {
        self.pressed = false;
    }
}

// ---------------------------------------------------------------------------
// Touch
// ---------------------------------------------------------------------------

/// Pan gestures driven by a single finger.
#[derive(Debug, Clone, Default)]
pub struct TouchAdapter {
    tracking: bool,
}

impl TouchAdapter {
    /// Create an idle adapter.
    #[must_use]
    pub const fn new() -> Self {
        Self { tracking: false }
    }
}

impl GestureAdapter for TouchAdapter {
    type Input = TouchEvent;

    fn adapt(&mut self, input: &TouchEvent) -> Vec<GestureSignal> {
        match input.phase {
            TouchPhase::Start => {
                // A second finger landing reports two touches and is ignored.
                let Some(touch) = input.single().filter(|t| t.position().is_finite()) else {
                    return Vec::new();
                };
                debug_assert!(
                    !self.tracking,
                    "Touch gesture start delivered while a Touch gesture is active"
                );
                let mut out = Vec::with_capacity(2);
                if self.tracking {
                    log_overlapping_start(Modality::Touch);
                    out.push(GestureSignal::End);
                }
                self.tracking = true;
                out.push(GestureSignal::Start(touch.position()));
                out
            }
            TouchPhase::Move => match input.single().filter(|t| t.position().is_finite()) {
                Some(touch) if self.tracking => vec![GestureSignal::Move(touch.position())],
                _ => Vec::new(),
            },
            // Lifting any finger ends the pan, even if another stays down.
            TouchPhase::End | TouchPhase::Cancel if self.tracking => {
                self.tracking = false;
                vec![GestureSignal::End]
            }
            TouchPhase::End | TouchPhase::Cancel => Vec::new(),
        }
    }

    #[inline]
    fn is_active(&self) -> bool {
        self.tracking
    }

    fn reset(&mut self) {
        self.tracking = false;
    }
}

#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn log_overlapping_start(modality: Modality) {
    #[cfg(feature = "tracing")]
    tracing::warn!(
        target: "chronoline.gesture",
        ?modality,
        "overlapping gesture start, restarting gesture"
    );
}

// ---------------------------------------------------------------------------
// PointerGesture
// ---------------------------------------------------------------------------

/// Unified mouse + touch gesture recognizer.
///
/// Call [`process`](PointerGesture::process) for each incoming
/// [`InputEvent`]. Wheel events never produce gesture signals.
#[derive(Debug, Clone, Default)]
pub struct PointerGesture {
    mouse: MouseAdapter,
    touch: TouchAdapter,
}

impl PointerGesture {
    /// Create an idle recognizer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mouse: MouseAdapter::new(),
            touch: TouchAdapter::new(),
        }
    }

    /// Process a raw event, returning the signals it produced.
    ///
    /// Most events produce zero or one signal.
    pub fn process(&mut self, event: &InputEvent) -> Vec<GestureSignal> {
        match event {
            InputEvent::Mouse(mouse) => {
                if self.touch.is_active() {
                    return Vec::new();
                }
                self.mouse.adapt(mouse)
            }
            InputEvent::Touch(touch) => {
                if self.mouse.is_active() {
                    return Vec::new();
                }
                self.touch.adapt(touch)
            }
            InputEvent::Wheel(_) => Vec::new(),
        }
    }

    /// Process a batch of events in delivery order.
    pub fn process_all<'a>(
        &mut self,
        events: impl IntoIterator<Item = &'a InputEvent>,
    ) -> Vec<GestureSignal> {
        events
            .into_iter()
            .flat_map(|event| self.process(event))
            .collect()
    }

    /// Which modality owns the active gesture, if any.
    #[must_use]
    pub fn active_modality(&self) -> Option<Modality> {
        if self.mouse.is_active() {
            Some(Modality::Mouse)
        } else if self.touch.is_active() {
            Some(Modality::Touch)
        } else {
            None
        }
    }

    /// Whether a gesture is in progress.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active_modality().is_some()
    }

    /// Reset all adapters to idle. Emits nothing.
    pub fn reset(&mut self) {
        self.mouse.reset();
        self.touch.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Modifiers, TouchPoint, WheelEvent};

    fn mouse(kind: MouseEventKind, x: f64, y: f64) -> InputEvent {
        InputEvent::Mouse(MouseEvent::new(kind, x, y))
    }

    fn down(x: f64, y: f64) -> InputEvent {
        mouse(MouseEventKind::Down(MouseButton::Left), x, y)
    }

    fn moved(x: f64, y: f64) -> InputEvent {
        mouse(MouseEventKind::Moved, x, y)
    }

    fn up(x: f64, y: f64) -> InputEvent {
        mouse(MouseEventKind::Up(MouseButton::Left), x, y)
    }

    fn touch(phase: TouchPhase, points: &[(f64, f64)]) -> InputEvent {
        let touches: Vec<TouchPoint> = points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| TouchPoint::new(i as u64, x, y))
            .collect();
        InputEvent::Touch(TouchEvent::new(phase, touches))
    }

    #[test]
    fn mouse_drag_sequence() {
        let mut g = PointerGesture::new();
        let signals = g.process_all(&[down(1.0, 2.0), moved(5.0, 6.0), moved(7.0, 8.0), up(7.0, 8.0)]);
        assert_eq!(
            signals,
            vec![
                GestureSignal::Start(Point::new(1.0, 2.0)),
                GestureSignal::Move(Point::new(5.0, 6.0)),
                GestureSignal::Move(Point::new(7.0, 8.0)),
                GestureSignal::End,
            ]
        );
        assert!(!g.is_active());
    }

    #[test]
    fn hover_moves_without_press_are_ignored() {
        let mut g = PointerGesture::new();
        assert!(g.process(&moved(3.0, 3.0)).is_empty());
        assert!(g.process(&up(3.0, 3.0)).is_empty());
    }

    #[test]
    fn non_primary_buttons_do_not_start() {
        let mut g = PointerGesture::new();
        assert!(
            g.process(&mouse(MouseEventKind::Down(MouseButton::Right), 0.0, 0.0))
                .is_empty()
        );
        assert!(
            g.process(&mouse(MouseEventKind::Down(MouseButton::Middle), 0.0, 0.0))
                .is_empty()
        );
        assert!(!g.is_active());
    }

    #[test]
    fn leave_ends_mouse_gesture() {
        let mut g = PointerGesture::new();
        g.process(&down(0.0, 0.0));
        assert_eq!(
            g.process(&mouse(MouseEventKind::Leave, 50.0, 50.0)),
            vec![GestureSignal::End]
        );
        assert!(g.process(&moved(60.0, 60.0)).is_empty());
    }

    #[test]
    fn single_touch_pans() {
        let mut g = PointerGesture::new();
        let signals = g.process_all(&[
            touch(TouchPhase::Start, &[(10.0, 10.0)]),
            touch(TouchPhase::Move, &[(12.0, 15.0)]),
            touch(TouchPhase::End, &[]),
        ]);
        assert_eq!(
            signals,
            vec![
                GestureSignal::Start(Point::new(10.0, 10.0)),
                GestureSignal::Move(Point::new(12.0, 15.0)),
                GestureSignal::End,
            ]
        );
    }

    #[test]
    fn multi_touch_never_starts() {
        let mut g = PointerGesture::new();
        assert!(
            g.process(&touch(TouchPhase::Start, &[(0.0, 0.0), (5.0, 5.0)]))
                .is_empty()
        );
        assert!(!g.is_active());
    }

    #[test]
    fn multi_touch_move_does_not_continue() {
        let mut g = PointerGesture::new();
        g.process(&touch(TouchPhase::Start, &[(0.0, 0.0)]));
        g.process(&touch(TouchPhase::Start, &[(0.0, 0.0), (9.0, 9.0)]));
        assert!(
            g.process(&touch(TouchPhase::Move, &[(1.0, 1.0), (9.0, 9.0)]))
                .is_empty()
        );
        assert_eq!(g.active_modality(), Some(Modality::Touch));
        // Lifting the second finger still ends the pan.
        assert_eq!(
            g.process(&touch(TouchPhase::End, &[(1.0, 1.0)])),
            vec![GestureSignal::End]
        );
    }

    #[test]
    fn touch_cancel_ends_gesture() {
        let mut g = PointerGesture::new();
        g.process(&touch(TouchPhase::Start, &[(0.0, 0.0)]));
        assert_eq!(
            g.process(&touch(TouchPhase::Cancel, &[])),
            vec![GestureSignal::End]
        );
    }

    #[test]
    fn other_modality_ignored_while_active() {
        let mut g = PointerGesture::new();
        g.process(&touch(TouchPhase::Start, &[(0.0, 0.0)]));
        assert!(g.process(&down(5.0, 5.0)).is_empty());
        assert!(g.process(&moved(6.0, 6.0)).is_empty());
        assert_eq!(g.active_modality(), Some(Modality::Touch));

        g.process(&touch(TouchPhase::End, &[]));
        assert_eq!(
            g.process(&down(5.0, 5.0)),
            vec![GestureSignal::Start(Point::new(5.0, 5.0))]
        );
        assert!(
            g.process(&touch(TouchPhase::Start, &[(1.0, 1.0)]))
                .is_empty()
        );
    }

    #[test]
    fn wheel_produces_no_signal() {
        let mut g = PointerGesture::new();
        let wheel = InputEvent::Wheel(WheelEvent::vertical(-120.0).with_modifiers(Modifiers::CTRL));
        assert!(g.process(&wheel).is_empty());
        g.process(&down(0.0, 0.0));
        assert!(g.process(&wheel).is_empty());
        assert!(g.is_active());
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut g = PointerGesture::new();
        g.process(&down(0.0, 0.0));
        g.reset();
        assert!(!g.is_active());
        assert!(g.process(&moved(1.0, 1.0)).is_empty());
        assert!(g.process(&up(1.0, 1.0)).is_empty());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "gesture start delivered while")]
    fn overlapping_mouse_start_asserts() {
        let mut g = PointerGesture::new();
        g.process(&down(0.0, 0.0));
        g.process(&down(1.0, 1.0));
    }

    #[test]
    fn non_finite_positions_neither_start_nor_move() {
        let mut g = PointerGesture::new();
        assert!(g.process(&down(f64::NAN, 0.0)).is_empty());
        assert!(!g.is_active());
        assert!(g.process(&moved(5.0, 5.0)).is_empty());

        assert!(
            g.process(&touch(TouchPhase::Start, &[(0.0, f64::INFINITY)]))
                .is_empty()
        );
        assert!(!g.is_active());

        g.process(&down(1.0, 1.0));
        assert!(g.process(&moved(f64::NEG_INFINITY, 2.0)).is_empty());
        assert_eq!(g.active_modality(), Some(Modality::Mouse));
        // Release still ends the gesture, wherever it is reported.
        assert_eq!(g.process(&up(f64::NAN, f64::NAN)), vec![GestureSignal::End]);

        g.process(&touch(TouchPhase::Start, &[(3.0, 3.0)]));
        assert!(
            g.process(&touch(TouchPhase::Move, &[(f64::NAN, 3.0)]))
                .is_empty()
        );
        assert_eq!(g.active_modality(), Some(Modality::Touch));
    }

    #[test]
    fn adapters_report_activity() {
        let mut m = MouseAdapter::new();
        assert!(!m.is_active());
        m.adapt(&MouseEvent::new(MouseEventKind::Down(MouseButton::Left), 0.0, 0.0));
        assert!(m.is_active());
        m.reset();
        assert!(!m.is_active());

        let mut t = TouchAdapter::new();
        t.adapt(&TouchEvent::new(TouchPhase::Start, vec![TouchPoint::new(7, 0.0, 0.0)]));
        assert!(t.is_active());
    }
}
