#![forbid(unsafe_code)]

//! Canonical input event types.
//!
//! Hosts convert their native input (DOM events, winit events, synthetic
//! test input) into these types before handing them to a timeline board.
//!
//! # Design Notes
//!
//! - Coordinates are host client coordinates in logical pixels (`f64`), so
//!   events derive `PartialEq` but not `Eq`.
//! - [`TouchEvent::touches`] lists the touch points that are *currently*
//!   down after the event, mirroring the DOM `TouchEvent.touches` list. A
//!   `TouchPhase::End` with one finger still resting reports one touch.
//! - `Modifiers` use bitflags so host shims can OR them together.

use bitflags::bitflags;

use crate::geometry::Point;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A mouse button or movement event.
    Mouse(MouseEvent),

    /// A touch-screen event.
    Touch(TouchEvent),

    /// A scroll-wheel or trackpad scroll event.
    Wheel(WheelEvent),
}

/// A mouse event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    /// The type of mouse event.
    pub kind: MouseEventKind,

    /// Client X coordinate.
    pub x: f64,

    /// Client Y coordinate.
    pub y: f64,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// Create a new mouse event.
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a mouse event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Get the position as a point.
    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// The type of mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// Mouse button pressed down.
    Down(MouseButton),

    /// Mouse button released.
    Up(MouseButton),

    /// Mouse moved, with or without a button held.
    Moved,

    /// Pointer left the timeline container.
    Leave,
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left (primary) mouse button.
    Left,

    /// Right mouse button.
    Right,

    /// Middle mouse button (scroll wheel click).
    Middle,
}

/// Lifecycle phase of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// One or more fingers touched down.
    Start,
    /// Fingers moved.
    Move,
    /// One or more fingers lifted.
    End,
    /// The platform aborted the touch sequence.
    Cancel,
}

/// A single touch contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Platform touch identifier, stable for the lifetime of the contact.
    pub id: u64,
    /// Client X coordinate.
    pub x: f64,
    /// Client Y coordinate.
    pub y: f64,
}

impl TouchPoint {
    /// Create a touch point.
    #[must_use]
    pub const fn new(id: u64, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Get the position as a point.
    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A touch event.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    /// What happened.
    pub phase: TouchPhase,
    /// Touch points still in contact after this event.
    pub touches: Vec<TouchPoint>,
}

impl TouchEvent {
    /// Create a touch event.
    #[must_use]
    pub fn new(phase: TouchPhase, touches: impl Into<Vec<TouchPoint>>) -> Self {
        Self {
            phase,
            touches: touches.into(),
        }
    }

    /// The sole touch point, if exactly one finger is down.
    #[must_use]
    pub fn single(&self) -> Option<&TouchPoint> {
        match self.touches.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

/// A wheel event.
///
/// Deltas follow the DOM convention: positive `delta_y` scrolls down, which
/// zooms *out* when the zoom gesture is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    /// Horizontal scroll amount.
    pub delta_x: f64,
    /// Vertical scroll amount.
    pub delta_y: f64,
    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl WheelEvent {
    /// Create a vertical wheel event.
    #[must_use]
    pub const fn vertical(delta_y: f64) -> Self {
        Self {
            delta_x: 0.0,
            delta_y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a wheel event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether a zoom modifier (Ctrl, or Cmd on macOS) is held.
    ///
    /// Trackpad pinch gestures arrive as Ctrl+wheel in browsers.
    #[must_use]
    pub const fn zoom_modifier(&self) -> bool {
        self.modifiers.intersects(Modifiers::CTRL.union(Modifiers::SUPER))
    }
}

/// A keyboard event delivered to a focused timeline node.
///
/// Key events are routed per node rather than through [`InputEvent`]
/// because the board itself has no keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether this key activates a focused control (Enter or Space).
    #[must_use]
    pub const fn is_activation(&self) -> bool {
        matches!(self.code, KeyCode::Enter | KeyCode::Char(' '))
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Tab key.
    Tab,
}

bitflags! {
    /// Modifier keys that can be held during an input event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}
