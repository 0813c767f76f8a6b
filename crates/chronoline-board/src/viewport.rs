#![forbid(unsafe_code)]

//! Viewport controller: pan offset and zoom factor for the rendered layer.
//!
//! # State Machine
//!
//! ```text
//!          GestureSignal::Start(p)            Move(q) ⇒ pan = q - origin
//!   Idle ──────────────────────────▶ Panning { origin = p - pan } ◀─┐
//!    ▲                                     │    └───────────────────┘
//!    └───────── GestureSignal::End ────────┘
//! ```
//!
//! Zoom is not a mode: `zoom_by` applies atomically in either state and
//! never interrupts a pan.
//!
//! # Invariants
//!
//! 1. `MIN_ZOOM <= zoom <= MAX_ZOOM` after every operation.
//! 2. Pan is unconstrained; it is never clamped to content bounds.
//! 3. During a pan, `pan == pointer - origin` for the latest pointer, so the
//!    content point under the pointer at gesture start stays under it.
//! 4. `reset()` restores `zoom = 1`, `pan = (0, 0)` and `Idle`.
//!
//! # Failure Modes
//!
//! - Non-finite zoom deltas and pointer positions are ignored.
//! - `begin_pan` while already panning is a caller bug: debug builds
//!   assert, release builds log and restart from the new pointer.

use std::fmt;

use chronoline_core::geometry::Point;
use chronoline_core::gesture::GestureSignal;

/// Smallest allowed zoom factor.
pub const MIN_ZOOM: f64 = 0.5;
/// Largest allowed zoom factor.
pub const MAX_ZOOM: f64 = 3.0;
/// Zoom change applied by the zoom-in/zoom-out controls.
pub const DEFAULT_ZOOM_STEP: f64 = 0.1;
/// Zoom change per wheel delta unit (negated, so scrolling up zooms in).
pub const DEFAULT_WHEEL_ZOOM_FACTOR: f64 = 0.001;

/// Clamp a zoom factor into `[MIN_ZOOM, MAX_ZOOM]`. Non-finite input maps
/// to the identity zoom.
#[must_use]
pub fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_finite() {
        zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    } else {
        1.0
    }
}

/// Zoom and pan, as handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub zoom: f64,
    pub pan: Point,
}

impl ViewportState {
    /// `zoom = 1`, `pan = (0, 0)`.
    pub const IDENTITY: Self = Self {
        zoom: 1.0,
        pan: Point::ORIGIN,
    };
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Whether a pan gesture is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PanMode {
    #[default]
    Idle,
    /// `origin` is the pointer position minus the pan at gesture start.
    Panning { origin: Point },
}

/// A single affine transform for the rendered layer: translate, then
/// scale about the container center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl From<ViewportState> for Transform {
    fn from(state: ViewportState) -> Self {
        Self {
            translate_x: state.pan.x,
            translate_y: state.pan.y,
            scale: state.zoom,
        }
    }
}

/// CSS `transform` syntax.
impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate({}px, {}px) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

/// Owns the viewport state of one rendered timeline.
#[derive(Debug, Clone, Default)]
pub struct ViewportController {
    state: ViewportState,
    mode: PanMode,
}

impl ViewportController {
    /// Create a controller at `initial_zoom` (clamped) with no pan.
    #[must_use]
    pub fn new(initial_zoom: f64) -> Self {
        Self {
            state: ViewportState {
                zoom: clamp_zoom(initial_zoom),
                pan: Point::ORIGIN,
            },
            mode: PanMode::Idle,
        }
    }

    #[inline]
    #[must_use]
    pub const fn state(&self) -> ViewportState {
        self.state
    }

    #[inline]
    #[must_use]
    pub const fn zoom(&self) -> f64 {
        self.state.zoom
    }

    #[inline]
    #[must_use]
    pub const fn pan(&self) -> Point {
        self.state.pan
    }

    #[inline]
    #[must_use]
    pub const fn mode(&self) -> PanMode {
        self.mode
    }

    #[inline]
    #[must_use]
    pub const fn is_panning(&self) -> bool {
        matches!(self.mode, PanMode::Panning { .. })
    }

    /// Feed one normalized gesture signal.
    pub fn apply(&mut self, signal: GestureSignal) {
        match signal {
            GestureSignal::Start(pointer) => self.begin_pan(pointer),
            GestureSignal::Move(pointer) => {
                self.pan_to(pointer);
            }
            GestureSignal::End => self.end_pan(),
        }
    }

    /// Enter `Panning`, anchoring the gesture at `pointer`.
    pub fn begin_pan(&mut self, pointer: Point) {
        if !pointer.is_finite() {
            return;
        }
        debug_assert!(
            !self.is_panning(),
            "begin_pan called while a pan gesture is active"
        );
        #[cfg(feature = "tracing")]
        if self.is_panning() {
            tracing::warn!(target: "chronoline.viewport", "pan restarted without end");
        }
        let origin = pointer - self.state.pan;
        self.mode = PanMode::Panning { origin };
        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "chronoline.viewport",
            x = pointer.x,
            y = pointer.y,
            "pan start"
        );
    }

    /// Follow the pointer during a pan. Returns whether the pan changed.
    pub fn pan_to(&mut self, pointer: Point) -> bool {
        let PanMode::Panning { origin } = self.mode else {
            return false;
        };
        if !pointer.is_finite() {
            return false;
        }
        let pan = pointer - origin;
        if pan == self.state.pan {
            return false;
        }
        self.state.pan = pan;
        true
    }

    /// Return to `Idle`. Pan stays where the gesture left it.
    pub fn end_pan(&mut self) {
        if self.is_panning() {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                target: "chronoline.viewport",
                x = self.state.pan.x,
                y = self.state.pan.y,
                "pan end"
            );
        }
        self.mode = PanMode::Idle;
    }

    /// Add `delta` to the zoom factor, clamping the result. Returns the new
    /// zoom.
    pub fn zoom_by(&mut self, delta: f64) -> f64 {
        if delta.is_finite() {
            self.state.zoom = clamp_zoom(self.state.zoom + delta);
            #[cfg(feature = "tracing")]
            tracing::debug!(target: "chronoline.viewport", delta, zoom = self.state.zoom, "zoom");
        }
        self.state.zoom
    }

    /// Set the zoom factor directly, clamping it.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.state.zoom = clamp_zoom(zoom);
    }

    /// Return to the identity view and end any pan gesture.
    pub fn reset(&mut self) {
        self.state = ViewportState::IDENTITY;
        self.mode = PanMode::Idle;
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        self.state.into()
    }

    /// Zoom as a rounded percentage for the zoom readout (`1.25` → `125`).
    #[must_use]
    pub fn zoom_percent(&self) -> u32 {
        (self.state.zoom * 100.0).round() as u32
    }
}
