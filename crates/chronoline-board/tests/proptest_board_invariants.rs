//! Property-based invariant tests for the viewport controller and the
//! selection resolver.
//!
//! 1. Zoom stays within [MIN_ZOOM, MAX_ZOOM] under any delta sequence
//! 2. Pan follows pointer - origin during a gesture and is never clamped
//! 3. Reset always restores the identity view
//! 4. Selecting the same id twice restores the prior state
//! 5. Edges follow declared connections only, in declared order

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use chronoline_board::{
    MAX_ZOOM, MIN_ZOOM, SelectionState, ViewportController, ViewportState, connections_for,
};
use chronoline_core::geometry::Point;
use chronoline_core::gesture::GestureSignal;
use chronoline_layout::{TimeRange, TimelineEvent, placed};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn zoom_delta() -> impl Strategy<Value = f64> {
    prop_oneof![
        -20.0f64..20.0,
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
    ]
}

fn point() -> impl Strategy<Value = Point> {
    (-1.0e6f64..1.0e6, -1.0e6f64..1.0e6).prop_map(|(x, y)| Point::new(x, y))
}

fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + TimeDelta::days(n)
}

/// Up to 8 events named e0..e7, each connecting to arbitrary ids in
/// e0..e11 (so some targets dangle).
fn event_set() -> impl Strategy<Value = Vec<TimelineEvent>> {
    proptest::collection::vec(
        (0i64..60, proptest::collection::vec(0usize..12, 0..6)),
        1..8,
    )
    .prop_map(|rows| {
        rows
            .into_iter()
            .enumerate()
            .map(|(i, (offset, targets))| {
                TimelineEvent::new(format!("e{i}"), format!("Event {i}"), day(offset))
                    .with_connections(targets.into_iter().map(|t| format!("e{t}")))
            })
            .collect()
    })
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Zoom clamp
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn zoom_stays_bounded(initial in -10.0f64..10.0, deltas in proptest::collection::vec(zoom_delta(), 0..50)) {
        let mut vp = ViewportController::new(initial);
        prop_assert!((MIN_ZOOM..=MAX_ZOOM).contains(&vp.zoom()));
        for d in deltas {
            let z = vp.zoom_by(d);
            prop_assert!((MIN_ZOOM..=MAX_ZOOM).contains(&z), "zoom {z} after delta {d}");
        }
    }

    #[test]
    fn zoom_matches_clamped_sum(start in 0.5f64..=3.0, delta in -5.0f64..5.0) {
        let mut vp = ViewportController::new(start);
        prop_assert_eq!(vp.zoom_by(delta), (start + delta).clamp(MIN_ZOOM, MAX_ZOOM));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2 + 3. Pan tracking and reset
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn pan_tracks_pointer(start in point(), path in proptest::collection::vec(point(), 1..20)) {
        let mut vp = ViewportController::default();
        vp.apply(GestureSignal::Start(start));
        for &p in &path {
            vp.apply(GestureSignal::Move(p));
            prop_assert_eq!(vp.pan(), p - start);
        }
        vp.apply(GestureSignal::End);
        prop_assert!(!vp.is_panning());
    }

    #[test]
    fn reset_is_identity(
        zoom in 0.5f64..3.0,
        start in point(),
        end in point(),
        mid_gesture in any::<bool>(),
    ) {
        let mut vp = ViewportController::new(zoom);
        vp.apply(GestureSignal::Start(start));
        vp.apply(GestureSignal::Move(end));
        if !mid_gesture {
            vp.apply(GestureSignal::End);
        }
        vp.reset();
        prop_assert_eq!(vp.state(), ViewportState::IDENTITY);
        prop_assert!(!vp.is_panning());
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Toggle parity
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn double_select_restores(prior in proptest::option::of("[a-d]"), id in "[a-d]") {
        let state = prior.map_or_else(SelectionState::new, |p| SelectionState::of(p));
        let once = state.select(&id);
        let twice = once.select(&id);
        let thrice = twice.select(&id);
        if state.is_selected(&id) {
            prop_assert!(once.is_empty());
            prop_assert_eq!(&twice, &state);
        } else {
            prop_assert!(once.is_selected(&id));
            prop_assert!(twice.is_empty());
        }
        prop_assert_eq!(thrice, once);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Declared direction only
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn edges_follow_declared_connections(events in event_set(), pick in 0usize..8) {
        let range = TimeRange::new(day(0), day(60)).unwrap();
        let placed = placed(&events, &range);
        let source = &events[pick % events.len()];
        let edges = connections_for(&SelectionState::of(source.id.clone()), &placed);

        let expected: Vec<_> = source
            .connections
            .iter()
            .filter(|t| events.iter().any(|e| &e.id == *t))
            .collect();
        prop_assert_eq!(edges.len(), expected.len());
        for (edge, target) in edges.iter().zip(expected) {
            prop_assert_eq!(&edge.from, &source.id);
            prop_assert_eq!(&edge.to, target);
            prop_assert_eq!(&edge.color, source.effective_color());
        }
    }
}
