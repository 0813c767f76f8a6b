//! Property-based invariant tests for range resolution, position mapping,
//! and axis markers.
//!
//! 1. Position mapping is monotone in the timestamp, including ranges longer
//!    than `i64` nanoseconds can hold (about 292 years)
//! 2. Range boundaries map to exactly 0 and 100
//! 3. A zero-width range maps everything to 50
//! 4. A resolved range contains every event and is tight
//! 5. Markers are ordered, evenly labeled, and end exactly on the range end

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use chronoline_layout::{
    DEGENERATE_POSITION, TimeRange, TimelineEvent, markers, position_of, resolve_at,
};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
}

/// Offsets within roughly ±30 years, in milliseconds.
fn offset_ms() -> impl Strategy<Value = i64> {
    -946_080_000_000i64..946_080_000_000
}

fn instant() -> impl Strategy<Value = DateTime<Utc>> {
    offset_ms().prop_map(|ms| epoch() + TimeDelta::milliseconds(ms))
}

/// Nanosecond-resolution instants within roughly ±1000 years.
fn wide_instant() -> impl Strategy<Value = DateTime<Utc>> {
    (-31_557_600_000i64..31_557_600_000, 0i64..1_000_000_000)
        .prop_map(|(secs, nanos)| epoch() + TimeDelta::seconds(secs) + TimeDelta::nanoseconds(nanos))
}

/// Ranges from about 300 to 1000 years long, with sub-second ends.
fn long_range() -> impl Strategy<Value = TimeRange> {
    (
        -31_557_600_000i64..0,
        9_500_000_000i64..31_557_600_000,
        0i64..1_000_000_000,
    )
        .prop_map(|(from, len, nanos)| {
            let start = epoch() + TimeDelta::seconds(from);
            let end = start + TimeDelta::seconds(len) + TimeDelta::nanoseconds(nanos);
            TimeRange::new(start, end).expect("ordered")
        })
}

fn range() -> impl Strategy<Value = TimeRange> {
    (instant(), 1i64..946_080_000_000).prop_map(|(start, len)| {
        TimeRange::new(start, start + TimeDelta::milliseconds(len)).expect("ordered")
    })
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Monotonicity
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn position_is_monotone(r in range(), a in instant(), b in instant()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(position_of(lo, &r) <= position_of(hi, &r));
    }

    #[test]
    fn position_is_monotone_on_long_ranges(r in long_range(), a in wide_instant(), b in wide_instant()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(position_of(lo, &r) <= position_of(hi, &r));
    }

    #[test]
    fn order_holds_near_the_i64_nanosecond_limit(
        r in long_range(),
        back in 0i64..5_000_000,
        fwd in 1i64..5_000_000,
    ) {
        let limit = r.start() + TimeDelta::nanoseconds(i64::MAX);
        let before = limit - TimeDelta::nanoseconds(back);
        let after = limit + TimeDelta::nanoseconds(fwd);
        prop_assert!(position_of(before, &r) <= position_of(after, &r));
    }

    #[test]
    fn long_range_boundaries_are_exact(r in long_range()) {
        prop_assert_eq!(position_of(r.start(), &r), 0.0);
        prop_assert_eq!(position_of(r.end(), &r), 100.0);
    }

    #[test]
    fn in_range_positions_stay_in_bounds(r in range(), frac in 0.0f64..=1.0) {
        let span_ms = r.span().num_milliseconds();
        let t = r.start() + TimeDelta::milliseconds((span_ms as f64 * frac) as i64);
        let p = position_of(t, &r);
        prop_assert!((0.0..=100.0).contains(&p), "p = {p}");
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2 + 3. Boundaries and degenerate range
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn boundaries_are_exact(r in range()) {
        prop_assert_eq!(position_of(r.start(), &r), 0.0);
        prop_assert_eq!(position_of(r.end(), &r), 100.0);
    }

    #[test]
    fn degenerate_range_is_midpoint(at in instant(), x in instant()) {
        let r = TimeRange::instant(at);
        prop_assert_eq!(position_of(x, &r), DEGENERATE_POSITION);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Resolved ranges are tight bounds
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn resolved_range_is_tight(stamps in proptest::collection::vec(instant(), 1..40)) {
        let events: Vec<TimelineEvent> = stamps
            .iter()
            .enumerate()
            .map(|(i, &t)| TimelineEvent::new(format!("e{i}"), "event", t))
            .collect();
        let r = resolve_at(&events, None, epoch());
        prop_assert!(events.iter().all(|e| r.contains(e.timestamp)));
        prop_assert_eq!(Some(r.start()), stamps.iter().copied().min());
        prop_assert_eq!(Some(r.end()), stamps.iter().copied().max());
    }

    #[test]
    fn override_always_wins(stamps in proptest::collection::vec(instant(), 0..10), forced in range()) {
        let events: Vec<TimelineEvent> = stamps
            .iter()
            .map(|&t| TimelineEvent::new("e", "event", t))
            .collect();
        prop_assert_eq!(resolve_at(&events, Some(forced), epoch()), forced);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Marker spacing
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn markers_are_evenly_spaced(r in range(), count in 2usize..20) {
        let ms = markers(&r, count).expect("count >= 2");
        prop_assert_eq!(ms.len(), count);
        prop_assert_eq!(ms[0].instant, r.start());
        prop_assert_eq!(ms[count - 1].instant, r.end());
        prop_assert_eq!(ms[0].percent, 0.0);
        prop_assert_eq!(ms[count - 1].percent, 100.0);
        for pair in ms.windows(2) {
            prop_assert!(pair[0].instant <= pair[1].instant);
            prop_assert!(pair[0].percent < pair[1].percent);
        }
        prop_assert!(ms.iter().all(|m| !m.label.is_empty()));
    }
}
