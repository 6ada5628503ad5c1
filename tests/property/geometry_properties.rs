// Property-based tests for time to pixel mapping
// Random offsets and times across the visible window

use kids_timetable::models::clock::ClockTime;
use kids_timetable::services::layout::{TimeGeometry, SLOT_MINUTES};
use proptest::prelude::*;

const START_HOUR: u32 = 9;
const END_HOUR: u32 = 22;

fn visible_time() -> impl Strategy<Value = ClockTime> {
    (START_HOUR * 60..=END_HOUR * 60).prop_map(|m| ClockTime::from_minutes(m).unwrap())
}

proptest! {
    /// Property: later times are always drawn further down
    #[test]
    fn prop_position_is_monotonic(a in visible_time(), b in visible_time()) {
        let geometry = TimeGeometry::default();
        prop_assume!(a < b);
        prop_assert!(geometry.position_of(a, START_HOUR) < geometry.position_of(b, START_HOUR));
    }

    /// Property: a block's height equals the distance between its edges
    #[test]
    fn prop_height_matches_positions(a in visible_time(), b in visible_time(), scale in 1u32..4) {
        let geometry = TimeGeometry::scaled(scale as f32);
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let by_positions =
            geometry.position_of(end, START_HOUR) - geometry.position_of(start, START_HOUR);
        prop_assert!((geometry.height_of(start, end) - by_positions).abs() < 0.01);
    }

    /// Property: snapped times are on the slot grid and inside the window
    #[test]
    fn prop_snap_lands_on_grid_within_window(offset in -500.0f32..3000.0) {
        let geometry = TimeGeometry::default();
        let time = geometry.snap(offset, START_HOUR, END_HOUR);
        prop_assert!(time.is_aligned_to(SLOT_MINUTES));
        prop_assert!(time.hour() >= START_HOUR);
        prop_assert!(time.minutes() <= END_HOUR * 60);
    }

    /// Property: snapping the offset of a snapped time gives the same time
    #[test]
    fn prop_snap_is_idempotent(offset in 0.0f32..1680.0) {
        let geometry = TimeGeometry::default();
        let once = geometry.snap(offset, START_HOUR, END_HOUR);
        let again = geometry.snap(geometry.snapped_offset(once, START_HOUR), START_HOUR, END_HOUR);
        prop_assert_eq!(once, again);
    }

    /// Property: snapping never moves more than half a slot inside the window
    #[test]
    fn prop_snap_error_is_at_most_half_a_slot(offset in 0.0f32..1560.0) {
        let geometry = TimeGeometry::default();
        let time = geometry.snap(offset, START_HOUR, END_HOUR);
        let error = (geometry.position_of(time, START_HOUR) - offset).abs();
        prop_assert!(error <= geometry.slot_height() / 2.0 + 0.01);
    }
}
