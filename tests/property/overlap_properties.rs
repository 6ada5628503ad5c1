// Property-based tests for school-hour blocking

use kids_timetable::models::clock::ClockTime;
use kids_timetable::models::day::DayOfWeek;
use kids_timetable::models::school_time::SchoolTime;
use kids_timetable::services::overlap::OverlapPolicy;
use proptest::prelude::*;

fn any_day() -> impl Strategy<Value = DayOfWeek> {
    (0usize..7).prop_map(|i| DayOfWeek::from_index(i).unwrap())
}

fn slot_start() -> impl Strategy<Value = ClockTime> {
    (0u32..=138).prop_map(|slot| ClockTime::from_minutes(slot * 10).unwrap())
}

fn school(start: &str, end: &str) -> Vec<SchoolTime> {
    DayOfWeek::SCHOOL_DAYS
        .iter()
        .map(|day| SchoolTime::new(*day, start.parse().unwrap(), end.parse().unwrap()))
        .collect()
}

proptest! {
    /// Property: with no school times nothing is ever blocked
    #[test]
    fn prop_no_school_never_blocks(day in any_day(), start in slot_start(), duration in 10u32..240) {
        prop_assert!(!OverlapPolicy::new(&[]).is_blocked(day, start, duration));
    }

    /// Property: disabled school times never block
    #[test]
    fn prop_disabled_school_never_blocks(day in any_day(), start in slot_start(), duration in 10u32..240) {
        let mut times = school("09:00", "13:00");
        for time in &mut times {
            time.is_enabled = false;
        }
        prop_assert!(!OverlapPolicy::new(&times).is_blocked(day, start, duration));
    }

    /// Property: blocked exactly when the half-open intervals intersect
    #[test]
    fn prop_blocked_iff_intervals_intersect(start in slot_start(), duration in 10u32..240) {
        let times = school("09:00", "13:00");
        let s = start.minutes();
        let e = s + duration;
        let expected = s < 13 * 60 && e > 9 * 60;
        prop_assert_eq!(OverlapPolicy::new(&times).is_blocked(DayOfWeek::Wed, start, duration), expected);
    }

    /// Property: weekends are never blocked by weekday school hours
    #[test]
    fn prop_weekends_are_free(start in slot_start(), duration in 10u32..240, sunday in any::<bool>()) {
        let day = if sunday { DayOfWeek::Sun } else { DayOfWeek::Sat };
        prop_assert!(!OverlapPolicy::new(&school("08:00", "16:00")).is_blocked(day, start, duration));
    }
}
