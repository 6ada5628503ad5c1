//! School-hour overlap checks.
//!
//! A candidate `[start, start + duration)` is blocked when it intersects an
//! enabled school time on the same day. Intervals are half-open, so touching
//! a boundary is allowed. Blocked drops are rejected, never nudged.

use crate::models::clock::ClockTime;
use crate::models::day::DayOfWeek;
use crate::models::school_time::SchoolTime;

pub struct OverlapPolicy<'a> {
    school_times: &'a [SchoolTime],
}

impl<'a> OverlapPolicy<'a> {
    pub fn new(school_times: &'a [SchoolTime]) -> Self {
        Self { school_times }
    }

    /// Enabled school times on `day`.
    pub fn blocked_on(&self, day: DayOfWeek) -> impl Iterator<Item = &'a SchoolTime> + '_ {
        self.school_times
            .iter()
            .filter(move |time| time.is_enabled && time.day == day)
    }

    /// The school time a candidate would collide with, if any.
    pub fn blocking_interval(
        &self,
        day: DayOfWeek,
        start: ClockTime,
        duration_minutes: u32,
    ) -> Option<&'a SchoolTime> {
        let candidate_start = start.minutes();
        let candidate_end = candidate_start.saturating_add(duration_minutes);

        self.blocked_on(day).find(|blocked| {
            candidate_start < blocked.end_time.minutes()
                && candidate_end > blocked.start_time.minutes()
        })
    }

    pub fn is_blocked(&self, day: DayOfWeek, start: ClockTime, duration_minutes: u32) -> bool {
        self.blocking_interval(day, start, duration_minutes).is_some()
    }
}
