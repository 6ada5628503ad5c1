//! Time to pixel mapping for the timetable grid.
//!
//! Offsets are measured from the top of the grid body, which starts at
//! `start_hour:00`. One hour is `pixels_per_hour` tall and the drop grid
//! snaps to 10-minute slots.

use crate::models::clock::{ClockTime, MINUTES_PER_HOUR};

pub const PIXELS_PER_HOUR: f32 = 120.0;
pub const SLOT_MINUTES: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGeometry {
    pub pixels_per_hour: f32,
}

impl Default for TimeGeometry {
    fn default() -> Self {
        Self {
            pixels_per_hour: PIXELS_PER_HOUR,
        }
    }
}

impl TimeGeometry {
    /// Geometry with every distance multiplied by `scale`.
    pub fn scaled(scale: f32) -> Self {
        Self {
            pixels_per_hour: PIXELS_PER_HOUR * scale,
        }
    }

    /// Height of one snap slot.
    pub fn slot_height(&self) -> f32 {
        self.pixels_per_hour * SLOT_MINUTES as f32 / MINUTES_PER_HOUR as f32
    }

    /// Vertical offset of `time` below the body top. Times before
    /// `start_hour` give negative offsets.
    pub fn position_of(&self, time: ClockTime, start_hour: u32) -> f32 {
        (time.as_hours() - start_hour as f32) * self.pixels_per_hour
    }

    pub fn height_of(&self, start: ClockTime, end: ClockTime) -> f32 {
        (end.as_hours() - start.as_hours()) * self.pixels_per_hour
    }

    /// Height of the body for `[start_hour, end_hour]`; the `end_hour` row
    /// itself is drawn, so one extra hour is included.
    pub fn body_height(&self, start_hour: u32, end_hour: u32) -> f32 {
        (end_hour.saturating_sub(start_hour) + 1) as f32 * self.pixels_per_hour
    }

    /// Converts a body offset to a time on the 10-minute grid.
    ///
    /// Rounds half up to the nearest slot, then clamps the whole time into
    /// `[start_hour:00, end_hour:00]`.
    pub fn snap(&self, offset: f32, start_hour: u32, end_hour: u32) -> ClockTime {
        let lower = start_hour * MINUTES_PER_HOUR;
        let upper = end_hour.max(start_hour) * MINUTES_PER_HOUR;

        let raw_minutes = offset / self.pixels_per_hour * MINUTES_PER_HOUR as f32;
        let slots = (raw_minutes / SLOT_MINUTES as f32 + 0.5).floor();
        let snapped = lower as f32 + slots * SLOT_MINUTES as f32;

        let minutes = snapped.clamp(lower as f32, upper as f32) as u32;
        ClockTime::from_minutes(minutes).unwrap_or(ClockTime::END_OF_DAY)
    }

    /// Offset of an already snapped time, used to place the drop preview.
    pub fn snapped_offset(&self, time: ClockTime, start_hour: u32) -> f32 {
        self.position_of(time, start_hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn test_position_of() {
        let geometry = TimeGeometry::default();
        assert_eq!(geometry.position_of(t("13:00"), 13), 0.0);
        assert_eq!(geometry.position_of(t("14:30"), 13), 180.0);
        assert_eq!(geometry.position_of(t("12:00"), 13), -120.0);
    }

    #[test]
    fn test_one_hour_is_one_pixels_per_hour() {
        let geometry = TimeGeometry::default();
        assert_eq!(geometry.height_of(t("13:00"), t("14:00")), PIXELS_PER_HOUR);
        assert_eq!(geometry.slot_height(), 20.0);
    }

    #[test]
    fn test_body_height_includes_last_row() {
        let geometry = TimeGeometry::default();
        assert_eq!(geometry.body_height(13, 22), 10.0 * PIXELS_PER_HOUR);
        assert_eq!(geometry.body_height(9, 22), 14.0 * PIXELS_PER_HOUR);
    }

    #[test_case(0.0, "13:00" ; "top of body")]
    #[test_case(9.9, "13:00" ; "just under half slot")]
    #[test_case(10.0, "13:10" ; "half slot rounds up")]
    #[test_case(640.0, "18:20" ; "mid afternoon")]
    #[test_case(-30.0, "13:00" ; "above body clamps to start")]
    #[test_case(-8.0, "13:00" ; "slightly above body")]
    #[test_case(5000.0, "22:00" ; "below body clamps to end")]
    #[test_case(1090.0, "22:00" ; "inside last row clamps to end")]
    fn test_snap(offset: f32, expected: &str) {
        let geometry = TimeGeometry::default();
        assert_eq!(geometry.snap(offset, 13, 22).to_string(), expected);
    }

    #[test]
    fn test_snap_never_yields_odd_minute_at_lower_bound() {
        let geometry = TimeGeometry::default();
        for tenth in -200..0 {
            let time = geometry.snap(tenth as f32 / 10.0, 13, 22);
            assert_eq!(time.to_string(), "13:00");
        }
    }

    #[test]
    fn test_scaled_geometry() {
        let geometry = TimeGeometry::scaled(2.0);
        assert_eq!(geometry.height_of(t("13:00"), t("14:00")), 240.0);
        assert_eq!(geometry.snap(40.0, 13, 22).to_string(), "13:10");
    }
}
