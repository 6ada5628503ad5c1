//! Minute-resolution time of day.
//!
//! Stored documents carry times as zero-padded `HH:MM` strings. `ClockTime`
//! keeps the minutes since midnight and serializes back to that format.
//! `24:00` is accepted as the end-of-day value so an activity may finish
//! exactly at midnight.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const MINUTES_PER_HOUR: u32 = 60;
pub const MINUTES_PER_DAY: u32 = 24 * MINUTES_PER_HOUR;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ClockTime {
    minutes: u32,
}

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime { minutes: 0 };
    pub const END_OF_DAY: ClockTime = ClockTime {
        minutes: MINUTES_PER_DAY,
    };

    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if minute >= MINUTES_PER_HOUR {
            return None;
        }
        Self::from_minutes(hour.checked_mul(MINUTES_PER_HOUR)?.checked_add(minute)?)
    }

    pub fn from_minutes(minutes: u32) -> Option<Self> {
        (minutes <= MINUTES_PER_DAY).then_some(Self { minutes })
    }

    pub fn minutes(self) -> u32 {
        self.minutes
    }

    pub fn hour(self) -> u32 {
        self.minutes / MINUTES_PER_HOUR
    }

    pub fn minute(self) -> u32 {
        self.minutes % MINUTES_PER_HOUR
    }

    /// Fractional hours since midnight, as used by the pixel geometry.
    pub fn as_hours(self) -> f32 {
        self.minutes as f32 / MINUTES_PER_HOUR as f32
    }

    /// Adds a duration, failing when the result would pass `24:00`.
    pub fn checked_add_minutes(self, minutes: u32) -> Option<Self> {
        Self::from_minutes(self.minutes.checked_add(minutes)?)
    }

    /// Minutes from `self` to `later`, `None` if `later` is not after `self`.
    pub fn minutes_until(self, later: ClockTime) -> Option<u32> {
        (later.minutes > self.minutes).then(|| later.minutes - self.minutes)
    }

    pub fn is_aligned_to(self, granularity: u32) -> bool {
        granularity > 0 && self.minutes % granularity == 0
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (h, m) = trimmed
            .split_once(':')
            .ok_or_else(|| format!("Time '{}' must be in HH:MM format", s))?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(format!("Time '{}' must be in HH:MM format", s));
        }
        let hour: u32 = h
            .parse()
            .map_err(|_| format!("Invalid hour in time '{}'", s))?;
        let minute: u32 = m
            .parse()
            .map_err(|_| format!("Invalid minute in time '{}'", s))?;
        ClockTime::from_hm(hour, minute).ok_or_else(|| format!("Time '{}' is out of range", s))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("00:00", 0 ; "midnight")]
    #[test_case("09:05", 545 ; "morning with padding")]
    #[test_case("15:20", 920 ; "afternoon")]
    #[test_case("24:00", 1440 ; "end of day")]
    #[test_case("7:30", 450 ; "single digit hour")]
    fn test_parse_valid(input: &str, minutes: u32) {
        let time: ClockTime = input.parse().unwrap();
        assert_eq!(time.minutes(), minutes);
    }

    #[test_case("24:10" ; "past end of day")]
    #[test_case("12:60" ; "minute overflow")]
    #[test_case("1230" ; "missing colon")]
    #[test_case("12:5" ; "short minute")]
    #[test_case("ab:cd" ; "not numbers")]
    #[test_case("4294967295:00" ; "hour overflows minutes")]
    fn test_parse_invalid(input: &str) {
        assert!(input.parse::<ClockTime>().is_err());
    }

    #[test]
    fn test_from_hm_rejects_huge_hours() {
        assert_eq!(ClockTime::from_hm(u32::MAX, 0), None);
        assert_eq!(ClockTime::from_hm(71_582_788, 59), None);
        assert_eq!(ClockTime::from_hm(24, 0), Some(ClockTime::END_OF_DAY));
    }

    #[test]
    fn test_display_is_zero_padded() {
        assert_eq!(ClockTime::from_hm(7, 5).unwrap().to_string(), "07:05");
        assert_eq!(ClockTime::END_OF_DAY.to_string(), "24:00");
    }

    #[test]
    fn test_checked_add_minutes() {
        let start = ClockTime::from_hm(15, 20).unwrap();
        assert_eq!(start.checked_add_minutes(40).unwrap().to_string(), "16:00");
        let late = ClockTime::from_hm(23, 0).unwrap();
        assert!(late.checked_add_minutes(61).is_none());
    }

    #[test]
    fn test_minutes_until() {
        let a = ClockTime::from_hm(13, 0).unwrap();
        let b = ClockTime::from_hm(14, 30).unwrap();
        assert_eq!(a.minutes_until(b), Some(90));
        assert_eq!(b.minutes_until(a), None);
        assert_eq!(a.minutes_until(a), None);
    }

    #[test]
    fn test_serde_round_trips_through_string() {
        let time = ClockTime::from_hm(9, 0).unwrap();
        let json = serde_json::to_string(&time).unwrap();
        assert_eq!(json, "\"09:00\"");
        assert!(serde_json::from_str::<ClockTime>("\"9am\"").is_err());
    }
}
