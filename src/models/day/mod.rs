//! Day-of-week model for the weekly timetable.
//!
//! The timetable is not date based: every entry repeats each week on one of
//! seven fixed days, so a plain enum is enough. The week starts on Monday.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DayOfWeek {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayOfWeek {
    /// All days in grid column order.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Mon,
        DayOfWeek::Tue,
        DayOfWeek::Wed,
        DayOfWeek::Thu,
        DayOfWeek::Fri,
        DayOfWeek::Sat,
        DayOfWeek::Sun,
    ];

    /// Weekdays that get a school time by default.
    pub const SCHOOL_DAYS: [DayOfWeek; 5] = [
        DayOfWeek::Mon,
        DayOfWeek::Tue,
        DayOfWeek::Wed,
        DayOfWeek::Thu,
        DayOfWeek::Fri,
    ];

    /// Zero-based column index (Monday = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn short_name(self) -> &'static str {
        match self {
            DayOfWeek::Mon => "Mon",
            DayOfWeek::Tue => "Tue",
            DayOfWeek::Wed => "Wed",
            DayOfWeek::Thu => "Thu",
            DayOfWeek::Fri => "Fri",
            DayOfWeek::Sat => "Sat",
            DayOfWeek::Sun => "Sun",
        }
    }

    pub fn full_name(self) -> &'static str {
        match self {
            DayOfWeek::Mon => "Monday",
            DayOfWeek::Tue => "Tuesday",
            DayOfWeek::Wed => "Wednesday",
            DayOfWeek::Thu => "Thursday",
            DayOfWeek::Fri => "Friday",
            DayOfWeek::Sat => "Saturday",
            DayOfWeek::Sun => "Sunday",
        }
    }

    pub fn is_weekend(self) -> bool {
        matches!(self, DayOfWeek::Sat | DayOfWeek::Sun)
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for DayOfWeek {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|day| {
                day.short_name().eq_ignore_ascii_case(needle)
                    || day.full_name().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| format!("Unknown day of week: '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_order_starts_monday() {
        assert_eq!(DayOfWeek::ALL[0], DayOfWeek::Mon);
        assert_eq!(DayOfWeek::ALL[6], DayOfWeek::Sun);
        for (i, day) in DayOfWeek::ALL.iter().enumerate() {
            assert_eq!(day.index(), i);
            assert_eq!(DayOfWeek::from_index(i), Some(*day));
        }
        assert_eq!(DayOfWeek::from_index(7), None);
    }

    #[test]
    fn test_parse_short_and_full_names() {
        assert_eq!("wed".parse::<DayOfWeek>().unwrap(), DayOfWeek::Wed);
        assert_eq!("Saturday".parse::<DayOfWeek>().unwrap(), DayOfWeek::Sat);
        assert!("Funday".parse::<DayOfWeek>().is_err());
    }

    #[test]
    fn test_serde_uses_short_names() {
        let json = serde_json::to_string(&DayOfWeek::Thu).unwrap();
        assert_eq!(json, "\"Thu\"");
        let day: DayOfWeek = serde_json::from_str("\"Sun\"").unwrap();
        assert_eq!(day, DayOfWeek::Sun);
    }

    #[test]
    fn test_weekend() {
        assert!(DayOfWeek::Sat.is_weekend());
        assert!(!DayOfWeek::Fri.is_weekend());
    }
}
