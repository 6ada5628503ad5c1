// School time model
// Blocked weekly intervals during which nothing may be scheduled

use serde::{Deserialize, Serialize};

use crate::models::clock::ClockTime;
use crate::models::day::DayOfWeek;
use crate::models::validation::ValidationError;

/// A blocked interval on one day of the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolTime {
    pub day: DayOfWeek,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub is_enabled: bool,
}

impl SchoolTime {
    pub fn new(day: DayOfWeek, start_time: ClockTime, end_time: ClockTime) -> Self {
        Self {
            day,
            start_time,
            end_time,
            is_enabled: true,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.end_time <= self.start_time {
            return Err(ValidationError::EndNotAfterStart {
                start: self.start_time.to_string(),
                end: self.end_time.to_string(),
            });
        }
        Ok(())
    }

    /// Monday to Friday, 09:00 to 13:00, all enabled.
    pub fn default_week() -> Vec<SchoolTime> {
        let start = ClockTime::from_hm(9, 0).unwrap_or_default();
        let end = ClockTime::from_hm(13, 0).unwrap_or_default();
        DayOfWeek::SCHOOL_DAYS
            .iter()
            .map(|day| SchoolTime::new(*day, start, end))
            .collect()
    }
}

/// Validates a whole set before it replaces the stored one.
pub fn validate_set(times: &[SchoolTime]) -> Result<(), ValidationError> {
    let mut seen = Vec::with_capacity(times.len());
    for time in times {
        time.validate()?;
        if seen.contains(&time.day) {
            return Err(ValidationError::DuplicateSchoolDay(time.day.full_name().to_string()));
        }
        seen.push(time.day);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn test_default_week() {
        let week = SchoolTime::default_week();
        assert_eq!(week.len(), 5);
        assert!(week.iter().all(|s| s.is_enabled));
        assert_eq!(week[0].start_time.to_string(), "09:00");
        assert_eq!(week[0].end_time.to_string(), "13:00");
        assert!(!week.iter().any(|s| s.day.is_weekend()));
    }

    #[test]
    fn test_validate_rejects_inverted_interval() {
        let bad = SchoolTime::new(DayOfWeek::Mon, t("13:00"), t("09:00"));
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_validate_set_rejects_duplicate_day() {
        let times = vec![
            SchoolTime::new(DayOfWeek::Tue, t("09:00"), t("12:00")),
            SchoolTime::new(DayOfWeek::Tue, t("13:00"), t("14:00")),
        ];
        assert!(matches!(
            validate_set(&times),
            Err(ValidationError::DuplicateSchoolDay(_))
        ));
    }

    #[test]
    fn test_serialized_shape() {
        let time = SchoolTime::new(DayOfWeek::Wed, t("09:00"), t("13:00"));
        let json = serde_json::to_value(&time).unwrap();
        assert_eq!(json["day"], "Wed");
        assert_eq!(json["startTime"], "09:00");
        assert_eq!(json["endTime"], "13:00");
        assert_eq!(json["isEnabled"], true);
    }
}
