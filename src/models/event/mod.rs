// Event module
// A scheduled weekly activity placed on the timetable grid

use serde::{Deserialize, Serialize};

use crate::models::clock::ClockTime;
use crate::models::day::DayOfWeek;
use crate::models::template::EventTemplate;
use crate::models::validation::{require_text, ValidationError};

/// Activity placed on one day of the weekly timetable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEvent {
    #[serde(skip)]
    pub id: Option<i64>,
    #[serde(default)]
    pub user_id: String,
    pub child_id: String,
    #[serde(default)]
    pub template_id: Option<i64>,
    #[serde(rename = "dayOfWeek")]
    pub day: DayOfWeek,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
}

impl ScheduleEvent {
    /// Create a new event with required fields
    ///
    /// # Examples
    /// ```
    /// use kids_timetable::models::day::DayOfWeek;
    /// use kids_timetable::models::event::ScheduleEvent;
    ///
    /// let start = "15:00".parse().unwrap();
    /// let end = "16:30".parse().unwrap();
    /// let event = ScheduleEvent::new("child1", "Swimming", DayOfWeek::Tue, start, end).unwrap();
    /// assert_eq!(event.duration_minutes(), 90);
    /// ```
    pub fn new(
        child_id: impl Into<String>,
        title: impl Into<String>,
        day: DayOfWeek,
        start_time: ClockTime,
        end_time: ClockTime,
    ) -> Result<Self, ValidationError> {
        let event = Self {
            id: None,
            user_id: String::new(),
            child_id: child_id.into(),
            template_id: None,
            day,
            start_time,
            end_time,
            title: title.into(),
            category: "Other".to_string(),
            description: String::new(),
        };
        event.validate()?;
        Ok(event)
    }

    /// Instantiate a template at a day and start time.
    ///
    /// The end time is `start + template duration`; the template's title,
    /// category and description are copied.
    pub fn from_template(
        template: &EventTemplate,
        child_id: &str,
        day: DayOfWeek,
        start_time: ClockTime,
    ) -> Result<Self, ValidationError> {
        template.validate()?;
        let end_time = start_time
            .checked_add_minutes(template.duration_minutes)
            .ok_or(ValidationError::EndsAfterMidnight)?;

        let event = Self {
            id: None,
            user_id: template.user_id.clone(),
            child_id: child_id.to_string(),
            template_id: template.id,
            day,
            start_time,
            end_time,
            title: template.title.clone(),
            category: template.category.clone(),
            description: template.description.clone(),
        };
        event.validate()?;
        Ok(event)
    }

    /// Validate the event
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.child_id, ValidationError::NoChildSelected)?;
        require_text(&self.title, ValidationError::EmptyTitle)?;

        if self.end_time <= self.start_time {
            return Err(ValidationError::EndNotAfterStart {
                start: self.start_time.to_string(),
                end: self.end_time.to_string(),
            });
        }

        Ok(())
    }

    /// Length in minutes (0 for an invalid event).
    pub fn duration_minutes(&self) -> u32 {
        self.start_time.minutes_until(self.end_time).unwrap_or(0)
    }

    /// Copy of this event moved to a new day and start, keeping its length.
    pub fn moved_to(&self, day: DayOfWeek, start_time: ClockTime) -> Result<Self, ValidationError> {
        let end_time = start_time
            .checked_add_minutes(self.duration_minutes())
            .ok_or(ValidationError::EndsAfterMidnight)?;
        let moved = Self {
            day,
            start_time,
            end_time,
            ..self.clone()
        };
        moved.validate()?;
        Ok(moved)
    }

    pub fn has_description(&self) -> bool {
        !self.description.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_event_valid() {
        let event = ScheduleEvent::new("child1", "Piano", DayOfWeek::Mon, t("14:00"), t("15:00"));
        assert!(event.is_ok());
        let event = event.unwrap();
        assert_eq!(event.duration_minutes(), 60);
        assert!(event.id.is_none());
    }

    #[test]
    fn test_new_event_empty_title() {
        let result = ScheduleEvent::new("child1", "", DayOfWeek::Mon, t("14:00"), t("15:00"));
        assert_eq!(result, Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn test_new_event_end_before_start() {
        let result = ScheduleEvent::new("child1", "Piano", DayOfWeek::Mon, t("15:00"), t("14:00"));
        assert!(matches!(result, Err(ValidationError::EndNotAfterStart { .. })));
    }

    #[test]
    fn test_from_template_computes_end() {
        let mut template = EventTemplate::new("child1", "Art", 40);
        template.id = Some(7);
        template.category = "Play".into();
        let event =
            ScheduleEvent::from_template(&template, "child1", DayOfWeek::Wed, t("15:20")).unwrap();
        assert_eq!(event.start_time.to_string(), "15:20");
        assert_eq!(event.end_time.to_string(), "16:00");
        assert_eq!(event.template_id, Some(7));
        assert_eq!(event.category, "Play");
    }

    #[test]
    fn test_from_template_past_midnight() {
        let template = EventTemplate::new("child1", "Late", 120);
        let result = ScheduleEvent::from_template(&template, "child1", DayOfWeek::Fri, t("23:00"));
        assert_eq!(result, Err(ValidationError::EndsAfterMidnight));
    }

    #[test]
    fn test_moved_to_preserves_duration() {
        let event =
            ScheduleEvent::new("child1", "Soccer", DayOfWeek::Mon, t("13:00"), t("14:30")).unwrap();
        let moved = event.moved_to(DayOfWeek::Sat, t("17:10")).unwrap();
        assert_eq!(moved.day, DayOfWeek::Sat);
        assert_eq!(moved.end_time.to_string(), "18:40");
        assert_eq!(moved.duration_minutes(), 90);
        assert_eq!(moved.title, "Soccer");
    }

    #[test]
    fn test_document_shape() {
        let event =
            ScheduleEvent::new("child1", "Soccer", DayOfWeek::Mon, t("13:00"), t("14:30")).unwrap();
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["dayOfWeek"], "Mon");
        assert_eq!(json["startTime"], "13:00");
        assert_eq!(json["endTime"], "14:30");
        assert_eq!(json["childId"], "child1");
    }
}
