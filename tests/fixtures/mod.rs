// Test fixtures - reusable test data
// Provides consistent test data across all test files

#![allow(dead_code)]

use kids_timetable::models::clock::ClockTime;
use kids_timetable::models::day::DayOfWeek;
use kids_timetable::models::event::ScheduleEvent;
use kids_timetable::models::school_time::SchoolTime;
use kids_timetable::models::template::EventTemplate;

pub const OWNER: &str = "local";
pub const CHILD: &str = "child1";

pub fn t(s: &str) -> ClockTime {
    s.parse().unwrap()
}

/// Sample activity templates
pub mod templates {
    use super::*;

    pub fn piano() -> EventTemplate {
        EventTemplate::builder()
            .user_id(OWNER)
            .child_id(CHILD)
            .title("Piano")
            .duration_minutes(60)
            .category("Academy")
            .description("Bring the green book")
            .build()
            .unwrap()
    }

    pub fn swimming() -> EventTemplate {
        EventTemplate::builder()
            .user_id(OWNER)
            .child_id(CHILD)
            .title("Swimming")
            .duration_minutes(90)
            .category("Sports")
            .build()
            .unwrap()
    }
}

/// Sample scheduled events
pub mod events {
    use super::*;

    pub fn event(title: &str, day: DayOfWeek, start: &str, end: &str) -> ScheduleEvent {
        let mut event = ScheduleEvent::new(CHILD, title, day, t(start), t(end)).unwrap();
        event.user_id = OWNER.to_string();
        event
    }

    pub fn busy_week() -> Vec<ScheduleEvent> {
        vec![
            event("Piano", DayOfWeek::Mon, "16:00", "17:00"),
            event("Swimming", DayOfWeek::Wed, "15:30", "17:00"),
            event("Reading", DayOfWeek::Sat, "10:00", "10:40"),
        ]
    }
}

/// School hours matching a new child's defaults
pub fn school_week() -> Vec<SchoolTime> {
    SchoolTime::default_week()
}
