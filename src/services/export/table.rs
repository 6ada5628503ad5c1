use serde::Serialize;
use std::path::Path;

use super::ExportError;
use crate::models::event::ScheduleEvent;
use crate::models::viewport::GridViewport;

/// One spreadsheet row per scheduled activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    #[serde(rename = "Child")]
    pub child: String,
    #[serde(rename = "Day")]
    pub day: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Start")]
    pub start: String,
    #[serde(rename = "End")]
    pub end: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Description")]
    pub description: String,
}

pub struct TableProjection;

impl TableProjection {
    /// Rows for events starting in or after the viewport's first hour,
    /// ordered by day then start time.
    pub fn rows(child_name: &str, events: &[ScheduleEvent], viewport: GridViewport) -> Vec<TableRow> {
        let mut visible: Vec<&ScheduleEvent> = events
            .iter()
            .filter(|event| event.start_time.hour() >= viewport.start_hour)
            .collect();
        visible.sort_by_key(|event| (event.day, event.start_time));

        visible
            .into_iter()
            .map(|event| TableRow {
                child: child_name.to_string(),
                day: event.day.full_name().to_string(),
                title: event.title.clone(),
                start: event.start_time.to_string(),
                end: event.end_time.to_string(),
                category: event.category.clone(),
                description: event.description.clone(),
            })
            .collect()
    }

    pub fn write_csv(path: &Path, rows: &[TableRow]) -> Result<(), ExportError> {
        let mut writer = csv::Writer::from_path(path)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}
