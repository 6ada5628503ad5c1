// Schedule service
// Commits grid drops and deletions of scheduled activities

use serde_json::json;
use thiserror::Error;

use crate::models::clock::ClockTime;
use crate::models::day::DayOfWeek;
use crate::models::event::ScheduleEvent;
use crate::models::school_time::SchoolTime;
use crate::models::template::EventTemplate;
use crate::models::validation::ValidationError;
use crate::services::overlap::OverlapPolicy;
use crate::services::store::{
    query_records, Collection, DocumentFilter, DocumentId, DocumentStore, StoreError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    /// A template dragged in from the palette.
    New,
    /// An event already on the grid.
    Move,
}

/// Final position of a completed drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropRequest {
    pub kind: DragKind,
    pub source_id: DocumentId,
    pub day: DayOfWeek,
    pub start: ClockTime,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    Created(ScheduleEvent),
    Moved(ScheduleEvent),
}

impl DropOutcome {
    pub fn event(&self) -> &ScheduleEvent {
        match self {
            DropOutcome::Created(event) | DropOutcome::Moved(event) => event,
        }
    }
}

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{day} {start}-{end} overlaps school time {blocked}")]
    Blocked {
        day: DayOfWeek,
        start: ClockTime,
        end: String,
        blocked: String,
    },
    #[error("Failed to save schedule: {0}")]
    Store(#[from] StoreError),
    #[error("The dragged item no longer exists")]
    UnknownSource,
}

pub struct ScheduleService<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> ScheduleService<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Filter selecting one child's events.
    pub fn child_filter(child_id: &str) -> DocumentFilter {
        DocumentFilter::new(Collection::Events).field("childId", child_id)
    }

    /// Persist a drop: a new event from a template, or a moved event.
    ///
    /// School-time overlap is checked first and vetoes the drop before
    /// anything is validated or written.
    pub fn commit_drop(
        &self,
        request: DropRequest,
        child_id: Option<&str>,
        templates: &[EventTemplate],
        events: &[ScheduleEvent],
        school_times: &[SchoolTime],
    ) -> Result<DropOutcome, ScheduleError> {
        match request.kind {
            DragKind::New => {
                let child_id = child_id
                    .filter(|id| !id.trim().is_empty())
                    .ok_or(ValidationError::NoChildSelected)?;
                let template = templates
                    .iter()
                    .find(|t| t.id == Some(request.source_id))
                    .ok_or(ScheduleError::UnknownSource)?;

                self.check_overlap(school_times, request.day, request.start, template.duration_minutes)?;

                let mut event =
                    ScheduleEvent::from_template(template, child_id, request.day, request.start)?;
                event.user_id = self.store.owner().to_string();

                let id = self
                    .store
                    .create(Collection::Events, serde_json::to_value(&event).map_err(StoreError::from)?)?;
                event.id = Some(id);

                log::info!(
                    "Scheduled '{}' on {} {}-{}",
                    event.title,
                    event.day,
                    event.start_time,
                    event.end_time
                );
                Ok(DropOutcome::Created(event))
            }
            DragKind::Move => {
                let existing = events
                    .iter()
                    .find(|e| e.id == Some(request.source_id))
                    .ok_or(ScheduleError::UnknownSource)?;

                self.check_overlap(
                    school_times,
                    request.day,
                    request.start,
                    existing.duration_minutes(),
                )?;

                let moved = existing.moved_to(request.day, request.start)?;
                self.store.update(
                    Collection::Events,
                    request.source_id,
                    json!({
                        "dayOfWeek": moved.day,
                        "startTime": moved.start_time,
                        "endTime": moved.end_time,
                    }),
                )?;

                log::info!(
                    "Moved '{}' to {} {}-{}",
                    moved.title,
                    moved.day,
                    moved.start_time,
                    moved.end_time
                );
                Ok(DropOutcome::Moved(moved))
            }
        }
    }

    fn check_overlap(
        &self,
        school_times: &[SchoolTime],
        day: DayOfWeek,
        start: ClockTime,
        duration_minutes: u32,
    ) -> Result<(), ScheduleError> {
        let policy = OverlapPolicy::new(school_times);
        if let Some(blocked) = policy.blocking_interval(day, start, duration_minutes) {
            let end = start
                .checked_add_minutes(duration_minutes)
                .map(|end| end.to_string())
                .unwrap_or_else(|| "24:00+".to_string());
            log::warn!("Rejected drop on {} at {}: school hours", day, start);
            return Err(ScheduleError::Blocked {
                day,
                start,
                end,
                blocked: format!("{} - {}", blocked.start_time, blocked.end_time),
            });
        }
        Ok(())
    }

    pub fn delete(&self, id: DocumentId) -> Result<(), ScheduleError> {
        self.store.delete(Collection::Events, id)?;
        log::info!("Deleted scheduled event {}", id);
        Ok(())
    }

    pub fn events_for_child(&self, child_id: &str) -> Result<Vec<ScheduleEvent>, ScheduleError> {
        Ok(query_records(self.store, &Self::child_filter(child_id))?)
    }
}
