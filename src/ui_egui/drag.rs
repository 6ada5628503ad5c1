//! In-flight drag state for the timetable grid.
//!
//! `DragSession` is owned by the app and handed to the palette and grid by
//! `&mut`. Offsets are body offsets in layout pixels (0 = top of the body).
//! The session only tracks where a drag would land; committing the drop is
//! left to `ScheduleService`.

use crate::models::clock::ClockTime;
use crate::models::day::DayOfWeek;
use crate::models::event::ScheduleEvent;
use crate::models::school_time::SchoolTime;
use crate::models::template::EventTemplate;
use crate::models::viewport::GridViewport;
use crate::services::layout::{PreviewSpec, TimeGeometry};
use crate::services::overlap::OverlapPolicy;
use crate::services::schedule::{DragKind, DropRequest};

/// Latest snapped position under the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragHover {
    pub day: DayOfWeek,
    pub start: ClockTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveDrag {
    pub kind: DragKind,
    pub source_id: i64,
    pub title: String,
    pub duration_minutes: u32,
    /// Distance from the grabbed point to the top of the dragged block.
    pub pointer_offset: f32,
    pub hover: Option<DragHover>,
}

#[derive(Debug, Default)]
pub struct DragSession {
    active: Option<ActiveDrag>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging a template from the palette. Unsaved templates cannot
    /// be dragged.
    pub fn begin_new(&mut self, template: &EventTemplate) -> bool {
        let Some(source_id) = template.id else {
            return false;
        };
        self.active = Some(ActiveDrag {
            kind: DragKind::New,
            source_id,
            title: template.title.clone(),
            duration_minutes: template.duration_minutes,
            pointer_offset: 0.0,
            hover: None,
        });
        true
    }

    /// Start moving an event already on the grid, grabbed `pointer_offset`
    /// pixels below its top edge.
    pub fn begin_move(&mut self, event: &ScheduleEvent, pointer_offset: f32) -> bool {
        let Some(source_id) = event.id else {
            return false;
        };
        self.active = Some(ActiveDrag {
            kind: DragKind::Move,
            source_id,
            title: event.title.clone(),
            duration_minutes: event.duration_minutes(),
            pointer_offset,
            hover: None,
        });
        true
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&ActiveDrag> {
        self.active.as_ref()
    }

    fn snapped(
        drag: &ActiveDrag,
        pointer_y: f32,
        geometry: &TimeGeometry,
        viewport: GridViewport,
    ) -> ClockTime {
        geometry.snap(
            pointer_y - drag.pointer_offset,
            viewport.start_hour,
            viewport.end_hour,
        )
    }

    /// Recompute the snapped landing time for the pointer over `day`.
    /// Only the latest hover is kept.
    pub fn hover(
        &mut self,
        day: DayOfWeek,
        pointer_y: f32,
        geometry: &TimeGeometry,
        viewport: GridViewport,
    ) -> Option<ClockTime> {
        let drag = self.active.as_mut()?;
        let start = Self::snapped(drag, pointer_y, geometry, viewport);
        drag.hover = Some(DragHover { day, start });
        Some(start)
    }

    /// Pointer left every day column.
    pub fn clear_hover(&mut self) {
        if let Some(drag) = self.active.as_mut() {
            drag.hover = None;
        }
    }

    /// Finish the drag over `day`. The session is idle afterwards whatever
    /// happens to the returned request.
    pub fn take_drop(
        &mut self,
        day: DayOfWeek,
        pointer_y: f32,
        geometry: &TimeGeometry,
        viewport: GridViewport,
    ) -> Option<DropRequest> {
        let drag = self.active.take()?;
        let start = Self::snapped(&drag, pointer_y, geometry, viewport);
        Some(DropRequest {
            kind: drag.kind,
            source_id: drag.source_id,
            day,
            start,
            duration_minutes: drag.duration_minutes,
        })
    }

    /// Released outside any drop target.
    pub fn cancel(&mut self) {
        if let Some(drag) = self.active.take() {
            log::debug!("Drag of '{}' cancelled", drag.title);
        }
    }

    /// Preview for the current hover, flagged when school hours block it.
    pub fn preview(&self, school_times: &[SchoolTime]) -> Option<PreviewSpec> {
        let drag = self.active.as_ref()?;
        let hover = drag.hover?;
        let blocked =
            OverlapPolicy::new(school_times).is_blocked(hover.day, hover.start, drag.duration_minutes);
        Some(PreviewSpec {
            day: hover.day,
            start: hover.start,
            duration_minutes: drag.duration_minutes,
            blocked,
        })
    }
}
