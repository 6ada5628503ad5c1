//! Pure layout of the weekly timetable grid.
//!
//! `GridLayout::build` turns events, school times and the current drop
//! preview into positioned primitives. The egui view and both snapshot
//! exporters paint the same layout, so the grid looks identical on screen
//! and in files. Coordinates are in layout pixels with the origin at the
//! top-left corner of the header row.

pub mod geometry;

pub use geometry::{TimeGeometry, PIXELS_PER_HOUR, SLOT_MINUTES};

use crate::models::category;
use crate::models::clock::ClockTime;
use crate::models::day::DayOfWeek;
use crate::models::event::ScheduleEvent;
use crate::models::school_time::SchoolTime;
use crate::models::viewport::GridViewport;

/// Fixed chrome around the body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    pub time_column_width: f32,
    pub header_height: f32,
    pub day_width: f32,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self {
            time_column_width: 64.0,
            header_height: 48.0,
            day_width: 140.0,
        }
    }
}

impl GridMetrics {
    pub fn scaled(&self, scale: f32) -> Self {
        Self {
            time_column_width: self.time_column_width * scale,
            header_height: self.header_height * scale,
            day_width: self.day_width * scale,
        }
    }

    /// Widens the day columns to fill `available` pixels, never below the minimum.
    pub fn fitted_to(&self, available: f32) -> Self {
        let day_width = ((available - self.time_column_width) / DayOfWeek::ALL.len() as f32)
            .max(self.day_width);
        Self { day_width, ..*self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LayoutRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Hour,
    HalfHour,
    Slot,
}

/// A horizontal rule across all day columns.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    pub y: f32,
    pub kind: LineKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourLabel {
    pub hour: u32,
    pub y: f32,
    pub text: String,
    pub half_text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayHeader {
    pub day: DayOfWeek,
    pub rect: LayoutRect,
}

/// Cross-hatched school-time band.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockedBand {
    pub day: DayOfWeek,
    pub rect: LayoutRect,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventBlock {
    pub event_id: Option<i64>,
    pub day: DayOfWeek,
    pub rect: LayoutRect,
    pub title: String,
    pub time_label: String,
    pub category: String,
    pub color: [u8; 3],
    pub description: String,
    /// Part of the block lies outside the visible body.
    pub clipped: bool,
}

/// Where an in-flight drag would land.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewSpec {
    pub day: DayOfWeek,
    pub start: ClockTime,
    pub duration_minutes: u32,
    pub blocked: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropPreview {
    pub day: DayOfWeek,
    pub rect: LayoutRect,
    pub start: ClockTime,
    pub blocked: bool,
    pub label: String,
}

/// Everything needed to paint one frame of the grid, back to front:
/// lines, blocked bands, drop preview, event blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    pub metrics: GridMetrics,
    pub geometry: TimeGeometry,
    pub viewport: GridViewport,
    pub width: f32,
    pub height: f32,
    pub day_headers: Vec<DayHeader>,
    pub hour_labels: Vec<HourLabel>,
    pub lines: Vec<GridLine>,
    pub blocked: Vec<BlockedBand>,
    pub preview: Option<DropPreview>,
    pub blocks: Vec<EventBlock>,
}

impl GridLayout {
    pub fn build(
        events: &[ScheduleEvent],
        school_times: &[SchoolTime],
        viewport: GridViewport,
        preview: Option<PreviewSpec>,
        metrics: GridMetrics,
        geometry: TimeGeometry,
    ) -> Self {
        let body_height = geometry.body_height(viewport.start_hour, viewport.end_hour);
        let mut layout = Self {
            metrics,
            geometry,
            viewport,
            width: metrics.time_column_width + metrics.day_width * DayOfWeek::ALL.len() as f32,
            height: metrics.header_height + body_height,
            day_headers: Vec::new(),
            hour_labels: Vec::new(),
            lines: Vec::new(),
            blocked: Vec::new(),
            preview: None,
            blocks: Vec::new(),
        };

        layout.day_headers = DayOfWeek::ALL
            .iter()
            .map(|day| DayHeader {
                day: *day,
                rect: LayoutRect::new(
                    layout.column_x(*day),
                    0.0,
                    metrics.day_width,
                    metrics.header_height,
                ),
            })
            .collect();

        layout.build_rules();

        layout.blocked = school_times
            .iter()
            .filter(|time| time.is_enabled)
            .filter_map(|time| {
                let rect = layout.body_rect(time.day, time.start_time, time.end_time)?;
                Some(BlockedBand {
                    day: time.day,
                    rect,
                    label: format!("School {} - {}", time.start_time, time.end_time),
                })
            })
            .collect();

        layout.preview = preview.and_then(|spec| {
            let end = ClockTime::from_minutes(spec.start.minutes() + spec.duration_minutes)
                .unwrap_or(ClockTime::END_OF_DAY);
            let rect = layout.body_rect(spec.day, spec.start, end)?;
            let label = if spec.blocked {
                format!("{} blocked by school", spec.start)
            } else {
                format!("Start {}", spec.start)
            };
            Some(DropPreview {
                day: spec.day,
                rect,
                start: spec.start,
                blocked: spec.blocked,
                label,
            })
        });

        layout.blocks = events
            .iter()
            .filter_map(|event| layout.event_block(event))
            .collect();

        layout
    }

    fn build_rules(&mut self) {
        let pph = self.geometry.pixels_per_hour;
        let slot = self.geometry.slot_height();
        let slots_per_hour = (pph / slot).round() as u32;
        let top = self.metrics.header_height;

        for (row, hour) in self.viewport.hours().enumerate() {
            let y = top + row as f32 * pph;
            self.lines.push(GridLine {
                y,
                kind: LineKind::Hour,
            });
            for i in 1..slots_per_hour {
                let kind = if i * 2 == slots_per_hour {
                    LineKind::HalfHour
                } else {
                    LineKind::Slot
                };
                self.lines.push(GridLine {
                    y: y + i as f32 * slot,
                    kind,
                });
            }
            self.hour_labels.push(HourLabel {
                hour,
                y,
                text: format!("{}:00", hour),
                half_text: format!("{}:30", hour),
            });
        }

        self.lines.push(GridLine {
            y: self.height,
            kind: LineKind::Hour,
        });
    }

    fn column_x(&self, day: DayOfWeek) -> f32 {
        self.metrics.time_column_width + day.index() as f32 * self.metrics.day_width
    }

    /// Rect covering `[start, end)` in a day column, clipped to the body.
    /// `None` when nothing of the interval is visible.
    fn body_rect(&self, day: DayOfWeek, start: ClockTime, end: ClockTime) -> Option<LayoutRect> {
        let body_top = self.metrics.header_height;
        let start_hour = self.viewport.start_hour;

        let top = body_top + self.geometry.position_of(start, start_hour);
        let bottom = body_top + self.geometry.position_of(end, start_hour);
        let visible_top = top.max(body_top);
        let visible_bottom = bottom.min(self.height);

        if visible_bottom <= visible_top {
            return None;
        }

        Some(LayoutRect::new(
            self.column_x(day),
            visible_top,
            self.metrics.day_width,
            visible_bottom - visible_top,
        ))
    }

    fn event_block(&self, event: &ScheduleEvent) -> Option<EventBlock> {
        let rect = self.body_rect(event.day, event.start_time, event.end_time)?;
        let full_height = self.geometry.height_of(event.start_time, event.end_time);

        Some(EventBlock {
            event_id: event.id,
            day: event.day,
            rect,
            title: event.title.clone(),
            time_label: format!("{} - {}", event.start_time, event.end_time),
            category: event.category.clone(),
            color: category::rgb_for(&event.category),
            description: event.description.clone(),
            clipped: (rect.height - full_height).abs() > f32::EPSILON,
        })
    }

    /// Top of the body in layout coordinates.
    pub fn body_top(&self) -> f32 {
        self.metrics.header_height
    }

    pub fn body_height(&self) -> f32 {
        self.height - self.metrics.header_height
    }

    /// Day column under a layout x coordinate.
    pub fn day_at(&self, x: f32) -> Option<DayOfWeek> {
        let relative = x - self.metrics.time_column_width;
        if relative < 0.0 || self.metrics.day_width <= 0.0 {
            return None;
        }
        DayOfWeek::from_index((relative / self.metrics.day_width) as usize)
    }

    pub fn column_rect(&self, day: DayOfWeek) -> LayoutRect {
        LayoutRect::new(
            self.column_x(day),
            self.body_top(),
            self.metrics.day_width,
            self.body_height(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::viewport::ViewportWindow;
    use pretty_assertions::assert_eq;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    fn event(day: DayOfWeek, start: &str, end: &str) -> ScheduleEvent {
        let mut event = ScheduleEvent::new("child1", "Piano", day, t(start), t(end)).unwrap();
        event.category = "Sports".into();
        event
    }

    fn build(events: &[ScheduleEvent], window: ViewportWindow) -> GridLayout {
        GridLayout::build(
            events,
            &SchoolTime::default_week(),
            GridViewport::from_window(window),
            None,
            GridMetrics::default(),
            TimeGeometry::default(),
        )
    }

    #[test]
    fn test_dimensions() {
        let layout = build(&[], ViewportWindow::Afternoon);
        assert_eq!(layout.width, 64.0 + 7.0 * 140.0);
        assert_eq!(layout.height, 48.0 + 10.0 * 120.0);
        assert_eq!(layout.day_headers.len(), 7);
        assert_eq!(layout.hour_labels.len(), 10);
        assert_eq!(layout.hour_labels[0].text, "13:00");
    }

    #[test]
    fn test_rules_every_slot() {
        let layout = build(&[], ViewportWindow::Afternoon);
        // 10 rows of 6 rules plus the closing bottom line.
        assert_eq!(layout.lines.len(), 61);
        let half_hours = layout
            .lines
            .iter()
            .filter(|line| line.kind == LineKind::HalfHour)
            .count();
        assert_eq!(half_hours, 10);
        assert_eq!(layout.lines[1].y - layout.lines[0].y, 20.0);
    }

    #[test]
    fn test_event_block_position() {
        let layout = build(&[event(DayOfWeek::Tue, "14:00", "15:30")], ViewportWindow::Afternoon);
        let block = &layout.blocks[0];
        assert_eq!(block.rect, LayoutRect::new(64.0 + 140.0, 48.0 + 120.0, 140.0, 180.0));
        assert_eq!(block.time_label, "14:00 - 15:30");
        assert_eq!(block.color, [0xFE, 0xE2, 0xE2]);
        assert!(!block.clipped);
    }

    #[test]
    fn test_blocks_outside_viewport_are_omitted() {
        let events = [event(DayOfWeek::Sat, "10:00", "11:00")];
        assert!(build(&events, ViewportWindow::Afternoon).blocks.is_empty());
        assert_eq!(build(&events, ViewportWindow::Morning).blocks.len(), 1);
    }

    #[test]
    fn test_partially_visible_block_is_clipped() {
        let layout = build(&[event(DayOfWeek::Sat, "12:30", "13:30")], ViewportWindow::Afternoon);
        let block = &layout.blocks[0];
        assert_eq!(block.rect.y, 48.0);
        assert_eq!(block.rect.height, 60.0);
        assert!(block.clipped);
    }

    #[test]
    fn test_school_bands_follow_viewport() {
        let afternoon = build(&[], ViewportWindow::Afternoon);
        assert!(afternoon.blocked.is_empty(), "09:00-13:00 ends at the body top");

        let morning = build(&[], ViewportWindow::Morning);
        assert_eq!(morning.blocked.len(), 5);
        assert_eq!(morning.blocked[0].rect.height, 4.0 * 120.0);
        assert_eq!(morning.blocked[0].label, "School 09:00 - 13:00");
    }

    #[test]
    fn test_preview() {
        let layout = GridLayout::build(
            &[],
            &[],
            GridViewport::from_window(ViewportWindow::Afternoon),
            Some(PreviewSpec {
                day: DayOfWeek::Wed,
                start: t("15:20"),
                duration_minutes: 40,
                blocked: false,
            }),
            GridMetrics::default(),
            TimeGeometry::default(),
        );
        let preview = layout.preview.unwrap();
        assert_eq!(preview.rect.y, 48.0 + 280.0);
        assert_eq!(preview.rect.height, 80.0);
        assert_eq!(preview.label, "Start 15:20");
    }

    #[test]
    fn test_day_hit_testing() {
        let layout = build(&[], ViewportWindow::Afternoon);
        assert_eq!(layout.day_at(10.0), None);
        assert_eq!(layout.day_at(64.0), Some(DayOfWeek::Mon));
        assert_eq!(layout.day_at(64.0 + 6.5 * 140.0), Some(DayOfWeek::Sun));
        assert_eq!(layout.day_at(64.0 + 7.5 * 140.0), None);
    }

    #[test]
    fn test_fitted_metrics_never_shrink() {
        let metrics = GridMetrics::default();
        assert_eq!(metrics.fitted_to(500.0).day_width, 140.0);
        assert_eq!(metrics.fitted_to(64.0 + 7.0 * 200.0).day_width, 200.0);
    }
}
