//! Egui painter and pointer handling for the weekly timetable grid.
//!
//! The grid is laid out by `GridLayout::build` and painted here inside a
//! scroll area. Interaction results are returned as `GridAction`s for the
//! app to commit; nothing is persisted from this module.

use egui::{Align2, Color32, CursorIcon, FontId, Id, Painter, Pos2, Rect, RichText, Sense, Stroke, Ui, Vec2};

use crate::models::day::DayOfWeek;
use crate::models::event::ScheduleEvent;
use crate::models::school_time::SchoolTime;
use crate::models::viewport::GridViewport;
use crate::services::layout::{
    BlockedBand, DropPreview, EventBlock, GridLayout, GridMetrics, LayoutRect, LineKind, TimeGeometry,
};
use crate::services::schedule::{DragKind, DropRequest};
use crate::ui_egui::drag::DragSession;

/// Horizontal gap between a block and its column edges.
const BLOCK_INSET: f32 = 3.0;
const DELETE_BUTTON_SIZE: f32 = 16.0;
/// Room left for the vertical scrollbar when fitting the columns.
const SCROLLBAR_ALLOWANCE: f32 = 14.0;
const HATCH_SPACING: f32 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub enum GridAction {
    Drop(DropRequest),
    Delete(i64),
    Open(i64),
}

pub struct GridInput<'a> {
    pub events: &'a [ScheduleEvent],
    pub school_times: &'a [SchoolTime],
    pub viewport: GridViewport,
}

#[derive(Clone, Copy)]
struct GridPalette {
    background: Color32,
    weekend_bg: Color32,
    header_bg: Color32,
    header_text: Color32,
    time_text: Color32,
    half_text: Color32,
    hour_line: Color32,
    half_line: Color32,
    slot_line: Color32,
    divider: Color32,
    band_fill: Color32,
    band_hatch: Color32,
    band_text: Color32,
    preview_fill: Color32,
    preview_stroke: Color32,
    blocked_fill: Color32,
    blocked_stroke: Color32,
    block_text: Color32,
    block_subtext: Color32,
}

impl GridPalette {
    fn from_visuals(visuals: &egui::Visuals) -> Self {
        let dark = visuals.dark_mode;
        let text = visuals.text_color();
        let weak = visuals.weak_text_color();
        Self {
            background: visuals.extreme_bg_color,
            weekend_bg: if dark {
                Color32::from_rgb(34, 36, 44)
            } else {
                Color32::from_rgb(248, 250, 252)
            },
            header_bg: visuals.faint_bg_color,
            header_text: text,
            time_text: text,
            half_text: weak,
            hour_line: if dark {
                Color32::from_gray(80)
            } else {
                Color32::from_rgb(203, 213, 225)
            },
            half_line: if dark {
                Color32::from_gray(60)
            } else {
                Color32::from_rgb(226, 232, 240)
            },
            slot_line: if dark {
                Color32::from_gray(45)
            } else {
                Color32::from_rgb(241, 245, 249)
            },
            divider: if dark {
                Color32::from_gray(70)
            } else {
                Color32::from_rgb(226, 232, 240)
            },
            band_fill: if dark {
                Color32::from_rgb(45, 45, 52)
            } else {
                Color32::from_rgb(241, 245, 249)
            },
            band_hatch: if dark {
                Color32::from_gray(70)
            } else {
                Color32::from_rgb(203, 213, 225)
            },
            band_text: weak,
            preview_fill: Color32::from_rgba_unmultiplied(99, 102, 241, 50),
            preview_stroke: Color32::from_rgb(99, 102, 241),
            blocked_fill: Color32::from_rgba_unmultiplied(239, 68, 68, 60),
            blocked_stroke: Color32::from_rgb(220, 38, 38),
            block_text: Color32::from_rgb(30, 41, 59),
            block_subtext: Color32::from_rgb(71, 85, 105),
        }
    }
}

fn to_color([r, g, b]: [u8; 3]) -> Color32 {
    Color32::from_rgb(r, g, b)
}

fn darker(color: Color32, factor: f32) -> Color32 {
    let scale = |c: u8| (c as f32 * factor).round() as u8;
    Color32::from_rgb(scale(color.r()), scale(color.g()), scale(color.b()))
}

fn to_screen(origin: Pos2, rect: &LayoutRect) -> Rect {
    Rect::from_min_size(
        origin + Vec2::new(rect.x, rect.y),
        Vec2::new(rect.width, rect.height),
    )
}

/// Paint the grid and handle pointer input. Passing `None` for `drag`
/// renders a read-only grid (no moves, drops or delete buttons).
pub fn show_schedule_grid(
    ui: &mut Ui,
    input: GridInput<'_>,
    mut drag: Option<&mut DragSession>,
) -> Vec<GridAction> {
    let geometry = TimeGeometry::default();
    let metrics = GridMetrics::default().fitted_to(ui.available_width() - SCROLLBAR_ALLOWANCE);
    let preview = drag
        .as_deref()
        .and_then(|session| session.preview(input.school_times));
    let layout = GridLayout::build(
        input.events,
        input.school_times,
        input.viewport,
        preview,
        metrics,
        geometry,
    );
    let palette = GridPalette::from_visuals(ui.visuals());
    let mut actions = Vec::new();

    egui::ScrollArea::both()
        .id_source("schedule_grid")
        .auto_shrink([false, false])
        .drag_to_scroll(false)
        .show(ui, |ui| {
            let (rect, _) =
                ui.allocate_exact_size(Vec2::new(layout.width, layout.height), Sense::hover());
            let origin = rect.min;
            let painter = ui.painter_at(rect);

            paint_chrome(&painter, &layout, origin, &palette);
            for band in &layout.blocked {
                paint_band(&painter, band, origin, &palette);
            }
            if let Some(preview) = &layout.preview {
                paint_preview(&painter, preview, origin, &palette);
            }

            let moving = drag
                .as_deref()
                .and_then(DragSession::active)
                .filter(|active| active.kind == DragKind::Move)
                .map(|active| active.source_id);

            for block in &layout.blocks {
                let faded = block.event_id.is_some() && block.event_id == moving;
                paint_block(&painter, block, origin, &palette, faded);
                interact_block(
                    ui,
                    &layout,
                    block,
                    origin,
                    input.events,
                    drag.as_deref_mut(),
                    &mut actions,
                );
            }

            if let Some(session) = drag.as_deref_mut() {
                track_pointer(ui, &layout, rect, session, &mut actions);
            }
        });

    actions
}

fn paint_chrome(painter: &Painter, layout: &GridLayout, origin: Pos2, palette: &GridPalette) {
    let full = Rect::from_min_size(origin, Vec2::new(layout.width, layout.height));
    painter.rect_filled(full, 0.0, palette.background);

    let body_top = origin.y + layout.body_top();
    let left = origin.x + layout.metrics.time_column_width;
    let right = origin.x + layout.width;
    let bottom = origin.y + layout.height;

    for header in &layout.day_headers {
        if header.day.is_weekend() {
            let column = to_screen(origin, &layout.column_rect(header.day));
            painter.rect_filled(column, 0.0, palette.weekend_bg);
        }
    }

    let header_rect = Rect::from_min_max(origin, Pos2::new(right, body_top));
    painter.rect_filled(header_rect, 0.0, palette.header_bg);

    let header_font = FontId::proportional(14.0);
    for header in &layout.day_headers {
        let rect = to_screen(origin, &header.rect);
        let name = if rect.width() >= 110.0 {
            header.day.full_name()
        } else {
            header.day.short_name()
        };
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            name,
            header_font.clone(),
            palette.header_text,
        );
    }

    for line in &layout.lines {
        let y = origin.y + line.y;
        let (from, stroke) = match line.kind {
            LineKind::Hour => (origin.x, Stroke::new(1.0, palette.hour_line)),
            LineKind::HalfHour => (left, Stroke::new(1.0, palette.half_line)),
            LineKind::Slot => (left, Stroke::new(0.5, palette.slot_line)),
        };
        painter.line_segment([Pos2::new(from, y), Pos2::new(right, y)], stroke);
    }

    let half_offset = layout.geometry.pixels_per_hour / 2.0;
    for label in &layout.hour_labels {
        let y = origin.y + label.y;
        painter.text(
            Pos2::new(origin.x + layout.metrics.time_column_width - 8.0, y + 4.0),
            Align2::RIGHT_TOP,
            &label.text,
            FontId::proportional(13.0),
            palette.time_text,
        );
        painter.text(
            Pos2::new(origin.x + layout.metrics.time_column_width - 8.0, y + half_offset),
            Align2::RIGHT_CENTER,
            &label.half_text,
            FontId::proportional(10.0),
            palette.half_text,
        );
    }

    for header in &layout.day_headers {
        let x = origin.x + header.rect.x;
        painter.line_segment(
            [Pos2::new(x, origin.y), Pos2::new(x, bottom)],
            Stroke::new(1.0, palette.divider),
        );
    }
    painter.line_segment(
        [Pos2::new(right - 0.5, origin.y), Pos2::new(right - 0.5, bottom)],
        Stroke::new(1.0, palette.divider),
    );
}

fn paint_band(painter: &Painter, band: &BlockedBand, origin: Pos2, palette: &GridPalette) {
    let rect = to_screen(origin, &band.rect);
    painter.rect_filled(rect, 0.0, palette.band_fill);

    let hatch = painter.with_clip_rect(rect.intersect(painter.clip_rect()));
    let stroke = Stroke::new(1.0, palette.band_hatch);
    let mut offset = -rect.height();
    while offset < rect.width() {
        let start = Pos2::new(rect.left() + offset, rect.bottom());
        let end = Pos2::new(rect.left() + offset + rect.height(), rect.top());
        hatch.line_segment([start, end], stroke);
        offset += HATCH_SPACING;
    }

    hatch.text(
        rect.center_top() + Vec2::new(0.0, 8.0),
        Align2::CENTER_TOP,
        &band.label,
        FontId::proportional(11.0),
        palette.band_text,
    );
}

fn paint_preview(painter: &Painter, preview: &DropPreview, origin: Pos2, palette: &GridPalette) {
    let rect = to_screen(origin, &preview.rect).shrink2(Vec2::new(BLOCK_INSET, 0.0));
    let (fill, stroke) = if preview.blocked {
        (palette.blocked_fill, palette.blocked_stroke)
    } else {
        (palette.preview_fill, palette.preview_stroke)
    };
    painter.rect_filled(rect, 4.0, fill);
    painter.rect_stroke(rect, 4.0, Stroke::new(1.5, stroke));
    painter.text(
        rect.left_top() + Vec2::new(6.0, 4.0),
        Align2::LEFT_TOP,
        &preview.label,
        FontId::proportional(11.0),
        stroke,
    );
}

fn paint_block(
    painter: &Painter,
    block: &EventBlock,
    origin: Pos2,
    palette: &GridPalette,
    faded: bool,
) {
    let rect = to_screen(origin, &block.rect).shrink2(Vec2::new(BLOCK_INSET, 1.0));
    let base = to_color(block.color);
    let accent = darker(base, 0.7);
    let alpha = if faded { 0.35 } else { 1.0 };

    painter.rect_filled(rect, 4.0, base.gamma_multiply(alpha));
    let bar = Rect::from_min_size(rect.min, Vec2::new(4.0, rect.height()));
    painter.rect_filled(bar, 2.0, accent.gamma_multiply(alpha));

    let text = painter.with_clip_rect(rect.intersect(painter.clip_rect()));
    let mut cursor = rect.left_top() + Vec2::new(9.0, 4.0);
    let title = text.text(
        cursor,
        Align2::LEFT_TOP,
        &block.title,
        FontId::proportional(13.0),
        palette.block_text.gamma_multiply(alpha),
    );
    cursor.y = title.bottom() + 2.0;

    let time = text.text(
        cursor,
        Align2::LEFT_TOP,
        &block.time_label,
        FontId::proportional(11.0),
        palette.block_subtext.gamma_multiply(alpha),
    );
    cursor.y = time.bottom() + 2.0;

    if cursor.y + 12.0 < rect.bottom() {
        text.text(
            cursor,
            Align2::LEFT_TOP,
            &block.category,
            FontId::proportional(10.0),
            accent.gamma_multiply(alpha),
        );
    }

    if block.clipped {
        let edge = Stroke::new(1.0, accent.gamma_multiply(alpha));
        painter.line_segment([rect.left_top(), rect.right_top()], edge);
    }
}

fn interact_block(
    ui: &mut Ui,
    layout: &GridLayout,
    block: &EventBlock,
    origin: Pos2,
    events: &[ScheduleEvent],
    mut drag: Option<&mut DragSession>,
    actions: &mut Vec<GridAction>,
) {
    let Some(event_id) = block.event_id else {
        return;
    };
    let rect = to_screen(origin, &block.rect).shrink2(Vec2::new(BLOCK_INSET, 1.0));
    let visible = rect.intersect(ui.clip_rect());
    if !visible.is_positive() {
        return;
    }

    let editable = drag.is_some();
    let dragging = drag.as_deref().is_some_and(DragSession::is_active);
    let sense = if editable {
        Sense::click_and_drag()
    } else {
        Sense::click()
    };
    let response = ui.interact(visible, Id::new("grid_block").with(event_id), sense);

    if response.hovered() && !dragging {
        let icon = if editable {
            CursorIcon::Grab
        } else {
            CursorIcon::PointingHand
        };
        ui.ctx().set_cursor_icon(icon);
    }

    if response.drag_started() {
        let pointer = ui
            .input(|i| i.pointer.press_origin())
            .or_else(|| response.interact_pointer_pos());
        let event = events.iter().find(|e| e.id == Some(event_id));
        if let (Some(session), Some(event), Some(pointer)) = (drag.as_deref_mut(), event, pointer) {
            // Offset from the unclipped top so partially hidden blocks keep their grab point.
            let top = origin.y
                + layout.body_top()
                + layout
                    .geometry
                    .position_of(event.start_time, layout.viewport.start_hour);
            session.begin_move(event, pointer.y - top);
        }
    } else if response.clicked() {
        actions.push(GridAction::Open(event_id));
    }

    if editable && !dragging {
        let button = Rect::from_min_size(
            Pos2::new(rect.right() - DELETE_BUTTON_SIZE - 2.0, rect.top() + 2.0),
            Vec2::splat(DELETE_BUTTON_SIZE),
        );
        if ui.clip_rect().contains_rect(button) {
            let delete = ui
                .interact(button, Id::new("grid_block_delete").with(event_id), Sense::click())
                .on_hover_text("Remove from timetable");
            if delete.hovered() {
                ui.painter()
                    .rect_filled(button, 3.0, Color32::from_rgba_unmultiplied(220, 38, 38, 40));
            }
            ui.painter().text(
                button.center(),
                Align2::CENTER_CENTER,
                "✕",
                FontId::proportional(11.0),
                Color32::from_rgb(100, 116, 139),
            );
            if delete.clicked() {
                actions.push(GridAction::Delete(event_id));
            }
        }
    }

    if !dragging && !block.description.trim().is_empty() {
        response.on_hover_ui_at_pointer(|ui| {
            ui.set_max_width(260.0);
            ui.label(RichText::new(&block.title).strong());
            ui.label(RichText::new(&block.time_label).weak());
            ui.separator();
            ui.label(&block.description);
        });
    }
}

/// What the pointer does to an in-flight drag this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PointerIntent {
    /// Released over a day column; `body_y` is relative to the body top.
    Drop { day: DayOfWeek, body_y: f32 },
    Hover { day: DayOfWeek, body_y: f32 },
    /// Released where nothing accepts a drop.
    Cancel,
    /// Over the grid chrome or outside it, button still held.
    Clear,
}

/// Classifies the pointer against the grid painted at `grid` and visible
/// within `clip`. The header row yields a negative `body_y`.
fn pointer_intent(
    pointer: Option<Pos2>,
    released: bool,
    grid: Rect,
    clip: Rect,
    layout: &GridLayout,
) -> PointerIntent {
    let target = pointer
        .filter(|pos| grid.contains(*pos) && clip.contains(*pos))
        .and_then(|pos| {
            let local = pos - grid.min;
            layout
                .day_at(local.x)
                .map(|day| (day, local.y - layout.body_top()))
        });

    match (target, released) {
        (Some((day, body_y)), true) => PointerIntent::Drop { day, body_y },
        (Some((day, body_y)), false) => PointerIntent::Hover { day, body_y },
        (None, true) => PointerIntent::Cancel,
        (None, false) => PointerIntent::Clear,
    }
}

fn apply_pointer_intent(
    intent: PointerIntent,
    layout: &GridLayout,
    session: &mut DragSession,
    actions: &mut Vec<GridAction>,
) {
    match intent {
        PointerIntent::Drop { day, body_y } => {
            if let Some(request) = session.take_drop(day, body_y, &layout.geometry, layout.viewport) {
                actions.push(GridAction::Drop(request));
            }
        }
        PointerIntent::Hover { day, body_y } => {
            session.hover(day, body_y, &layout.geometry, layout.viewport);
        }
        PointerIntent::Cancel => session.cancel(),
        PointerIntent::Clear => session.clear_hover(),
    }
}

/// Hover and release tracking for an in-flight drag.
fn track_pointer(
    ui: &Ui,
    layout: &GridLayout,
    rect: Rect,
    session: &mut DragSession,
    actions: &mut Vec<GridAction>,
) {
    if !session.is_active() {
        return;
    }
    ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
    ui.ctx().request_repaint();

    let (pointer, released) = ui.input(|i| (i.pointer.latest_pos(), i.pointer.any_released()));
    let intent = pointer_intent(pointer, released, rect, ui.clip_rect(), layout);
    apply_pointer_intent(intent, layout, session, actions);
}
