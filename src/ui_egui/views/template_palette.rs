//! Side list of the selected child's templates, grouped by category.
//! Dragging a card out of the list starts a new-event drag.

use egui::{Align2, Color32, FontId, Id, LayerId, Order, Rect, RichText, Sense, Stroke, Ui, Vec2};

use crate::models::category;
use crate::models::template::EventTemplate;
use crate::services::template::grouped_by_category;
use crate::ui_egui::drag::DragSession;

const CARD_HEIGHT: f32 = 44.0;

pub fn show_template_palette(
    ui: &mut Ui,
    child_name: &str,
    templates: &[EventTemplate],
    search: &mut String,
    drag: &mut DragSession,
) {
    ui.heading(format!("{}'s activities", child_name));
    ui.add_space(4.0);
    ui.add(
        egui::TextEdit::singleline(search)
            .hint_text("🔍 Search activities")
            .desired_width(f32::INFINITY),
    );
    ui.add_space(8.0);

    if templates.is_empty() {
        ui.label(
            RichText::new("No activities yet. Add some on the Templates page.")
                .italics()
                .weak(),
        );
        return;
    }

    let groups = grouped_by_category(templates, search);
    egui::ScrollArea::vertical()
        .id_source("template_palette")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if groups.is_empty() {
                ui.label(RichText::new("No matching activities").weak());
            }
            for group in &groups {
                ui.label(RichText::new(format!("› {}", group.category.to_uppercase())).small().strong().weak());
                for template in &group.templates {
                    template_card(ui, template, drag);
                }
                ui.add_space(10.0);
            }
        });
}

fn template_card(ui: &mut Ui, template: &EventTemplate, drag: &mut DragSession) {
    let width = ui.available_width();
    let id = Id::new("palette_template").with(template.id);
    let (rect, _) = ui.allocate_exact_size(Vec2::new(width, CARD_HEIGHT), Sense::hover());
    let response = ui.interact(rect, id, Sense::drag());

    let visuals = ui.visuals();
    let accent = category::parse_hex(category::color_for(&template.category))
        .map(|[r, g, b]| Color32::from_rgb(r, g, b))
        .unwrap_or(Color32::LIGHT_BLUE);
    let border = if response.hovered() {
        visuals.selection.stroke.color
    } else {
        visuals.widgets.noninteractive.bg_stroke.color
    };

    let painter = ui.painter();
    painter.rect_filled(rect, 6.0, visuals.extreme_bg_color);
    painter.rect_stroke(rect, 6.0, Stroke::new(1.0, border));
    painter.rect_filled(
        Rect::from_min_size(rect.min, Vec2::new(5.0, rect.height())),
        3.0,
        accent,
    );
    painter.text(
        rect.left_top() + Vec2::new(14.0, 6.0),
        Align2::LEFT_TOP,
        format!("⠿ {}", template.title),
        FontId::proportional(13.0),
        visuals.strong_text_color(),
    );
    painter.text(
        rect.left_top() + Vec2::new(14.0, 25.0),
        Align2::LEFT_TOP,
        format!("🕐 {} min", template.duration_minutes),
        FontId::proportional(11.0),
        visuals.weak_text_color(),
    );

    if response.hovered() && !drag.is_active() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
    }
    if response.drag_started() && !drag.begin_new(template) {
        log::warn!("Template '{}' has no id yet; drag ignored", template.title);
    }
    if template.has_description() && !drag.is_active() {
        response.on_hover_text(&template.description);
    }
    ui.add_space(4.0);
}

/// Floating label that follows the pointer while a drag is in flight.
pub fn paint_drag_ghost(ctx: &egui::Context, drag: &DragSession) {
    let Some(active) = drag.active() else {
        return;
    };
    let Some(pointer) = ctx.input(|i| i.pointer.latest_pos()) else {
        return;
    };

    let painter = ctx.layer_painter(LayerId::new(Order::Tooltip, Id::new("drag_ghost")));
    let text = format!("{} · {} min", active.title, active.duration_minutes);
    let galley = painter.layout_no_wrap(text, FontId::proportional(12.0), Color32::WHITE);
    let rect = Rect::from_min_size(
        pointer + Vec2::new(14.0, 10.0),
        galley.size() + Vec2::new(12.0, 8.0),
    );
    painter.rect_filled(rect, 4.0, Color32::from_rgba_unmultiplied(79, 70, 229, 220));
    painter.galley(rect.min + Vec2::new(6.0, 4.0), galley, Color32::WHITE);
}
