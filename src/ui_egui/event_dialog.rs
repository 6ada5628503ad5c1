use egui::{Color32, RichText};

use crate::models::category;
use crate::models::event::ScheduleEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDetailAction {
    Close,
    Delete(i64),
}

/// Read-only details of a scheduled activity, opened by clicking its block.
pub fn render_event_detail(
    ctx: &egui::Context,
    event: &ScheduleEvent,
    allow_delete: bool,
) -> Option<EventDetailAction> {
    let mut action = None;
    let mut open = true;

    egui::Window::new("Activity details")
        .id(egui::Id::new("event_detail"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(300.0)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            let [r, g, b] = category::rgb_for(&event.category);
            ui.horizontal(|ui| {
                let (swatch, _) =
                    ui.allocate_exact_size(egui::Vec2::splat(14.0), egui::Sense::hover());
                ui.painter()
                    .rect_filled(swatch, 3.0, Color32::from_rgb(r, g, b));
                ui.label(RichText::new(&event.title).heading().strong());
            });
            ui.add_space(6.0);

            egui::Grid::new("event_detail_grid")
                .num_columns(2)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Day").weak());
                    ui.label(event.day.full_name());
                    ui.end_row();

                    ui.label(RichText::new("Time").weak());
                    ui.label(format!(
                        "{} - {} ({} min)",
                        event.start_time,
                        event.end_time,
                        event.duration_minutes()
                    ));
                    ui.end_row();

                    ui.label(RichText::new("Category").weak());
                    ui.label(&event.category);
                    ui.end_row();
                });

            if event.has_description() {
                ui.separator();
                ui.label(&event.description);
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if let (true, Some(id)) = (allow_delete, event.id) {
                    if ui
                        .button(RichText::new("🗑 Remove").color(Color32::from_rgb(220, 38, 38)))
                        .clicked()
                    {
                        action = Some(EventDetailAction::Delete(id));
                    }
                }
                if ui.button("Close").clicked() {
                    action = Some(EventDetailAction::Close);
                }
            });
        });

    if !open {
        action = Some(EventDetailAction::Close);
    }
    action
}
