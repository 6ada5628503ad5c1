//! Navigation panel with the page list and the child selector.

use super::state::Page;
use super::TimetableApp;
use egui::{Color32, RichText};

use crate::models::category;

const SIDEBAR_MIN_WIDTH: f32 = 160.0;
const SIDEBAR_DEFAULT_WIDTH: f32 = 190.0;
const SIDEBAR_MAX_WIDTH: f32 = 280.0;

impl TimetableApp {
    pub(super) fn render_sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("sidebar")
            .default_width(SIDEBAR_DEFAULT_WIDTH)
            .min_width(SIDEBAR_MIN_WIDTH)
            .max_width(SIDEBAR_MAX_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.label(RichText::new("Kids Timetable").heading().strong());
                ui.add_space(12.0);

                for page in Page::ALL {
                    let selected = self.state.page == page;
                    let label = RichText::new(page.label()).size(15.0);
                    if ui.selectable_label(selected, label).clicked() && !selected {
                        self.navigate_to(page);
                    }
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);
                self.render_child_selector(ui);
            });
    }

    fn render_child_selector(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("Children").small().strong().weak());
        ui.add_space(4.0);

        let Some(record) = self.data.profile.as_ref() else {
            ui.spinner();
            return;
        };

        let current = record
            .profile
            .resolve_child(self.state.selected_child.as_deref())
            .map(|c| c.id.clone());
        let mut chosen = None;

        for child in &record.profile.children {
            let is_current = current.as_deref() == Some(child.id.as_str());
            let color = category::parse_hex(&child.color)
                .map(|[r, g, b]| Color32::from_rgb(r, g, b))
                .unwrap_or(Color32::LIGHT_BLUE);
            ui.horizontal(|ui| {
                let (dot, _) = ui.allocate_exact_size(egui::Vec2::splat(10.0), egui::Sense::hover());
                ui.painter().circle_filled(dot.center(), 5.0, color);
                if ui.selectable_label(is_current, &child.name).clicked() && !is_current {
                    chosen = Some(child.id.clone());
                }
            });
        }

        if let Some(child_id) = chosen {
            self.select_child(child_id);
        }
    }

    pub(super) fn navigate_to(&mut self, page: Page) {
        if self.drag.is_active() {
            self.drag.cancel();
        }
        log::debug!("Navigating to {:?}", page);
        self.state.page = page;
    }
}
