//! Central panel content for each page.

use super::state::Page;
use super::{selected_child, TimetableApp};
use crate::ui_egui::dialogs::template_manager::render_template_manager;
use crate::ui_egui::settings_dialog::render_settings_page;
use crate::ui_egui::views::schedule_grid::{show_schedule_grid, GridAction, GridInput};
use crate::ui_egui::views::template_palette::show_template_palette;
use egui::RichText;

const PALETTE_WIDTH: f32 = 240.0;

impl TimetableApp {
    pub(super) fn render_page(&mut self, ctx: &egui::Context) {
        if self.state.page == Page::Assign {
            self.render_palette_panel(ctx);
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.state.page {
            Page::Timetable => self.render_timetable_page(ui),
            Page::Assign => self.render_assign_page(ui),
            Page::Templates => self.render_templates_page(ui),
            Page::Settings => self.render_settings(ui),
        });
    }

    fn render_page_header(&mut self, ui: &mut egui::Ui, title: &str, with_exports: bool) {
        ui.horizontal(|ui| {
            ui.heading(title);
            if let Some(child) = self.current_child() {
                ui.label(RichText::new(format!("· {}", child.name)).heading().weak());
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if with_exports {
                    self.render_export_buttons(ui);
                    ui.separator();
                }
                let toggle = self.state.window.toggled();
                if ui
                    .button(toggle.label())
                    .on_hover_text("Change which hours the grid starts from")
                    .clicked()
                {
                    log::debug!("Viewport window switched to {:?}", toggle);
                    self.state.window = toggle;
                }
            });
        });
        ui.add_space(6.0);
    }

    fn render_timetable_page(&mut self, ui: &mut egui::Ui) {
        self.render_page_header(ui, "Weekly timetable", true);

        let Some(child) = selected_child(&self.data, &self.state) else {
            ui.label("Add a child in Settings to start planning.");
            return;
        };
        let input = GridInput {
            events: &self.data.events,
            school_times: &child.school_times,
            viewport: self.state.viewport(),
        };
        let actions: Vec<GridAction> = show_schedule_grid(ui, input, None);
        self.apply_grid_actions(actions);
    }

    fn render_assign_page(&mut self, ui: &mut egui::Ui) {
        self.render_page_header(ui, "Assign activities", false);
        ui.label(
            RichText::new("Drag an activity from the right onto the grid. Drag blocks to move them.")
                .weak(),
        );
        ui.add_space(4.0);

        let Some(child) = selected_child(&self.data, &self.state) else {
            ui.label("Add a child in Settings to start planning.");
            return;
        };
        let input = GridInput {
            events: &self.data.events,
            school_times: &child.school_times,
            viewport: self.state.viewport(),
        };
        let actions = show_schedule_grid(ui, input, Some(&mut self.drag));
        self.apply_grid_actions(actions);
    }

    fn render_palette_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("template_palette")
            .default_width(PALETTE_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                let Some(child) = selected_child(&self.data, &self.state) else {
                    ui.label("No child selected");
                    return;
                };
                show_template_palette(
                    ui,
                    &child.name,
                    &self.data.templates,
                    &mut self.state.template_search,
                    &mut self.drag,
                );
            });
    }

    fn render_templates_page(&mut self, ui: &mut egui::Ui) {
        let Some(record) = self.data.profile.as_ref() else {
            ui.spinner();
            return;
        };
        let child = record
            .profile
            .resolve_child(self.state.selected_child.as_deref());
        let actions = render_template_manager(
            ui,
            &mut self.state.template_manager,
            child,
            &self.data.templates,
            &record.profile.custom_categories,
        );
        self.apply_template_actions(actions);
    }

    fn render_settings(&mut self, ui: &mut egui::Ui) {
        let Some(record) = self.data.profile.as_ref() else {
            ui.spinner();
            return;
        };
        let selected = record
            .profile
            .resolve_child(self.state.selected_child.as_deref());
        let actions = render_settings_page(
            ui,
            &mut self.state.settings_page,
            &record.profile,
            selected,
        );
        self.apply_settings_actions(actions);
    }
}
