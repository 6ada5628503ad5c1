// Template Manager
// Page for registering a child's activity templates and editing categories

use egui::{Color32, RichText};

use crate::models::category;
use crate::models::child::Child;
use crate::models::template::{EventTemplate, MAX_DURATION_MINUTES};
use crate::models::validation::ValidationError;

const FORM_LABEL_WIDTH: f32 = 90.0;
const DEFAULT_DURATION: u32 = 60;

/// Form contents for a new template
pub struct TemplateEditState {
    pub title: String,
    pub duration_minutes: u32,
    pub category: String,
    pub description: String,
}

impl TemplateEditState {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            duration_minutes: DEFAULT_DURATION,
            category: category.into(),
            description: String::new(),
        }
    }

    pub fn to_template(&self, child_id: &str) -> Result<EventTemplate, ValidationError> {
        EventTemplate::builder()
            .child_id(child_id)
            .title(self.title.trim())
            .duration_minutes(self.duration_minutes)
            .category(self.category.clone())
            .description(self.description.trim())
            .build()
    }

    /// Clear the form after a save, keeping the chosen category.
    pub fn reset(&mut self) {
        *self = Self::new(std::mem::take(&mut self.category));
    }
}

impl Default for TemplateEditState {
    fn default() -> Self {
        Self::new("")
    }
}

#[derive(Default)]
pub struct TemplateManagerState {
    pub edit: TemplateEditState,
    pub new_category: String,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TemplateManagerAction {
    Create(EventTemplate),
    Delete(i64),
    AddCategory(String),
    RemoveCategory(String),
}

pub fn render_template_manager(
    ui: &mut egui::Ui,
    state: &mut TemplateManagerState,
    child: Option<&Child>,
    templates: &[EventTemplate],
    categories: &[String],
) -> Vec<TemplateManagerAction> {
    let mut actions = Vec::new();

    if !categories.contains(&state.edit.category) {
        if let Some(first) = categories.first() {
            state.edit.category = first.clone();
        }
    }

    ui.heading("Activity templates");
    ui.label(
        RichText::new("Register recurring classes and activities, then drag them onto the timetable.")
            .weak(),
    );
    ui.add_space(12.0);

    ui.columns(2, |columns| {
        render_form(&mut columns[0], state, child, categories, &mut actions);
        columns[0].add_space(16.0);
        render_categories(&mut columns[0], state, categories, &mut actions);
        render_template_list(&mut columns[1], child, templates, &mut actions);
    });

    actions
}

fn render_form(
    ui: &mut egui::Ui,
    state: &mut TemplateManagerState,
    child: Option<&Child>,
    categories: &[String],
    actions: &mut Vec<TemplateManagerAction>,
) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.label(RichText::new("New activity").strong());
        ui.add_space(6.0);

        labeled_row(ui, "Title:", |ui| {
            ui.add(
                egui::TextEdit::singleline(&mut state.edit.title)
                    .hint_text("e.g. Taekwondo, English, Piano")
                    .desired_width(f32::INFINITY),
            );
        });

        labeled_row(ui, "Duration:", |ui| {
            ui.add(
                egui::DragValue::new(&mut state.edit.duration_minutes)
                    .range(1..=MAX_DURATION_MINUTES)
                    .speed(5.0)
                    .suffix(" min"),
            );
        });

        labeled_row(ui, "Category:", |ui| {
            egui::ComboBox::from_id_source("template_category")
                .selected_text(&state.edit.category)
                .show_ui(ui, |ui| {
                    for name in categories {
                        ui.selectable_value(&mut state.edit.category, name.clone(), name);
                    }
                });
        });

        labeled_row(ui, "Notes:", |ui| {
            ui.add(
                egui::TextEdit::multiline(&mut state.edit.description)
                    .hint_text("Shown when hovering the activity")
                    .desired_rows(3)
                    .desired_width(f32::INFINITY),
            );
        });

        if let Some(error) = &state.error_message {
            ui.colored_label(Color32::from_rgb(220, 38, 38), error);
        }

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            let can_save = child.is_some();
            if ui
                .add_enabled(can_save, egui::Button::new("💾 Save activity"))
                .clicked()
            {
                let Some(child) = child else {
                    return;
                };
                match state.edit.to_template(&child.id) {
                    Ok(template) => {
                        actions.push(TemplateManagerAction::Create(template));
                        state.edit.reset();
                        state.error_message = None;
                    }
                    Err(e) => state.error_message = Some(e.to_string()),
                }
            }
            if let Some(child) = child {
                ui.label(RichText::new(format!("for {}", child.name)).weak());
            }
        });
    });
}

fn render_categories(
    ui: &mut egui::Ui,
    state: &mut TemplateManagerState,
    categories: &[String],
    actions: &mut Vec<TemplateManagerAction>,
) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.label(RichText::new("🏷 Categories").strong());
        ui.add_space(6.0);

        ui.horizontal_wrapped(|ui| {
            for name in categories {
                let [r, g, b] = category::rgb_for(name);
                egui::Frame::none()
                    .fill(Color32::from_rgb(r, g, b))
                    .rounding(10.0)
                    .inner_margin(egui::Margin::symmetric(8.0, 3.0))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(name).color(Color32::from_rgb(30, 41, 59)));
                            if ui
                                .small_button("✕")
                                .on_hover_text("Remove category")
                                .clicked()
                            {
                                actions.push(TemplateManagerAction::RemoveCategory(name.clone()));
                            }
                        });
                    });
            }
        });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut state.new_category)
                    .hint_text("New category")
                    .desired_width(160.0),
            );
            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if (ui.button("➕ Add").clicked() || submitted) && !state.new_category.trim().is_empty() {
                actions.push(TemplateManagerAction::AddCategory(
                    state.new_category.trim().to_string(),
                ));
                state.new_category.clear();
            }
        });
    });
}

fn render_template_list(
    ui: &mut egui::Ui,
    child: Option<&Child>,
    templates: &[EventTemplate],
    actions: &mut Vec<TemplateManagerAction>,
) {
    let title = match child {
        Some(child) => format!("📋 {}'s activities ({})", child.name, templates.len()),
        None => "📋 Activities".to_string(),
    };
    ui.label(RichText::new(title).strong());
    ui.add_space(6.0);

    if templates.is_empty() {
        ui.label(RichText::new("No activities registered yet").italics().weak());
        return;
    }

    egui::ScrollArea::vertical()
        .id_source("template_manager_list")
        .auto_shrink([false, true])
        .show(ui, |ui| {
            for template in templates {
                let [r, g, b] = category::rgb_for(&template.category);
                egui::Frame::group(ui.style())
                    .fill(Color32::from_rgb(r, g, b).gamma_multiply(0.6))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            ui.vertical(|ui| {
                                ui.label(RichText::new(&template.title).strong());
                                ui.label(
                                    RichText::new(format!(
                                        "{} · {} min",
                                        template.category, template.duration_minutes
                                    ))
                                    .small(),
                                );
                                if template.has_description() {
                                    ui.label(RichText::new(&template.description).small().weak());
                                }
                            });
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                if let Some(id) = template.id {
                                    if ui.button("🗑").on_hover_text("Delete activity").clicked() {
                                        actions.push(TemplateManagerAction::Delete(id));
                                    }
                                }
                            });
                        });
                    });
                ui.add_space(4.0);
            }
        });
}

fn labeled_row<F>(ui: &mut egui::Ui, label: &str, add_contents: F)
where
    F: FnOnce(&mut egui::Ui),
{
    ui.horizontal(|ui| {
        ui.allocate_ui_with_layout(
            egui::Vec2::new(FORM_LABEL_WIDTH, 24.0),
            egui::Layout::right_to_left(egui::Align::Center),
            |ui| {
                ui.label(label);
            },
        );
        add_contents(ui);
    });
}
