//! Settings page: the household's children and each child's school hours.

use egui::{Color32, RichText};

use crate::models::child::{Child, UserProfile};
use crate::models::clock::ClockTime;
use crate::models::day::DayOfWeek;
use crate::models::school_time::{self, SchoolTime};
use crate::models::validation::ValidationError;

const DEFAULT_SCHOOL_START: &str = "09:00";
const DEFAULT_SCHOOL_END: &str = "13:00";

/// Editable copy of one weekday's school hours.
#[derive(Debug, Clone, PartialEq)]
pub struct SchoolTimeRow {
    pub day: DayOfWeek,
    pub enabled: bool,
    pub start: String,
    pub end: String,
    /// The day already has a stored entry (kept even when disabled).
    pub stored: bool,
}

impl SchoolTimeRow {
    fn for_day(day: DayOfWeek, stored: Option<&SchoolTime>) -> Self {
        match stored {
            Some(time) => Self {
                day,
                enabled: time.is_enabled,
                start: time.start_time.to_string(),
                end: time.end_time.to_string(),
                stored: true,
            },
            None => Self {
                day,
                enabled: false,
                start: DEFAULT_SCHOOL_START.to_string(),
                end: DEFAULT_SCHOOL_END.to_string(),
                stored: false,
            },
        }
    }

    fn to_school_time(&self) -> Result<SchoolTime, ValidationError> {
        let parse = |text: &str| {
            text.parse::<ClockTime>()
                .map_err(|e| ValidationError::InvalidTime(format!("{}: {}", self.day.full_name(), e)))
        };
        let time = SchoolTime {
            day: self.day,
            start_time: parse(&self.start)?,
            end_time: parse(&self.end)?,
            is_enabled: self.enabled,
        };
        time.validate()?;
        Ok(time)
    }
}

#[derive(Default)]
pub struct SettingsPageState {
    loaded_for: Option<String>,
    pub rows: Vec<SchoolTimeRow>,
    pub new_child_name: String,
    pub error_message: Option<String>,
}

impl SettingsPageState {
    /// Reload the editor when a different child is shown.
    pub fn sync(&mut self, child: &Child) {
        if self.loaded_for.as_deref() != Some(child.id.as_str()) {
            self.load(child);
        }
    }

    pub fn load(&mut self, child: &Child) {
        self.rows = DayOfWeek::ALL
            .iter()
            .map(|day| {
                let stored = child.school_times.iter().find(|t| t.day == *day);
                SchoolTimeRow::for_day(*day, stored)
            })
            .collect();
        self.loaded_for = Some(child.id.clone());
        self.error_message = None;
    }

    /// School times to store: enabled days plus days that already had an entry.
    pub fn collect(&self) -> Result<Vec<SchoolTime>, ValidationError> {
        let times: Vec<SchoolTime> = self
            .rows
            .iter()
            .filter(|row| row.enabled || row.stored)
            .map(SchoolTimeRow::to_school_time)
            .collect::<Result<_, _>>()?;
        school_time::validate_set(&times)?;
        Ok(times)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SettingsAction {
    SelectChild(String),
    AddChild(String),
    RemoveChild(String),
    SaveSchoolTimes {
        child_id: String,
        times: Vec<SchoolTime>,
    },
}

pub fn render_settings_page(
    ui: &mut egui::Ui,
    state: &mut SettingsPageState,
    profile: &UserProfile,
    selected: Option<&Child>,
) -> Vec<SettingsAction> {
    let mut actions = Vec::new();

    ui.heading("Settings");
    ui.add_space(12.0);

    ui.columns(2, |columns| {
        render_children(&mut columns[0], state, profile, selected, &mut actions);
        if let Some(child) = selected {
            state.sync(child);
            render_school_times(&mut columns[1], state, child, &mut actions);
        }
    });

    actions
}

fn render_children(
    ui: &mut egui::Ui,
    state: &mut SettingsPageState,
    profile: &UserProfile,
    selected: Option<&Child>,
    actions: &mut Vec<SettingsAction>,
) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.label(RichText::new("👪 Children").strong());
        ui.add_space(6.0);

        let last_child = profile.children.len() <= 1;
        for child in &profile.children {
            ui.horizontal(|ui| {
                let is_selected = selected.is_some_and(|s| s.id == child.id);
                if ui.selectable_label(is_selected, &child.name).clicked() && !is_selected {
                    actions.push(SettingsAction::SelectChild(child.id.clone()));
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let remove = ui
                        .add_enabled(!last_child, egui::Button::new("🗑").small())
                        .on_hover_text("Remove child")
                        .on_disabled_hover_text("At least one child is required");
                    if remove.clicked() {
                        actions.push(SettingsAction::RemoveChild(child.id.clone()));
                    }
                });
            });
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut state.new_child_name)
                    .hint_text("Child's name")
                    .desired_width(160.0),
            );
            if ui.button("➕ Add child").clicked() {
                if state.new_child_name.trim().is_empty() {
                    state.error_message = Some(ValidationError::EmptyName.to_string());
                } else {
                    actions.push(SettingsAction::AddChild(
                        state.new_child_name.trim().to_string(),
                    ));
                    state.new_child_name.clear();
                }
            }
        });
    });
}

fn render_school_times(
    ui: &mut egui::Ui,
    state: &mut SettingsPageState,
    child: &Child,
    actions: &mut Vec<SettingsAction>,
) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.label(RichText::new(format!("🏫 School hours for {}", child.name)).strong());
        ui.label(RichText::new("Nothing can be scheduled during enabled school hours.").weak());
        ui.add_space(6.0);

        egui::Grid::new("school_times_grid")
            .num_columns(4)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                for row in &mut state.rows {
                    ui.checkbox(&mut row.enabled, row.day.full_name());
                    ui.add_enabled(
                        row.enabled,
                        egui::TextEdit::singleline(&mut row.start).desired_width(56.0),
                    );
                    ui.label("–");
                    ui.add_enabled(
                        row.enabled,
                        egui::TextEdit::singleline(&mut row.end).desired_width(56.0),
                    );
                    ui.end_row();
                }
            });

        if let Some(error) = &state.error_message {
            ui.colored_label(Color32::from_rgb(220, 38, 38), error);
        }

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui.button("💾 Save school hours").clicked() {
                match state.collect() {
                    Ok(times) => {
                        state.error_message = None;
                        actions.push(SettingsAction::SaveSchoolTimes {
                            child_id: child.id.clone(),
                            times,
                        });
                    }
                    Err(e) => state.error_message = Some(e.to_string()),
                }
            }
            if ui.button("↺ Revert").clicked() {
                state.load(child);
            }
        });
    });
}
