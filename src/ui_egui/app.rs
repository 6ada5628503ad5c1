mod context;
mod data;
mod export;
mod lifecycle;
mod pages;
mod sidebar;
mod state;
mod toast;

use self::context::AppContext;
use self::data::LiveData;
use self::state::AppState;
use self::toast::ToastManager;
use crate::models::child::Child;
use crate::services::export::ExportJob;
use crate::services::schedule::{DropOutcome, DropRequest, ScheduleError};
use crate::ui_egui::dialogs::template_manager::TemplateManagerAction;
use crate::ui_egui::drag::DragSession;
use crate::ui_egui::settings_dialog::SettingsAction;
use crate::ui_egui::views::schedule_grid::GridAction;

pub struct TimetableApp {
    /// Store and services
    context: AppContext,
    /// Page, selection and form state
    state: AppState,
    /// Subscription-backed copies of stored documents
    data: LiveData,
    /// The one drag in flight, if any
    drag: DragSession,
    export_job: ExportJob,
    toasts: ToastManager,
    is_dark: bool,
}

impl eframe::App for TimetableApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.handle_update(ctx, frame);
    }
}

/// Selected child resolved against the live profile.
fn selected_child<'a>(data: &'a LiveData, state: &AppState) -> Option<&'a Child> {
    data.profile
        .as_ref()
        .and_then(|record| record.profile.resolve_child(state.selected_child.as_deref()))
}

impl TimetableApp {
    fn current_child(&self) -> Option<&Child> {
        selected_child(&self.data, &self.state)
    }

    fn select_child(&mut self, child_id: String) {
        if self.drag.is_active() {
            self.drag.cancel();
        }
        self.state.selected_child = Some(child_id);
        self.state.open_event = None;
        self.follow_selected_child();
    }

    /// Keep the template and event subscriptions on the selected child.
    fn follow_selected_child(&mut self) {
        let child_id = self.current_child().map(|c| c.id.clone());
        if let Err(e) = self
            .data
            .follow_child(self.context.store(), child_id.as_deref())
        {
            log::error!("Failed to subscribe to child data: {}", e);
            self.toasts.error(format!("Could not load timetable: {}", e));
        }
    }

    fn apply_grid_actions(&mut self, actions: Vec<GridAction>) {
        for action in actions {
            match action {
                GridAction::Drop(request) => self.commit_drop(request),
                GridAction::Delete(id) => self.delete_event(id),
                GridAction::Open(id) => self.state.open_event = Some(id),
            }
        }
    }

    fn commit_drop(&mut self, request: DropRequest) {
        let child = selected_child(&self.data, &self.state);
        let child_id = child.map(|c| c.id.as_str());
        let school_times = child.map(|c| c.school_times.as_slice()).unwrap_or_default();

        let result = self.context.schedule_service().commit_drop(
            request,
            child_id,
            &self.data.templates,
            &self.data.events,
            school_times,
        );

        match result {
            Ok(DropOutcome::Created(event)) => self.toasts.success(format!(
                "Added {} on {} {} - {}",
                event.title, event.day, event.start_time, event.end_time
            )),
            Ok(DropOutcome::Moved(event)) => self.toasts.success(format!(
                "Moved {} to {} {} - {}",
                event.title, event.day, event.start_time, event.end_time
            )),
            Err(e @ ScheduleError::Blocked { .. }) => self.toasts.blocked(e.to_string()),
            Err(e @ ScheduleError::Validation(_)) => self.toasts.warning(e.to_string()),
            Err(e) => {
                log::error!("Failed to commit drop: {}", e);
                self.toasts.error(e.to_string());
            }
        }
    }

    fn delete_event(&mut self, id: i64) {
        match self.context.schedule_service().delete(id) {
            Ok(()) => {
                if self.state.open_event == Some(id) {
                    self.state.open_event = None;
                }
                self.toasts.info("Activity removed");
            }
            Err(e) => {
                log::error!("Failed to delete event {}: {}", id, e);
                self.toasts.error(e.to_string());
            }
        }
    }

    fn apply_template_actions(&mut self, actions: Vec<TemplateManagerAction>) {
        for action in actions {
            let result = match action {
                TemplateManagerAction::Create(template) => self
                    .context
                    .template_service()
                    .create(template)
                    .map(|saved| format!("Saved activity '{}'", saved.title)),
                TemplateManagerAction::Delete(id) => self
                    .context
                    .template_service()
                    .delete(id)
                    .map(|()| "Activity deleted".to_string()),
                TemplateManagerAction::AddCategory(name) => self
                    .context
                    .profile_service()
                    .add_category(&name)
                    .map(|()| format!("Added category '{}'", name)),
                TemplateManagerAction::RemoveCategory(name) => self
                    .context
                    .profile_service()
                    .remove_category(&name)
                    .map(|()| format!("Removed category '{}'", name)),
            };
            self.report(result);
        }
    }

    fn apply_settings_actions(&mut self, actions: Vec<SettingsAction>) {
        for action in actions {
            match action {
                SettingsAction::SelectChild(child_id) => self.select_child(child_id),
                SettingsAction::AddChild(name) => {
                    match self.context.profile_service().add_child(&name) {
                        Ok(child) => {
                            self.toasts.success(format!("Added {}", child.name));
                            self.state.selected_child = Some(child.id);
                        }
                        Err(e) => self.report_error(e),
                    }
                }
                SettingsAction::RemoveChild(child_id) => {
                    let result = self
                        .context
                        .profile_service()
                        .remove_child(&child_id)
                        .map(|()| "Child removed".to_string());
                    if result.is_ok() && self.state.selected_child.as_deref() == Some(&child_id) {
                        self.state.selected_child = None;
                    }
                    self.report(result);
                }
                SettingsAction::SaveSchoolTimes { child_id, times } => {
                    let result = self
                        .context
                        .profile_service()
                        .update_school_times(&child_id, times)
                        .map(|()| "School hours saved".to_string());
                    self.report(result);
                }
            }
        }
    }

    fn report(&mut self, result: anyhow::Result<String>) {
        match result {
            Ok(message) => self.toasts.success(message),
            Err(e) => self.report_error(e),
        }
    }

    fn report_error(&mut self, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.toasts.error(format!("{:#}", error));
    }
}
