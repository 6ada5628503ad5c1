use crate::models::viewport::{GridViewport, ViewportWindow};
use crate::ui_egui::dialogs::template_manager::TemplateManagerState;
use crate::ui_egui::settings_dialog::SettingsPageState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    /// Read-only weekly overview with exports
    #[default]
    Timetable,
    /// Drag-and-drop scheduling
    Assign,
    Templates,
    Settings,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Timetable, Page::Assign, Page::Templates, Page::Settings];

    pub fn label(self) -> &'static str {
        match self {
            Page::Timetable => "📅 Timetable",
            Page::Assign => "🖐 Assign",
            Page::Templates => "📋 Templates",
            Page::Settings => "⚙ Settings",
        }
    }
}

pub struct AppState {
    pub page: Page,
    /// Child whose timetable is shown; falls back to the first child.
    pub selected_child: Option<String>,
    pub window: ViewportWindow,
    pub template_search: String,
    pub template_manager: TemplateManagerState,
    pub settings_page: SettingsPageState,
    /// Event shown in the detail popup
    pub open_event: Option<i64>,
}

impl AppState {
    pub fn new(window: ViewportWindow) -> Self {
        Self {
            page: Page::default(),
            selected_child: None,
            window,
            template_search: String::new(),
            template_manager: TemplateManagerState::default(),
            settings_page: SettingsPageState::default(),
            open_event: None,
        }
    }

    pub fn viewport(&self) -> GridViewport {
        GridViewport::from_window(self.window)
    }
}
