use super::context::AppContext;
use super::data::LiveData;
use super::state::AppState;
use super::toast::ToastManager;
use super::TimetableApp;
use crate::models::config::AppConfig;
use crate::services::config::resolve_database_path;
use crate::services::export::ExportJob;
use crate::services::store::SqliteDocumentStore;
use crate::ui_egui::drag::DragSession;
use crate::ui_egui::event_dialog::{render_event_detail, EventDetailAction};
use crate::ui_egui::views::template_palette::paint_drag_ghost;
use anyhow::{Context as _, Result};

impl TimetableApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Result<Self> {
        let db_path = resolve_database_path(&config)?;
        log::info!("Opening timetable database at {}", db_path.display());
        let store = SqliteDocumentStore::open(&db_path.to_string_lossy(), config.owner_id.clone())
            .context("Failed to open timetable database")?;

        let mut app = Self::with_store(store, config)?;
        app.apply_system_theme(&cc.egui_ctx);
        Ok(app)
    }

    fn with_store(store: SqliteDocumentStore, config: AppConfig) -> Result<Self> {
        let window = config.default_window;
        let context = AppContext::new(store, config);

        let record = context
            .profile_service()
            .ensure_profile(&context.config().owner_email)?;
        log::info!(
            "Loaded profile for {} with {} children",
            record.profile.uid,
            record.profile.children.len()
        );

        let mut data = LiveData::new();
        data.subscribe_profile(context.store())?;

        let mut app = Self {
            context,
            state: AppState::new(window),
            data,
            drag: DragSession::new(),
            export_job: ExportJob::new(),
            toasts: ToastManager::new(),
            is_dark: false,
        };
        app.data.poll();
        app.follow_selected_child();
        app.data.poll();
        Ok(app)
    }

    fn apply_system_theme(&mut self, ctx: &egui::Context) {
        self.is_dark = matches!(dark_light::detect(), dark_light::Mode::Dark);
        log::debug!("System theme is {}", if self.is_dark { "dark" } else { "light" });
        ctx.set_visuals(if self.is_dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });
    }

    pub(super) fn handle_update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.data.poll() {
            self.follow_selected_child();
            self.data.poll();
        }
        self.poll_export(ctx);

        // Sidebar before CentralPanel so it takes left space
        self.render_sidebar(ctx);
        self.render_page(ctx);

        // Released over nothing that accepts a drop
        if self.drag.is_active() && ctx.input(|i| i.pointer.any_released()) {
            self.drag.cancel();
        }
        if self.drag.is_active() {
            paint_drag_ghost(ctx, &self.drag);
            ctx.request_repaint();
        }

        self.render_open_event(ctx);

        // Toasts last, so they appear on top
        self.toasts.render(ctx, self.is_dark);
    }

    fn render_open_event(&mut self, ctx: &egui::Context) {
        let Some(id) = self.state.open_event else {
            return;
        };
        let Some(event) = self.data.events.iter().find(|e| e.id == Some(id)) else {
            // Deleted elsewhere or child switched
            self.state.open_event = None;
            return;
        };

        let allow_delete = self.state.page == super::state::Page::Assign;
        match render_event_detail(ctx, event, allow_delete) {
            Some(EventDetailAction::Delete(id)) => self.delete_event(id),
            Some(EventDetailAction::Close) => self.state.open_event = None,
            None => {}
        }
    }
}
