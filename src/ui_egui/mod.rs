mod app;
pub mod dialogs;
pub mod drag;
mod event_dialog;
mod settings_dialog;
pub mod views;

pub use app::TimetableApp;
