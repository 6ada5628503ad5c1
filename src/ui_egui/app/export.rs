//! Export buttons and the background export job.

use super::TimetableApp;
use crate::services::export::{with_extension, ExportError, ExportFormat, ExportRequest};

const EXPORT_FORMATS: [(ExportFormat, &str); 3] = [
    (ExportFormat::Png, "🖼 Save PNG"),
    (ExportFormat::Pdf, "📄 Save PDF"),
    (ExportFormat::Csv, "📊 Export CSV"),
];

impl TimetableApp {
    pub(super) fn render_export_buttons(&mut self, ui: &mut egui::Ui) {
        let busy = self.export_job.is_busy();
        for (format, label) in EXPORT_FORMATS {
            if ui.add_enabled(!busy, egui::Button::new(label)).clicked() {
                self.start_export(format);
            }
        }
        if busy {
            ui.spinner();
            ui.label(egui::RichText::new("Exporting…").weak());
        }
    }

    fn start_export(&mut self, format: ExportFormat) {
        let Some(child) = self.current_child().cloned() else {
            self.toasts.warning("Please select a child first");
            return;
        };
        if self.data.events.is_empty() {
            self.report_export_error(&ExportError::NothingToExport);
            return;
        }

        let Some(path) = rfd::FileDialog::new()
            .set_title("Save timetable")
            .set_file_name(format.default_file_name(&child.name))
            .add_filter(format.filter_name(), &[format.extension()])
            .save_file()
        else {
            log::debug!("Export cancelled");
            return;
        };

        let request = ExportRequest {
            format,
            path: with_extension(&path, format),
            child_name: child.name.clone(),
            events: self.data.events.clone(),
            school_times: child.school_times.clone(),
            viewport: self.state.viewport(),
            raster_scale: self.context.config().raster_scale,
        };

        if let Err(e) = self.export_job.start(request) {
            self.report_export_error(&e);
        }
    }

    pub(super) fn poll_export(&mut self, ctx: &egui::Context) {
        if !self.export_job.is_busy() {
            return;
        }
        match self.export_job.poll() {
            Some(Ok(path)) => self.toasts.success(format!("Saved {}", path.display())),
            Some(Err(e)) => self.report_export_error(&e),
            None => ctx.request_repaint_after(std::time::Duration::from_millis(100)),
        }
    }

    fn report_export_error(&mut self, error: &ExportError) {
        match error {
            ExportError::NothingToExport => self.toasts.warning(error.to_string()),
            _ => {
                log::error!("Export failed: {}", error);
                self.toasts.error(format!("Export failed: {}", error));
            }
        }
    }
}
