//! Timetable export.
//!
//! Three outputs share one input, an `ExportRequest` holding a copy of the
//! child's events and school times:
//! - CSV rows from `TableProjection` (events visible from the current window)
//! - a PNG raster of the full-range grid layout, labels included
//! - a landscape PDF of the same layout with titles and labels
//!
//! Exports run on a worker thread through `ExportJob`.

mod job;
mod pdf;
mod raster;
mod table;

use std::path::{Path, PathBuf};
use thiserror::Error;

pub use job::ExportJob;
pub use pdf::PdfSnapshot;
pub use raster::RasterSnapshot;
pub use table::{TableProjection, TableRow};

use crate::models::event::ScheduleEvent;
use crate::models::school_time::SchoolTime;
use crate::models::viewport::GridViewport;
use crate::services::layout::{GridLayout, GridMetrics, TimeGeometry};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("There is nothing to export yet")]
    NothingToExport,
    #[error("Failed to write export file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to write spreadsheet: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("Failed to load label font: {0}")]
    Font(String),
    #[error("Failed to write PDF: {0}")]
    Pdf(String),
    #[error("Export worker stopped unexpectedly")]
    WorkerLost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Pdf,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn filter_name(self) -> &'static str {
        match self {
            ExportFormat::Png => "PNG Image",
            ExportFormat::Pdf => "PDF Document",
            ExportFormat::Csv => "CSV Spreadsheet",
        }
    }

    /// Suggested file name, e.g. `Mina_timetable.pdf`.
    pub fn default_file_name(self, child_name: &str) -> String {
        let stem: String = child_name
            .trim()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect();
        let stem = if stem.is_empty() { "child".to_string() } else { stem };
        format!("{}_timetable.{}", stem, self.extension())
    }
}

/// Everything an export needs, owned so it can cross to the worker thread.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub format: ExportFormat,
    pub path: PathBuf,
    pub child_name: String,
    pub events: Vec<ScheduleEvent>,
    pub school_times: Vec<SchoolTime>,
    /// Window shown when the export was requested; only the table uses it.
    pub viewport: GridViewport,
    pub raster_scale: u32,
}

impl ExportRequest {
    /// Writes the file. Nothing is created when there is nothing to export.
    pub fn run(&self) -> Result<PathBuf, ExportError> {
        if self.events.is_empty() {
            return Err(ExportError::NothingToExport);
        }

        match self.format {
            ExportFormat::Csv => {
                let rows = TableProjection::rows(&self.child_name, &self.events, self.viewport);
                if rows.is_empty() {
                    return Err(ExportError::NothingToExport);
                }
                TableProjection::write_csv(&self.path, &rows)?;
            }
            ExportFormat::Png => {
                let layout = snapshot_layout(
                    &self.events,
                    &self.school_times,
                    self.raster_scale.max(1) as f32,
                );
                RasterSnapshot::new()?.save(&layout, &self.path)?;
            }
            ExportFormat::Pdf => {
                let layout = snapshot_layout(&self.events, &self.school_times, 1.0);
                PdfSnapshot::write(&layout, &self.child_name, &self.path)?;
            }
        }

        log::info!("Exported timetable to {}", self.path.display());
        Ok(self.path.clone())
    }
}

/// Full-range layout used by the snapshot exports, independent of the
/// on-screen window and scroll position.
pub fn snapshot_layout(
    events: &[ScheduleEvent],
    school_times: &[SchoolTime],
    scale: f32,
) -> GridLayout {
    GridLayout::build(
        events,
        school_times,
        GridViewport::full_range(),
        None,
        GridMetrics::default().scaled(scale),
        TimeGeometry::scaled(scale),
    )
}

/// Makes sure `path` ends with the format's extension.
pub fn with_extension(path: &Path, format: ExportFormat) -> PathBuf {
    let matches = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(format.extension()));
    if matches {
        path.to_path_buf()
    } else {
        path.with_extension(format.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_name() {
        assert_eq!(ExportFormat::Pdf.default_file_name("Mina Kim"), "Mina_Kim_timetable.pdf");
        assert_eq!(ExportFormat::Csv.default_file_name("  "), "child_timetable.csv");
    }

    #[test]
    fn test_with_extension() {
        let path = with_extension(Path::new("/tmp/plan"), ExportFormat::Png);
        assert_eq!(path, PathBuf::from("/tmp/plan.png"));
        let kept = with_extension(Path::new("/tmp/plan.PNG"), ExportFormat::Png);
        assert_eq!(kept, PathBuf::from("/tmp/plan.PNG"));
    }

    #[test]
    fn test_empty_request_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        for format in [ExportFormat::Png, ExportFormat::Pdf, ExportFormat::Csv] {
            let path = dir.path().join(format.default_file_name("x"));
            let request = ExportRequest {
                format,
                path: path.clone(),
                child_name: "x".into(),
                events: Vec::new(),
                school_times: SchoolTime::default_week(),
                viewport: GridViewport::default(),
                raster_scale: 1,
            };
            assert!(matches!(request.run(), Err(ExportError::NothingToExport)));
            assert!(!path.exists());
        }
    }
}
