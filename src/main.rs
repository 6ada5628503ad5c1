// Kids Timetable Application
// Main entry point

use kids_timetable::services::config;
use kids_timetable::ui_egui::TimetableApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Kids Timetable");

    let config = config::load_or_create();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Kids Timetable")
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Kids Timetable",
        options,
        Box::new(|cc| -> Result<Box<dyn eframe::App>, _> {
            match TimetableApp::new(cc, config) {
                Ok(app) => Ok(Box::new(app)),
                Err(e) => {
                    log::error!("Failed to start: {:#}", e);
                    Err(Box::<dyn std::error::Error + Send + Sync>::from(e))
                }
            }
        }),
    )
}
