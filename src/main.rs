// Rust Calendar Week View
// Main entry point

use std::path::Path;

use chrono::Local;
use rust_calendar_week::services::event::load_events_from_file;
use rust_calendar_week::services::settings::{load_settings_or_default, SettingsService};
use rust_calendar_week::ui_egui::{demo_events, CalendarApp};

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Rust Calendar week view");

    let settings = load_settings_or_default();
    let settings_service = match SettingsService::from_default_location() {
        Ok(service) => Some(service),
        Err(e) => {
            log::warn!("Settings will not be saved: {:#}", e);
            None
        }
    };

    let events = match std::env::args().nth(1) {
        Some(path) => match load_events_from_file(Path::new(&path)) {
            Ok(report) => {
                if !report.diagnostics.is_empty() {
                    log::warn!(
                        "{} event record(s) in {} could not be read",
                        report.diagnostics.len(),
                        path
                    );
                }
                report.events
            }
            Err(e) => {
                log::error!("Failed to load events: {:#}", e);
                Vec::new()
            }
        },
        None => demo_events(Local::now().date_naive()),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 520.0])
            .with_min_inner_size([640.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rust Calendar - Week",
        options,
        Box::new(move |cc| Ok(Box::new(CalendarApp::new(cc, settings, events, settings_service)))),
    )
}
