//! Entry point for the CardioAI desktop client.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use std::sync::Arc;

use cardioai::config;
use cardioai::egui_app::controller::EguiController;
use cardioai::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use cardioai::logging;
use cardioai::prediction::HttpPredictionService;
use cardioai::store::ReportStore;
use eframe::egui;
use tracing::{info, warn};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let viewport = egui::ViewportBuilder::default()
        .with_title("CardioAI")
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_inner_size([1180.0, 820.0]);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let startup = build_controller();
    eframe::run_native(
        "CardioAI",
        native_options,
        Box::new(move |_cc| match startup {
            Ok(controller) => Ok(Box::new(EguiApp::new(controller))),
            Err(message) => Ok(Box::new(LaunchError { message })),
        }),
    )?;
    Ok(())
}

/// Wire config, storage and the prediction service into a controller.
fn build_controller() -> Result<EguiController, String> {
    let config = config::load_or_default().map_err(|err| {
        warn!("Configuration rejected: {err}");
        format!("Failed to load configuration: {err}")
    })?;
    let store = ReportStore::open_default()
        .map_err(|err| format!("Failed to open local storage: {err}"))?;
    let service = HttpPredictionService::new(&config.service)
        .map_err(|err| format!("Invalid prediction service settings: {err}"))?;
    let export_dir = config
        .export
        .resolve_dir()
        .map_err(|err| format!("Failed to resolve export directory: {err}"))?;
    info!(
        "Prediction service at {}, exports to {}",
        service.predict_url(),
        export_dir.display()
    );
    let mut controller = EguiController::new(config, store, Arc::new(service), export_dir);
    controller.start_health_polling();
    Ok(controller)
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start CardioAI");
                ui.label(&self.message);
            });
        });
    }
}
