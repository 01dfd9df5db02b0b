//! Maintains app state and bridges core logic to the egui UI.

mod background_jobs;
mod exports;
mod jobs;
mod prediction;
mod reports;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::egui_app::state::*;
use crate::prediction::PredictionService;
use crate::store::{ReportStore, ThemePreference};
use jobs::ControllerJobs;

pub use exports::MAX_CAPTURE_FRAMES;

/// Maintains app state and bridges core logic to the egui UI.
pub struct EguiController {
    pub ui: UiState,
    store: ReportStore,
    service: Arc<dyn PredictionService>,
    config: AppConfig,
    export_dir: PathBuf,
    jobs: ControllerJobs,
}

impl EguiController {
    pub fn new(
        config: AppConfig,
        store: ReportStore,
        service: Arc<dyn PredictionService>,
        export_dir: PathBuf,
    ) -> Self {
        let mut ui = UiState::default();
        ui.theme = store.theme();
        Self {
            ui,
            store,
            service,
            config,
            export_dir,
            jobs: ControllerJobs::new(),
        }
    }

    /// Begin probing backend reachability in the background.
    pub fn start_health_polling(&mut self) {
        self.jobs.start_health_poll(
            self.service.clone(),
            self.config.service.health_poll_interval(),
        );
    }

    pub fn store(&self) -> &ReportStore {
        &self.store
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Switch views; report-driven views re-read the persisted report.
    pub fn navigate(&mut self, view: View) {
        self.ui.view = view;
        if view.reads_report() {
            self.refresh_report();
        }
    }

    /// Whether background work is outstanding and the UI should keep repainting.
    pub fn has_pending_work(&self) -> bool {
        self.ui.form.predicting || self.ui.pdf.is_busy() || self.jobs.history_in_progress()
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme(self.ui.theme.toggled());
    }

    pub fn set_theme(&mut self, theme: ThemePreference) {
        self.ui.theme = theme;
        if let Err(err) = self.store.set_theme(theme) {
            warn!("Failed to persist theme: {err}");
            self.set_status(format!("Theme not saved: {err}"), StatusTone::Warning);
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.ui.alert = None;
    }

    pub(crate) fn show_alert(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        tone: StatusTone,
    ) {
        let message = message.into();
        self.set_status(message.clone(), tone);
        self.ui.alert = Some(AlertState {
            title: title.into(),
            message,
            tone,
        });
    }

    pub(crate) fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        let (label, color) = status_badge(tone);
        self.ui.status.text = text.into();
        self.ui.status.badge_label = label;
        self.ui.status.badge_color = color;
    }

    fn history_limit(&self) -> usize {
        self.config.storage.effective_history_limit()
    }

    fn log_backend_transition(&self, next: crate::prediction::HealthStatus) {
        if self.ui.backend != next {
            info!("Backend status: {}", next.description());
        }
    }
}
