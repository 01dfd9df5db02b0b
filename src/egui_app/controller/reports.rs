use super::*;
use crate::insights::model_info::{AboutData, EXPORT_FILE_NAME};
use crate::pdf_export;
use crate::store::{ReportSlot, StoreError};

impl EguiController {
    /// Re-read the persisted report for the report-driven views.
    pub fn refresh_report(&mut self) {
        self.ui.report = ReportViewState::Loading;
        let slot = self.store.load_slot();
        if let ReportSlot::Unreadable(reason) = &slot {
            self.set_status(
                format!("Stored report could not be read: {reason}"),
                StatusTone::Warning,
            );
        }
        self.ui.about = Some(AboutData::from_slot(&slot));
        self.ui.report = ReportViewState::Loaded(slot);
    }

    /// Remove the current report; every view falls back to its empty state.
    pub fn clear_report(&mut self) {
        match self.store.clear() {
            Ok(()) => {
                info!("Cleared stored report");
                self.ui.report = ReportViewState::Loaded(ReportSlot::Empty);
                self.ui.about = Some(AboutData::from_slot(&ReportSlot::Empty));
                self.set_status("Report cleared", StatusTone::Info);
            }
            Err(err) => {
                warn!("Failed to clear report: {err}");
                self.show_alert(
                    "Clear failed",
                    format!("Failed to clear report: {err}"),
                    StatusTone::Error,
                );
            }
        }
    }

    /// Copy the displayed report into the history log.
    pub fn save_to_history(&mut self) {
        if self.jobs.history_in_progress() {
            return;
        }
        let Some(report) = self.ui.report.report().cloned() else {
            self.set_status("No report to save", StatusTone::Warning);
            return;
        };
        self.set_status("Saving to history...", StatusTone::Busy);
        let limit = self.history_limit();
        self.jobs.begin_history_append(self.store.clone(), report, limit);
    }

    pub fn history_saving(&self) -> bool {
        self.jobs.history_in_progress()
    }

    pub(super) fn handle_history_saved(&mut self, result: Result<usize, StoreError>) {
        match result {
            Ok(len) => {
                info!("Saved report to history ({len} entries)");
                self.show_alert("History", "Saved to history.", StatusTone::Info);
            }
            Err(err) => {
                warn!("Failed to save history: {err}");
                self.show_alert(
                    "History",
                    format!("Failed to save to history: {err}"),
                    StatusTone::Error,
                );
            }
        }
    }

    /// Write the about data as `model_info.json` into the export directory.
    pub fn export_about_json(&mut self) {
        let about = match &self.ui.about {
            Some(about) => about.clone(),
            None => AboutData::from_slot(&self.store.load_slot()),
        };
        let json = match about.export_json() {
            Ok(json) => json,
            Err(err) => {
                self.show_alert(
                    "Export failed",
                    format!("Failed to encode model info: {err}"),
                    StatusTone::Error,
                );
                return;
            }
        };
        match pdf_export::write_export(&self.export_dir, EXPORT_FILE_NAME, json.as_bytes()) {
            Ok(path) => self.set_status(format!("Exported {}", path.display()), StatusTone::Info),
            Err(err) => {
                warn!("Model info export failed: {err}");
                self.show_alert("Export failed", err.to_string(), StatusTone::Error);
            }
        }
    }
}
