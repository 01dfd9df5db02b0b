use super::jobs::JobMessage;
use super::*;

impl EguiController {
    /// Drain finished background work; call once per frame.
    pub fn poll_background_jobs(&mut self) {
        loop {
            let message = match self.jobs.try_recv_message() {
                Ok(message) => message,
                Err(
                    std::sync::mpsc::TryRecvError::Empty
                    | std::sync::mpsc::TryRecvError::Disconnected,
                ) => {
                    break;
                }
            };

            match message {
                JobMessage::PredictionFinished(message) => {
                    self.jobs.clear_prediction();
                    self.handle_prediction_finished(message);
                }
                JobMessage::HealthChecked(status) => {
                    self.log_backend_transition(status);
                    self.ui.backend = status;
                }
                JobMessage::HistorySaved(message) => {
                    self.jobs.clear_history_append();
                    self.handle_history_saved(message.result);
                }
                JobMessage::PdfExported(message) => {
                    self.jobs.clear_pdf_export();
                    self.handle_pdf_exported(message);
                }
            }
        }
    }
}
