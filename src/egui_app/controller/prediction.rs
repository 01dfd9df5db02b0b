use super::jobs::PredictionResult;
use super::*;
use crate::features::FeatureVector;
use crate::report::PredictionReport;
use crate::store::ReportSlot;

impl EguiController {
    /// Submit the form inputs; ignored while a request is outstanding.
    pub fn submit_prediction(&mut self) {
        if self.ui.form.predicting || self.jobs.prediction_in_progress() {
            return;
        }
        let features = FeatureVector::from_inputs(&self.ui.form.inputs);
        self.ui.form.predicting = true;
        self.ui.form.error = None;
        info!(
            "Submitting prediction (age={}, trestbps={}, chol={}, thalch={}, oldpeak={}, ca={})",
            features.age, features.trestbps, features.chol, features.thalch, features.oldpeak,
            features.ca
        );
        self.set_status("Predicting...", StatusTone::Busy);
        self.jobs.begin_prediction(self.service.clone(), features);
    }

    pub(super) fn handle_prediction_finished(&mut self, message: PredictionResult) {
        self.ui.form.predicting = false;
        let response = match message.result {
            Ok(response) => response,
            Err(err) => {
                warn!("Prediction failed: {err}");
                let text = err.to_string();
                self.set_status(format!("Prediction failed: {text}"), StatusTone::Error);
                self.ui.form.error = Some(text);
                return;
            }
        };
        let report = PredictionReport::new(
            message.features,
            response.prediction,
            response.probability,
            response.raw,
            message.finished_at,
        );
        if let Err(err) = self.store.save(&report) {
            warn!("Failed to persist report: {err}");
            let text = format!("Prediction succeeded but could not be saved: {err}");
            self.set_status(text.clone(), StatusTone::Error);
            self.ui.form.error = Some(text);
            return;
        }
        info!(
            "Prediction stored: class {} with probability {:.3}",
            report.prediction, report.probability
        );
        self.set_status(
            format!("Prediction complete: {}% risk", report.percent()),
            StatusTone::Info,
        );
        self.ui.report = ReportViewState::Loaded(ReportSlot::Present(report));
        self.ui.about = None;
        self.ui.view = View::Result;
    }
}
