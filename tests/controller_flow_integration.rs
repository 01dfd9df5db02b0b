mod support;

use support::{cardio_env::CardioEnvGuard, mock_service::ScriptedService};

use cardioai::{
    config::AppConfig,
    egui_app::{
        controller::EguiController,
        state::{PdfExportState, PdfKind, StatusTone, View},
    },
    features::{FeatureVector, PatientInputs},
    insights::{self, RiskCategory},
    pdf_export::PanelSnapshot,
    prediction::{HealthStatus, PredictError},
    store::{ReportSlot, ReportStore, ThemePreference},
};
use serde_json::json;
use std::{path::PathBuf, sync::Arc, time::Duration};
use tempfile::TempDir;

struct ControllerHarness {
    _config: CardioEnvGuard,
    temp: TempDir,
    service: ScriptedService,
    pub controller: EguiController,
}

impl ControllerHarness {
    fn new() -> Self {
        Self::with_config(AppConfig::default(), HealthStatus::Up)
    }

    fn with_config(config: AppConfig, health: HealthStatus) -> Self {
        let temp = tempfile::tempdir().expect("create tempdir");
        let config_home = temp.path().join("config");
        std::fs::create_dir_all(&config_home).expect("create config dir");
        let env = CardioEnvGuard::set_config_home(config_home);

        let store = ReportStore::open_default().expect("open store");
        let service = ScriptedService::new(health);
        let controller = EguiController::new(
            config,
            store,
            Arc::new(service.clone()),
            temp.path().join("exports"),
        );
        Self {
            _config: env,
            temp,
            service,
            controller,
        }
    }

    fn export_dir(&self) -> PathBuf {
        self.temp.path().join("exports")
    }

    /// Pump background jobs until the controller reports nothing outstanding.
    fn settle(&mut self) {
        for _ in 0..400 {
            self.controller.poll_background_jobs();
            if !self.controller.has_pending_work() {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("background work did not finish");
    }

    fn predict(&mut self, inputs: PatientInputs) {
        self.controller.navigate(View::Form);
        self.controller.ui.form.inputs = inputs;
        self.controller.submit_prediction();
        assert!(self.controller.ui.form.predicting);
        self.settle();
    }
}

#[test]
fn successful_prediction_persists_submitted_inputs_and_opens_result() {
    let mut harness = ControllerHarness::new();
    harness.service.push_ok(1, 0.82, None);

    harness.predict(PatientInputs::default());

    let expected = FeatureVector::from_inputs(&PatientInputs::default());
    assert_eq!(harness.service.requests(), vec![expected.clone()]);
    let stored = harness.controller.store().load().expect("report stored");
    assert_eq!(stored.inputs, expected);
    assert_eq!(stored.probability, 0.82);
    assert_eq!(stored.percent(), 82);
    assert_eq!(
        insights::risk_category(Some(stored.probability)),
        RiskCategory::High
    );
    assert_eq!(insights::top_factor(&stored), "chol");

    let ui = &harness.controller.ui;
    assert_eq!(ui.view, View::Result);
    assert!(!ui.form.predicting);
    assert!(ui.form.error.is_none());
    assert_eq!(ui.report.report(), Some(&stored));
    assert!(ui.status.text.contains("82%"));
}

#[test]
fn service_importances_drive_the_top_factor() {
    let mut harness = ControllerHarness::new();
    harness.service.push_ok(
        0,
        0.35,
        Some(json!({
            "feature_importances": [
                {"feature": "age", "importance": 0.1},
                {"feature": "oldpeak", "importance": 0.6}
            ]
        })),
    );

    harness.predict(PatientInputs::default());
    harness.controller.navigate(View::Recommendations);

    let report = harness.controller.ui.report.report().expect("report loaded");
    assert_eq!(insights::top_factor(report), "oldpeak");
    assert_eq!(
        insights::risk_category(Some(report.probability)),
        RiskCategory::Low
    );
}

#[test]
fn non_success_status_shows_body_and_keeps_form() {
    let mut harness = ControllerHarness::new();
    harness.service.push(Err(PredictError::Status {
        code: 500,
        body: "model exploded".into(),
    }));

    harness.predict(PatientInputs::default());

    let ui = &harness.controller.ui;
    assert_eq!(ui.view, View::Form);
    assert_eq!(ui.form.error.as_deref(), Some("model exploded"));
    assert!(!ui.form.predicting);
    assert!(harness.controller.store().load().is_none());
}

#[test]
fn unreachable_service_is_reported_inline() {
    let mut harness = ControllerHarness::new();
    harness
        .service
        .push(Err(PredictError::Unreachable("connection refused".into())));

    harness.predict(PatientInputs::default());

    let error = harness.controller.ui.form.error.clone().expect("inline error");
    assert!(error.contains("connection refused"), "{error}");
    assert_eq!(harness.controller.ui.view, View::Form);
}

#[test]
fn clearing_the_report_empties_every_view() {
    let mut harness = ControllerHarness::new();
    harness.service.push_ok(1, 0.9, None);
    harness.predict(PatientInputs::default());

    harness.controller.navigate(View::Report);
    assert!(harness.controller.ui.report.report().is_some());

    harness.controller.clear_report();
    assert!(harness.controller.store().load().is_none());
    for view in [View::Result, View::Report, View::Recommendations] {
        harness.controller.navigate(view);
        assert_eq!(
            harness.controller.ui.report.slot(),
            Some(&ReportSlot::Empty),
            "{view:?}"
        );
    }
    harness.controller.navigate(View::About);
    let about = harness.controller.ui.about.clone().expect("about data");
    assert!(!about.importances_from_service);
    assert!(!about.roc_from_service);
    assert_eq!(about.auc, Some(0.827));
}

#[test]
fn history_keeps_most_recent_entries_up_to_the_limit() {
    let mut config = AppConfig::default();
    config.storage.history_limit = 2;
    let mut harness = ControllerHarness::with_config(config, HealthStatus::Up);

    for age in [40.0, 50.0, 60.0] {
        harness.service.push_ok(0, 0.2, None);
        harness.predict(PatientInputs {
            age,
            ..PatientInputs::default()
        });
        harness.controller.save_to_history();
        assert!(harness.controller.history_saving());
        harness.settle();
        let alert = harness.controller.ui.alert.clone().expect("history alert");
        assert_eq!(alert.message, "Saved to history.");
        assert_eq!(alert.tone, StatusTone::Info);
        harness.controller.dismiss_alert();
    }

    let history = harness.controller.store().history().expect("history");
    let ages: Vec<f64> = history.iter().map(|entry| entry.report.inputs.age).collect();
    assert_eq!(ages, vec![60.0, 50.0]);
}

#[test]
fn theme_choice_survives_a_new_controller() {
    let mut harness = ControllerHarness::new();
    assert_eq!(harness.controller.ui.theme, ThemePreference::Light);

    harness.controller.toggle_theme();

    let reopened = EguiController::new(
        AppConfig::default(),
        harness.controller.store().clone(),
        Arc::new(ScriptedService::new(HealthStatus::Unknown)),
        harness.export_dir(),
    );
    assert_eq!(reopened.ui.theme, ThemePreference::Dark);
}

#[test]
fn health_polling_updates_backend_status() {
    let mut harness = ControllerHarness::with_config(AppConfig::default(), HealthStatus::Down);
    assert_eq!(harness.controller.ui.backend, HealthStatus::Unknown);

    harness.controller.start_health_polling();
    for _ in 0..400 {
        harness.controller.poll_background_jobs();
        if harness.controller.ui.backend != HealthStatus::Unknown {
            break;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(harness.controller.ui.backend, HealthStatus::Down);
    assert_eq!(harness.controller.ui.backend.label(), "Backend: Down");
}

#[test]
fn about_export_writes_model_info_json() {
    let mut harness = ControllerHarness::new();
    harness.controller.navigate(View::About);

    harness.controller.export_about_json();

    let path = harness.export_dir().join("model_info.json");
    let text = std::fs::read_to_string(&path).expect("export written");
    let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
    assert_eq!(value["modelInfo"]["name"], "RandomForestClassifier");
    assert_eq!(value["importances"].as_array().map(Vec::len), Some(8));
    assert_eq!(value["roc"].as_array().map(Vec::len), Some(8));
    assert_eq!(value["auc"], 0.827);
}

#[test]
fn pdf_export_requires_a_report() {
    let mut harness = ControllerHarness::new();
    harness.controller.navigate(View::Result);

    harness.controller.request_pdf_export(PdfKind::Result);

    assert_eq!(harness.controller.ui.pdf, PdfExportState::Idle);
    assert_eq!(harness.controller.ui.status.badge_label, "Warning");
}

#[test]
fn captured_panel_is_written_as_pdf_named_from_report_time() {
    let mut harness = ControllerHarness::new();
    harness.service.push_ok(1, 0.75, None);
    harness.predict(PatientInputs::default());
    let millis = harness
        .controller
        .store()
        .load()
        .and_then(|report| report.epoch_millis())
        .expect("timestamp");

    harness.controller.request_pdf_export(PdfKind::Result);
    assert_eq!(
        harness.controller.take_capture_request(),
        Some(PdfKind::Result)
    );
    assert_eq!(harness.controller.take_capture_request(), None);
    let snapshot = PanelSnapshot::new(4, 3, vec![200; 4 * 3 * 4]).expect("snapshot");
    harness.controller.complete_pdf_capture(snapshot);
    assert!(harness.controller.ui.pdf.busy_with(PdfKind::Result));
    harness.settle();

    assert_eq!(harness.controller.ui.pdf, PdfExportState::Idle);
    let path = harness
        .export_dir()
        .join(format!("patient_result_{millis}.pdf"));
    let bytes = std::fs::read(&path).expect("pdf written");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn missing_screenshot_fails_export_with_alert() {
    let mut harness = ControllerHarness::new();
    harness.service.push_ok(0, 0.5, None);
    harness.predict(PatientInputs::default());

    harness.controller.request_pdf_export(PdfKind::Plan);
    harness.controller.take_capture_request();
    for _ in 0..=cardioai::egui_app::controller::MAX_CAPTURE_FRAMES {
        harness.controller.note_capture_frame();
    }

    assert_eq!(harness.controller.ui.pdf, PdfExportState::Idle);
    let alert = harness.controller.ui.alert.clone().expect("alert shown");
    assert!(alert.message.starts_with("Failed to generate PDF."));
    assert!(std::fs::read_dir(harness.export_dir()).is_err());
}
