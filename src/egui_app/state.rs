//! Shared state types for the egui UI.

use egui::Color32;

use crate::features::PatientInputs;
use crate::insights::model_info::AboutData;
use crate::pdf_export;
use crate::prediction::HealthStatus;
use crate::store::{ReportSlot, ThemePreference};

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub view: View,
    pub theme: ThemePreference,
    pub status: StatusBarState,
    pub backend: HealthStatus,
    pub form: FormState,
    /// Current report as last read from storage.
    pub report: ReportViewState,
    pub about: Option<AboutData>,
    pub alert: Option<AlertState>,
    pub pdf: PdfExportState,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            view: View::Home,
            theme: ThemePreference::Light,
            status: StatusBarState::idle(),
            backend: HealthStatus::Unknown,
            form: FormState::default(),
            report: ReportViewState::Loading,
            about: None,
            alert: None,
            pdf: PdfExportState::Idle,
        }
    }
}

/// Top-level pages reachable from the navigation bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Home,
    Form,
    Result,
    Report,
    Recommendations,
    About,
}

impl View {
    pub const ALL: [View; 6] = [
        View::Home,
        View::Form,
        View::About,
        View::Result,
        View::Report,
        View::Recommendations,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Form => "Form",
            Self::Result => "Result",
            Self::Report => "Report",
            Self::Recommendations => "Recommendations",
            Self::About => "About",
        }
    }

    /// Views that render the persisted report and re-read it on entry.
    pub fn reads_report(self) -> bool {
        matches!(
            self,
            Self::Result | Self::Report | Self::Recommendations | Self::About
        )
    }
}

/// Input form values and submission state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormState {
    pub inputs: PatientInputs,
    /// A prediction request is outstanding; the submit control is disabled.
    pub predicting: bool,
    pub error: Option<String>,
}

/// What report-driven views render.
#[derive(Clone, Debug, PartialEq)]
pub enum ReportViewState {
    Loading,
    Loaded(ReportSlot),
}

impl ReportViewState {
    pub fn slot(&self) -> Option<&ReportSlot> {
        match self {
            Self::Loaded(slot) => Some(slot),
            Self::Loading => None,
        }
    }

    pub fn report(&self) -> Option<&crate::report::PredictionReport> {
        self.slot().and_then(ReportSlot::report)
    }
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub badge_label: String,
    pub badge_color: Color32,
}

impl StatusBarState {
    pub fn idle() -> Self {
        let (badge_label, badge_color) = status_badge(StatusTone::Idle);
        Self {
            text: "Ready".into(),
            badge_label,
            badge_color,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Busy,
    Info,
    Warning,
    Error,
}

pub(crate) fn status_badge(tone: StatusTone) -> (String, Color32) {
    match tone {
        StatusTone::Idle => ("Idle".into(), Color32::from_rgb(107, 114, 128)),
        StatusTone::Busy => ("Working".into(), Color32::from_rgb(37, 99, 235)),
        StatusTone::Info => ("Info".into(), Color32::from_rgb(16, 185, 129)),
        StatusTone::Warning => ("Warning".into(), Color32::from_rgb(245, 158, 11)),
        StatusTone::Error => ("Error".into(), Color32::from_rgb(239, 68, 68)),
    }
}

/// Modal notice the user must dismiss.
#[derive(Clone, Debug, PartialEq)]
pub struct AlertState {
    pub title: String,
    pub message: String,
    pub tone: StatusTone,
}

/// Which panel a PDF export captures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PdfKind {
    Result,
    Report,
    Plan,
}

impl PdfKind {
    pub fn file_prefix(self) -> &'static str {
        match self {
            Self::Result => pdf_export::RESULT_PREFIX,
            Self::Report => pdf_export::REPORT_PREFIX,
            Self::Plan => pdf_export::PLAN_PREFIX,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Result => "Prediction Result",
            Self::Report => "Patient Report",
            Self::Plan => "Personalized Recommendations",
        }
    }
}

/// `has-report -> pdf-exporting -> has-report`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PdfExportState {
    Idle,
    /// Waiting for the renderer to deliver the panel pixels.
    Capturing {
        kind: PdfKind,
        requested: bool,
        frames_waited: u32,
    },
    /// Pixels captured; the PDF is being encoded and written.
    Writing { kind: PdfKind },
}

impl PdfExportState {
    pub fn is_busy(self) -> bool {
        !matches!(self, Self::Idle)
    }

    pub fn busy_with(self, kind: PdfKind) -> bool {
        match self {
            Self::Idle => false,
            Self::Capturing { kind: active, .. } | Self::Writing { kind: active } => {
                active == kind
            }
        }
    }
}
