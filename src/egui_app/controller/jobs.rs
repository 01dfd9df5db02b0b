use std::{
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{Receiver, Sender},
    },
    thread,
    time::Duration,
};

use time::OffsetDateTime;

use crate::egui_app::state::PdfKind;
use crate::features::FeatureVector;
use crate::pdf_export::{self, PanelSnapshot, PdfExportError};
use crate::prediction::{HealthStatus, PredictError, PredictResponse, PredictionService};
use crate::report::PredictionReport;
use crate::store::{ReportStore, StoreError};

type TryRecvError = std::sync::mpsc::TryRecvError;

/// Granularity at which the health poller notices it should stop.
const HEALTH_STOP_CHECK: Duration = Duration::from_millis(100);

pub(crate) enum JobMessage {
    PredictionFinished(PredictionResult),
    HealthChecked(HealthStatus),
    HistorySaved(HistoryResult),
    PdfExported(PdfExportResult),
}

#[derive(Debug)]
pub(crate) struct PredictionResult {
    pub(crate) features: FeatureVector,
    pub(crate) result: Result<PredictResponse, PredictError>,
    pub(crate) finished_at: OffsetDateTime,
}

#[derive(Debug)]
pub(crate) struct HistoryResult {
    pub(crate) result: Result<usize, StoreError>,
}

#[derive(Debug)]
pub(crate) struct PdfExportJob {
    pub(crate) kind: PdfKind,
    pub(crate) snapshot: PanelSnapshot,
    pub(crate) dir: PathBuf,
    pub(crate) file_name: String,
}

#[derive(Debug)]
pub(crate) struct PdfExportResult {
    pub(crate) kind: PdfKind,
    pub(crate) result: Result<PathBuf, PdfExportError>,
}

/// Stops its polling thread when dropped.
struct HealthPoller {
    stop: Arc<AtomicBool>,
}

impl Drop for HealthPoller {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

pub(crate) struct ControllerJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    prediction_in_progress: bool,
    history_in_progress: bool,
    pdf_in_progress: bool,
    health: Option<HealthPoller>,
}

impl ControllerJobs {
    pub(super) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            message_tx,
            message_rx,
            prediction_in_progress: false,
            history_in_progress: false,
            pdf_in_progress: false,
            health: None,
        }
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    pub(super) fn prediction_in_progress(&self) -> bool {
        self.prediction_in_progress
    }

    pub(super) fn begin_prediction(
        &mut self,
        service: Arc<dyn PredictionService>,
        features: FeatureVector,
    ) {
        if self.prediction_in_progress {
            return;
        }
        self.prediction_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = service.predict(&features);
            let _ = tx.send(JobMessage::PredictionFinished(PredictionResult {
                features,
                result,
                finished_at: OffsetDateTime::now_utc(),
            }));
        });
    }

    pub(super) fn clear_prediction(&mut self) {
        self.prediction_in_progress = false;
    }

    pub(super) fn history_in_progress(&self) -> bool {
        self.history_in_progress
    }

    pub(super) fn begin_history_append(
        &mut self,
        store: ReportStore,
        report: PredictionReport,
        limit: usize,
    ) {
        if self.history_in_progress {
            return;
        }
        self.history_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = store.append_history(&report, OffsetDateTime::now_utc(), limit);
            let _ = tx.send(JobMessage::HistorySaved(HistoryResult { result }));
        });
    }

    pub(super) fn clear_history_append(&mut self) {
        self.history_in_progress = false;
    }

    pub(super) fn begin_pdf_export(&mut self, job: PdfExportJob) {
        if self.pdf_in_progress {
            return;
        }
        self.pdf_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = pdf_export::render_pdf(job.kind.title(), &job.snapshot)
                .and_then(|bytes| pdf_export::write_export(&job.dir, &job.file_name, &bytes));
            let _ = tx.send(JobMessage::PdfExported(PdfExportResult {
                kind: job.kind,
                result,
            }));
        });
    }

    pub(super) fn clear_pdf_export(&mut self) {
        self.pdf_in_progress = false;
    }

    /// Probe immediately, then every `interval` until the jobs are dropped.
    pub(super) fn start_health_poll(
        &mut self,
        service: Arc<dyn PredictionService>,
        interval: Duration,
    ) {
        if self.health.is_some() {
            return;
        }
        let stop = Arc::new(AtomicBool::new(false));
        self.health = Some(HealthPoller { stop: stop.clone() });
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                let status = service.probe_health();
                if tx.send(JobMessage::HealthChecked(status)).is_err() {
                    break;
                }
                let mut waited = Duration::ZERO;
                while waited < interval && !stop.load(Ordering::Relaxed) {
                    thread::sleep(HEALTH_STOP_CHECK);
                    waited += HEALTH_STOP_CHECK;
                }
            }
        });
    }
}
