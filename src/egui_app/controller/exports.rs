use time::OffsetDateTime;

use super::jobs::{PdfExportJob, PdfExportResult};
use super::*;
use crate::pdf_export::{self, PanelSnapshot};

/// Frames to wait for the renderer's screenshot before giving up.
pub const MAX_CAPTURE_FRAMES: u32 = 30;

impl EguiController {
    /// Start exporting the visible panel of `kind` to PDF.
    pub fn request_pdf_export(&mut self, kind: PdfKind) {
        if self.ui.pdf.is_busy() {
            return;
        }
        if self.ui.report.report().is_none() {
            self.set_status("No report to export", StatusTone::Warning);
            return;
        }
        self.ui.pdf = PdfExportState::Capturing {
            kind,
            requested: false,
            frames_waited: 0,
        };
        self.set_status("Preparing PDF...", StatusTone::Busy);
    }

    /// Claim a pending capture so the renderer requests exactly one screenshot.
    pub fn take_capture_request(&mut self) -> Option<PdfKind> {
        match &mut self.ui.pdf {
            PdfExportState::Capturing {
                kind,
                requested: requested @ false,
                ..
            } => {
                *requested = true;
                Some(*kind)
            }
            _ => None,
        }
    }

    pub fn capture_pending(&self) -> Option<PdfKind> {
        match self.ui.pdf {
            PdfExportState::Capturing { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Count a frame without pixels; fails the export once the wait is exhausted.
    pub fn note_capture_frame(&mut self) {
        let PdfExportState::Capturing { frames_waited, .. } = &mut self.ui.pdf else {
            return;
        };
        *frames_waited += 1;
        if *frames_waited > MAX_CAPTURE_FRAMES {
            self.fail_pdf_export("The panel could not be captured.");
        }
    }

    /// Hand the captured panel pixels over for encoding.
    pub fn complete_pdf_capture(&mut self, snapshot: PanelSnapshot) {
        let Some(kind) = self.capture_pending() else {
            return;
        };
        let timestamp = self.ui.report.report().map(|report| report.timestamp.clone());
        let file_name = pdf_export::export_file_name(
            kind.file_prefix(),
            timestamp.as_deref(),
            OffsetDateTime::now_utc(),
        );
        self.ui.pdf = PdfExportState::Writing { kind };
        self.jobs.begin_pdf_export(PdfExportJob {
            kind,
            snapshot,
            dir: self.export_dir.clone(),
            file_name,
        });
    }

    /// Abort the export; no file is written.
    pub fn fail_pdf_export(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        warn!("PDF export failed: {reason}");
        self.ui.pdf = PdfExportState::Idle;
        self.show_alert(
            "PDF export",
            format!("Failed to generate PDF. {reason}"),
            StatusTone::Error,
        );
    }

    pub(super) fn handle_pdf_exported(&mut self, message: PdfExportResult) {
        self.ui.pdf = PdfExportState::Idle;
        match message.result {
            Ok(path) => {
                info!("{} PDF written to {}", message.kind.title(), path.display());
                self.set_status(format!("Saved {}", path.display()), StatusTone::Info);
            }
            Err(err) => self.fail_pdf_export(format!("{err}. Try again.")),
        }
    }
}
