//! egui renderer for the application UI.

mod alerts;
mod capture;
mod charts;
mod chrome;
mod style;
mod views;

use std::time::Duration;

use crate::egui_app::controller::EguiController;
use crate::egui_app::state::{PdfKind, View};
use crate::store::ThemePreference;
use eframe::egui::{self, Rect, Vec2};

/// Minimum window size that keeps the two-column views legible.
pub const MIN_VIEWPORT_SIZE: Vec2 = Vec2::new(900.0, 620.0);

/// Repaint cadence while background work is outstanding.
const BUSY_REPAINT: Duration = Duration::from_millis(50);
/// Repaint cadence when idle, so health updates still show up.
const IDLE_REPAINT: Duration = Duration::from_millis(500);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    applied_theme: Option<ThemePreference>,
    /// Screen rectangle of the exportable panel drawn this frame.
    printable: Option<(PdfKind, Rect)>,
}

impl EguiApp {
    pub fn new(controller: EguiController) -> Self {
        Self {
            controller,
            applied_theme: None,
            printable: None,
        }
    }

    pub fn controller(&self) -> &EguiController {
        &self.controller
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        let theme = self.controller.ui.theme;
        if self.applied_theme == Some(theme) {
            return;
        }
        let mut visuals = match theme {
            ThemePreference::Light => egui::Visuals::light(),
            ThemePreference::Dark => egui::Visuals::dark(),
        };
        style::apply_visuals(&mut visuals, theme);
        ctx.set_visuals(visuals);
        self.applied_theme = Some(theme);
    }

    fn render_view(&mut self, ui: &mut egui::Ui) {
        match self.controller.ui.view {
            View::Home => self.render_home(ui),
            View::Form => self.render_form(ui),
            View::Result => self.render_result(ui),
            View::Report => self.render_report(ui),
            View::Recommendations => self.render_recommendations(ui),
            View::About => self.render_about(ui),
        }
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controller.poll_background_jobs();
        self.apply_visuals(ctx);
        self.printable = None;
        self.render_top_bar(ctx);
        self.render_status(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("view_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.add_space(12.0);
                    self.render_view(ui);
                    ui.add_space(24.0);
                });
        });
        self.render_alert(ctx);
        self.drive_pdf_capture(ctx);
        if self.controller.has_pending_work() {
            ctx.request_repaint_after(BUSY_REPAINT);
        } else {
            ctx.request_repaint_after(IDLE_REPAINT);
        }
    }
}
