mod about;
mod form;
mod home;
mod recommendations;
mod report;
mod result;

use super::style::{self, Palette};
use super::*;
use crate::egui_app::state::ReportViewState;
use crate::report::PredictionReport;
use crate::store::ReportSlot;
use eframe::egui::{RichText, Ui};

/// Text shown when a report-driven view has nothing to render.
struct EmptyPrompt {
    title: &'static str,
    body: &'static str,
    action: &'static str,
}

impl EguiApp {
    fn palette(&self) -> Palette {
        style::palette(self.controller.ui.theme)
    }

    /// The persisted report, or `None` after drawing the view's empty state.
    fn report_or_prompt(&mut self, ui: &mut Ui, prompt: EmptyPrompt) -> Option<PredictionReport> {
        if matches!(self.controller.ui.report, ReportViewState::Loading) {
            self.controller.refresh_report();
        }
        let unreadable = match self.controller.ui.report.slot() {
            Some(ReportSlot::Present(report)) => return Some(report.clone()),
            Some(ReportSlot::Unreadable(reason)) => Some(reason.clone()),
            _ => None,
        };
        let palette = self.palette();
        style::card(palette).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.heading(prompt.title);
            ui.label(RichText::new(prompt.body).color(palette.text_muted));
            if let Some(reason) = unreadable {
                ui.label(
                    RichText::new(format!("The saved report could not be read: {reason}"))
                        .size(12.0)
                        .color(palette.error),
                );
            }
            ui.add_space(8.0);
            if ui.button(prompt.action).clicked() {
                self.controller.navigate(View::Form);
            }
        });
        None
    }

    /// Title, subtitle and right-aligned actions above a view's body.
    fn page_header(
        &mut self,
        ui: &mut Ui,
        title: &str,
        subtitle: &str,
        actions: impl FnOnce(&mut Self, &mut Ui),
    ) {
        let palette = self.palette();
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.heading(title);
                ui.label(RichText::new(subtitle).color(palette.text_muted));
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                actions(self, ui);
            });
        });
        ui.add_space(12.0);
    }

    /// Pretty-printed service payload, when present.
    fn render_model_details(&self, ui: &mut Ui, report: &PredictionReport) {
        let Some(raw) = report.raw_pretty() else {
            return;
        };
        let palette = self.palette();
        ui.separator();
        ui.label(RichText::new("Model details").strong());
        style::code_block(palette).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(raw).monospace().size(12.0));
        });
    }

    /// Export button that reflects the capture state for `kind`.
    fn pdf_button(&mut self, ui: &mut Ui, kind: PdfKind, label: &str) {
        let pdf = self.controller.ui.pdf;
        let text = if pdf.busy_with(kind) {
            "Preparing PDF..."
        } else {
            label
        };
        if ui
            .add_enabled(!pdf.is_busy(), egui::Button::new(text))
            .clicked()
        {
            self.controller.request_pdf_export(kind);
        }
    }

    fn history_button(&mut self, ui: &mut Ui) {
        let saving = self.controller.history_saving();
        let text = if saving { "Saving..." } else { "Save to History" };
        if ui
            .add_enabled(!saving, egui::Button::new(text))
            .clicked()
        {
            self.controller.save_to_history();
        }
    }
}

fn bullet_list(ui: &mut Ui, items: &[&str]) {
    for item in items {
        ui.horizontal_wrapped(|ui| {
            ui.label("•");
            ui.label(*item);
        });
    }
}

fn numbered_list(ui: &mut Ui, items: &[&str]) {
    for (idx, item) in items.iter().enumerate() {
        ui.horizontal_wrapped(|ui| {
            ui.label(format!("{}.", idx + 1));
            ui.label(*item);
        });
    }
}
