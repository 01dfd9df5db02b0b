use super::*;
use crate::egui_app::ui::charts;
use crate::features::format_value;
use crate::insights::advice;

const NO_REPORT: EmptyPrompt = EmptyPrompt {
    title: "No report found",
    body: "Run a prediction first on the Form page. The last result is saved locally and will \
           appear here.",
    action: "Go to Form",
};

impl EguiApp {
    pub(in crate::egui_app::ui) fn render_report(&mut self, ui: &mut Ui) {
        let Some(report) = self.report_or_prompt(ui, NO_REPORT) else {
            return;
        };
        let subtitle = format!("Generated: {}", report.display_timestamp());
        self.page_header(ui, "Patient Report", &subtitle, |app, ui| {
            if ui.button("Clear").clicked() {
                app.controller.clear_report();
            }
            app.pdf_button(ui, PdfKind::Report, "Download PDF");
        });
        let palette = self.palette();
        self.printable_panel(ui, PdfKind::Report, style::card(palette), |app, ui| {
            ui.set_width(ui.available_width());
            app.render_report_heading(ui, &report);
            ui.separator();
            ui.columns(2, |columns| {
                render_inputs_table(&mut columns[0], &report);
                app.render_prediction_block(&mut columns[1], &report);
            });
            app.render_model_details(ui, &report);
        });
    }

    fn render_report_heading(&self, ui: &mut Ui, report: &PredictionReport) {
        let palette = self.palette();
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(RichText::new("CardioAI").strong().size(18.0));
                ui.label(
                    RichText::new("AI Heart Risk Screening")
                        .size(13.0)
                        .color(palette.text_muted),
                );
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(format!("{}% Risk", report.percent())).strong());
                    ui.label(
                        RichText::new(advice::prediction_headline(report.prediction))
                            .size(12.0)
                            .color(palette.text_muted),
                    );
                });
            });
        });
    }

    fn render_prediction_block(&self, ui: &mut Ui, report: &PredictionReport) {
        let palette = self.palette();
        ui.label(RichText::new("Prediction Summary").strong());
        ui.add_space(6.0);
        charts::progress_bar(ui, report.probability, palette.accent, palette);
        ui.label(
            RichText::new(format!("{}%", report.percent()))
                .strong()
                .size(16.0),
        );
        ui.add_space(6.0);
        ui.horizontal_wrapped(|ui| {
            ui.label(RichText::new("Recommendation:").strong());
            ui.label(
                RichText::new(advice::prediction_recommendation(report.prediction))
                    .color(palette.text_muted),
            );
        });
        ui.add_space(10.0);
        ui.label(
            RichText::new(format!("Note: {}", advice::DISCLAIMER))
                .size(12.0)
                .color(palette.text_muted),
        );
    }
}

fn render_inputs_table(ui: &mut Ui, report: &PredictionReport) {
    ui.label(RichText::new("Patient Inputs").strong());
    ui.add_space(6.0);
    egui::Grid::new("report_inputs")
        .num_columns(2)
        .striped(true)
        .spacing([24.0, 6.0])
        .show(ui, |ui| {
            for (key, value) in report.inputs.entries() {
                ui.label(RichText::new(key).weak());
                ui.label(format_value(value));
                ui.end_row();
            }
        });
}
