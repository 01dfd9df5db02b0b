use super::*;
use crate::egui_app::ui::charts::{self, BarRow};
use crate::features::format_value;
use crate::insights::{self, FactorBar};

const NO_RESULT: EmptyPrompt = EmptyPrompt {
    title: "No result available",
    body: "Run a prediction first from the Input page.",
    action: "Go to Input",
};

impl EguiApp {
    pub(in crate::egui_app::ui) fn render_result(&mut self, ui: &mut Ui) {
        let Some(report) = self.report_or_prompt(ui, NO_RESULT) else {
            return;
        };
        let subtitle = format!("Generated: {}", report.display_timestamp());
        self.page_header(ui, "Prediction Result", &subtitle, |app, ui| {
            app.pdf_button(ui, PdfKind::Result, "Download Report");
            app.history_button(ui);
            if ui.button("See Recommendations").clicked() {
                app.controller.navigate(View::Recommendations);
            }
            if ui.button("Edit Inputs").clicked() {
                app.controller.navigate(View::Form);
            }
        });
        let palette = self.palette();
        self.printable_panel(ui, PdfKind::Result, style::card(palette), |app, ui| {
            ui.set_width(ui.available_width());
            ui.columns(2, |columns| {
                app.render_prediction_summary(&mut columns[0], &report);
                app.render_factor_chart(&mut columns[1], &report);
            });
            app.render_model_details(ui, &report);
        });
    }

    fn render_prediction_summary(&self, ui: &mut Ui, report: &PredictionReport) {
        let palette = self.palette();
        let category = insights::risk_category(Some(report.probability));
        let percent = report.percent();
        ui.label(RichText::new("Prediction").color(palette.text_muted));
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            charts::gauge(
                ui,
                percent,
                style::risk_fill(category),
                palette.text_primary,
                120.0,
            );
            ui.add_space(12.0);
            ui.vertical(|ui| {
                ui.label(RichText::new(category.label()).strong().size(20.0));
                ui.label(RichText::new(category.summary()).color(palette.text_muted));
                ui.add_space(10.0);
                ui.label(RichText::new("Probability").size(12.0).color(palette.text_muted));
                charts::progress_bar(
                    ui,
                    report.probability,
                    style::risk_fill(category),
                    palette,
                );
                ui.label(RichText::new(format!("{percent}% chance")).strong());
            });
        });
        ui.separator();
        ui.label(RichText::new("Key inputs").strong());
        let inputs = &report.inputs;
        super::bullet_list(
            ui,
            &[
                &format!("Age: {}", format_value(inputs.age)),
                &format!("Resting BP: {}", format_value(inputs.trestbps)),
                &format!("Cholesterol: {}", format_value(inputs.chol)),
                &format!("Max heart rate: {}", format_value(inputs.thalch)),
            ],
        );
    }

    fn render_factor_chart(&self, ui: &mut Ui, report: &PredictionReport) {
        let palette = self.palette();
        ui.label(RichText::new("Most affecting factors").color(palette.text_muted));
        ui.add_space(8.0);
        let bars = insights::factor_chart(report);
        let rows: Vec<BarRow<'_>> = bars
            .iter()
            .map(|bar: &FactorBar| BarRow {
                name: &bar.name,
                value: bar.value,
                caption: bar.label(),
            })
            .collect();
        charts::horizontal_bars(ui, &rows, palette.accent, palette);
    }
}
