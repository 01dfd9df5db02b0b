use super::*;
use crate::egui_app::ui::charts::{self, BarRow};
use crate::insights::model_info::AboutData;

impl EguiApp {
    pub(in crate::egui_app::ui) fn render_about(&mut self, ui: &mut Ui) {
        if self.controller.ui.about.is_none() {
            self.controller.refresh_report();
        }
        let Some(about) = self.controller.ui.about.clone() else {
            return;
        };
        self.page_header(
            ui,
            "About the Model",
            "Details about the trained Random Forest model and visualizations.",
            |app, ui| {
                if ui.button("Export JSON").clicked() {
                    app.controller.export_about_json();
                }
            },
        );
        let palette = self.palette();
        ui.columns(2, |columns| {
            style::card(palette).show(&mut columns[0], |ui| {
                ui.set_width(ui.available_width());
                render_model_summary(ui, &about, palette);
            });
            style::card(palette).show(&mut columns[1], |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new("ROC Curve").size(15.0));
                charts::roc_chart(ui, &about.roc_points, palette.accent, palette);
                let note = if about.roc_from_service {
                    "Curve supplied by the prediction service."
                } else {
                    "The ROC curve above is illustrative."
                };
                ui.label(RichText::new(note).size(12.0).color(palette.text_muted));
            });
        });
        ui.add_space(12.0);
        style::card(palette).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new("Feature importances").size(15.0));
            ui.add_space(6.0);
            let rows: Vec<BarRow<'_>> = about
                .importances
                .iter()
                .map(|entry| BarRow {
                    name: &entry.feature,
                    value: entry.importance,
                    caption: format!("{:.3}", entry.importance),
                })
                .collect();
            charts::horizontal_bars(ui, &rows, palette.accent, palette);
            ui.add_space(6.0);
            let note = if about.importances_from_service {
                "Importances reported by the prediction service for the last report."
            } else {
                "Placeholder values. When the service returns raw.feature_importances as \
                 [{feature, importance}], this chart shows the real importances."
            };
            ui.label(RichText::new(note).size(12.0).color(palette.text_muted));
        });
    }
}

fn render_model_summary(ui: &mut Ui, about: &AboutData, palette: Palette) {
    let info = &about.model_info;
    ui.label(RichText::new("Model summary").size(15.0));
    ui.add_space(6.0);
    ui.label(RichText::new(info.name).strong());
    ui.label(RichText::new(info.dataset).color(palette.text_muted));
    ui.label(
        RichText::new(format!("Trained on: {}", info.trained_on))
            .size(12.0)
            .color(palette.text_muted),
    );
    ui.add_space(10.0);
    let auc = about
        .auc
        .map(|auc| format!("{auc:.3}"))
        .unwrap_or_else(|| "N/A".to_string());
    ui.horizontal(|ui| {
        ui.label(RichText::new("AUC (approx):").strong());
        ui.label(auc);
    });
    ui.add_space(6.0);
    ui.label(RichText::new(info.notes).size(12.0).color(palette.text_muted));
}
