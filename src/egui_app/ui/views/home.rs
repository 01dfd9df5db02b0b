use super::*;

const INFO_CARDS: [(&str, &str); 3] = [
    (
        "Quick Start",
        "Go to the Form page, fill patient details, and press Predict.",
    ),
    (
        "Explainability",
        "The About page shows feature importance and the ROC curve.",
    ),
    ("Note", "Educational demo only, not a clinical tool."),
];

impl EguiApp {
    pub(in crate::egui_app::ui) fn render_home(&mut self, ui: &mut Ui) {
        let palette = self.palette();
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.label(
                RichText::new("CardioAI - The Heart Disease Predictor")
                    .size(30.0)
                    .strong(),
            );
            ui.add_space(8.0);
            ui.label(
                RichText::new(
                    "Enter patient information on the Form page to get an AI-powered \
                     prediction of heart disease risk.",
                )
                .color(palette.text_muted),
            );
            ui.add_space(16.0);
            ui.horizontal(|ui| {
                let width = 300.0;
                ui.add_space(((ui.available_width() - width) / 2.0).max(0.0));
                if ui.button("Go to Form").clicked() {
                    self.controller.navigate(View::Form);
                }
                if ui.button("About the Model").clicked() {
                    self.controller.navigate(View::About);
                }
            });
            ui.add_space(12.0);
            ui.label(
                RichText::new(
                    "This tool is for educational demonstration only, not for medical diagnosis.",
                )
                .size(12.0)
                .color(palette.text_muted),
            );
            ui.add_space(6.0);
            let backend = self.controller.ui.backend;
            ui.label(
                RichText::new(format!("● {}", backend.description()))
                    .size(13.0)
                    .color(style::backend_dot(backend)),
            );
        });
        ui.add_space(24.0);
        ui.columns(INFO_CARDS.len(), |columns| {
            for (column, (title, body)) in columns.iter_mut().zip(INFO_CARDS) {
                style::card(palette).show(column, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(title).strong().size(16.0));
                    ui.add_space(4.0);
                    ui.label(RichText::new(body).color(palette.text_muted));
                });
            }
        });
    }
}
