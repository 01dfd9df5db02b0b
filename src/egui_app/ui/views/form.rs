use super::*;
use crate::features::{INPUT_SPECS, InputSpec};
use eframe::egui::SliderClamping;

impl EguiApp {
    pub(in crate::egui_app::ui) fn render_form(&mut self, ui: &mut Ui) {
        let palette = self.palette();
        style::card(palette).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.heading("Patient Inputs");
            ui.label(
                RichText::new(
                    "Fill patient values and press Predict. Results are shown on a separate \
                     page with graphs and report download.",
                )
                .color(palette.text_muted),
            );
            ui.add_space(12.0);
            let predicting = self.controller.ui.form.predicting;
            ui.add_enabled_ui(!predicting, |ui| {
                egui::Grid::new("patient_inputs")
                    .num_columns(2)
                    .spacing([32.0, 14.0])
                    .show(ui, |ui| {
                        for (idx, spec) in INPUT_SPECS.iter().enumerate() {
                            self.render_input(ui, spec);
                            if idx % 2 == 1 {
                                ui.end_row();
                            }
                        }
                    });
            });
            ui.add_space(16.0);
            ui.horizontal(|ui| {
                let label = if predicting { "Predicting..." } else { "Predict" };
                if ui
                    .add_enabled(!predicting, egui::Button::new(RichText::new(label).strong()))
                    .clicked()
                {
                    self.controller.submit_prediction();
                }
                if predicting {
                    ui.spinner();
                }
                if ui.button("View Last Report").clicked() {
                    self.controller.navigate(View::Report);
                }
            });
            if let Some(error) = &self.controller.ui.form.error {
                ui.add_space(8.0);
                ui.label(RichText::new(error).color(palette.error));
            }
        });
    }

    fn render_input(&mut self, ui: &mut Ui, spec: &InputSpec) {
        let Some(value) = self.controller.ui.form.inputs.value_mut(spec.key) else {
            return;
        };
        ui.vertical(|ui| {
            ui.label(RichText::new(spec.label).size(12.0));
            ui.horizontal(|ui| {
                ui.add(
                    egui::Slider::new(value, spec.min..=spec.max)
                        .step_by(spec.step)
                        .clamping(SliderClamping::Never)
                        .show_value(false),
                );
                ui.add(egui::DragValue::new(value).speed(spec.step));
            });
        });
    }
}
