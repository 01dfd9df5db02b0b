use super::style;
use super::*;
use eframe::egui::{Frame, Margin, RichText, Sense, Stroke, StrokeKind};

impl EguiApp {
    pub(super) fn render_top_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette(self.controller.ui.theme);
        egui::TopBottomPanel::top("top_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_paper)
                    .stroke(Stroke::new(1.0, palette.outline))
                    .inner_margin(Margin::symmetric(16, 8)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new("CardioAI").strong().size(18.0));
                        ui.label(
                            RichText::new("AI Heart Risk Screening")
                                .size(12.0)
                                .color(palette.text_muted),
                        );
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        self.render_theme_toggle(ui);
                        ui.add_space(8.0);
                        self.render_backend_indicator(ui);
                        ui.add_space(16.0);
                        self.render_nav(ui);
                    });
                });
            });
    }

    fn render_nav(&mut self, ui: &mut egui::Ui) {
        let current = self.controller.ui.view;
        // Right-to-left layout: add in reverse so the links read in order.
        for view in View::ALL.iter().rev().copied() {
            if ui.selectable_label(current == view, view.label()).clicked() {
                self.controller.navigate(view);
            }
        }
    }

    fn render_backend_indicator(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette(self.controller.ui.theme);
        let status = self.controller.ui.backend;
        ui.label(
            RichText::new(status.label())
                .size(12.0)
                .color(palette.text_muted),
        );
        let (dot, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), Sense::hover());
        ui.painter()
            .circle_filled(dot.center(), 5.0, style::backend_dot(status));
    }

    fn render_theme_toggle(&mut self, ui: &mut egui::Ui) {
        let label = match self.controller.ui.theme {
            ThemePreference::Light => "Dark mode",
            ThemePreference::Dark => "Light mode",
        };
        if ui.button(label).clicked() {
            self.controller.toggle_theme();
        }
    }

    pub(super) fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette(self.controller.ui.theme);
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_paper)
                    .stroke(Stroke::new(1.0, palette.outline))
                    .inner_margin(Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                let status = self.controller.ui.status.clone();
                ui.horizontal(|ui| {
                    ui.add_space(6.0);
                    let (badge_rect, _) =
                        ui.allocate_exact_size(egui::vec2(14.0, 14.0), Sense::hover());
                    ui.painter().rect_filled(badge_rect, 3.0, status.badge_color);
                    ui.painter().rect_stroke(
                        badge_rect,
                        3.0,
                        Stroke::new(1.0, palette.outline),
                        StrokeKind::Inside,
                    );
                    ui.add_space(6.0);
                    ui.label(RichText::new(&status.badge_label).color(palette.text_primary));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(palette.text_primary));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(format!(
                                "Exports: {}",
                                self.controller.export_dir().display()
                            ))
                            .size(11.0)
                            .color(palette.text_muted),
                        );
                    });
                });
            });
    }
}
