use super::style;
use super::*;
use crate::egui_app::state::StatusTone;
use eframe::egui::{Align2, RichText};

impl EguiApp {
    pub(super) fn render_alert(&mut self, ctx: &egui::Context) {
        let Some(alert) = self.controller.ui.alert.clone() else {
            return;
        };
        if ctx.input(|i| i.key_pressed(egui::Key::Escape) || i.key_pressed(egui::Key::Enter)) {
            self.controller.dismiss_alert();
            return;
        }
        self.render_alert_backdrop(ctx);

        let palette = style::palette(self.controller.ui.theme);
        let mut open = true;
        let mut dismissed = false;
        egui::Window::new(alert.title.as_str())
            .id(egui::Id::new("alert_window"))
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .order(egui::Order::Foreground)
            .collapsible(false)
            .resizable(false)
            .default_width(360.0)
            .open(&mut open)
            .show(ctx, |ui| {
                let color = match alert.tone {
                    StatusTone::Error => palette.error,
                    _ => palette.text_primary,
                };
                ui.label(RichText::new(&alert.message).color(color));
                ui.add_space(12.0);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });
        if !open || dismissed {
            self.controller.dismiss_alert();
        }
    }

    fn render_alert_backdrop(&self, ctx: &egui::Context) {
        let rect = ctx.viewport_rect();
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Background,
            egui::Id::new("alert_backdrop_paint"),
        ));
        painter.rect_filled(rect, 0.0, egui::Color32::from_rgba_premultiplied(0, 0, 0, 120));

        egui::Area::new(egui::Id::new("alert_backdrop_blocker"))
            .order(egui::Order::Middle)
            .fixed_pos(rect.min)
            .show(ctx, |ui| {
                ui.allocate_rect(rect, egui::Sense::click_and_drag());
            });
    }
}
