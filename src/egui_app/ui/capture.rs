//! Viewport screenshot handling for PDF export.

use std::sync::Arc;

use super::*;
use crate::pdf_export::{PanelSnapshot, PdfExportError};
use eframe::egui::{ColorImage, Event, UserData, ViewportCommand};

impl EguiApp {
    /// Wrap the exportable part of a view so its screen rectangle can be captured.
    pub(super) fn printable_panel(
        &mut self,
        ui: &mut egui::Ui,
        kind: PdfKind,
        frame: egui::Frame,
        add_contents: impl FnOnce(&mut Self, &mut egui::Ui),
    ) {
        let response = frame.show(ui, |ui| add_contents(self, ui)).response;
        let visible = response.rect.intersect(ui.clip_rect());
        self.printable = Some((kind, visible));
    }

    /// Advance a pending export: request a screenshot, then crop it once it arrives.
    pub(super) fn drive_pdf_capture(&mut self, ctx: &egui::Context) {
        let Some(kind) = self.controller.capture_pending() else {
            return;
        };
        let screenshot = ctx.input(|i| {
            i.events.iter().find_map(|event| match event {
                Event::Screenshot { image, .. } => Some(Arc::clone(image)),
                _ => None,
            })
        });
        let panel = self
            .printable
            .filter(|(drawn, _)| *drawn == kind)
            .map(|(_, rect)| rect);
        match (screenshot, panel) {
            (Some(image), Some(rect)) => {
                match crop_panel(&image, rect, ctx.pixels_per_point()) {
                    Ok(snapshot) => self.controller.complete_pdf_capture(snapshot),
                    Err(err) => self.controller.fail_pdf_export(err.to_string()),
                }
            }
            (Some(_), None) => {
                self.controller
                    .fail_pdf_export("The panel was no longer visible.");
            }
            (None, _) => {
                if self.controller.take_capture_request().is_some() {
                    ctx.send_viewport_cmd(ViewportCommand::Screenshot(UserData::default()));
                } else {
                    self.controller.note_capture_frame();
                }
                ctx.request_repaint();
            }
        }
    }
}

/// Copy the pixels under `rect` (in points) out of a full-viewport screenshot.
fn crop_panel(
    image: &ColorImage,
    rect: egui::Rect,
    pixels_per_point: f32,
) -> Result<PanelSnapshot, PdfExportError> {
    let [image_width, image_height] = image.size;
    let to_px = |value: f32, limit: usize| -> usize {
        let scaled = (value * pixels_per_point).round();
        if scaled.is_finite() && scaled > 0.0 {
            (scaled as usize).min(limit)
        } else {
            0
        }
    };
    let (x0, x1) = (to_px(rect.min.x, image_width), to_px(rect.max.x, image_width));
    let (y0, y1) = (to_px(rect.min.y, image_height), to_px(rect.max.y, image_height));
    if x0 >= x1 || y0 >= y1 {
        return Err(PdfExportError::EmptySnapshot);
    }
    let (width, height) = (x1 - x0, y1 - y0);
    let mut rgba = Vec::with_capacity(width * height * 4);
    for y in y0..y1 {
        let row = y * image_width;
        for pixel in &image.pixels[row + x0..row + x1] {
            rgba.extend_from_slice(&pixel.to_srgba_unmultiplied());
        }
    }
    PanelSnapshot::new(width as u32, height as u32, rgba)
}
