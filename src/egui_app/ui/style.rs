use eframe::egui::{
    Color32, Frame, Margin, Stroke, Visuals,
    epaint::{CornerRadius, Shadow},
    style::WidgetVisuals,
};

use crate::insights::RiskCategory;
use crate::prediction::HealthStatus;
use crate::store::ThemePreference;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub bg_primary: Color32,
    pub bg_paper: Color32,
    pub bg_code: Color32,
    pub track: Color32,
    pub outline: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent: Color32,
    pub error: Color32,
}

pub fn palette(theme: ThemePreference) -> Palette {
    match theme {
        ThemePreference::Light => Palette {
            bg_primary: Color32::from_rgb(0xf3, 0xf4, 0xf6),
            bg_paper: Color32::WHITE,
            bg_code: Color32::from_rgb(0xf8, 0xfa, 0xfc),
            track: Color32::from_rgb(0xf1, 0xf5, 0xf9),
            outline: Color32::from_rgb(0xe5, 0xe7, 0xeb),
            text_primary: Color32::from_rgb(0x0f, 0x17, 0x2a),
            text_muted: Color32::from_rgb(0x6b, 0x72, 0x80),
            accent: Color32::from_rgb(0x25, 0x63, 0xeb),
            error: Color32::from_rgb(0xd3, 0x2f, 0x2f),
        },
        ThemePreference::Dark => Palette {
            bg_primary: Color32::from_rgb(0x0b, 0x12, 0x20),
            bg_paper: Color32::from_rgb(0x07, 0x10, 0x24),
            bg_code: Color32::from_rgb(0x0f, 0x1a, 0x30),
            track: Color32::from_rgb(0x1e, 0x29, 0x3b),
            outline: Color32::from_rgb(0x1f, 0x2a, 0x40),
            text_primary: Color32::from_rgb(0xe6, 0xee, 0xf8),
            text_muted: Color32::from_rgb(0x94, 0xa3, 0xb8),
            accent: Color32::from_rgb(0x60, 0xa5, 0xfa),
            error: Color32::from_rgb(0xf8, 0x71, 0x71),
        },
    }
}

pub fn apply_visuals(visuals: &mut Visuals, theme: ThemePreference) {
    let palette = palette(theme);
    visuals.window_fill = palette.bg_paper;
    visuals.panel_fill = palette.bg_primary;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.hyperlink_color = palette.accent;
    visuals.extreme_bg_color = palette.bg_code;
    visuals.faint_bg_color = palette.bg_paper;
    visuals.error_fg_color = palette.error;
    visuals.selection.bg_fill = palette.accent.gamma_multiply(0.35);
    visuals.selection.stroke = Stroke::new(1.0, palette.accent);
    visuals.widgets.noninteractive.bg_fill = palette.bg_paper;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text_primary);
    set_rounded(&mut visuals.widgets.inactive, palette);
    set_rounded(&mut visuals.widgets.hovered, palette);
    set_rounded(&mut visuals.widgets.active, palette);
    set_rounded(&mut visuals.widgets.open, palette);
    visuals.window_corner_radius = CornerRadius::same(12);
    visuals.popup_shadow = Shadow::NONE;
}

fn set_rounded(vis: &mut WidgetVisuals, palette: Palette) {
    vis.corner_radius = CornerRadius::same(6);
    vis.bg_stroke = Stroke::new(1.0, palette.outline);
}

/// Raised surface holding one block of a view.
pub fn card(palette: Palette) -> Frame {
    Frame::new()
        .fill(palette.bg_paper)
        .stroke(Stroke::new(1.0, palette.outline))
        .corner_radius(CornerRadius::same(10))
        .inner_margin(Margin::same(18))
}

pub fn code_block(palette: Palette) -> Frame {
    Frame::new()
        .fill(palette.bg_code)
        .corner_radius(CornerRadius::same(6))
        .inner_margin(Margin::same(10))
}

/// Fill used by the gauge and probability bar.
pub fn risk_fill(category: RiskCategory) -> Color32 {
    match category {
        RiskCategory::High => Color32::from_rgb(0xf4, 0x3f, 0x5e),
        RiskCategory::Moderate => Color32::from_rgb(0xf5, 0x9e, 0x0b),
        RiskCategory::Low => Color32::from_rgb(0x10, 0xb9, 0x81),
        RiskCategory::Unknown => Color32::from_rgb(0x9c, 0xa3, 0xaf),
    }
}

/// Text colour for a headline risk percentage.
pub fn risk_text(category: RiskCategory) -> Color32 {
    match category {
        RiskCategory::High => Color32::from_rgb(0xb9, 0x1c, 0x1c),
        RiskCategory::Moderate => Color32::from_rgb(0xb4, 0x53, 0x09),
        RiskCategory::Low => Color32::from_rgb(0x06, 0x5f, 0x46),
        RiskCategory::Unknown => Color32::from_rgb(0x37, 0x41, 0x51),
    }
}

pub fn backend_dot(status: HealthStatus) -> Color32 {
    match status {
        HealthStatus::Up => Color32::from_rgb(0x16, 0xa3, 0x4a),
        HealthStatus::Down => Color32::from_rgb(0xef, 0x44, 0x44),
        HealthStatus::Unknown => Color32::from_rgb(0x9c, 0xa3, 0xaf),
    }
}
