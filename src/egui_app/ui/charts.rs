//! Painter-drawn gauge, bars and line chart.

use eframe::egui::{
    self, Align2, Color32, CornerRadius, FontId, Pos2, Rect, Sense, Shape, Stroke, Ui, pos2, vec2,
};

use super::style::Palette;
use crate::report::RocPoint;

const LABEL_COLUMN: f32 = 120.0;
const VALUE_COLUMN: f32 = 56.0;
const BAR_ROW_HEIGHT: f32 = 26.0;
const GRID_STEPS: usize = 4;

/// One horizontal bar: label, length in `0..=scale`, and the text printed after it.
pub(super) struct BarRow<'a> {
    pub name: &'a str,
    pub value: f64,
    pub caption: String,
}

/// Circular badge filled with the risk colour and showing the percentage.
pub(super) fn gauge(ui: &mut Ui, percent: i64, fill: Color32, text: Color32, diameter: f32) {
    let (rect, _) = ui.allocate_exact_size(vec2(diameter, diameter), Sense::hover());
    let painter = ui.painter_at(rect);
    let radius = diameter / 2.0;
    painter.circle_filled(rect.center(), radius, fill.gamma_multiply(0.35));
    painter.circle_filled(rect.center(), radius * 0.82, fill);
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        format!("{percent}%"),
        FontId::proportional(diameter * 0.2),
        text,
    );
}

/// Thin track with a filled portion proportional to `fraction`.
pub(super) fn progress_bar(ui: &mut Ui, fraction: f64, fill: Color32, palette: Palette) {
    let width = ui.available_width().clamp(120.0, 480.0);
    let (rect, _) = ui.allocate_exact_size(vec2(width, 12.0), Sense::hover());
    let rounding = CornerRadius::same(6);
    ui.painter().rect_filled(rect, rounding, palette.track);
    let filled = fill_width(fraction, 1.0, rect.width());
    if filled > 0.0 {
        let bar = Rect::from_min_size(rect.min, vec2(filled, rect.height()));
        ui.painter().rect_filled(bar, rounding, fill);
    }
}

/// Ranked horizontal bar chart scaled to the largest row.
pub(super) fn horizontal_bars(ui: &mut Ui, rows: &[BarRow<'_>], fill: Color32, palette: Palette) {
    if rows.is_empty() {
        ui.label(egui::RichText::new("No data").color(palette.text_muted));
        return;
    }
    let scale = rows
        .iter()
        .map(|row| row.value)
        .filter(|value| value.is_finite())
        .fold(0.0_f64, f64::max);
    let width = ui.available_width().max(LABEL_COLUMN + VALUE_COLUMN + 60.0);
    let height = BAR_ROW_HEIGHT * rows.len() as f32;
    let (rect, _) = ui.allocate_exact_size(vec2(width, height), Sense::hover());
    let painter = ui.painter_at(rect);
    let track_left = rect.left() + LABEL_COLUMN;
    let track_width = (rect.width() - LABEL_COLUMN - VALUE_COLUMN).max(1.0);
    for step in 0..=GRID_STEPS {
        let x = track_left + track_width * step as f32 / GRID_STEPS as f32;
        painter.line_segment(
            [pos2(x, rect.top()), pos2(x, rect.bottom())],
            Stroke::new(1.0, palette.outline),
        );
    }
    for (idx, row) in rows.iter().enumerate() {
        let top = rect.top() + BAR_ROW_HEIGHT * idx as f32;
        let mid = top + BAR_ROW_HEIGHT / 2.0;
        painter.text(
            pos2(track_left - 8.0, mid),
            Align2::RIGHT_CENTER,
            row.name,
            FontId::proportional(13.0),
            palette.text_primary,
        );
        let length = fill_width(row.value, scale, track_width);
        let bar = Rect::from_min_size(pos2(track_left, top + 5.0), vec2(length, BAR_ROW_HEIGHT - 10.0));
        painter.rect_filled(bar, CornerRadius::same(3), fill);
        painter.text(
            pos2(track_left + length + 6.0, mid),
            Align2::LEFT_CENTER,
            &row.caption,
            FontId::proportional(12.0),
            palette.text_muted,
        );
    }
}

/// ROC-style polyline on the unit square with a dashed chance diagonal.
pub(super) fn roc_chart(ui: &mut Ui, points: &[RocPoint], stroke: Color32, palette: Palette) {
    let width = ui.available_width().max(200.0);
    let (outer, _) = ui.allocate_exact_size(vec2(width, 220.0), Sense::hover());
    let painter = ui.painter_at(outer);
    let plot = Rect::from_min_max(outer.min + vec2(36.0, 8.0), outer.max - vec2(8.0, 24.0));
    let grid = Stroke::new(1.0, palette.outline);
    for step in 0..=GRID_STEPS {
        let t = step as f64 / GRID_STEPS as f64;
        let x = plot_point(plot, t, 0.0).x;
        let y = plot_point(plot, 0.0, t).y;
        painter.line_segment([pos2(x, plot.top()), pos2(x, plot.bottom())], grid);
        painter.line_segment([pos2(plot.left(), y), pos2(plot.right(), y)], grid);
        painter.text(
            pos2(plot.left() - 4.0, y),
            Align2::RIGHT_CENTER,
            format!("{t:.2}"),
            FontId::proportional(10.0),
            palette.text_muted,
        );
        painter.text(
            pos2(x, plot.bottom() + 4.0),
            Align2::CENTER_TOP,
            format!("{t:.2}"),
            FontId::proportional(10.0),
            palette.text_muted,
        );
    }
    painter.extend(Shape::dashed_line(
        &[plot.left_bottom(), plot.right_top()],
        Stroke::new(1.0, palette.text_muted),
        4.0,
        4.0,
    ));
    let line: Vec<Pos2> = points
        .iter()
        .map(|point| plot_point(plot, point.fpr, point.tpr))
        .collect();
    painter.add(Shape::line(line.clone(), Stroke::new(2.0, stroke)));
    for pos in line {
        painter.circle_filled(pos, 3.0, stroke);
    }
}

/// Map a value in the unit square onto `plot`, clamping out-of-range input.
fn plot_point(plot: Rect, x: f64, y: f64) -> Pos2 {
    let x = unit(x) as f32;
    let y = unit(y) as f32;
    pos2(
        plot.left() + plot.width() * x,
        plot.bottom() - plot.height() * y,
    )
}

/// Pixel length of a bar for `value` against `scale`.
fn fill_width(value: f64, scale: f64, available: f32) -> f32 {
    if scale.is_nan() || scale <= 0.0 {
        return 0.0;
    }
    (unit(value / scale) as f32) * available
}

fn unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
