//! Single-page PDF exports of a rendered panel.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{DynamicImage, RgbImage};
use printpdf::{Image, ImageTransform, Mm, PdfDocument};
use thiserror::Error;
use time::OffsetDateTime;

use crate::report;

/// Resolution the snapshot pixels are placed at.
pub const EXPORT_DPI: f32 = 144.0;

const MM_PER_INCH: f32 = 25.4;

pub const RESULT_PREFIX: &str = "patient_result";
pub const REPORT_PREFIX: &str = "patient_report";
pub const PLAN_PREFIX: &str = "recommendation_plan";

#[derive(Debug, Error)]
pub enum PdfExportError {
    #[error("Panel snapshot is empty")]
    EmptySnapshot,
    #[error("Panel snapshot has {actual} bytes, expected {expected}")]
    SnapshotSize { expected: usize, actual: usize },
    #[error("PDF generation failed: {0}")]
    Render(String),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Pixels of one rendered panel, row-major RGBA8.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelSnapshot {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl PanelSnapshot {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, PdfExportError> {
        if width == 0 || height == 0 {
            return Err(PdfExportError::EmptySnapshot);
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(PdfExportError::SnapshotSize {
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// Flatten onto a white background; PDF image objects carry no alpha here.
    fn to_rgb(&self) -> RgbImage {
        let mut rgb = Vec::with_capacity(self.width as usize * self.height as usize * 3);
        for px in self.rgba.chunks_exact(4) {
            let alpha = u16::from(px[3]);
            for &channel in &px[..3] {
                let blended = (u16::from(channel) * alpha + 255 * (255 - alpha) + 127) / 255;
                rgb.push(blended as u8);
            }
        }
        RgbImage::from_raw(self.width, self.height, rgb)
            .unwrap_or_else(|| RgbImage::new(self.width, self.height))
    }
}

/// Render `snapshot` as the only content of a page sized to fit it exactly.
pub fn render_pdf(title: &str, snapshot: &PanelSnapshot) -> Result<Vec<u8>, PdfExportError> {
    let width_mm = px_to_mm(snapshot.width);
    let height_mm = px_to_mm(snapshot.height);
    let (doc, page, layer) = PdfDocument::new(title, Mm(width_mm), Mm(height_mm), "Panel");
    let layer = doc.get_page(page).get_layer(layer);
    let image = Image::from_dynamic_image(&DynamicImage::ImageRgb8(snapshot.to_rgb()));
    image.add_to_layer(
        layer,
        ImageTransform {
            dpi: Some(EXPORT_DPI),
            ..Default::default()
        },
    );
    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|err| PdfExportError::Render(err.to_string()))?;
    buf.into_inner()
        .map_err(|err| PdfExportError::Render(err.to_string()))
}

fn px_to_mm(px: u32) -> f32 {
    px as f32 / EXPORT_DPI * MM_PER_INCH
}

/// `<prefix>_<epoch millis>.pdf`, from the report timestamp or `now`.
pub fn export_file_name(prefix: &str, timestamp: Option<&str>, now: OffsetDateTime) -> String {
    let millis = timestamp
        .and_then(|text| {
            OffsetDateTime::parse(text.trim(), &time::format_description::well_known::Rfc3339).ok()
        })
        .map(report::epoch_millis)
        .unwrap_or_else(|| report::epoch_millis(now));
    format!("{prefix}_{millis}.pdf")
}

/// Write `bytes` to `dir/name` without leaving a partial file behind on failure.
pub fn write_export(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf, PdfExportError> {
    let write_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| PdfExportError::Write { path, source }
    };
    std::fs::create_dir_all(dir).map_err(write_err(dir))?;
    let target = dir.join(name);
    let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(write_err(dir))?;
    temp.write_all(bytes).map_err(write_err(&target))?;
    temp.flush().map_err(write_err(&target))?;
    temp.persist(&target).map_err(|err| PdfExportError::Write {
        path: target.clone(),
        source: err.error,
    })?;
    tracing::info!("Exported {}", target.display());
    Ok(target)
}
