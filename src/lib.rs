//! Heart-disease risk screening client: form inputs, a remote prediction
//! service, a locally persisted report and the views derived from it.

/// Per-user application directories.
pub mod app_dirs;
/// TOML-backed application settings.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Patient inputs and the feature vector sent for prediction.
pub mod features;
/// Bounded response reading for HTTP calls.
pub mod http_client;
/// Risk buckets, factor ranking and advice tables.
pub mod insights;
/// Tracing subscriber setup.
pub mod logging;
/// Panel snapshot to PDF conversion and export writing.
pub mod pdf_export;
/// Prediction service boundary.
pub mod prediction;
/// The persisted prediction report.
pub mod report;
/// File-backed key-value storage for the report, history and theme.
pub mod store;
