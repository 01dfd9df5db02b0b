//! Desktop UI: controller, state model and egui renderer.

pub mod controller;
pub mod state;
pub mod ui;
