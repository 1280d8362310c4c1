//! Facet Editor
//!
//! egui-based desktop scene editor with GPU triangle picking.

mod app;
mod config;
mod panels;
mod state;
mod viewport_state;

pub use app::FacetApp;
pub use config::{AppConfig, ConfigManager};
