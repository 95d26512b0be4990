//! attendance-chart: attendance charting engine and data normalizer.
//!
//! This crate turns raw meetup API payloads into canonical records and renders
//! per-city attendance as a diffable line-chart scene with tooltip interaction.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod model;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, LinesChart, RenderOutcome};
pub use error::{ChartError, ChartResult};
