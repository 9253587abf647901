//! Highwater Runner: two-provider orchestration, reconciliation, report.
//!
//! This crate builds on `highwater-core` to provide:
//! - Run configuration with production defaults
//! - The per-provider pipeline (fetch → gap check → signal)
//! - Date-keyed reconciliation of the two providers and the validity verdict
//! - The fixed-format text report

pub mod config;
pub mod pipeline;
pub mod reconcile;
pub mod report;

pub use config::SignalConfig;
pub use pipeline::{run_pipeline, run_provider, PipelineError};
pub use reconcile::{ComparisonReport, ComparisonRow, Validity};
pub use report::{ReportLine, SignalReport};
