//! Data feeding chart, widget and table elements
//!
//! Renderers only see the [`DataSource`] trait. [`SampleDataSource`] is the
//! stand-in used until live telemetry and the alert log are wired in.

pub mod sample;

use chrono::{DateTime, Utc};
use report_types::{AlertData, Period};
use serde::Serialize;

use crate::compiler::EngineError;

pub use sample::SampleDataSource;

/// Series id used when an element has no `config.dataSource`
pub const DEFAULT_SOURCE_ID: &str = "default";

/// One telemetry reading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub unit: String,
}

/// Upstream telemetry and alert log
pub trait DataSource {
    /// Readings of `source_id` within `period`, oldest first
    fn fetch_series(
        &mut self,
        source_id: &str,
        period: &Period,
    ) -> Result<Vec<SeriesPoint>, EngineError>;

    /// Most recent reading of `source_id` within `period`
    fn fetch_latest(
        &mut self,
        source_id: &str,
        period: &Period,
    ) -> Result<Option<SeriesPoint>, EngineError>;

    /// Alerts raised within `period`, in any order
    fn fetch_alerts(&mut self, period: &Period) -> Result<Vec<AlertData>, EngineError>;
}
