//! Report compilation entry points

pub mod errors;
pub mod output;
#[cfg(feature = "server")]
pub mod render;

pub use errors::EngineError;
pub use output::GeneratedDocument;
#[cfg(feature = "server")]
pub use render::{generate_document, outline_document};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use report_types::Report;
use serde::{Deserialize, Serialize};

use crate::compose::{assemble, RenderContext};
use crate::data::{DataSource, SampleDataSource};
use crate::docx::{write_package, Document};

pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";

/// Knobs that make a render reproducible
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    /// Seed for the sample data source; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Clock used for placeholders and document metadata; now when absent
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
    /// `strftime` pattern for dates
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// `strftime` pattern for times
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_time_format() -> String {
    DEFAULT_TIME_FORMAT.to_string()
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            seed: None,
            generated_at: None,
            date_format: default_date_format(),
            time_format: default_time_format(),
        }
    }
}

impl RenderOptions {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    /// Reject date/time patterns chrono cannot format
    pub fn validate(&self) -> Result<(), EngineError> {
        validate_pattern("date", &self.date_format)?;
        validate_pattern("time", &self.time_format)
    }

    /// Freeze the clock for one render
    pub fn context(&self) -> Result<RenderContext, EngineError> {
        self.validate()?;
        Ok(RenderContext::new(
            self.generated_at.unwrap_or_else(Utc::now),
            self.date_format.clone(),
            self.time_format.clone(),
        ))
    }
}

fn validate_pattern(which: &str, pattern: &str) -> Result<(), EngineError> {
    if pattern.trim().is_empty() {
        return Err(EngineError::InvalidOptions(format!("empty {} format", which)));
    }
    // Formatting an invalid pattern panics inside chrono's Display impl
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(EngineError::InvalidOptions(format!(
            "invalid {} format {:?}",
            which, pattern
        )));
    }
    Ok(())
}

/// Decode a report from its JSON wire form
pub fn parse_report(bytes: &[u8]) -> Result<Report, EngineError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Compile a report with the sample data source
pub fn generate(
    report: &Report,
    options: &RenderOptions,
) -> Result<GeneratedDocument, EngineError> {
    match options.seed {
        Some(seed) => generate_with_source(report, options, &mut SampleDataSource::seeded(seed)),
        None => generate_with_source(report, options, &mut SampleDataSource::from_entropy()),
    }
}

/// Compile a report against any data source
pub fn generate_with_source<D: DataSource + ?Sized>(
    report: &Report,
    options: &RenderOptions,
    data: &mut D,
) -> Result<GeneratedDocument, EngineError> {
    let ctx = options.context()?;
    let document = assemble(report, &ctx, data)?;
    let bytes = write_package(&document)?;

    tracing::info!(
        report = %report.name,
        pages = document.sections.len(),
        bytes = bytes.len(),
        "Generated document"
    );

    Ok(GeneratedDocument {
        bytes,
        filename: output::file_name(&report.name),
        page_count: document.sections.len(),
    })
}

/// Decode and compile in one step; decoding failures are content errors
pub fn generate_from_json(
    bytes: &[u8],
    options: &RenderOptions,
) -> Result<GeneratedDocument, EngineError> {
    let report = parse_report(bytes)?;
    generate(&report, options)
}

/// The document tree without packaging, for previews
pub fn outline(report: &Report, options: &RenderOptions) -> Result<Document, EngineError> {
    let ctx = options.context()?;
    match options.seed {
        Some(seed) => assemble(report, &ctx, &mut SampleDataSource::seeded(seed)),
        None => assemble(report, &ctx, &mut SampleDataSource::from_entropy()),
    }
}
