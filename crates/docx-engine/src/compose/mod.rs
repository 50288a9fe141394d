//! Report to document tree
//!
//! [`assemble`] walks the report page by page. Each page goes through the
//! [`PageCompositor`], which asks the [`ElementRenderer`] for the body of every
//! element.

pub mod assemble;
pub mod elements;
pub mod page;

use chrono::{DateTime, Utc};

use crate::placeholder::PlaceholderContext;

pub use assemble::{assemble, DOCUMENT_CREATOR};
pub use elements::{ElementRenderer, WidgetStatus};
pub use page::{page_dimensions, PageCompositor};

/// Clock and formatting shared by every page of one render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    pub generated_at: DateTime<Utc>,
    pub date_format: String,
    pub time_format: String,
}

impl RenderContext {
    pub fn new(
        generated_at: DateTime<Utc>,
        date_format: impl Into<String>,
        time_format: impl Into<String>,
    ) -> Self {
        Self {
            generated_at,
            date_format: date_format.into(),
            time_format: time_format.into(),
        }
    }

    pub fn format_date(&self, at: &DateTime<Utc>) -> String {
        at.format(&self.date_format).to_string()
    }

    pub fn format_time(&self, at: &DateTime<Utc>) -> String {
        at.format(&self.time_format).to_string()
    }

    /// Date then time, space separated
    pub fn format_datetime(&self, at: &DateTime<Utc>) -> String {
        format!("{} {}", self.format_date(at), self.format_time(at))
    }

    /// Token values for header and footer templates
    pub fn placeholders(&self, report_name: &str) -> PlaceholderContext {
        PlaceholderContext {
            date: self.format_date(&self.generated_at),
            time: self.format_time(&self.generated_at),
            report_name: report_name.to_string(),
        }
    }
}
