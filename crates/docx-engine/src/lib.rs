//! Report to DOCX compiler
//!
//! This crate turns a [`report_types::Report`] into a Word document:
//! - Unit conversion and the report → page → element style cascade
//! - Header/footer placeholder expansion
//! - Element rendering (chart, widget, table, text) over a pluggable data source
//! - Page composition and OOXML packaging
//!
//! # Feature Flags
//!
//! - `server` (default): Enables async `generate_document` with timeout (requires tokio)

pub mod compiler;
pub mod compose;
pub mod data;
pub mod docx;
pub mod placeholder;
pub mod style;

// Always export the sync entry points
pub use compiler::{
    generate, generate_from_json, generate_with_source, outline, parse_report, EngineError,
    GeneratedDocument, RenderOptions,
};
pub use data::{DataSource, SampleDataSource};
pub use docx::DOCX_MIME;

// Export async version only with server feature
#[cfg(feature = "server")]
pub use compiler::{generate_document, outline_document};
