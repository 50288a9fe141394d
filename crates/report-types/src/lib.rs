//! Report model shared by the docx engine and the report server
//!
//! The types mirror the JSON the report editor posts (camelCase keys) and are
//! consumed read-only by the compiler.

pub mod element;
pub mod lifecycle;
pub mod page;
pub mod report;
pub mod settings;

pub use element::{
    AlertData, AlertLevel, Element, ElementKind, ElementSize, GridPosition, NO_REMARK,
};
pub use lifecycle::{LifecycleError, ReportStatus};
pub use page::{FooterConfig, HeaderConfig, Orientation, Page, PageLayout, PageSize};
pub use report::{Frequency, FtpConfig, Period, Report, Schedule};
pub use settings::{Colors, DocumentSettings, FontSpec, Fonts, Margins, Spacing};
