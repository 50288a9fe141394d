//! Whole-report assembly

use report_types::Report;

use super::page::PageCompositor;
use super::RenderContext;
use crate::compiler::EngineError;
use crate::data::DataSource;
use crate::docx::Document;

/// `dc:creator` of every generated document
pub const DOCUMENT_CREATOR: &str = "IoT Reporting System";

/// One section per page, in page order
pub fn assemble<D: DataSource + ?Sized>(
    report: &Report,
    ctx: &RenderContext,
    data: &mut D,
) -> Result<Document, EngineError> {
    let mut compositor = PageCompositor::new(ctx, data);

    let sections = report
        .pages
        .iter()
        .map(|page| compositor.compose(page, report))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        report = %report.name,
        sections = sections.len(),
        elements = report.element_count(),
        "Assembled document"
    );

    Ok(Document {
        title: report.name.clone(),
        description: report.description.clone(),
        creator: DOCUMENT_CREATOR.to_string(),
        created_at: ctx.generated_at,
        sections,
    })
}
