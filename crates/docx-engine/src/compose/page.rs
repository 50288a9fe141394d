//! One report page to one document section

use report_types::{Orientation, Page, PageSize, Report};

use super::elements::ElementRenderer;
use super::RenderContext;
use crate::compiler::EngineError;
use crate::data::DataSource;
use crate::docx::{Block, PageSetup, Paragraph, RunStyle, Section};
use crate::placeholder;
use crate::style::units::cm_to_twips;
use crate::style::{FontRole, StyleCascade};

/// Header/footer distance when the page does not give a height (1.25 cm)
pub const DEFAULT_STORY_DISTANCE: u32 = 708;

pub const PAGE_NUMBER_PREFIX: &str = " - Page ";

/// Portrait (width, height) in twips; landscape swaps them
pub fn page_dimensions(size: PageSize, orientation: Orientation) -> (u32, u32) {
    let (width, height) = match size {
        PageSize::A3 => (11906, 16838),
        PageSize::Letter => (12240, 15840),
        PageSize::A4 | PageSize::Other => (8391, 11906),
    };

    match orientation {
        Orientation::Portrait => (width, height),
        Orientation::Landscape => (height, width),
    }
}

fn story_distance(height_cm: Option<f64>) -> u32 {
    height_cm
        .and_then(|cm| u32::try_from(cm_to_twips(cm)).ok())
        .unwrap_or(DEFAULT_STORY_DISTANCE)
}

/// Builds sections, one page at a time
pub struct PageCompositor<'r, D: DataSource + ?Sized> {
    ctx: &'r RenderContext,
    renderer: ElementRenderer<'r, D>,
}

impl<'r, D: DataSource + ?Sized> PageCompositor<'r, D> {
    pub fn new(ctx: &'r RenderContext, data: &'r mut D) -> Self {
        Self {
            ctx,
            renderer: ElementRenderer::new(ctx, data),
        }
    }

    /// Geometry, header, footer and every element of `page`, in order
    pub fn compose(&mut self, page: &Page, report: &Report) -> Result<Section, EngineError> {
        let cascade = StyleCascade::for_page(report, page);

        if page.overflows_layout() {
            tracing::debug!(
                page = page.page_number,
                elements = page.elements.len(),
                capacity = page.layout.capacity(),
                "More elements than layout slots, rendering all of them"
            );
        }

        let (width, height) = page_dimensions(page.size, page.orientation);
        let setup = PageSetup {
            width,
            height,
            orientation: page.orientation,
            margins: cascade.resolve_margins(),
            header_distance: story_distance(page.header.as_ref().and_then(|h| h.height)),
            footer_distance: story_distance(page.footer.as_ref().and_then(|f| f.height)),
        };

        let placeholders = self.ctx.placeholders(&report.name);

        // Headers are always bold; the role only picks font, size and color
        let header = page.active_header().map(|config| {
            let style = RunStyle::from_font(&cascade.resolve_font(FontRole::Header)).bold(true);
            let text = placeholder::expand(&config.content, &placeholders);
            vec![Paragraph::text(text, style).centered()]
        });

        let footer = page.active_footer().map(|config| {
            let style = RunStyle::from_font(&cascade.resolve_font(FontRole::Footer));
            let text = placeholder::expand(&config.content, &placeholders);
            let mut paragraph = Paragraph::text(text, style.clone()).centered();
            if config.show_page_number {
                paragraph = paragraph
                    .run(PAGE_NUMBER_PREFIX, style.clone())
                    .page_number(style);
            }
            vec![paragraph]
        });

        let mut blocks = Vec::new();
        for element in &page.elements {
            let element_cascade = StyleCascade::for_element(report, page, element);
            let spacing = element_cascade.resolve_spacing();
            let title_style = RunStyle::from_font(&element_cascade.resolve_font(FontRole::Title));

            blocks.push(Block::from(
                Paragraph::text(element.title.clone(), title_style)
                    .heading(2)
                    .spacing(Some(spacing.section_twips), Some(spacing.paragraph_twips)),
            ));
            blocks.extend(self.renderer.render(element, page, report)?);
        }

        Ok(Section {
            page: setup,
            header,
            footer,
            blocks,
        })
    }
}
