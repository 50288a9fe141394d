//! Layered style resolution
//!
//! Layers are plain [`DocumentSettings`] values pushed from the least to the
//! most specific scope (report, page, element). Each key is looked up in the
//! most specific layer that sets it, then in the built-in defaults.

use once_cell::sync::Lazy;
use report_types::settings::DEFAULT_FONT_NAME;
use report_types::{DocumentSettings, Element, FontSpec, Fonts, Page, Report};
use serde::Serialize;

use super::units::{bare_hex, cm_to_twips, line_height_to_native, pt_to_half_points, pt_to_twips};

static BUILTIN: Lazy<DocumentSettings> = Lazy::new(DocumentSettings::builtin);

/// Text role a run is styled for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontRole {
    Title,
    Body,
    Header,
    Footer,
}

impl FontRole {
    fn spec(self, fonts: &Fonts) -> Option<&FontSpec> {
        match self {
            FontRole::Title => fonts.title.as_ref(),
            FontRole::Body => fonts.body.as_ref(),
            FontRole::Header => fonts.header.as_ref(),
            FontRole::Footer => fonts.footer.as_ref(),
        }
    }

    fn color_role(self) -> ColorRole {
        match self {
            FontRole::Title => ColorRole::Primary,
            FontRole::Body | FontRole::Header | FontRole::Footer => ColorRole::Text,
        }
    }
}

/// Palette entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRole {
    Primary,
    Secondary,
    Text,
    Accent,
}

/// Effective font for a role, in native units
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFont {
    pub font_name: String,
    pub size_half_points: u32,
    pub bold: bool,
    pub color_hex: String,
}

/// Page margins in twips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMargins {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

/// Effective spacing in native units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSpacing {
    /// 240ths of a line
    pub line: u32,
    pub paragraph_twips: u32,
    pub section_twips: u32,
}

/// Ordered stack of settings layers
#[derive(Debug, Clone, Default)]
pub struct StyleCascade<'a> {
    layers: Vec<&'a DocumentSettings>,
}

impl<'a> StyleCascade<'a> {
    /// Start a cascade from the report-level settings, if any
    pub fn new(base: Option<&'a DocumentSettings>) -> Self {
        Self::default().with(base)
    }

    /// Push a more specific layer. `None` is an empty layer.
    pub fn with(mut self, layer: Option<&'a DocumentSettings>) -> Self {
        if let Some(layer) = layer {
            self.layers.push(layer);
        }
        self
    }

    /// Report ⊕ page
    pub fn for_page(report: &'a Report, page: &'a Page) -> Self {
        Self::new(report.document_settings.as_ref()).with(page.settings.as_ref())
    }

    /// Report ⊕ page ⊕ element
    pub fn for_element(report: &'a Report, page: &'a Page, element: &'a Element) -> Self {
        Self::for_page(report, page).with(element.settings.as_ref())
    }

    fn pick<T>(&self, get: impl Fn(&'a DocumentSettings) -> Option<T>) -> Option<T> {
        self.layers
            .iter()
            .rev()
            .find_map(|layer| get(*layer))
            .or_else(|| get(&*BUILTIN))
    }

    fn pick_font<T>(&self, role: FontRole, get: impl Fn(&'a FontSpec) -> Option<T>) -> Option<T> {
        self.pick(|layer| layer.fonts.as_ref().and_then(|f| role.spec(f)).and_then(&get))
    }

    /// Effective font for a text role
    pub fn resolve_font(&self, role: FontRole) -> ResolvedFont {
        let font_name = self
            .pick_font(role, |spec| spec.name.as_deref())
            .unwrap_or(DEFAULT_FONT_NAME);
        let size = self.pick_font(role, |spec| spec.size).unwrap_or(11.0);
        let bold = self.pick_font(role, |spec| spec.bold).unwrap_or(false);

        ResolvedFont {
            font_name: font_name.to_string(),
            size_half_points: pt_to_half_points(size),
            bold,
            color_hex: self.resolve_color(role.color_role()),
        }
    }

    /// Effective palette entry, without the leading `#`
    pub fn resolve_color(&self, role: ColorRole) -> String {
        let color = self
            .pick(|layer| {
                let colors = layer.colors.as_ref()?;
                match role {
                    ColorRole::Primary => colors.primary.as_deref(),
                    ColorRole::Secondary => colors.secondary.as_deref(),
                    ColorRole::Text => colors.text.as_deref(),
                    ColorRole::Accent => colors.accent.as_deref(),
                }
            })
            .unwrap_or("000000");
        bare_hex(color).to_string()
    }

    /// Effective page margins
    pub fn resolve_margins(&self) -> PageMargins {
        let side = |get: fn(&report_types::Margins) -> Option<f64>| {
            let cm = self
                .pick(|layer| layer.margins.as_ref().and_then(get))
                .unwrap_or(report_types::settings::DEFAULT_MARGIN_CM);
            cm_to_twips(cm)
        };

        PageMargins {
            top: side(|m| m.top),
            bottom: side(|m| m.bottom),
            left: side(|m| m.left),
            right: side(|m| m.right),
        }
    }

    /// Effective line and paragraph spacing
    pub fn resolve_spacing(&self) -> ResolvedSpacing {
        let line = self
            .pick(|layer| layer.spacing.as_ref()?.line_height)
            .unwrap_or(1.0);
        let paragraph = self
            .pick(|layer| layer.spacing.as_ref()?.paragraph_spacing)
            .unwrap_or(0.0);
        let section = self
            .pick(|layer| layer.spacing.as_ref()?.section_spacing)
            .unwrap_or(0.0);

        ResolvedSpacing {
            line: line_height_to_native(line),
            paragraph_twips: pt_to_twips(paragraph),
            section_twips: pt_to_twips(section),
        }
    }
}
