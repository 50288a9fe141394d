//! Document settings layers
//!
//! A single [`DocumentSettings`] type is used for the report defaults and for
//! page or element overrides. Every key is optional; a layer only carries the
//! keys it wants to change and the resolver in `docx-engine` merges layers
//! key by key.

use serde::{Deserialize, Serialize};

pub const DEFAULT_FONT_NAME: &str = "Calibri";
pub const DEFAULT_MARGIN_CM: f64 = 2.5;

/// One layer of document styling (report defaults, page or element override)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margins: Option<Margins>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fonts: Option<Fonts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<Spacing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Colors>,
}

/// Page margins in centimeters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
    pub right: Option<f64>,
}

/// Font specification per text role
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fonts {
    pub title: Option<FontSpec>,
    pub body: Option<FontSpec>,
    pub header: Option<FontSpec>,
    pub footer: Option<FontSpec>,
}

/// A font override; `size` is in points
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub name: Option<String>,
    pub size: Option<f64>,
    pub bold: Option<bool>,
}

/// Paragraph spacing in points, line height as a multiplier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spacing {
    pub line_height: Option<f64>,
    pub paragraph_spacing: Option<f64>,
    pub section_spacing: Option<f64>,
}

/// Palette as `#RRGGBB` strings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Colors {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub text: Option<String>,
    pub accent: Option<String>,
}

impl FontSpec {
    fn new(size: f64, bold: bool) -> Self {
        Self {
            name: Some(DEFAULT_FONT_NAME.to_string()),
            size: Some(size),
            bold: Some(bold),
        }
    }
}

impl DocumentSettings {
    /// Built-in settings applied when no layer specifies a key.
    ///
    /// These are also the values the editor seeds a new report with.
    pub fn builtin() -> Self {
        Self {
            margins: Some(Margins {
                top: Some(DEFAULT_MARGIN_CM),
                bottom: Some(DEFAULT_MARGIN_CM),
                left: Some(DEFAULT_MARGIN_CM),
                right: Some(DEFAULT_MARGIN_CM),
            }),
            fonts: Some(Fonts {
                title: Some(FontSpec::new(16.0, true)),
                body: Some(FontSpec::new(11.0, false)),
                header: Some(FontSpec::new(10.0, true)),
                footer: Some(FontSpec::new(9.0, false)),
            }),
            spacing: Some(Spacing {
                line_height: Some(1.15),
                paragraph_spacing: Some(6.0),
                section_spacing: Some(12.0),
            }),
            colors: Some(Colors {
                primary: Some("#2563EB".to_string()),
                secondary: Some("#64748B".to_string()),
                text: Some("#1F2937".to_string()),
                accent: Some("#059669".to_string()),
            }),
        }
    }

    /// True when the layer carries no keys at all
    pub fn is_empty(&self) -> bool {
        self.margins.is_none()
            && self.fonts.is_none()
            && self.spacing.is_none()
            && self.colors.is_none()
    }
}
