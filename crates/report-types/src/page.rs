use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::settings::DocumentSettings;

/// Page orientation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Named paper size; anything unrecognized is laid out as A4
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    A4,
    A3,
    Letter,
    #[serde(other)]
    Other,
}

/// Editor grid for a page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLayout {
    #[serde(rename = "1x1")]
    Single,
    #[default]
    #[serde(rename = "1x2")]
    TwoRows,
    #[serde(rename = "2x1")]
    TwoColumns,
    #[serde(rename = "2x2")]
    Grid,
    #[serde(other)]
    Other,
}

impl PageLayout {
    /// Grid dimensions as (rows, cols)
    pub fn grid(&self) -> (u32, u32) {
        match self {
            PageLayout::Single => (1, 1),
            PageLayout::TwoRows => (2, 1),
            PageLayout::TwoColumns => (1, 2),
            PageLayout::Grid => (2, 2),
            PageLayout::Other => (1, 2),
        }
    }

    /// Number of slots the editor shows. Rendering ignores it.
    pub fn capacity(&self) -> usize {
        let (rows, cols) = self.grid();
        (rows * cols) as usize
    }
}

/// Running header configuration; `height` is in centimeters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

/// Running footer configuration; `height` is in centimeters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default)]
    pub show_page_number: bool,
}

/// One report page, rendered as one document section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub page_number: u32,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub size: PageSize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<HeaderConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<FooterConfig>,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub layout: PageLayout,
    /// Style override applied on top of the report settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<DocumentSettings>,
}

impl Page {
    /// Header config, only when enabled
    pub fn active_header(&self) -> Option<&HeaderConfig> {
        self.header.as_ref().filter(|h| h.enabled)
    }

    /// Footer config, only when enabled
    pub fn active_footer(&self) -> Option<&FooterConfig> {
        self.footer.as_ref().filter(|f| f.enabled)
    }

    /// More elements than the layout has slots for
    pub fn overflows_layout(&self) -> bool {
        self.elements.len() > self.layout.capacity()
    }
}
