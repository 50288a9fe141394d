//! In-memory document tree
//!
//! Lengths are twips, font sizes half-points, colors bare `RRGGBB`.

use chrono::{DateTime, Utc};
use report_types::Orientation;
use serde::Serialize;

use crate::style::{PageMargins, ResolvedFont};

/// Character formatting of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    pub bold: bool,
    pub italic: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl RunStyle {
    /// Font, size, weight and color of a resolved role
    pub fn from_font(font: &ResolvedFont) -> Self {
        Self {
            font: Some(font.font_name.clone()),
            size: Some(font.size_half_points),
            bold: font.bold,
            italic: false,
            color: Some(font.color_hex.clone()),
        }
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn size(mut self, half_points: u32) -> Self {
        self.size = Some(half_points);
        self
    }
}

/// Paragraph content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inline {
    Text { text: String, style: RunStyle },
    /// Current page number, filled in by the word processor
    PageNumber { style: RunStyle },
}

/// Horizontal paragraph alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// Paragraph spacing in twips; `line` in 240ths of a line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParagraphSpacing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl ParagraphSpacing {
    pub fn is_empty(&self) -> bool {
        self.before.is_none() && self.after.is_none() && self.line.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    pub inlines: Vec<Inline>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    /// Outline level 1..=9 mapped to the `HeadingN` style
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<u8>,
    #[serde(skip_serializing_if = "ParagraphSpacing::is_empty")]
    pub spacing: ParagraphSpacing,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paragraph holding a single run
    pub fn text(text: impl Into<String>, style: RunStyle) -> Self {
        Self::new().run(text, style)
    }

    pub fn run(mut self, text: impl Into<String>, style: RunStyle) -> Self {
        self.inlines.push(Inline::Text {
            text: text.into(),
            style,
        });
        self
    }

    pub fn page_number(mut self, style: RunStyle) -> Self {
        self.inlines.push(Inline::PageNumber { style });
        self
    }

    pub fn centered(mut self) -> Self {
        self.alignment = Some(Alignment::Center);
        self
    }

    pub fn heading(mut self, level: u8) -> Self {
        self.heading = Some(level.clamp(1, 9));
        self
    }

    pub fn spacing(mut self, before: Option<u32>, after: Option<u32>) -> Self {
        self.spacing.before = before;
        self.spacing.after = after;
        self
    }

    pub fn line(mut self, line: u32) -> Self {
        self.spacing.line = Some(line);
        self
    }

    /// Visible text, with page number fields shown as `page_number`
    pub fn plain_text(&self, page_number: u32) -> String {
        self.inlines
            .iter()
            .map(|inline| match inline {
                Inline::Text { text, .. } => text.clone(),
                Inline::PageNumber { .. } => page_number.to_string(),
            })
            .collect()
    }

    /// Text runs only
    pub fn runs(&self) -> impl Iterator<Item = (&str, &RunStyle)> {
        self.inlines.iter().filter_map(|inline| match inline {
            Inline::Text { text, style } => Some((text.as_str(), style)),
            Inline::PageNumber { .. } => None,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableCell {
    pub paragraphs: Vec<Paragraph>,
}

impl TableCell {
    pub fn new(paragraph: Paragraph) -> Self {
        Self {
            paragraphs: vec![paragraph],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
    /// Repeated at the top of each page
    pub header: bool,
}

/// Full-width table with single borders
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }

    /// Rows that are not header rows
    pub fn body_rows(&self) -> impl Iterator<Item = &TableRow> {
        self.rows.iter().filter(|r| !r.header)
    }
}

/// Body-level content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

impl Block {
    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Block::Table(t) => Some(t),
            Block::Paragraph(_) => None,
        }
    }
}

impl From<Paragraph> for Block {
    fn from(p: Paragraph) -> Self {
        Block::Paragraph(p)
    }
}

impl From<Table> for Block {
    fn from(t: Table) -> Self {
        Block::Table(t)
    }
}

/// Section page geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSetup {
    pub width: u32,
    pub height: u32,
    pub orientation: Orientation,
    pub margins: PageMargins,
    /// Distance from the page edge to the header
    pub header_distance: u32,
    /// Distance from the page edge to the footer
    pub footer_distance: u32,
}

impl PageSetup {
    /// Width between the left and right margins, in twips
    pub fn text_width(&self) -> u32 {
        let width = i64::from(self.width)
            - i64::from(self.margins.left)
            - i64::from(self.margins.right);
        u32::try_from(width).unwrap_or(0)
    }
}

/// One report page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub page: PageSetup,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<Vec<Paragraph>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<Vec<Paragraph>>,
    pub blocks: Vec<Block>,
}

impl Section {
    /// Heading paragraphs, one per rendered element
    pub fn headings(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks
            .iter()
            .filter_map(Block::as_paragraph)
            .filter(|p| p.heading.is_some())
    }
}

/// The whole document plus its core properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub title: String,
    pub description: String,
    pub creator: String,
    pub created_at: DateTime<Utc>,
    pub sections: Vec<Section>,
}
