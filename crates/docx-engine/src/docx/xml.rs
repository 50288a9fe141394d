//! WordprocessingML part writers

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use report_types::Orientation;

use super::model::{Block, Document, Inline, Paragraph, RunStyle, Section, Table};
use crate::compiler::EngineError;

pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Thin event writer over quick-xml
pub(crate) struct XmlWriter {
    inner: Writer<Vec<u8>>,
}

impl XmlWriter {
    /// Writer with the standalone XML declaration already emitted
    pub(crate) fn new() -> Result<Self, EngineError> {
        let mut inner = Writer::new(Vec::new());
        inner.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(Self { inner })
    }

    pub(crate) fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), EngineError> {
        let mut tag = BytesStart::new(name);
        tag.extend_attributes(attrs.iter().copied());
        self.inner.write_event(Event::Start(tag))?;
        Ok(())
    }

    pub(crate) fn end(&mut self, name: &str) -> Result<(), EngineError> {
        self.inner.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    pub(crate) fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), EngineError> {
        let mut tag = BytesStart::new(name);
        tag.extend_attributes(attrs.iter().copied());
        self.inner.write_event(Event::Empty(tag))?;
        Ok(())
    }

    pub(crate) fn text(&mut self, text: &str) -> Result<(), EngineError> {
        self.inner.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    /// `<name attrs>text</name>`
    pub(crate) fn text_element(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
        text: &str,
    ) -> Result<(), EngineError> {
        self.start(name, attrs)?;
        self.text(text)?;
        self.end(name)
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.inner.into_inner()
    }
}

/// Relationship ids of the header/footer parts a section points to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SectionRefs {
    pub header: Option<String>,
    pub footer: Option<String>,
}

/// `word/document.xml`
pub(crate) fn document_xml(
    doc: &Document,
    refs: &[SectionRefs],
) -> Result<Vec<u8>, EngineError> {
    let mut w = XmlWriter::new()?;
    w.start("w:document", &[("xmlns:w", W_NS), ("xmlns:r", R_NS)])?;
    w.start("w:body", &[])?;

    let last = doc.sections.len().saturating_sub(1);
    for (index, section) in doc.sections.iter().enumerate() {
        let page_number = index as u32 + 1;
        let text_width = section.page.text_width();
        for block in &section.blocks {
            write_block(&mut w, block, page_number, text_width)?;
        }

        let section_refs = refs.get(index).cloned().unwrap_or_default();
        if index == last {
            // The last section's properties live directly under w:body
            write_section_properties(&mut w, section, &section_refs)?;
        } else {
            w.start("w:p", &[])?;
            w.start("w:pPr", &[])?;
            write_section_properties(&mut w, section, &section_refs)?;
            w.end("w:pPr")?;
            w.end("w:p")?;
        }
    }

    if doc.sections.is_empty() {
        w.empty("w:p", &[])?;
    }

    w.end("w:body")?;
    w.end("w:document")?;
    Ok(w.into_bytes())
}

/// `word/headerN.xml`
pub(crate) fn header_xml(
    paragraphs: &[Paragraph],
    page_number: u32,
) -> Result<Vec<u8>, EngineError> {
    story_xml("w:hdr", paragraphs, page_number)
}

/// `word/footerN.xml`
pub(crate) fn footer_xml(
    paragraphs: &[Paragraph],
    page_number: u32,
) -> Result<Vec<u8>, EngineError> {
    story_xml("w:ftr", paragraphs, page_number)
}

fn story_xml(
    root: &str,
    paragraphs: &[Paragraph],
    page_number: u32,
) -> Result<Vec<u8>, EngineError> {
    let mut w = XmlWriter::new()?;
    w.start(root, &[("xmlns:w", W_NS), ("xmlns:r", R_NS)])?;
    for paragraph in paragraphs {
        write_paragraph(&mut w, paragraph, page_number)?;
    }
    if paragraphs.is_empty() {
        w.empty("w:p", &[])?;
    }
    w.end(root)?;
    Ok(w.into_bytes())
}

/// `word/styles.xml`: document defaults plus Normal and Heading1..3
pub(crate) fn styles_xml() -> Result<Vec<u8>, EngineError> {
    let mut w = XmlWriter::new()?;
    w.start("w:styles", &[("xmlns:w", W_NS)])?;

    w.start("w:docDefaults", &[])?;
    w.start("w:rPrDefault", &[])?;
    w.start("w:rPr", &[])?;
    w.empty(
        "w:rFonts",
        &[
            ("w:ascii", "Calibri"),
            ("w:hAnsi", "Calibri"),
            ("w:cs", "Calibri"),
        ],
    )?;
    w.empty("w:sz", &[("w:val", "22")])?;
    w.empty("w:szCs", &[("w:val", "22")])?;
    w.end("w:rPr")?;
    w.end("w:rPrDefault")?;
    w.empty("w:pPrDefault", &[])?;
    w.end("w:docDefaults")?;

    w.start(
        "w:style",
        &[("w:type", "paragraph"), ("w:default", "1"), ("w:styleId", "Normal")],
    )?;
    w.empty("w:name", &[("w:val", "Normal")])?;
    w.empty("w:qFormat", &[])?;
    w.end("w:style")?;

    for level in 1..=3u8 {
        let style_id = format!("Heading{}", level);
        let name = format!("heading {}", level);
        let outline = (level - 1).to_string();

        w.start("w:style", &[("w:type", "paragraph"), ("w:styleId", style_id.as_str())])?;
        w.empty("w:name", &[("w:val", name.as_str())])?;
        w.empty("w:basedOn", &[("w:val", "Normal")])?;
        w.empty("w:next", &[("w:val", "Normal")])?;
        w.empty("w:qFormat", &[])?;
        w.start("w:pPr", &[])?;
        w.empty("w:keepNext", &[])?;
        w.empty("w:outlineLvl", &[("w:val", outline.as_str())])?;
        w.end("w:pPr")?;
        w.end("w:style")?;
    }

    w.end("w:styles")?;
    Ok(w.into_bytes())
}

fn write_block(
    w: &mut XmlWriter,
    block: &Block,
    page_number: u32,
    text_width: u32,
) -> Result<(), EngineError> {
    match block {
        Block::Paragraph(p) => write_paragraph(w, p, page_number),
        Block::Table(t) => write_table(w, t, page_number, text_width),
    }
}

fn write_paragraph(w: &mut XmlWriter, p: &Paragraph, page_number: u32) -> Result<(), EngineError> {
    w.start("w:p", &[])?;

    let has_props = p.heading.is_some() || p.alignment.is_some() || !p.spacing.is_empty();
    if has_props {
        w.start("w:pPr", &[])?;
        if let Some(level) = p.heading {
            let style_id = format!("Heading{}", level);
            w.empty("w:pStyle", &[("w:val", style_id.as_str())])?;
        }
        if !p.spacing.is_empty() {
            let before = p.spacing.before.map(|v| v.to_string());
            let after = p.spacing.after.map(|v| v.to_string());
            let line = p.spacing.line.map(|v| v.to_string());

            let mut attrs: Vec<(&str, &str)> = Vec::with_capacity(4);
            if let Some(before) = &before {
                attrs.push(("w:before", before.as_str()));
            }
            if let Some(after) = &after {
                attrs.push(("w:after", after.as_str()));
            }
            if let Some(line) = &line {
                attrs.push(("w:line", line.as_str()));
                attrs.push(("w:lineRule", "auto"));
            }
            w.empty("w:spacing", &attrs)?;
        }
        if let Some(alignment) = p.alignment {
            w.empty("w:jc", &[("w:val", alignment.as_ooxml())])?;
        }
        w.end("w:pPr")?;
    }

    for inline in &p.inlines {
        match inline {
            Inline::Text { text, style } => write_run(w, text, style)?,
            Inline::PageNumber { style } => {
                w.start("w:fldSimple", &[("w:instr", " PAGE ")])?;
                write_run(w, &page_number.to_string(), style)?;
                w.end("w:fldSimple")?;
            }
        }
    }

    w.end("w:p")
}

fn write_run(w: &mut XmlWriter, text: &str, style: &RunStyle) -> Result<(), EngineError> {
    w.start("w:r", &[])?;
    write_run_properties(w, style)?;
    w.text_element("w:t", &[("xml:space", "preserve")], text)?;
    w.end("w:r")
}

fn write_run_properties(w: &mut XmlWriter, style: &RunStyle) -> Result<(), EngineError> {
    if *style == RunStyle::default() {
        return Ok(());
    }

    w.start("w:rPr", &[])?;
    if let Some(font) = &style.font {
        w.empty(
            "w:rFonts",
            &[
                ("w:ascii", font.as_str()),
                ("w:hAnsi", font.as_str()),
                ("w:cs", font.as_str()),
            ],
        )?;
    }
    if style.bold {
        w.empty("w:b", &[])?;
        w.empty("w:bCs", &[])?;
    }
    if style.italic {
        w.empty("w:i", &[])?;
        w.empty("w:iCs", &[])?;
    }
    if let Some(color) = &style.color {
        w.empty("w:color", &[("w:val", color.as_str())])?;
    }
    if let Some(size) = style.size {
        let size = size.to_string();
        w.empty("w:sz", &[("w:val", size.as_str())])?;
        w.empty("w:szCs", &[("w:val", size.as_str())])?;
    }
    w.end("w:rPr")
}

fn write_table(
    w: &mut XmlWriter,
    table: &Table,
    page_number: u32,
    text_width: u32,
) -> Result<(), EngineError> {
    let columns = table.column_count().max(1);

    w.start("w:tbl", &[])?;
    w.start("w:tblPr", &[])?;
    // 5000 fiftieths of a percent = 100% of the text width
    w.empty("w:tblW", &[("w:w", "5000"), ("w:type", "pct")])?;
    w.start("w:tblBorders", &[])?;
    for edge in ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"] {
        w.empty(
            edge,
            &[
                ("w:val", "single"),
                ("w:sz", "4"),
                ("w:space", "0"),
                ("w:color", "auto"),
            ],
        )?;
    }
    w.end("w:tblBorders")?;
    w.empty("w:tblLayout", &[("w:type", "autofit")])?;
    w.end("w:tblPr")?;

    // Grid columns are in twips; split the text width evenly
    w.start("w:tblGrid", &[])?;
    let column_width = (text_width / columns as u32).to_string();
    for _ in 0..columns {
        w.empty("w:gridCol", &[("w:w", column_width.as_str())])?;
    }
    w.end("w:tblGrid")?;

    for row in &table.rows {
        w.start("w:tr", &[])?;
        if row.header {
            w.start("w:trPr", &[])?;
            w.empty("w:tblHeader", &[])?;
            w.end("w:trPr")?;
        }
        for cell in &row.cells {
            w.start("w:tc", &[])?;
            w.start("w:tcPr", &[])?;
            w.empty("w:tcW", &[("w:w", "0"), ("w:type", "auto")])?;
            w.end("w:tcPr")?;
            for paragraph in &cell.paragraphs {
                write_paragraph(w, paragraph, page_number)?;
            }
            // A cell must end with a paragraph
            if cell.paragraphs.is_empty() {
                w.empty("w:p", &[])?;
            }
            w.end("w:tc")?;
        }
        w.end("w:tr")?;
    }

    w.end("w:tbl")
}

fn write_section_properties(
    w: &mut XmlWriter,
    section: &Section,
    refs: &SectionRefs,
) -> Result<(), EngineError> {
    let page = &section.page;

    w.start("w:sectPr", &[])?;
    if let Some(id) = &refs.header {
        w.empty("w:headerReference", &[("w:type", "default"), ("r:id", id.as_str())])?;
    }
    if let Some(id) = &refs.footer {
        w.empty("w:footerReference", &[("w:type", "default"), ("r:id", id.as_str())])?;
    }

    let width = page.width.to_string();
    let height = page.height.to_string();
    let mut size = vec![("w:w", width.as_str()), ("w:h", height.as_str())];
    if page.orientation == Orientation::Landscape {
        size.push(("w:orient", "landscape"));
    }
    w.empty("w:pgSz", &size)?;

    let top = page.margins.top.to_string();
    let right = page.margins.right.to_string();
    let bottom = page.margins.bottom.to_string();
    let left = page.margins.left.to_string();
    let header = page.header_distance.to_string();
    let footer = page.footer_distance.to_string();
    w.empty(
        "w:pgMar",
        &[
            ("w:top", top.as_str()),
            ("w:right", right.as_str()),
            ("w:bottom", bottom.as_str()),
            ("w:left", left.as_str()),
            ("w:header", header.as_str()),
            ("w:footer", footer.as_str()),
            ("w:gutter", "0"),
        ],
    )?;
    w.end("w:sectPr")
}
