//! OPC packaging: part list, relationships and the ZIP container

use std::io::{Cursor, Write};

use chrono::{DateTime, Datelike, Timelike, Utc};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::model::Document;
use super::xml::{self, SectionRefs, XmlWriter};
use crate::compiler::EngineError;

const RELS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const DOC_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const WML: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml";

/// A part's path inside the container and its bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Part {
    fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StoryKind {
    Header,
    Footer,
}

impl StoryKind {
    fn part_prefix(self) -> &'static str {
        match self {
            StoryKind::Header => "header",
            StoryKind::Footer => "footer",
        }
    }
}

/// Header or footer part referenced by one section
struct Story {
    kind: StoryKind,
    index: usize,
    rel_id: String,
    bytes: Vec<u8>,
}

impl Story {
    fn file_name(&self) -> String {
        format!("{}{}.xml", self.kind.part_prefix(), self.index)
    }
}

/// Build every part of the package, in container order
pub fn build_parts(doc: &Document) -> Result<Vec<Part>, EngineError> {
    // rId1 is the styles part
    let mut next_rel = 2usize;
    let mut header_count = 0usize;
    let mut footer_count = 0usize;
    let mut header_seen = false;
    let mut footer_seen = false;

    let mut stories = Vec::new();
    let mut refs = Vec::with_capacity(doc.sections.len());

    for (index, section) in doc.sections.iter().enumerate() {
        let page_number = index as u32 + 1;
        let mut section_refs = SectionRefs::default();

        // A section without its own header inherits the previous one, so once
        // any header exists, later sections get an explicit (possibly blank) part.
        if section.header.is_some() || header_seen {
            header_seen = true;
            header_count += 1;
            let rel_id = format!("rId{}", next_rel);
            next_rel += 1;
            let paragraphs = section.header.as_deref().unwrap_or(&[]);
            stories.push(Story {
                kind: StoryKind::Header,
                index: header_count,
                rel_id: rel_id.clone(),
                bytes: xml::header_xml(paragraphs, page_number)?,
            });
            section_refs.header = Some(rel_id);
        }

        if section.footer.is_some() || footer_seen {
            footer_seen = true;
            footer_count += 1;
            let rel_id = format!("rId{}", next_rel);
            next_rel += 1;
            let paragraphs = section.footer.as_deref().unwrap_or(&[]);
            stories.push(Story {
                kind: StoryKind::Footer,
                index: footer_count,
                rel_id: rel_id.clone(),
                bytes: xml::footer_xml(paragraphs, page_number)?,
            });
            section_refs.footer = Some(rel_id);
        }

        refs.push(section_refs);
    }

    let mut parts = vec![
        Part::new("[Content_Types].xml", content_types_xml(&stories)?),
        Part::new("_rels/.rels", root_rels_xml()?),
        Part::new("docProps/core.xml", core_xml(doc)?),
        Part::new("docProps/app.xml", app_xml()?),
        Part::new("word/document.xml", xml::document_xml(doc, &refs)?),
        Part::new("word/styles.xml", xml::styles_xml()?),
        Part::new("word/_rels/document.xml.rels", document_rels_xml(&stories)?),
    ];
    for story in stories {
        let name = format!("word/{}", story.file_name());
        parts.push(Part::new(name, story.bytes));
    }

    Ok(parts)
}

/// Serialize the document into `.docx` bytes
pub fn write_package(doc: &Document) -> Result<Vec<u8>, EngineError> {
    let parts = build_parts(doc)?;
    let modified = zip_timestamp(&doc.created_at);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for part in &parts {
        zip.start_file(part.name.as_str(), file_options(modified))?;
        zip.write_all(&part.bytes)?;
    }

    let cursor = zip.finish()?;
    tracing::debug!(parts = parts.len(), "Packaged document");
    Ok(cursor.into_inner())
}

fn file_options(modified: zip::DateTime) -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(modified)
}

/// Entry timestamps follow the document clock so equal inputs give equal bytes
fn zip_timestamp(at: &DateTime<Utc>) -> zip::DateTime {
    let year = u16::try_from(at.year()).unwrap_or(1980);
    zip::DateTime::from_date_and_time(
        year,
        at.month() as u8,
        at.day() as u8,
        at.hour() as u8,
        at.minute() as u8,
        at.second() as u8,
    )
    .unwrap_or_default()
}

fn content_types_xml(stories: &[Story]) -> Result<Vec<u8>, EngineError> {
    let mut w = XmlWriter::new()?;
    w.start("Types", &[("xmlns", TYPES_NS)])?;
    w.empty(
        "Default",
        &[
            ("Extension", "rels"),
            ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
        ],
    )?;
    w.empty("Default", &[("Extension", "xml"), ("ContentType", "application/xml")])?;

    let document_type = format!("{}.document.main+xml", WML);
    let styles_type = format!("{}.styles+xml", WML);
    w.empty(
        "Override",
        &[("PartName", "/word/document.xml"), ("ContentType", document_type.as_str())],
    )?;
    w.empty(
        "Override",
        &[("PartName", "/word/styles.xml"), ("ContentType", styles_type.as_str())],
    )?;
    w.empty(
        "Override",
        &[
            ("PartName", "/docProps/core.xml"),
            ("ContentType", "application/vnd.openxmlformats-package.core-properties+xml"),
        ],
    )?;
    w.empty(
        "Override",
        &[
            ("PartName", "/docProps/app.xml"),
            (
                "ContentType",
                "application/vnd.openxmlformats-officedocument.extended-properties+xml",
            ),
        ],
    )?;

    for story in stories {
        let part_name = format!("/word/{}", story.file_name());
        let content_type = format!("{}.{}+xml", WML, story.kind.part_prefix());
        w.empty(
            "Override",
            &[("PartName", part_name.as_str()), ("ContentType", content_type.as_str())],
        )?;
    }

    w.end("Types")?;
    Ok(w.into_bytes())
}

fn root_rels_xml() -> Result<Vec<u8>, EngineError> {
    let office_document = format!("{}/officeDocument", DOC_REL);
    let extended = format!("{}/extended-properties", DOC_REL);
    let core = format!("{}/metadata/core-properties", RELS_NS);

    let mut w = XmlWriter::new()?;
    w.start("Relationships", &[("xmlns", RELS_NS)])?;
    w.empty(
        "Relationship",
        &[("Id", "rId1"), ("Type", office_document.as_str()), ("Target", "word/document.xml")],
    )?;
    w.empty(
        "Relationship",
        &[
            ("Id", "rId2"),
            ("Type", core.as_str()),
            ("Target", "docProps/core.xml"),
        ],
    )?;
    w.empty(
        "Relationship",
        &[("Id", "rId3"), ("Type", extended.as_str()), ("Target", "docProps/app.xml")],
    )?;
    w.end("Relationships")?;
    Ok(w.into_bytes())
}

fn document_rels_xml(stories: &[Story]) -> Result<Vec<u8>, EngineError> {
    let styles = format!("{}/styles", DOC_REL);

    let mut w = XmlWriter::new()?;
    w.start("Relationships", &[("xmlns", RELS_NS)])?;
    w.empty(
        "Relationship",
        &[("Id", "rId1"), ("Type", styles.as_str()), ("Target", "styles.xml")],
    )?;
    for story in stories {
        let rel_type = format!("{}/{}", DOC_REL, story.kind.part_prefix());
        let target = story.file_name();
        w.empty(
            "Relationship",
            &[
                ("Id", story.rel_id.as_str()),
                ("Type", rel_type.as_str()),
                ("Target", target.as_str()),
            ],
        )?;
    }
    w.end("Relationships")?;
    Ok(w.into_bytes())
}

fn core_xml(doc: &Document) -> Result<Vec<u8>, EngineError> {
    let created = doc.created_at.format("%Y-%m-%dT%H:%M:%SZ").to_string();

    let mut w = XmlWriter::new()?;
    w.start(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    w.text_element("dc:title", &[], &doc.title)?;
    w.text_element("dc:description", &[], &doc.description)?;
    w.text_element("dc:creator", &[], &doc.creator)?;
    w.text_element("cp:lastModifiedBy", &[], &doc.creator)?;
    w.text_element("dcterms:created", &[("xsi:type", "dcterms:W3CDTF")], &created)?;
    w.text_element("dcterms:modified", &[("xsi:type", "dcterms:W3CDTF")], &created)?;
    w.end("cp:coreProperties")?;
    Ok(w.into_bytes())
}

fn app_xml() -> Result<Vec<u8>, EngineError> {
    let mut w = XmlWriter::new()?;
    w.start(
        "Properties",
        &[(
            "xmlns",
            "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
        )],
    )?;
    w.text_element("Application", &[], concat!("docx-engine/", env!("CARGO_PKG_VERSION")))?;
    w.end("Properties")?;
    Ok(w.into_bytes())
}
