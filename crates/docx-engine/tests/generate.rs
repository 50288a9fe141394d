//! End-to-end generation, checked by reading the produced package back

use std::io::{Cursor, Read};

use chrono::{DateTime, Duration, TimeZone, Utc};
use docx_engine::data::{DataSource, SeriesPoint};
use docx_engine::{generate, generate_with_source, outline, EngineError, RenderOptions};
use pretty_assertions::assert_eq;
use report_types::{
    AlertData, Element, ElementKind, FooterConfig, HeaderConfig, Orientation, Page, PageLayout,
    Period, Report,
};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
}

fn options() -> RenderOptions {
    RenderOptions::default()
        .with_seed(42)
        .at(Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap())
}

fn monthly_report() -> Report {
    let period = Period::new(start(), start() + Duration::days(30));
    let mut report = Report::new("Rapport Mensuel", period);
    report.pages = vec![Page {
        page_number: 1,
        header: Some(HeaderConfig {
            enabled: true,
            content: "Rapport - {date}".to_string(),
            height: None,
        }),
        footer: Some(FooterConfig {
            enabled: true,
            content: "Confidentiel".to_string(),
            height: None,
            show_page_number: true,
        }),
        layout: PageLayout::TwoRows,
        elements: vec![
            Element::new(ElementKind::Chart, "Température"),
            Element::new(ElementKind::Table, "Alertes").with_comment("Pics en fin de mois"),
        ],
        ..Default::default()
    }];
    report
}

fn part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut xml = String::new();
    file.read_to_string(&mut xml).unwrap();
    xml
}

fn part_names(bytes: &[u8]) -> Vec<String> {
    let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    archive.file_names().map(str::to_string).collect()
}

#[test]
fn single_page_chart_and_alerts() {
    let report = monthly_report();
    let generated = generate(&report, &options()).unwrap();

    assert_eq!(generated.filename, "Rapport Mensuel.docx");
    assert_eq!(generated.page_count, 1);

    let document = part(&generated.bytes, "word/document.xml");
    assert_eq!(document.matches("<w:sectPr>").count(), 1);
    assert_eq!(document.matches(r#"<w:pStyle w:val="Heading2"/>"#).count(), 2);
    assert!(document.contains("[Graphique généré dynamiquement]"));
    assert!(document.contains(">Timestamp<"));
    assert!(document.contains(">Date/Heure<"));
    assert!(document.contains(">Pics en fin de mois<"));
    assert!(document.contains(r#"<w:pgSz w:w="8391" w:h="11906"/>"#));
    // A4 text width 8391 - 2 * 1417 split over the chart's three columns
    assert_eq!(document.matches(r#"<w:gridCol w:w="1852"/>"#).count(), 3);
    assert_eq!(document.matches(r#"<w:gridCol w:w="1389"/>"#).count(), 4);

    let header = part(&generated.bytes, "word/header1.xml");
    assert!(header.contains(">Rapport - 05/03/2024<"));

    let footer = part(&generated.bytes, "word/footer1.xml");
    assert!(footer.contains(">Confidentiel<"));
    assert!(footer.contains("> - Page <"));
    // Footer text ends with " - Page " and the field cached at 1
    let prefix = footer.find(">Confidentiel<").unwrap();
    let label = footer.find("> - Page <").unwrap();
    let field = footer.find(r#"<w:fldSimple w:instr=" PAGE ">"#).unwrap();
    let cached = footer[field..].find(r#"<w:t xml:space="preserve">1</w:t>"#);
    assert!(prefix < label && label < field);
    assert!(cached.is_some());
    assert!(footer[field..].find("</w:fldSimple>") > cached);

    let core = part(&generated.bytes, "docProps/core.xml");
    assert!(core.contains("<dc:title>Rapport Mensuel</dc:title>"));
    assert!(core.contains("<dc:creator>IoT Reporting System</dc:creator>"));
}

#[test]
fn chart_rows_follow_period() {
    let report = monthly_report();
    let doc = outline(&report, &options()).unwrap();
    let table = doc.sections[0]
        .blocks
        .iter()
        .find_map(|b| b.as_table())
        .unwrap();
    // 30 days capped at 10 rows
    assert_eq!(table.body_rows().count(), 10);
}

#[test]
fn same_seed_same_bytes() {
    let report = monthly_report();
    let a = generate(&report, &options()).unwrap();
    let b = generate(&report, &options()).unwrap();
    assert_eq!(a.bytes, b.bytes);
}

#[test]
fn unseeded_structure_is_stable() {
    let report = monthly_report();
    let options = RenderOptions::default();
    let a = outline(&report, &options).unwrap();
    let b = outline(&report, &options).unwrap();

    assert_eq!(a.sections.len(), b.sections.len());
    assert_eq!(a.sections[0].headings().count(), b.sections[0].headings().count());
    // Chart table length depends only on the period
    let chart_rows = |doc: &docx_engine::docx::Document| {
        doc.sections[0]
            .blocks
            .iter()
            .find_map(|b| b.as_table())
            .map(|t| t.rows.len())
    };
    assert_eq!(chart_rows(&a), chart_rows(&b));
}

#[test]
fn every_element_rendered_beyond_layout() {
    let mut report = monthly_report();
    report.pages[0].layout = PageLayout::Single;
    report.pages[0].elements = vec![
        Element::new(ElementKind::Text, "Un"),
        Element::new(ElementKind::Widget, "Deux"),
        Element::new(ElementKind::Text, "Trois"),
    ];

    let doc = outline(&report, &options()).unwrap();
    let titles: Vec<String> = doc.sections[0].headings().map(|p| p.plain_text(1)).collect();
    assert_eq!(titles, vec!["Un", "Deux", "Trois"]);
}

#[test]
fn no_remark_means_no_comment_line() {
    let report = monthly_report();
    let generated = generate(&report, &options()).unwrap();
    let document = part(&generated.bytes, "word/document.xml");
    // Only the alerts element carries a remark
    assert_eq!(document.matches(">Commentaire: <").count(), 1);
    assert!(!document.contains(">RAS<"));
}

#[test]
fn zero_pages_is_valid() {
    let report = Report::new("Vide", Period::new(start(), start() + Duration::days(1)));
    let generated = generate(&report, &options()).unwrap();

    assert_eq!(generated.page_count, 0);
    let names = part_names(&generated.bytes);
    assert!(names.contains(&"word/document.xml".to_string()));
    assert!(!names.iter().any(|n| n.contains("header")));

    let document = part(&generated.bytes, "word/document.xml");
    assert!(document.contains("<w:body><w:p/></w:body>"));
}

#[test]
fn later_sections_get_blank_header() {
    let mut report = monthly_report();
    report.pages.push(Page {
        page_number: 2,
        ..Default::default()
    });

    let generated = generate(&report, &options()).unwrap();
    let names = part_names(&generated.bytes);
    assert!(names.contains(&"word/header2.xml".to_string()));
    assert!(names.contains(&"word/footer2.xml".to_string()));

    let document = part(&generated.bytes, "word/document.xml");
    assert_eq!(document.matches("<w:sectPr>").count(), 2);
    assert_eq!(document.matches("<w:headerReference").count(), 2);
}

/// Upstream with an empty alert log
struct QuietPlant;

impl DataSource for QuietPlant {
    fn fetch_series(&mut self, _: &str, _: &Period) -> Result<Vec<SeriesPoint>, EngineError> {
        Ok(vec![])
    }

    fn fetch_latest(&mut self, _: &str, _: &Period) -> Result<Option<SeriesPoint>, EngineError> {
        Ok(None)
    }

    fn fetch_alerts(&mut self, _: &Period) -> Result<Vec<AlertData>, EngineError> {
        Ok(vec![])
    }
}

#[test]
fn empty_alert_log() {
    let report = monthly_report();
    let generated = generate_with_source(&report, &options(), &mut QuietPlant).unwrap();
    let document = part(&generated.bytes, "word/document.xml");

    assert!(document.contains("Aucune alerte pour la période sélectionnée."));
    assert!(!document.contains("<w:tbl>"));
}

/// Upstream that is down
struct Offline;

impl DataSource for Offline {
    fn fetch_series(&mut self, id: &str, _: &Period) -> Result<Vec<SeriesPoint>, EngineError> {
        Err(EngineError::DataSource(format!("{} unreachable", id)))
    }

    fn fetch_latest(&mut self, id: &str, _: &Period) -> Result<Option<SeriesPoint>, EngineError> {
        Err(EngineError::DataSource(format!("{} unreachable", id)))
    }

    fn fetch_alerts(&mut self, _: &Period) -> Result<Vec<AlertData>, EngineError> {
        Err(EngineError::DataSource("alert log unreachable".to_string()))
    }
}

#[test]
fn data_source_failure_aborts_generation() {
    let report = monthly_report();
    let err = generate_with_source(&report, &options(), &mut Offline).unwrap_err();
    assert!(matches!(err, EngineError::DataSource(_)));
    assert!(err.is_content_error());
}

#[test]
fn landscape_page_sets_orientation() {
    let mut report = monthly_report();
    report.pages[0].orientation = Orientation::Landscape;
    let generated = generate(&report, &options()).unwrap();

    let document = part(&generated.bytes, "word/document.xml");
    assert!(document.contains(r#"<w:pgSz w:w="11906" w:h="8391" w:orient="landscape"/>"#));
    // Wider text area, wider grid columns
    assert!(document.contains(r#"<w:gridCol w:w="3024"/>"#));
}
