//! Per-kind element bodies

use report_types::{AlertData, AlertLevel, Element, ElementKind, Page, Report};

use super::RenderContext;
use crate::compiler::EngineError;
use crate::data::{DataSource, DEFAULT_SOURCE_ID};
use crate::docx::{Block, Paragraph, RunStyle, Table, TableCell, TableRow};
use crate::style::{FontRole, ResolvedFont, ResolvedSpacing, StyleCascade};

pub const CHART_PLACEHOLDER: &str = "[Graphique généré dynamiquement]";
pub const NO_ALERTS: &str = "Aucune alerte pour la période sélectionnée.";
pub const NO_READING: &str = "Aucune donnée disponible.";
pub const EMPTY_TEXT: &str = "Contenu texte libre";
pub const COMMENT_LABEL: &str = "Commentaire: ";

const CHART_HEADER: [&str; 3] = ["Timestamp", "Valeur", "Unité"];
const ALERT_HEADER: [&str; 4] = ["Date/Heure", "Niveau", "Source", "Message"];

const PLACEHOLDER_COLOR: &str = "666666";
/// 16pt
const WIDGET_VALUE_SIZE: u32 = 32;

/// Fixed spacing around element content, in twips
const CONTENT_SPACING: u32 = 200;
const WIDGET_GAP: u32 = 400;

/// Widget health derived from the current reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetStatus {
    Normal,
    Attention,
    Critique,
}

impl WidgetStatus {
    /// `> 80` critical, `> 60` warning, anything else normal
    pub fn classify(value: f64) -> Self {
        if value > 80.0 {
            WidgetStatus::Critique
        } else if value > 60.0 {
            WidgetStatus::Attention
        } else {
            WidgetStatus::Normal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WidgetStatus::Normal => "Normal",
            WidgetStatus::Attention => "Attention",
            WidgetStatus::Critique => "Critique",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            WidgetStatus::Normal => "00AA00",
            WidgetStatus::Attention => "FF8800",
            WidgetStatus::Critique => "FF0000",
        }
    }
}

fn alert_color(level: AlertLevel) -> &'static str {
    match level {
        AlertLevel::Critical => "FF0000",
        AlertLevel::Error => "FF4400",
        AlertLevel::Warning => "FF8800",
        AlertLevel::Info => "0088FF",
    }
}

/// Renders element bodies, pulling readings from a [`DataSource`]
pub struct ElementRenderer<'r, D: DataSource + ?Sized> {
    ctx: &'r RenderContext,
    data: &'r mut D,
}

impl<'r, D: DataSource + ?Sized> ElementRenderer<'r, D> {
    pub fn new(ctx: &'r RenderContext, data: &'r mut D) -> Self {
        Self { ctx, data }
    }

    /// Body blocks of one element, followed by its comment when it has one.
    /// The title is the compositor's job.
    pub fn render(
        &mut self,
        element: &Element,
        page: &Page,
        report: &Report,
    ) -> Result<Vec<Block>, EngineError> {
        let cascade = StyleCascade::for_element(report, page, element);
        let body = cascade.resolve_font(FontRole::Body);
        let spacing = cascade.resolve_spacing();

        let mut blocks = match element.kind {
            ElementKind::Chart => self.chart(element, report, &body)?,
            ElementKind::Widget => self.widget(element, report, &body)?,
            ElementKind::Table => self.alerts(report, &body)?,
            ElementKind::Text => text(element, &body, &spacing),
        };

        if element.has_remark() {
            blocks.push(comment(element, &body, &spacing).into());
        }

        Ok(blocks)
    }

    fn chart(
        &mut self,
        element: &Element,
        report: &Report,
        body: &ResolvedFont,
    ) -> Result<Vec<Block>, EngineError> {
        let source_id = element.data_source_id().unwrap_or(DEFAULT_SOURCE_ID);
        let series = self.data.fetch_series(source_id, &report.period)?;
        tracing::debug!(source_id, points = series.len(), "Chart series");

        let mut blocks: Vec<Block> = vec![Paragraph::text(
            CHART_PLACEHOLDER,
            RunStyle::default().italic().color(PLACEHOLDER_COLOR),
        )
        .spacing(Some(CONTENT_SPACING), Some(CONTENT_SPACING))
        .into()];

        if !series.is_empty() {
            let cell_style = RunStyle::from_font(body);
            let mut rows = vec![header_row(&CHART_HEADER, &cell_style)];
            rows.extend(series.iter().map(|point| {
                let date = self.ctx.format_date(&point.timestamp);
                body_row([
                    Paragraph::text(date, cell_style.clone()),
                    Paragraph::text(point.value.to_string(), cell_style.clone()),
                    Paragraph::text(point.unit.clone(), cell_style.clone()),
                ])
            }));
            blocks.push(Table { rows }.into());
        }

        Ok(blocks)
    }

    fn widget(
        &mut self,
        element: &Element,
        report: &Report,
        body: &ResolvedFont,
    ) -> Result<Vec<Block>, EngineError> {
        let source_id = element.data_source_id().unwrap_or(DEFAULT_SOURCE_ID);
        let Some(reading) = self.data.fetch_latest(source_id, &report.period)? else {
            tracing::debug!(source_id, "Widget has no reading");
            return Ok(vec![Paragraph::text(NO_READING, RunStyle::from_font(body).italic())
                .centered()
                .spacing(Some(CONTENT_SPACING), Some(WIDGET_GAP))
                .into()]);
        };

        let unit = element.unit().unwrap_or(&reading.unit);
        let status = WidgetStatus::classify(reading.value);

        let value_style = RunStyle::from_font(body).bold(true).size(WIDGET_VALUE_SIZE);
        let value = Paragraph::text(
            format!("Valeur actuelle: {} {}", reading.value, unit),
            value_style,
        )
        .centered()
        .spacing(Some(CONTENT_SPACING), Some(CONTENT_SPACING));

        let status_line = Paragraph::text(
            format!("Status: {}", status.label()),
            RunStyle::from_font(body).color(status.color()),
        )
        .centered()
        .spacing(None, Some(WIDGET_GAP));

        Ok(vec![value.into(), status_line.into()])
    }

    fn alerts(&mut self, report: &Report, body: &ResolvedFont) -> Result<Vec<Block>, EngineError> {
        let mut alerts = self.data.fetch_alerts(&report.period)?;
        tracing::debug!(count = alerts.len(), "Alert table");

        if alerts.is_empty() {
            return Ok(vec![
                Paragraph::text(NO_ALERTS, RunStyle::from_font(body).italic()).into(),
            ]);
        }

        // Newest first
        alerts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let cell_style = RunStyle::from_font(body);
        let mut rows = vec![header_row(&ALERT_HEADER, &cell_style)];
        rows.extend(alerts.iter().map(|alert| self.alert_row(alert, &cell_style)));

        Ok(vec![Table { rows }.into()])
    }

    fn alert_row(&self, alert: &AlertData, style: &RunStyle) -> TableRow {
        body_row([
            Paragraph::text(self.ctx.format_datetime(&alert.timestamp), style.clone()),
            Paragraph::text(
                alert.level.as_str().to_uppercase(),
                style.clone().color(alert_color(alert.level)),
            ),
            Paragraph::text(alert.source.clone(), style.clone()),
            Paragraph::text(alert.message.clone(), style.clone()),
        ])
    }
}

fn text(element: &Element, body: &ResolvedFont, spacing: &ResolvedSpacing) -> Vec<Block> {
    let content = if element.comment.is_empty() {
        EMPTY_TEXT
    } else {
        element.comment.as_str()
    };

    vec![Paragraph::text(content, RunStyle::from_font(body))
        .spacing(Some(CONTENT_SPACING), Some(CONTENT_SPACING))
        .line(spacing.line)
        .into()]
}

fn comment(element: &Element, body: &ResolvedFont, spacing: &ResolvedSpacing) -> Paragraph {
    let style = RunStyle::from_font(body);
    Paragraph::new()
        .run(COMMENT_LABEL, style.clone().bold(true))
        .run(element.comment.clone(), style)
        .spacing(Some(spacing.paragraph_twips), Some(spacing.section_twips))
        .line(spacing.line)
}

fn header_row(labels: &[&str], style: &RunStyle) -> TableRow {
    TableRow {
        cells: labels
            .iter()
            .map(|label| TableCell::new(Paragraph::text(*label, style.clone().bold(true))))
            .collect(),
        header: true,
    }
}

fn body_row<const N: usize>(cells: [Paragraph; N]) -> TableRow {
    TableRow {
        cells: cells.into_iter().map(TableCell::new).collect(),
        header: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{SampleDataSource, SeriesPoint};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use report_types::Period;

    /// Fixed readings for exercising renderers without randomness
    #[derive(Default)]
    struct FixedData {
        series: Vec<SeriesPoint>,
        latest: Option<f64>,
        alerts: Vec<AlertData>,
        requested: Vec<String>,
    }

    impl DataSource for FixedData {
        fn fetch_series(
            &mut self,
            source_id: &str,
            _period: &Period,
        ) -> Result<Vec<SeriesPoint>, EngineError> {
            self.requested.push(source_id.to_string());
            Ok(self.series.clone())
        }

        fn fetch_latest(
            &mut self,
            source_id: &str,
            period: &Period,
        ) -> Result<Option<SeriesPoint>, EngineError> {
            self.requested.push(source_id.to_string());
            Ok(self.latest.map(|value| SeriesPoint {
                timestamp: period.end,
                value,
                unit: "°C".to_string(),
            }))
        }

        fn fetch_alerts(&mut self, _period: &Period) -> Result<Vec<AlertData>, EngineError> {
            Ok(self.alerts.clone())
        }
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
    }

    fn report() -> Report {
        Report::new("Rapport", Period::new(start(), start() + Duration::days(7)))
    }

    fn ctx() -> RenderContext {
        RenderContext::new(start(), "%d/%m/%Y", "%H:%M:%S")
    }

    fn render(element: &Element, data: &mut FixedData) -> Vec<Block> {
        let ctx = ctx();
        let report = report();
        ElementRenderer::new(&ctx, data)
            .render(element, &Page::default(), &report)
            .unwrap()
    }

    fn widget_texts(value: f64) -> (String, String, Option<String>) {
        let mut data = FixedData {
            latest: Some(value),
            ..Default::default()
        };
        let blocks = render(&Element::new(ElementKind::Widget, "Temp"), &mut data);
        let status = blocks[1].as_paragraph().unwrap();
        let color = status.runs().next().unwrap().1.color.clone();
        (
            blocks[0].as_paragraph().unwrap().plain_text(1),
            status.plain_text(1),
            color,
        )
    }

    #[test]
    fn test_widget_thresholds() {
        let cases = [
            (85.0, "Critique", "FF0000"),
            (70.0, "Attention", "FF8800"),
            (50.0, "Normal", "00AA00"),
            (80.0, "Attention", "FF8800"),
            (60.0, "Normal", "00AA00"),
        ];
        for (value, label, color) in cases {
            let (_, status, status_color) = widget_texts(value);
            assert_eq!(status, format!("Status: {}", label), "value {}", value);
            assert_eq!(status_color.as_deref(), Some(color), "value {}", value);
        }
    }

    #[test]
    fn test_widget_value_line() {
        let (value, _, _) = widget_texts(85.0);
        assert_eq!(value, "Valeur actuelle: 85 °C");
    }

    #[test]
    fn test_widget_unit_and_source_from_config() {
        let mut data = FixedData {
            latest: Some(42.0),
            ..Default::default()
        };
        let element = Element::new(ElementKind::Widget, "Énergie")
            .with_config(serde_json::json!({"dataSource": "meter-7", "unit": "kWh"}));
        let blocks = render(&element, &mut data);

        assert_eq!(data.requested, vec!["meter-7".to_string()]);
        assert_eq!(blocks[0].as_paragraph().unwrap().plain_text(1), "Valeur actuelle: 42 kWh");
    }

    #[test]
    fn test_widget_without_reading() {
        let mut data = FixedData::default();
        let blocks = render(&Element::new(ElementKind::Widget, "Temp"), &mut data);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].as_paragraph().unwrap().plain_text(1), NO_READING);
    }

    #[test]
    fn test_empty_alerts_message() {
        let mut data = FixedData::default();
        let blocks = render(&Element::new(ElementKind::Table, "Alertes"), &mut data);

        assert_eq!(blocks.len(), 1);
        let p = blocks[0].as_paragraph().unwrap();
        assert_eq!(p.plain_text(1), NO_ALERTS);
        assert!(p.runs().all(|(_, style)| style.italic));
        assert!(blocks.iter().all(|b| b.as_table().is_none()));
    }

    #[test]
    fn test_alerts_sorted_newest_first() {
        let alert = |hours: i64, level| AlertData {
            timestamp: start() + Duration::hours(hours),
            level,
            source: "Réseau".to_string(),
            message: "Perte de communication".to_string(),
        };
        let mut data = FixedData {
            alerts: vec![
                alert(1, AlertLevel::Info),
                alert(30, AlertLevel::Critical),
                alert(5, AlertLevel::Warning),
            ],
            ..Default::default()
        };
        let blocks = render(&Element::new(ElementKind::Table, "Alertes"), &mut data);
        let table = blocks[0].as_table().unwrap();

        assert_eq!(table.rows.len(), 4);
        assert!(table.rows[0].header);
        let header: Vec<String> = table.rows[0]
            .cells
            .iter()
            .map(|c| c.paragraphs[0].plain_text(1))
            .collect();
        assert_eq!(header, vec!["Date/Heure", "Niveau", "Source", "Message"]);

        let levels: Vec<String> = table
            .body_rows()
            .map(|r| r.cells[1].paragraphs[0].plain_text(1))
            .collect();
        assert_eq!(levels, vec!["CRITICAL", "WARNING", "INFO"]);

        let first = &table.rows[1];
        assert_eq!(first.cells[0].paragraphs[0].plain_text(1), "02/03/2024 06:00:00");
        let (_, level_style) = first.cells[1].paragraphs[0].runs().next().unwrap();
        assert_eq!(level_style.color.as_deref(), Some("FF0000"));
    }

    #[test]
    fn test_chart_placeholder_and_table() {
        let mut data = FixedData {
            series: vec![SeriesPoint {
                timestamp: start(),
                value: 42.0,
                unit: "°C".to_string(),
            }],
            ..Default::default()
        };
        let blocks = render(&Element::new(ElementKind::Chart, "Courbe"), &mut data);

        assert_eq!(blocks[0].as_paragraph().unwrap().plain_text(1), CHART_PLACEHOLDER);
        let table = blocks[1].as_table().unwrap();
        let row: Vec<String> = table.rows[1]
            .cells
            .iter()
            .map(|c| c.paragraphs[0].plain_text(1))
            .collect();
        assert_eq!(row, vec!["01/03/2024", "42", "°C"]);
        assert_eq!(data.requested, vec![DEFAULT_SOURCE_ID.to_string()]);
    }

    #[test]
    fn test_chart_without_data_has_no_table() {
        let mut data = FixedData::default();
        let blocks = render(&Element::new(ElementKind::Chart, "Courbe"), &mut data);
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn test_text_element() {
        let mut data = FixedData::default();
        let blocks = render(&Element::new(ElementKind::Text, "Note").with_comment(""), &mut data);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].as_paragraph().unwrap().plain_text(1), EMPTY_TEXT);

        let blocks = render(
            &Element::new(ElementKind::Text, "Note").with_comment("Vérifier la sonde"),
            &mut data,
        );
        // Body text plus the comment paragraph
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].as_paragraph().unwrap().plain_text(1), "Vérifier la sonde");
    }

    #[test]
    fn test_comment_paragraph_only_for_remarks() {
        let mut data = FixedData::default();
        let ras = render(&Element::new(ElementKind::Chart, "Courbe"), &mut data);
        assert!(ras
            .iter()
            .filter_map(Block::as_paragraph)
            .all(|p| !p.plain_text(1).starts_with(COMMENT_LABEL)));

        let remark = render(
            &Element::new(ElementKind::Chart, "Courbe").with_comment("Pic mardi"),
            &mut data,
        );
        let last = remark.last().unwrap().as_paragraph().unwrap();
        assert_eq!(last.plain_text(1), "Commentaire: Pic mardi");
        let (label, style) = last.runs().next().unwrap();
        assert_eq!(label, COMMENT_LABEL);
        assert!(style.bold);
        // Built-in spacing: 6pt before, 12pt after
        assert_eq!(last.spacing.before, Some(120));
        assert_eq!(last.spacing.after, Some(240));
    }

    #[test]
    fn test_sample_source_drives_every_kind() {
        let ctx = ctx();
        let report = report();
        let mut data = SampleDataSource::seeded(3);
        let mut renderer = ElementRenderer::new(&ctx, &mut data);

        for kind in [
            ElementKind::Chart,
            ElementKind::Widget,
            ElementKind::Table,
            ElementKind::Text,
        ] {
            let blocks = renderer
                .render(&Element::new(kind, "x"), &Page::default(), &report)
                .unwrap();
            assert!(!blocks.is_empty(), "{} rendered nothing", kind);
        }
    }
}
