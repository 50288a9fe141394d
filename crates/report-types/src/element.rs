use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::settings::DocumentSettings;

/// Comment sentinel meaning "nothing to report"
pub const NO_REMARK: &str = "RAS";

fn default_comment() -> String {
    NO_REMARK.to_string()
}

/// Kind of content an element renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Chart,
    Widget,
    Table,
    Text,
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementKind::Chart => write!(f, "chart"),
            ElementKind::Widget => write!(f, "widget"),
            ElementKind::Table => write!(f, "table"),
            ElementKind::Text => write!(f, "text"),
        }
    }
}

/// Grid slot an element was dropped into in the editor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: u32,
    pub col: u32,
}

/// Editor box size (percent width, pixel height)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementSize {
    pub width: f64,
    pub height: f64,
}

/// One content unit placed on a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_comment")]
    pub comment: String,
    #[serde(default)]
    pub position: GridPosition,
    #[serde(default)]
    pub size: ElementSize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
    /// Style override applied on top of the page and report settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<DocumentSettings>,
}

impl Element {
    /// Create an element with the default comment and no config
    pub fn new(kind: ElementKind, title: impl Into<String>) -> Self {
        Self {
            id: None,
            kind,
            title: title.into(),
            comment: default_comment(),
            position: GridPosition::default(),
            size: ElementSize::default(),
            data: None,
            config: None,
            settings: None,
        }
    }

    /// Set the comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Set the free-form config object
    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        self.config = Some(config);
        self
    }

    /// True when the comment carries an actual remark
    pub fn has_remark(&self) -> bool {
        !self.comment.is_empty() && self.comment != NO_REMARK
    }

    /// `config.dataSource`, if set to a string
    pub fn data_source_id(&self) -> Option<&str> {
        self.config_str("dataSource")
    }

    /// `config.unit`, if set to a string
    pub fn unit(&self) -> Option<&str> {
        self.config_str("unit")
    }

    fn config_str(&self, key: &str) -> Option<&str> {
        self.config.as_ref()?.get(key)?.as_str()
    }
}

/// Severity of an alert log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Info,
    Warning,
    Error,
    Critical,
}

impl AlertLevel {
    pub const ALL: [AlertLevel; 4] = [
        AlertLevel::Info,
        AlertLevel::Warning,
        AlertLevel::Error,
        AlertLevel::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Info => "info",
            AlertLevel::Warning => "warning",
            AlertLevel::Error => "error",
            AlertLevel::Critical => "critical",
        }
    }
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alert log entry shown by table elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertData {
    pub timestamp: DateTime<Utc>,
    pub level: AlertLevel,
    pub source: String,
    pub message: String,
}
