use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::lifecycle::ReportStatus;
use crate::page::Page;
use crate::settings::DocumentSettings;

/// Reporting period, half-open `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Period {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Length of the period, zero when `end` is not after `start`
    pub fn duration(&self) -> Duration {
        if self.end > self.start {
            self.end - self.start
        } else {
            Duration::zero()
        }
    }

    /// Number of calendar-day buckets, a partial day counts as one
    pub fn day_count(&self) -> u32 {
        let millis = self.duration().num_milliseconds();
        let day = Duration::days(1).num_milliseconds();
        ((millis + day - 1) / day) as u32
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }
}

/// Delivery frequency of a scheduled report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

/// FTP drop target
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct FtpConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    pub path: String,
}

impl std::fmt::Debug for FtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FtpConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("path", &self.path)
            .finish()
    }
}

/// Scheduled delivery settings, carried through untouched by the compiler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    #[serde(default)]
    pub enabled: bool,
    pub frequency: Frequency,
    /// Local time of day, `HH:MM`
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub recipients: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ftp_config: Option<FtpConfig>,
}

/// Top-level report the user exports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: ReportStatus,
    pub pages: Vec<Page>,
    pub period: Period,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_settings: Option<DocumentSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
}

impl Report {
    /// Create an empty draft report
    pub fn new(name: impl Into<String>, period: Period) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            created_at: None,
            updated_at: None,
            status: ReportStatus::Draft,
            pages: Vec::new(),
            period,
            document_settings: None,
            schedule: None,
        }
    }

    /// Total number of elements over all pages
    pub fn element_count(&self) -> usize {
        self.pages.iter().map(|p| p.elements.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_day_count_rounds_up() {
        assert_eq!(Period::new(utc(2024, 3, 1, 0), utc(2024, 3, 8, 0)).day_count(), 7);
        assert_eq!(Period::new(utc(2024, 3, 1, 0), utc(2024, 3, 8, 1)).day_count(), 8);
        assert_eq!(Period::new(utc(2024, 3, 1, 0), utc(2024, 3, 1, 0)).day_count(), 0);
    }

    #[test]
    fn test_inverted_period_is_empty() {
        let period = Period::new(utc(2024, 3, 8, 0), utc(2024, 3, 1, 0));
        assert_eq!(period.duration(), Duration::zero());
        assert_eq!(period.day_count(), 0);
        assert!(!period.contains(utc(2024, 3, 5, 0)));
    }

    #[test]
    fn test_report_from_editor_json() {
        let report: Report = serde_json::from_value(json!({
            "id": "1",
            "name": "Rapport IoT Mensuel",
            "description": "Rapport automatique des données IoT",
            "createdAt": "2024-03-01T08:00:00Z",
            "status": "draft",
            "pages": [{"pageNumber": 1, "elements": [{"type": "text", "title": "Notes"}]}],
            "period": {"start": "2024-02-01T00:00:00Z", "end": "2024-03-01T00:00:00Z"},
            "schedule": {
                "enabled": true,
                "frequency": "weekly",
                "time": "08:00",
                "recipients": ["ops@example.com"],
                "ftpConfig": {
                    "host": "ftp.example.com",
                    "username": "u",
                    "password": "secret",
                    "path": "/in"
                }
            }
        }))
        .unwrap();

        assert_eq!(report.pages.len(), 1);
        assert_eq!(report.element_count(), 1);
        assert_eq!(report.status, ReportStatus::Draft);
        assert_eq!(report.period.day_count(), 29);
        let schedule = report.schedule.unwrap();
        assert_eq!(schedule.frequency, Frequency::Weekly);
        let debug = format!("{:?}", schedule.ftp_config.unwrap());
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn test_missing_pages_is_rejected() {
        let result: Result<Report, _> = serde_json::from_value(json!({
            "name": "Sans pages",
            "period": {"start": "2024-02-01T00:00:00Z", "end": "2024-03-01T00:00:00Z"}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_pages_must_be_a_list() {
        let result: Result<Report, _> = serde_json::from_value(json!({
            "name": "Pages invalides",
            "pages": 3,
            "period": {"start": "2024-02-01T00:00:00Z", "end": "2024-03-01T00:00:00Z"}
        }));
        assert!(result.is_err());
    }

    proptest! {
        /// Whole days count exactly; any extra millisecond opens a new day
        #[test]
        fn day_count_is_ceiling(days in 0i64..400, extra_ms in 0i64..86_400_000) {
            let start = utc(2024, 1, 1, 0);
            let exact = Period::new(start, start + Duration::days(days));
            prop_assert_eq!(exact.day_count(), days as u32);

            let end = start + Duration::days(days) + Duration::milliseconds(extra_ms);
            let partial = Period::new(start, end);
            let expected = if extra_ms == 0 { days } else { days + 1 };
            prop_assert_eq!(partial.day_count(), expected as u32);
        }
    }
}
