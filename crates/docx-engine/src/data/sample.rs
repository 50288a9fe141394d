//! Synthetic telemetry and alerts
//!
//! Values are drawn from an explicit generator so a fixed seed reproduces the
//! exact same document.

use chrono::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use report_types::{AlertData, AlertLevel, Period};

use super::{DataSource, SeriesPoint};
use crate::compiler::EngineError;

/// At most one chart row per day, capped at this many rows
pub const MAX_SERIES_POINTS: u32 = 10;

const DEFAULT_UNIT: &str = "°C";

const SOURCES: [&str; 5] = [
    "Capteur-01",
    "Capteur-02",
    "Système-A",
    "Réseau",
    "Alimentation",
];

const MESSAGES: [&str; 5] = [
    "Température élevée détectée",
    "Perte de communication",
    "Seuil de pression dépassé",
    "Maintenance requise",
    "Erreur de calibration",
];

/// Random data over the report period
#[derive(Debug, Clone)]
pub struct SampleDataSource<R = StdRng> {
    rng: R,
    unit: String,
}

impl SampleDataSource<StdRng> {
    /// Reproducible source
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from the OS
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> SampleDataSource<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            unit: DEFAULT_UNIT.to_string(),
        }
    }

    /// Unit attached to every reading
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    fn sample_value(&mut self) -> f64 {
        f64::from(self.rng.gen_range(20u32..120))
    }

    fn pick<'c>(&mut self, catalog: &[&'c str]) -> &'c str {
        catalog[self.rng.gen_range(0..catalog.len())]
    }
}

impl<R: Rng> DataSource for SampleDataSource<R> {
    fn fetch_series(
        &mut self,
        _source_id: &str,
        period: &Period,
    ) -> Result<Vec<SeriesPoint>, EngineError> {
        let rows = period.day_count().min(MAX_SERIES_POINTS);

        Ok((0..rows)
            .map(|day| SeriesPoint {
                timestamp: period.start + Duration::days(i64::from(day)),
                value: self.sample_value(),
                unit: self.unit.clone(),
            })
            .collect())
    }

    fn fetch_latest(
        &mut self,
        _source_id: &str,
        period: &Period,
    ) -> Result<Option<SeriesPoint>, EngineError> {
        Ok(Some(SeriesPoint {
            timestamp: period.end,
            value: self.sample_value(),
            unit: self.unit.clone(),
        }))
    }

    fn fetch_alerts(&mut self, period: &Period) -> Result<Vec<AlertData>, EngineError> {
        let count = self.rng.gen_range(3..=8);
        let span_ms = period.duration().num_milliseconds();

        let alerts = (0..count)
            .map(|_| {
                let offset = if span_ms > 0 {
                    self.rng.gen_range(0..span_ms)
                } else {
                    0
                };
                let level = AlertLevel::ALL[self.rng.gen_range(0..AlertLevel::ALL.len())];
                AlertData {
                    timestamp: period.start + Duration::milliseconds(offset),
                    level,
                    source: self.pick(&SOURCES).to_string(),
                    message: self.pick(&MESSAGES).to_string(),
                }
            })
            .collect();

        Ok(alerts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn period(days: i64) -> Period {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        Period::new(start, start + Duration::days(days))
    }

    #[test]
    fn test_series_one_point_per_day() {
        let mut source = SampleDataSource::seeded(7);
        let points = source.fetch_series("default", &period(4)).unwrap();

        assert_eq!(points.len(), 4);
        for (i, point) in points.iter().enumerate() {
            assert_eq!(point.timestamp, period(4).start + Duration::days(i as i64));
            assert!((20.0..120.0).contains(&point.value));
            assert_eq!(point.unit, "°C");
        }
    }

    #[test]
    fn test_series_capped() {
        let mut source = SampleDataSource::seeded(7);
        let points = source.fetch_series("default", &period(30)).unwrap();
        assert_eq!(points.len(), MAX_SERIES_POINTS as usize);
    }

    #[test]
    fn test_series_empty_period() {
        let mut source = SampleDataSource::seeded(7);
        assert!(source.fetch_series("default", &period(0)).unwrap().is_empty());
    }

    #[test]
    fn test_alerts_within_period() {
        let mut source = SampleDataSource::seeded(11);
        let p = period(30);
        let alerts = source.fetch_alerts(&p).unwrap();

        assert!((3..=8).contains(&alerts.len()));
        for alert in &alerts {
            assert!(p.contains(alert.timestamp));
            assert!(SOURCES.contains(&alert.source.as_str()));
            assert!(MESSAGES.contains(&alert.message.as_str()));
        }
    }

    #[test]
    fn test_same_seed_same_data() {
        let p = period(30);
        let a = SampleDataSource::seeded(42).fetch_alerts(&p).unwrap();
        let b = SampleDataSource::seeded(42).fetch_alerts(&p).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_custom_unit() {
        let mut source = SampleDataSource::seeded(1).with_unit("kWh");
        let latest = source.fetch_latest("meter", &period(1)).unwrap().unwrap();
        assert_eq!(latest.unit, "kWh");
    }
}
