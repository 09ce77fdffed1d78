//! Energy readings as loaded from the combined dataset

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::Serialize;

use super::Month;

/// One row of the combined dataset: a metered interval at a location
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyReading {
    pub timestamp: DateTime<Utc>,
    pub location: String,
    pub town: String,
    /// Total facility consumption for the interval (kWh)
    pub total_energy_kwh: Option<f64>,
    /// Share of the total attributable to the heat pump (0-100)
    pub heatpump_pct: Option<f64>,
    /// Values of any further dataset columns, aligned with `Dataset::extra_columns`
    pub extra: Vec<String>,
}

impl EnergyReading {
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    pub fn month(&self) -> Month {
        Month::of(&self.timestamp)
    }

    pub fn time(&self) -> NaiveTime {
        self.timestamp.time()
    }

    /// Heat pump consumption for the interval (kWh)
    pub fn heatpump_energy_kwh(&self) -> Option<f64> {
        match (self.total_energy_kwh, self.heatpump_pct) {
            (Some(total), Some(pct)) => Some(total * pct / 100.0),
            _ => None,
        }
    }
}

/// A distinct location and the town it belongs to
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LocationEntry {
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Town")]
    pub town: String,
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a dataset timestamp into UTC.
///
/// Offsets are honoured; naive values are taken to be UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.with_timezone(&Utc));
    }

    let trimmed = raw.strip_suffix(" UTC").unwrap_or(raw);
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
