use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::{EnergyReading, Month, Resolution};

/// Time bucket a share value was averaged over
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum SharePeriod {
    Hour {
        date: NaiveDate,
        hour: u32,
    },
    Day {
        date: NaiveDate,
    },
    Month {
        #[cfg_attr(feature = "swagger", schema(value_type = String, example = "2024-01"))]
        month: Month,
    },
}

impl SharePeriod {
    pub fn of(reading: &EnergyReading, resolution: Resolution) -> Self {
        match resolution {
            Resolution::Hourly => SharePeriod::Hour {
                date: reading.date(),
                hour: reading.hour(),
            },
            Resolution::Daily => SharePeriod::Day {
                date: reading.date(),
            },
            Resolution::Monthly => SharePeriod::Month {
                month: reading.month(),
            },
        }
    }
}

/// Mean heat pump share over one period
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharePoint {
    #[serde(flatten)]
    pub period: SharePeriod,
    /// `None` when every reading in the period lacks a share value
    pub heatpump_pct: Option<f64>,
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Average the heat pump share per period, ordered by period
pub fn heatpump_share<'a, I>(readings: I, resolution: Resolution) -> Vec<SharePoint>
where
    I: IntoIterator<Item = &'a EnergyReading>,
{
    let mut groups: BTreeMap<SharePeriod, Accumulator> = BTreeMap::new();
    for reading in readings {
        groups
            .entry(SharePeriod::of(reading, resolution))
            .or_default()
            .push(reading.heatpump_pct);
    }

    groups
        .into_iter()
        .map(|(period, acc)| SharePoint {
            period,
            heatpump_pct: acc.mean(),
        })
        .collect()
}
