use itertools::{Itertools, MinMaxResult};
use serde::Serialize;

use crate::domain::EnergyReading;

/// Summary of a location's heat pump share
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub location: String,
    pub average_heatpump_pct: Option<f64>,
    pub max_heatpump_pct: Option<f64>,
    pub min_heatpump_pct: Option<f64>,
    /// Rows for the location, including rows without a share value
    pub data_points: usize,
}

/// Round to two decimals, ties to even
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

pub fn summarize<'a, I>(location: &str, readings: I) -> SummaryMetrics
where
    I: IntoIterator<Item = &'a EnergyReading>,
{
    let mut data_points = 0usize;
    let values: Vec<f64> = readings
        .into_iter()
        .inspect(|_| data_points += 1)
        .filter_map(|r| r.heatpump_pct)
        .collect();

    let average = (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64);
    let (min, max) = match values.iter().copied().minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => (None, None),
        MinMaxResult::OneElement(v) => (Some(v), Some(v)),
        MinMaxResult::MinMax(lo, hi) => (Some(lo), Some(hi)),
    };

    SummaryMetrics {
        location: location.to_string(),
        average_heatpump_pct: average.map(round2),
        max_heatpump_pct: max.map(round2),
        min_heatpump_pct: min.map(round2),
        data_points,
    }
}
