//! Per-location CSV report

use anyhow::{anyhow, Result};

use crate::dataset::{
    Dataset, DERIVED_COLUMNS, HEATPUMP_PCT_COLUMN, LOCATION_COLUMN, TIMESTAMP_COLUMN,
    TOTAL_ENERGY_COLUMN, TOWN_COLUMN,
};
use crate::domain::EnergyReading;

/// Write the readings as CSV, columns in dataset order followed by the
/// derived calendar columns.
pub fn write_csv_report<'a, I>(dataset: &Dataset, readings: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a EnergyReading>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec![
        TIMESTAMP_COLUMN,
        LOCATION_COLUMN,
        TOWN_COLUMN,
        TOTAL_ENERGY_COLUMN,
        HEATPUMP_PCT_COLUMN,
    ];
    header.extend(dataset.extra_columns().iter().map(String::as_str));
    header.extend(DERIVED_COLUMNS);
    writer.write_record(&header)?;

    for reading in readings {
        let mut record = vec![
            reading
                .timestamp
                .format("%Y-%m-%d %H:%M:%S%.f%:z")
                .to_string(),
            reading.location.clone(),
            reading.town.clone(),
            format_number(reading.total_energy_kwh),
            format_number(reading.heatpump_pct),
        ];
        record.extend(reading.extra.iter().cloned());
        record.push(reading.hour().to_string());
        record.push(reading.date().to_string());
        record.push(reading.month().to_string());
        record.push(reading.time().format("%H:%M:%S").to_string());
        writer.write_record(&record)?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow!("failed to flush CSV report: {}", e.error()))
}

/// Shortest round-trip form; exponents are signed and at least two digits
/// wide (`1e+20`, `1.5e-07`).
fn format_number(value: Option<f64>) -> String {
    let Some(v) = value else {
        return String::new();
    };
    let repr = format!("{v:?}");
    match repr.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => repr,
    }
}

/// Attachment filename for a location's report, restricted to safe characters
pub fn report_filename(location: &str) -> String {
    let safe: String = location
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{safe}_report.csv")
}
