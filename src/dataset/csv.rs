//! CSV dataset reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::{
    is_extra_column, parse_optional_number, Dataset, DatasetError, HEATPUMP_PCT_COLUMN,
    LOCATION_COLUMN, TIMESTAMP_COLUMN, TOTAL_ENERGY_COLUMN, TOWN_COLUMN,
};
use crate::domain::{parse_timestamp, EnergyReading};

pub fn read_csv_file(path: &Path) -> Result<Dataset, DatasetError> {
    read_csv(File::open(path)?)
}

/// Read a headed CSV stream into a dataset
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset, DatasetError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let position = |name: &str| headers.iter().position(|h| h.trim() == name);

    let ts_idx = position(TIMESTAMP_COLUMN).ok_or(DatasetError::MissingColumn(TIMESTAMP_COLUMN))?;
    let location_idx = position(LOCATION_COLUMN);
    let town_idx = position(TOWN_COLUMN);
    let total_idx = position(TOTAL_ENERGY_COLUMN);
    let pct_idx = position(HEATPUMP_PCT_COLUMN);

    let extra: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(_, name)| is_extra_column(name.trim()))
        .map(|(idx, name)| (idx, name.trim().to_string()))
        .collect();

    let mut readings = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let row = i + 1;
        let cell = |idx: Option<usize>| idx.and_then(|idx| record.get(idx)).unwrap_or("");

        let raw_ts = cell(Some(ts_idx));
        let timestamp = parse_timestamp(raw_ts).ok_or_else(|| DatasetError::InvalidTimestamp {
            row,
            value: raw_ts.to_string(),
        })?;

        let number = |idx: Option<usize>, column: &str| {
            let raw = cell(idx);
            parse_optional_number(raw).map_err(|_| DatasetError::InvalidNumber {
                row,
                column: column.to_string(),
                value: raw.to_string(),
            })
        };

        readings.push(EnergyReading {
            timestamp,
            location: cell(location_idx).trim().to_string(),
            town: cell(town_idx).trim().to_string(),
            total_energy_kwh: number(total_idx, TOTAL_ENERGY_COLUMN)?,
            heatpump_pct: number(pct_idx, HEATPUMP_PCT_COLUMN)?,
            extra: extra
                .iter()
                .map(|(idx, _)| record.get(*idx).unwrap_or("").to_string())
                .collect(),
        });
    }

    Ok(Dataset::new(
        extra.into_iter().map(|(_, name)| name).collect(),
        readings,
    ))
}
