//! Parquet dataset reader

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Schema, TimeUnit, TimestampMillisecondType};
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, Utc};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::fs::File;
use std::path::Path;

use super::{
    is_extra_column, Dataset, DatasetError, HEATPUMP_PCT_COLUMN, LOCATION_COLUMN,
    TIMESTAMP_COLUMN, TOTAL_ENERGY_COLUMN, TOWN_COLUMN,
};
use crate::domain::{parse_timestamp, EnergyReading};

pub fn read_parquet_file(path: &Path) -> Result<Dataset, DatasetError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(File::open(path)?)?;
    let schema = builder.schema().clone();
    let reader = builder.build()?;

    let ts_idx = column_index(&schema, TIMESTAMP_COLUMN)
        .ok_or(DatasetError::MissingColumn(TIMESTAMP_COLUMN))?;
    let location_idx = column_index(&schema, LOCATION_COLUMN);
    let town_idx = column_index(&schema, TOWN_COLUMN);
    let total_idx = column_index(&schema, TOTAL_ENERGY_COLUMN);
    let pct_idx = column_index(&schema, HEATPUMP_PCT_COLUMN);

    let extra: Vec<(usize, String)> = schema
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, field)| is_extra_column(field.name()))
        .map(|(idx, field)| (idx, field.name().clone()))
        .collect();

    let mut readings = Vec::new();
    for batch in reader {
        let batch = batch?;
        let offset = readings.len();

        let timestamps = timestamp_values(batch.column(ts_idx), offset)?;
        let locations = string_values(&batch, location_idx)?;
        let towns = string_values(&batch, town_idx)?;
        let totals = number_values(&batch, total_idx)?;
        let pcts = number_values(&batch, pct_idx)?;
        let extras = extra
            .iter()
            .map(|(idx, _)| string_values(&batch, Some(*idx)))
            .collect::<Result<Vec<_>, _>>()?;

        for (row, timestamp) in timestamps.into_iter().enumerate() {
            readings.push(EnergyReading {
                timestamp,
                location: locations[row].trim().to_string(),
                town: towns[row].trim().to_string(),
                total_energy_kwh: totals[row],
                heatpump_pct: pcts[row],
                extra: extras.iter().map(|col| col[row].clone()).collect(),
            });
        }
    }

    Ok(Dataset::new(
        extra.into_iter().map(|(_, name)| name).collect(),
        readings,
    ))
}

fn column_index(schema: &Schema, name: &str) -> Option<usize> {
    schema.index_of(name).ok()
}

fn timestamp_values(column: &ArrayRef, offset: usize) -> Result<Vec<DateTime<Utc>>, DatasetError> {
    let invalid = |row: usize, value: String| DatasetError::InvalidTimestamp {
        row: offset + row + 1,
        value,
    };

    match column.data_type() {
        DataType::Timestamp(_, _) | DataType::Date32 | DataType::Date64 => {
            // Keep any zone so the values stay UTC epoch millis.
            let tz = match column.data_type() {
                DataType::Timestamp(_, tz) => tz.clone(),
                _ => None,
            };
            let millis = cast(column, &DataType::Timestamp(TimeUnit::Millisecond, tz))?;
            let millis = millis.as_primitive::<TimestampMillisecondType>();
            (0..millis.len())
                .map(|row| {
                    if millis.is_null(row) {
                        return Err(invalid(row, String::new()));
                    }
                    let value = millis.value(row);
                    DateTime::from_timestamp_millis(value).ok_or_else(|| invalid(row, value.to_string()))
                })
                .collect()
        }
        _ => {
            let text = cast(column, &DataType::Utf8)?;
            let text = text.as_string::<i32>();
            (0..text.len())
                .map(|row| {
                    let raw = if text.is_null(row) { "" } else { text.value(row) };
                    parse_timestamp(raw).ok_or_else(|| invalid(row, raw.to_string()))
                })
                .collect()
        }
    }
}

fn string_values(batch: &RecordBatch, idx: Option<usize>) -> Result<Vec<String>, DatasetError> {
    let Some(idx) = idx else {
        return Ok(vec![String::new(); batch.num_rows()]);
    };
    let text = cast(batch.column(idx), &DataType::Utf8)?;
    let text = text.as_string::<i32>();
    Ok((0..text.len())
        .map(|row| {
            if text.is_null(row) {
                String::new()
            } else {
                text.value(row).to_string()
            }
        })
        .collect())
}

fn number_values(batch: &RecordBatch, idx: Option<usize>) -> Result<Vec<Option<f64>>, DatasetError> {
    let Some(idx) = idx else {
        return Ok(vec![None; batch.num_rows()]);
    };
    let values = cast(batch.column(idx), &DataType::Float64)?;
    let values = values.as_primitive::<Float64Type>();
    Ok((0..values.len())
        .map(|row| {
            let value = values.value(row);
            (!values.is_null(row) && value.is_finite()).then_some(value)
        })
        .collect())
}
