//! Combined energy dataset
//!
//! The dataset is loaded once at startup and shared read-only across all
//! request handlers. Rows keep file order; derived calendar columns are
//! recomputed from the UTC timestamp rather than trusted from the file.

pub mod csv;
#[cfg(feature = "parquet")]
pub mod parquet;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::EnergyReading;

pub const TIMESTAMP_COLUMN: &str = "timestamp";
pub const LOCATION_COLUMN: &str = "Location";
pub const TOWN_COLUMN: &str = "Town";
pub const TOTAL_ENERGY_COLUMN: &str = "total_energy_kWh";
pub const HEATPUMP_PCT_COLUMN: &str = "heatpump_pct";

/// Columns recomputed from the timestamp on load
pub const DERIVED_COLUMNS: [&str; 4] = ["hour", "date", "month", "time"];

const KNOWN_COLUMNS: [&str; 5] = [
    TIMESTAMP_COLUMN,
    LOCATION_COLUMN,
    TOWN_COLUMN,
    TOTAL_ENERGY_COLUMN,
    HEATPUMP_PCT_COLUMN,
];

/// Errors raised while loading the dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Dataset not found at {}. Please ensure it's generated and saved properly.", .0.display())]
    NotFound(PathBuf),

    #[error("Unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("Row {row}: invalid timestamp `{value}`")]
    InvalidTimestamp { row: usize, value: String },

    #[error("Row {row}: invalid number `{value}` in column `{column}`")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[cfg(feature = "parquet")]
    #[error("Parquet error: {0}")]
    Parquet(#[from] ::parquet::errors::ParquetError),

    #[cfg(feature = "parquet")]
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

/// In-memory dataset of energy readings
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    extra_columns: Vec<String>,
    readings: Vec<EnergyReading>,
    location_count: usize,
}

impl Dataset {
    pub fn new(extra_columns: Vec<String>, readings: Vec<EnergyReading>) -> Self {
        let location_count = readings
            .iter()
            .map(|r| r.location.as_str())
            .collect::<HashSet<_>>()
            .len();
        Self {
            extra_columns,
            readings,
            location_count,
        }
    }

    /// Load a dataset, picking the reader from the file extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DatasetError::NotFound(path.to_path_buf()));
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let dataset = match extension.as_deref() {
            Some("csv") => csv::read_csv_file(path)?,
            #[cfg(feature = "parquet")]
            Some("parquet") => parquet::read_parquet_file(path)?,
            _ => return Err(DatasetError::UnsupportedFormat(path.to_path_buf())),
        };

        tracing::info!(
            path = %path.display(),
            readings = dataset.len(),
            locations = dataset.location_count(),
            extra_columns = dataset.extra_columns.len(),
            "dataset loaded"
        );

        Ok(dataset)
    }

    pub fn readings(&self) -> &[EnergyReading] {
        &self.readings
    }

    /// Names of the pass-through columns, in file order
    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Readings whose location matches exactly
    pub fn for_location(&self, location: &str) -> Vec<&EnergyReading> {
        self.readings
            .iter()
            .filter(|r| r.location == location)
            .collect()
    }

    /// Number of distinct location names
    pub fn location_count(&self) -> usize {
        self.location_count
    }
}

/// True for columns passed through to reports untouched
pub(crate) fn is_extra_column(name: &str) -> bool {
    !KNOWN_COLUMNS.contains(&name) && !DERIVED_COLUMNS.contains(&name)
}

/// Parse an optional numeric cell. Empty cells, NaN and infinities count
/// as missing.
pub(crate) fn parse_optional_number(raw: &str) -> Result<Option<f64>, ()> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("nan") || raw.eq_ignore_ascii_case("null") {
        return Ok(None);
    }
    let value: f64 = raw.parse().map_err(|_| ())?;
    Ok(value.is_finite().then_some(value))
}
