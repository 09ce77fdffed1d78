//! Heat Pump Contribution API
//!
//! Serves the heat pump share of facility energy consumption from a combined
//! per-location dataset: time-resolved share, summary statistics, comparison
//! plots, CSV reports and the list of metered locations.

pub mod analysis;
pub mod api;
pub mod config;
pub mod dataset;
pub mod domain;
pub mod report;
pub mod state;
pub mod telemetry;
