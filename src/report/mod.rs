//! Downloadable artefacts for a location: CSV report and comparison plot

pub mod csv;
pub mod plot;

pub use self::csv::{report_filename, write_csv_report};
pub use plot::render_comparison_png;
