//! Heat pump share analysis
//!
//! Pure functions over dataset readings: per-period share averages, summary
//! statistics and the location listing.

pub mod locations;
pub mod share;
pub mod summary;

pub use locations::list_locations;
pub use share::{heatpump_share, SharePeriod, SharePoint};
pub use summary::{round2, summarize, SummaryMetrics};
