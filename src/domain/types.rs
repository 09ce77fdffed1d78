use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use strum::{Display, EnumString};

// ============================================================================
// Aggregation Resolution
// ============================================================================

/// Time bucket used when averaging the heat pump share
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Resolution {
    Hourly,
    #[default]
    Daily,
    Monthly,
}

// ============================================================================
// Calendar Month
// ============================================================================

/// Calendar month period, rendered as `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(ts: &DateTime<Utc>) -> Self {
        Self::new(ts.year(), ts.month())
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
