use std::collections::BTreeSet;

use crate::dataset::Dataset;
use crate::domain::LocationEntry;

/// Distinct (location, town) pairs sorted by location, then town.
///
/// `town_filter` keeps rows whose town contains it, ignoring case. An empty
/// filter is the same as none.
pub fn list_locations(dataset: &Dataset, town_filter: Option<&str>) -> Vec<LocationEntry> {
    let needle = town_filter
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase);

    dataset
        .readings()
        .iter()
        .filter(|r| match &needle {
            Some(needle) => r.town.to_lowercase().contains(needle.as_str()),
            None => true,
        })
        .map(|r| LocationEntry {
            location: r.location.clone(),
            town: r.town.clone(),
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
