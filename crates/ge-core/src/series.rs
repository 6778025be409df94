//! Per-group time series and their normalization.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::event::Timestamp;
use crate::key::GroupKey;

/// Commit timestamps per group, keyed in a stable order.
pub type GroupedSeries = BTreeMap<GroupKey, Vec<Timestamp>>;

/// Sorts one series most recent first.
///
/// The sort is stable, so equal timestamps keep their input order. Nothing is
/// deduplicated.
pub fn sort_recent_first(series: &mut [Timestamp]) {
    series.sort_by_key(|ts| Reverse(*ts));
}

/// Whether a series is already ordered most recent first.
pub fn is_recent_first(series: &[Timestamp]) -> bool {
    series.windows(2).all(|pair| pair[0] >= pair[1])
}

/// Sorts every group's series most recent first.
pub fn normalize(mut grouped: GroupedSeries) -> GroupedSeries {
    for series in grouped.values_mut() {
        sort_recent_first(series);
    }
    grouped
}
