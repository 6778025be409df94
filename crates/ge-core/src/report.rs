//! Estimation results and the aggregated report.

use serde::{Deserialize, Serialize};

use crate::key::GroupKey;

/// Author label of the synthetic overall result.
pub const OVERALL_AUTHOR: &str = "all";

/// Effort estimated for one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffortResult {
    /// Base author identity, without any tag.
    pub author: String,
    /// Tag the group was narrowed by (issue key, commit type, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    pub hours: f64,
    pub days: f64,
}

impl EffortResult {
    pub fn new(key: &GroupKey, hours: f64, days: f64) -> Self {
        Self {
            author: key.author.clone(),
            issue: key.tag.clone(),
            hours,
            days,
        }
    }

    /// The group key this result belongs to.
    pub fn key(&self) -> GroupKey {
        GroupKey {
            author: self.author.clone(),
            tag: self.issue.clone(),
        }
    }
}

/// Per-group results plus their overall total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub developers: Vec<EffortResult>,
    pub overall: EffortResult,
}

impl Report {
    /// Aggregates results; the overall hours and days are plain sums.
    pub fn new(developers: Vec<EffortResult>) -> Self {
        let (hours, days) = developers
            .iter()
            .fold((0.0, 0.0), |(h, d), r| (h + r.hours, d + r.days));

        Self {
            overall: EffortResult {
                author: OVERALL_AUTHOR.to_string(),
                issue: None,
                hours,
                days,
            },
            developers,
        }
    }
}
