//! Effort estimation strategies.
//!
//! # Strategies
//!
//! - [`DayEstimate`]: every calendar day with at least one commit counts as a
//!   full working day.
//! - [`WorkingSession`]: gaps shorter than [`SESSION_GAP_HOURS`] are counted as
//!   working time; longer gaps close a session, which is credited with the
//!   baseline padding instead.
//!
//! Both operate on series sorted most recent first (see [`crate::series`]).
//! Groups are independent, so [`Estimate::estimate`] runs them in parallel and
//! collects results in key order.

use std::fmt;
use std::str::FromStr;

use chrono::Datelike;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::{Event, Timestamp};
use crate::grouping::{GroupingPattern, group_events};
use crate::report::{EffortResult, Report};
use crate::series::{GroupedSeries, normalize};

/// Length of a working day.
pub const HOURS_PER_DAY: f64 = 8.0;

/// Gaps at least this long (in hours) separate two working sessions.
pub const SESSION_GAP_HOURS: f64 = 8.0;

/// Default padding before the first and after the last commit of a session.
pub const DEFAULT_BASELINE_HOURS: f64 = 2.0;

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Hours and days estimated for one series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Effort {
    pub hours: f64,
    pub days: f64,
}

/// An effort estimation heuristic.
pub trait Estimate: Sync {
    /// Estimates one series, sorted most recent first and non-empty.
    fn estimate_series(&self, series: &[Timestamp]) -> Effort;

    /// Estimates every group.
    fn estimate(&self, grouped: &GroupedSeries) -> Vec<EffortResult> {
        grouped
            .par_iter()
            .map(|(key, series)| {
                let effort = self.estimate_series(series);
                tracing::trace!(%key, commits = series.len(), hours = effort.hours, "estimated group");
                EffortResult::new(key, effort.hours, effort.days)
            })
            .collect()
    }
}

/// A commit on a calendar day means a full day of work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayEstimate;

impl Estimate for DayEstimate {
    fn estimate_series(&self, series: &[Timestamp]) -> Effort {
        let mut days = 0.0;
        let mut prev: Option<&Timestamp> = None;
        for ts in series {
            // Day of year only: the same date a year apart counts once.
            if prev.is_some_and(|p| p.ordinal() != ts.ordinal()) {
                days += 1.0;
            }
            prev = Some(ts);
        }
        // the oldest day
        days += 1.0;

        Effort {
            hours: days * HOURS_PER_DAY,
            days,
        }
    }
}

/// The baseline is negative or not a finite number.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("baseline must be a finite, non-negative number of hours, got {0}")]
pub struct InvalidBaseline(pub f64);

/// Continuous working sessions padded by a baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkingSession {
    baseline: f64,
}

impl Default for WorkingSession {
    fn default() -> Self {
        Self {
            baseline: DEFAULT_BASELINE_HOURS,
        }
    }
}

impl WorkingSession {
    pub fn new(baseline: f64) -> Result<Self, InvalidBaseline> {
        if baseline.is_finite() && baseline >= 0.0 {
            Ok(Self { baseline })
        } else {
            Err(InvalidBaseline(baseline))
        }
    }

    pub const fn baseline(&self) -> f64 {
        self.baseline
    }
}

impl Estimate for WorkingSession {
    fn estimate_series(&self, series: &[Timestamp]) -> Effort {
        let mut hours = 0.0;
        for pair in series.windows(2) {
            let (next, t) = (pair[0], pair[1]);
            let diff = hours_between(next, t);
            if diff < SESSION_GAP_HOURS {
                hours += diff;
            } else {
                // separate sessions: credit the wind-down of the earlier one
                hours += self.baseline;
            }
        }
        // warm-up before the first commit
        hours += self.baseline;

        Effort {
            hours,
            days: hours / HOURS_PER_DAY,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn hours_between(later: Timestamp, earlier: Timestamp) -> f64 {
    (later - earlier).num_milliseconds() as f64 / MS_PER_HOUR
}

/// Error for unknown estimation method names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid estimation method {0:?}, accepted values are \"session\" and \"day\"")]
pub struct UnknownMethod(pub String);

/// Estimation method names accepted from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    #[default]
    Session,
    Day,
}

impl Method {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Session => "session",
            Self::Day => "day",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "session" => Ok(Self::Session),
            "day" => Ok(Self::Day),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

/// The strategy selected for a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    Day(DayEstimate),
    Session(WorkingSession),
}

impl Strategy {
    /// Builds the strategy for `method`; `baseline` only applies to sessions.
    pub fn new(method: Method, baseline: f64) -> Result<Self, InvalidBaseline> {
        match method {
            Method::Day => Ok(Self::Day(DayEstimate)),
            Method::Session => WorkingSession::new(baseline).map(Self::Session),
        }
    }

    pub const fn method(&self) -> Method {
        match self {
            Self::Day(_) => Method::Day,
            Self::Session(_) => Method::Session,
        }
    }
}

impl Estimate for Strategy {
    fn estimate_series(&self, series: &[Timestamp]) -> Effort {
        match self {
            Self::Day(day) => day.estimate_series(series),
            Self::Session(session) => session.estimate_series(series),
        }
    }
}

/// Runs the whole engine: group, normalize, estimate, aggregate.
pub fn estimate_events(
    events: &[Event],
    pattern: Option<&GroupingPattern>,
    strategy: &impl Estimate,
) -> Report {
    let grouped = normalize(group_events(events, pattern));
    let results = strategy.estimate(&grouped);
    tracing::debug!(groups = results.len(), "estimated effort");
    Report::new(results)
}
