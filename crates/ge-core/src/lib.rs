//! Effort estimation engine.
//!
//! This crate turns commit events into effort estimates:
//! - Grouping: keying commits by author, optionally tagged from the message
//! - Series: ordering each group's timestamps most recent first
//! - Estimation: the day and working-session heuristics
//! - Report: per-group results and their overall total

pub mod estimate;
pub mod event;
pub mod grouping;
mod key;
pub mod report;
pub mod series;

pub use estimate::{
    DayEstimate, Effort, Estimate, InvalidBaseline, Method, Strategy, UnknownMethod,
    WorkingSession, estimate_events,
};
pub use event::{Event, Timestamp};
pub use grouping::{GroupingError, GroupingPattern, Preset, group_events, group_key};
pub use key::{GroupKey, TAG_SEPARATOR};
pub use report::{EffortResult, OVERALL_AUTHOR, Report};
pub use series::{GroupedSeries, normalize};
