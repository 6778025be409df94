//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::Context;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use ge_core::Timestamp;
use regex::Regex;

/// Cutoff layout accepted by earlier releases: `2024-03-01T09-30`, read as UTC.
const LEGACY_CUTOFF_LAYOUT: &str = "%Y-%m-%dT%H-%M";

/// Pre-compiled regex for relative time parsing.
static RELATIVE_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(minute|hour|day|week)s?\s+ago$").unwrap());

/// Conservative bounds for relative time parsing (~1000 years in minutes).
const MAX_RELATIVE_MINUTES: i64 = 1000 * 365 * 24 * 60;

/// Parse a cutoff time.
///
/// Supports:
/// - Legacy: "2024-03-01T09-30" (UTC)
/// - ISO 8601: "2024-03-01T09:30:00+01:00"
/// - Date: "2024-03-01" (UTC midnight)
/// - Relative to `now`: "2 hours ago", "30 minutes ago", "1 day ago", "1 week ago"
pub fn parse_cutoff(s: &str, now: DateTime<Utc>) -> anyhow::Result<Timestamp> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, LEGACY_CUTOFF_LAYOUT) {
        return Ok(naive.and_utc().fixed_offset());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }

    if let Some(midnight) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc().fixed_offset());
    }

    // Try relative time: "N hours/minutes/days/weeks ago"
    let Some(caps) = RELATIVE_TIME_RE.captures(s) else {
        anyhow::bail!(
            "Unable to parse cutoff {s:?}. Use yyyy-mm-ddThh-mm (e.g., 2024-03-01T09-30), \
             ISO 8601 (e.g., 2024-03-01T09:30:00Z) or relative (e.g., '2 weeks ago')"
        );
    };

    let n: i64 = caps[1]
        .parse()
        .context("failed to parse number in relative time")?;

    let (max_for_unit, minutes_per_unit) = match &caps[2] {
        "minute" => (MAX_RELATIVE_MINUTES, 1),
        "hour" => (MAX_RELATIVE_MINUTES / 60, 60),
        "day" => (MAX_RELATIVE_MINUTES / (60 * 24), 60 * 24),
        "week" => (MAX_RELATIVE_MINUTES / (60 * 24 * 7), 60 * 24 * 7),
        unit => anyhow::bail!("Unknown time unit: {unit}"),
    };

    if n > max_for_unit {
        anyhow::bail!("Relative time value too large: {n} {}", &caps[2]);
    }

    let duration = Duration::minutes(n * minutes_per_unit);
    Ok((now - duration).fixed_offset())
}
