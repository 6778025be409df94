//! Report rendering.
//!
//! Renders an estimation [`Report`] as human-readable text or as JSON.

use std::fmt::Write;

use anyhow::Result;
use ge_core::Report;
use serde::{Deserialize, Serialize};

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Formats the human-readable report.
///
/// Tagged groups are labelled by their author alone; the tag only shows in JSON.
pub fn format_text(report: &Report) -> String {
    let mut output = String::new();

    for result in &report.developers {
        writeln!(output, "commits by {}", result.author).unwrap();
        writeln!(
            output,
            "=== {:.2} days ({:.2} hours)",
            result.days, result.hours
        )
        .unwrap();
        writeln!(output).unwrap();
    }

    write!(
        output,
        "overall {:.2} days ({:.2} hours)",
        report.overall.days, report.overall.hours
    )
    .unwrap();

    output
}

/// Formats the report as a single-line JSON document.
pub fn format_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string(report)?)
}

/// Renders `report` in the requested format.
pub fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format_text(report)),
        OutputFormat::Json => format_json(report),
    }
}
