//! The estimate command: read history, estimate, render.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use ge_core::{GroupingPattern, Method, Strategy, estimate_events};
use ge_git::CommitLog;

use super::report::{OutputFormat, render};
use super::util::parse_cutoff;
use crate::{Cli, Config};

/// Fully resolved options for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateOptions {
    pub repo: PathBuf,
    pub method: Method,
    pub baseline: f64,
    pub format: OutputFormat,
    pub group: Option<String>,
    pub from: Option<String>,
}

impl EstimateOptions {
    /// Applies command-line flags on top of the loaded configuration.
    pub fn resolve(cli: &Cli, config: Config) -> Self {
        Self {
            repo: cli.repo.clone(),
            method: cli.method.unwrap_or(config.method),
            baseline: cli.baseline.unwrap_or(config.baseline),
            format: if cli.json {
                OutputFormat::Json
            } else if cli.text {
                OutputFormat::Text
            } else {
                config.format
            },
            group: if cli.no_group {
                None
            } else {
                cli.group.clone().or(config.group)
            },
            from: cli.from.clone(),
        }
    }
}

/// Runs the estimation and returns the rendered report.
///
/// Every option is validated before the repository is touched.
pub fn execute(options: &EstimateOptions) -> Result<String> {
    let strategy = Strategy::new(options.method, options.baseline)?;

    let pattern = options
        .group
        .as_deref()
        .map(GroupingPattern::parse)
        .transpose()?;

    let cutoff = options
        .from
        .as_deref()
        .map(|from| parse_cutoff(from, Utc::now()))
        .transpose()?;

    tracing::debug!(
        method = %strategy.method(),
        group = pattern.as_ref().map(GroupingPattern::as_str),
        cutoff = ?cutoff,
        "estimating"
    );

    let log = CommitLog::open(&options.repo)?;
    let events = log.commits(cutoff)?;
    let report = estimate_events(&events, pattern.as_ref(), &strategy);

    render(&report, options.format).context("failed to render report")
}

/// Runs the estimate command, printing the report to stdout.
pub fn run(options: &EstimateOptions) -> Result<()> {
    let output = execute(options)?;
    println!("{output}");
    Ok(())
}
