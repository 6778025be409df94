//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;
use ge_core::Method;

/// Estimate development effort from git commit history.
///
/// Groups commits by author (optionally by issue key or commit type) and
/// converts each group's commit times into hours and days of work.
#[derive(Debug, Parser)]
#[allow(clippy::struct_excessive_bools)]
#[command(name = "git-estimate", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Git repository path.
    #[arg(short, long, default_value = ".")]
    pub repo: PathBuf,

    /// Estimation method: "session" or "day".
    #[arg(short = 'e', long = "estimate", visible_alias = "method", value_name = "METHOD")]
    pub method: Option<Method>,

    /// Output estimates as JSON.
    #[arg(long)]
    pub json: bool,

    /// Output estimates as text, overriding a configured format.
    #[arg(long, conflicts_with = "json")]
    pub text: bool,

    /// Group estimates by commit message content.
    ///
    /// Either a preset (jira, type, scope) or a custom regex with exactly one
    /// capture group.
    #[arg(short, long, value_name = "PATTERN")]
    pub group: Option<String>,

    /// Group by author only, ignoring a configured pattern.
    #[arg(long, conflicts_with = "group")]
    pub no_group: bool,

    /// Baseline hours padding each working session (session method only).
    #[arg(short, long, allow_negative_numbers = true)]
    pub baseline: Option<f64>,

    /// Ignore commits authored before this time.
    ///
    /// Accepts yyyy-mm-ddThh-mm (UTC), yyyy-mm-dd, RFC 3339, or relative
    /// times such as "2 weeks ago".
    #[arg(short, long, value_name = "DATE")]
    pub from: Option<String>,
}
