//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use ge_core::Method;
use ge_core::estimate::DEFAULT_BASELINE_HOURS;
use serde::{Deserialize, Serialize};

use crate::commands::report::OutputFormat;

/// Application configuration.
///
/// Command-line flags take precedence over every value here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Estimation method.
    pub method: Method,

    /// Session padding in hours.
    pub baseline: f64,

    /// Output format.
    pub format: OutputFormat,

    /// Grouping preset or custom pattern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            method: Method::default(),
            baseline: DEFAULT_BASELINE_HOURS,
            format: OutputFormat::default(),
            group: None,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Self::figment(config_path);

        // Load from environment variables (GE_*)
        figment = figment.merge(Env::prefixed("GE_"));

        figment.extract()
    }

    /// Defaults plus config files, without the environment.
    fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment
    }
}

/// Returns the platform-specific config directory for git-estimate.
///
/// On Linux: `~/.config/git-estimate`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("git-estimate"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_dirs_config_path_ends_with_app_name() {
        if let Some(path) = dirs_config_path() {
            assert_eq!(path.file_name().unwrap(), "git-estimate");
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.method, Method::Session);
        assert!((config.baseline - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.format, OutputFormat::Text);
        assert!(config.group.is_none());
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "method = \"day\"").unwrap();
        writeln!(file, "baseline = 1.5").unwrap();
        writeln!(file, "format = \"json\"").unwrap();
        writeln!(file, "group = \"jira\"").unwrap();

        let config: Config = Config::figment(Some(file.path())).extract().unwrap();

        assert_eq!(config.method, Method::Day);
        assert!((config.baseline - 1.5).abs() < f64::EPSILON);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.group.as_deref(), Some("jira"));
    }

    #[test]
    fn test_missing_config_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config: Config = Config::figment(Some(&path)).extract().unwrap();
        assert_eq!(config.method, Config::default().method);
    }

    #[test]
    fn test_unknown_method_in_config_fails() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "method = \"weekly\"").unwrap();

        let result: Result<Config, _> = Config::figment(Some(file.path())).extract();
        assert!(result.is_err());
    }
}
