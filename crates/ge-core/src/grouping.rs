//! Grouping key builder.
//!
//! Commits are grouped by author, optionally narrowed by a tag captured from
//! the commit message. The tag comes from a pattern with exactly one capturing
//! group: either one of the [`Preset`]s or a caller-supplied regex.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::event::Event;
use crate::key::GroupKey;
use crate::series::GroupedSeries;

/// Leading ticket key in the Jira smart-commit style (`ABC-123 fix bug`).
///
/// Word and digit classes are ASCII-only; `ABç-12` is not a ticket key.
static JIRA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[0-9A-Za-z_:]+ )?([a-zA-Z][0-9A-Za-z_]+-[0-9]+)[^0-9]").unwrap()
});

/// Conventional-commit type (`feat:`, `fix(parser):`, `refactor!:`).
static TYPE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([a-zA-Z!]+)[\(:]").unwrap());

/// Conventional-commit scope (`fix(parser): ...` captures `parser`).
static SCOPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\()]+\(([^\)]+)\)").unwrap());

/// Errors raised while validating a grouping pattern.
#[derive(Debug, Error)]
pub enum GroupingError {
    /// An explicitly empty pattern was given.
    #[error("grouping pattern is empty; provide a custom pattern or one of: {}", Preset::NAMES.join(", "))]
    Empty,

    /// The pattern is not a valid regular expression.
    #[error("invalid grouping pattern {pattern:?}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The pattern does not define exactly one capturing group.
    #[error("grouping pattern must define exactly 1 capture group, {pattern:?} defines {found}")]
    CaptureGroupCount { pattern: String, found: usize },
}

/// Predefined grouping patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// First Jira issue key in the message.
    Jira,
    /// Type component of a conventional commit.
    Type,
    /// Scope component of a conventional commit.
    Scope,
}

impl Preset {
    /// Canonical preset names.
    pub const NAMES: [&'static str; 3] = ["jira", "type", "scope"];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Jira => "jira",
            Self::Type => "type",
            Self::Scope => "scope",
        }
    }

    fn regex(self) -> &'static Regex {
        match self {
            Self::Jira => &JIRA_RE,
            Self::Type => &TYPE_RE,
            Self::Scope => &SCOPE_RE,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jira" | "issue-tag" => Ok(Self::Jira),
            "type" | "commit-type" => Ok(Self::Type),
            "scope" | "commit-scope" => Ok(Self::Scope),
            _ => Err(format!("unknown grouping preset: {s}")),
        }
    }
}

/// A validated grouping pattern with exactly one capturing group.
#[derive(Debug, Clone)]
pub struct GroupingPattern {
    regex: Regex,
    preset: Option<Preset>,
}

impl GroupingPattern {
    /// Resolves a preset name, or compiles `pattern` as a custom regex.
    pub fn parse(pattern: &str) -> Result<Self, GroupingError> {
        if pattern.is_empty() {
            return Err(GroupingError::Empty);
        }
        if let Ok(preset) = pattern.parse::<Preset>() {
            return Ok(Self::preset(preset));
        }
        Self::custom(pattern)
    }

    /// Uses one of the predefined patterns.
    pub fn preset(preset: Preset) -> Self {
        Self {
            regex: preset.regex().clone(),
            preset: Some(preset),
        }
    }

    /// Compiles a custom pattern, rejecting anything without exactly one
    /// capturing group.
    pub fn custom(pattern: &str) -> Result<Self, GroupingError> {
        let regex = Regex::new(pattern).map_err(|source| GroupingError::InvalidRegex {
            pattern: pattern.to_string(),
            source,
        })?;

        // captures_len counts the implicit whole-match group
        let found = regex.captures_len() - 1;
        if found != 1 {
            return Err(GroupingError::CaptureGroupCount {
                pattern: pattern.to_string(),
                found,
            });
        }

        Ok(Self {
            regex,
            preset: None,
        })
    }

    /// The preset this pattern came from, if any.
    pub const fn preset_kind(&self) -> Option<Preset> {
        self.preset
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns the captured tag, if the pattern matches with a non-empty capture.
    pub fn extract_tag<'m>(&self, message: &'m str) -> Option<&'m str> {
        self.regex
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|tag| !tag.is_empty())
    }
}

/// Builds the group key for one commit.
pub fn group_key(author: &str, message: &str, pattern: Option<&GroupingPattern>) -> GroupKey {
    match pattern.and_then(|p| p.extract_tag(message)) {
        Some(tag) => GroupKey::tagged(author, tag),
        None => GroupKey::author(author),
    }
}

/// Partitions events into per-key timestamp lists, in input order.
///
/// Every key in the result has at least one timestamp.
pub fn group_events<'a, I>(events: I, pattern: Option<&GroupingPattern>) -> GroupedSeries
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut grouped = GroupedSeries::new();
    let mut count = 0usize;
    for event in events {
        let key = group_key(&event.author, &event.message, pattern);
        tracing::trace!(%key, timestamp = %event.timestamp, "grouped commit");
        grouped.entry(key).or_default().push(event.timestamp);
        count += 1;
    }
    tracing::debug!(events = count, groups = grouped.len(), "grouped commits");
    grouped
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;

    fn event(author: &str, ts: &str, message: &str) -> Event {
        Event::new(author, DateTime::parse_from_rfc3339(ts).unwrap(), message)
    }

    #[test]
    fn test_no_pattern_keys_by_author() {
        let key = group_key("dev@x.com", "ABC-123 fix bug", None);
        assert_eq!(key, GroupKey::author("dev@x.com"));
    }

    #[test]
    fn test_jira_preset_extracts_issue_key() {
        let pattern = GroupingPattern::parse("jira").unwrap();
        let key = group_key("dev@x.com", "ABC-123 fix bug", Some(&pattern));
        assert_eq!(key, GroupKey::tagged("dev@x.com", "ABC-123"));
        assert_eq!(key.to_string(), "dev@x.com@ABC-123");
    }

    #[test]
    fn test_jira_preset_skips_leading_word() {
        let pattern = GroupingPattern::preset(Preset::Jira);
        assert_eq!(pattern.extract_tag("fix: PROJ-42 handle nulls"), Some("PROJ-42"));
        assert_eq!(pattern.extract_tag("no ticket here"), None);
    }

    #[test]
    fn test_jira_preset_is_ascii_only() {
        let pattern = GroupingPattern::preset(Preset::Jira);
        assert_eq!(pattern.extract_tag("ABç-12 x"), None);
        assert_eq!(pattern.extract_tag("AB-١٢ x"), None);
        assert_eq!(pattern.extract_tag("ABC-123 fix ç"), Some("ABC-123"));
        assert_eq!(pattern.extract_tag("ABC-123é done"), Some("ABC-123"));
    }

    #[test]
    fn test_type_preset() {
        let pattern = GroupingPattern::preset(Preset::Type);
        assert_eq!(pattern.extract_tag("feat(parser): add lexer"), Some("feat"));
        assert_eq!(pattern.extract_tag("fix: off by one"), Some("fix"));
        assert_eq!(pattern.extract_tag("refactor!: drop v1 api"), Some("refactor!"));
        assert_eq!(pattern.extract_tag("Update README"), None);
    }

    #[test]
    fn test_scope_preset() {
        let pattern = GroupingPattern::preset(Preset::Scope);
        assert_eq!(pattern.extract_tag("feat(parser): add lexer"), Some("parser"));
        assert_eq!(pattern.extract_tag("fix: off by one"), None);
    }

    #[test]
    fn test_preset_aliases() {
        assert_eq!("issue-tag".parse::<Preset>().unwrap(), Preset::Jira);
        assert_eq!("commit-type".parse::<Preset>().unwrap(), Preset::Type);
        assert_eq!("commit-scope".parse::<Preset>().unwrap(), Preset::Scope);
        assert!("epic".parse::<Preset>().is_err());
    }

    #[test]
    fn test_parse_resolves_presets_before_custom() {
        let pattern = GroupingPattern::parse("scope").unwrap();
        assert_eq!(pattern.preset_kind(), Some(Preset::Scope));

        let custom = GroupingPattern::parse(r"#(\d+)").unwrap();
        assert_eq!(custom.preset_kind(), None);
        assert_eq!(custom.extract_tag("closes #77"), Some("77"));
    }

    #[test]
    fn test_custom_pattern_without_capture_group_rejected() {
        let err = GroupingPattern::parse(r"\d+").unwrap_err();
        assert!(matches!(err, GroupingError::CaptureGroupCount { found: 0, .. }));
    }

    #[test]
    fn test_custom_pattern_with_two_capture_groups_rejected() {
        let err = GroupingPattern::parse(r"(\w+)-(\d+)").unwrap_err();
        assert!(matches!(err, GroupingError::CaptureGroupCount { found: 2, .. }));
        assert_eq!(
            err.to_string(),
            r#"grouping pattern must define exactly 1 capture group, "(\\w+)-(\\d+)" defines 2"#
        );
    }

    #[test]
    fn test_non_capturing_groups_do_not_count() {
        assert!(GroupingPattern::parse(r"(?:fix|feat)\((\w+)\)").is_ok());
    }

    #[test]
    fn test_invalid_regex_rejected() {
        let err = GroupingPattern::parse("(unclosed").unwrap_err();
        assert!(matches!(err, GroupingError::InvalidRegex { .. }));
    }

    #[test]
    fn test_empty_pattern_rejected() {
        let err = GroupingPattern::parse("").unwrap_err();
        assert!(matches!(err, GroupingError::Empty));
        assert!(err.to_string().contains("jira, type, scope"));
    }

    #[test]
    fn test_empty_capture_falls_back_to_author() {
        let pattern = GroupingPattern::parse(r"^\[(\w*)\]").unwrap();
        assert_eq!(
            group_key("dev@x.com", "[] tidy", Some(&pattern)),
            GroupKey::author("dev@x.com")
        );
        assert_eq!(
            group_key("dev@x.com", "[infra] tidy", Some(&pattern)),
            GroupKey::tagged("dev@x.com", "infra")
        );
    }

    #[test]
    fn test_optional_capture_that_did_not_participate() {
        let pattern = GroupingPattern::parse(r"^wip(?: \((\w+)\))?").unwrap();
        assert_eq!(
            group_key("dev@x.com", "wip", Some(&pattern)),
            GroupKey::author("dev@x.com")
        );
    }

    #[test]
    fn test_group_events_without_pattern_matches_author_grouping() {
        let events = vec![
            event("a@x.com", "2024-03-01T10:00:00Z", "ABC-1 one"),
            event("b@x.com", "2024-03-01T11:00:00Z", "ABC-2 two"),
            event("a@x.com", "2024-03-02T10:00:00Z", "ABC-3 three"),
        ];

        let grouped = group_events(&events, None);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[&GroupKey::author("a@x.com")].len(), 2);
        assert_eq!(grouped[&GroupKey::author("b@x.com")].len(), 1);
    }

    #[test]
    fn test_group_events_splits_by_tag() {
        let events = vec![
            event("a@x.com", "2024-03-01T10:00:00Z", "ABC-1 one"),
            event("a@x.com", "2024-03-01T11:00:00Z", "ABC-1 again"),
            event("a@x.com", "2024-03-02T10:00:00Z", "ABC-2 other"),
            event("a@x.com", "2024-03-02T12:00:00Z", "untracked work"),
        ];
        let pattern = GroupingPattern::preset(Preset::Jira);

        let grouped = group_events(&events, Some(&pattern));

        let keys: Vec<_> = grouped.keys().map(ToString::to_string).collect();
        assert_eq!(keys, vec!["a@x.com", "a@x.com@ABC-1", "a@x.com@ABC-2"]);
        assert_eq!(grouped[&GroupKey::tagged("a@x.com", "ABC-1")].len(), 2);
    }

    #[test]
    fn test_group_events_keeps_duplicate_timestamps() {
        let events = vec![
            event("a@x.com", "2024-03-01T10:00:00Z", "one"),
            event("a@x.com", "2024-03-01T10:00:00Z", "two"),
        ];
        let grouped = group_events(&events, None);
        assert_eq!(grouped[&GroupKey::author("a@x.com")].len(), 2);
    }
}
