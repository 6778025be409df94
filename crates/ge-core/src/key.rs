//! Group keys: an author identity, optionally tagged.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator used by the composite string form of a tagged key.
pub const TAG_SEPARATOR: char = '@';

/// Identifies one group of commits: an author, optionally narrowed by a tag
/// extracted from the commit message (issue key, commit type, ...).
///
/// Ordering is by author first, then untagged before tagged, then by tag.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl GroupKey {
    /// Key for an author with no tag.
    pub fn author(author: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            tag: None,
        }
    }

    /// Key for an author narrowed by a tag.
    pub fn tagged(author: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            tag: Some(tag.into()),
        }
    }

    /// Parses the legacy composite form `author@tag`.
    ///
    /// Author identities are email addresses, so a tagged composite carries at
    /// least two separators. Anything with a single separator (or none) is an
    /// untagged author; everything after the second separator is the tag.
    pub fn from_composite(composite: &str) -> Self {
        let mut separators = composite.match_indices(TAG_SEPARATOR).map(|(i, _)| i);
        match (separators.next(), separators.next()) {
            (Some(_), Some(second)) => Self::tagged(
                &composite[..second],
                &composite[second + TAG_SEPARATOR.len_utf8()..],
            ),
            _ => Self::author(composite),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => write!(f, "{}{TAG_SEPARATOR}{tag}", self.author),
            None => f.write_str(&self.author),
        }
    }
}
