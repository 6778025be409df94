//! Commit events handed over by the history reader.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A commit timestamp, kept in the author's own UTC offset.
///
/// Calendar days are taken in that offset, so no timezone normalization happens.
pub type Timestamp = DateTime<FixedOffset>;

/// One commit as seen by the estimation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Author identity (the commit author's email).
    pub author: String,
    /// When the commit was authored.
    pub timestamp: Timestamp,
    /// Full commit message, searched by grouping patterns.
    #[serde(default)]
    pub message: String,
}

impl Event {
    pub fn new(author: impl Into<String>, timestamp: Timestamp, message: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            timestamp,
            message: message.into(),
        }
    }
}
