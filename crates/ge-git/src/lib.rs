//! Commit history reader.
//!
//! Reads every commit reachable from the repository's refs using `git2` and
//! hands them to the estimation engine as [`Event`]s.
//!
//! # Timestamps
//!
//! Events carry the *author* time in the author's own UTC offset, so calendar
//! days are the author's local days. Commits are walked in committer-time
//! order, but the engine sorts each group itself.

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};
use ge_core::{Event, Timestamp};
use git2::{Repository, Sort};
use thiserror::Error;

/// Commit history errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// The repository could not be opened.
    #[error("failed to open repository at {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },
    /// Walking the history failed.
    #[error("failed to read commit history: {0}")]
    Walk(#[from] git2::Error),
    /// A commit's author time cannot be represented.
    #[error("commit {commit} has an invalid author time ({seconds}s, offset {offset_minutes}m)")]
    InvalidTime {
        commit: String,
        seconds: i64,
        offset_minutes: i32,
    },
}

/// Read access to a repository's commit history.
pub struct CommitLog {
    repo: Repository,
}

impl CommitLog {
    /// Opens the repository at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::open(path).map_err(|source| GitError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened repository");
        Ok(Self { repo })
    }

    /// Wraps an already opened repository.
    pub const fn from_repository(repo: Repository) -> Self {
        Self { repo }
    }

    /// Returns every commit reachable from any ref (and from `HEAD`), skipping
    /// commits authored before `cutoff`. A commit exactly at the cutoff is kept.
    pub fn commits(&self, cutoff: Option<Timestamp>) -> Result<Vec<Event>, GitError> {
        let mut walk = self.repo.revwalk()?;
        walk.set_sorting(Sort::TIME)?;
        walk.push_glob("refs/*")?;
        // unborn HEAD on a fresh repository has nothing to push
        if self.repo.head().is_ok() {
            walk.push_head()?;
        }

        let mut events = Vec::new();
        let mut skipped = 0usize;
        for oid in walk {
            let commit = self.repo.find_commit(oid?)?;
            let timestamp = author_time(&commit)?;

            if cutoff.is_some_and(|c| timestamp < c) {
                tracing::trace!(commit = %commit.id(), %timestamp, "commit before cutoff");
                skipped += 1;
                continue;
            }

            let author = commit.author();
            events.push(Event::new(
                String::from_utf8_lossy(author.email_bytes()),
                timestamp,
                String::from_utf8_lossy(commit.message_bytes()),
            ));
        }

        tracing::debug!(commits = events.len(), skipped, "read commit history");
        Ok(events)
    }
}

fn author_time(commit: &git2::Commit<'_>) -> Result<Timestamp, GitError> {
    let when = commit.author().when();
    let offset = FixedOffset::east_opt(when.offset_minutes() * 60);
    let utc = DateTime::from_timestamp(when.seconds(), 0);

    match (offset, utc) {
        (Some(offset), Some(utc)) => Ok(utc.with_timezone(&offset)),
        _ => Err(GitError::InvalidTime {
            commit: commit.id().to_string(),
            seconds: when.seconds(),
            offset_minutes: when.offset_minutes(),
        }),
    }
}
