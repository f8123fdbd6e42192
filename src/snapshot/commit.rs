//! Commit identity and metadata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Commit author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub email: String,
}

/// One commit, identified by its sha
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRef {
    pub sha: String,
    pub message: String,
    pub author: Author,
    /// Commit time, serialized as `date`
    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,
}

impl CommitRef {
    pub fn new(
        sha: impl Into<String>,
        message: impl Into<String>,
        author: Author,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            sha: sha.into(),
            message: message.into(),
            author,
            timestamp,
        }
    }

    /// Build from a git2 commit
    pub fn from_commit(commit: &git2::Commit<'_>) -> Self {
        let author = commit.author();
        let message = commit
            .message()
            .map(|s| s.to_owned())
            .unwrap_or_else(|| String::from_utf8_lossy(commit.message_bytes()).into_owned());

        Self {
            sha: commit.id().to_string(),
            message,
            author: Author {
                name: author.name().unwrap_or("").to_string(),
                email: author.email().unwrap_or("").to_string(),
            },
            timestamp: DateTime::from_timestamp(commit.time().seconds(), 0).unwrap_or_default(),
        }
    }

    /// Same commit, regardless of metadata
    pub fn same_as(&self, other: &CommitRef) -> bool {
        self.sha == other.sha
    }
}
