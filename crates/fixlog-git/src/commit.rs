//! Commit record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Length of the abbreviated identifier used in wiki links and log lines
pub const SHORT_SHA_LEN: usize = 10;

/// One changed file in a commit, as a (status-code, path) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStatus {
    /// Single-letter status code: `A`, `D`, `M`, `R`, `C`, `T` or `?`
    pub status: String,
    /// Path of the file, relative to the repository root
    pub path: String,
}

impl FileStatus {
    /// Create a new file status pair
    #[must_use]
    pub fn new(status: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            path: path.into(),
        }
    }
}

/// A commit as consumed by the review session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// The commit SHA (40 hex characters)
    pub sha: String,
    /// Full commit message, possibly multi-paragraph
    pub message: String,
    /// Author name
    pub author: String,
    /// Author email
    pub author_email: String,
    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
    /// Parent commit SHAs
    pub parents: Vec<String>,
    /// Files touched by the commit, compared against its first parent
    #[serde(default)]
    pub files: Vec<FileStatus>,
}

impl Commit {
    /// Validate that a SHA is a valid 40-character hex string
    #[must_use]
    pub fn is_valid_sha(sha: &str) -> bool {
        sha.len() == 40 && sha.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Get the short SHA (first 10 characters)
    #[must_use]
    pub fn short_sha(&self) -> &str {
        &self.sha[..SHORT_SHA_LEN.min(self.sha.len())]
    }

    /// Check if this is a merge commit (has multiple parents)
    #[must_use]
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// Get the first line of the commit message
    #[must_use]
    pub fn subject(&self) -> &str {
        self.message.trim().lines().next().unwrap_or("")
    }

    /// Commit date formatted as `YYYY/MM/DD`
    #[must_use]
    pub fn date_label(&self) -> String {
        self.timestamp.format("%Y/%m/%d").to_string()
    }
}
