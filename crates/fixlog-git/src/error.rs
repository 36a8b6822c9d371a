// Copyright (c) 2026 - present fixlog contributors
// SPDX-License-Identifier: MIT

//! Error types for fixlog-git

use thiserror::Error;

/// Errors that can occur while reading commits
#[derive(Debug, Error)]
pub enum GitError {
    /// Error from git2 library
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),

    /// Repository not found at the specified path
    #[error("Repository not found: {path}")]
    RepositoryNotFound {
        /// The path that was searched for a repository
        path: String,
    },

    /// Invalid revision range (e.g. `abc123..HEAD`)
    #[error("Invalid revision range: {range}")]
    InvalidRange {
        /// The range string that could not be resolved
        range: String,
    },
}
