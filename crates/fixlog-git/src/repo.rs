// Copyright (c) 2026 - present fixlog contributors
// SPDX-License-Identifier: MIT

//! Commit source backed by a git repository
//!
//! This module walks commits of a repository using the `git2` crate and
//! converts them into [`Commit`] records, including the list of changed
//! files with their status codes.

use crate::commit::{Commit, FileStatus};
use crate::error::GitError;
use chrono::{DateTime, TimeZone, Utc};
use git2::{Delta, DiffOptions, Repository, Sort};
use std::path::Path;
use tracing::debug;

/// Configuration for walking commits
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Revision range such as `abc123..HEAD` (defaults to all of HEAD's history)
    pub range: Option<String>,
    /// Maximum number of commits to retrieve
    pub limit: Option<usize>,
    /// Collect changed files for each commit
    pub include_files: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            range: None,
            limit: None,
            include_files: true,
        }
    }
}

impl WalkOptions {
    /// Create options for walking a revision range
    #[must_use]
    pub fn range(range: &str) -> Self {
        Self {
            range: Some(range.to_string()),
            ..Default::default()
        }
    }

    /// Limit the walk to the N most recent commits
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skip changed-file extraction
    #[must_use]
    pub fn without_files(mut self) -> Self {
        self.include_files = false;
        self
    }
}

/// A git repository wrapper producing [`Commit`] records
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Open a git repository at the given path
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if the path is not a git repository.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::open(path).map_err(|_| GitError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        Ok(Self { repo })
    }

    /// Discover and open a git repository containing the given path
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if no repository is found.
    pub fn discover(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::discover(path).map_err(|_| GitError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        Ok(Self { repo })
    }

    /// Get the working directory path (None for bare repos)
    #[must_use]
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Short name of the checked-out branch (`HEAD` when detached)
    ///
    /// # Errors
    ///
    /// Returns `GitError` if HEAD cannot be resolved.
    pub fn branch_name(&self) -> Result<String, GitError> {
        let head = self.repo.head()?;
        Ok(head.shorthand().unwrap_or("HEAD").to_string())
    }

    /// Walk commits according to the given options, newest first
    ///
    /// # Errors
    ///
    /// Returns `GitError::InvalidRange` if the range cannot be resolved, or
    /// `GitError` if the repository cannot be walked.
    pub fn walk(&self, options: &WalkOptions) -> Result<Vec<Commit>, GitError> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME | Sort::TOPOLOGICAL)?;

        match options.range {
            Some(ref range) if range.contains("..") => {
                revwalk
                    .push_range(range)
                    .map_err(|_| GitError::InvalidRange {
                        range: range.clone(),
                    })?;
            }
            Some(ref reference) => {
                let oid = self
                    .repo
                    .revparse_single(reference)
                    .map_err(|_| GitError::InvalidRange {
                        range: reference.clone(),
                    })?
                    .id();
                revwalk.push(oid)?;
            }
            None => revwalk.push_head()?,
        }

        let limit = options.limit.unwrap_or(usize::MAX);
        let mut commits = Vec::new();

        for oid_result in revwalk {
            if commits.len() >= limit {
                break;
            }
            let git_commit = self.repo.find_commit(oid_result?)?;
            commits.push(self.extract_commit(&git_commit, options.include_files)?);
        }

        debug!(
            range = options.range.as_deref().unwrap_or("HEAD"),
            count = commits.len(),
            "walked commits"
        );
        Ok(commits)
    }

    /// Convert a git2 commit into a [`Commit`] record
    fn extract_commit(
        &self,
        git_commit: &git2::Commit<'_>,
        include_files: bool,
    ) -> Result<Commit, GitError> {
        let files = if include_files {
            self.extract_files(git_commit)?
        } else {
            Vec::new()
        };

        Ok(Commit {
            sha: git_commit.id().to_string(),
            message: git_commit.message().unwrap_or("").to_string(),
            author: git_commit.author().name().unwrap_or("Unknown").to_string(),
            author_email: git_commit.author().email().unwrap_or("").to_string(),
            timestamp: commit_timestamp(git_commit),
            parents: git_commit.parent_ids().map(|id| id.to_string()).collect(),
            files,
        })
    }

    /// Changed files of a commit against its first parent (or the empty tree)
    fn extract_files(&self, git_commit: &git2::Commit<'_>) -> Result<Vec<FileStatus>, GitError> {
        let tree = git_commit.tree()?;
        let parent_tree = if git_commit.parent_count() > 0 {
            Some(git_commit.parent(0)?.tree()?)
        } else {
            None
        };

        let mut opts = DiffOptions::new();
        let diff =
            self.repo
                .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut opts))?;

        Ok(diff
            .deltas()
            .map(|delta| {
                let path = delta
                    .new_file()
                    .path()
                    .or_else(|| delta.old_file().path())
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<unknown>".to_string());
                FileStatus::new(status_code(delta.status()), path)
            })
            .collect())
    }
}

fn commit_timestamp(git_commit: &git2::Commit<'_>) -> DateTime<Utc> {
    Utc.timestamp_opt(git_commit.time().seconds(), 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Map a delta status to the letter `git log --name-status` prints
fn status_code(delta: Delta) -> &'static str {
    match delta {
        Delta::Added => "A",
        Delta::Deleted => "D",
        Delta::Modified => "M",
        Delta::Renamed => "R",
        Delta::Copied => "C",
        Delta::Typechange => "T",
        _ => "?",
    }
}
