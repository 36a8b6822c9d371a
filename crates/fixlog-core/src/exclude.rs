// Copyright (c) 2026 - present fixlog contributors
// SPDX-License-Identifier: MIT

//! Commit exclusion sets
//!
//! Commits already handled elsewhere are skipped during review, either by
//! identifier (full or abbreviated sha listed in plain files) or by the
//! prose of an entry already present in an existing release log.

use std::collections::HashSet;
use std::path::Path;

use fixlog_git::Commit;
use tracing::{debug, warn};

use crate::category::CategoryTree;
use crate::error::ReleaseLogError;
use crate::message::{transform, unprettify};
use crate::parser::parse;
use crate::store::read_optional;

/// Identifiers and entry texts of commits to skip
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    shas: HashSet<String>,
    messages: HashSet<String>,
}

impl ExclusionSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude the given identifiers
    pub fn add_shas<I, S>(&mut self, shas: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for sha in shas {
            let sha = sha.as_ref().trim();
            if !sha.is_empty() {
                self.shas.insert(sha.to_string());
            }
        }
    }

    /// Exclude every whitespace-separated identifier listed in `path`
    ///
    /// A missing file is skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `ReleaseLogError::Io` if an existing file cannot be read.
    pub fn add_sha_file(&mut self, path: &Path) -> Result<(), ReleaseLogError> {
        match read_optional(path)? {
            Some(text) => {
                let before = self.shas.len();
                self.add_shas(text.split_whitespace());
                debug!(
                    path = %path.display(),
                    added = self.shas.len() - before,
                    "loaded sha exclusions"
                );
            }
            None => warn!(path = %path.display(), "sha exclusion file not found, skipping"),
        }
        Ok(())
    }

    /// Exclude every entry of an existing release log document
    pub fn add_release_log_text(&mut self, text: &str) {
        let log = parse(text, CategoryTree::default(), &[] as &[&str]);
        for entry in log.entries() {
            self.messages.insert(unprettify(&entry.text).to_string());
        }
    }

    /// Exclude every entry of the release log at `path`
    ///
    /// A missing file is skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `ReleaseLogError::Io` if an existing file cannot be read.
    pub fn add_release_log_file(&mut self, path: &Path) -> Result<(), ReleaseLogError> {
        match read_optional(path)? {
            Some(text) => {
                let before = self.messages.len();
                self.add_release_log_text(&text);
                debug!(
                    path = %path.display(),
                    added = self.messages.len() - before,
                    "loaded release log exclusions"
                );
            }
            None => warn!(path = %path.display(), "release log not found, skipping"),
        }
        Ok(())
    }

    /// Number of excluded identifiers
    #[must_use]
    pub fn sha_count(&self) -> usize {
        self.shas.len()
    }

    /// Number of excluded entry texts
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Whether nothing is excluded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shas.is_empty() && self.messages.is_empty()
    }

    /// Whether `commit` is excluded
    ///
    /// Matches the full sha, the abbreviated sha, or the transformed prose
    /// of the commit message.
    #[must_use]
    pub fn is_excluded(&self, commit: &Commit) -> bool {
        if self.shas.contains(&commit.sha) || self.shas.contains(commit.short_sha()) {
            return true;
        }
        if self.messages.is_empty() {
            return false;
        }
        transform(&commit.message)
            .map(|t| self.messages.contains(&t.prose))
            .unwrap_or(false)
    }
}
