// Copyright (c) 2026 - present fixlog contributors
// SPDX-License-Identifier: MIT

//! Commit pre-filtering
//!
//! Decides which commits of the walked range are offered for review.

use clap::ValueEnum;
use fixlog_core::message::summary;
use fixlog_core::{ExclusionSet, ReleaseLogError};
use fixlog_git::Commit;
use tracing::debug;

use crate::config::Config;

/// Keyword filter applied to commit messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterMode {
    /// Summary has a word starting with `fix`, `bugfix` or `bug-fix`
    Bugfix,
    /// First line has a word starting with `cleanup`
    Noise,
}

impl FilterMode {
    /// Check if `commit` passes this filter
    #[must_use]
    pub fn matches(self, commit: &Commit) -> bool {
        match self {
            Self::Bugfix => has_word_starting_with(
                &summary(&commit.message),
                &["fix", "bugfix", "bug-fix"],
            ),
            Self::Noise => {
                let first_line = commit.message.trim().lines().next().unwrap_or_default();
                has_word_starting_with(first_line, &["cleanup"])
            }
        }
    }
}

fn has_word_starting_with(text: &str, prefixes: &[&str]) -> bool {
    text.split_whitespace().any(|word| {
        let word = word.to_lowercase();
        prefixes.iter().any(|p| word.starts_with(p))
    })
}

/// Full commit filter: keyword mode, author and exclusions
#[derive(Debug, Clone, Default)]
pub struct CommitFilter {
    mode: Option<FilterMode>,
    author: Option<String>,
    exclusions: ExclusionSet,
}

impl CommitFilter {
    /// Create a filter from its parts
    #[must_use]
    pub fn new(mode: Option<FilterMode>, author: Option<String>, exclusions: ExclusionSet) -> Self {
        Self {
            mode,
            author,
            exclusions,
        }
    }

    /// Build the filter from the command line, loading exclusion files
    ///
    /// # Errors
    ///
    /// Returns `ReleaseLogError::Io` if an existing exclusion file cannot be
    /// read. Missing files are skipped.
    pub fn from_config(config: &Config) -> Result<Self, ReleaseLogError> {
        let mut exclusions = ExclusionSet::new();
        exclusions.add_shas(&config.exclude_shas);
        for path in &config.exclude_sha_files {
            exclusions.add_sha_file(path)?;
        }
        for path in &config.exclude_release_logs {
            exclusions.add_release_log_file(path)?;
        }
        debug!(
            shas = exclusions.sha_count(),
            messages = exclusions.message_count(),
            "built commit exclusions"
        );
        Ok(Self::new(config.filter, config.author.clone(), exclusions))
    }

    /// Check if `commit` should be reviewed
    #[must_use]
    pub fn matches(&self, commit: &Commit) -> bool {
        if let Some(mode) = self.mode {
            if !mode.matches(commit) {
                return false;
            }
        }
        if let Some(ref author) = self.author {
            if *author != commit.author {
                return false;
            }
        }
        !self.exclusions.is_excluded(commit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;

    fn commit(message: &str) -> Commit {
        Commit {
            sha: "abcdef0123456789abcdef0123456789abcdef01".to_string(),
            message: message.to_string(),
            author: "Jane Dev".to_string(),
            author_email: "jane@example.com".to_string(),
            timestamp: Utc::now(),
            parents: vec![],
            files: vec![],
        }
    }

    #[test]
    fn test_bugfix_mode() {
        assert!(FilterMode::Bugfix.matches(&commit("Fix T123: crash")));
        assert!(FilterMode::Bugfix.matches(&commit("Cycles: fixed wrong normals")));
        assert!(FilterMode::Bugfix.matches(&commit("BugFix for the outliner")));
        assert!(FilterMode::Bugfix.matches(&commit("bug-fix: tooltip")));
        assert!(!FilterMode::Bugfix.matches(&commit("Add new modifier")));
        // Only the summary counts
        assert!(!FilterMode::Bugfix.matches(&commit("Add new modifier\n\nAlso fixes a typo")));
        assert!(!FilterMode::Bugfix.matches(&commit("Prefix handling")));
    }

    #[test]
    fn test_noise_mode() {
        assert!(FilterMode::Noise.matches(&commit("Cleanup: remove unused code")));
        assert!(FilterMode::Noise.matches(&commit("\n  Minor cleanups in mesh code")));
        assert!(!FilterMode::Noise.matches(&commit("Fix crash\ncleanup on second line")));
    }

    #[test]
    fn test_no_filter_matches_everything() {
        assert!(CommitFilter::default().matches(&commit("anything")));
    }

    #[test]
    fn test_author_filter() {
        let filter = CommitFilter::new(None, Some("Jane Dev".to_string()), ExclusionSet::new());
        assert!(filter.matches(&commit("x")));

        let filter = CommitFilter::new(None, Some("Someone".to_string()), ExclusionSet::new());
        assert!(!filter.matches(&commit("x")));
    }

    #[test]
    fn test_excluded_sha() {
        let mut exclusions = ExclusionSet::new();
        exclusions.add_shas(["abcdef0123456789abcdef0123456789abcdef01"]);
        let filter = CommitFilter::new(Some(FilterMode::Bugfix), None, exclusions);
        assert!(!filter.matches(&commit("Fix T1: crash")));
    }

    proptest! {
        #[test]
        fn bugfix_ignores_case(word in "(fix|bugfix|bug-fix)[a-z]{0,5}", upper in any::<bool>()) {
            let word = if upper { word.to_uppercase() } else { word };
            let message = format!("Outliner {word} something");
            prop_assert!(FilterMode::Bugfix.matches(&commit(&message)));
        }
    }
}
