// Copyright (c) 2026 - present fixlog contributors
// SPDX-License-Identifier: MIT

//! Command-line configuration
//!
//! All options map onto a single clap-derived [`Config`]. Validation of
//! paths happens in [`Config::validate`] before any review file is touched.

use std::path::PathBuf;

use clap::Parser;
use fixlog_core::{CategoryTree, ReleaseLogError, ReviewFiles};

use crate::filter::FilterMode;

/// Product version placeholder used when none is given
pub const UNKNOWN_VERSION: &str = "<UNKNOWN>";

/// Review commits and build a categorized wiki bug-fix release log
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "fixlog")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Path to the git repository
    #[arg(long, value_name = "PATH")]
    pub source: PathBuf,

    /// Revision range to review, eg: 169c95b8..HEAD
    #[arg(long, value_name = "RANGE")]
    pub range: Option<String>,

    /// Only review commits by this author
    #[arg(long)]
    pub author: Option<String>,

    /// Method used to pre-filter commits
    #[arg(long, value_enum, ignore_case = true)]
    pub filter: Option<FilterMode>,

    /// Comma-separated list of commits to skip
    #[arg(long = "filter-exclude-sha1", value_delimiter = ',', value_name = "SHA")]
    pub exclude_shas: Vec<String>,

    /// Text files listing commits to skip (whitespace separated)
    #[arg(long = "filter-exclude-sha1-fromfiles", num_args = 1.., value_name = "FILE")]
    pub exclude_sha_files: Vec<PathBuf>,

    /// Release logs whose entries are skipped, matched by message rather than sha
    ///
    /// Useful when commits were cherry-picked into a release branch, which
    /// breaks the relation to the original commit.
    #[arg(long = "filter-exclude-fromreleaselogs", num_args = 1.., value_name = "FILE")]
    pub exclude_release_logs: Vec<PathBuf>,

    /// Also write a summary line (date, author, summary) per accepted commit
    #[arg(long)]
    pub accept_log: bool,

    /// Also write a wiki bullet per accepted commit
    #[arg(long)]
    pub accept_pretty: bool,

    /// Also write accepted commits into the categorized release log page
    #[arg(long = "accept-releaselog")]
    pub accept_release_log: bool,

    /// Product name used in a new release log title
    #[arg(long, default_value = "Blender")]
    pub product: String,

    /// Product version used in a new release log title
    #[arg(long, value_name = "VERSION")]
    pub product_version: Option<String>,

    /// Release state every accepted commit is tagged with (alpha, beta, RC1, ...)
    #[arg(long, default_value = "alpha", value_name = "STATE")]
    pub release_state: String,

    /// Release states additionally listed in their own appendix sections
    #[arg(long, value_delimiter = ',', value_name = "STATES")]
    pub release_state_list: Vec<String>,

    /// JSON file describing the category tree (built-in tree if omitted)
    #[arg(long, value_name = "FILE")]
    pub categories: Option<PathBuf>,

    /// Directory review files are written to
    #[arg(long, env = "FIXLOG_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode - only warnings and errors are logged
    #[arg(short, long)]
    pub quiet: bool,
}

impl Config {
    /// Validate paths before the review starts
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The source path doesn't exist or isn't a directory
    /// - The category file doesn't exist
    /// - The output directory cannot be created
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.source.exists() {
            return Err(ConfigError::SourceNotFound(self.source.clone()));
        }
        if !self.source.is_dir() {
            return Err(ConfigError::SourceNotDirectory(self.source.clone()));
        }

        if let Some(ref categories) = self.categories {
            if !categories.is_file() {
                return Err(ConfigError::CategoriesNotFound(categories.clone()));
            }
        }

        if !self.output_dir.exists() {
            std::fs::create_dir_all(&self.output_dir)
                .map_err(|e| ConfigError::OutputDirCreateFailed(self.output_dir.clone(), e))?;
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }

    /// Release state accepted commits are tagged with, if any
    #[must_use]
    pub fn release_state(&self) -> Option<&str> {
        let state = self.release_state.trim();
        (!state.is_empty()).then_some(state)
    }

    /// Release states listed in the appendix, empty labels dropped
    #[must_use]
    pub fn tracked_states(&self) -> Vec<String> {
        self.release_state_list
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Product version, or a placeholder
    #[must_use]
    pub fn product_version(&self) -> &str {
        self.product_version.as_deref().unwrap_or(UNKNOWN_VERSION)
    }

    /// Load the category tree
    ///
    /// # Errors
    ///
    /// Returns `ReleaseLogError` if the category file cannot be read or is
    /// not a valid tree.
    pub fn category_tree(&self) -> Result<CategoryTree, ReleaseLogError> {
        match self.categories {
            Some(ref path) => CategoryTree::from_file(path),
            None => Ok(CategoryTree::default()),
        }
    }

    /// Paths of the review files in the output directory
    #[must_use]
    pub fn review_files(&self) -> ReviewFiles {
        ReviewFiles::in_dir(&self.output_dir)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Source path not found
    #[error("Source repository path not found: {0}")]
    SourceNotFound(PathBuf),

    /// Source path is not a directory
    #[error("Source repository path is not a directory: {0}")]
    SourceNotDirectory(PathBuf),

    /// Category file not found
    #[error("Category file not found: {0}")]
    CategoriesNotFound(PathBuf),

    /// Failed to create the output directory
    #[error("Failed to create output directory {0}: {1}")]
    OutputDirCreateFailed(PathBuf, std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("fixlog").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["--source", "repo"]);
        assert_eq!(config.source, PathBuf::from("repo"));
        assert!(config.range.is_none());
        assert!(config.filter.is_none());
        assert_eq!(config.product, "Blender");
        assert_eq!(config.release_state(), Some("alpha"));
        assert!(config.tracked_states().is_empty());
        assert_eq!(config.product_version(), UNKNOWN_VERSION);
        assert!(!config.accept_release_log);
    }

    #[test]
    fn test_source_is_required() {
        assert!(Config::try_parse_from(["fixlog"]).is_err());
    }

    #[test]
    fn test_filter_modes() {
        assert_eq!(
            parse(&["--source", "r", "--filter", "bugfix"]).filter,
            Some(FilterMode::Bugfix)
        );
        assert_eq!(
            parse(&["--source", "r", "--filter", "NOISE"]).filter,
            Some(FilterMode::Noise)
        );
        assert!(Config::try_parse_from(["fixlog", "--source", "r", "--filter", "typo"]).is_err());
    }

    #[test]
    fn test_exclusion_lists() {
        let config = parse(&[
            "--source",
            "r",
            "--filter-exclude-sha1",
            "aaa,bbb",
            "--filter-exclude-sha1-fromfiles",
            "accept.txt",
            "reject.txt",
            "--filter-exclude-fromreleaselogs",
            "old_log.txt",
        ]);
        assert_eq!(config.exclude_shas, vec!["aaa", "bbb"]);
        assert_eq!(
            config.exclude_sha_files,
            vec![PathBuf::from("accept.txt"), PathBuf::from("reject.txt")]
        );
        assert_eq!(config.exclude_release_logs, vec![PathBuf::from("old_log.txt")]);
    }

    #[test]
    fn test_release_state_list() {
        let config = parse(&[
            "--source",
            "r",
            "--release-state",
            "RC3",
            "--release-state-list",
            "RC2,RC3,",
        ]);
        assert_eq!(config.release_state(), Some("RC3"));
        assert_eq!(config.tracked_states(), vec!["RC2", "RC3"]);
    }

    #[test]
    fn test_log_level_default() {
        let config = Config::default();
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_log_level_verbose() {
        let config = Config {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_log_level_quiet() {
        let config = Config {
            quiet: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_validate_nonexistent_source() {
        let config = Config {
            source: PathBuf::from("/nonexistent/path/12345"),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SourceNotFound(_))
        ));
    }

    #[test]
    fn test_validate_creates_output_dir() {
        let dir = TempDir::new().expect("tempdir");
        let output = dir.path().join("out/nested");
        let config = Config {
            source: dir.path().to_path_buf(),
            output_dir: output.clone(),
            ..Default::default()
        };
        config.validate().expect("valid config");
        assert!(output.is_dir());
    }

    #[test]
    fn test_validate_missing_categories() {
        let dir = TempDir::new().expect("tempdir");
        let config = Config {
            source: dir.path().to_path_buf(),
            output_dir: dir.path().to_path_buf(),
            categories: Some(dir.path().join("missing.json")),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CategoriesNotFound(_))
        ));
    }

    #[test]
    fn test_category_tree_default() {
        let tree = Config::default().category_tree().expect("tree");
        assert_eq!(tree.len(), 7);
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
