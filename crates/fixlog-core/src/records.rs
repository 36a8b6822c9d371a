// Copyright (c) 2026 - present fixlog contributors
// SPDX-License-Identifier: MIT

//! Flat, append-only review records
//!
//! Besides the release log, a review run appends one line per decision to
//! plain text files: accepted and rejected identifiers, a one-line summary
//! log of accepted commits and their pre-rendered wiki bullets.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use fixlog_git::Commit;

use crate::error::ReleaseLogError;
use crate::message::{self, render_entry};

/// Identifiers of accepted commits
pub const ACCEPT_FILE: &str = "review_accept.txt";
/// Identifiers of rejected commits
pub const REJECT_FILE: &str = "review_reject.txt";
/// One summary line per accepted commit
pub const ACCEPT_LOG_FILE: &str = "review_accept_log.txt";
/// One wiki bullet per accepted commit
pub const ACCEPT_PRETTY_FILE: &str = "review_accept_pretty.txt";
/// The categorized release log document
pub const ACCEPT_RELEASELOG_FILE: &str = "review_accept_release_log.txt";

/// Paths of every file a review run writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewFiles {
    /// Accepted identifiers
    pub accept: PathBuf,
    /// Rejected identifiers
    pub reject: PathBuf,
    /// Summary log of accepted commits
    pub accept_log: PathBuf,
    /// Wiki bullets of accepted commits
    pub accept_pretty: PathBuf,
    /// Release log document
    pub release_log: PathBuf,
}

impl ReviewFiles {
    /// Standard file names inside `dir`
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            accept: dir.join(ACCEPT_FILE),
            reject: dir.join(REJECT_FILE),
            accept_log: dir.join(ACCEPT_LOG_FILE),
            accept_pretty: dir.join(ACCEPT_PRETTY_FILE),
            release_log: dir.join(ACCEPT_RELEASELOG_FILE),
        }
    }
}

/// Append `line` and a newline to `path`, creating the file if needed
///
/// # Errors
///
/// Returns `ReleaseLogError::Io` if the file cannot be opened or written.
pub fn append_line(path: &Path, line: &str) -> Result<(), ReleaseLogError> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")?;
    Ok(())
}

/// Summary log line: `rB<sha>   <date>   <author>   <summary>`
#[must_use]
pub fn commit_log_line(commit: &Commit) -> String {
    format!(
        "rB{}   {}   {:<30}   {}",
        commit.short_sha(),
        commit.date_label(),
        commit.author,
        message::summary(&commit.message)
    )
}

/// Wiki bullet of a commit tagged with `release_state`
///
/// # Errors
///
/// Returns `ReleaseLogError::EmptyMessage` if the commit has no summary.
pub fn commit_pretty_line(
    commit: &Commit,
    release_state: Option<&str>,
) -> Result<String, ReleaseLogError> {
    let transformed = message::transform(&commit.message)?;
    Ok(render_entry(
        &transformed.prose,
        commit.short_sha(),
        release_state,
    ))
}
