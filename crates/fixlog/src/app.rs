// Copyright (c) 2026 - present fixlog contributors
// SPDX-License-Identifier: MIT

//! Review run orchestration
//!
//! Walks the configured range, prepares the release log header, filters the
//! candidates and hands them to a [`ReviewSession`] oldest first.

use std::io::Write;

use fixlog_core::{Header, ReleaseLog, RevisionRange, store};
use fixlog_git::{Commit, GitRepo, WalkOptions};
use tracing::{info, warn};

use crate::config::Config;
use crate::filter::CommitFilter;
use crate::input::ChoiceSource;
use crate::session::{ReviewError, ReviewSession, SessionOptions, Summary};

/// Run a complete review as configured
///
/// # Errors
///
/// Returns `ReviewError` if the repository or range cannot be read, an
/// existing record cannot be loaded, or the session fails.
pub fn run<C: ChoiceSource, W: Write>(
    config: &Config,
    input: C,
    out: W,
) -> Result<Summary, ReviewError> {
    let repo = GitRepo::open(&config.source)?;
    let walk = match config.range {
        Some(ref range) => WalkOptions::range(range),
        None => WalkOptions::default(),
    };
    let commits = repo.walk(&walk)?;
    let filter = CommitFilter::from_config(config)?;

    let release_log = if config.accept_release_log {
        Some(open_release_log(config, &repo, &commits)?)
    } else {
        None
    };

    let mut candidates: Vec<Commit> = commits.into_iter().filter(|c| filter.matches(c)).collect();
    candidates.reverse();
    info!(candidates = candidates.len(), "selected commits for review");

    let options = SessionOptions {
        accept_log: config.accept_log,
        accept_pretty: config.accept_pretty,
        release_state: config.release_state().map(str::to_string),
    };
    let mut session = ReviewSession::new(config.review_files(), options, input, out);
    if let Some(log) = release_log {
        session = session.with_release_log(log);
    }
    session.run(&candidates)
}

/// Load the release log and point its header at the walked range
///
/// `commits` is the unfiltered walk, newest first.
///
/// # Errors
///
/// Returns `ReviewError` if the category tree or an existing release log
/// cannot be loaded.
pub fn open_release_log(
    config: &Config,
    repo: &GitRepo,
    commits: &[Commit],
) -> Result<ReleaseLog, ReviewError> {
    let tree = config.category_tree()?;
    let files = config.review_files();
    let tracked = config.tracked_states();
    let mut log = store::load(&files.release_log, tree, tracked.as_slice())?;

    let (Some(newest), Some(oldest)) = (commits.first(), commits.last()) else {
        warn!("no commits in range, release log header left unchanged");
        return Ok(log);
    };
    let range =
        RevisionRange::new(&oldest.sha, &newest.sha).with_release_state(config.release_state());

    if log.header().is_empty() {
        log.set_header(Header::fresh(&config.product, config.product_version(), &range));
    } else {
        let range = match repo.branch_name() {
            Ok(branch) => range.with_branch(branch),
            Err(e) => {
                warn!(error = %e, "could not resolve branch name");
                range
            }
        };
        log.set_range(&range);
    }
    Ok(log)
}
