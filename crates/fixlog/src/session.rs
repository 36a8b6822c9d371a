// Copyright (c) 2026 - present fixlog contributors
// SPDX-License-Identifier: MIT

//! Interactive review session
//!
//! Walks the candidate commits in order, asking for accept, skip or exit.
//! Accepting with a release log enabled enters category selection:
//!
//! ```text
//! action ──a──▶ main category ──digit──▶ sub category ──digit/Enter──▶ recorded
//!   ▲               │                         │
//!   └──────b────────┘◀───────────b────────────┘
//! ```
//!
//! A main category without sub-categories is recorded directly. Exiting at
//! any point leaves the in-flight commit unrecorded, and counters only move
//! once a decision is final.

use std::io::{self, Write};

use fixlog_core::records::{self, ReviewFiles, append_line};
use fixlog_core::{ReleaseLog, ReleaseLogError, store};
use fixlog_git::{Commit, GitError};
use tracing::{debug, info, warn};

use crate::display;
use crate::input::{ChoiceSource, Key};

/// Accepted and rejected commit counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Accepted commits
    pub accepted: usize,
    /// Rejected commits
    pub rejected: usize,
}

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every commit was decided
    Completed,
    /// The reviewer exited while `sha` was shown
    Exited {
        /// Commit left undecided
        sha: String,
    },
}

/// Result of a review session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Final counters
    pub tally: Tally,
    /// How the session ended
    pub outcome: Outcome,
}

/// Which optional records the session writes
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Append a summary line per accepted commit
    pub accept_log: bool,
    /// Append a wiki bullet per accepted commit
    pub accept_pretty: bool,
    /// Release state accepted commits are tagged with
    pub release_state: Option<String>,
}

/// Review session errors
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    /// Reading the repository failed
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    /// Updating the release log or review records failed
    #[error("Release log error: {0}")]
    ReleaseLog(#[from] ReleaseLogError),

    /// Terminal input or output failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

enum Decision {
    Accept(Option<(usize, Option<usize>)>),
    Reject,
    Exit,
}

enum Selection {
    Chosen(usize, Option<usize>),
    Back,
    Exit,
}

/// An interactive review over a list of commits
pub struct ReviewSession<C, W> {
    files: ReviewFiles,
    options: SessionOptions,
    release_log: Option<ReleaseLog>,
    input: C,
    out: W,
    tally: Tally,
}

impl<C: ChoiceSource, W: Write> ReviewSession<C, W> {
    /// Create a session writing records to `files`
    pub fn new(files: ReviewFiles, options: SessionOptions, input: C, out: W) -> Self {
        Self {
            files,
            options,
            release_log: None,
            input,
            out,
            tally: Tally::default(),
        }
    }

    /// Enable category selection, recording accepted commits into `log`
    #[must_use]
    pub fn with_release_log(mut self, log: ReleaseLog) -> Self {
        self.release_log = Some(log);
        self
    }

    /// The release log being extended, if enabled
    #[must_use]
    pub fn release_log(&self) -> Option<&ReleaseLog> {
        self.release_log.as_ref()
    }

    /// Current counters
    #[must_use]
    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Review `commits` in the given order
    ///
    /// # Errors
    ///
    /// Returns `ReviewError` if input fails or a record cannot be written.
    /// Records written before the error are kept.
    pub fn run(&mut self, commits: &[Commit]) -> Result<Summary, ReviewError> {
        let total = commits.len();
        info!(total, "starting review");

        for (i, commit) in commits.iter().enumerate() {
            display::commit(&mut self.out, commit)?;
            let decision = loop {
                match self.decide(commit, i + 1, total)? {
                    Decision::Accept(category) => match self.accept(commit, category) {
                        Ok(()) => break Decision::Accept(category),
                        // Nothing was recorded, the commit can still be skipped
                        Err(ReviewError::ReleaseLog(err @ ReleaseLogError::EmptyMessage)) => {
                            warn!(sha = %commit.short_sha(), "cannot accept commit: {err}");
                            display::not_accepted(&mut self.out, &err)?;
                        }
                        Err(err) => return Err(err),
                    },
                    other => break other,
                }
            };
            match decision {
                Decision::Accept(_) => {}
                Decision::Reject => self.reject(commit)?,
                Decision::Exit => {
                    display::exit_summary(&mut self.out, self.tally)?;
                    writeln!(self.out, "Goodbye! ({})", commit.sha)?;
                    info!(
                        accepted = self.tally.accepted,
                        rejected = self.tally.rejected,
                        "review aborted"
                    );
                    return Ok(Summary {
                        tally: self.tally,
                        outcome: Outcome::Exited {
                            sha: commit.sha.clone(),
                        },
                    });
                }
            }
        }

        display::exit_summary(&mut self.out, self.tally)?;
        info!(
            accepted = self.tally.accepted,
            rejected = self.tally.rejected,
            "review complete"
        );
        Ok(Summary {
            tally: self.tally,
            outcome: Outcome::Completed,
        })
    }

    fn decide(
        &mut self,
        commit: &Commit,
        position: usize,
        total: usize,
    ) -> Result<Decision, ReviewError> {
        loop {
            display::action_prompt(&mut self.out, position, total, self.tally)?;
            match self.input.next_key()? {
                Key::Exit => return Ok(Decision::Exit),
                Key::Enter => return Ok(Decision::Reject),
                Key::Accept if self.release_log.is_none() => return Ok(Decision::Accept(None)),
                Key::Accept => match self.select_category(commit)? {
                    Selection::Chosen(main, sub) => {
                        return Ok(Decision::Accept(Some((main, sub))));
                    }
                    Selection::Back => {
                        debug!(sha = %commit.short_sha(), "category selection cancelled");
                    }
                    Selection::Exit => return Ok(Decision::Exit),
                },
                other => display::invalid(&mut self.out, &key_label(&other))?,
            }
        }
    }

    fn select_category(&mut self, commit: &Commit) -> Result<Selection, ReviewError> {
        let Some(log) = self.release_log.as_ref() else {
            return Ok(Selection::Back);
        };
        let tree = log.tree();
        let mut main: Option<usize> = None;

        loop {
            let category = main.and_then(|m| tree.main(m));
            match (main, category) {
                (Some(m), Some(category)) => {
                    if category.subcategories.is_empty() {
                        return Ok(Selection::Chosen(m, None));
                    }
                    display::sub_prompt(&mut self.out, m, category)?;
                }
                _ => display::main_prompt(&mut self.out, tree)?,
            }

            match (self.input.next_key()?, main, category) {
                (Key::Exit, ..) => return Ok(Selection::Exit),
                (Key::View, ..) => display::category_tree(&mut self.out, tree)?,
                (Key::Message, ..) => display::commit(&mut self.out, commit)?,
                (Key::Back, Some(_), _) => main = None,
                (Key::Back, None, _) => return Ok(Selection::Back),
                (Key::Digit(n), None, _) if n < tree.len() => main = Some(n),
                (Key::Digit(n), Some(m), Some(category)) if n < category.subcategories.len() => {
                    return Ok(Selection::Chosen(m, Some(n)));
                }
                (Key::Enter, Some(m), _) => return Ok(Selection::Chosen(m, None)),
                (other, ..) => display::invalid(&mut self.out, &key_label(&other))?,
            }
        }
    }

    fn accept(
        &mut self,
        commit: &Commit,
        category: Option<(usize, Option<usize>)>,
    ) -> Result<(), ReviewError> {
        let state = self.options.release_state.as_deref();
        let pretty = if self.options.accept_pretty {
            Some(records::commit_pretty_line(commit, state)?)
        } else {
            None
        };

        if let (Some(log), Some((main, sub))) = (self.release_log.as_mut(), category) {
            log.add_entry(commit, main, sub, state)?;
            store::save(&self.files.release_log, log)?;
        }

        append_line(&self.files.accept, &commit.sha)?;
        if let Some(line) = pretty {
            append_line(&self.files.accept_pretty, &line)?;
        }
        if self.options.accept_log {
            append_line(&self.files.accept_log, &records::commit_log_line(commit))?;
        }

        self.tally.accepted += 1;
        info!(sha = %commit.short_sha(), ?category, "accepted commit");
        Ok(())
    }

    fn reject(&mut self, commit: &Commit) -> Result<(), ReviewError> {
        append_line(&self.files.reject, &commit.sha)?;
        self.tally.rejected += 1;
        debug!(sha = %commit.short_sha(), "rejected commit");
        Ok(())
    }
}

fn key_label(key: &Key) -> String {
    match key {
        Key::Digit(n) => n.to_string(),
        Key::Other(text) => text.clone(),
        Key::Enter => String::new(),
        other => format!("{other:?}").to_lowercase(),
    }
}
