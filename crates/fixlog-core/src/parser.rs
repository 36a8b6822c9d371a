// Copyright (c) 2026 - present fixlog contributors
// SPDX-License-Identifier: MIT

//! Release log document parser
//!
//! Seeds a [`ReleaseLog`] from a previously written document so a new run
//! extends it. Parsing never fails: headings that match no category of the
//! tree put their entries in the uncategorized bucket.
//!
//! Headings drive a small state machine:
//!
//! | heading         | known main       | known sub                    | other                      |
//! |-----------------|------------------|------------------------------|----------------------------|
//! | `== Name ==`    | `InMainCategory` | `InSubCategory` (main looked up) | `InUncategorized(Name)` |
//! | `=== Name ===`  | `InMainCategory` | `InSubCategory` (main looked up) | `InUncategorized(Name)` |
//!
//! `== UNSORTED ==` always selects the uncategorized bucket itself.

use tracing::{debug, warn};

use crate::category::CategoryTree;
use crate::document::{Aside, EntryKind, ReleaseLog};
use crate::header::Header;
use crate::message::{REPORTED_MARKER, release_state_of};

/// Start marker of a block the parser skips
pub const IGNORE_START_LINE: &str = "<!-- IGNORE_START -->";
/// End marker of a block the parser skips
pub const IGNORE_END_LINE: &str = "<!-- IGNORE_END -->";
/// Heading text of the uncategorized section
pub const UNSORTED_HEADING: &str = "UNSORTED";

/// First line of the generated totals block
pub(crate) const TOTALS_PREFIX: &str = "Total fixed bugs:";
/// First line of the generated release-state appendix
pub(crate) const APPENDIX_RULE: &str = "<hr/>";

/// Where in the document the parser currently is
#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseState {
    /// Before the first heading
    Header,
    /// Directly under a main category heading
    InMainCategory { main: String },
    /// Under a sub-category heading
    InSubCategory { main: String, sub: String },
    /// Under `UNSORTED` (`sub: None`) or an unknown heading
    InUncategorized { sub: Option<String> },
}

impl ParseState {
    /// Transition taken on a heading line
    fn on_heading(name: &str, tree: &CategoryTree) -> Self {
        if tree.is_main(name) {
            return Self::InMainCategory {
                main: name.to_string(),
            };
        }
        if let Some(main) = tree.main_of(name) {
            return Self::InSubCategory {
                main: main.to_string(),
                sub: name.to_string(),
            };
        }
        if name.is_empty() || name == UNSORTED_HEADING {
            return Self::InUncategorized { sub: None };
        }
        warn!(heading = name, "unknown category heading, filing entries as uncategorized");
        Self::InUncategorized {
            sub: Some(name.to_string()),
        }
    }

    /// Bucket entries go to, `None` while still in the header
    fn bucket(&self) -> Option<(Option<String>, Option<String>)> {
        match self {
            Self::Header => None,
            Self::InMainCategory { main } => Some((Some(main.clone()), None)),
            Self::InSubCategory { main, sub } => Some((Some(main.clone()), Some(sub.clone()))),
            Self::InUncategorized { sub } => Some((None, sub.clone())),
        }
    }
}

/// Text of a `==` or `===` heading line
fn heading(line: &str) -> Option<&str> {
    if line.starts_with("==") {
        Some(line.trim_matches(|c: char| c == '=' || c.is_whitespace()))
    } else {
        None
    }
}

/// Check if an ignore block was written by the serializer itself
fn is_generated_block(lines: &[String]) -> bool {
    lines
        .iter()
        .map(|l| l.trim())
        .find(|l| !l.is_empty())
        .is_some_and(|first| first.starts_with(TOTALS_PREFIX) || first == APPENDIX_RULE)
}

/// Parse a release log document
///
/// Only the `tracked_states` labels are collected into release-state lists.
#[must_use]
pub fn parse<S: AsRef<str>>(text: &str, tree: CategoryTree, tracked_states: &[S]) -> ReleaseLog {
    let mut log = ReleaseLog::new(tree, tracked_states);
    let mut state = ParseState::Header;
    let mut header_lines: Vec<String> = Vec::new();
    let mut ignored: Option<Vec<String>> = None;

    for raw in text.lines() {
        if raw.contains(IGNORE_END_LINE) {
            if let Some(block) = ignored.take() {
                if !is_generated_block(&block) {
                    log.push_aside(Aside { lines: block });
                }
            }
            continue;
        }
        if let Some(ref mut block) = ignored {
            block.push(raw.trim_end().to_string());
            continue;
        }
        if raw.contains(IGNORE_START_LINE) {
            ignored = Some(Vec::new());
            continue;
        }

        let line = raw.trim();
        if let Some(name) = heading(line) {
            state = ParseState::on_heading(name, log.tree());
            continue;
        }

        let Some((main, sub)) = state.bucket() else {
            header_lines.push(raw.trim_end().to_string());
            continue;
        };
        if line.is_empty() || !line.contains("Fix ") {
            continue;
        }

        let kind = if line.contains(REPORTED_MARKER) {
            EntryKind::Reported
        } else {
            EntryKind::Unreported
        };
        if let Some((label, rest)) = release_state_of(line) {
            if log.is_tracked(label) {
                log.push_release_state(label, format!("* {rest}"));
            }
        }
        log.push_entry(main, sub, kind, line.to_string());
    }

    if ignored.is_some() {
        warn!("unterminated ignore block at end of document, dropped");
    }

    log.set_header(Header::new(header_lines));
    debug!(
        reported = log.counts().reported,
        unreported = log.counts().unreported,
        asides = log.asides().len(),
        "parsed release log"
    );
    log
}
