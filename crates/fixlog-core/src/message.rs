// Copyright (c) 2026 - present fixlog contributors
// SPDX-License-Identifier: MIT

//! Commit message to wiki prose
//!
//! A commit summary is rewritten into a wiki bullet body:
//!
//! 1. `Fix T123: foo` style references become `Fix {{BugReport|123}}: foo`;
//!    summaries without one are prefixed with `Fix unreported: `.
//! 2. Remaining bare `T123` tokens become `{{BugReport|123}}`.
//! 3. Short commit references such as `rB1a2b3c4d` become
//!    `{{GitCommit|rB1a2b3c4d}}`.
//! 4. A leading `[` is written as the `&#91;` entity, so a plain bullet
//!    never reads as a `* [<state>] ` one.
//!
//! [`render_entry`] wraps the prose into a bullet line and [`unprettify`]
//! takes it back apart.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use crate::error::ReleaseLogError;

/// Marker carried by every entry that references a tracked bug report
pub const REPORTED_MARKER: &str = "Fix {{BugReport|";

/// Prefix of entries without a bug report reference
pub const UNREPORTED_PREFIX: &str = "Fix unreported: ";

/// Up to 20 characters of free text, then "Fix/Fixes/Fixing [for] T<number>"
static FIX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(.{0,20}?)(Fix(?:ing|es)?\s*(?:for)?\s*T([0-9]+))\s*[-:,]*\s*")
        .expect("fix pattern is a valid regex")
});

static BUG_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"T([0-9]+)").expect("bug number pattern is a valid regex"));

static COMMIT_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\W)(r(?:B|BA|BAC|BTS)[0-9a-fA-F]{6,})")
        .expect("commit reference pattern is a valid regex")
});

const COMMIT_LINK_OPEN: &str = " ({{GitCommit|rB";
/// Wiki entity for `[`, renders identically
const OPEN_BRACKET_ENTITY: &str = "&#91;";
const COMMIT_LINK_CLOSE: &str = "}}).";

/// Result of rewriting a commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    /// Wiki-ready prose
    pub prose: String,
    /// True when the message referenced no bug report
    pub unreported: bool,
}

/// Commit summary: every line up to the first blank line, joined by spaces
///
/// Surrounding spaces and `:.;-` punctuation are stripped.
#[must_use]
pub fn summary(body: &str) -> String {
    let body = body.replace("\r\n", "\n");
    body.split("\n\n")
        .next()
        .unwrap_or("")
        .trim_matches(|c: char| matches!(c, ' ' | ':' | '.' | ';' | '-' | '\n'))
        .replace('\n', " ")
}

/// Rewrite a commit message into wiki prose
///
/// # Errors
///
/// Returns `ReleaseLogError::EmptyMessage` if the message has no summary.
pub fn transform(body: &str) -> Result<Transformed, ReleaseLogError> {
    let summary = summary(body);
    if summary.trim().is_empty() {
        return Err(ReleaseLogError::EmptyMessage);
    }

    let (text, unreported) = if FIX_PATTERN.is_match(&summary) {
        (
            FIX_PATTERN
                .replace_all(&summary, "Fix {{BugReport|${3}}}: ${1}")
                .into_owned(),
            false,
        )
    } else if summary.contains(REPORTED_MARKER) {
        (summary, false)
    } else if summary.starts_with(UNREPORTED_PREFIX) {
        (summary, true)
    } else {
        (format!("{UNREPORTED_PREFIX}{summary}"), true)
    };

    let text = BUG_NUMBER.replace_all(&text, "{{BugReport|${1}}}");
    let prose = COMMIT_REF
        .replace_all(&text, |caps: &Captures<'_>| {
            let lead = &caps[1];
            // Already inside a {{GitCommit|...}} link
            if lead == "|" {
                caps[0].to_string()
            } else {
                format!("{lead}{{{{GitCommit|{}}}}}", &caps[2])
            }
        })
        .into_owned();
    let prose = match prose.strip_prefix('[') {
        Some(rest) => format!("{OPEN_BRACKET_ENTITY}{rest}"),
        None => prose,
    };

    debug!(%prose, unreported, "transformed commit message");
    Ok(Transformed { prose, unreported })
}

/// Render a bullet line: `* [<state>] <prose> ({{GitCommit|rB<sha>}}).`
///
/// `prose` comes from [`transform`] and never starts with `[`, so the
/// bracket after `* ` is present exactly when `release_state` is.
#[must_use]
pub fn render_entry(prose: &str, short_sha: &str, release_state: Option<&str>) -> String {
    match release_state {
        Some(state) => {
            format!("* [{state}] {prose}{COMMIT_LINK_OPEN}{short_sha}{COMMIT_LINK_CLOSE}")
        }
        None => format!("* {prose}{COMMIT_LINK_OPEN}{short_sha}{COMMIT_LINK_CLOSE}"),
    }
}

/// Recover the prose from a bullet line produced by [`render_entry`]
///
/// Strips the `* [<state>] ` (or `* `) prefix and the trailing commit link.
/// Text without those decorations is returned unchanged.
#[must_use]
pub fn unprettify(line: &str) -> &str {
    let mut body = line;
    if let Some(rest) = body.strip_prefix("* [") {
        if let Some(end) = rest.find("] ") {
            body = &rest[end + 2..];
        }
    } else if let Some(rest) = body.strip_prefix("* ") {
        body = rest;
    }

    if let Some(start) = body.rfind(COMMIT_LINK_OPEN) {
        let sha = body[start + COMMIT_LINK_OPEN.len()..].strip_suffix(COMMIT_LINK_CLOSE);
        if sha.is_some_and(|sha| !sha.is_empty() && sha.chars().all(|c| c.is_ascii_hexdigit())) {
            body = &body[..start];
        }
    }
    body
}

/// Release state label of a bracketed bullet (`* [RC2] ...` -> `RC2`)
#[must_use]
pub fn release_state_of(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim_start_matches(['*', ' ']).strip_prefix('[')?;
    let end = rest.find(']')?;
    if end == 0 {
        return None;
    }
    Some((&rest[..end], rest[end + 1..].trim()))
}
