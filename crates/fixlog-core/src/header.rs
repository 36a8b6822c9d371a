// Copyright (c) 2026 - present fixlog contributors
// SPDX-License-Identifier: MIT

//! Free-text header of a release log
//!
//! The header is every line before the first category heading. It is kept
//! verbatim across runs except for the revision-range line of the active
//! release state, which is regenerated from the range being reviewed.

use fixlog_git::commit::SHORT_SHA_LEN;

const RANGE_TEXT: &str = "Changes from revision";

/// Revision range reviewed in one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionRange {
    /// Oldest commit of the range
    pub start: String,
    /// Newest commit of the range
    pub end: String,
    /// Release state this run tags entries with
    pub release_state: Option<String>,
    /// Branch the range was read from
    pub branch: Option<String>,
}

impl RevisionRange {
    /// Create a range between two commit identifiers
    #[must_use]
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            release_state: None,
            branch: None,
        }
    }

    /// Tag the range with a release state
    #[must_use]
    pub fn with_release_state(mut self, state: Option<&str>) -> Self {
        self.release_state = state.map(str::to_string);
        self
    }

    /// Record the branch name
    #[must_use]
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Header line describing the range
    #[must_use]
    pub fn line(&self) -> String {
        let mut line = format!(
            "{}{RANGE_TEXT} {{{{GitCommit|rB{}}}}} to {{{{GitCommit|rB{}}}}}, inclusive",
            self.prefix(),
            short(&self.start),
            short(&self.end)
        );
        if let Some(ref branch) = self.branch {
            line.push_str(&format!(" (''{branch}'' branch)"));
        }
        line.push('.');
        line
    }

    fn prefix(&self) -> String {
        match self.release_state {
            Some(ref state) => format!("[{state}] "),
            None => String::new(),
        }
    }

    /// Check whether `line` is this range's line from an earlier run
    fn is_same_kind(&self, line: &str) -> bool {
        line.strip_prefix(&self.prefix())
            .is_some_and(|rest| rest.starts_with(RANGE_TEXT))
    }
}

fn short(sha: &str) -> &str {
    &sha[..SHORT_SHA_LEN.min(sha.len())]
}

/// Header lines of the document, without trailing blank lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    lines: Vec<String>,
}

impl Header {
    /// Create a header from raw lines
    #[must_use]
    pub fn new(lines: Vec<String>) -> Self {
        let mut header = Self { lines };
        header.trim_trailing_blanks();
        header
    }

    /// Header of a brand new document
    #[must_use]
    pub fn fresh(product: &str, version: &str, range: &RevisionRange) -> Self {
        Self::new(vec![
            format!("= {product} {version}: Bug Fixes ="),
            String::new(),
            range.line(),
        ])
    }

    /// Header lines
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Check if the header is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Replace the range line of the same release state, or append one
    pub fn set_range(&mut self, range: &RevisionRange) {
        let line = range.line();
        if let Some(existing) = self.lines.iter_mut().find(|l| range.is_same_kind(l)) {
            *existing = line;
            return;
        }
        if !self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.lines.push(line);
    }

    fn trim_trailing_blanks(&mut self) {
        while self.lines.last().is_some_and(|l| l.trim().is_empty()) {
            self.lines.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn range() -> RevisionRange {
        RevisionRange::new(
            "1945ab9c752534e733c38ba0109dc3b741f0a6eb",
            "c460aeb7fb2d109c17e43de0ce681faec0b7374d",
        )
    }

    #[test]
    fn test_range_line_plain() {
        assert_eq!(
            range().line(),
            "Changes from revision {{GitCommit|rB1945ab9c75}} to {{GitCommit|rBc460aeb7fb}}, inclusive."
        );
    }

    #[test]
    fn test_range_line_with_state_and_branch() {
        let line = range()
            .with_release_state(Some("RC2"))
            .with_branch("blender-v2.79-release")
            .line();
        assert_eq!(
            line,
            "[RC2] Changes from revision {{GitCommit|rB1945ab9c75}} to {{GitCommit|rBc460aeb7fb}}, \
             inclusive (''blender-v2.79-release'' branch)."
        );
    }

    #[test]
    fn test_fresh_header() {
        let header = Header::fresh("Blender", "2.79", &range().with_release_state(Some("RC1")));
        assert_eq!(header.lines().len(), 3);
        assert_eq!(header.lines()[0], "= Blender 2.79: Bug Fixes =");
        assert!(header.lines()[2].starts_with("[RC1] Changes from revision"));
    }

    #[test]
    fn test_new_trims_trailing_blank_lines() {
        let header = Header::new(vec!["= T =".into(), String::new(), "  ".into()]);
        assert_eq!(header.lines(), ["= T =".to_string()]);
    }

    #[test]
    fn test_set_range_replaces_same_state() {
        let mut header = Header::fresh("Blender", "2.79", &range().with_release_state(Some("RC2")));
        let newer =
            RevisionRange::new("aaaaaaaaaaaa", "bbbbbbbbbbbb").with_release_state(Some("RC2"));
        header.set_range(&newer);
        assert_eq!(header.lines().len(), 3);
        assert_eq!(header.lines()[2], newer.line());
    }

    #[test]
    fn test_set_range_appends_other_state() {
        let mut header = Header::fresh("Blender", "2.79", &range().with_release_state(Some("RC2")));
        let rc3 =
            RevisionRange::new("aaaaaaaaaaaa", "bbbbbbbbbbbb").with_release_state(Some("RC3"));
        header.set_range(&rc3);
        assert_eq!(header.lines().len(), 5);
        assert!(header.lines()[2].starts_with("[RC2]"));
        assert_eq!(header.lines()[3], "");
        assert_eq!(header.lines()[4], rc3.line());
    }

    #[test]
    fn test_set_range_on_empty_header() {
        let mut header = Header::default();
        header.set_range(&range());
        assert_eq!(header.lines(), [range().line()]);
    }
}
