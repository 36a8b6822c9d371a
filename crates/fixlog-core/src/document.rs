// Copyright (c) 2026 - present fixlog contributors
// SPDX-License-Identifier: MIT

//! In-memory release log
//!
//! Entries are stored as a flat, append-only list tagged with their bucket
//! (main category, sub-category, reported flag); the serializer groups them
//! at render time. Entries are never edited or removed.

use std::collections::BTreeMap;

use fixlog_git::Commit;
use tracing::debug;

use crate::category::CategoryTree;
use crate::error::ReleaseLogError;
use crate::header::{Header, RevisionRange};
use crate::message::{self, render_entry};

/// Whether an entry references a tracked bug report
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntryKind {
    /// The commit message referenced a bug report
    Reported,
    /// Fixed without a bug report
    Unreported,
}

/// Bucket an entry belongs to
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BucketKey {
    /// Main category (`None` for uncategorized entries)
    pub main: Option<String>,
    /// Sub-category (`None` when filed directly under the main category)
    pub sub: Option<String>,
    /// Reported or unreported
    pub kind: EntryKind,
}

/// One rendered bullet line and its bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Bucket of the entry
    pub key: BucketKey,
    /// Rendered bullet line
    pub text: String,
}

/// Running totals of reported and unreported entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    /// Entries referencing a bug report
    pub reported: usize,
    /// Entries without a bug report
    pub unreported: usize,
}

impl Counts {
    /// Total number of entries
    #[must_use]
    pub fn total(&self) -> usize {
        self.reported + self.unreported
    }
}

/// Plain entries listed again under a tracked release state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseStateList {
    /// Release state label, e.g. `RC2`
    pub label: String,
    /// Unbracketed bullet lines
    pub entries: Vec<String>,
}

/// Ignore block written by hand, kept verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aside {
    /// Lines between the ignore markers
    pub lines: Vec<String>,
}

/// The release log document model
#[derive(Debug, Clone)]
pub struct ReleaseLog {
    tree: CategoryTree,
    header: Header,
    asides: Vec<Aside>,
    entries: Vec<Entry>,
    counts: Counts,
    release_states: Vec<ReleaseStateList>,
}

impl ReleaseLog {
    /// Create an empty release log
    ///
    /// Only the `tracked_states` labels get a release-state appendix, in the
    /// given order.
    #[must_use]
    pub fn new<S: AsRef<str>>(tree: CategoryTree, tracked_states: &[S]) -> Self {
        let mut release_states: Vec<ReleaseStateList> = Vec::new();
        for label in tracked_states.iter().map(AsRef::as_ref) {
            if !label.is_empty() && !release_states.iter().any(|s| s.label == label) {
                release_states.push(ReleaseStateList {
                    label: label.to_string(),
                    entries: Vec::new(),
                });
            }
        }
        Self {
            tree,
            header: Header::default(),
            asides: Vec::new(),
            entries: Vec::new(),
            counts: Counts::default(),
            release_states,
        }
    }

    /// Category tree the log is organized by
    #[must_use]
    pub fn tree(&self) -> &CategoryTree {
        &self.tree
    }

    /// Document header
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Replace the header
    pub fn set_header(&mut self, header: Header) {
        self.header = header;
    }

    /// Regenerate the header's revision-range line
    pub fn set_range(&mut self, range: &RevisionRange) {
        self.header.set_range(range);
    }

    /// Hand-written ignore blocks carried over from the parsed file
    #[must_use]
    pub fn asides(&self) -> &[Aside] {
        &self.asides
    }

    /// All entries in insertion order
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Running totals
    #[must_use]
    pub fn counts(&self) -> Counts {
        self.counts
    }

    /// Tracked release states in declared order
    #[must_use]
    pub fn release_states(&self) -> &[ReleaseStateList] {
        &self.release_states
    }

    /// Entries listed under a tracked release state
    #[must_use]
    pub fn release_state(&self, label: &str) -> Option<&[String]> {
        self.release_states
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.entries.as_slice())
    }

    /// Check if `label` is a tracked release state
    #[must_use]
    pub fn is_tracked(&self, label: &str) -> bool {
        self.release_states.iter().any(|s| s.label == label)
    }

    /// Entries of one bucket, in insertion order
    #[must_use]
    pub fn bucket(&self, main: Option<&str>, sub: Option<&str>, kind: EntryKind) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| {
                e.key.kind == kind && e.key.main.as_deref() == main && e.key.sub.as_deref() == sub
            })
            .map(|e| e.text.as_str())
            .collect()
    }

    /// All non-empty buckets with their entries in insertion order
    #[must_use]
    pub fn buckets(&self) -> BTreeMap<BucketKey, Vec<String>> {
        let mut buckets: BTreeMap<BucketKey, Vec<String>> = BTreeMap::new();
        for entry in &self.entries {
            buckets
                .entry(entry.key.clone())
                .or_default()
                .push(entry.text.clone());
        }
        buckets
    }

    /// Reported entries first, then unreported, of one (main, sub) section
    pub(crate) fn section(&self, main: Option<&str>, sub: Option<&str>) -> Vec<&str> {
        let mut lines = self.bucket(main, sub, EntryKind::Reported);
        lines.extend(self.bucket(main, sub, EntryKind::Unreported));
        lines
    }

    /// Sub-category names filed under the uncategorized bucket, first seen first
    pub(crate) fn orphaned_subs(&self) -> Vec<&str> {
        let mut subs: Vec<&str> = Vec::new();
        for entry in self.entries.iter().filter(|e| e.key.main.is_none()) {
            if let Some(sub) = entry.key.sub.as_deref() {
                if !subs.contains(&sub) {
                    subs.push(sub);
                }
            }
        }
        subs
    }

    /// Check if any entry landed outside the category tree
    #[must_use]
    pub fn has_uncategorized(&self) -> bool {
        self.entries.iter().any(|e| e.key.main.is_none())
    }

    /// Record an accepted commit under the selected category
    ///
    /// `sub_index` is `None` to file the entry directly under the main
    /// category. When `release_state` is tracked, the plain bullet is also
    /// appended to that state's list. Submitting the same commit twice
    /// records it twice.
    ///
    /// # Errors
    ///
    /// Returns `ReleaseLogError::InvalidCategory` for out-of-range indices
    /// and `ReleaseLogError::EmptyMessage` for a commit without summary. The
    /// log is left untouched on error.
    pub fn add_entry(
        &mut self,
        commit: &Commit,
        main_index: usize,
        sub_index: Option<usize>,
        release_state: Option<&str>,
    ) -> Result<&Entry, ReleaseLogError> {
        let (main, sub) = self.tree.resolve(main_index, sub_index)?;
        let (main, sub) = (main.to_string(), sub.map(str::to_string));
        let transformed = message::transform(&commit.message)?;

        let kind = if transformed.unreported {
            EntryKind::Unreported
        } else {
            EntryKind::Reported
        };
        let text = render_entry(&transformed.prose, commit.short_sha(), release_state);

        if let Some(state) = release_state {
            self.push_release_state(
                state,
                render_entry(&transformed.prose, commit.short_sha(), None),
            );
        }
        debug!(sha = %commit.short_sha(), %main, ?sub, ?kind, "adding release log entry");
        Ok(self.push_entry(Some(main), sub, kind, text))
    }

    pub(crate) fn push_entry(
        &mut self,
        main: Option<String>,
        sub: Option<String>,
        kind: EntryKind,
        text: String,
    ) -> &Entry {
        match kind {
            EntryKind::Reported => self.counts.reported += 1,
            EntryKind::Unreported => self.counts.unreported += 1,
        }
        self.entries.push(Entry {
            key: BucketKey { main, sub, kind },
            text,
        });
        &self.entries[self.entries.len() - 1]
    }

    /// Append to a release state list; untracked labels are ignored
    pub(crate) fn push_release_state(&mut self, label: &str, text: String) {
        if let Some(list) = self.release_states.iter_mut().find(|s| s.label == label) {
            list.entries.push(text);
        }
    }

    pub(crate) fn push_aside(&mut self, aside: Aside) {
        self.asides.push(aside);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use similar_asserts::assert_eq;

    fn commit(sha_seed: char, message: &str) -> Commit {
        Commit {
            sha: sha_seed.to_string().repeat(40),
            message: message.to_string(),
            author: "Dev".to_string(),
            author_email: "dev@example.com".to_string(),
            timestamp: Utc::now(),
            parents: vec![],
            files: vec![],
        }
    }

    fn log() -> ReleaseLog {
        ReleaseLog::new(CategoryTree::default(), &["RC2", "RC3"])
    }

    #[test]
    fn test_new_log_is_empty() {
        let log = log();
        assert_eq!(log.counts(), Counts::default());
        assert!(log.entries().is_empty());
        assert_eq!(log.release_states().len(), 2);
        assert!(!log.has_uncategorized());
    }

    #[test]
    fn test_new_skips_empty_and_duplicate_states() {
        let log = ReleaseLog::new(CategoryTree::default(), &["", "RC2", "RC2"]);
        assert_eq!(log.release_states().len(), 1);
    }

    #[test]
    fn test_add_reported_entry() {
        let mut log = log();
        let entry = log
            .add_entry(&commit('a', "Fix T12345: crash on save\n\nbody"), 1, Some(2), None)
            .expect("add");
        assert_eq!(
            entry.text,
            "* Fix {{BugReport|12345}}: crash on save ({{GitCommit|rBaaaaaaaaaa}})."
        );
        assert_eq!(entry.key.main.as_deref(), Some("Data / Geometry"));
        assert_eq!(entry.key.sub.as_deref(), Some("Mesh Editing"));
        assert_eq!(log.counts(), Counts { reported: 1, unreported: 0 });
    }

    #[test]
    fn test_add_unreported_entry_without_sub() {
        let mut log = log();
        log.add_entry(&commit('b', "Cleanup unused var"), 5, None, Some("RC2"))
            .expect("add");
        assert_eq!(
            log.bucket(Some("Game Engine"), None, EntryKind::Unreported),
            vec!["* [RC2] Fix unreported: Cleanup unused var ({{GitCommit|rBbbbbbbbbbb}})."]
        );
        assert_eq!(log.counts(), Counts { reported: 0, unreported: 1 });
    }

    #[test]
    fn test_tracked_state_gets_plain_entry() {
        let mut log = log();
        log.add_entry(&commit('c', "Fix T1: a"), 0, None, Some("RC3"))
            .expect("add");
        log.add_entry(&commit('d', "Fix T2: b"), 0, None, Some("beta"))
            .expect("add");
        assert_eq!(
            log.release_state("RC3").expect("tracked"),
            ["* Fix {{BugReport|1}}: a ({{GitCommit|rBcccccccccc}}).".to_string()]
        );
        assert!(log.release_state("RC2").expect("tracked").is_empty());
        assert!(log.release_state("beta").is_none());
    }

    #[test]
    fn test_invalid_category_leaves_log_untouched() {
        let mut log = log();
        let result = log.add_entry(&commit('e', "Fix T1: a"), 99, None, Some("RC2"));
        assert!(matches!(result, Err(ReleaseLogError::InvalidCategory { .. })));
        let result = log.add_entry(&commit('e', "Fix T1: a"), 5, Some(0), Some("RC2"));
        assert!(matches!(result, Err(ReleaseLogError::InvalidCategory { .. })));
        assert!(log.entries().is_empty());
        assert!(log.release_state("RC2").expect("tracked").is_empty());
    }

    #[test]
    fn test_empty_message_leaves_log_untouched() {
        let mut log = log();
        let result = log.add_entry(&commit('f', "\n\n"), 0, None, Some("RC2"));
        assert!(matches!(result, Err(ReleaseLogError::EmptyMessage)));
        assert_eq!(log.counts().total(), 0);
        assert!(log.release_state("RC2").expect("tracked").is_empty());
    }

    #[test]
    fn test_duplicates_are_recorded_twice() {
        let mut log = log();
        let c = commit('a', "Fix T5: twice");
        log.add_entry(&c, 0, Some(0), None).expect("add");
        log.add_entry(&c, 0, Some(0), None).expect("add");
        assert_eq!(
            log.bucket(
                Some("Objects / Animation / GP"),
                Some("Animation"),
                EntryKind::Reported
            )
            .len(),
            2
        );
        assert_eq!(log.counts().total(), 2);
    }

    #[test]
    fn test_buckets_keep_insertion_order() {
        let mut log = log();
        log.add_entry(&commit('1', "Fix T1: first"), 0, Some(0), None).expect("add");
        log.add_entry(&commit('2', "Fix T2: second"), 0, Some(0), None).expect("add");
        let buckets = log.buckets();
        assert_eq!(buckets.len(), 1);
        let entries = buckets.values().next().expect("one bucket");
        assert!(entries[0].contains("first"));
        assert!(entries[1].contains("second"));
    }
}
