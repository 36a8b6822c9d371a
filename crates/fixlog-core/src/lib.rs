// Copyright (c) 2026 - present fixlog contributors
// SPDX-License-Identifier: MIT

//! fixlog-core: categorized bug-fix release log documents
//!
//! This crate holds the document model behind fixlog. A release log is a
//! wiki-markup page listing fixed bugs under a two-level category tree,
//! with a header, a totals block and an appendix grouping entries by the
//! release state (alpha, RC1, ...) they were backported in.
//!
//! ## Round trip
//!
//! Documents are parsed back into a [`ReleaseLog`] so a review run can
//! extend the log written by a previous one:
//!
//! ```rust
//! use fixlog_core::{CategoryTree, parse, render};
//!
//! let text = "= Blender 2.79: Bug Fixes =\n\n\
//!             == Objects / Animation / GP ==\n\
//!             * Fix {{BugReport|42}}: crash ({{GitCommit|rB0123456789}}).\n";
//! let log = parse(text, CategoryTree::default(), &["RC1"]);
//! assert_eq!(log.counts().reported, 1);
//!
//! let again = parse(&render(&log), CategoryTree::default(), &["RC1"]);
//! assert_eq!(again.buckets(), log.buckets());
//! ```
//!
//! ## Messages
//!
//! [`message::transform`] turns a commit message into entry prose,
//! rewriting bug and commit references to wiki templates.

#![warn(missing_docs)]

pub mod category;
pub mod document;
pub mod error;
pub mod exclude;
pub mod header;
pub mod message;
pub mod parser;
pub mod records;
pub mod render;
pub mod store;

pub use category::{CategoryTree, DEFAULT_CATEGORIES, MainCategory};
pub use document::{Aside, BucketKey, Counts, Entry, EntryKind, ReleaseLog, ReleaseStateList};
pub use error::ReleaseLogError;
pub use exclude::ExclusionSet;
pub use header::{Header, RevisionRange};
pub use message::{Transformed, transform, unprettify};
pub use parser::parse;
pub use records::ReviewFiles;
pub use render::render;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::category::{CategoryTree, MainCategory};
    pub use crate::document::{EntryKind, ReleaseLog};
    pub use crate::error::ReleaseLogError;
    pub use crate::exclude::ExclusionSet;
    pub use crate::header::{Header, RevisionRange};
}
