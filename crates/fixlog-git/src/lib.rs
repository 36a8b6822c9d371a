// Copyright (c) 2026 - present fixlog contributors
// SPDX-License-Identifier: MIT

//! fixlog-git: commit source for fixlog
//!
//! This library crate walks a git revision range and hands out plain
//! [`Commit`] records (identifier, author, date, message and changed files)
//! for the review session and the release-log model.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use fixlog_git::{GitRepo, WalkOptions};
//!
//! let repo = GitRepo::open(".").expect("open repo");
//! let commits = repo.walk(&WalkOptions::range("HEAD~10..HEAD"))
//!     .expect("walk commits");
//!
//! for c in commits {
//!     println!("{} - {}", c.short_sha(), c.subject());
//! }
//! ```

pub mod commit;
pub mod error;
pub mod repo;

pub use commit::{Commit, FileStatus};
pub use error::GitError;
pub use repo::{GitRepo, WalkOptions};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commit::{Commit, FileStatus};
    pub use crate::error::GitError;
    pub use crate::repo::{GitRepo, WalkOptions};
}
