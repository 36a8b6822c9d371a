// Copyright (c) 2026 - present fixlog contributors
// SPDX-License-Identifier: MIT

//! Error types for fixlog-core

use thiserror::Error;

/// Errors that can occur while building or persisting a release log
#[derive(Debug, Error)]
pub enum ReleaseLogError {
    /// The commit message has no summary text to classify
    #[error("Commit message has no summary text")]
    EmptyMessage,

    /// Category indices do not address an entry of the category tree
    #[error("Invalid category selection: main {main}, sub {sub:?}")]
    InvalidCategory {
        /// Requested main category index
        main: usize,
        /// Requested sub-category index, if any
        sub: Option<usize>,
    },

    /// A category name appears more than once in the tree
    #[error("Duplicate category name: {name}")]
    DuplicateCategory {
        /// The repeated name
        name: String,
    },

    /// Category tree file could not be decoded
    #[error("Invalid category tree: {0}")]
    CategoryConfig(#[from] serde_json::Error),

    /// Error reading or writing a file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
