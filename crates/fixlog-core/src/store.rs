// Copyright (c) 2026 - present fixlog contributors
// SPDX-License-Identifier: MIT

//! Loading and saving the release log document
//!
//! Saving always rewrites the whole document through a temporary file in
//! the target directory that is then renamed over the target, so a failed
//! write leaves the previous document intact.

use std::io::{ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::category::CategoryTree;
use crate::document::ReleaseLog;
use crate::error::ReleaseLogError;
use crate::parser::parse;
use crate::render::render;

/// Read a text file, `None` if it does not exist
///
/// # Errors
///
/// Returns `ReleaseLogError::Io` for any error other than a missing file.
pub fn read_optional(path: &Path) -> Result<Option<String>, ReleaseLogError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Replace `path` with `contents` atomically
///
/// # Errors
///
/// Returns `ReleaseLogError::Io` if the temporary file cannot be written or
/// moved into place.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), ReleaseLogError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    debug!(path = %path.display(), bytes = contents.len(), "replaced file");
    Ok(())
}

/// Load the release log at `path`, or start an empty one
///
/// # Errors
///
/// Returns `ReleaseLogError::Io` if an existing file cannot be read.
pub fn load<S: AsRef<str>>(
    path: &Path,
    tree: CategoryTree,
    tracked_states: &[S],
) -> Result<ReleaseLog, ReleaseLogError> {
    match read_optional(path)? {
        Some(text) => {
            let log = parse(&text, tree, tracked_states);
            info!(
                path = %path.display(),
                entries = log.counts().total(),
                "extending existing release log"
            );
            Ok(log)
        }
        None => Ok(ReleaseLog::new(tree, tracked_states)),
    }
}

/// Render and atomically write the release log to `path`
///
/// # Errors
///
/// Returns `ReleaseLogError::Io` if the document cannot be written.
pub fn save(path: &Path, log: &ReleaseLog) -> Result<(), ReleaseLogError> {
    write_atomic(path, &render(log))?;
    info!(path = %path.display(), entries = log.counts().total(), "wrote release log");
    Ok(())
}
