// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only repository queries.
//!
//! ```text
//! GitQuery (read) --> GixBackend (pure Rust gix, no subprocess)
//! ```
//!
//! Writes always go through the git CLI via the executor so that dry-run
//! prints them.

use anyhow::Context;
use std::path::Path;

use crate::error::Result;


/// Read-only git query operations.
pub trait GitQuery {
    /// Whether `path` itself is the working tree of a repository.
    ///
    /// A directory nested inside some other repository does not count.
    fn is_repository(path: &Path) -> bool;

    /// Current branch name (None if HEAD is detached).
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or HEAD cannot be read.
    fn current_branch(path: &Path) -> Result<Option<String>>;

    /// Whether the working tree differs from HEAD (staged, unstaged or untracked).
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or the status walk fails.
    fn has_uncommitted_changes(path: &Path) -> Result<bool>;
}

/// Pure Rust git backend using gix.
pub struct GixBackend;

impl GitQuery for GixBackend {
    fn is_repository(path: &Path) -> bool {
        gix::open(path).is_ok_and(|repo| repo.workdir().is_some())
    }

    fn current_branch(path: &Path) -> Result<Option<String>> {
        let repo = gix::open(path)
            .with_context(|| format!("failed to open repository at {}", path.display()))?;
        let head = repo.head_name().context("failed to read HEAD")?;
        Ok(head.map(|name| name.shorten().to_string()))
    }

    fn has_uncommitted_changes(path: &Path) -> Result<bool> {
        use gix::status::UntrackedFiles;

        let repo = gix::open(path)
            .with_context(|| format!("failed to open repository at {}", path.display()))?;

        let has_changes = repo
            .status(gix::progress::Discard)
            .context("failed to prepare status check")?
            .untracked_files(UntrackedFiles::Files)
            .into_iter(None)
            .context("failed to check repository status")?
            .next()
            .is_some();

        Ok(has_changes)
    }
}
