// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations on the tracked root.
//!
//! ```text
//!       cmd / job / pipeline
//!              |
//!              v
//!   ,----------------------,
//!   |      GitAdapter      |  init, stage_all, commit, push, pull,
//!   '--+----------------+--'  untrack, diff, log, show
//!      |                |
//!      v                v
//!   GitQuery         Executor
//!   (gix, read)      (git CLI, write, dry-run aware)
//!      |
//!      v
//!   GixBackend
//!   .is_repository
//!   .current_branch
//!   .has_uncommitted_changes
//! ```

pub mod adapter;
pub mod backend;


pub use adapter::{GitAdapter, ensure_initialized};
pub use backend::{GitQuery, GixBackend};
