// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-invocation context passed to every executor, adapter and runner call.

use bitflags::bitflags;
use std::path::{Path, PathBuf};

use crate::config::types::JobConfig;

bitflags! {
    /// Job modifiers given on the command line.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u8 {
        /// `-i`: ask before every step
        const INTERACTIVE = 0x01;
        /// `-y`: feed `y` answers to each step's stdin
        const AUTO_YES = 0x02;
        /// `-p`: pause after a failed step
        const PAUSE_ON_ERROR = 0x04;
        /// `-e`: invert the job's `tolerate_nonzero` default
        const TOGGLE_NONZERO = 0x08;
    }
}

/// Effective job behaviour after applying [`Modifiers`] to a job's defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Policy {
    pub interactive: bool,
    pub auto_yes: bool,
    pub tolerate_nonzero: bool,
    pub pause_on_error: bool,
}

impl Modifiers {
    /// Resolve against a job: flags force on, `TOGGLE_NONZERO` flips.
    #[must_use]
    pub const fn resolve(self, job: &JobConfig) -> Policy {
        Policy {
            interactive: job.interactive || self.contains(Self::INTERACTIVE),
            auto_yes: job.auto_yes || self.contains(Self::AUTO_YES),
            tolerate_nonzero: job.tolerate_nonzero ^ self.contains(Self::TOGGLE_NONZERO),
            pause_on_error: job.pause_on_error || self.contains(Self::PAUSE_ON_ERROR),
        }
    }
}

/// Tracked root, dry-run flag and modifiers for one `baka` run.
#[derive(Debug, Clone)]
pub struct RunContext {
    root: PathBuf,
    dry_run: bool,
    modifiers: Modifiers,
}

impl RunContext {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dry_run: false,
            modifiers: Modifiers::empty(),
        }
    }

    /// Tracked root (git working tree).
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    #[must_use]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}
