// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for baka-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! baka [global options] <action> [job modifiers]
//!   --init | --commit MSG | --push | --pull | --untrack PATH...
//!   --install PKG... | --remove PKG... | --upgrade
//!   --docker ACTION all|NAME... | --podman ACTION all|NAME...
//!   --file save|restore all|NAME... | --edit FILE
//!   --job NAME [-i] [-e] [-p] [-y] | --list
//!   --sysck | --scan | --diff | --log | --show
//! ```

pub mod action;
pub mod global;

#[cfg(test)]
mod tests;

use crate::cli::action::{Action, ActionArgs, ModifierArgs};
use crate::cli::global::GlobalOptions;
use crate::error::{BakaError, BakaResult, ValidationError};
use crate::exec::Modifiers;
use clap::Parser;

/// Baka Admin's Kludge Assistant - Rust Port
///
/// Keeps configuration files under git and runs admin chores around commits.
#[derive(Debug, Parser)]
#[command(
    name = "baka",
    author,
    version,
    about = "Baka Admin's Kludge Assistant",
    long_about = "baka-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Mirrors the tracked paths into a git repository and commits\n\
                  around package installs, container updates, checks and jobs.",
    after_help = "CONFIG FILE:\n\n\
                  By default, baka reads ~/.baka/config.toml; --config or $BAKARC\n\
                  select another file. BAKA_<SECTION>__<KEY> environment variables\n\
                  override single values, e.g. BAKA_GLOBAL__EDITOR=vim.\n\
                  `baka --init` writes a commented template when the file is missing."
)]
pub struct Cli {
    /// Global options shared by all actions
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Action to perform
    #[command(flatten)]
    pub action: ActionArgs,

    /// Job modifiers
    #[command(flatten)]
    pub modifiers: ModifierArgs,
}

impl Cli {
    /// Typed action and job modifiers.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidArgument` for a malformed
    /// `--docker`, `--podman` or `--file` argument list, or for job modifiers
    /// given with any action other than `--job`.
    pub fn into_parts(self) -> BakaResult<(GlobalOptions, Action, Modifiers)> {
        let modifiers = self.modifiers.to_modifiers();
        let action = self.action.into_action()?;
        if !modifiers.is_empty() && !matches!(action, Action::Job(_)) {
            return Err(BakaError::from(ValidationError::InvalidArgument {
                what: "modifiers".to_string(),
                message: "-i, -e, -p and -y only apply to --job".to_string(),
            }));
        }
        Ok((self.global, action, modifiers))
    }
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Tries to parse command-line arguments from an iterator.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse_from<I, T>(iter: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(iter)
}
