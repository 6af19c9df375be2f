// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for every action.
//!
//! # Option Precedence
//!
//! ```text
//! -c/--config FILE  ← config file ($BAKARC, default ~/.baka/config.toml)
//! -n/--dry-run      ← print commands instead of running them
//! -l/--log-level N  ← console verbosity (0-6), overrides global.log_level
//! --log-file FILE   ← diagnostic log, overrides global.log_file
//!
//! Precedence: CLI flags > BAKA_* env > config file > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

/// Global options available for every action.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Print the commands that would run without running them.
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,

    /// Configuration file (required to exist when given).
    #[arg(short = 'c', long = "config", value_name = "FILE", env = "BAKARC")]
    pub config: Option<PathBuf>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// Diagnostic log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl GlobalOptions {
    /// Converts command-line options to `(key, value)` configuration overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(&'static str, String)> {
        let mut overrides = Vec::new();

        if let Some(level) = self.log_level {
            overrides.push(("global.log_level", level.to_string()));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(("global.log_file", path.display().to_string()));
        }

        overrides
    }
}
