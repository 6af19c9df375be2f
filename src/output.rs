// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Terminal output for the user, separate from diagnostic logging.
//!
//! ```text
//! [dry-run] git add --ignore-errors --all     Output::dry_run
//! $ restic backup /srv                        Output::command
//! ✓ job backup finished                       Output::success
//! ⚠ step 2 failed with exit code 1            Output::warning
//! ```
//!
//! Colour is used only when the stream is a terminal and `NO_COLOR` is unset.

use owo_colors::OwoColorize;
use std::io::IsTerminal;

/// Standard output helper for consistent CLI formatting.
pub struct Output;

fn colour_stdout() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

fn colour_stderr() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
}

impl Output {
    /// A command that would have run.
    pub fn dry_run(command_line: impl AsRef<str>) {
        if colour_stdout() {
            println!("{} {}", "[dry-run]".dimmed(), command_line.as_ref().dimmed());
        } else {
            println!("[dry-run] {}", command_line.as_ref());
        }
    }

    /// A job step about to run.
    pub fn command(command_line: impl AsRef<str>) {
        if colour_stdout() {
            println!("{} {}", "$".cyan().bold(), command_line.as_ref().bold());
        } else {
            println!("$ {}", command_line.as_ref());
        }
    }

    pub fn success(msg: impl AsRef<str>) {
        if colour_stdout() {
            println!("{} {}", "✓".green().bold(), msg.as_ref());
        } else {
            println!("✓ {}", msg.as_ref());
        }
    }

    pub fn warning(msg: impl AsRef<str>) {
        if colour_stderr() {
            eprintln!("{} {}", "⚠".yellow(), msg.as_ref());
        } else {
            eprintln!("⚠ {}", msg.as_ref());
        }
    }

    pub fn error(msg: impl AsRef<str>) {
        if colour_stderr() {
            eprintln!("{} {}", "Error:".red().bold(), msg.as_ref());
        } else {
            eprintln!("Error: {}", msg.as_ref());
        }
    }

    /// A section title (`--list`).
    pub fn header(msg: impl AsRef<str>) {
        if colour_stdout() {
            println!("{}", msg.as_ref().bold().cyan());
        } else {
            println!("{}", msg.as_ref());
        }
    }
}
