// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Job transcripts written to `jobs.<name>.log_file`.
//!
//! ```text
//! >>> restic backup /srv
//! <stdout>
//! <stderr>
//!
//! >>> restic forget --prune
//! ...
//! ```

use anyhow::Context;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone};
use std::fmt::{Display, Write as _};
use std::path::{Path, PathBuf};

use crate::config::paths::expand_home;
use crate::error::{BakaError, Result, ValidationError};
use crate::exec::CommandResult;

/// Captured output of every step a job ran.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Transcript {
    text: String,
}

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: &CommandResult) {
        let _ = writeln!(self.text, ">>> {}", result.command());
        for stream in [result.stdout(), result.stderr()] {
            if stream.is_empty() {
                continue;
            }
            self.text.push_str(stream);
            if !stream.ends_with('\n') {
                self.text.push('\n');
            }
        }
        self.text.push('\n');
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Write to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(path, &self.text)
            .with_context(|| format!("failed to write transcript {}", path.display()))
    }
}

/// Whether every `%` code in `template` is one strftime understands.
#[must_use]
pub fn is_valid_pattern(template: &str) -> bool {
    !StrftimeItems::new(template).any(|item| matches!(item, Item::Error))
}

/// Expand strftime codes and `~` in `template`, then resolve it against `root`.
///
/// # Errors
///
/// Returns `ValidationError::InvalidArgument` for a malformed format string.
pub fn transcript_path<Tz>(root: &Path, template: &str, now: &DateTime<Tz>) -> Result<PathBuf>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let invalid = || {
        BakaError::from(ValidationError::InvalidArgument {
            what: "log_file".to_string(),
            message: format!("bad strftime format '{template}'"),
        })
    };
    if !is_valid_pattern(template) {
        return Err(invalid().into());
    }
    let mut expanded = String::new();
    write!(expanded, "{}", now.format_with_items(StrftimeItems::new(template)))
        .map_err(|_| invalid())?;

    let path = expand_home(Path::new(&expanded))?;
    Ok(if path.is_absolute() {
        path
    } else {
        root.join(path)
    })
}
