// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `<root>/history.log`: one line per action that may have changed something.
//!
//! ```text
//! Sun Mar  1 12:30:00 2026 install vim htop
//! Sun Mar  1 12:41:07 2026 job backup: job 'backup' aborted at step 2: restic check
//! ```

use anyhow::Context;
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// File name of the history log inside the root.
pub const HISTORY_FILE: &str = "history.log";

const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

#[must_use]
pub fn history_path(root: &Path) -> PathBuf {
    root.join(HISTORY_FILE)
}

/// One history line, without the trailing newline.
#[must_use]
pub fn format_entry<Tz>(now: &DateTime<Tz>, action: &str, error: Option<&str>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut line = format!("{} {action}", now.format(TIMESTAMP_FORMAT));
    if let Some(error) = error {
        line.push_str(": ");
        line.push_str(&error.replace('\n', " "));
    }
    line
}

/// Append an entry stamped with the local time.
///
/// The root must exist; nothing is created besides the log file.
///
/// # Errors
///
/// Returns an error if the log cannot be opened or written.
pub fn append(root: &Path, action: &str, error: Option<&str>) -> Result<()> {
    let path = history_path(root);
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    writeln!(file, "{}", format_entry(&Local::now(), action, error))
        .with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_format_entry() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap();
        insta::assert_snapshot!(
            format_entry(&now, "install vim htop", None),
            @"Sun Mar  1 12:30:00 2026 install vim htop"
        );
        insta::assert_snapshot!(
            format_entry(&now, "push", Some("'git push' exited with code 1\nhint")),
            @"Sun Mar  1 12:30:00 2026 push: 'git push' exited with code 1 hint"
        );
    }

    #[test]
    fn test_append_adds_lines() {
        let root = tempfile::tempdir().unwrap();
        append(root.path(), "upgrade", None).unwrap();
        append(root.path(), "push", Some("boom")).unwrap();

        let content = std::fs::read_to_string(history_path(root.path())).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" upgrade"));
        assert!(lines[1].ends_with(" push: boom"));
    }
}
