// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Copy host paths into the tracked root with rsync.
//!
//! ```text
//! /etc              --rsync -rlpt --delete-->  <root>/etc
//! /home/me/.config  --rsync -rlpt --delete-->  <root>/home/me/.config
//!
//! --file save fstab     /etc/fstab  -->  <root>/files/fstab/fstab
//! --file restore fstab  <root>/files/fstab/fstab  -->  /etc/
//! ```
//!
//! Unreadable files are expected (root-owned configs): rsync's
//! permission-denied lines are dropped and its partial-transfer exit codes are
//! tolerated. Anything else rsync prints is passed through to stderr.


use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

use crate::config::paths::mirror_destination;
use crate::error::{BakaError, ExecutionError, Result, ValidationError};
use crate::exec::{Executor, Invocation, OutputMode, RunContext};

/// Directory under the root that holds `--file save` copies.
pub const FILES_DIR: &str = "files";

/// rsync exit codes for partial transfers (unreadable or vanished files).
const TOLERATED_EXIT_CODES: [i32; 2] = [23, 24];

const NOISE: [&str; 2] = ["Permission denied (13)", "(see previous errors) (code 23)"];

/// Drop rsync's permission noise, keep everything else.
#[must_use]
pub fn filter_noise(stderr: &str) -> Vec<&str> {
    stderr
        .lines()
        .filter(|line| !line.is_empty() && !NOISE.iter().any(|n| line.contains(n)))
        .collect()
}

/// Strip trailing separators and `.` components so rsync copies the
/// directory itself rather than its contents.
fn normalized(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

fn with_trailing_slash(dir: &Path) -> String {
    let mut s = dir.to_string_lossy().into_owned();
    if !s.ends_with('/') {
        s.push('/');
    }
    s
}

/// `rsync -rlpt [--delete] <src> <dest_dir>/`
#[must_use]
pub fn rsync(src: &Path, dest_dir: &Path, delete: bool) -> Invocation {
    let mut inv = Invocation::new("rsync").arg("-rlpt");
    if delete {
        inv = inv.arg("--delete");
    }
    inv.arg(normalized(src).to_string_lossy().into_owned())
        .arg(with_trailing_slash(dest_dir))
        .stderr(OutputMode::Capture)
}

/// `mkdir -p <dir>`
#[must_use]
pub fn mkdir(dir: &Path) -> Invocation {
    Invocation::new("mkdir")
        .arg("-p")
        .arg(dir.to_string_lossy().into_owned())
}

/// Parent directory inside the root that a tracked path is copied into.
#[must_use]
pub fn tracked_parent(root: &Path, tracked: &Path) -> PathBuf {
    let dest = mirror_destination(root, &normalized(tracked));
    dest.parent().map_or_else(|| root.to_path_buf(), Path::to_path_buf)
}

/// Where `--file save <name>` keeps its copy.
#[must_use]
pub fn saved_dir(root: &Path, name: &str) -> PathBuf {
    root.join(FILES_DIR).join(name)
}

/// Run one rsync invocation, filtering its stderr.
///
/// # Errors
///
/// Returns an error if rsync cannot be spawned or exits with a code other
/// than success or partial transfer.
pub async fn run_rsync<E: Executor>(exec: &E, ctx: &RunContext, inv: &Invocation) -> Result<()> {
    let result = exec.execute(ctx, inv).await?;
    for line in filter_noise(result.stderr()) {
        eprintln!("{line}");
    }
    match result.exit_code() {
        0 => Ok(()),
        code if TOLERATED_EXIT_CODES.contains(&code) => {
            debug!(cmd = %result.command(), code, "rsync partial transfer");
            Ok(())
        }
        code => Err(BakaError::from(ExecutionError::NonZeroExit {
            command: result.command().to_string(),
            code,
        })
        .into()),
    }
}

/// Mirror every tracked path into the root.
///
/// # Errors
///
/// Returns an error if a destination directory cannot be created or rsync
/// fails hard.
pub async fn sync_tracked<E: Executor>(
    exec: &E,
    ctx: &RunContext,
    tracked_paths: &[PathBuf],
) -> Result<()> {
    for tracked in tracked_paths {
        if !tracked.is_absolute() {
            warn!(path = %tracked.display(), "skipping relative tracked path");
            continue;
        }
        let parent = tracked_parent(ctx.root(), tracked);
        if parent != ctx.root() {
            exec.run_checked(ctx, &mkdir(&parent)).await?;
        }
        run_rsync(exec, ctx, &rsync(tracked, &parent, true)).await?;
    }
    Ok(())
}

/// Copy a host path into `<root>/files/<name>/`.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or rsync fails hard.
pub async fn save<E: Executor>(exec: &E, ctx: &RunContext, name: &str, path: &Path) -> Result<()> {
    let dir = saved_dir(ctx.root(), name);
    exec.run_checked(ctx, &mkdir(&dir)).await?;
    run_rsync(exec, ctx, &rsync(path, &dir, true)).await
}

/// Copy a saved entry back to its host location.
///
/// # Errors
///
/// Returns an error if the path has no file name or rsync fails hard.
pub async fn restore<E: Executor>(
    exec: &E,
    ctx: &RunContext,
    name: &str,
    path: &Path,
) -> Result<()> {
    let path = normalized(path);
    let (Some(base), Some(parent)) = (path.file_name(), path.parent()) else {
        return Err(BakaError::from(ValidationError::InvalidArgument {
            what: format!("files.{name}"),
            message: format!("'{}' has no file name", path.display()),
        })
        .into());
    };
    let saved = saved_dir(ctx.root(), name).join(base);
    run_rsync(exec, ctx, &rsync(&saved, parent, false)).await
}
