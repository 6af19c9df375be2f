// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Version-control operations on the tracked root.
//!
//! ```text
//! commit(msg)
//!   ├─ msg blank?              --> ValidationError::EmptyMessage
//!   ├─ stage_all()             mirror tracked paths, git add --ignore-errors --all
//!   ├─ git diff --cached --quiet
//!   │     0 --> nothing staged, Ok(false)
//!   │     1 --> git commit --quiet -m msg, Ok(true)
//!   └─ other --> ExecutionError::NonZeroExit
//! ```

use anyhow::Context;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

use super::backend::{GitQuery, GixBackend};
use crate::error::{BakaError, BakaResult, ConfigError, ExecutionError, Result, ValidationError};
use crate::exec::{Executor, Invocation, RunContext};
use crate::mirror;
use crate::output::Output;

/// Committer name recorded by `init`.
pub const COMMITTER_NAME: &str = "baka admin";

/// Message of the first commit.
pub const INITIAL_COMMIT_MESSAGE: &str = "baka initial commit";

/// `.gitignore` written by `init` when none exists.
pub const DEFAULT_GITIGNORE: &str = "\
history.log
*~
*-old
*.cache
*.dpkg-bak
*.dpkg-dist
*.dpkg-new
*.dpkg-old
**/fish_history
**/xonsh-*.json
";

const LOG_FORMAT: &str = "--format=format:%C(bold blue)%h%C(reset) - %C(bold cyan)%aD%C(reset) \
%C(bold green)(%ar)%C(reset)%C(bold yellow)%d%C(reset)%n%C(bold white)%s%C(reset)%C(dim white) - %an%C(reset)";

/// Fail with `NotInitialized` unless the root is a git working tree.
///
/// # Errors
///
/// Returns `ConfigError::NotInitialized` when the root is not a repository.
pub fn ensure_initialized(root: &Path) -> BakaResult<()> {
    if GixBackend::is_repository(root) {
        Ok(())
    } else {
        Err(ConfigError::NotInitialized {
            path: root.display().to_string(),
        }
        .into())
    }
}

/// Git operations rooted at the tracked root, issued through an [`Executor`].
pub struct GitAdapter<'a, E: Executor> {
    exec: &'a E,
    tracked_paths: &'a [PathBuf],
}

impl<'a, E: Executor> GitAdapter<'a, E> {
    #[must_use]
    pub const fn new(exec: &'a E, tracked_paths: &'a [PathBuf]) -> Self {
        Self {
            exec,
            tracked_paths,
        }
    }

    fn git(ctx: &RunContext) -> Invocation {
        Invocation::new("git").cwd(ctx.root())
    }

    async fn run(&self, ctx: &RunContext, inv: Invocation) -> Result<()> {
        self.exec.run_checked(ctx, &inv).await?;
        Ok(())
    }

    /// Create the repository, configure the committer and make the first commit.
    ///
    /// # Errors
    ///
    /// Returns an error if any git command fails or `.gitignore` cannot be written.
    pub async fn init(&self, ctx: &RunContext, hostname: &str) -> Result<bool> {
        self.run(ctx, mirror::mkdir(ctx.root())).await?;
        self.run(ctx, Self::git(ctx).arg("init")).await?;
        self.run(
            ctx,
            Self::git(ctx).args(["config", "user.name", COMMITTER_NAME]),
        )
        .await?;
        let email = format!("baka@{hostname}");
        self.run(
            ctx,
            Self::git(ctx).args(["config", "user.email", email.as_str()]),
        )
        .await?;
        write_default_gitignore(ctx)?;
        self.commit(ctx, INITIAL_COMMIT_MESSAGE).await
    }

    /// Mirror tracked paths into the root and stage everything.
    ///
    /// # Errors
    ///
    /// Returns an error if mirroring or `git add` fails.
    pub async fn stage_all(&self, ctx: &RunContext) -> Result<()> {
        mirror::sync_tracked(self.exec, ctx, self.tracked_paths).await?;
        self.run(ctx, Self::git(ctx).args(["add", "--ignore-errors", "--all"]))
            .await
    }

    /// Whether the index differs from HEAD.
    ///
    /// Under dry-run nothing was staged for real, so this reports `true` and
    /// the commit is printed.
    async fn has_staged_changes(&self, ctx: &RunContext) -> Result<bool> {
        let inv = Self::git(ctx).args(["diff", "--cached", "--quiet"]);
        let result = self.exec.execute(ctx, &inv).await?;
        match result.exit_code() {
            _ if result.is_dry_run() => Ok(true),
            0 => Ok(false),
            1 => Ok(true),
            code => Err(BakaError::from(ExecutionError::NonZeroExit {
                command: result.command().to_string(),
                code,
            })
            .into()),
        }
    }

    /// Stage everything and commit it if anything changed.
    ///
    /// Returns whether a commit was made (or printed under dry-run).
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyMessage` for a blank message, before
    /// anything runs, or an `ExecutionError` if a git command fails.
    pub async fn commit(&self, ctx: &RunContext, message: &str) -> Result<bool> {
        if message.trim().is_empty() {
            return Err(BakaError::from(ValidationError::EmptyMessage).into());
        }
        self.stage_all(ctx).await?;
        self.commit_staged(ctx, message).await
    }

    /// Commit what is already staged, if anything.
    async fn commit_staged(&self, ctx: &RunContext, message: &str) -> Result<bool> {
        if !self.has_staged_changes(ctx).await? {
            info!(message, "nothing to commit");
            return Ok(false);
        }
        self.run(
            ctx,
            Self::git(ctx).args(["commit", "--quiet", "-m", message]),
        )
        .await?;
        info!(message, "committed");
        Ok(true)
    }

    /// # Errors
    ///
    /// Returns an `ExecutionError` if `git push` fails.
    pub async fn push(&self, ctx: &RunContext) -> Result<()> {
        self.run(ctx, Self::git(ctx).arg("push")).await
    }

    /// # Errors
    ///
    /// Returns an `ExecutionError` if `git pull` fails.
    pub async fn pull(&self, ctx: &RunContext) -> Result<()> {
        self.run(ctx, Self::git(ctx).arg("pull")).await
    }

    /// Ignore `paths` from now on and drop them from the index; files stay on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if `paths` is empty, `.gitignore` cannot be updated or
    /// a git command fails.
    pub async fn untrack(&self, ctx: &RunContext, paths: &[String]) -> Result<bool> {
        if paths.is_empty() {
            return Err(BakaError::from(ValidationError::InvalidArgument {
                what: "untrack".to_string(),
                message: "no paths given".to_string(),
            })
            .into());
        }
        append_gitignore(ctx, paths)?;
        self.run(
            ctx,
            Self::git(ctx)
                .args(["rm", "-r", "--cached", "--ignore-unmatch", "--"])
                .args(paths),
        )
        .await?;
        self.commit(ctx, &format!("baka untrack {}", paths.join(" ")))
            .await
    }

    /// Stage everything, then show a short status and the staged diff.
    ///
    /// # Errors
    ///
    /// Returns an error if staging or a git command fails.
    pub async fn diff(&self, ctx: &RunContext) -> Result<()> {
        self.stage_all(ctx).await?;
        self.run(ctx, Self::git(ctx).args(["status", "-s"])).await?;
        self.run(
            ctx,
            Self::git(ctx).args(["diff", "--color-words", "--cached", "--minimal"]),
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an error if `git log` fails.
    pub async fn log(&self, ctx: &RunContext) -> Result<()> {
        self.run(
            ctx,
            Self::git(ctx).args([
                "log",
                "--abbrev-commit",
                "--all",
                "--decorate",
                "--graph",
                "--stat",
                LOG_FORMAT,
            ]),
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an error if `git show` fails.
    pub async fn show(&self, ctx: &RunContext) -> Result<()> {
        self.run(ctx, Self::git(ctx).args(["show", "--color-words"]))
            .await
    }
}

fn write_default_gitignore(ctx: &RunContext) -> Result<()> {
    let path = ctx.root().join(".gitignore");
    if ctx.is_dry_run() {
        Output::dry_run(format!("write {}", path.display()));
        return Ok(());
    }
    if path.exists() {
        return Ok(());
    }
    std::fs::write(&path, DEFAULT_GITIGNORE)
        .with_context(|| format!("failed to write {}", path.display()))
}

fn append_gitignore(ctx: &RunContext, paths: &[String]) -> Result<()> {
    let path = ctx.root().join(".gitignore");
    if ctx.is_dry_run() {
        Output::dry_run(format!("append {} to {}", paths.join(" "), path.display()));
        return Ok(());
    }
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let existing = std::fs::read_to_string(&path).unwrap_or_default();
    if !existing.is_empty() && !existing.ends_with('\n') {
        writeln!(file).with_context(|| format!("failed to write {}", path.display()))?;
    }
    for entry in paths {
        writeln!(file, "{entry}").with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}
