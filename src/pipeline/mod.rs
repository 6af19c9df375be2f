// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Fixed verbs described as data.
//!
//! ```text
//! --install vim htop
//!   Snapshot("baka pre-install")     stage + commit if changed
//!   Run(sudo apt install vim htop)   non-zero --> NonZeroExit, stop
//!   Commit("baka install vim htop")  stage + commit if changed
//!
//! --sysck
//!   Snapshot("baka pre-sysck")
//!   MakeDir(<root>/sysck)
//!   Check(sh -c "... > sysck/ip.log")   non-zero --> warn, keep going
//!   Commit("baka sysck")
//! ```
//!
//! Steps run strictly in order; the first hard failure stops the pipeline,
//! so nothing after it is committed.

#[cfg(test)]
mod tests;

use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::Result;
use crate::exec::{Executor, Invocation, RunContext};
use crate::git::GitAdapter;
use crate::mirror;
use crate::output::Output;

/// One step of a [`Pipeline`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Run a command; a non-zero exit stops the pipeline.
    Run(Invocation),
    /// Run a command; a non-zero exit is reported and ignored.
    Check(Invocation),
    /// Commit the state before the verb changes anything.
    Snapshot(String),
    /// `mkdir -p` a directory.
    MakeDir(PathBuf),
    /// Copy a host path into `<root>/files/<name>/`.
    Save { name: String, path: PathBuf },
    /// Copy a saved entry back to its host path.
    Restore { name: String, path: PathBuf },
    /// Commit the result of the verb.
    Commit(String),
}

/// What a pipeline did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    /// Messages of the commits made (or printed under dry-run).
    pub commits: Vec<String>,
    /// Check steps that exited non-zero.
    pub failed_checks: usize,
}

/// An ordered list of [`Step`]s for one verb.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pipeline {
    steps: Vec<Step>,
}

impl Pipeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    #[must_use]
    pub fn snapshot(self, message: impl Into<String>) -> Self {
        self.step(Step::Snapshot(message.into()))
    }

    #[must_use]
    pub fn run(self, invocation: Invocation) -> Self {
        self.step(Step::Run(invocation))
    }

    #[must_use]
    pub fn check(self, invocation: Invocation) -> Self {
        self.step(Step::Check(invocation))
    }

    #[must_use]
    pub fn mkdir(self, dir: impl Into<PathBuf>) -> Self {
        self.step(Step::MakeDir(dir.into()))
    }

    #[must_use]
    pub fn commit(self, message: impl Into<String>) -> Self {
        self.step(Step::Commit(message.into()))
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Run every step in order.
    ///
    /// # Errors
    ///
    /// Returns the first error: a failed `Run`, `MakeDir`, `Save` or
    /// `Restore` step, or a failed commit.
    pub async fn execute<E: Executor>(
        &self,
        exec: &E,
        ctx: &RunContext,
        git: &GitAdapter<'_, E>,
    ) -> Result<PipelineReport> {
        let mut report = PipelineReport::default();
        for step in &self.steps {
            debug!(?step, "pipeline step");
            match step {
                Step::Run(inv) => {
                    exec.run_checked(ctx, inv).await?;
                }
                Step::Check(inv) => {
                    let result = exec.execute(ctx, inv).await?;
                    if !result.success() {
                        report.failed_checks += 1;
                        Output::warning(format!(
                            "check '{}' exited with code {}",
                            result.command(),
                            result.exit_code()
                        ));
                    }
                }
                Step::MakeDir(dir) => {
                    exec.run_checked(ctx, &mirror::mkdir(dir)).await?;
                }
                Step::Save { name, path } => mirror::save(exec, ctx, name, path).await?,
                Step::Restore { name, path } => mirror::restore(exec, ctx, name, path).await?,
                Step::Snapshot(message) | Step::Commit(message) => {
                    if git.commit(ctx, message).await? {
                        report.commits.push(message.clone());
                    }
                }
            }
        }
        info!(commits = report.commits.len(), "pipeline finished");
        Ok(report)
    }
}
