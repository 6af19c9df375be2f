// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command execution seam.
//!
//! ```text
//! git adapter / mirror / job runner / pipeline
//!                   |
//!                   v
//!        Executor::execute(ctx, invocation)
//!           /                      \
//!          v                        v
//!   SystemExecutor             RecordingExecutor
//!   dry-run: print line        records calls
//!   else: ProcessBuilder       scripted exit codes
//!          \                        /
//!           v                      v
//!        CommandResult { exit_code, stdout, stderr, dry_run }
//! ```
//!
//! A non-zero exit is returned in the result, never raised: callers decide
//! the policy, usually with [`CommandResult::check`] or [`Executor::run_checked`].

pub mod context;
pub mod invocation;
pub mod recording;
pub mod system;


use futures_util::future::BoxFuture;

use crate::error::Result;

pub use context::{Modifiers, Policy, RunContext};
pub use invocation::{CommandResult, Invocation, OutputMode, StdinSource};
pub use recording::RecordingExecutor;
pub use system::SystemExecutor;

/// Runs external commands on behalf of every other module.
pub trait Executor: Send + Sync {
    /// Run one command.
    ///
    /// Spawn failures are errors (`ExecutionError::SpawnFailed`); a non-zero
    /// exit code is not.
    fn execute<'a>(
        &'a self,
        ctx: &'a RunContext,
        invocation: &'a Invocation,
    ) -> BoxFuture<'a, Result<CommandResult>>;

    /// Run one command and turn a non-zero exit into `ExecutionError::NonZeroExit`.
    fn run_checked<'a>(
        &'a self,
        ctx: &'a RunContext,
        invocation: &'a Invocation,
    ) -> BoxFuture<'a, Result<CommandResult>> {
        Box::pin(async move { Ok(self.execute(ctx, invocation).await?.check()?) })
    }
}
