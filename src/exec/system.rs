// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Real executor backed by [`ProcessBuilder`].

use futures_util::future::BoxFuture;
use tracing::{debug, trace};

use super::context::RunContext;
use super::invocation::{CommandResult, Invocation, OutputMode};
use super::Executor;
use crate::core::process::builder::{ProcessBuilder, StreamFlags};
use crate::error::Result;
use crate::output::Output;

/// Spawns commands for real, or prints them under dry-run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl SystemExecutor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn run(ctx: &RunContext, invocation: &Invocation) -> Result<CommandResult> {
        let command = invocation.display();

        if ctx.is_dry_run() {
            Output::dry_run(&command);
            return Ok(CommandResult::dry_run(command));
        }

        let mut builder = ProcessBuilder::new(invocation.program())
            .args(invocation.arguments())
            .stdin(invocation.stdin_source().clone())
            .stdout(stream_flags(invocation.stdout_mode()))
            .stderr(stream_flags(invocation.stderr_mode()))
            .label(command.clone());
        if let Some(cwd) = invocation.working_dir() {
            builder = builder.cwd(cwd);
        }

        debug!(cmd = %command, "run");
        let output = builder.run().await?;
        trace!(cmd = %command, exit_code = output.exit_code(), "finished");

        let exit_code = output.exit_code();
        let (stdout, stderr) = output.into_streams();
        Ok(CommandResult::new(command, exit_code, stdout, stderr))
    }
}

const fn stream_flags(mode: OutputMode) -> StreamFlags {
    match mode {
        OutputMode::Inherit => StreamFlags::INHERIT,
        OutputMode::Capture => StreamFlags::CAPTURE.union(StreamFlags::LOG),
        OutputMode::Tee => StreamFlags::CAPTURE.union(StreamFlags::ECHO),
        OutputMode::Discard => StreamFlags::DISCARD,
    }
}

impl Executor for SystemExecutor {
    fn execute<'a>(
        &'a self,
        ctx: &'a RunContext,
        invocation: &'a Invocation,
    ) -> BoxFuture<'a, Result<CommandResult>> {
        Box::pin(Self::run(ctx, invocation))
    }
}
