// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory executor that records calls and returns scripted exit codes.
//!
//! ```text
//! RecordingExecutor::new()
//!   .exit_code("false", 1)           every matching call exits 1
//!   .exit_code_once("flaky", 2)      first matching call exits 2
//!   .spawn_failure("missing-tool")   matching calls fail to spawn
//!   .stdout("git status -s", " M a") matching calls print to stdout
//! ```
//!
//! Rules match when the displayed command line contains the pattern; the
//! first matching rule wins.

use futures_util::future::BoxFuture;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use super::context::RunContext;
use super::invocation::{CommandResult, Invocation, StdinSource};
use super::Executor;
use crate::error::{BakaError, ExecutionError, Result};

#[derive(Debug, Clone)]
enum Reply {
    Exit(i32),
    SpawnFailure,
    Stdout(String),
}

#[derive(Debug, Clone)]
struct Rule {
    pattern: String,
    reply: Reply,
    once: bool,
    used: bool,
}

/// One recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub command: String,
    pub cwd: Option<PathBuf>,
    pub stdin: StdinSource,
    pub dry_run: bool,
}

/// Test double for [`Executor`].
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    rules: Mutex<Vec<Rule>>,
    calls: Mutex<Vec<Recorded>>,
}

impl RecordingExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn rule(self, pattern: &str, reply: Reply, once: bool) -> Self {
        self.rules
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Rule {
                pattern: pattern.to_string(),
                reply,
                once,
                used: false,
            });
        self
    }

    /// Every call containing `pattern` exits with `code`.
    #[must_use]
    pub fn exit_code(self, pattern: &str, code: i32) -> Self {
        self.rule(pattern, Reply::Exit(code), false)
    }

    /// The first call containing `pattern` exits with `code`.
    #[must_use]
    pub fn exit_code_once(self, pattern: &str, code: i32) -> Self {
        self.rule(pattern, Reply::Exit(code), true)
    }

    /// Calls containing `pattern` fail with `ExecutionError::SpawnFailed`.
    #[must_use]
    pub fn spawn_failure(self, pattern: &str) -> Self {
        self.rule(pattern, Reply::SpawnFailure, false)
    }

    /// Calls containing `pattern` succeed with `text` on stdout.
    #[must_use]
    pub fn stdout(self, pattern: &str, text: &str) -> Self {
        self.rule(pattern, Reply::Stdout(text.to_string()), false)
    }

    /// Every call so far.
    #[must_use]
    pub fn calls(&self) -> Vec<Recorded> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Displayed command lines of every call so far.
    #[must_use]
    pub fn commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.command).collect()
    }

    /// Number of calls whose command line contains `pattern`.
    #[must_use]
    pub fn count(&self, pattern: &str) -> usize {
        self.commands()
            .iter()
            .filter(|c| c.contains(pattern))
            .count()
    }

    fn reply_for(&self, command: &str) -> Option<Reply> {
        let mut rules = self.rules.lock().unwrap_or_else(PoisonError::into_inner);
        let rule = rules
            .iter_mut()
            .find(|r| !(r.once && r.used) && command.contains(&r.pattern))?;
        rule.used = true;
        Some(rule.reply.clone())
    }

    fn record(&self, ctx: &RunContext, invocation: &Invocation) -> Result<CommandResult> {
        let command = invocation.display();
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Recorded {
                command: command.clone(),
                cwd: invocation.working_dir().map(PathBuf::from),
                stdin: invocation.stdin_source().clone(),
                dry_run: ctx.is_dry_run(),
            });

        if ctx.is_dry_run() {
            return Ok(CommandResult::dry_run(command));
        }

        match self.reply_for(&command) {
            None => Ok(CommandResult::new(command, 0, String::new(), String::new())),
            Some(Reply::Exit(code)) => Ok(CommandResult::new(command, code, String::new(), String::new())),
            Some(Reply::Stdout(text)) => Ok(CommandResult::new(command, 0, text, String::new())),
            Some(Reply::SpawnFailure) => Err(BakaError::from(ExecutionError::SpawnFailed {
                command,
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
            .into()),
        }
    }
}

impl Executor for RecordingExecutor {
    fn execute<'a>(
        &'a self,
        ctx: &'a RunContext,
        invocation: &'a Invocation,
    ) -> BoxFuture<'a, Result<CommandResult>> {
        Box::pin(async move { self.record(ctx, invocation) })
    }
}
