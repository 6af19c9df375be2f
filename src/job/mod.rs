// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Job runner: a named list of shell commands run in the tracked root.
//!
//! ```text
//! for step i in commands:
//!   approve?  (interactive, or after `continue` from a pause)
//!     yes --> run     skip --> next     abort --> Aborted
//!   run: sh -c <cmd>, cwd = root, stdin = "y\n"... when auto_yes
//!     exit 0 -----------------------------> next
//!     failed (non-zero or spawn failure)
//!       tolerate_nonzero --> warn ---------> next
//!       pause_on_error   --> ask
//!           continue --> approve every remaining step
//!           retry    --> run step i again
//!           abort    --> Aborted
//!       otherwise ------------------------> Aborted
//! all steps handled --> Done
//!
//! Done | Aborted --> transcript (log_file) --> stage + commit
//! ```
//!
//! The report comes back for both outcomes; [`JobReport::into_result`] turns
//! an aborted run into `ExecutionError::JobAborted` once the commit is made.

pub mod prompt;
pub mod transcript;

#[cfg(test)]
mod tests;

use chrono::Local;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::config::types::JobConfig;
use crate::error::{BakaError, ExecutionError, Result};
use crate::exec::{
    CommandResult, Executor, Invocation, OutputMode, Policy, RunContext, StdinSource,
};
use crate::git::GitAdapter;
use crate::output::Output;

pub use prompt::{FailureAnswer, Prompter, ScriptedPrompter, StdinPrompter, StepAnswer};
pub use transcript::{Transcript, is_valid_pattern, transcript_path};

/// How a job run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    /// Every step was run or skipped.
    Done,
    /// Stopped at `step` (1-based) running `command`.
    Aborted { step: usize, command: String },
}

/// Outcome of one job run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    pub name: String,
    pub state: JobState,
    /// Command executions, retries included.
    pub run: usize,
    pub skipped: usize,
    /// Failed executions, retries included.
    pub failed: usize,
    /// Whether a commit was made afterwards.
    pub committed: bool,
    /// Where the transcript was written, if anywhere.
    pub transcript: Option<PathBuf>,
}

impl JobReport {
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self.state, JobState::Done)
    }

    /// Commit message for this outcome.
    #[must_use]
    pub fn commit_message(&self) -> String {
        match &self.state {
            JobState::Done => format!("baka job {}", self.name),
            JobState::Aborted { step, .. } => {
                format!("baka job {} (aborted at step {step})", self.name)
            }
        }
    }

    /// `Ok` for a finished job, `ExecutionError::JobAborted` otherwise.
    ///
    /// # Errors
    ///
    /// Returns `ExecutionError::JobAborted` when the job did not finish.
    pub fn into_result(self) -> Result<Self> {
        match self.state {
            JobState::Done => Ok(self),
            JobState::Aborted { step, command } => Err(BakaError::from(ExecutionError::JobAborted {
                job: self.name,
                step,
                command,
            })
            .into()),
        }
    }
}

enum Flow {
    Next,
    Abort,
}

/// Runs one job against an [`Executor`], asking a [`Prompter`] when needed.
pub struct JobRunner<'a, E: Executor, P: Prompter> {
    exec: &'a E,
    prompter: &'a P,
    git: GitAdapter<'a, E>,
}

impl<'a, E: Executor, P: Prompter> JobRunner<'a, E, P> {
    #[must_use]
    pub const fn new(exec: &'a E, prompter: &'a P, tracked_paths: &'a [PathBuf]) -> Self {
        Self {
            exec,
            prompter,
            git: GitAdapter::new(exec, tracked_paths),
        }
    }

    /// Run every step of `job`, then write the transcript and commit.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidArgument` for a malformed `log_file`
    /// pattern before any step runs. Otherwise returns an error if a prompt
    /// cannot be read, the transcript cannot be written or the commit fails.
    /// An aborted job is reported in [`JobReport::state`], not as an error.
    pub async fn run(&self, ctx: &RunContext, name: &str, job: &JobConfig) -> Result<JobReport> {
        let policy = ctx.modifiers().resolve(job);
        let total = job.commands.len();
        debug!(job = name, steps = total, ?policy, "starting job");

        let mut report = JobReport {
            name: name.to_string(),
            state: JobState::Done,
            run: 0,
            skipped: 0,
            failed: 0,
            committed: false,
            transcript: None,
        };
        let transcript_target = job
            .log_file
            .as_deref()
            .map(|template| transcript_path(ctx.root(), template, &Local::now()))
            .transpose()?;
        let mut transcript = Transcript::new();
        let mut approve_each = policy.interactive;

        for (index, command) in job.commands.iter().enumerate() {
            let step = index + 1;
            if approve_each && !ctx.is_dry_run() {
                let question = format!("Run step {step}/{total} `{command}`? [y]es/[s]kip/[a]bort");
                match self.ask(&question, StepAnswer::parse).await? {
                    Some(StepAnswer::Run) => {}
                    Some(StepAnswer::Skip) => {
                        info!(job = name, step, "step skipped");
                        report.skipped += 1;
                        continue;
                    }
                    Some(StepAnswer::Abort) | None => {
                        report.state = aborted(step, command);
                        break;
                    }
                }
            }

            let flow = self
                .run_step(ctx, job, &policy, (step, total), command, &mut report, &mut transcript, &mut approve_each)
                .await?;
            if let Flow::Abort = flow {
                report.state = aborted(step, command);
                break;
            }
        }

        if let JobState::Aborted { step, .. } = &report.state {
            Output::warning(format!("job {name} aborted at step {step}/{total}"));
        }

        if let Some(path) = transcript_target
            && !ctx.is_dry_run()
        {
            transcript.write(&path)?;
            info!(job = name, path = %path.display(), "transcript written");
            report.transcript = Some(path);
        }

        report.committed = self.git.commit(ctx, &report.commit_message()).await?;
        if report.is_done() {
            Output::success(format!("job {name} finished"));
        }
        Ok(report)
    }

    /// Run one step until it succeeds, is tolerated, or the user stops retrying.
    #[allow(clippy::too_many_arguments)]
    async fn run_step(
        &self,
        ctx: &RunContext,
        job: &JobConfig,
        policy: &Policy,
        (step, total): (usize, usize),
        command: &str,
        report: &mut JobReport,
        transcript: &mut Transcript,
        approve_each: &mut bool,
    ) -> Result<Flow> {
        let invocation = step_invocation(ctx, job, policy, command);
        loop {
            if job.verbosity.echoes_commands() && !ctx.is_dry_run() {
                Output::command(command);
            }
            let result = self.attempt(ctx, &invocation).await?;
            report.run += 1;
            transcript.record(&result);
            if result.success() {
                return Ok(Flow::Next);
            }

            report.failed += 1;
            let code = result.exit_code();
            warn!(step, code, command, "job step failed");
            if policy.tolerate_nonzero {
                Output::warning(format!("step {step}/{total} failed with exit code {code}, continuing"));
                return Ok(Flow::Next);
            }
            if !policy.pause_on_error {
                return Ok(Flow::Abort);
            }

            let question =
                format!("Step {step}/{total} failed with exit code {code}: [c]ontinue/[r]etry/[a]bort");
            match self.ask(&question, FailureAnswer::parse).await? {
                Some(FailureAnswer::Continue) => {
                    *approve_each = true;
                    return Ok(Flow::Next);
                }
                Some(FailureAnswer::Retry) => info!(step, "retrying step"),
                Some(FailureAnswer::Abort) | None => return Ok(Flow::Abort),
            }
        }
    }

    /// Execute, treating a spawn failure like exit code 127.
    async fn attempt(&self, ctx: &RunContext, invocation: &Invocation) -> Result<CommandResult> {
        match self.exec.execute(ctx, invocation).await {
            Ok(result) => Ok(result),
            Err(err) if is_spawn_failure(&err) => {
                Output::warning(format!("{err:#}"));
                Ok(CommandResult::new(invocation.display(), 127, String::new(), format!("{err:#}")))
            }
            Err(err) => Err(err),
        }
    }

    /// Ask until EOF; an unrecognised answer is treated as no answer.
    async fn ask<T>(&self, question: &str, parse: fn(&str) -> Option<T>) -> Result<Option<T>> {
        let Some(line) = self.prompter.ask(question).await? else {
            Output::warning("no answer, aborting");
            return Ok(None);
        };
        let answer = parse(&line);
        if answer.is_none() {
            Output::warning(format!("unrecognised answer '{}', aborting", line.trim()));
        }
        Ok(answer)
    }
}

fn aborted(step: usize, command: &str) -> JobState {
    JobState::Aborted {
        step,
        command: command.to_string(),
    }
}

fn is_spawn_failure(err: &anyhow::Error) -> bool {
    err.downcast_ref::<BakaError>()
        .and_then(BakaError::as_execution)
        .is_some_and(|e| matches!(e, ExecutionError::SpawnFailed { .. }))
}

/// `sh -c <command>` in the root, streams routed by verbosity and `log_file`.
fn step_invocation(ctx: &RunContext, job: &JobConfig, policy: &Policy, command: &str) -> Invocation {
    let keep = job.log_file.is_some();
    let mode = |shown: bool| match (shown, keep) {
        (true, true) => OutputMode::Tee,
        (true, false) => OutputMode::Inherit,
        (false, true) => OutputMode::Capture,
        (false, false) => OutputMode::Discard,
    };
    let stdin = if policy.auto_yes {
        StdinSource::Repeat("y\n".to_string())
    } else {
        StdinSource::Inherit
    };
    Invocation::shell(command)
        .cwd(ctx.root())
        .stdin(stdin)
        .stdout(mode(job.verbosity.shows_stdout()))
        .stderr(mode(job.verbosity.shows_stderr()))
}
