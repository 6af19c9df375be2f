// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use chrono::{TimeZone, Utc};
use std::path::{Path, PathBuf};

use super::*;
use crate::config::types::Verbosity;
use crate::error::ValidationError;
use crate::exec::{Modifiers, RecordingExecutor};

const NO_PATHS: &[PathBuf] = &[];

fn job(commands: &[&str]) -> JobConfig {
    JobConfig {
        commands: commands.iter().map(ToString::to_string).collect(),
        ..JobConfig::default()
    }
}

fn executor() -> RecordingExecutor {
    RecordingExecutor::new()
        .exit_code("git diff --cached --quiet", 1)
        .exit_code("fail", 1)
}

fn ran(exec: &RecordingExecutor) -> Vec<String> {
    exec.commands()
        .into_iter()
        .filter(|c| !c.starts_with("git"))
        .collect()
}

#[tokio::test]
async fn test_failure_aborts_remaining_steps() {
    let exec = executor();
    let prompter = ScriptedPrompter::default();
    let runner = JobRunner::new(&exec, &prompter, NO_PATHS);
    let ctx = RunContext::new("/srv/baka");

    let report = runner
        .run(&ctx, "deploy", &job(&["echo one", "fail", "echo three"]))
        .await
        .unwrap();

    assert_eq!(ran(&exec), ["echo one", "fail"]);
    assert_eq!(
        report.state,
        JobState::Aborted {
            step: 2,
            command: "fail".to_string()
        }
    );
    assert!(report.committed);
    insta::assert_snapshot!(
        exec.commands().last().unwrap(),
        @"git commit --quiet -m 'baka job deploy (aborted at step 2)'"
    );

    let err = report.into_result().unwrap_err();
    let baka = err.downcast_ref::<BakaError>().unwrap();
    assert!(matches!(
        baka.as_execution(),
        Some(ExecutionError::JobAborted { step: 2, .. })
    ));
}

#[tokio::test]
async fn test_tolerated_failure_runs_every_step_once() {
    let exec = executor();
    let prompter = ScriptedPrompter::default();
    let runner = JobRunner::new(&exec, &prompter, NO_PATHS);
    let ctx = RunContext::new("/srv/baka");
    let config = JobConfig {
        tolerate_nonzero: true,
        ..job(&["echo one", "fail", "echo three"])
    };

    let report = runner.run(&ctx, "deploy", &config).await.unwrap();

    assert_eq!(ran(&exec), ["echo one", "fail", "echo three"]);
    assert!(report.is_done());
    assert_eq!((report.run, report.failed, report.skipped), (3, 1, 0));
    assert_eq!(exec.count("git commit --quiet -m 'baka job deploy'"), 1);
    assert!(report.into_result().is_ok());
}

#[tokio::test]
async fn test_toggle_nonzero_flips_job_default() {
    let exec = executor();
    let prompter = ScriptedPrompter::default();
    let runner = JobRunner::new(&exec, &prompter, NO_PATHS);
    let ctx = RunContext::new("/srv/baka").with_modifiers(Modifiers::TOGGLE_NONZERO);
    let config = JobConfig {
        tolerate_nonzero: true,
        ..job(&["fail", "echo two"])
    };

    let report = runner.run(&ctx, "deploy", &config).await.unwrap();
    assert!(!report.is_done());
    assert_eq!(ran(&exec), ["fail"]);
}

#[tokio::test]
async fn test_pause_then_continue_approves_remaining_steps() {
    let exec = executor();
    let prompter = ScriptedPrompter::new(["continue", "continue"]);
    let runner = JobRunner::new(&exec, &prompter, NO_PATHS);
    let ctx = RunContext::new("/srv/baka").with_modifiers(Modifiers::PAUSE_ON_ERROR);

    let report = runner
        .run(&ctx, "deploy", &job(&["echo one", "fail", "echo three"]))
        .await
        .unwrap();

    assert_eq!(ran(&exec), ["echo one", "fail", "echo three"]);
    assert!(report.is_done());
    assert_eq!(exec.count("git commit"), 1);
    insta::assert_debug_snapshot!(prompter.questions(), @r#"
    [
        "Step 2/3 failed with exit code 1: [c]ontinue/[r]etry/[a]bort",
        "Run step 3/3 `echo three`? [y]es/[s]kip/[a]bort",
    ]
    "#);
}

#[tokio::test]
async fn test_pause_then_retry_runs_step_again() {
    let exec = RecordingExecutor::new()
        .exit_code("git diff --cached --quiet", 1)
        .exit_code_once("flaky", 1);
    let prompter = ScriptedPrompter::new(["r"]);
    let runner = JobRunner::new(&exec, &prompter, NO_PATHS);
    let ctx = RunContext::new("/srv/baka");
    let config = JobConfig {
        pause_on_error: true,
        ..job(&["flaky", "echo two"])
    };

    let report = runner.run(&ctx, "deploy", &config).await.unwrap();

    assert_eq!(ran(&exec), ["flaky", "flaky", "echo two"]);
    assert!(report.is_done());
    assert_eq!((report.run, report.failed), (3, 1));
    assert_eq!(prompter.questions().len(), 1);
}

#[tokio::test]
async fn test_pause_then_abort() {
    let exec = executor();
    let prompter = ScriptedPrompter::new(["a"]);
    let runner = JobRunner::new(&exec, &prompter, NO_PATHS);
    let ctx = RunContext::new("/srv/baka").with_modifiers(Modifiers::PAUSE_ON_ERROR);

    let report = runner
        .run(&ctx, "deploy", &job(&["fail", "echo two"]))
        .await
        .unwrap();
    assert_eq!(ran(&exec), ["fail"]);
    assert!(matches!(report.state, JobState::Aborted { step: 1, .. }));
}

#[tokio::test]
async fn test_interactive_skip_skips_exactly_that_step() {
    let exec = executor();
    let prompter = ScriptedPrompter::new(["y", "s", "yes"]);
    let runner = JobRunner::new(&exec, &prompter, NO_PATHS);
    let ctx = RunContext::new("/srv/baka").with_modifiers(Modifiers::INTERACTIVE);

    let report = runner
        .run(&ctx, "deploy", &job(&["echo one", "echo two", "echo three"]))
        .await
        .unwrap();

    assert_eq!(ran(&exec), ["echo one", "echo three"]);
    assert_eq!((report.run, report.skipped), (2, 1));
    assert!(report.is_done());
}

#[tokio::test]
async fn test_interactive_abort_runs_nothing_further() {
    let exec = executor();
    let prompter = ScriptedPrompter::new(["y", "abort"]);
    let runner = JobRunner::new(&exec, &prompter, NO_PATHS);
    let ctx = RunContext::new("/srv/baka");
    let config = JobConfig {
        interactive: true,
        ..job(&["echo one", "echo two", "echo three"])
    };

    let report = runner.run(&ctx, "deploy", &config).await.unwrap();

    assert_eq!(ran(&exec), ["echo one"]);
    assert_eq!(prompter.questions().len(), 2);
    assert!(matches!(report.state, JobState::Aborted { step: 2, .. }));
    assert_eq!(
        exec.count("git commit --quiet -m 'baka job deploy (aborted at step 2)'"),
        1
    );
}

#[tokio::test]
async fn test_unrecognised_answer_or_eof_aborts() {
    for answers in [vec!["maybe"], vec![]] {
        let exec = executor();
        let prompter = ScriptedPrompter::new(answers);
        let runner = JobRunner::new(&exec, &prompter, NO_PATHS);
        let ctx = RunContext::new("/srv/baka").with_modifiers(Modifiers::INTERACTIVE);

        let report = runner
            .run(&ctx, "deploy", &job(&["echo one"]))
            .await
            .unwrap();
        assert!(ran(&exec).is_empty());
        assert!(matches!(report.state, JobState::Aborted { step: 1, .. }));
    }
}

#[tokio::test]
async fn test_spawn_failure_counts_as_failed_step() {
    let exec = executor().spawn_failure("missing-tool");
    let prompter = ScriptedPrompter::default();
    let runner = JobRunner::new(&exec, &prompter, NO_PATHS);
    let ctx = RunContext::new("/srv/baka");
    let config = JobConfig {
        tolerate_nonzero: true,
        ..job(&["missing-tool --flag", "echo two"])
    };

    let report = runner.run(&ctx, "deploy", &config).await.unwrap();
    assert_eq!(ran(&exec), ["missing-tool --flag", "echo two"]);
    assert_eq!(report.failed, 1);
    assert!(report.is_done());
}

#[tokio::test]
async fn test_steps_run_in_root_with_stdin_policy() {
    let exec = executor();
    let prompter = ScriptedPrompter::default();
    let runner = JobRunner::new(&exec, &prompter, NO_PATHS);

    let ctx = RunContext::new("/srv/baka");
    runner.run(&ctx, "a", &job(&["echo one"])).await.unwrap();
    let ctx = ctx.with_modifiers(Modifiers::AUTO_YES);
    runner.run(&ctx, "b", &job(&["echo two"])).await.unwrap();

    let steps: Vec<_> = exec
        .calls()
        .into_iter()
        .filter(|c| c.command.starts_with("echo"))
        .collect();
    assert!(steps.iter().all(|c| c.cwd.as_deref() == Some(Path::new("/srv/baka"))));
    assert_eq!(steps[0].stdin, StdinSource::Inherit);
    assert_eq!(steps[1].stdin, StdinSource::Repeat("y\n".to_string()));
}

#[tokio::test]
async fn test_dry_run_prints_every_step_without_prompting() {
    let root = tempfile::tempdir().unwrap();
    let exec = executor();
    let prompter = ScriptedPrompter::default();
    let runner = JobRunner::new(&exec, &prompter, NO_PATHS);
    let ctx = RunContext::new(root.path())
        .with_dry_run(true)
        .with_modifiers(Modifiers::INTERACTIVE);
    let config = JobConfig {
        log_file: Some("logs/run.log".to_string()),
        ..job(&["echo one", "fail", "echo three"])
    };

    let report = runner.run(&ctx, "deploy", &config).await.unwrap();

    assert!(report.is_done());
    assert!(prompter.questions().is_empty());
    assert!(exec.calls().iter().all(|c| c.dry_run));
    assert_eq!(ran(&exec), ["echo one", "fail", "echo three"]);
    assert!(report.transcript.is_none());
    assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_transcript_written_under_root() {
    let root = tempfile::tempdir().unwrap();
    let exec = executor().stdout("echo one", "one\n");
    let prompter = ScriptedPrompter::default();
    let runner = JobRunner::new(&exec, &prompter, NO_PATHS);
    let ctx = RunContext::new(root.path());
    let config = JobConfig {
        log_file: Some("logs/run.log".to_string()),
        verbosity: Verbosity::Silent,
        tolerate_nonzero: true,
        ..job(&["echo one", "fail"])
    };

    let report = runner.run(&ctx, "deploy", &config).await.unwrap();

    let path = root.path().join("logs/run.log");
    assert_eq!(report.transcript.as_deref(), Some(path.as_path()));
    assert_eq!(
        std::fs::read_to_string(path).unwrap(),
        ">>> echo one\none\n\n>>> fail\n\n"
    );
}

#[tokio::test]
async fn test_bad_log_file_pattern_runs_nothing() {
    let root = tempfile::tempdir().unwrap();
    let exec = executor();
    let prompter = ScriptedPrompter::default();
    let runner = JobRunner::new(&exec, &prompter, NO_PATHS);
    let config = JobConfig {
        log_file: Some("bad %".to_string()),
        ..job(&["echo one", "echo two"])
    };

    for dry_run in [false, true] {
        let ctx = RunContext::new(root.path()).with_dry_run(dry_run);
        let err = runner.run(&ctx, "deploy", &config).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BakaError>().and_then(BakaError::as_validation),
            Some(ValidationError::InvalidArgument { what, .. }) if what == "log_file"
        ));
    }
    assert!(exec.calls().is_empty());
}

#[test]
fn test_step_streams_follow_verbosity() {
    let ctx = RunContext::new("/srv/baka");
    let policy = Policy::default();
    let modes = |verbosity, log_file: Option<&str>| {
        let config = JobConfig {
            verbosity,
            log_file: log_file.map(ToString::to_string),
            ..job(&["true"])
        };
        let inv = step_invocation(&ctx, &config, &policy, "true");
        (inv.stdout_mode(), inv.stderr_mode())
    };

    assert_eq!(modes(Verbosity::Info, None), (OutputMode::Inherit, OutputMode::Inherit));
    assert_eq!(modes(Verbosity::Error, None), (OutputMode::Discard, OutputMode::Inherit));
    assert_eq!(modes(Verbosity::Silent, None), (OutputMode::Discard, OutputMode::Discard));
    assert_eq!(
        modes(Verbosity::Debug, Some("x.log")),
        (OutputMode::Tee, OutputMode::Tee)
    );
    assert_eq!(
        modes(Verbosity::Silent, Some("x.log")),
        (OutputMode::Capture, OutputMode::Capture)
    );
}

#[test]
fn test_transcript_path_expands_strftime() {
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap();
    let root = Path::new("/srv/baka");

    assert_eq!(
        transcript_path(root, "jobs/backup %Y-%m-%d %H:%M.log", &now).unwrap(),
        PathBuf::from("/srv/baka/jobs/backup 2026-03-01 12:30.log")
    );
    assert_eq!(
        transcript_path(root, "/var/log/backup-%d.log", &now).unwrap(),
        PathBuf::from("/var/log/backup-01.log")
    );
    assert!(transcript_path(root, "bad %", &now).is_err());
}

#[test]
fn test_answer_parsing() {
    assert_eq!(StepAnswer::parse(" Yes\n"), Some(StepAnswer::Run));
    assert_eq!(StepAnswer::parse("c"), Some(StepAnswer::Run));
    assert_eq!(StepAnswer::parse("skip"), Some(StepAnswer::Skip));
    assert_eq!(StepAnswer::parse("no"), Some(StepAnswer::Abort));
    assert_eq!(StepAnswer::parse(""), None);
    assert_eq!(StepAnswer::parse("r"), None);

    assert_eq!(FailureAnswer::parse("y"), Some(FailureAnswer::Continue));
    assert_eq!(FailureAnswer::parse("RETRY"), Some(FailureAnswer::Retry));
    assert_eq!(FailureAnswer::parse("abort"), Some(FailureAnswer::Abort));
    assert_eq!(FailureAnswer::parse("s"), None);
}
