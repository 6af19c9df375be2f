// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use super::{Pipeline, Step};
use crate::error::{BakaError, ExecutionError};
use crate::exec::{Invocation, RecordingExecutor, RunContext};
use crate::git::GitAdapter;

const NO_PATHS: &[PathBuf] = &[];

fn install() -> Pipeline {
    Pipeline::new()
        .snapshot("baka pre-install")
        .run(Invocation::new("apt").args(["install", "vim"]))
        .commit("baka install vim")
}

#[tokio::test]
async fn test_steps_run_in_order() {
    let exec = RecordingExecutor::new().exit_code("git diff --cached --quiet", 1);
    let git = GitAdapter::new(&exec, NO_PATHS);
    let ctx = RunContext::new("/srv/baka");

    let report = install().execute(&exec, &ctx, &git).await.unwrap();

    assert_eq!(report.commits, ["baka pre-install", "baka install vim"]);
    insta::assert_debug_snapshot!(exec.commands(), @r#"
    [
        "git add --ignore-errors --all",
        "git diff --cached --quiet",
        "git commit --quiet -m 'baka pre-install'",
        "apt install vim",
        "git add --ignore-errors --all",
        "git diff --cached --quiet",
        "git commit --quiet -m 'baka install vim'",
    ]
    "#);
}

#[tokio::test]
async fn test_clean_snapshot_is_not_committed() {
    let exec = RecordingExecutor::new();
    let git = GitAdapter::new(&exec, NO_PATHS);
    let ctx = RunContext::new("/srv/baka");

    let report = install().execute(&exec, &ctx, &git).await.unwrap();
    assert!(report.commits.is_empty());
    assert_eq!(exec.count("apt install vim"), 1);
}

#[tokio::test]
async fn test_failed_run_step_stops_before_commit() {
    let exec = RecordingExecutor::new()
        .exit_code("git diff --cached --quiet", 1)
        .exit_code("apt", 100);
    let git = GitAdapter::new(&exec, NO_PATHS);
    let ctx = RunContext::new("/srv/baka");

    let err = install().execute(&exec, &ctx, &git).await.unwrap_err();

    let baka = err.downcast_ref::<BakaError>().unwrap();
    assert!(matches!(
        baka.as_execution(),
        Some(ExecutionError::NonZeroExit { code: 100, .. })
    ));
    assert_eq!(exec.count("git commit"), 1);
    assert_eq!(exec.count("baka install vim"), 0);
}

#[tokio::test]
async fn test_failed_check_is_tolerated() {
    let exec = RecordingExecutor::new()
        .exit_code("git diff --cached --quiet", 1)
        .exit_code("debsums", 2);
    let git = GitAdapter::new(&exec, NO_PATHS);
    let ctx = RunContext::new("/srv/baka");
    let pipeline = Pipeline::new()
        .mkdir("/srv/baka/scan")
        .check(Invocation::shell("debsums -ac | tee scan/debsums.log"))
        .check(Invocation::shell("true"))
        .commit("baka scan");

    let report = pipeline.execute(&exec, &ctx, &git).await.unwrap();
    assert_eq!(report.failed_checks, 1);
    assert_eq!(report.commits, ["baka scan"]);
    assert_eq!(exec.commands()[0], "mkdir -p /srv/baka/scan");
}

#[tokio::test]
async fn test_save_and_restore_steps() {
    let exec = RecordingExecutor::new();
    let git = GitAdapter::new(&exec, NO_PATHS);
    let ctx = RunContext::new("/srv/baka");
    let pipeline = Pipeline::new()
        .step(Step::Save {
            name: "fstab".to_string(),
            path: PathBuf::from("/etc/fstab"),
        })
        .step(Step::Restore {
            name: "fstab".to_string(),
            path: PathBuf::from("/etc/fstab"),
        });

    pipeline.execute(&exec, &ctx, &git).await.unwrap();
    insta::assert_debug_snapshot!(exec.commands(), @r#"
    [
        "mkdir -p /srv/baka/files/fstab",
        "rsync -rlpt --delete /etc/fstab /srv/baka/files/fstab/",
        "rsync -rlpt /srv/baka/files/fstab/fstab /etc/",
    ]
    "#);
}

#[tokio::test]
async fn test_dry_run_prints_every_step() {
    let exec = RecordingExecutor::new().exit_code("apt", 100);
    let git = GitAdapter::new(&exec, NO_PATHS);
    let ctx = RunContext::new("/srv/baka").with_dry_run(true);

    let report = install().execute(&exec, &ctx, &git).await.unwrap();
    assert_eq!(report.commits.len(), 2);
    assert!(exec.calls().iter().all(|c| c.dry_run));
}
