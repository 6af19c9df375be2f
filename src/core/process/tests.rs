// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::builder::{ProcessBuilder, StdinSource, StreamFlags};
use crate::error::{BakaError, ExecutionError};

fn sh(script: &str) -> ProcessBuilder {
    ProcessBuilder::new("sh").args(["-c", script])
}

#[tokio::test]
async fn test_process_echo() {
    let output = ProcessBuilder::new("echo")
        .arg("hello")
        .stdout(StreamFlags::CAPTURE)
        .stderr(StreamFlags::CAPTURE)
        .run()
        .await
        .expect("echo should succeed");

    assert!(output.success());
    insta::assert_snapshot!(output.stdout(), @"hello");
}

#[tokio::test]
async fn test_nonzero_exit_is_reported_not_raised() {
    let output = sh("exit 42")
        .stdout(StreamFlags::DISCARD)
        .stderr(StreamFlags::DISCARD)
        .run()
        .await
        .expect("process should complete");

    assert_eq!(output.exit_code(), 42);
    assert!(!output.success());
}

#[tokio::test]
async fn test_signal_maps_to_128_plus_n() {
    let output = sh("kill -TERM $$").run().await.unwrap();
    assert_eq!(output.exit_code(), 128 + 15);
}

#[tokio::test]
async fn test_spawn_failure_is_typed_error() {
    let err = ProcessBuilder::new("/nonexistent/definitely-not-a-program")
        .run()
        .await
        .unwrap_err();
    let exec_err = err
        .downcast_ref::<BakaError>()
        .and_then(BakaError::as_execution);
    assert!(matches!(exec_err, Some(ExecutionError::SpawnFailed { .. })));
}

#[tokio::test]
async fn test_stdin_content() {
    let output = ProcessBuilder::new("cat")
        .stdin(StdinSource::Content("one\ntwo\n".to_string()))
        .stdout(StreamFlags::CAPTURE)
        .stderr(StreamFlags::CAPTURE)
        .run()
        .await
        .unwrap();
    insta::assert_snapshot!(output.stdout(), @r"
    one
    two
    ");
}

#[tokio::test]
async fn test_stdin_repeat_feeds_until_child_stops_reading() {
    let output = sh("read a; read b; echo \"$a$b\"")
        .stdin(StdinSource::Repeat("y\n".to_string()))
        .stdout(StreamFlags::CAPTURE)
        .stderr(StreamFlags::CAPTURE)
        .run()
        .await
        .unwrap();
    assert_eq!(output.stdout(), "yy");
}

#[tokio::test]
async fn test_capture_separates_streams() {
    let output = sh("echo out; echo err >&2")
        .stdout(StreamFlags::CAPTURE)
        .stderr(StreamFlags::CAPTURE)
        .run()
        .await
        .unwrap();
    assert_eq!(output.stdout(), "out");
    assert_eq!(output.stderr(), "err");
}

#[tokio::test]
async fn test_uncaptured_pipe_is_drained() {
    let output = sh("seq 1 100000").run().await.unwrap();
    assert!(output.success());
    assert_eq!(output.stdout(), "");
}

#[tokio::test]
async fn test_large_capture() {
    let output = sh("seq 1 5000")
        .stdout(StreamFlags::CAPTURE | StreamFlags::LOG)
        .run()
        .await
        .unwrap();
    assert_eq!(output.stdout().lines().count(), 5000);
}

#[tokio::test]
async fn test_cwd() {
    let dir = tempfile::tempdir().unwrap();
    let output = ProcessBuilder::new("pwd")
        .cwd(dir.path())
        .stdout(StreamFlags::CAPTURE)
        .stderr(StreamFlags::CAPTURE)
        .run()
        .await
        .unwrap();
    let reported = std::fs::canonicalize(output.stdout()).unwrap();
    assert_eq!(reported, std::fs::canonicalize(dir.path()).unwrap());
}

#[test]
fn test_command_line_is_shell_quoted() {
    let builder = ProcessBuilder::new("git").args(["commit", "-m", "baka install vim"]);
    insta::assert_snapshot!(builder.command_line(), @"git commit -m 'baka install vim'");
}

#[test]
fn test_stream_flags_piping() {
    assert!(StreamFlags::default().is_piped());
    assert!((StreamFlags::CAPTURE | StreamFlags::ECHO).is_piped());
    assert!(!StreamFlags::INHERIT.is_piped());
    assert!(!StreamFlags::DISCARD.is_piped());
}

#[test]
fn test_executable_lookup() {
    assert!(ProcessBuilder::is_installed("sh"));
    assert!(ProcessBuilder::lookup("sh").is_some_and(|p| p.exists()));
    assert!(!ProcessBuilder::is_installed("definitely-not-a-real-program-xyz"));
}
