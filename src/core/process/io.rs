// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Feeding stdin and draining piped output while the child runs.
//!
//! ```text
//! drive()
//!   stdin feeder task (Content / Repeat)
//!   stdout/stderr reader tasks --> String (CAPTURE)
//!                              --> trace! (LOG)
//!                              --> our stdout/stderr (ECHO)
//!   wait
//!   stop feeder, join readers
//!   --> ProcessOutput { exit_code, stdout, stderr }
//! ```

use std::io::Write as _;
use std::process::ExitStatus;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin};
use tokio::task::JoinHandle;
use tracing::{trace, warn};

use super::builder::{ProcessBuilder, ProcessOutput, StdinSource, StreamFlags};
use crate::error::{BakaError, ExecutionError, Result};

#[derive(Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    const fn label(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }

    fn echo(self, line: &str) {
        // A closed terminal must not fail the child.
        let _ = match self {
            Self::Stdout => writeln!(std::io::stdout().lock(), "{line}"),
            Self::Stderr => writeln!(std::io::stderr().lock(), "{line}"),
        };
    }
}

/// Spawns a reader task for a piped stream; piped streams are always drained.
fn spawn_reader<R>(
    reader: Option<R>,
    flags: StreamFlags,
    stream: Stream,
    process_name: &str,
) -> Option<JoinHandle<String>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    if !flags.is_piped() {
        return None;
    }
    let name = process_name.to_string();
    reader.map(|reader| tokio::spawn(async move { read_stream(reader, flags, stream, &name).await }))
}

/// Writes stdin content to the child; returns when done or the pipe closes.
async fn feed_stdin(mut stdin: ChildStdin, source: StdinSource) {
    match source {
        StdinSource::Content(content) => {
            let _ = stdin.write_all(content.as_bytes()).await;
        }
        StdinSource::Repeat(line) => {
            let bytes = line.into_bytes();
            while stdin.write_all(&bytes).await.is_ok() {}
        }
        StdinSource::Null | StdinSource::Inherit => {}
    }
}

/// Maps an exit status to a shell-style code: signals become 128+N.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt as _;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    -1
}

impl ProcessBuilder {
    pub(super) async fn drive(&self, name: &str, child: &mut Child) -> Result<ProcessOutput> {
        let stdout_handle = spawn_reader(child.stdout.take(), self.stdout_flags(), Stream::Stdout, name);
        let stderr_handle = spawn_reader(child.stderr.take(), self.stderr_flags(), Stream::Stderr, name);

        let feeder = child
            .stdin
            .take()
            .map(|stdin| tokio::spawn(feed_stdin(stdin, self.stdin_source().clone())));

        let status = child.wait().await.map_err(|source| {
            BakaError::from(ExecutionError::SpawnFailed {
                command: self.command_line(),
                source,
            })
        })?;

        if let Some(feeder) = feeder {
            feeder.abort();
        }

        let stdout = join_reader(stdout_handle, name).await;
        let stderr = join_reader(stderr_handle, name).await;

        Ok(ProcessOutput::new(exit_code(status), stdout, stderr))
    }
}

async fn join_reader(handle: Option<JoinHandle<String>>, name: &str) -> String {
    match handle {
        Some(handle) => handle.await.unwrap_or_else(|e| {
            warn!(process = %name, error = %e, "output reader failed");
            String::new()
        }),
        None => String::new(),
    }
}

/// Reads lines (lossy UTF-8) until EOF; returns the text when `CAPTURE` is set.
async fn read_stream<R>(reader: R, flags: StreamFlags, stream: Stream, process_name: &str) -> String
where
    R: AsyncRead + Unpin,
{
    let mut captured = String::new();
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(&buf);
                let line = text.trim_end_matches(['\n', '\r']);
                if flags.contains(StreamFlags::LOG) {
                    trace!(process = %process_name, stream = stream.label(), line = %line, "output");
                }
                if flags.contains(StreamFlags::ECHO) {
                    stream.echo(line);
                }
                if flags.contains(StreamFlags::CAPTURE) {
                    if !captured.is_empty() {
                        captured.push('\n');
                    }
                    captured.push_str(line);
                }
            }
            Err(e) => {
                warn!(process = %process_name, stream = stream.label(), error = %e, "error reading stream");
                break;
            }
        }
    }
    captured
}
