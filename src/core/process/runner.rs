// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Spawning.
//!
//! ```text
//! run()
//!   command()   program, args, cwd, stdio from flags
//!   spawn()     --(io error)--> ExecutionError::SpawnFailed
//!   io::drive() stdin feeder, stream readers, wait
//!   --> ProcessOutput (any exit code)
//! ```

use std::process::Stdio;
use tokio::process::Command;
use tracing::trace;

use super::builder::{ProcessBuilder, ProcessOutput, StdinSource, StreamFlags};
use crate::error::{BakaError, ExecutionError, Result};

fn stdio(flags: StreamFlags) -> Stdio {
    if flags.contains(StreamFlags::INHERIT) {
        Stdio::inherit()
    } else if flags.contains(StreamFlags::DISCARD) {
        Stdio::null()
    } else {
        Stdio::piped()
    }
}

impl ProcessBuilder {
    /// The command line, shell-quoted the way a user would type it.
    #[must_use]
    pub fn command_line(&self) -> String {
        let program = self.program().to_string_lossy();
        let words: Vec<&str> = std::iter::once(program.as_ref())
            .chain(self.arguments().iter().map(String::as_str))
            .collect();
        // NUL bytes are the only thing try_join rejects
        shlex::try_join(words.iter().copied()).unwrap_or_else(|_| words.join(" "))
    }

    fn command(&self) -> Command {
        let mut command = Command::new(self.program());
        command
            .args(self.arguments())
            .stdin(match self.stdin_source() {
                StdinSource::Null => Stdio::null(),
                StdinSource::Inherit => Stdio::inherit(),
                StdinSource::Content(_) | StdinSource::Repeat(_) => Stdio::piped(),
            })
            .stdout(stdio(self.stdout_flags()))
            .stderr(stdio(self.stderr_flags()))
            .kill_on_drop(true);
        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }
        command
    }

    /// Run to completion and report the exit code, whatever it is.
    ///
    /// # Errors
    ///
    /// Returns `ExecutionError::SpawnFailed` if the program cannot be started
    /// or waited for.
    pub async fn run(self) -> Result<ProcessOutput> {
        let label = self.display_label();
        let mut child = self.command().spawn().map_err(|source| {
            BakaError::from(ExecutionError::SpawnFailed {
                command: self.command_line(),
                source,
            })
        })?;
        trace!(process = %label, pid = ?child.id(), "spawned");

        let output = self.drive(&label, &mut child).await?;
        trace!(process = %label, exit_code = output.exit_code(), "exited");
        Ok(output)
    }
}
