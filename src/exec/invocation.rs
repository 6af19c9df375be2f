// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! What to run and what came back.

use std::path::{Path, PathBuf};

pub use crate::core::process::builder::StdinSource;
use crate::error::{BakaResult, ExecutionError};

/// How one output stream of a child is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Straight to the terminal.
    #[default]
    Inherit,
    /// Kept in [`CommandResult`], not shown.
    Capture,
    /// Kept in [`CommandResult`] and echoed line by line.
    Tee,
    /// Dropped.
    Discard,
}

/// A fully described external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    stdin: StdinSource,
    stdout: OutputMode,
    stderr: OutputMode,
    label: Option<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            stdin: StdinSource::Null,
            stdout: OutputMode::Inherit,
            stderr: OutputMode::Inherit,
            label: None,
        }
    }

    /// Build from an argv vector (first element is the program).
    ///
    /// An empty vector yields an invocation of the empty program, which fails
    /// to spawn; configured command lines are validated on load.
    #[must_use]
    pub fn from_argv(argv: &[String]) -> Self {
        let (program, args) = argv.split_first().map_or(("", &[][..]), |(p, a)| (p.as_str(), a));
        Self::new(program).args(args)
    }

    /// `/bin/sh -c <command>`, displayed as the bare command string.
    pub fn shell(command: impl Into<String>) -> Self {
        let command = command.into();
        Self::new("/bin/sh")
            .arg("-c")
            .arg(command.clone())
            .label(command)
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn stdin(mut self, source: StdinSource) -> Self {
        self.stdin = source;
        self
    }

    #[must_use]
    pub const fn stdout(mut self, mode: OutputMode) -> Self {
        self.stdout = mode;
        self
    }

    #[must_use]
    pub const fn stderr(mut self, mode: OutputMode) -> Self {
        self.stderr = mode;
        self
    }

    /// Text shown instead of the quoted argv in dry-run output and messages.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub fn working_dir(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    #[must_use]
    pub const fn stdin_source(&self) -> &StdinSource {
        &self.stdin
    }

    #[must_use]
    pub const fn stdout_mode(&self) -> OutputMode {
        self.stdout
    }

    #[must_use]
    pub const fn stderr_mode(&self) -> OutputMode {
        self.stderr
    }

    /// Shell-quoted command line, or the label when one is set.
    #[must_use]
    pub fn display(&self) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }
        let words: Vec<&str> = std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect();
        shlex::try_join(words.iter().copied()).unwrap_or_else(|_| words.join(" "))
    }
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

/// Outcome of one executed (or dry-run) command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    command: String,
    exit_code: i32,
    stdout: String,
    stderr: String,
    dry_run: bool,
}

impl CommandResult {
    #[must_use]
    pub const fn new(command: String, exit_code: i32, stdout: String, stderr: String) -> Self {
        Self {
            command,
            exit_code,
            stdout,
            stderr,
            dry_run: false,
        }
    }

    /// Synthetic success for a command that was only printed.
    #[must_use]
    pub const fn dry_run(command: String) -> Self {
        Self {
            command,
            exit_code: 0,
            stdout: String::new(),
            stderr: String::new(),
            dry_run: true,
        }
    }

    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Turn a non-zero exit into `ExecutionError::NonZeroExit`.
    ///
    /// # Errors
    ///
    /// Returns the error when the exit code is not 0.
    pub fn check(self) -> BakaResult<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(ExecutionError::NonZeroExit {
                command: self.command,
                code: self.exit_code,
            }
            .into())
        }
    }
}
