// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! What to spawn and where its streams go.
//!
//! ```text
//! ProcessBuilder::new(program)
//!   .arg/.args  .cwd  .label
//!   .stdin(StdinSource)         Null | Inherit | Content | Repeat
//!   .stdout/.stderr             StreamFlags
//!
//! StreamFlags    piped?   effect
//!   INHERIT      no       child writes to our terminal directly
//!   DISCARD      no       /dev/null
//!   CAPTURE      yes      kept in ProcessOutput
//!   ECHO         yes      copied line by line to our stdout/stderr
//!   LOG          yes      each line at trace level (default)
//! ```
//!
//! The exit code is reported, never judged: `Executor::run_checked` decides
//! what counts as failure.

use bitflags::bitflags;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock, PoisonError};

bitflags! {
    /// Handling of one output stream; flags that pipe the stream combine.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StreamFlags: u8 {
        const INHERIT = 1;
        const DISCARD = 1 << 1;
        const CAPTURE = 1 << 2;
        const ECHO = 1 << 3;
        const LOG = 1 << 4;
    }
}

impl StreamFlags {
    /// Whether the stream needs a pipe and a reader task.
    #[must_use]
    pub const fn is_piped(self) -> bool {
        !self.intersects(Self::INHERIT.union(Self::DISCARD))
    }
}

impl Default for StreamFlags {
    fn default() -> Self {
        Self::LOG
    }
}

/// Where the child's stdin comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StdinSource {
    /// `/dev/null`.
    #[default]
    Null,
    /// Our own stdin, for editors and package managers that ask questions.
    Inherit,
    /// Fixed content, then EOF.
    Content(String),
    /// The same text over and over until the child stops reading.
    Repeat(String),
}

/// Exit code and captured streams of a finished child.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    exit_code: i32,
    stdout: String,
    stderr: String,
}

impl ProcessOutput {
    pub(super) const fn new(exit_code: i32, stdout: String, stderr: String) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
        }
    }

    /// Shell-style code: 128+N when killed by signal N.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Captured stdout, lines joined with `\n`, no trailing newline.
    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    #[must_use]
    pub fn into_streams(self) -> (String, String) {
        (self.stdout, self.stderr)
    }
}

/// A child process waiting to be run with [`ProcessBuilder::run`].
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    stdin: StdinSource,
    stdout: StreamFlags,
    stderr: StreamFlags,
    label: Option<String>,
}

fn lookup_cache() -> &'static Mutex<HashMap<String, Option<PathBuf>>> {
    static CACHE: OnceLock<Mutex<HashMap<String, Option<PathBuf>>>> = OnceLock::new();
    CACHE.get_or_init(Mutex::default)
}

impl ProcessBuilder {
    /// A bare program name is resolved through `PATH` at spawn time.
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
            stdin: StdinSource::Null,
            stdout: StreamFlags::default(),
            stderr: StreamFlags::default(),
            label: None,
        }
    }

    /// Full path of `program` in `PATH`, remembered for the life of the process.
    #[must_use]
    pub fn lookup(program: &str) -> Option<PathBuf> {
        let mut cache = lookup_cache().lock().unwrap_or_else(PoisonError::into_inner);
        cache
            .entry(program.to_string())
            .or_insert_with(|| which::which(program).ok())
            .clone()
    }

    #[must_use]
    pub fn is_installed(program: &str) -> bool {
        Self::lookup(program).is_some()
    }

    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|a| a.as_ref().to_string_lossy().into_owned()),
        );
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
    pub const fn stdout(mut self, flags: StreamFlags) -> Self {
        self.stdout = flags;
        self
    }

    #[must_use]
    pub const fn stderr(mut self, flags: StreamFlags) -> Self {
        self.stderr = flags;
        self
    }

    /// Name used in diagnostics instead of the program's file name.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub(super) fn program(&self) -> &Path {
        &self.program
    }

    pub(super) fn arguments(&self) -> &[String] {
        &self.args
    }

    pub(super) fn working_dir(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    pub(super) const fn stdin_source(&self) -> &StdinSource {
        &self.stdin
    }

    pub(super) const fn stdout_flags(&self) -> StreamFlags {
        self.stdout
    }

    pub(super) const fn stderr_flags(&self) -> StreamFlags {
        self.stderr
    }

    pub(super) fn display_label(&self) -> String {
        self.label.clone().unwrap_or_else(|| {
            self.program
                .file_name()
                .map_or_else(|| "process".to_string(), |n| n.to_string_lossy().into_owned())
        })
    }
}
