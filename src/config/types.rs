// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for baka-rs.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, CommandsConfig, tracked_paths,
//!         jobs: name -> JobConfig,
//!         sysck/scan: key -> shell command,
//!         docker/podman/files: name -> path
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::logging::LogLevel;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Tracked root: the git repository mirrored paths are copied into.
    pub root: PathBuf,
    /// Editor used by `--init` and `--edit`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
    /// Console log level (0-6), overridden by `--log-level`.
    pub log_level: LogLevel,
    /// Diagnostic log file, overridden by `--log-file`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("~/.baka"),
            editor: None,
            log_level: LogLevel::Warn,
            log_file: None,
        }
    }
}

/// External command lines for the package and compose verbs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommandsConfig {
    /// Package install command, package names are appended.
    pub install: Vec<String>,
    /// Package removal command, package names are appended.
    pub remove: Vec<String>,
    /// Full system upgrade command.
    pub upgrade: Vec<String>,
    /// Compose front-end for `--docker`.
    pub docker_compose: Vec<String>,
    /// Compose front-end for `--podman`.
    pub podman_compose: Vec<String>,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        let argv = |parts: &[&str]| parts.iter().map(ToString::to_string).collect();
        Self {
            install: argv(&["sudo", "apt", "install"]),
            remove: argv(&["sudo", "apt", "autoremove", "--purge"]),
            upgrade: argv(&["sh", "-c", "sudo apt update && sudo apt upgrade"]),
            docker_compose: argv(&["docker", "compose"]),
            podman_compose: argv(&["podman-compose"]),
        }
    }
}

impl CommandsConfig {
    /// Returns `(key, argv)` pairs for validation and display.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, &[String]); 5] {
        [
            ("install", self.install.as_slice()),
            ("remove", self.remove.as_slice()),
            ("upgrade", self.upgrade.as_slice()),
            ("docker_compose", self.docker_compose.as_slice()),
            ("podman_compose", self.podman_compose.as_slice()),
        ]
    }
}

/// How much of a job's output reaches the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Echo each command line, show stdout and stderr.
    #[default]
    Debug,
    /// Show stdout and stderr.
    Info,
    /// Show stderr only.
    Error,
    /// Show nothing.
    Silent,
}

impl Verbosity {
    /// Whether command lines are echoed before they run.
    #[must_use]
    pub const fn echoes_commands(self) -> bool {
        matches!(self, Self::Debug)
    }

    /// Whether the command's stdout reaches the terminal.
    #[must_use]
    pub const fn shows_stdout(self) -> bool {
        matches!(self, Self::Debug | Self::Info)
    }

    /// Whether the command's stderr reaches the terminal.
    #[must_use]
    pub const fn shows_stderr(self) -> bool {
        !matches!(self, Self::Silent)
    }
}

impl std::fmt::Display for Verbosity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Error => write!(f, "error"),
            Self::Silent => write!(f, "silent"),
        }
    }
}

impl std::str::FromStr for Verbosity {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "error" => Ok(Self::Error),
            "silent" => Ok(Self::Silent),
            _ => Err(ConfigError::InvalidValue {
                section: "jobs".to_string(),
                key: "verbosity".to_string(),
                message: format!("expected 'debug', 'info', 'error' or 'silent', got '{s}'"),
            }),
        }
    }
}

/// A named job: shell commands run in order plus modifier defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobConfig {
    /// Shell command strings, run with `sh -c` in the tracked root.
    pub commands: Vec<String>,
    /// Ask before every command.
    pub interactive: bool,
    /// Keep going when a command exits non-zero.
    pub tolerate_nonzero: bool,
    /// Drop into step-by-step approval after a failure instead of aborting.
    pub pause_on_error: bool,
    /// Feed `y` answers to each command's stdin.
    pub auto_yes: bool,
    /// Terminal output level.
    pub verbosity: Verbosity,
    /// Transcript path; strftime codes are expanded, relative paths resolve
    /// against the tracked root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
}

/// Entry selection for `--docker`, `--podman` and `--file`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every entry of the section.
    All,
    /// Entries by name or glob pattern.
    Names(Vec<String>),
}

impl Selection {
    /// Build a selection from raw CLI words; a lone `all` selects everything.
    #[must_use]
    pub fn from_words(words: &[String]) -> Self {
        if words.len() == 1 && words[0] == "all" {
            Self::All
        } else {
            Self::Names(words.to_vec())
        }
    }
}
