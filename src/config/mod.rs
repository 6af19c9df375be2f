// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for baka-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. config file (--config / $BAKARC / ~/.baka/config.toml)
//! 3. BAKA_* env vars
//! 4. CLI flags (log level, log file)
//! ```
//!
//! # Environment Variable Mapping
//!
//! Sections and keys are separated by a double underscore so that keys may
//! contain single underscores:
//!
//! ```text
//! BAKA_GLOBAL__EDITOR=vim       → global.editor = "vim"
//! BAKA_GLOBAL__LOG_LEVEL=4      → global.log_level = 4
//! BAKA_GLOBAL__ROOT=/srv/baka   → global.root = "/srv/baka"
//! ```
//!
//! # Jobs
//!
//! ```toml
//! [jobs.backup]
//! commands = ["restic backup /srv", "restic forget --keep-daily 7"]
//! pause_on_error = true
//! log_file = "jobs/backup %Y-%m-%d.log"
//! ```

pub mod loader;
pub mod paths;
pub mod template;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use wax::Program as _;

use crate::error::{BakaError, BakaResult, ConfigError, Result};
use crate::job::is_valid_pattern;

use loader::ConfigLoader;
use types::{CommandsConfig, GlobalConfig, JobConfig, Selection};

/// Complete application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// External command lines used by the package and compose verbs.
    pub commands: CommandsConfig,
    /// Host paths mirrored into the tracked root before every commit.
    pub tracked_paths: Vec<PathBuf>,
    /// Named jobs.
    pub jobs: BTreeMap<String, JobConfig>,
    /// `--sysck` checks: log name → shell command (output redirected to the log).
    pub sysck: BTreeMap<String, String>,
    /// `--scan` checks: log name → shell command (output tee'd to the log).
    pub scan: BTreeMap<String, String>,
    /// `--docker` stacks: name → compose project directory.
    pub docker: BTreeMap<String, PathBuf>,
    /// `--podman` stacks: name → compose project directory.
    pub podman: BTreeMap<String, PathBuf>,
    /// `--file` entries: name → host path.
    pub files: BTreeMap<String, PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            global: GlobalConfig::default(),
            commands: CommandsConfig::default(),
            tracked_paths: vec![PathBuf::from("/etc"), PathBuf::from("~/.config")],
            jobs: BTreeMap::new(),
            sysck: BTreeMap::new(),
            scan: BTreeMap::new(),
            docker: BTreeMap::new(),
            podman: BTreeMap::new(),
            files: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use baka_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("/etc/baka.toml")
    ///     .with_env_prefix("BAKA")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Tracked root (expanded after loading).
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.global.root
    }

    /// Look up a job by name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownJob` if no job has that name.
    pub fn job(&self, name: &str) -> BakaResult<&JobConfig> {
        self.jobs.get(name).ok_or_else(|| {
            ConfigError::UnknownJob {
                name: name.to_string(),
            }
            .into()
        })
    }

    /// Editor for `--init` and `--edit`: `global.editor`, `$VISUAL`, `$EDITOR`, `nano`.
    #[must_use]
    pub fn editor(&self) -> String {
        self.global
            .editor
            .clone()
            .filter(|e| !e.trim().is_empty())
            .or_else(|| std::env::var("VISUAL").ok().filter(|e| !e.is_empty()))
            .or_else(|| std::env::var("EDITOR").ok().filter(|e| !e.is_empty()))
            .unwrap_or_else(|| "nano".to_string())
    }

    /// Expand `~` in all paths and validate the loaded values.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a path cannot be expanded, a job has no
    /// commands, a command line is empty, or an entry name is not usable as a
    /// file name.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        self.global.root = paths::expand_home(&self.global.root)?;
        if let Some(log_file) = &self.global.log_file {
            self.global.log_file = Some(paths::expand_home(log_file)?);
        }
        for path in &mut self.tracked_paths {
            *path = paths::expand_home(path)?;
        }
        for section in [&mut self.docker, &mut self.podman, &mut self.files] {
            for path in section.values_mut() {
                *path = paths::expand_home(path)?;
            }
        }
        self.validate()?;
        Ok(())
    }

    fn validate(&self) -> BakaResult<()> {
        for (key, argv) in self.commands.entries() {
            if argv.is_empty() || argv[0].trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    section: "commands".to_string(),
                    key: key.to_string(),
                    message: "command line must not be empty".to_string(),
                }
                .into());
            }
        }

        for (name, job) in &self.jobs {
            if job.commands.is_empty() {
                return Err(invalid("jobs", name, "job has no commands").into());
            }
            if let Some(index) = job.commands.iter().position(|c| c.trim().is_empty()) {
                return Err(invalid(
                    "jobs",
                    name,
                    &format!("command {} is blank", index + 1),
                )
                .into());
            }
            if let Some(template) = &job.log_file
                && !is_valid_pattern(template)
            {
                return Err(invalid(
                    "jobs",
                    name,
                    &format!("log_file '{template}' is not a valid strftime pattern"),
                )
                .into());
            }
        }

        let sections = [
            ("sysck", self.sysck.keys().collect::<Vec<_>>()),
            ("scan", self.scan.keys().collect()),
            ("docker", self.docker.keys().collect()),
            ("podman", self.podman.keys().collect()),
            ("files", self.files.keys().collect()),
        ];
        for (section, names) in sections {
            for name in names {
                if name.is_empty() || name.contains('/') || name == "." || name == ".." {
                    return Err(invalid(section, name, "name must be a plain file name").into());
                }
            }
        }

        for (name, command) in self.sysck.iter().chain(&self.scan) {
            if command.trim().is_empty() {
                return Err(invalid("sysck/scan", name, "check command is blank").into());
            }
        }

        Ok(())
    }

    /// Resolve a selection against a named section.
    ///
    /// Names match exactly first, then as glob patterns. Every requested name
    /// must match at least one entry, and `all` needs a non-empty section. The
    /// result is ordered by entry name and free of duplicates.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownEntry` for a name that matches nothing,
    /// with the name `all` when the section is empty.
    pub fn select<'a, V>(
        section: &str,
        entries: &'a BTreeMap<String, V>,
        selection: &Selection,
    ) -> BakaResult<Vec<(&'a str, &'a V)>> {
        let names = match selection {
            Selection::All if entries.is_empty() => {
                return Err(BakaError::from(ConfigError::UnknownEntry {
                    section: section.to_string(),
                    name: "all".to_string(),
                }));
            }
            Selection::All => {
                return Ok(entries.iter().map(|(k, v)| (k.as_str(), v)).collect());
            }
            Selection::Names(names) => names,
        };

        let mut picked = BTreeMap::new();
        for name in names {
            let before = picked.len();
            if let Some((key, value)) = entries.get_key_value(name) {
                picked.insert(key.as_str(), value);
                continue;
            }
            if let Ok(glob) = wax::Glob::new(name) {
                for (key, value) in entries {
                    if glob.is_match(key.as_str()) {
                        picked.insert(key.as_str(), value);
                    }
                }
            }
            if picked.len() == before && !entries.keys().any(|k| glob_hits(name, k)) {
                return Err(BakaError::from(ConfigError::UnknownEntry {
                    section: section.to_string(),
                    name: name.clone(),
                }));
            }
        }
        Ok(picked.into_iter().collect())
    }
}

fn glob_hits(pattern: &str, key: &str) -> bool {
    pattern == key || wax::Glob::new(pattern).is_ok_and(|glob| glob.is_match(key))
}

fn invalid(section: &str, key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        message: message.to_string(),
    }
}
