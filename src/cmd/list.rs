// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `baka --list`: a read-only overview of the configuration and repository.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::Config;
use crate::config::types::JobConfig;
use crate::core::process::builder::ProcessBuilder;
use crate::git::{GitQuery, GixBackend};
use crate::output::Output;

/// State of the repository at the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoState {
    /// Not a repository yet.
    Missing,
    /// Repository on `branch` (None when detached), with or without changes.
    Present { branch: Option<String>, dirty: bool },
}

impl RepoState {
    /// Query the root with gix; query failures are logged and ignored.
    #[must_use]
    pub fn probe(root: &Path) -> Self {
        if !GixBackend::is_repository(root) {
            return Self::Missing;
        }
        let branch = GixBackend::current_branch(root).unwrap_or_else(|err| {
            debug!(error = %err, "could not read branch");
            None
        });
        let dirty = GixBackend::has_uncommitted_changes(root).unwrap_or_else(|err| {
            debug!(error = %err, "could not read status");
            false
        });
        Self::Present { branch, dirty }
    }
}

/// One line of `--list` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Header(String),
    Item(String),
}

fn job_flags(job: &JobConfig) -> String {
    let flags: Vec<&str> = [
        (job.interactive, "interactive"),
        (job.tolerate_nonzero, "tolerate_nonzero"),
        (job.pause_on_error, "pause_on_error"),
        (job.auto_yes, "auto_yes"),
    ]
    .into_iter()
    .filter_map(|(set, name)| set.then_some(name))
    .collect();
    if flags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", flags.join(", "))
    }
}

fn section(lines: &mut Vec<Line>, title: &str, items: impl IntoIterator<Item = String>) {
    lines.push(Line::Header(format!("{title}:")));
    let before = lines.len();
    lines.extend(items.into_iter().map(|item| Line::Item(format!("  {item}"))));
    if lines.len() == before {
        lines.push(Line::Item("  (none)".to_string()));
    }
}

/// Build the listing without printing it.
#[must_use]
pub fn render(config: &Config, repo: &RepoState) -> Vec<Line> {
    let root = config.root().display();
    let mut lines = vec![Line::Header(match repo {
        RepoState::Missing => format!("repository: {root} (not initialised)"),
        RepoState::Present { branch, dirty } => format!(
            "repository: {root} (branch {}, {})",
            branch.as_deref().unwrap_or("detached"),
            if *dirty { "uncommitted changes" } else { "clean" }
        ),
    })];

    section(
        &mut lines,
        "tracked paths",
        config.tracked_paths.iter().map(|p| p.display().to_string()),
    );
    section(
        &mut lines,
        "jobs",
        config.jobs.iter().map(|(name, job)| {
            let count = job.commands.len();
            let noun = if count == 1 { "command" } else { "commands" };
            format!(
                "{name}: {count} {noun}, verbosity {}{}",
                job.verbosity,
                job_flags(job)
            )
        }),
    );
    for (title, entries) in [("sysck", &config.sysck), ("scan", &config.scan)] {
        section(
            &mut lines,
            title,
            entries.iter().map(|(key, cmd)| format!("{key} = {cmd}")),
        );
    }
    for (title, entries) in [
        ("docker", &config.docker),
        ("podman", &config.podman),
        ("files", &config.files),
    ] {
        section(
            &mut lines,
            title,
            entries
                .iter()
                .map(|(name, path)| format!("{name} = {}", path.display())),
        );
    }
    lines
}

/// The programs baka shells out to, resolved with `lookup`.
#[must_use]
pub fn tool_lines(config: &Config, lookup: impl Fn(&str) -> Option<PathBuf>) -> Vec<Line> {
    let editor = config.editor();
    let editor = shlex::split(&editor)
        .and_then(|words| words.into_iter().next())
        .unwrap_or(editor);
    let mut lines = Vec::new();
    section(
        &mut lines,
        "tools",
        ["git", "rsync", editor.as_str()].into_iter().map(|program| {
            lookup(program).map_or_else(
                || format!("{program}: not found"),
                |path| format!("{program}: {}", path.display()),
            )
        }),
    );
    lines
}

/// Print the listing for `config`.
pub fn print(config: &Config) {
    let repo = RepoState::probe(config.root());
    let mut lines = render(config, &repo);
    lines.extend(tool_lines(config, ProcessBuilder::lookup));
    for line in lines {
        match line {
            Line::Header(text) => Output::header(text),
            Line::Item(text) => println!("{text}"),
        }
    }
}
