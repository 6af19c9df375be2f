// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Turn an [`Action`] into what has to happen, without running anything.
//!
//! Every config lookup (job names, entry selections, editor) happens here,
//! so a bad name fails before the first command runs.

use std::path::Path;

use super::init::editor_invocation;
use crate::cli::action::{Action, ComposeAction, Engine, FileAction};
use crate::config::Config;
use crate::config::types::{JobConfig, Selection};
use crate::error::{BakaResult, ValidationError};
use crate::exec::{Invocation, StdinSource};
use crate::pipeline::{Pipeline, Step};

/// Directory under the root for `--sysck` output.
pub const SYSCK_DIR: &str = "sysck";

/// Directory under the root for `--scan` output.
pub const SCAN_DIR: &str = "scan";

/// Resolved action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan<'a> {
    Init,
    List,
    Steps(Pipeline),
    Job { name: &'a str, job: &'a JobConfig },
    Push,
    Pull,
    Untrack(&'a [String]),
    Diff,
    Log,
    Show,
}

impl Plan<'_> {
    /// Whether the root must already be a repository.
    #[must_use]
    pub const fn needs_repository(&self) -> bool {
        !matches!(self, Self::Init | Self::List)
    }
}

/// Resolve `action` against `config`, rooted at `root`.
///
/// # Errors
///
/// Returns `ConfigError::UnknownJob` or `ConfigError::UnknownEntry` for names
/// missing from the configuration, `ValidationError::EmptyMessage` for a blank
/// commit message and `ValidationError::InvalidArgument` for a malformed editor
/// command.
pub fn plan<'a>(config: &'a Config, root: &Path, action: &'a Action) -> BakaResult<Plan<'a>> {
    Ok(match action {
        Action::Init => Plan::Init,
        Action::List => Plan::List,
        Action::Commit(message) => {
            if message.trim().is_empty() {
                return Err(ValidationError::EmptyMessage.into());
            }
            Plan::Steps(Pipeline::new().commit(format!("baka commit {message}")))
        }
        Action::Install(pkgs) => Plan::Steps(package(
            "install",
            &config.commands.install,
            pkgs,
        )),
        Action::Remove(pkgs) => Plan::Steps(package("remove", &config.commands.remove, pkgs)),
        Action::Upgrade => Plan::Steps(
            Pipeline::new()
                .snapshot("baka pre-upgrade")
                .run(interactive(&config.commands.upgrade))
                .commit("baka upgrade"),
        ),
        Action::Compose {
            engine,
            action,
            selection,
        } => Plan::Steps(compose(config, *engine, *action, selection)?),
        Action::File { action, selection } => Plan::Steps(files(config, *action, selection)?),
        Action::Edit(path) => Plan::Steps(
            Pipeline::new()
                .run(editor_invocation(&config.editor(), path)?)
                .commit(format!("baka edit {}", path.display())),
        ),
        Action::Job(name) => Plan::Job {
            name,
            job: config.job(name)?,
        },
        Action::Sysck => Plan::Steps(checks(
            root,
            SYSCK_DIR,
            config.sysck.iter(),
            |cmd, log| format!("{cmd} > {log}"),
        )),
        Action::Scan => Plan::Steps(checks(
            root,
            SCAN_DIR,
            config.scan.iter(),
            |cmd, log| format!("{cmd} | tee {log}"),
        )),
        Action::Push => Plan::Push,
        Action::Pull => Plan::Pull,
        Action::Untrack(paths) => Plan::Untrack(paths),
        Action::Diff => Plan::Diff,
        Action::Log => Plan::Log,
        Action::Show => Plan::Show,
    })
}

/// Configured command line with the terminal attached.
fn interactive(argv: &[String]) -> Invocation {
    Invocation::from_argv(argv).stdin(StdinSource::Inherit)
}

fn package(verb: &str, command: &[String], pkgs: &[String]) -> Pipeline {
    Pipeline::new()
        .snapshot(format!("baka pre-{verb}"))
        .run(interactive(command).args(pkgs))
        .commit(format!("baka {verb} {}", pkgs.join(" ")))
}

fn compose(
    config: &Config,
    engine: Engine,
    action: ComposeAction,
    selection: &Selection,
) -> BakaResult<Pipeline> {
    let (stacks, command) = match engine {
        Engine::Docker => (&config.docker, &config.commands.docker_compose),
        Engine::Podman => (&config.podman, &config.commands.podman_compose),
    };
    let selected = Config::select(engine.section(), stacks, selection)?;
    let names: Vec<&str> = selected.iter().map(|(name, _)| *name).collect();

    let pipeline = selected.iter().fold(Pipeline::new(), |pipeline, (_, dir)| {
        pipeline.run(interactive(command).args(action.args().iter().copied()).cwd(dir))
    });
    Ok(pipeline.commit(format!(
        "baka {} {} {}",
        engine.section(),
        action.name(),
        names.join(" ")
    )))
}

fn files(config: &Config, action: FileAction, selection: &Selection) -> BakaResult<Pipeline> {
    let selected = Config::select("files", &config.files, selection)?;
    let names: Vec<&str> = selected.iter().map(|(name, _)| *name).collect();

    let pipeline = selected
        .iter()
        .fold(Pipeline::new(), |pipeline, (name, path)| {
            let (name, path) = ((*name).to_string(), (*path).clone());
            pipeline.step(match action {
                FileAction::Save => Step::Save { name, path },
                FileAction::Restore => Step::Restore { name, path },
            })
        });
    Ok(pipeline.commit(format!("baka file {} {}", action.name(), names.join(" "))))
}

fn checks<'c>(
    root: &Path,
    dir: &str,
    entries: impl Iterator<Item = (&'c String, &'c String)>,
    line: impl Fn(&str, &str) -> String,
) -> Pipeline {
    let pipeline = Pipeline::new()
        .snapshot(format!("baka pre-{dir}"))
        .mkdir(root.join(dir));
    entries
        .fold(pipeline, |pipeline, (key, command)| {
            let log = format!("{dir}/{key}.log");
            pipeline.check(
                Invocation::shell(line(command, &log))
                    .cwd(root)
                    .stdin(StdinSource::Inherit),
            )
        })
        .commit(format!("baka {dir}"))
}
