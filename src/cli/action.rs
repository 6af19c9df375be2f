// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mutually exclusive action flags and their typed form.
//!
//! ```text
//! ActionArgs (clap, one flag set)  --into_action()-->  Action
//!   --docker up web 'db*'            Compose { Docker, Up, Names[web, db*] }
//!   --file restore all               File { Restore, All }
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::config::types::Selection;
use crate::error::{BakaError, BakaResult, ValidationError};
use crate::exec::Modifiers;

/// Exactly one of these is given.
#[derive(Debug, Clone, Default, Args)]
#[group(id = "action", required = true, multiple = false)]
pub struct ActionArgs {
    /// Write the config template if missing, open it in the editor, create the repository.
    #[arg(long)]
    pub init: bool,

    /// Commit tracked changes with a message.
    #[arg(long, value_name = "MSG")]
    pub commit: Option<String>,

    /// Push the repository.
    #[arg(long)]
    pub push: bool,

    /// Pull the repository.
    #[arg(long)]
    pub pull: bool,

    /// Stop tracking paths (relative to the root); files stay on disk.
    #[arg(long, value_name = "PATH", num_args = 1..)]
    pub untrack: Option<Vec<String>>,

    /// Install packages, committing before and after.
    #[arg(long, value_name = "PKG", num_args = 1..)]
    pub install: Option<Vec<String>>,

    /// Remove packages, committing before and after.
    #[arg(long, value_name = "PKG", num_args = 1..)]
    pub remove: Option<Vec<String>>,

    /// Upgrade the system, committing before and after.
    #[arg(long)]
    pub upgrade: bool,

    /// Docker compose stacks: <up|down|pull> <all|NAME...>
    #[arg(long, value_name = "ARGS", num_args = 2..)]
    pub docker: Option<Vec<String>>,

    /// Podman compose stacks: <up|down|pull> <all|NAME...>
    #[arg(long, value_name = "ARGS", num_args = 2..)]
    pub podman: Option<Vec<String>>,

    /// Saved files: <save|restore> <all|NAME...>
    #[arg(long, value_name = "ARGS", num_args = 2..)]
    pub file: Option<Vec<String>>,

    /// Edit a file and commit the change.
    #[arg(long, value_name = "FILE")]
    pub edit: Option<PathBuf>,

    /// Run a configured job.
    #[arg(long, value_name = "NAME")]
    pub job: Option<String>,

    /// List jobs, checks and named entries.
    #[arg(long)]
    pub list: bool,

    /// Run the configured status checks into sysck/.
    #[arg(long)]
    pub sysck: bool,

    /// Run the configured integrity scans into scan/.
    #[arg(long)]
    pub scan: bool,

    /// Show uncommitted changes.
    #[arg(long)]
    pub diff: bool,

    /// Show the commit log.
    #[arg(long)]
    pub log: bool,

    /// Show the last commit.
    #[arg(long)]
    pub show: bool,
}

/// Job modifiers, only valid with `--job`.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct ModifierArgs {
    /// Ask before every step.
    #[arg(short = 'i', long)]
    pub interactive: bool,

    /// Invert the job's tolerate_nonzero setting.
    #[arg(short = 'e', long = "toggle-nonzero")]
    pub toggle_nonzero: bool,

    /// Pause after a failed step instead of aborting.
    #[arg(short = 'p', long = "pause-on-error")]
    pub pause_on_error: bool,

    /// Answer `y` to every question the job's commands ask.
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,
}

impl ModifierArgs {
    #[must_use]
    pub fn to_modifiers(self) -> Modifiers {
        let mut modifiers = Modifiers::empty();
        modifiers.set(Modifiers::INTERACTIVE, self.interactive);
        modifiers.set(Modifiers::TOGGLE_NONZERO, self.toggle_nonzero);
        modifiers.set(Modifiers::PAUSE_ON_ERROR, self.pause_on_error);
        modifiers.set(Modifiers::AUTO_YES, self.yes);
        modifiers
    }
}

/// Container front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    Docker,
    Podman,
}

impl Engine {
    /// Config section holding the stack directories.
    #[must_use]
    pub const fn section(self) -> &'static str {
        match self {
            Self::Docker => "docker",
            Self::Podman => "podman",
        }
    }
}

/// `--docker`/`--podman` action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeAction {
    Up,
    Down,
    Pull,
}

impl ComposeAction {
    /// Arguments appended to the compose front-end.
    #[must_use]
    pub const fn args(self) -> &'static [&'static str] {
        match self {
            Self::Up => &["up", "-d"],
            Self::Down => &["down"],
            Self::Pull => &["pull"],
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Pull => "pull",
        }
    }
}

/// `--file` action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Save,
    Restore,
}

impl FileAction {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Save => "save",
            Self::Restore => "restore",
        }
    }
}

/// The one thing a `baka` invocation does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Init,
    Commit(String),
    Push,
    Pull,
    Untrack(Vec<String>),
    Install(Vec<String>),
    Remove(Vec<String>),
    Upgrade,
    Compose {
        engine: Engine,
        action: ComposeAction,
        selection: Selection,
    },
    File {
        action: FileAction,
        selection: Selection,
    },
    Edit(PathBuf),
    Job(String),
    List,
    Sysck,
    Scan,
    Diff,
    Log,
    Show,
}

impl Action {
    /// Actions that only read: no history entry.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        matches!(self, Self::List | Self::Diff | Self::Log | Self::Show)
    }

    /// Actions that need an existing repository at the root.
    #[must_use]
    pub const fn needs_repository(&self) -> bool {
        !matches!(self, Self::Init | Self::List)
    }

    /// Short description for the history log.
    #[must_use]
    pub fn describe(&self) -> String {
        let selection = |s: &Selection| match s {
            Selection::All => "all".to_string(),
            Selection::Names(names) => names.join(" "),
        };
        match self {
            Self::Init => "init".to_string(),
            Self::Commit(msg) => format!("commit {msg}"),
            Self::Push => "push".to_string(),
            Self::Pull => "pull".to_string(),
            Self::Untrack(paths) => format!("untrack {}", paths.join(" ")),
            Self::Install(pkgs) => format!("install {}", pkgs.join(" ")),
            Self::Remove(pkgs) => format!("remove {}", pkgs.join(" ")),
            Self::Upgrade => "upgrade".to_string(),
            Self::Compose {
                engine,
                action,
                selection: s,
            } => format!("{} {} {}", engine.section(), action.name(), selection(s)),
            Self::File {
                action,
                selection: s,
            } => format!("file {} {}", action.name(), selection(s)),
            Self::Edit(path) => format!("edit {}", path.display()),
            Self::Job(name) => format!("job {name}"),
            Self::List => "list".to_string(),
            Self::Sysck => "sysck".to_string(),
            Self::Scan => "scan".to_string(),
            Self::Diff => "diff".to_string(),
            Self::Log => "log".to_string(),
            Self::Show => "show".to_string(),
        }
    }
}

fn invalid(what: &str, message: String) -> BakaError {
    ValidationError::InvalidArgument {
        what: what.to_string(),
        message,
    }
    .into()
}

fn compose(engine: Engine, words: &[String]) -> BakaResult<Action> {
    let (first, rest) = split_words(engine.section(), words)?;
    let action = match first {
        "up" => ComposeAction::Up,
        "down" => ComposeAction::Down,
        "pull" => ComposeAction::Pull,
        other => {
            return Err(invalid(
                engine.section(),
                format!("expected 'up', 'down' or 'pull', got '{other}'"),
            ));
        }
    };
    Ok(Action::Compose {
        engine,
        action,
        selection: Selection::from_words(rest),
    })
}

fn file(words: &[String]) -> BakaResult<Action> {
    let (first, rest) = split_words("file", words)?;
    let action = match first {
        "save" => FileAction::Save,
        "restore" => FileAction::Restore,
        other => {
            return Err(invalid(
                "file",
                format!("expected 'save' or 'restore', got '{other}'"),
            ));
        }
    };
    Ok(Action::File {
        action,
        selection: Selection::from_words(rest),
    })
}

fn split_words<'a>(what: &str, words: &'a [String]) -> BakaResult<(&'a str, &'a [String])> {
    match words.split_first() {
        Some((first, rest)) if !rest.is_empty() => Ok((first.as_str(), rest)),
        _ => Err(invalid(what, "expected an action and at least one name".to_string())),
    }
}

impl ActionArgs {
    /// Convert the flag set into an [`Action`].
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidArgument` for an unknown compose or
    /// file action, or when no action flag is set.
    pub fn into_action(self) -> BakaResult<Action> {
        let action = if self.init {
            Action::Init
        } else if let Some(msg) = self.commit {
            Action::Commit(msg)
        } else if self.push {
            Action::Push
        } else if self.pull {
            Action::Pull
        } else if let Some(paths) = self.untrack {
            Action::Untrack(paths)
        } else if let Some(pkgs) = self.install {
            Action::Install(pkgs)
        } else if let Some(pkgs) = self.remove {
            Action::Remove(pkgs)
        } else if self.upgrade {
            Action::Upgrade
        } else if let Some(words) = self.docker {
            compose(Engine::Docker, &words)?
        } else if let Some(words) = self.podman {
            compose(Engine::Podman, &words)?
        } else if let Some(words) = self.file {
            file(&words)?
        } else if let Some(path) = self.edit {
            Action::Edit(path)
        } else if let Some(name) = self.job {
            Action::Job(name)
        } else if self.list {
            Action::List
        } else if self.sysck {
            Action::Sysck
        } else if self.scan {
            Action::Scan
        } else if self.diff {
            Action::Diff
        } else if self.log {
            Action::Log
        } else if self.show {
            Action::Show
        } else {
            return Err(invalid("action", "no action given".to_string()));
        };
        Ok(action)
    }
}
