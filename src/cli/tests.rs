// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use crate::cli::action::{Action, ComposeAction, Engine, FileAction};
use crate::cli::try_parse_from;
use crate::config::types::Selection;
use crate::error::ValidationError;
use crate::exec::Modifiers;

fn action(args: &[&str]) -> Action {
    let argv = std::iter::once("baka").chain(args.iter().copied());
    let (_, action, _) = try_parse_from(argv).unwrap().into_parts().unwrap();
    action
}

fn parse_error(args: &[&str]) -> clap::error::ErrorKind {
    let argv = std::iter::once("baka").chain(args.iter().copied());
    try_parse_from(argv).unwrap_err().kind()
}

#[test]
fn test_parse_simple_actions() {
    assert_eq!(action(&["--init"]), Action::Init);
    assert_eq!(action(&["--upgrade"]), Action::Upgrade);
    assert_eq!(action(&["--list"]), Action::List);
    assert_eq!(
        action(&["--commit", "tweak sshd"]),
        Action::Commit("tweak sshd".to_string())
    );
    assert_eq!(
        action(&["--install", "vim", "htop"]),
        Action::Install(vec!["vim".to_string(), "htop".to_string()])
    );
    assert_eq!(
        action(&["--edit", "/etc/hosts"]),
        Action::Edit(PathBuf::from("/etc/hosts"))
    );
}

#[test]
fn test_parse_compose_and_file() {
    assert_eq!(
        action(&["--docker", "up", "web", "db*"]),
        Action::Compose {
            engine: Engine::Docker,
            action: ComposeAction::Up,
            selection: Selection::Names(vec!["web".to_string(), "db*".to_string()]),
        }
    );
    assert_eq!(
        action(&["--file", "restore", "all"]),
        Action::File {
            action: FileAction::Restore,
            selection: Selection::All,
        }
    );
}

#[test]
fn test_bad_compose_action() {
    let argv = ["baka", "--podman", "restart", "all"];
    let err = try_parse_from(argv).unwrap().into_parts().unwrap_err();
    assert!(matches!(
        err.as_validation(),
        Some(ValidationError::InvalidArgument { .. })
    ));
    insta::assert_snapshot!(
        err.to_string(),
        @"validation error: invalid podman: expected 'up', 'down' or 'pull', got 'restart'"
    );
}

#[test]
fn test_actions_are_exclusive_and_required() {
    use clap::error::ErrorKind;

    assert_eq!(parse_error(&["--push", "--pull"]), ErrorKind::ArgumentConflict);
    assert_eq!(parse_error(&["-n"]), ErrorKind::MissingRequiredArgument);
    assert_eq!(parse_error(&["--docker", "up"]), ErrorKind::TooFewValues);
}

#[test]
fn test_modifiers_require_job() {
    for args in [["baka", "--push", "-i"], ["baka", "--list", "-y"]] {
        let err = try_parse_from(args).unwrap().into_parts().unwrap_err();
        assert!(matches!(
            err.as_validation(),
            Some(ValidationError::InvalidArgument { what, .. }) if what == "modifiers"
        ));
    }

    let argv = ["baka", "--job", "backup", "-i", "-e", "-y"];
    let (_, action, modifiers) = try_parse_from(argv).unwrap().into_parts().unwrap();
    assert_eq!(action, Action::Job("backup".to_string()));
    assert_eq!(
        modifiers,
        Modifiers::INTERACTIVE | Modifiers::TOGGLE_NONZERO | Modifiers::AUTO_YES
    );
}

#[test]
fn test_global_options() {
    let argv = ["baka", "-n", "-l", "4", "--log-file", "/tmp/baka.log", "--diff"];
    let (global, action, _) = try_parse_from(argv).unwrap().into_parts().unwrap();
    assert!(global.dry_run);
    assert_eq!(action, Action::Diff);
    insta::assert_debug_snapshot!(global.to_config_overrides(), @r#"
    [
        (
            "global.log_level",
            "4",
        ),
        (
            "global.log_file",
            "/tmp/baka.log",
        ),
    ]
    "#);
    assert_eq!(
        parse_error(&["-l", "7", "--diff"]),
        clap::error::ErrorKind::ValueValidation
    );
}

#[test]
fn test_action_metadata() {
    assert!(Action::Diff.is_read_only());
    assert!(!Action::Upgrade.is_read_only());
    assert!(!Action::Init.needs_repository());
    assert!(!Action::List.needs_repository());
    assert!(Action::Sysck.needs_repository());
    assert_eq!(
        action(&["--docker", "pull", "all"]).describe(),
        "docker pull all"
    );
    assert_eq!(action(&["--job", "backup"]).describe(), "job backup");
}
