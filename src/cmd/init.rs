// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `baka --init`.
//!
//! ```text
//! config file missing? --> write commented template
//! <editor> <config file>
//! reload config (root and tracked paths may have changed)
//! git init at the root, committer "baka admin" <baka@HOST>, first commit
//! ```

use std::path::Path;
use tracing::{info, warn};

use crate::config::{Config, template};
use crate::error::{BakaError, BakaResult, Result, ValidationError};
use crate::exec::{Executor, Invocation, RunContext, StdinSource};
use crate::git::GitAdapter;
use crate::output::Output;

/// Host name for the committer e-mail; `localhost` when it cannot be read.
#[must_use]
pub fn hostname() -> String {
    whoami::fallible::hostname().unwrap_or_else(|err| {
        warn!(error = %err, "could not read host name");
        "localhost".to_string()
    })
}

/// `<editor words...> <path>` with the terminal attached.
///
/// # Errors
///
/// Returns `ValidationError::InvalidArgument` if the editor command cannot be
/// split into words.
pub fn editor_invocation(editor: &str, path: &Path) -> BakaResult<Invocation> {
    let argv = shlex::split(editor)
        .filter(|words| !words.is_empty())
        .ok_or_else(|| {
            BakaError::from(ValidationError::InvalidArgument {
                what: "editor".to_string(),
                message: format!("cannot split '{editor}' into words"),
            })
        })?;
    Ok(Invocation::from_argv(&argv)
        .arg(path.to_string_lossy().into_owned())
        .stdin(StdinSource::Inherit))
}

/// Write the template, edit it, reload it and create the repository.
///
/// # Errors
///
/// Returns an error if the template cannot be written, the editor fails, the
/// edited configuration is invalid or a git command fails.
pub async fn run_init<E: Executor>(
    exec: &E,
    ctx: &RunContext,
    config: &Config,
    config_path: &Path,
) -> Result<()> {
    if ctx.is_dry_run() {
        if !config_path.exists() {
            Output::dry_run(format!("write {}", config_path.display()));
        }
    } else if template::write_if_missing(config_path)? {
        Output::success(format!("wrote config template to {}", config_path.display()));
    }

    exec.run_checked(ctx, &editor_invocation(&config.editor(), config_path)?)
        .await?;

    let reloaded;
    let config = if config_path.exists() {
        reloaded = Config::builder()
            .add_toml_file(config_path)
            .with_env_prefix("BAKA")
            .build()?;
        &reloaded
    } else {
        config
    };

    let ctx = RunContext::new(config.root()).with_dry_run(ctx.is_dry_run());
    let git = GitAdapter::new(exec, &config.tracked_paths);
    git.init(&ctx, &hostname()).await?;
    info!(root = %config.root().display(), "repository initialised");
    if !ctx.is_dry_run() {
        Output::success(format!("initialised {}", config.root().display()));
    }
    Ok(())
}
