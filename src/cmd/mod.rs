// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Action handlers.
//!
//! ```text
//! Action --plan()--> Plan            config lookups, no side effects
//!          |
//!          +-- Init   --> init::run_init
//!          +-- List   --> list::print
//!          |
//!          ensure_initialized(root)  NotInitialized otherwise
//!          |
//!          +-- Steps  --> Pipeline::execute
//!          +-- Job    --> JobRunner::run --> JobReport::into_result
//!          +-- Push | Pull | Untrack | Diff | Log | Show --> GitAdapter
//! ```

pub mod init;
pub mod list;
pub mod plan;


use std::path::Path;
use tracing::debug;

use crate::cli::action::Action;
use crate::config::Config;
use crate::error::Result;
use crate::exec::{Executor, RunContext};
use crate::git::{GitAdapter, ensure_initialized};
use crate::job::{JobRunner, Prompter};

pub use plan::{Plan, plan};

/// Runs one [`Action`] with an executor and a prompter.
pub struct Dispatcher<'a, E: Executor, P: Prompter> {
    config: &'a Config,
    config_path: &'a Path,
    exec: &'a E,
    prompter: &'a P,
}

impl<'a, E: Executor, P: Prompter> Dispatcher<'a, E, P> {
    #[must_use]
    pub const fn new(config: &'a Config, config_path: &'a Path, exec: &'a E, prompter: &'a P) -> Self {
        Self {
            config,
            config_path,
            exec,
            prompter,
        }
    }

    /// Plan and run `action`.
    ///
    /// # Errors
    ///
    /// Returns configuration and validation errors before anything runs,
    /// `ConfigError::NotInitialized` when the root is not a repository, and
    /// execution errors from the action itself.
    pub async fn dispatch(&self, ctx: &RunContext, action: &Action) -> Result<()> {
        let plan = plan(self.config, ctx.root(), action)?;
        debug!(action = %action.describe(), ?plan, "dispatching");

        if plan.needs_repository() {
            ensure_initialized(ctx.root())?;
        }

        let git = GitAdapter::new(self.exec, &self.config.tracked_paths);
        match plan {
            Plan::Init => init::run_init(self.exec, ctx, self.config, self.config_path).await,
            Plan::List => {
                list::print(self.config);
                Ok(())
            }
            Plan::Steps(pipeline) => {
                pipeline.execute(self.exec, ctx, &git).await?;
                Ok(())
            }
            Plan::Job { name, job } => {
                JobRunner::new(self.exec, self.prompter, &self.config.tracked_paths)
                    .run(ctx, name, job)
                    .await?
                    .into_result()?;
                Ok(())
            }
            Plan::Push => git.push(ctx).await,
            Plan::Pull => git.pull(ctx).await,
            Plan::Untrack(paths) => {
                git.untrack(ctx, paths).await?;
                Ok(())
            }
            Plan::Diff => git.diff(ctx).await,
            Plan::Log => git.log(ctx).await,
            Plan::Show => git.show(ctx).await,
        }
    }
}
