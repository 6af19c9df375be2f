// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Dispatcher --> history.log
//! ```

use std::path::Path;
use std::process::ExitCode;

use baka_rs::cli::{self, action::Action, global::GlobalOptions};
use baka_rs::cmd::Dispatcher;
use baka_rs::config::Config;
use baka_rs::config::loader::ConfigLoader;
use baka_rs::config::paths::default_config_path;
use baka_rs::error::Result;
use baka_rs::exec::{RunContext, SystemExecutor};
use baka_rs::history;
use baka_rs::job::StdinPrompter;
use baka_rs::logging::{LogConfig, LogGuard, init_logging};
use baka_rs::output::Output;
use tracing::{debug, warn};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Output::error(format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let (global, action, modifiers) = cli::parse().into_parts()?;

    let config_path = match &global.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };
    let loader = build_config_loader(&global, &config_path, &action)?;
    let sources = loader.describe_sources();
    let config = loader.build()?;

    let _log_guard = init_logging_from(&config)?;
    debug!(?sources, "configuration loaded");

    let ctx = RunContext::new(config.root())
        .with_dry_run(global.dry_run)
        .with_modifiers(modifiers);
    let result = Dispatcher::new(&config, &config_path, &SystemExecutor, &StdinPrompter)
        .dispatch(&ctx, &action)
        .await;

    record_history(&ctx, &action, result.as_ref().err());
    result
}

/// Defaults, then the config file, then `BAKA_*` variables, then CLI flags.
///
/// The file is required only when named explicitly, except for `--init`,
/// which creates it.
fn build_config_loader(
    global: &GlobalOptions,
    config_path: &Path,
    action: &Action,
) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new();
    loader = if global.config.is_some() && *action != Action::Init {
        loader.add_toml_file(config_path)
    } else {
        loader.add_toml_file_optional(config_path)
    };
    loader = loader.with_env_prefix("BAKA");
    for (key, value) in global.to_config_overrides() {
        loader = loader.set(key, value)?;
    }
    Ok(loader)
}

fn init_logging_from(config: &Config) -> Result<LogGuard> {
    let log_config = LogConfig::builder()
        .with_console_level(config.global.log_level)
        .maybe_with_log_file(config.global.log_file.clone())
        .build();
    init_logging(&log_config)
}

fn record_history(ctx: &RunContext, action: &Action, error: Option<&anyhow::Error>) {
    if ctx.is_dry_run() || action.is_read_only() || !ctx.root().is_dir() {
        return;
    }
    let error = error.map(|e| format!("{e:#}"));
    if let Err(err) = history::append(ctx.root(), &action.describe(), error.as_deref()) {
        warn!(error = %err, "could not write history");
    }
}
