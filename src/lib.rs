// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)         cmd (dispatcher)
//!             Action enum        plan --> run
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  TOML + BAKA_* env, jobs  |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!               job       pipeline    git
//!            runner +    fixed verbs  adapter (CLI)
//!            prompts          |       queries (gix)
//!                 |           |        |
//!                 +-----------+--------+
//!                             v
//!                 exec (Executor, dry-run)     mirror (rsync)
//!
//!   +-----------------------------------------+
//!   |  core   process spawning and streams    |
//!   +-----------------------------------------+
//!   |  foundation  error, logging, output,    |
//!   |              history                    |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod exec;
pub mod git;
pub mod history;
pub mod job;
pub mod logging;
pub mod mirror;
pub mod output;
pub mod pipeline;
