// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning on tokio.
//!
//! ```text
//! ProcessBuilder::new("rsync")
//!   .args() .cwd() .stdin() .stdout() .stderr()
//!   .run().await
//!       --> ProcessOutput { exit_code, stdout, stderr }
//! ```
//!
//! Only [`crate::exec::SystemExecutor`] builds processes; everything else
//! goes through an [`crate::exec::Executor`].

pub mod builder;
mod io;
mod runner;
#[cfg(test)]
mod tests;
