// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              BakaError (~24 bytes)
//!                     |
//!      +--------+-----+------+------+
//!      |        |            |      |
//!      v        v            v      v
//!    Config  Execution  Validation  Io/Other
//!     Box      Box         Box      Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Config      Read, Parse, InvalidValue, UnknownJob,
//!               UnknownEntry, NotInitialized, NoHome
//!   Execution   SpawnFailed, NonZeroExit, JobAborted
//!   Validation  EmptyMessage, InvalidArgument
//!
//! All variants boxed => BakaError fits in 24 bytes.
//! ```
//!
//! Handlers work with [`Result`] (anyhow) and attach context; the typed
//! errors stay reachable through `anyhow::Error::downcast_ref::<BakaError>()`.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`BakaError`].
pub type BakaResult<T> = std::result::Result<T, BakaError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum BakaError {
    /// Configuration error (fatal, raised before side effects).
    #[error("configuration error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// An external command failed.
    #[error("execution error: {0}")]
    Execution(#[from] Box<ExecutionError>),

    /// Bad user input.
    #[error("validation error: {0}")]
    Validation(#[from] Box<ValidationError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

impl BakaError {
    /// Returns the configuration error, if this is one.
    #[must_use]
    pub fn as_config(&self) -> Option<&ConfigError> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the execution error, if this is one.
    #[must_use]
    pub fn as_execution(&self) -> Option<&ExecutionError> {
        match self {
            Self::Execution(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the validation error, if this is one.
    #[must_use]
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(e) => Some(e),
            _ => None,
        }
    }
}

/// Create a [`BakaError::Other`] from a message.
pub fn other(message: impl Into<String>) -> BakaError {
    BakaError::Other(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for BakaError {
                fn from(err: $error) -> Self {
                    BakaError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConfigError => Config,
    ExecutionError => Execution,
    ValidationError => Validation,
    std::io::Error => Io,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or write a configuration file.
    #[error("failed to access config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse or deserialize configuration.
    #[error("failed to parse configuration: {message}")]
    Parse { message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Job name not present in `[jobs]`.
    #[error("job '{name}' is not defined in the configuration")]
    UnknownJob { name: String },

    /// Entry name not present in a named section (`[docker]`, `[files]`, ...).
    #[error("no entry matching '{name}' in section '[{section}]'")]
    UnknownEntry { section: String, name: String },

    /// The tracked root is not a git working tree.
    #[error("'{path}' is not a baka repository, run `baka --init` first")]
    NotInitialized { path: String },

    /// Home directory could not be determined (needed to expand `~`).
    #[error("could not determine the home directory")]
    NoHome,
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        Self::Parse {
            message: err.to_string(),
        }
    }
}

// --- Execution Errors ---

/// External command errors.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// The program could not be started (not found, not executable, ...).
    #[error("failed to run '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The program exited with a non-zero status.
    #[error("'{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },

    /// A job stopped before running all of its commands.
    #[error("job '{job}' aborted at step {step}: {command}")]
    JobAborted {
        job: String,
        step: usize,
        command: String,
    },
}

// --- Validation Errors ---

/// User input errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Commit message is empty or whitespace.
    #[error("commit message must not be empty")]
    EmptyMessage,

    /// An argument has an unexpected value.
    #[error("invalid {what}: {message}")]
    InvalidArgument { what: String, message: String },
}

#[cfg(test)]
mod tests;
