// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered configuration.
//!
//! ```text
//! defaults (serde)
//!   < add_toml_file / add_toml_file_optional   -c FILE, $BAKARC, ~/.baka/config.toml
//!   < add_toml_str                             inline TOML
//!   < with_env_prefix("BAKA")                  BAKA_GLOBAL__EDITOR=nano
//!   < set(key, value)                          -l, --log-file
//!        |
//!      build() --> Config, `~` expanded and validated
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use config::{Environment, File, FileFormat};

use super::Config;
use crate::error::{BakaError, ConfigError, Result};

/// One layer, kept for the debug listing.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    File { path: PathBuf, required: bool },
    Inline,
    Env { prefix: String },
    Override { key: String },
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File { path, required } => {
                let kind = if *required { "file" } else { "optional" };
                write!(f, "[{kind}] {}", path.display())
            }
            Self::Inline => f.write_str("[inline]"),
            Self::Env { prefix } => write!(f, "[env] {prefix}_*"),
            Self::Override { key } => write!(f, "[flag] {key}"),
        }
    }
}

fn parse_error(err: config::ConfigError) -> BakaError {
    ConfigError::from(err).into()
}

/// Accumulates sources; later ones win.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    sources: Vec<Source>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            sources: Vec::new(),
        }
    }

    fn file(mut self, path: &Path, required: bool) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(required));
        if required || path.exists() {
            self.sources.push(Source::File {
                path: path.to_path_buf(),
                required,
            });
        }
        self
    }

    /// A TOML file that must exist.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.file(path.as_ref(), true)
    }

    /// A TOML file that is skipped when absent.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(self, path: P) -> Self {
        self.file(path.as_ref(), false)
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.sources.push(Source::Inline);
        self
    }

    /// Read `<PREFIX>_<SECTION>__<KEY>` variables at build time.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self.sources.push(Source::Env {
            prefix: prefix.to_string(),
        });
        self
    }

    /// Override one dotted key, above every other source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the key is malformed.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(parse_error)?;
        self.sources.push(Source::Override {
            key: key.to_string(),
        });
        Ok(self)
    }

    /// Sources in precedence order, lowest first, for the debug log.
    #[must_use]
    pub fn describe_sources(&self) -> Vec<String> {
        self.sources.iter().map(ToString::to_string).collect()
    }

    /// Merge, deserialize, expand `~` and validate.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for a missing required file, bad TOML or a
    /// value of the wrong shape, and `ConfigError::InvalidValue` when
    /// validation rejects the result.
    pub fn build(self) -> Result<Config> {
        let mut builder = self.builder;
        if let Some(prefix) = &self.env_prefix {
            builder = builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        }
        let mut config: Config = builder
            .build()
            .and_then(config::Config::try_deserialize)
            .map_err(parse_error)?;
        config.resolve_and_validate()?;
        Ok(config)
    }
}
