// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path helpers.
//!
//! ```text
//! ~/.baka/              (global.root, git repository)
//!   config.toml         (default config file)
//!   history.log         (action history, git-ignored)
//!   etc/ home/...       (mirrors of tracked_paths)
//!   files/<name>/       (--file save)
//!   sysck/ scan/        (check output)
//! ```
//!
//! A leading `~` is expanded with the `home` crate; other paths are kept as-is.

use std::path::{Component, Path, PathBuf};

use crate::error::{BakaError, ConfigError, Result};

/// Default tracked root, relative to the home directory.
pub const DEFAULT_ROOT: &str = "~/.baka";

/// Name of the config file inside the default root.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Expand a leading `~` or `~/` to the home directory.
///
/// # Errors
///
/// Returns `ConfigError::NoHome` if the path starts with `~` and the home
/// directory cannot be determined.
pub fn expand_home(path: &Path) -> Result<PathBuf> {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => {
            let home = home::home_dir().ok_or_else(|| BakaError::from(ConfigError::NoHome))?;
            Ok(home.join(components.as_path()))
        }
        _ => Ok(path.to_path_buf()),
    }
}

/// Default configuration file location (`~/.baka/config.toml`).
///
/// # Errors
///
/// Returns `ConfigError::NoHome` if the home directory cannot be determined.
pub fn default_config_path() -> Result<PathBuf> {
    Ok(expand_home(Path::new(DEFAULT_ROOT))?.join(CONFIG_FILE_NAME))
}

/// Where a tracked host path is mirrored inside the root.
///
/// `/etc` lands in `<root>/etc`, `/home/me/.config` in `<root>/home/me/.config`.
#[must_use]
pub fn mirror_destination(root: &Path, tracked: &Path) -> PathBuf {
    let relative: PathBuf = tracked
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect();
    root.join(relative)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home_leaves_absolute_paths() {
        let path = expand_home(Path::new("/etc/fstab")).unwrap();
        assert_eq!(path, PathBuf::from("/etc/fstab"));
    }

    #[test]
    fn test_expand_home_replaces_tilde() {
        let Some(home) = home::home_dir() else {
            return;
        };
        assert_eq!(expand_home(Path::new("~")).unwrap(), home);
        assert_eq!(
            expand_home(Path::new("~/.config")).unwrap(),
            home.join(".config")
        );
    }

    #[test]
    fn test_expand_home_ignores_tilde_user_prefix() {
        let path = expand_home(Path::new("~other/x")).unwrap();
        assert_eq!(path, PathBuf::from("~other/x"));
    }

    #[test]
    fn test_mirror_destination() {
        let root = Path::new("/srv/baka");
        assert_eq!(
            mirror_destination(root, Path::new("/etc")),
            PathBuf::from("/srv/baka/etc")
        );
        assert_eq!(
            mirror_destination(root, Path::new("/home/me/.config/")),
            PathBuf::from("/srv/baka/home/me/.config")
        );
    }
}
