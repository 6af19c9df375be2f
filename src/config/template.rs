// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Commented configuration template written by `baka --init`.

use std::path::Path;

use anyhow::Context;

use crate::error::Result;

/// Default configuration file contents.
pub const CONFIG_TEMPLATE: &str = r#"# baka configuration
#
# Environment overrides use BAKA_<SECTION>__<KEY>, e.g. BAKA_GLOBAL__EDITOR=vim

# Host paths mirrored into the tracked root before every commit.
tracked_paths = ["/etc", "~/.config"]

[global]
root = "~/.baka"
# editor = "nano"
# log_level = 2
# log_file = "~/.baka/baka-debug.log"

[commands]
install = ["sudo", "apt", "install"]
remove = ["sudo", "apt", "autoremove", "--purge"]
upgrade = ["sh", "-c", "sudo apt update && sudo apt upgrade"]
docker_compose = ["docker", "compose"]
podman_compose = ["podman-compose"]

# [jobs.example]
# commands = ["echo hello", "echo done"]
# interactive = false
# tolerate_nonzero = false
# pause_on_error = false
# auto_yes = false
# verbosity = "debug"
# log_file = "jobs/example %Y-%m-%d %H:%M.log"

[sysck]
# ip_rules_v4 = "sudo cat /etc/iptables/rules.v4"

[scan]
# debsums = "sudo debsums -ac"

[docker]
# media = "~/stacks/media"

[podman]

[files]
# fstab = "/etc/fstab"
"#;

/// Write the template to `path` unless a file already exists there.
///
/// Returns `true` when the file was created.
///
/// # Errors
///
/// Returns an error if the parent directory or the file cannot be written.
pub fn write_if_missing(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, CONFIG_TEMPLATE)
        .with_context(|| format!("failed to write config template to {}", path.display()))?;
    Ok(true)
}
