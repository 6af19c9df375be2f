// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{BakaError, BakaResult, ConfigError, ExecutionError, ValidationError};

#[test]
fn test_config_error_display() {
    let err = ConfigError::UnknownJob {
        name: "nightly".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"job 'nightly' is not defined in the configuration");
}

#[test]
fn test_not_initialized_display() {
    let err: BakaError = ConfigError::NotInitialized {
        path: "/root/.baka".to_string(),
    }
    .into();
    insta::assert_snapshot!(
        err.to_string(),
        @"configuration error: '/root/.baka' is not a baka repository, run `baka --init` first"
    );
}

#[test]
fn test_execution_error_display() {
    let err: BakaError = ExecutionError::NonZeroExit {
        command: "git push".to_string(),
        code: 128,
    }
    .into();
    insta::assert_snapshot!(err.to_string(), @"execution error: 'git push' exited with code 128");
}

#[test]
fn test_accessors_pick_matching_variant() {
    let err: BakaError = ValidationError::EmptyMessage.into();
    assert!(err.as_validation().is_some());
    assert!(err.as_config().is_none());
    assert!(err.as_execution().is_none());
}

#[test]
fn test_downcast_through_anyhow() {
    let err: anyhow::Error = anyhow::Error::from(BakaError::from(ConfigError::NoHome))
        .context("loading configuration");
    let baka = err
        .downcast_ref::<BakaError>()
        .expect("typed error should survive context");
    assert!(matches!(baka.as_config(), Some(ConfigError::NoHome)));
}

#[test]
fn test_baka_error_size() {
    let size = std::mem::size_of::<BakaError>();
    assert!(size <= 24, "BakaError is {size} bytes, expected <= 24");
}

#[test]
fn test_baka_result_size() {
    let size = std::mem::size_of::<BakaResult<()>>();
    assert!(size <= 24, "BakaResult<()> is {size} bytes, expected <= 24");
}
