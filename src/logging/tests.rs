// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel, open_log_file};
use std::path::Path;

#[test]
fn test_log_level_bounds() {
    assert_eq!(LogLevel::new(6).unwrap(), LogLevel::Dump);
    let err = LogLevel::new(7).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'log_level' in section '[global]': log level must be 0-6, got 7"
    );
    assert_eq!(LogLevel::from_u8(9), None);
    assert_eq!(LogLevel::from_u8(4), Some(LogLevel::Debug));
    assert_eq!(LogLevel::try_from(3).unwrap().as_u8(), 3);
}

#[test]
fn test_directives_keep_gix_quiet_below_dump() {
    let directives: Vec<_> = (0..=6)
        .filter_map(LogLevel::from_u8)
        .map(LogLevel::directives)
        .collect();
    insta::assert_debug_snapshot!(directives, @r#"
    [
        "off",
        "error",
        "warn",
        "warn,baka_rs=info,baka=info",
        "warn,baka_rs=debug,baka=debug",
        "warn,baka_rs=trace,baka=trace",
        "trace",
    ]
    "#);
}

#[test]
fn test_deserialize_from_number() {
    #[derive(serde::Deserialize)]
    struct Global {
        log_level: LogLevel,
    }
    let global: Global = from_override("log_level", 5);
    assert_eq!(global.log_level, LogLevel::Trace);
    assert!(LogLevel::Info < LogLevel::Debug);
    assert_eq!(LogLevel::Info.to_string(), "3");
}

fn from_override<T: serde::de::DeserializeOwned>(key: &str, value: i64) -> T {
    config::Config::builder()
        .set_override(key, value)
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap()
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::Warn);
    assert_eq!(config.file_level(), LogLevel::Debug);
    assert!(config.log_file().is_none());
}

#[test]
fn test_log_config_builder() {
    let config = LogConfig::builder()
        .with_console_level(LogLevel::Trace)
        .maybe_with_log_file(Some("baka.log".into()))
        .build();
    assert_eq!(config.console_level(), LogLevel::Trace);
    assert_eq!(config.log_file(), Some(Path::new("baka.log")));
}

#[test]
fn test_open_log_file_creates_parents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs").join("nested").join("baka.log");
    open_log_file(&path).unwrap();
    assert!(path.is_file());
}
