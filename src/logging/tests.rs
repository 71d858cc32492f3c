// fsort: extension-based file sorter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel, init_logging};
use crate::config::types::LogSettings;
use std::path::Path;

#[test]
fn test_log_level_from_u8() {
    assert_eq!(LogLevel::from_u8(0), Some(LogLevel::SILENT));
    assert_eq!(LogLevel::from_u8(3), Some(LogLevel::INFO));
    assert_eq!(LogLevel::from_u8(5), Some(LogLevel::TRACE));
    assert_eq!(LogLevel::from_u8(6), None);
}

#[test]
fn test_log_level_out_of_range() {
    let err = LogLevel::new(9).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"invalid value for 'level' in section '[log]': log level must be 0-5, got 9");
}

#[test]
fn test_log_level_directives() {
    let filters: Vec<_> = (0..=5)
        .filter_map(LogLevel::from_u8)
        .map(LogLevel::directive)
        .collect();
    assert_eq!(filters, ["off", "error", "warn", "info", "debug", "trace"]);
}

#[test]
fn test_log_level_serde() {
    let level: LogLevel = serde_json::from_str("4").unwrap();
    assert_eq!(level, LogLevel::DEBUG);
    assert_eq!(serde_json::to_string(&level).unwrap(), "4");
    assert!(serde_json::from_str::<LogLevel>("7").is_err());
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::DEBUG);
    assert!(config.log_file().is_none());
}

#[test]
fn test_log_config_from_settings() {
    let settings = LogSettings {
        level: LogLevel::WARN,
        file_level: LogLevel::TRACE,
        file: Some("logs/run.log".into()),
    };
    let config = LogConfig::from(&settings);

    assert_eq!(config.console_level(), LogLevel::WARN);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert_eq!(config.log_file(), Some(Path::new("logs/run.log")));
}

#[test]
fn test_init_logging_creates_log_file() {
    let temp = tempfile::tempdir().unwrap();
    let log_path = temp.path().join("logs/fsort.log");

    let config = LogConfig::builder()
        .with_console_level(LogLevel::SILENT)
        .with_log_file(log_path.clone())
        .build();

    let guard = init_logging(&config).unwrap();
    tracing::info!("hello from the test");
    drop(guard);

    assert!(log_path.exists());
}
