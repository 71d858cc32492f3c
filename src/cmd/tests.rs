// fsort: extension-based file sorter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::config::{build_config_loader, load_config};
use super::sort::{EXIT_PARTIAL, EXIT_SUCCESS, exit_status, format_summary, run_sort_command};
use crate::cli::global::GlobalOptions;
use crate::config::Config;
use crate::logging::LogLevel;
use crate::pipeline::RunSummary;

fn isolated_options() -> GlobalOptions {
    GlobalOptions {
        no_default_config: true,
        ..GlobalOptions::default()
    }
}

#[test]
fn test_exit_status() {
    let clean = RunSummary {
        discovered: 3,
        copied: 3,
        ..RunSummary::default()
    };
    let partial = RunSummary {
        discovered: 3,
        copied: 2,
        failed: 1,
        ..RunSummary::default()
    };
    let cancelled = RunSummary {
        cancelled: true,
        ..clean
    };

    assert_eq!(exit_status(&clean, false), EXIT_SUCCESS);
    assert_eq!(exit_status(&partial, false), EXIT_PARTIAL);
    assert_eq!(exit_status(&partial, true), EXIT_SUCCESS);
    assert_eq!(exit_status(&cancelled, true), EXIT_PARTIAL);
}

#[test]
fn test_format_summary() {
    let summary = RunSummary {
        discovered: 5,
        copied: 3,
        failed: 1,
        bytes_copied: 2048,
        skipped: 2,
        walk_errors: 1,
        cancelled: true,
    };
    insta::assert_snapshot!(
        format_summary(&summary, false),
        @"Copied 3 of 5 files (2048 bytes), 1 failed, 2 skipped, 1 unreadable entries, cancelled with 1 not attempted"
    );
    insta::assert_snapshot!(
        format_summary(&RunSummary { discovered: 1, copied: 1, ..RunSummary::default() }, true),
        @"Would copy 1 of 1 files (0 bytes), 0 failed"
    );
}

#[test]
fn test_load_config_applies_flags_over_overrides() {
    let global = GlobalOptions {
        options: vec!["sort.workers=3".to_string(), "sort/chunk_size=512".to_string()],
        workers: Some(7),
        dry: true,
        log_level: Some(4),
        ..isolated_options()
    };

    let config = load_config(&global).unwrap();

    assert_eq!(config.sort.workers, Some(7));
    assert_eq!(config.sort.chunk_size, 512);
    assert!(config.sort.dry);
    assert_eq!(config.log.level, LogLevel::DEBUG);
    assert_eq!(config.log.file_level, LogLevel::DEBUG);
}

#[test]
fn test_load_config_reads_config_files_in_order() {
    let temp = tempfile::tempdir().unwrap();
    let first = temp.path().join("first.toml");
    let second = temp.path().join("second.toml");
    std::fs::write(&first, "[sort]\nchunk_size = 4096\nfsync = true\n").unwrap();
    std::fs::write(&second, "[sort]\nchunk_size = 8192\n").unwrap();

    let global = GlobalOptions {
        configs: vec![first, second],
        ..isolated_options()
    };
    let config = load_config(&global).unwrap();

    assert_eq!(config.sort.chunk_size, 8192);
    assert!(config.sort.fsync);
}

#[test]
fn test_load_config_rejects_invalid_values() {
    let global = GlobalOptions {
        options: vec!["sort.queue_capacity=0".to_string()],
        ..isolated_options()
    };
    let err = load_config(&global).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'queue_capacity' in section '[sort]': must be at least 1"
    );
}

#[test]
fn test_build_config_loader_rejects_malformed_override() {
    let global = GlobalOptions {
        options: vec!["workers".to_string()],
        ..isolated_options()
    };
    let err = build_config_loader(&global).err().unwrap();
    insta::assert_snapshot!(err.to_string(), @"invalid override 'workers', expected KEY=VALUE");
}

#[tokio::test]
async fn test_run_sort_command_reports_summary() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    std::fs::write(src.path().join("a.txt"), "hello").unwrap();
    std::fs::write(src.path().join("b.TXT"), "world").unwrap();

    let summary = run_sort_command(src.path(), out.path(), &Config::default(), true)
        .await
        .unwrap();

    assert_eq!(summary.copied, 2);
    assert_eq!(summary.bytes_copied, 10);
    assert!(out.path().join("txt/b.TXT").is_file());
}

#[tokio::test]
async fn test_run_sort_command_fails_on_missing_source() {
    let out = tempfile::tempdir().unwrap();
    let err = run_sort_command(
        &out.path().join("missing"),
        out.path(),
        &Config::default(),
        false,
    )
    .await
    .unwrap_err();

    assert!(err.to_string().starts_with("failed to sort"));
    assert!(format!("{err:#}").contains("source root does not exist"));
}
