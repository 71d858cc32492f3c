// fsort: extension-based file sorter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io;
use std::path::PathBuf;

use super::{ConfigError, CopyError, SortError, SortResult, SourceRootError};

#[test]
fn test_config_error_display() {
    let err = ConfigError::InvalidValue {
        section: "sort".to_string(),
        key: "workers".to_string(),
        message: "must be at least 1".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"invalid value for 'workers' in section '[sort]': must be at least 1");
}

#[test]
fn test_source_root_error_wrapped() {
    let err: SortError = SourceRootError::NotFound("/missing".to_string()).into();
    insta::assert_snapshot!(err.to_string(), @"invalid source root: source root does not exist: /missing");
}

#[test]
fn test_copy_error_display() {
    let err = CopyError::Bucket {
        path: PathBuf::from("out/txt"),
        source: io::Error::new(io::ErrorKind::AlreadyExists, "file exists"),
    };
    insta::assert_snapshot!(err.to_string(), @"cannot create bucket directory 'out/txt': file exists");
    assert_eq!(err.path(), PathBuf::from("out/txt"));
}

#[test]
fn test_copy_error_path() {
    let io_err = || io::Error::other("boom");

    let read = CopyError::Read {
        path: PathBuf::from("src/a.txt"),
        source: io_err(),
    };
    let rename = CopyError::Rename {
        path: PathBuf::from("out/txt/a.txt"),
        source: io::Error::new(io::ErrorKind::IsADirectory, "is a directory"),
    };

    assert_eq!(read.path(), PathBuf::from("src/a.txt"));
    assert_eq!(rename.path(), PathBuf::from("out/txt/a.txt"));
    insta::assert_snapshot!(rename.to_string(), @"cannot replace 'out/txt/a.txt': is a directory");
}

#[test]
fn test_sort_error_size() {
    // Every variant holds a single Box
    let size = std::mem::size_of::<SortError>();
    assert!(size <= 24, "SortError is {size} bytes, expected <= 24");
}

#[test]
fn test_sort_result_size() {
    let size = std::mem::size_of::<SortResult<()>>();
    assert!(size <= 24, "SortResult<()> is {size} bytes, expected <= 24");
}
