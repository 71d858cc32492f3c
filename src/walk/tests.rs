// fsort: extension-based file sorter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{FileEntry, WalkOptions, extension_of, spawn_walk, validate_source_root, walk_files};
use crate::error::SourceRootError;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn collect_names(root: &Path, options: &WalkOptions) -> (Vec<String>, super::WalkStats) {
    let (tx, rx) = flume::unbounded();
    let stats = walk_files(root, options, tx, &CancellationToken::new()).unwrap();
    let mut names: Vec<String> = rx
        .drain()
        .map(|entry| entry.name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    (names, stats)
}

#[test]
fn test_extension_of() {
    let cases = [
        ("a.txt", "txt"),
        ("FILE.TXT", "txt"),
        ("archive.tar.GZ", "gz"),
        ("README", ""),
        (".bashrc", ""),
        ("trailing.", ""),
        ("dir.d/noext", ""),
    ];
    for (path, expected) in cases {
        assert_eq!(extension_of(Path::new(path)), expected, "extension of {path}");
    }
}

#[test]
fn test_file_entry_from_path() {
    let entry = FileEntry::from_path("/src/docs/Report.PDF").unwrap();
    assert_eq!(entry.path(), Path::new("/src/docs/Report.PDF"));
    assert_eq!(entry.name(), "Report.PDF");
    assert_eq!(entry.extension(), "pdf");

    assert!(FileEntry::from_path("/").is_none());
}

#[test]
fn test_validate_source_root() {
    let temp = temp_dir();
    let file = temp.path().join("plain.txt");
    std::fs::write(&file, "x").unwrap();

    let canonical = validate_source_root(temp.path()).unwrap();
    assert_eq!(canonical, temp.path().canonicalize().unwrap());

    assert!(matches!(
        validate_source_root(&temp.path().join("missing")),
        Err(SourceRootError::NotFound(_))
    ));
    assert!(matches!(
        validate_source_root(&file),
        Err(SourceRootError::NotADirectory(_))
    ));
}

#[test]
fn test_walk_files_recurses_and_skips_directories() {
    let temp = temp_dir();
    std::fs::create_dir_all(temp.path().join("a/b/c")).unwrap();
    std::fs::write(temp.path().join("top.txt"), "").unwrap();
    std::fs::write(temp.path().join("a/one.md"), "").unwrap();
    std::fs::write(temp.path().join("a/b/c/deep.rs"), "").unwrap();
    std::fs::create_dir(temp.path().join("empty.dir")).unwrap();

    let (names, stats) = collect_names(temp.path(), &WalkOptions::default());

    assert_eq!(names, ["deep.rs", "one.md", "top.txt"]);
    assert_eq!(stats.files(), 3);
    assert_eq!(stats.errors(), 0);
}

#[test]
fn test_walk_files_includes_hidden_and_ignored_by_default() {
    let temp = temp_dir();
    std::fs::write(temp.path().join(".hidden"), "").unwrap();
    std::fs::write(temp.path().join(".gitignore"), "ignored.log\n").unwrap();
    std::fs::write(temp.path().join("ignored.log"), "").unwrap();

    let (names, _) = collect_names(temp.path(), &WalkOptions::default());
    assert_eq!(names, [".gitignore", ".hidden", "ignored.log"]);

    let strict = WalkOptions::builder()
        .with_include_hidden(false)
        .with_respect_gitignore(true)
        .build();
    let (names, _) = collect_names(temp.path(), &strict);
    // .gitignore is only honoured inside a git repository
    assert!(!names.contains(&".hidden".to_string()));
}

#[test]
fn test_walk_files_max_depth() {
    let temp = temp_dir();
    std::fs::create_dir(temp.path().join("sub")).unwrap();
    std::fs::write(temp.path().join("root.txt"), "").unwrap();
    std::fs::write(temp.path().join("sub/nested.txt"), "").unwrap();

    let options = WalkOptions::builder().with_max_depth(1).build();
    let (names, _) = collect_names(temp.path(), &options);
    assert_eq!(names, ["root.txt"]);
}

#[test]
fn test_walk_files_excludes_directories() {
    let temp = temp_dir();
    let root = temp.path().canonicalize().unwrap();
    std::fs::create_dir(root.join("out")).unwrap();
    std::fs::write(root.join("keep.txt"), "").unwrap();
    std::fs::write(root.join("out/copied.txt"), "").unwrap();

    let mut options = WalkOptions::default();
    options.add_exclude(root.join("out"));
    let (names, _) = collect_names(&root, &options);
    assert_eq!(names, ["keep.txt"]);
}

#[test]
fn test_walk_files_rejects_missing_root() {
    let temp = temp_dir();
    let (tx, _rx) = flume::unbounded();
    let result = walk_files(
        &temp.path().join("nope"),
        &WalkOptions::default(),
        tx,
        &CancellationToken::new(),
    );
    assert!(matches!(result, Err(SourceRootError::NotFound(_))));
}

#[test]
fn test_walk_files_cancelled_sends_nothing() {
    let temp = temp_dir();
    std::fs::write(temp.path().join("a.txt"), "").unwrap();

    let token = CancellationToken::new();
    token.cancel();
    let (tx, rx) = flume::unbounded();
    let stats = walk_files(temp.path(), &WalkOptions::default(), tx, &token).unwrap();

    assert_eq!(stats.files(), 0);
    assert!(rx.is_empty());
}

#[test]
fn test_walk_files_stops_when_receiver_dropped() {
    let temp = temp_dir();
    for i in 0..20 {
        std::fs::write(temp.path().join(format!("f{i}.txt")), "").unwrap();
    }

    let (tx, rx) = flume::bounded(1);
    drop(rx);
    let stats = walk_files(
        temp.path(),
        &WalkOptions::default(),
        tx,
        &CancellationToken::new(),
    )
    .unwrap();
    assert_eq!(stats.files(), 0);
}

#[cfg(unix)]
#[test]
fn test_walk_files_skips_symlinks() {
    let temp = temp_dir();
    let outside = temp_dir();
    std::fs::write(outside.path().join("target.txt"), "").unwrap();
    std::fs::create_dir(outside.path().join("linked_dir")).unwrap();
    std::fs::write(outside.path().join("linked_dir/inner.txt"), "").unwrap();

    std::fs::write(temp.path().join("real.txt"), "").unwrap();
    std::os::unix::fs::symlink(
        outside.path().join("target.txt"),
        temp.path().join("link.txt"),
    )
    .unwrap();
    std::os::unix::fs::symlink(outside.path().join("linked_dir"), temp.path().join("dir")).unwrap();
    // Self-referencing loop
    std::os::unix::fs::symlink(temp.path(), temp.path().join("loop")).unwrap();

    let (names, stats) = collect_names(temp.path(), &WalkOptions::default());
    assert_eq!(names, ["real.txt"]);
    assert_eq!(stats.skipped(), 3);
}

#[cfg(unix)]
#[test]
fn test_walk_files_follow_links_reports_loops() {
    let temp = temp_dir();
    std::fs::create_dir(temp.path().join("sub")).unwrap();
    std::fs::write(temp.path().join("sub/file.txt"), "").unwrap();
    std::os::unix::fs::symlink(temp.path(), temp.path().join("sub/loop")).unwrap();

    let options = WalkOptions::builder().with_follow_links(true).build();
    let (names, stats) = collect_names(temp.path(), &options);

    assert_eq!(names, ["file.txt"]);
    assert_eq!(stats.errors(), 1);
}

#[tokio::test]
async fn test_spawn_walk_streams_to_async_receiver() {
    let temp = temp_dir();
    std::fs::write(temp.path().join("a.txt"), "").unwrap();
    std::fs::write(temp.path().join("b.txt"), "").unwrap();

    let (tx, rx) = flume::bounded(1);
    let handle = spawn_walk(
        temp.path().to_path_buf(),
        WalkOptions::default(),
        tx,
        CancellationToken::new(),
    );

    let mut received: Vec<PathBuf> = Vec::new();
    while let Ok(entry) = rx.recv_async().await {
        received.push(entry.path().to_path_buf());
    }
    let stats = handle.await.unwrap().unwrap();

    assert_eq!(received.len(), 2);
    assert_eq!(stats.files(), 2);
}
