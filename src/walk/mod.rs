// fsort: extension-based file sorter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Parallel directory walker feeding the copy pipeline.
//!
//! ```text
//! validate_source_root()   exists + is_dir + canonicalize
//!          |
//!          v
//! walk_files()   ignore::WalkParallel (blocking, multi-core)
//!    dir      --> traversed, never sent
//!    file     --> FileEntry --> flume::Sender (bounded, backpressure)
//!    symlink  --> skipped (unless follow_links)
//!    error    --> warn!, counted, walk continues
//! spawn_walk()   walk_files() on tokio's blocking pool
//! ```

mod entry;

pub use entry::{FileEntry, extension_of};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bon::Builder;
use flume::Sender;
use ignore::{WalkBuilder, WalkState};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::{SourceRootError, WalkError};

/// Options for parallel directory traversal.
#[derive(Debug, Clone, Builder)]
pub struct WalkOptions {
    /// Maximum depth to traverse (None = unlimited)
    #[builder(setters(name = with_max_depth))]
    max_depth: Option<usize>,
    /// Follow symbolic links
    #[builder(setters(name = with_follow_links), default = false)]
    follow_links: bool,
    /// Include hidden files/directories
    #[builder(setters(name = with_include_hidden), default = true)]
    include_hidden: bool,
    /// Respect .gitignore and .ignore files
    #[builder(setters(name = with_respect_gitignore), default = false)]
    respect_gitignore: bool,
    /// Number of threads (None = auto-detect based on CPU count)
    #[builder(setters(name = with_threads))]
    threads: Option<usize>,
    /// Directories never descended into (exact path match)
    #[builder(setters(name = with_exclude), default)]
    exclude: Vec<PathBuf>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WalkOptions {
    /// Returns the maximum depth to traverse.
    #[must_use]
    pub const fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Returns whether to follow symbolic links.
    #[must_use]
    pub const fn follow_links(&self) -> bool {
        self.follow_links
    }

    /// Returns whether to include hidden files/directories.
    #[must_use]
    pub const fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    /// Returns whether to respect ignore files.
    #[must_use]
    pub const fn respect_gitignore(&self) -> bool {
        self.respect_gitignore
    }

    /// Returns the number of threads (None = auto-detect).
    #[must_use]
    pub const fn threads(&self) -> Option<usize> {
        self.threads
    }

    /// Returns the excluded directories.
    #[must_use]
    pub fn exclude(&self) -> &[PathBuf] {
        &self.exclude
    }

    /// Adds a directory that must not be descended into.
    pub fn add_exclude(&mut self, path: impl Into<PathBuf>) {
        self.exclude.push(path.into());
    }
}

/// Counters reported once a walk has finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    files: usize,
    skipped: usize,
    errors: usize,
}

impl WalkStats {
    /// Regular files handed to the pipeline.
    #[must_use]
    pub const fn files(&self) -> usize {
        self.files
    }

    /// Entries that are neither regular files nor directories (symlinks, sockets, ...).
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    /// Entries that could not be read.
    #[must_use]
    pub const fn errors(&self) -> usize {
        self.errors
    }
}

/// Checks that `root` is an existing directory and returns its canonical form.
///
/// # Errors
///
/// Returns `NotFound`, `NotADirectory` or `Unreadable`.
pub fn validate_source_root(root: &Path) -> Result<PathBuf, SourceRootError> {
    let display = || root.display().to_string();

    let metadata = match std::fs::metadata(root) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(SourceRootError::NotFound(display()));
        }
        Err(source) => {
            return Err(SourceRootError::Unreadable {
                path: display(),
                source,
            });
        }
    };

    if !metadata.is_dir() {
        return Err(SourceRootError::NotADirectory(display()));
    }

    root.canonicalize()
        .map_err(|source| SourceRootError::Unreadable {
            path: display(),
            source,
        })
}

/// Builds a `WalkBuilder` with the given options, using `filter_entry` for exclusions.
fn build_walker(root: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);

    if let Some(depth) = options.max_depth() {
        builder.max_depth(Some(depth));
    }

    builder.follow_links(options.follow_links());
    builder.hidden(!options.include_hidden());

    // Every ignore source toggles together
    let respect = options.respect_gitignore();
    builder.git_ignore(respect);
    builder.git_global(respect);
    builder.git_exclude(respect);
    builder.ignore(respect);
    builder.parents(respect);

    if let Some(threads) = options.threads() {
        builder.threads(threads);
    }

    // Evaluated BEFORE descending
    if !options.exclude().is_empty() {
        let exclude: Arc<Vec<PathBuf>> = Arc::new(options.exclude().to_vec());
        builder.filter_entry(move |entry| !exclude.iter().any(|dir| entry.path() == dir));
    }

    builder
}

/// Walks `root` in parallel and sends every regular file to `sender`.
///
/// Blocks until the traversal finishes, the token is cancelled, or every
/// receiver has been dropped. Directories are traversed but never sent.
/// Unreadable entries are logged and counted without stopping the walk.
///
/// # Errors
///
/// Returns an error if `root` is not an existing directory.
///
/// # Example
/// ```no_run
/// use fsort::walk::{walk_files, WalkOptions};
/// use tokio_util::sync::CancellationToken;
///
/// let (tx, rx) = flume::unbounded();
/// let stats = walk_files("/path/to/source".as_ref(), &WalkOptions::default(), tx, &CancellationToken::new())?;
/// assert_eq!(rx.len(), stats.files());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn walk_files(
    root: &Path,
    options: &WalkOptions,
    sender: Sender<FileEntry>,
    cancel: &CancellationToken,
) -> Result<WalkStats, SourceRootError> {
    let root = validate_source_root(root)?;

    let files = Arc::new(AtomicUsize::new(0));
    let skipped = Arc::new(AtomicUsize::new(0));
    let errors = Arc::new(AtomicUsize::new(0));

    let parallel = build_walker(&root, options).build_parallel();

    parallel.run(|| {
        let sender = sender.clone();
        let cancel = cancel.clone();
        let files = Arc::clone(&files);
        let skipped = Arc::clone(&skipped);
        let errors = Arc::clone(&errors);

        Box::new(move |entry_result| {
            if cancel.is_cancelled() {
                return WalkState::Quit;
            }

            match entry_result {
                Ok(entry) => {
                    let Some(file_type) = entry.file_type() else {
                        return WalkState::Continue;
                    };

                    if file_type.is_file() {
                        if let Some(file) = FileEntry::from_path(entry.into_path()) {
                            // Receivers gone: the pipeline has stopped
                            if sender.send(file).is_err() {
                                return WalkState::Quit;
                            }
                            files.fetch_add(1, Ordering::Relaxed);
                        }
                    } else if !file_type.is_dir() {
                        debug!(path = %entry.path().display(), "skipping non-regular entry");
                        skipped.fetch_add(1, Ordering::Relaxed);
                    }
                }
                Err(e) => {
                    let e = WalkError::from(e);
                    warn!(error = %e, "walk error");
                    errors.fetch_add(1, Ordering::Relaxed);
                }
            }
            WalkState::Continue
        })
    });

    // Drop our sender so receivers see the end of the stream
    drop(sender);

    Ok(WalkStats {
        files: files.load(Ordering::Relaxed),
        skipped: skipped.load(Ordering::Relaxed),
        errors: errors.load(Ordering::Relaxed),
    })
}

/// Runs [`walk_files`] on tokio's blocking pool.
#[must_use]
pub fn spawn_walk(
    root: PathBuf,
    options: WalkOptions,
    sender: Sender<FileEntry>,
    cancel: CancellationToken,
) -> JoinHandle<Result<WalkStats, SourceRootError>> {
    tokio::task::spawn_blocking(move || walk_files(&root, &options, sender, &cancel))
}

#[cfg(test)]
mod tests;
