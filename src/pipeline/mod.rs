// fsort: extension-based file sorter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Walker-to-worker pipeline.
//!
//! ```text
//! Sorter::new(source, output, options)
//!   .with_cancel_token()
//!   .run().await
//!       validate source root      (fatal)
//!       create output root        (fatal)
//!       spawn_walk() --flume::bounded(queue_capacity)--> N workers
//!                                                        Copier::copy()
//!       join all --> RunSummary
//!
//! Cancellation: walker quits, workers stop taking new entries,
//! in-flight copies finish.
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bon::Builder;
use flume::Receiver;
use serde::Serialize;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::config::types::DEFAULT_QUEUE_CAPACITY;
use crate::copy::{Copier, CopyRecord, CopySettings};
use crate::error::{OutputRootError, SortError, SortResult};
use crate::walk::{self, FileEntry, WalkOptions, WalkStats};

/// Options for a sort run.
#[derive(Debug, Clone, Builder)]
pub struct SortOptions {
    /// Number of concurrent copy workers
    #[builder(setters(name = with_workers), default = 4)]
    workers: usize,
    /// Capacity of the walker-to-worker queue
    #[builder(setters(name = with_queue_capacity), default = DEFAULT_QUEUE_CAPACITY)]
    queue_capacity: usize,
    /// Per-file copy settings
    #[builder(setters(name = with_copy), default)]
    copy: CopySettings,
    /// Traversal settings
    #[builder(setters(name = with_walk), default)]
    walk: WalkOptions,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl SortOptions {
    /// Returns the worker count, never less than one.
    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers.max(1)
    }

    /// Returns the queue capacity, never less than one.
    #[must_use]
    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity.max(1)
    }

    #[must_use]
    pub const fn copy(&self) -> &CopySettings {
        &self.copy
    }

    #[must_use]
    pub const fn walk(&self) -> &WalkOptions {
        &self.walk
    }
}

/// Aggregated result of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Regular files handed to the workers.
    pub discovered: usize,
    /// Files copied successfully (or planned, in a dry run).
    pub copied: usize,
    /// Files whose copy failed.
    pub failed: usize,
    /// Total bytes written.
    pub bytes_copied: u64,
    /// Non-regular entries left alone (symlinks, sockets, ...).
    pub skipped: usize,
    /// Entries the walker could not read.
    pub walk_errors: usize,
    /// Whether the run was cancelled before finishing.
    pub cancelled: bool,
}

impl RunSummary {
    fn from_walk(stats: &WalkStats) -> Self {
        Self {
            discovered: stats.files(),
            skipped: stats.skipped(),
            walk_errors: stats.errors(),
            ..Self::default()
        }
    }

    fn absorb(&mut self, tally: WorkerTally) {
        self.copied += tally.copied;
        self.failed += tally.failed;
        self.bytes_copied += tally.bytes;
    }

    /// Returns true if at least one copy failed.
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Files discovered but never attempted (only non-zero after cancellation).
    #[must_use]
    pub const fn not_attempted(&self) -> usize {
        self.discovered
            .saturating_sub(self.copied)
            .saturating_sub(self.failed)
    }
}

/// Per-worker counters, merged after the worker exits.
#[derive(Debug, Default)]
struct WorkerTally {
    copied: usize,
    failed: usize,
    bytes: u64,
}

impl WorkerTally {
    fn record(&mut self, record: &CopyRecord) {
        match record.outcome() {
            Ok(bytes) => {
                self.copied += 1;
                self.bytes += bytes;
            }
            Err(_) => self.failed += 1,
        }
    }
}

/// Sorts every regular file under a source root into extension buckets.
pub struct Sorter {
    source: PathBuf,
    output: PathBuf,
    options: SortOptions,
    cancel_token: CancellationToken,
}

impl Sorter {
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, output: impl Into<PathBuf>, options: SortOptions) -> Self {
        Self {
            source: source.into(),
            output: output.into(),
            options,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Uses an externally owned cancellation token.
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    /// Returns the cancellation token for sharing with signal handlers.
    ///
    /// Cancelling it stops new copies from starting; in-flight ones finish.
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Runs the walk and the copy workers to completion.
    ///
    /// Per-file failures are counted in the summary, never returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the source root is invalid, the output root cannot be
    /// prepared, or the walker task panics.
    pub async fn run(&self) -> SortResult<RunSummary> {
        let source = walk::validate_source_root(&self.source)?;
        let output = prepare_output_root(&self.output, self.options.copy().dry_run()).await?;

        if output == source {
            return Err(OutputRootError::SameAsSource(source.display().to_string()).into());
        }

        let mut walk_options = self.options.walk().clone();
        if output.starts_with(&source) {
            debug!(output = %output.display(), "output root is inside the source root, excluding it");
            walk_options.add_exclude(output.clone());
        }

        info!(
            source = %source.display(),
            output = %output.display(),
            workers = self.options.workers(),
            "Starting sort"
        );

        let (sender, receiver) = flume::bounded::<FileEntry>(self.options.queue_capacity());
        let walker = walk::spawn_walk(source, walk_options, sender, self.cancel_token.clone());

        let copier = Arc::new(Copier::new(output, self.options.copy().clone()));
        let mut workers = JoinSet::new();
        for id in 0..self.options.workers() {
            workers.spawn(run_worker(
                id,
                receiver.clone(),
                Arc::clone(&copier),
                self.cancel_token.clone(),
            ));
        }
        // Workers hold the only receivers, so the walker stops if they all exit
        drop(receiver);

        let walk_stats = match walker.await {
            Ok(stats) => stats?,
            Err(e) => return Err(SortError::from(io::Error::other(e))),
        };

        let mut summary = RunSummary::from_walk(&walk_stats);
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(tally) => summary.absorb(tally),
                Err(e) => error!(error = %e, "copy worker terminated abnormally"),
            }
        }
        summary.cancelled = self.cancel_token.is_cancelled();

        info!(
            discovered = summary.discovered,
            copied = summary.copied,
            failed = summary.failed,
            bytes = summary.bytes_copied,
            walk_errors = summary.walk_errors,
            cancelled = summary.cancelled,
            "Sort finished"
        );
        Ok(summary)
    }
}

async fn run_worker(
    id: usize,
    receiver: Receiver<FileEntry>,
    copier: Arc<Copier>,
    cancel: CancellationToken,
) -> WorkerTally {
    let mut tally = WorkerTally::default();

    loop {
        let entry = tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            received = receiver.recv_async() => match received {
                Ok(entry) => entry,
                Err(_) => break,
            },
        };

        let record = copier.copy(&entry).await;
        tally.record(&record);
    }

    debug!(
        worker = id,
        copied = tally.copied,
        failed = tally.failed,
        "worker finished"
    );
    tally
}

/// Creates the output root (unless dry-running) and returns its absolute form.
async fn prepare_output_root(path: &Path, dry_run: bool) -> SortResult<PathBuf> {
    let fail = |source| OutputRootError::Create {
        path: path.display().to_string(),
        source,
    };

    if !dry_run {
        tokio::fs::create_dir_all(path).await.map_err(fail)?;
    }

    match tokio::fs::canonicalize(path).await {
        Ok(resolved) => Ok(resolved),
        Err(e) if dry_run && e.kind() == io::ErrorKind::NotFound => {
            Ok(std::path::absolute(path).map_err(fail)?)
        }
        Err(e) => Err(fail(e).into()),
    }
}
