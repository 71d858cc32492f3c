// fsort: extension-based file sorter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-file copy into an extension bucket.
//!
//! ```text
//! Copier::copy(entry)
//!   bucket_dir()        <output>/<ext>   ("" ext -> no_extension_bucket)
//!   ensure_bucket()     create_dir_all, idempotent
//!   File::open(src)     read only, never modified
//!   stage               <bucket>/.fsort-XXXXXX.part, private to this attempt
//!   stream()            chunk N written before chunk N+1 is read
//!   flush / permissions / sync_all
//!   rename(stage, dst)  atomic, last rename wins
//!   on any error after staging --> remove the stage, dst untouched
//!        |
//!        v
//!   CopyRecord (source, destination, Ok(bytes) | Err(CopyError))
//!   + exactly one log line
//! ```
//!
//! A crash mid-copy can leave a `.fsort-*.part` file behind, never a
//! truncated destination.

use std::io;
use std::path::{Path, PathBuf};

use bon::Builder;
use thiserror::Error;
use tempfile::TempPath;
use tokio::fs::{self, File};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info, warn};

use crate::config::types::DEFAULT_CHUNK_SIZE;
use crate::error::CopyError;
use crate::walk::FileEntry;

/// Name prefix of in-progress copies inside a bucket.
pub const STAGING_PREFIX: &str = ".fsort-";

/// Name suffix of in-progress copies inside a bucket.
pub const STAGING_SUFFIX: &str = ".part";

/// Knobs for a single copy operation.
#[derive(Debug, Clone, Builder)]
pub struct CopySettings {
    /// Read/write chunk size in bytes
    #[builder(setters(name = with_chunk_size), default = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,
    /// Bucket for files without an extension ("" = output root)
    #[builder(setters(name = with_no_extension_bucket), default, into)]
    no_extension_bucket: String,
    /// Sync destination contents to disk before reporting success
    #[builder(setters(name = with_fsync), default = false)]
    fsync: bool,
    /// Resolve destinations without touching the filesystem
    #[builder(setters(name = with_dry_run), default = false)]
    dry_run: bool,
}

impl Default for CopySettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl CopySettings {
    /// Returns the chunk size, never less than one byte.
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size.max(1)
    }

    /// Returns the bucket name used for extensionless files.
    #[must_use]
    pub fn no_extension_bucket(&self) -> &str {
        &self.no_extension_bucket
    }

    /// Returns whether destinations are synced to disk.
    #[must_use]
    pub const fn fsync(&self) -> bool {
        self.fsync
    }

    /// Returns whether this is a dry run.
    #[must_use]
    pub const fn dry_run(&self) -> bool {
        self.dry_run
    }
}

/// Outcome of one copy attempt. Used for logging and tallies, not retained.
#[derive(Debug)]
pub struct CopyRecord {
    source: PathBuf,
    destination: PathBuf,
    outcome: Result<u64, CopyError>,
}

impl CopyRecord {
    /// Source file path.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Resolved destination path.
    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Bytes copied, or the failure cause.
    #[must_use]
    pub const fn outcome(&self) -> &Result<u64, CopyError> {
        &self.outcome
    }
}

/// Failure inside [`stream`], tagged with the side that failed.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("read failed: {0}")]
    Read(#[source] io::Error),
    #[error("write failed: {0}")]
    Write(#[source] io::Error),
}

/// Returns the bucket name for an extension.
#[must_use]
pub fn bucket_name<'a>(extension: &'a str, no_extension_bucket: &'a str) -> &'a str {
    if extension.is_empty() {
        no_extension_bucket
    } else {
        extension
    }
}

/// Creates `dir` and its parents unless it already exists as a directory.
///
/// Safe under concurrent first use: an existing directory is not an error.
/// A non-directory at `dir` is.
///
/// # Errors
///
/// Returns `CopyError::Bucket` if the directory cannot be created.
pub async fn ensure_bucket(dir: &Path) -> Result<(), CopyError> {
    fs::create_dir_all(dir)
        .await
        .map_err(|source| CopyError::Bucket {
            path: dir.to_path_buf(),
            source,
        })
}

/// Copies `reader` into `writer` in chunks of `chunk_size` bytes.
///
/// Each chunk is fully written before the next one is read, so memory use is
/// bounded by one chunk regardless of file size.
///
/// # Errors
///
/// Returns `StreamError::Read` or `StreamError::Write` with the I/O cause.
pub async fn stream<R, W>(reader: &mut R, writer: &mut W, chunk_size: usize) -> Result<u64, StreamError>
where
    R: AsyncRead + Unpin + ?Sized,
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut buf = vec![0u8; chunk_size.max(1)];
    let mut total = 0u64;

    loop {
        let n = match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(StreamError::Read(e)),
        };
        writer
            .write_all(&buf[..n])
            .await
            .map_err(StreamError::Write)?;
        total += n as u64;
    }

    Ok(total)
}

/// Copies files into extension buckets under one output root.
#[derive(Debug, Clone)]
pub struct Copier {
    output_root: PathBuf,
    settings: CopySettings,
}

impl Copier {
    #[must_use]
    pub fn new(output_root: impl Into<PathBuf>, settings: CopySettings) -> Self {
        Self {
            output_root: output_root.into(),
            settings,
        }
    }

    /// Directory that receives `entry`.
    #[must_use]
    pub fn bucket_dir(&self, entry: &FileEntry) -> PathBuf {
        let bucket = bucket_name(entry.extension(), self.settings.no_extension_bucket());
        if bucket.is_empty() {
            self.output_root.clone()
        } else {
            self.output_root.join(bucket)
        }
    }

    /// Full destination path for `entry`.
    #[must_use]
    pub fn destination_for(&self, entry: &FileEntry) -> PathBuf {
        self.bucket_dir(entry).join(entry.name())
    }

    /// Copies one file into its bucket and logs the outcome.
    ///
    /// Never panics and never propagates: every failure is folded into the
    /// returned record so sibling copies are unaffected.
    pub async fn copy(&self, entry: &FileEntry) -> CopyRecord {
        let bucket = self.bucket_dir(entry);
        let destination = bucket.join(entry.name());

        let outcome = if self.settings.dry_run() {
            Ok(0)
        } else {
            self.copy_into(entry.path(), &bucket, &destination).await
        };

        let record = CopyRecord {
            source: entry.path().to_path_buf(),
            destination,
            outcome,
        };
        self.log(&record);
        record
    }

    async fn copy_into(&self, source: &Path, bucket: &Path, destination: &Path) -> Result<u64, CopyError> {
        ensure_bucket(bucket).await?;

        let mut reader = File::open(source)
            .await
            .map_err(|e| CopyError::OpenSource {
                path: source.to_path_buf(),
                source: e,
            })?;

        let (staged, stage) = stage_in(bucket)
            .map_err(|e| CopyError::CreateDestination {
                path: destination.to_path_buf(),
                source: e,
            })?;
        let mut writer = File::from_std(staged);

        let result = self
            .transfer(&mut reader, &mut writer, source, destination)
            .await;

        // Close both handles before the stage is renamed or removed
        drop(writer);
        drop(reader);

        match result {
            Ok(bytes) => {
                stage.persist(destination).map_err(|e| CopyError::Rename {
                    path: destination.to_path_buf(),
                    source: e.error,
                })?;
                Ok(bytes)
            }
            Err(err) => {
                discard_stage(stage);
                Err(err)
            }
        }
    }

    async fn transfer(
        &self,
        reader: &mut File,
        writer: &mut File,
        source: &Path,
        destination: &Path,
    ) -> Result<u64, CopyError> {
        let write_err = |e| CopyError::Write {
            path: destination.to_path_buf(),
            source: e,
        };
        let read_err = |e| CopyError::Read {
            path: source.to_path_buf(),
            source: e,
        };

        let permissions = reader.metadata().await.map_err(read_err)?.permissions();

        let bytes = stream(reader, writer, self.settings.chunk_size())
            .await
            .map_err(|e| match e {
                StreamError::Read(e) => read_err(e),
                StreamError::Write(e) => write_err(e),
            })?;

        writer.flush().await.map_err(write_err)?;
        writer.set_permissions(permissions).await.map_err(write_err)?;
        if self.settings.fsync() {
            writer.sync_all().await.map_err(write_err)?;
        }

        Ok(bytes)
    }

    fn log(&self, record: &CopyRecord) {
        let source = record.source().display();
        let destination = record.destination().display();
        match record.outcome() {
            Ok(_) if self.settings.dry_run() => info!("Would copy {source} to {destination}"),
            Ok(bytes) => info!(bytes, "Copied {source} to {destination}"),
            Err(e) => error!(
                failed_path = %e.path().display(),
                "Failed to copy {source} to {destination}: {e}"
            ),
        }
    }
}

/// Creates a uniquely named staging file inside `bucket`.
///
/// Each copy attempt gets its own file, so concurrent copies that resolve to
/// the same destination never write through a shared handle.
fn stage_in(bucket: &Path) -> io::Result<(std::fs::File, TempPath)> {
    let staged = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .suffix(STAGING_SUFFIX)
        .tempfile_in(bucket)?;
    Ok(staged.into_parts())
}

/// Removes the staging file of a failed copy.
fn discard_stage(stage: TempPath) {
    let path = stage.to_path_buf();
    match stage.close() {
        Ok(()) => debug!(path = %path.display(), "removed staged copy"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(
            path = %path.display(),
            error = %e,
            "failed to remove staged copy"
        ),
    }
}
