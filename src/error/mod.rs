// fsort: extension-based file sorter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!        SortError (~24 bytes, fatal for a run)
//!                     |
//!      +--------+-----+-----+--------+
//!      v        v           v        v
//!   Source   Output      Config     Io
//!    Box      Box         Box       Box
//!
//! Fatal sub-errors:
//!   Source  NotFound, NotADirectory, Unreadable
//!   Output  Create, SameAsSource
//!   Config  InvalidValue, InvalidOverride
//!
//! Per-item errors, logged and counted, never wrapped:
//!   CopyError  Bucket, OpenSource, CreateDestination,
//!              Read, Write, Rename            per file
//!   WalkError  Entry                          per entry
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`SortError`].
pub type SortResult<T> = std::result::Result<T, SortError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum SortError {
    /// The source root is unusable. Fatal for the run.
    #[error("invalid source root: {0}")]
    Source(#[from] Box<SourceRootError>),

    /// The destination root could not be prepared. Fatal for the run.
    #[error("invalid output root: {0}")]
    Output(#[from] Box<OutputRootError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for SortError {
                fn from(err: $error) -> Self {
                    SortError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    SourceRootError => Source,
    OutputRootError => Output,
    ConfigError => Config,
    std::io::Error => Io,
}

// --- Source Root Errors ---

/// Reasons a source root is rejected before any work starts.
#[derive(Debug, Error)]
pub enum SourceRootError {
    /// Path does not exist.
    #[error("source root does not exist: {0}")]
    NotFound(String),

    /// Path exists but is not a directory.
    #[error("source root is not a directory: {0}")]
    NotADirectory(String),

    /// Path could not be inspected or resolved.
    #[error("cannot access source root '{path}': {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Output Root Errors ---

/// Destination root preparation errors.
#[derive(Debug, Error)]
pub enum OutputRootError {
    /// Output root could not be created or resolved.
    #[error("cannot prepare output root '{path}': {source}")]
    Create {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Output root resolves to the source root itself.
    #[error("output root must differ from the source root: {0}")]
    SameAsSource(String),
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// A `--set` override that is not of the form `key=value`.
    #[error("invalid override '{0}', expected KEY=VALUE")]
    InvalidOverride(String),
}

// --- Copy Errors ---

/// Failure of a single file's copy operation.
///
/// Every variant carries the path the failing step touched.
#[derive(Debug, Error)]
pub enum CopyError {
    /// Bucket directory could not be created.
    #[error("cannot create bucket directory '{}': {source}", .path.display())]
    Bucket {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source file could not be opened for reading.
    #[error("cannot open source '{}': {source}", .path.display())]
    OpenSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Destination file could not be created.
    #[error("cannot create destination '{}': {source}", .path.display())]
    CreateDestination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Read from the source failed mid-copy.
    #[error("read from '{}' failed: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Write, flush or sync of the staged copy failed.
    #[error("write to '{}' failed: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The finished copy could not be moved onto the destination.
    #[error("cannot replace '{}': {source}", .path.display())]
    Rename {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CopyError {
    /// Returns the path the failing step was operating on.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Bucket { path, .. }
            | Self::OpenSource { path, .. }
            | Self::CreateDestination { path, .. }
            | Self::Read { path, .. }
            | Self::Write { path, .. }
            | Self::Rename { path, .. } => path,
        }
    }
}

// --- Walk Errors ---

/// Directory traversal errors. Never fatal.
#[derive(Debug, Error)]
pub enum WalkError {
    /// An entry could not be read, stat'd or followed.
    #[error("{0}")]
    Entry(#[from] ignore::Error),
}

#[cfg(test)]
mod tests;
