// fsort: extension-based file sorter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration section types.
//!
//! ```text
//! Config: SortConfig, WalkConfig, LogSettings
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;

/// Default streaming chunk size in bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Default capacity of the walker-to-worker queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1000;

/// Copy pipeline options (`[sort]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SortConfig {
    /// Number of concurrent copy workers (unset = available parallelism).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
    /// Read/write chunk size in bytes.
    pub chunk_size: usize,
    /// Capacity of the queue between the walker and the workers.
    pub queue_capacity: usize,
    /// Bucket name for files without an extension. Empty places them in the
    /// output root itself.
    pub no_extension_bucket: String,
    /// Call `fsync` on every destination before reporting success.
    pub fsync: bool,
    /// Log what would be copied without touching the output tree.
    pub dry: bool,
    /// Exit successfully even if some copies failed.
    pub allow_partial: bool,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            workers: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            no_extension_bucket: String::new(),
            fsync: false,
            dry: false,
            allow_partial: false,
        }
    }
}

impl SortConfig {
    /// Returns the effective worker count.
    #[must_use]
    pub fn effective_workers(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(std::num::NonZeroUsize::get)
                .unwrap_or(4)
        })
    }
}

/// Directory traversal options (`[walk]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WalkConfig {
    /// Include hidden files and directories.
    pub include_hidden: bool,
    /// Honour `.gitignore`, `.ignore` and global git excludes.
    pub respect_gitignore: bool,
    /// Follow symbolic links (loops are detected and reported).
    pub follow_links: bool,
    /// Maximum traversal depth (unset = unlimited).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
    /// Walker thread count (unset = auto).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            include_hidden: true,
            respect_gitignore: false,
            follow_links: false,
            max_depth: None,
            threads: None,
        }
    }
}

/// Logging options (`[log]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSettings {
    /// Console verbosity (0-5).
    pub level: LogLevel,
    /// Log file verbosity (0-5).
    pub file_level: LogLevel,
    /// Optional log file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::INFO,
            file_level: LogLevel::DEBUG,
            file: None,
        }
    }
}
