// fsort: extension-based file sorter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for fsort.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. fsort.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. FSORT_* env vars
//! 5. --set KEY=VALUE
//! 6. typed CLI flags (--workers, --chunk-size, ...)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! FSORT_SORT__WORKERS=8            → sort.workers = 8
//! FSORT_SORT__CHUNK_SIZE=65536     → sort.chunk_size = 65536
//! FSORT_WALK__FOLLOW_LINKS=true    → walk.follow_links = true
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::copy::CopySettings;
use crate::error::{ConfigError, Result};
use crate::pipeline::SortOptions;
use crate::walk::WalkOptions;

use loader::ConfigLoader;
use types::{LogSettings, SortConfig, WalkConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Copy pipeline options.
    pub sort: SortConfig,
    /// Directory traversal options.
    pub walk: WalkConfig,
    /// Logging options.
    pub log: LogSettings,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use fsort::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file("fsort.toml", false)
    ///     .with_env_prefix("FSORT")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Checks value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for the first offending key.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let invalid = |section: &str, key: &str, message: &str| ConfigError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            message: message.to_string(),
        };

        if self.sort.workers == Some(0) {
            return Err(invalid("sort", "workers", "must be at least 1"));
        }
        if self.sort.chunk_size == 0 {
            return Err(invalid("sort", "chunk_size", "must be at least 1"));
        }
        if self.sort.queue_capacity == 0 {
            return Err(invalid("sort", "queue_capacity", "must be at least 1"));
        }
        let bucket = &self.sort.no_extension_bucket;
        if bucket.contains(['/', '\\']) || bucket == "." || bucket == ".." {
            return Err(invalid(
                "sort",
                "no_extension_bucket",
                "must be a single directory name",
            ));
        }
        if self.walk.threads == Some(0) {
            return Err(invalid("walk", "threads", "must be at least 1"));
        }
        Ok(())
    }

    /// Translates the walk section into traversal options.
    #[must_use]
    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions::builder()
            .maybe_with_max_depth(self.walk.max_depth)
            .with_follow_links(self.walk.follow_links)
            .with_include_hidden(self.walk.include_hidden)
            .with_respect_gitignore(self.walk.respect_gitignore)
            .maybe_with_threads(self.walk.threads)
            .build()
    }

    /// Translates the sort and walk sections into pipeline options.
    #[must_use]
    pub fn sort_options(&self) -> SortOptions {
        let copy = CopySettings::builder()
            .with_chunk_size(self.sort.chunk_size)
            .with_no_extension_bucket(self.sort.no_extension_bucket.clone())
            .with_fsync(self.sort.fsync)
            .with_dry_run(self.sort.dry)
            .build();

        SortOptions::builder()
            .with_workers(self.sort.effective_workers())
            .with_queue_capacity(self.sort.queue_capacity)
            .with_copy(copy)
            .with_walk(self.walk_options())
            .build()
    }

    /// Format configuration options for display, one `key = value` per line.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let opt = |v: Option<usize>| v.map_or_else(|| "auto".to_string(), |v| v.to_string());

        let mut options = BTreeMap::new();
        options.insert("sort.workers", opt(self.sort.workers));
        options.insert("sort.chunk_size", self.sort.chunk_size.to_string());
        options.insert("sort.queue_capacity", self.sort.queue_capacity.to_string());
        options.insert(
            "sort.no_extension_bucket",
            format!("{:?}", self.sort.no_extension_bucket),
        );
        options.insert("sort.fsync", self.sort.fsync.to_string());
        options.insert("sort.dry", self.sort.dry.to_string());
        options.insert("sort.allow_partial", self.sort.allow_partial.to_string());
        options.insert("walk.include_hidden", self.walk.include_hidden.to_string());
        options.insert(
            "walk.respect_gitignore",
            self.walk.respect_gitignore.to_string(),
        );
        options.insert("walk.follow_links", self.walk.follow_links.to_string());
        options.insert("walk.max_depth", opt(self.walk.max_depth));
        options.insert("walk.threads", opt(self.walk.threads));
        options.insert("log.level", self.log.level.as_u8().to_string());
        options.insert("log.file_level", self.log.file_level.as_u8().to_string());
        options.insert(
            "log.file",
            self.log
                .file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
