// fsort: extension-based file sorter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE      ← Additional config files (can repeat)
//! --set KEY=VAL      ← Direct config override (sort.workers=8)
//! --workers N        ← sort.workers
//! --chunk-size BYTES ← sort.chunk_size
//! --dry              ← sort.dry
//! --allow-partial    ← sort.allow_partial
//! --log-level N      ← log.level (0-5)
//! --file-log-level N ← log.file_level (defaults to --log-level)
//! --log-file FILE    ← log.file
//!
//! Precedence: CLI flags > --set > env > --config > fsort.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::config::Config;
use crate::logging::LogLevel;

/// Global options.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Disables auto loading of `fsort.toml`, only uses --config.
    #[arg(long = "no-default-config")]
    pub no_default_config: bool,

    /// Sets an option, such as 'sort.workers=8' or 'walk/follow_links=true'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "OPTION", action = clap::ArgAction::Append)]
    pub options: Vec<String>,

    /// Number of concurrent copy workers.
    #[arg(short = 'j', long = "workers", value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub workers: Option<u32>,

    /// Read/write chunk size in bytes.
    #[arg(long = "chunk-size", value_name = "BYTES", value_parser = clap::value_parser!(u32).range(1..))]
    pub chunk_size: Option<u32>,

    /// Logs what would be copied without creating anything.
    #[arg(long)]
    pub dry: bool,

    /// Exit with status 0 even if some copies failed.
    #[arg(long = "allow-partial")]
    pub allow_partial: bool,

    /// Prints the run summary as JSON on stdout.
    #[arg(long)]
    pub json: bool,

    /// Prints the effective configuration and exits.
    #[arg(long = "show-config")]
    pub show_config: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl GlobalOptions {
    /// Applies dedicated flags on top of a loaded configuration.
    ///
    /// Flags that were not given leave the configuration untouched.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(workers) = self.workers {
            config.sort.workers = Some(workers as usize);
        }
        if let Some(chunk_size) = self.chunk_size {
            config.sort.chunk_size = chunk_size as usize;
        }
        if self.dry {
            config.sort.dry = true;
        }
        if self.allow_partial {
            config.sort.allow_partial = true;
        }
        if let Some(level) = self.log_level.and_then(LogLevel::from_u8) {
            config.log.level = level;
            config.log.file_level = level;
        }
        // file_log_level falls back to log_level if not specified
        if let Some(level) = self.file_log_level.and_then(LogLevel::from_u8) {
            config.log.file_level = level;
        }
        if let Some(ref path) = self.log_file {
            config.log.file = Some(path.clone());
        }
    }
}
