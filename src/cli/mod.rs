// fsort: extension-based file sorter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for fsort using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! fsort [global options] <SOURCE> <OUTPUT>
//! fsort [global options] --show-config
//! ```

pub mod global;


use crate::cli::global::GlobalOptions;
use clap::Parser;
use std::path::PathBuf;

/// Concurrent extension-based file sorter.
#[derive(Debug, Parser)]
#[command(
    name = "fsort",
    author,
    version,
    about = "Sort files into folders named after their extension",
    long_about = "fsort Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Recursively walks SOURCE and copies every regular file into\n\
                  OUTPUT/<extension>/<name>. Extensions are lower-cased; files\n\
                  without an extension go to the configured no-extension bucket\n\
                  (the OUTPUT root by default). Existing files with the same name\n\
                  are overwritten.",
    after_help = "CONFIG FILES:\n\n\
                  fsort reads `fsort.toml` from the current directory if present\n\
                  (disable with --no-default-config), then every --config file in\n\
                  order, then FSORT_<SECTION>__<KEY> environment variables, then\n\
                  --set overrides and finally dedicated flags such as --workers.\n\n\
                  EXIT STATUS:\n\n\
                  0 success, 1 fatal error, 2 one or more copies failed\n\
                  (0 with --allow-partial)."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Directory to scan recursively.
    #[arg(value_name = "SOURCE", required_unless_present = "show_config")]
    pub source: Option<PathBuf>,

    /// Directory that receives the extension buckets (created if missing).
    #[arg(value_name = "OUTPUT", required_unless_present = "show_config")]
    pub output: Option<PathBuf>,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
