// fsort: extension-based file sorter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// A regular file discovered by the walker, consumed once by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    path: PathBuf,
    name: OsString,
    extension: String,
}

impl FileEntry {
    /// Builds an entry from a file path. Returns `None` for paths without a
    /// final component (`/`, `..`).
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let name = path.file_name()?.to_os_string();
        let extension = extension_of(&path);
        Some(Self {
            path,
            name,
            extension,
        })
    }

    /// Full path of the source file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base name, reused verbatim as the destination file name.
    #[must_use]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    /// Lower-cased extension without the dot, empty if there is none.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }
}

/// Returns the lower-cased extension of `path` without its leading dot.
///
/// Dotfiles such as `.bashrc` and names ending in a dot have no extension.
/// Non-UTF-8 extensions are converted lossily.
#[must_use]
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}
