// fsort: extension-based file sorter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered configuration loading.
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file(path, required)     repeatable, later wins
//!   .with_env_prefix("FSORT")          FSORT_<SECTION>__<KEY>
//!   .set_override("sort.workers=8")    always beats files and env
//!        |
//!        v
//!    build() --> Config (validated)
//! ```

use std::path::Path;

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};

use super::Config;
use crate::error::{ConfigError, Result};

/// Collects configuration sources in priority order.
pub struct ConfigLoader {
    builder: ConfigBuilder<DefaultState>,
    env_prefix: Option<String>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
        }
    }

    /// Adds a TOML file. A missing `required` file fails `build()`; a missing
    /// optional one is ignored.
    #[must_use]
    pub fn add_toml_file(mut self, path: impl AsRef<Path>, required: bool) -> Self {
        self.builder = self.builder.add_source(
            File::from(path.as_ref())
                .format(FileFormat::Toml)
                .required(required),
        );
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self
    }

    /// Reads `<PREFIX>_<SECTION>__<KEY>` environment variables.
    ///
    /// A double underscore separates the section from the key so that keys
    /// containing underscores survive (`FSORT_SORT__CHUNK_SIZE=4096`).
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Applies a `KEY=VALUE` override such as `sort.workers=8`.
    ///
    /// `/` is accepted as a section separator (`walk/follow_links=true`).
    ///
    /// # Errors
    ///
    /// Returns an error if the override has no `=` or an empty key.
    pub fn set_override(mut self, option: &str) -> Result<Self> {
        let (key, value) = option
            .split_once('=')
            .map(|(k, v)| (k.trim().replace('/', "."), v.trim()))
            .filter(|(k, _)| !k.is_empty())
            .ok_or_else(|| ConfigError::InvalidOverride(option.to_string()))?;
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merges every source and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a required file is missing, a source is malformed,
    /// the merged values do not match `Config`, or validation fails.
    pub fn build(self) -> Result<Config> {
        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            ),
            None => self.builder,
        };
        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
