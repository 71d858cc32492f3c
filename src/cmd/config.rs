// fsort: extension-based file sorter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands for fsort.

use crate::cli::global::GlobalOptions;
use crate::config::Config;
use crate::config::loader::ConfigLoader;
use crate::error::Result;

/// Default config file looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "fsort.toml";

/// Environment variable prefix (`FSORT_SORT__WORKERS`).
pub const ENV_PREFIX: &str = "FSORT";

/// Builds the layered loader described by the global options.
///
/// # Errors
///
/// Returns an error if a `--set` override is malformed.
pub fn build_config_loader(global: &GlobalOptions) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new();
    if !global.no_default_config {
        loader = loader.add_toml_file(DEFAULT_CONFIG_FILE, false);
    }
    for path in &global.configs {
        loader = loader.add_toml_file(path, true);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for option in &global.options {
        loader = loader.set_override(option)?;
    }
    Ok(loader)
}

/// Loads the configuration and applies dedicated CLI flags on top.
///
/// # Errors
///
/// Returns an error if any source fails to load or the result is invalid.
pub fn load_config(global: &GlobalOptions) -> Result<Config> {
    let mut config = build_config_loader(global)?.build()?;
    global.apply_to(&mut config);
    config.validate()?;
    Ok(config)
}

/// Display the effective configuration.
pub fn run_show_config_command(config: &Config) {
    for line in config.format_options() {
        println!("{line}");
    }
}
