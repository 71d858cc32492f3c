// fsort: extension-based file sorter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> load_config --> Logging --> Dispatch
//!   --show-config | sort SOURCE OUTPUT
//! ```

use std::process::ExitCode;

use fsort::cli::{self, Cli};
use fsort::cmd::config::{load_config, run_show_config_command};
use fsort::cmd::sort::{exit_status, run_sort_command};
use fsort::config::Config;
use fsort::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let config = match load_config(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&LogConfig::from(&config.log)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, &config).await
}

async fn dispatch_command(cli: &Cli, config: &Config) -> ExitCode {
    if cli.global.show_config {
        run_show_config_command(config);
        return ExitCode::SUCCESS;
    }

    let (Some(source), Some(output)) = (&cli.source, &cli.output) else {
        eprintln!("Both SOURCE and OUTPUT are required. Use --help for usage information.");
        return ExitCode::FAILURE;
    };

    match run_sort_command(source, output, config, cli.global.json).await {
        Ok(summary) => ExitCode::from(exit_status(&summary, config.sort.allow_partial)),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
