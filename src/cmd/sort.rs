// fsort: extension-based file sorter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sort command implementation for fsort.

use std::path::Path;

use anyhow::Context;

use crate::config::Config;
use crate::error::Result;
use crate::pipeline::{RunSummary, Sorter};

/// Exit status when every copy succeeded.
pub const EXIT_SUCCESS: u8 = 0;

/// Exit status when at least one copy failed or the run was cancelled.
pub const EXIT_PARTIAL: u8 = 2;

/// Main handler for the sort command.
///
/// Ctrl+C stops dispatching new files; copies already running finish.
///
/// # Errors
///
/// Returns an error if the source root is invalid, the output root cannot be
/// created, or the summary cannot be printed. Per-file failures are reported
/// through the summary instead.
pub async fn run_sort_command(
    source: &Path,
    output: &Path,
    config: &Config,
    json: bool,
) -> Result<RunSummary> {
    let sorter = Sorter::new(source, output, config.sort_options());

    let cancel_token = sorter.cancel_token();
    let signal_task = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Received Ctrl+C, finishing in-flight copies...");
            cancel_token.cancel();
        }
    });

    let result = sorter.run().await;
    signal_task.abort();

    let summary = result.with_context(|| {
        format!(
            "failed to sort {} into {}",
            source.display(),
            output.display()
        )
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", format_summary(&summary, config.sort.dry));
    }

    Ok(summary)
}

/// One-line human readable summary.
#[must_use]
pub fn format_summary(summary: &RunSummary, dry_run: bool) -> String {
    let verb = if dry_run { "Would copy" } else { "Copied" };
    let mut line = format!(
        "{verb} {} of {} files ({} bytes), {} failed",
        summary.copied, summary.discovered, summary.bytes_copied, summary.failed
    );
    if summary.skipped > 0 {
        line.push_str(&format!(", {} skipped", summary.skipped));
    }
    if summary.walk_errors > 0 {
        line.push_str(&format!(", {} unreadable entries", summary.walk_errors));
    }
    if summary.cancelled {
        line.push_str(&format!(
            ", cancelled with {} not attempted",
            summary.not_attempted()
        ));
    }
    line
}

/// Maps a finished run to the process exit status.
///
/// `allow_partial` forgives failed copies, not cancellation.
#[must_use]
pub const fn exit_status(summary: &RunSummary, allow_partial: bool) -> u8 {
    if summary.cancelled || (summary.has_failures() && !allow_partial) {
        EXIT_PARTIAL
    } else {
        EXIT_SUCCESS
    }
}
