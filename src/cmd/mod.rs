// fsort: extension-based file sorter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   config (load, --show-config), sort
//! ```

pub mod config;
pub mod sort;

#[cfg(test)]
mod tests;
