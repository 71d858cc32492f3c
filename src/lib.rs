// fsort: extension-based file sorter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)         cmd (handlers)
//!                |              config / sort
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, env, overrides    |
//!              '-------------+-------------'
//!                            v
//!                        pipeline
//!                  Sorter, worker pool
//!                    |             |
//!                    v             v
//!                  walk          copy
//!             ignore + flume   buckets, stream
//!
//!   +-----------------------------------------+
//!   |  foundation        error, logging       |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod copy;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod walk;
