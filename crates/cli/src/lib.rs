// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Entry points shared by the `activate-patient`, `fix-doctor-groups` and
//! `api-smoke-test` binaries.
//!
//! Each tool parses its arguments with clap, opens its collaborator
//! (database or HTTP transport), runs one operation and prints a
//! human-readable report. Rendering is split from printing so the output
//! can be tested.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod activate;
mod repair;
mod smoke;

#[cfg(test)]
mod tests;

use std::process::ExitCode;

pub use activate::{ActivateArgs, render_activation, run_activate};
pub use repair::{RepairArgs, render_repair, run_repair};
pub use smoke::{SmokeArgs, run_smoke};

/// Database opened when neither `--database` nor `HMS_DATABASE` is given.
pub const DEFAULT_DATABASE: &str = "db.sqlite3";

/// Installs the tracing subscriber for a binary.
///
/// Diagnostics go to stderr and are filtered by `RUST_LOG`, defaulting to
/// `warn` so they do not drown the console report on stdout.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

const fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
