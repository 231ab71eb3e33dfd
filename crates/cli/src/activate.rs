// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use clap::Parser;
use hms_admin::{ActivationMode, ActivationReport, AdminError, activate};
use hms_admin_persistence::Persistence;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

use crate::{DEFAULT_DATABASE, exit_code, print_lines};

/// Activate patient accounts that are waiting for approval.
#[derive(Parser, Debug)]
#[command(name = "activate-patient", author, version, about, long_about = None)]
pub struct ActivateArgs {
    /// Path to the application's `SQLite` database file.
    #[arg(short, long, env = "HMS_DATABASE", default_value = DEFAULT_DATABASE)]
    pub database: PathBuf,

    /// Activate every inactive patient instead of only the newest one.
    #[arg(long)]
    pub all: bool,
}

impl ActivateArgs {
    #[must_use]
    pub const fn mode(&self) -> ActivationMode {
        if self.all {
            ActivationMode::All
        } else {
            ActivationMode::Latest
        }
    }
}

/// Console report for an activation outcome, ending with the overall verdict.
#[must_use]
pub fn render_activation(outcome: &Result<ActivationReport, AdminError>) -> Vec<String> {
    let mut lines = Vec::new();

    match outcome {
        Ok(report) => {
            match report.mode {
                ActivationMode::Latest => {
                    for patient in &report.activated {
                        lines.push(format!(
                            "Activated patient: {} ({})",
                            patient.user.username,
                            patient.user.full_name()
                        ));
                        lines.push(format!("Patient ID: {}", patient.patient_id));
                        lines.push(format!("User ID: {}", patient.user.user_id));
                    }
                }
                ActivationMode::All => {
                    lines.push(format!("Activated {} patients", report.count()));
                    lines.extend(report.activated.iter().map(|patient| {
                        format!(
                            "  - {} ({})",
                            patient.user.username,
                            patient.user.full_name()
                        )
                    }));
                }
            }
            lines.push(String::new());
            lines.push(String::from("Done."));
        }
        Err(AdminError::NoInactivePatients) => {
            lines.push(AdminError::NoInactivePatients.to_string());
            lines.push(String::new());
            lines.push(String::from("Activation failed."));
        }
        Err(err) => {
            lines.push(format!("Error while activating patients: {err}"));
            lines.push(String::new());
            lines.push(String::from("Activation failed."));
        }
    }

    lines
}

/// Runs `activate-patient`; exits non-zero when nothing was activated.
#[must_use]
pub fn run_activate(args: &ActivateArgs) -> ExitCode {
    exit_code(execute(args))
}

pub(crate) fn execute(args: &ActivateArgs) -> bool {
    println!("Patient account activation");
    println!("{}", "=".repeat(40));

    let mut persistence = match Persistence::open_existing(&args.database) {
        Ok(persistence) => persistence,
        Err(err) => {
            error!(database = %args.database.display(), "Failed to open database: {err}");
            println!(
                "Could not open database {}: {err}",
                args.database.display()
            );
            return false;
        }
    };

    let mode = args.mode();
    match mode {
        ActivationMode::Latest => println!("Activating the most recently registered patient..."),
        ActivationMode::All => println!("Activating all inactive patients..."),
    }

    let outcome = activate(&mut persistence, mode);
    print_lines(&render_activation(&outcome));
    outcome.is_ok()
}
