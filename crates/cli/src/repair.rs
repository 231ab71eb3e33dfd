// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use clap::Parser;
use hms_admin::{
    AdminError, DEFAULT_DOCTOR_USERNAME, DEFAULT_PATIENT_USERNAME, PatientRepair, RepairConfig,
    RepairReport, RoleRepair, repair_groups,
};
use hms_admin_persistence::Persistence;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

use crate::{DEFAULT_DATABASE, exit_code, print_lines};

/// Make sure the doctor and patient accounts hold their roles.
#[derive(Parser, Debug)]
#[command(name = "fix-doctor-groups", author, version, about, long_about = None)]
pub struct RepairArgs {
    /// Path to the application's `SQLite` database file.
    #[arg(short, long, env = "HMS_DATABASE", default_value = DEFAULT_DATABASE)]
    pub database: PathBuf,

    /// Account that must hold the doctor role.
    #[arg(long, env = "HMS_DOCTOR_USERNAME", default_value = DEFAULT_DOCTOR_USERNAME)]
    pub doctor_username: String,

    /// Account that must hold the patient role.
    #[arg(long, env = "HMS_PATIENT_USERNAME", default_value = DEFAULT_PATIENT_USERNAME)]
    pub patient_username: String,
}

impl RepairArgs {
    #[must_use]
    pub fn config(&self) -> RepairConfig {
        RepairConfig {
            doctor_username: self.doctor_username.clone(),
            patient_username: self.patient_username.clone(),
            ..RepairConfig::default()
        }
    }
}

fn format_groups(groups: &[String]) -> String {
    format!("[{}]", groups.join(", "))
}

fn render_role(lines: &mut Vec<String>, role: &RoleRepair, label: &str) {
    let group = &role.group.name;
    let username = &role.user.username;

    if role.group_resolution.was_created() {
        lines.push(format!("Created group {group}"));
    } else {
        lines.push(format!("Group {group} already exists"));
    }
    if role.membership.was_added() {
        lines.push(format!("Added {label} user {username} to group {group}"));
    } else {
        lines.push(format!("{label} user {username} is already in group {group}"));
    }
}

/// Console trace of a repair outcome.
#[must_use]
pub fn render_repair(outcome: &Result<RepairReport, AdminError>) -> Vec<String> {
    let report = match outcome {
        Ok(report) => report,
        Err(err) => return vec![format!("Error: {err}")],
    };

    let doctor = &report.doctor.role;
    let mut lines = vec![
        format!("Doctor user: {}", doctor.user.username),
        format!("Current groups: {}", format_groups(&doctor.groups_before)),
        format!(
            "Doctor status: {}",
            if report.doctor.doctor.status {
                "approved"
            } else {
                "pending"
            }
        ),
    ];
    render_role(&mut lines, doctor, "Doctor");
    lines.push(format!(
        "Groups after repair: {}",
        format_groups(&doctor.groups_after)
    ));

    lines.push(String::new());
    match &report.patient {
        PatientRepair::Repaired(patient) => {
            lines.push(format!("Patient user: {}", patient.user.username));
            lines.push(format!(
                "Patient groups: {}",
                format_groups(&patient.groups_before)
            ));
            render_role(&mut lines, patient, "Patient");
        }
        PatientRepair::Missing { username } => {
            lines.push(format!("Patient user {username} does not exist"));
        }
        PatientRepair::Failed { username, error } => {
            lines.push(format!("Error repairing patient user {username}: {error}"));
        }
    }

    lines
}

/// Runs `fix-doctor-groups`; exits non-zero when the repair stopped early.
#[must_use]
pub fn run_repair(args: &RepairArgs) -> ExitCode {
    exit_code(execute(args))
}

pub(crate) fn execute(args: &RepairArgs) -> bool {
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

    let outcome = repair_groups(&mut persistence, &args.config());
    print_lines(&render_repair(&outcome));
    outcome.as_ref().is_ok_and(RepairReport::completed)
}
