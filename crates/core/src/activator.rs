// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Patient account activation.

use hms_admin_domain::PatientAccount;
use hms_admin_persistence::Persistence;
use tracing::{info, warn};

use crate::error::AdminError;

/// Which patients an activation run targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivationMode {
    /// Only the most recently registered inactive patient.
    #[default]
    Latest,
    /// Every inactive patient.
    All,
}

/// The patients an activation run switched on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationReport {
    /// The mode the run used.
    pub mode: ActivationMode,
    /// Activated patients in ID order. Never empty.
    pub activated: Vec<PatientAccount>,
}

impl ActivationReport {
    /// Number of patients activated.
    #[must_use]
    pub fn count(&self) -> usize {
        self.activated.len()
    }
}

/// Runs an activation in the given mode.
///
/// # Errors
///
/// See [`activate_latest_patient`] and [`activate_all_patients`].
pub fn activate(
    persistence: &mut Persistence,
    mode: ActivationMode,
) -> Result<ActivationReport, AdminError> {
    match mode {
        ActivationMode::Latest => activate_latest_patient(persistence),
        ActivationMode::All => activate_all_patients(persistence),
    }
}

/// Activates the inactive patient with the highest ID.
///
/// # Errors
///
/// Returns `AdminError::NoInactivePatients` if every patient is already
/// active, or `AdminError::Persistence` if the database operation fails.
/// Neither case changes any record.
pub fn activate_latest_patient(
    persistence: &mut Persistence,
) -> Result<ActivationReport, AdminError> {
    let Some(patient) = persistence.activate_latest_inactive_patient()? else {
        warn!("No inactive patient found");
        return Err(AdminError::NoInactivePatients);
    };

    info!(
        patient_id = patient.patient_id,
        username = %patient.user.username,
        "Activated latest patient"
    );

    Ok(ActivationReport {
        mode: ActivationMode::Latest,
        activated: vec![patient],
    })
}

/// Activates every inactive patient in one update.
///
/// # Errors
///
/// Returns `AdminError::NoInactivePatients` if there is nothing to
/// activate, or `AdminError::Persistence` if the update fails. Neither
/// case changes any record.
pub fn activate_all_patients(persistence: &mut Persistence) -> Result<ActivationReport, AdminError> {
    let activated: Vec<PatientAccount> = persistence.activate_all_inactive_patients()?;

    if activated.is_empty() {
        warn!("No inactive patients found");
        return Err(AdminError::NoInactivePatients);
    }

    info!(count = activated.len(), "Activated all inactive patients");

    Ok(ActivationReport {
        mode: ActivationMode::All,
        activated,
    })
}
