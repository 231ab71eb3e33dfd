// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role membership repair for a doctor and a patient account.
//!
//! The repair is a one-shot pass over two accounts named in a
//! [`RepairConfig`]:
//!
//! 1. The doctor account must exist and own a doctor record; otherwise the
//!    run stops with an error before anything is written.
//! 2. The doctor group is created if needed and the doctor added to it.
//! 3. If the patient account exists, the patient group is created if
//!    needed and the patient added to it. A missing patient account is
//!    reported in the result, not as an error, and so is a database failure
//!    in this branch, since the doctor branch has already written by then.
//!
//! Running the repair twice is safe: the second run reports every group as
//! existing and every membership as already present. The run assumes no
//! other writer touches the two accounts while it executes.

use hms_admin_domain::{
    DOCTOR_GROUP, DoctorRecord, GroupData, GroupName, GroupResolution, MembershipChange,
    PATIENT_GROUP, UserAccount, Username,
};
use hms_admin_persistence::Persistence;
use tracing::{debug, info, warn};

use crate::error::AdminError;

/// Doctor account repaired when no other is configured.
pub const DEFAULT_DOCTOR_USERNAME: &str = "doctor_zhang";

/// Patient account repaired when no other is configured.
pub const DEFAULT_PATIENT_USERNAME: &str = "patient_li";

/// Accounts and role names a repair run works on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairConfig {
    pub doctor_username: String,
    pub patient_username: String,
    pub doctor_group: String,
    pub patient_group: String,
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            doctor_username: DEFAULT_DOCTOR_USERNAME.to_string(),
            patient_username: DEFAULT_PATIENT_USERNAME.to_string(),
            doctor_group: DOCTOR_GROUP.to_string(),
            patient_group: PATIENT_GROUP.to_string(),
        }
    }
}

/// What happened to one account's role membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRepair {
    /// The account that was repaired.
    pub user: UserAccount,
    /// Group names held before the repair.
    pub groups_before: Vec<String>,
    /// The role the account must hold.
    pub group: GroupData,
    /// Whether the role had to be created.
    pub group_resolution: GroupResolution,
    /// Whether the membership had to be added.
    pub membership: MembershipChange,
    /// Group names held after the repair, re-read from the database.
    pub groups_after: Vec<String>,
}

/// Result of the doctor branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorRepair {
    pub doctor: DoctorRecord,
    pub role: RoleRepair,
}

/// Result of the patient branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatientRepair {
    /// The patient account does not exist; nothing was changed for it.
    Missing { username: String },
    /// The patient account holds its role.
    Repaired(RoleRepair),
    /// The patient branch hit a database error after the doctor branch
    /// had completed.
    Failed { username: String, error: AdminError },
}

/// Result of a complete repair run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairReport {
    pub doctor: DoctorRepair,
    pub patient: PatientRepair,
}

impl RepairReport {
    /// Whether both branches ran to the end.
    #[must_use]
    pub const fn completed(&self) -> bool {
        !matches!(self.patient, PatientRepair::Failed { .. })
    }
}

// The patient username is checked in its own branch: a name that cannot
// exist is reported like an account that does not.
struct ValidatedConfig {
    doctor_username: Username,
    doctor_group: GroupName,
    patient_group: GroupName,
}

impl TryFrom<&RepairConfig> for ValidatedConfig {
    type Error = AdminError;

    fn try_from(config: &RepairConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            doctor_username: Username::new(&config.doctor_username)?,
            doctor_group: GroupName::new(&config.doctor_group)?,
            patient_group: GroupName::new(&config.patient_group)?,
        })
    }
}

/// Ensures the configured doctor and patient accounts hold their roles.
///
/// # Errors
///
/// - `AdminError::Domain` if the doctor username or a group name is invalid
///   (nothing is read)
/// - `AdminError::DoctorUserMissing` if the doctor account does not exist
/// - `AdminError::DoctorRecordMissing` if it has no doctor record
/// - `AdminError::Persistence` if a database operation in the doctor branch
///   fails
///
/// The first two doctor errors are raised before anything is written.
/// Failures in the patient branch come back as [`PatientRepair::Failed`].
pub fn repair_groups(
    persistence: &mut Persistence,
    config: &RepairConfig,
) -> Result<RepairReport, AdminError> {
    let validated: ValidatedConfig = ValidatedConfig::try_from(config)?;

    let doctor: DoctorRepair = repair_doctor(persistence, &validated)?;

    let patient: PatientRepair =
        repair_patient(persistence, &config.patient_username, &validated.patient_group)
            .unwrap_or_else(|error| {
                warn!(
                    username = %config.patient_username,
                    "Patient repair failed: {error}"
                );
                PatientRepair::Failed {
                    username: config.patient_username.clone(),
                    error,
                }
            });

    Ok(RepairReport { doctor, patient })
}

fn repair_patient(
    persistence: &mut Persistence,
    username: &str,
    group: &GroupName,
) -> Result<PatientRepair, AdminError> {
    let user: Option<UserAccount> = match Username::new(username) {
        Ok(username) => persistence.get_user_by_username(&username)?,
        Err(err) => {
            debug!("Patient username {username:?} is not valid: {err}");
            None
        }
    };

    match user {
        Some(user) => Ok(PatientRepair::Repaired(ensure_role(persistence, user, group)?)),
        None => {
            warn!("Patient user {username} does not exist");
            Ok(PatientRepair::Missing {
                username: username.to_string(),
            })
        }
    }
}

fn repair_doctor(
    persistence: &mut Persistence,
    config: &ValidatedConfig,
) -> Result<DoctorRepair, AdminError> {
    let user: UserAccount = persistence
        .get_user_by_username(&config.doctor_username)?
        .ok_or_else(|| AdminError::DoctorUserMissing {
            username: config.doctor_username.to_string(),
        })?;

    let doctor: DoctorRecord = persistence
        .get_doctor_by_user_id(user.user_id)?
        .ok_or_else(|| AdminError::DoctorRecordMissing {
            username: config.doctor_username.to_string(),
        })?;
    debug!(doctor_id = doctor.doctor_id, status = doctor.status, "Found doctor record");

    let role: RoleRepair = ensure_role(persistence, user, &config.doctor_group)?;
    Ok(DoctorRepair { doctor, role })
}

fn ensure_role(
    persistence: &mut Persistence,
    user: UserAccount,
    group_name: &GroupName,
) -> Result<RoleRepair, AdminError> {
    let groups_before: Vec<String> = persistence.list_group_names_for_user(user.user_id)?;
    let (group, group_resolution) = persistence.get_or_create_group(group_name)?;
    let membership: MembershipChange = persistence.add_user_to_group(user.user_id, group.group_id)?;
    let groups_after: Vec<String> = persistence.list_group_names_for_user(user.user_id)?;

    info!(
        username = %user.username,
        group = %group.name,
        created = group_resolution.was_created(),
        added = membership.was_added(),
        "Role membership checked"
    );

    Ok(RoleRepair {
        user,
        groups_before,
        group,
        group_resolution,
        membership,
        groups_after,
    })
}
