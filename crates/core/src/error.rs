// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hms_admin_domain::DomainError;
use hms_admin_persistence::PersistenceError;

/// Errors returned by the maintenance operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminError {
    /// There is no patient waiting for activation.
    NoInactivePatients,
    /// The configured doctor account does not exist.
    DoctorUserMissing {
        /// The username that was looked up.
        username: String,
    },
    /// The doctor account exists but has no doctor record.
    DoctorRecordMissing {
        /// The username of the account without a record.
        username: String,
    },
    /// A configured username or group name is invalid.
    Domain(DomainError),
    /// The database operation failed.
    Persistence(PersistenceError),
}

impl AdminError {
    /// Returns a stable, machine-readable code for this failure.
    #[must_use]
    pub const fn reason_code(&self) -> &'static str {
        match self {
            Self::NoInactivePatients => "no_inactive_patients",
            Self::DoctorUserMissing { .. } => "doctor_user_missing",
            Self::DoctorRecordMissing { .. } => "doctor_record_missing",
            Self::Domain(_) => "invalid_configuration",
            Self::Persistence(_) => "persistence_failure",
        }
    }
}

impl std::fmt::Display for AdminError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoInactivePatients => write!(f, "No patients are waiting for activation"),
            Self::DoctorUserMissing { username } => {
                write!(f, "Doctor user '{username}' does not exist")
            }
            Self::DoctorRecordMissing { username } => {
                write!(f, "User '{username}' has no doctor record")
            }
            Self::Domain(err) => write!(f, "{err}"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for AdminError {}

impl From<DomainError> for AdminError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<PersistenceError> for AdminError {
    fn from(err: PersistenceError) -> Self {
        Self::Persistence(err)
    }
}
