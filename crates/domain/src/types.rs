// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Name of the role granted to doctor accounts.
pub const DOCTOR_GROUP: &str = "DOCTOR";

/// Name of the role granted to patient accounts.
pub const PATIENT_GROUP: &str = "PATIENT";

/// Maximum length of usernames and group names.
const MAX_NAME_LEN: usize = 150;

/// A validated account username.
///
/// Usernames are at most 150 characters of letters, digits and `@.+-_`,
/// matching what the web application accepts at registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    /// Creates a validated username.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is empty, longer than 150 characters,
    /// or contains a character outside letters, digits and `@.+-_`.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let reject = |reason: &'static str| DomainError::InvalidUsername {
            value: value.to_string(),
            reason,
        };

        if value.is_empty() {
            return Err(reject("username cannot be empty"));
        }
        if value.chars().count() > MAX_NAME_LEN {
            return Err(reject("username cannot exceed 150 characters"));
        }
        if !value
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
        {
            return Err(reject(
                "username may only contain letters, digits and @/./+/-/_",
            ));
        }

        Ok(Self(value.to_string()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated group (role) name.
///
/// Names are stored exactly as given; `DOCTOR` and `doctor` are distinct
/// groups, as they are in the application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupName(String);

impl GroupName {
    /// Creates a validated group name.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is blank or longer than 150 characters.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::InvalidGroupName {
                value: value.to_string(),
                reason: "group name cannot be blank",
            });
        }
        if value.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::InvalidGroupName {
                value: value.to_string(),
                reason: "group name cannot exceed 150 characters",
            });
        }
        Ok(Self(value.to_string()))
    }

    /// Returns the group name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GroupName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A login account as stored by the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Database identifier.
    pub user_id: i64,
    /// Login name.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

impl UserAccount {
    /// Returns `"first last"` with surrounding whitespace removed.
    ///
    /// Either part may be empty, in which case only the other is returned.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// A patient record joined with its owning account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientAccount {
    /// Database identifier of the patient record.
    pub patient_id: i64,
    /// Whether the account has been activated.
    pub status: bool,
    /// The account the patient logs in with.
    pub user: UserAccount,
}

/// A doctor record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorRecord {
    /// Database identifier of the doctor record.
    pub doctor_id: i64,
    /// The owning account.
    pub user_id: i64,
    /// Department the doctor is attached to.
    pub department: String,
    /// Whether the doctor has been approved.
    pub status: bool,
}

/// A named role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupData {
    /// Database identifier.
    pub group_id: i64,
    /// Role name, e.g. `DOCTOR`.
    pub name: String,
}
