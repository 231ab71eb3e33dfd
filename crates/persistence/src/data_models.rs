// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hms_admin_domain::Username;

/// Input for creating a login account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: Username,
    pub first_name: String,
    pub last_name: String,
    /// Plain-text password; hashed before it is stored.
    pub password: String,
}

/// Profile fields of a patient record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientProfile {
    pub address: String,
    pub mobile: String,
    pub symptoms: String,
    pub assigned_doctor_id: Option<i64>,
}

/// Profile fields of a doctor record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorProfile {
    pub department: String,
    pub address: String,
    pub mobile: String,
}

impl Default for DoctorProfile {
    fn default() -> Self {
        Self {
            department: String::from("Cardiologist"),
            address: String::new(),
            mobile: String::new(),
        }
    }
}
