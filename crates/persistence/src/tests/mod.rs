// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]


use hms_admin_domain::Username;

use crate::{NewAccount, PatientProfile, Persistence};

pub fn create_test_account(username: &str, first_name: &str, last_name: &str) -> NewAccount {
    NewAccount {
        username: Username::new(username).expect("valid test username"),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        password: String::from("password123"),
    }
}

/// Creates a user and an attached patient record, returning the patient ID.
pub fn create_test_patient(persistence: &mut Persistence, username: &str, active: bool) -> i64 {
    let user_id: i64 = persistence
        .create_user(&create_test_account(username, "Test", username))
        .unwrap();
    persistence
        .create_patient(user_id, &PatientProfile::default(), active)
        .unwrap()
}
