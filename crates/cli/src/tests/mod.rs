// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]


use hms_admin_domain::Username;
use hms_admin_persistence::{DoctorProfile, NewAccount, PatientProfile, Persistence};

pub fn create_user(persistence: &mut Persistence, username: &str, first: &str, last: &str) -> i64 {
    persistence
        .create_user(&NewAccount {
            username: Username::new(username).unwrap(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            password: String::from("password123"),
        })
        .unwrap()
}

pub fn create_inactive_patient(persistence: &mut Persistence, username: &str) -> i64 {
    let user_id = create_user(persistence, username, "Li", "Ming");
    persistence
        .create_patient(user_id, &PatientProfile::default(), false)
        .unwrap()
}

pub fn create_doctor(persistence: &mut Persistence, username: &str) -> i64 {
    let user_id = create_user(persistence, username, "Zhang", "Wei");
    persistence
        .create_doctor(user_id, &DoctorProfile::default(), true)
        .unwrap();
    user_id
}
