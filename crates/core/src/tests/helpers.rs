// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hms_admin_domain::Username;
use hms_admin_persistence::{DoctorProfile, NewAccount, PatientProfile, Persistence};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_test_user(persistence: &mut Persistence, username: &str) -> i64 {
    persistence
        .create_user(&NewAccount {
            username: Username::new(username).expect("valid test username"),
            first_name: String::from("Test"),
            last_name: username.to_string(),
            password: String::from("password123"),
        })
        .expect("user created")
}

pub fn create_test_patient(persistence: &mut Persistence, username: &str, active: bool) -> i64 {
    let user_id: i64 = create_test_user(persistence, username);
    persistence
        .create_patient(user_id, &PatientProfile::default(), active)
        .expect("patient created")
}

pub fn create_test_doctor(persistence: &mut Persistence, username: &str) -> i64 {
    let user_id: i64 = create_test_user(persistence, username);
    persistence
        .create_doctor(user_id, &DoctorProfile::default(), true)
        .expect("doctor created");
    user_id
}
