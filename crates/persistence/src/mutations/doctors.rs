// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::DoctorProfile;
use crate::diesel_schema::doctors;
use crate::error::PersistenceError;

/// Creates the doctor record for an existing user.
///
/// # Errors
///
/// Returns an error if the user does not exist, already has a doctor
/// record, or the insert fails.
pub fn create_doctor(
    conn: &mut SqliteConnection,
    user_id: i64,
    profile: &DoctorProfile,
    approved: bool,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(doctors::table)
        .values((
            doctors::user_id.eq(user_id),
            doctors::department.eq(&profile.department),
            doctors::address.eq(&profile.address),
            doctors::mobile.eq(&profile.mobile),
            doctors::status.eq(i32::from(approved)),
        ))
        .execute(conn)?;

    let doctor_id: i64 = conn.get_last_insert_rowid()?;
    info!(doctor_id, user_id, "Created doctor record");

    Ok(doctor_id)
}
