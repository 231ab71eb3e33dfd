// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use hms_admin_domain::DoctorRecord;
use tracing::debug;

use crate::diesel_schema::doctors;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = doctors)]
struct DoctorRow {
    doctor_id: i64,
    user_id: i64,
    department: String,
    status: i32,
}

/// Retrieves the doctor record owned by a user.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user has no doctor record.
pub fn get_doctor_by_user_id(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<DoctorRecord>, PersistenceError> {
    debug!(user_id, "Looking up doctor record");

    let row: Option<DoctorRow> = doctors::table
        .filter(doctors::user_id.eq(user_id))
        .select(DoctorRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(|row| DoctorRecord {
        doctor_id: row.doctor_id,
        user_id: row.user_id,
        department: row.department,
        status: row.status != 0,
    }))
}
