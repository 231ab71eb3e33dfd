// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Patient queries.
//!
//! Every query joins the owning user so callers can report who a patient
//! record belongs to without a second lookup.

use diesel::SqliteConnection;
use diesel::dsl::count_star;
use diesel::prelude::*;
use hms_admin_domain::{PatientAccount, UserAccount};
use tracing::debug;

use crate::diesel_schema::{patients, users};
use crate::error::PersistenceError;
use crate::queries::accounts::UserRow;

#[derive(Queryable, Selectable)]
#[diesel(table_name = patients)]
struct PatientRow {
    patient_id: i64,
    status: i32,
}

fn into_account((patient, user): (PatientRow, UserRow)) -> PatientAccount {
    PatientAccount {
        patient_id: patient.patient_id,
        status: patient.status != 0,
        user: UserAccount::from(user),
    }
}

/// Retrieves a patient by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the patient is not found.
pub fn get_patient_by_id(
    conn: &mut SqliteConnection,
    patient_id: i64,
) -> Result<Option<PatientAccount>, PersistenceError> {
    debug!(patient_id, "Looking up patient by ID");

    let row: Option<(PatientRow, UserRow)> = patients::table
        .inner_join(users::table)
        .filter(patients::patient_id.eq(patient_id))
        .select((PatientRow::as_select(), UserRow::as_select()))
        .first(conn)
        .optional()?;

    Ok(row.map(into_account))
}

/// Retrieves the inactive patient with the highest ID.
///
/// The highest ID is the most recently registered patient.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if every patient is active.
pub fn find_latest_inactive_patient(
    conn: &mut SqliteConnection,
) -> Result<Option<PatientAccount>, PersistenceError> {
    let row: Option<(PatientRow, UserRow)> = patients::table
        .inner_join(users::table)
        .filter(patients::status.eq(0))
        .order(patients::patient_id.desc())
        .select((PatientRow::as_select(), UserRow::as_select()))
        .first(conn)
        .optional()?;

    Ok(row.map(into_account))
}

/// Lists every inactive patient in ID order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_inactive_patients(
    conn: &mut SqliteConnection,
) -> Result<Vec<PatientAccount>, PersistenceError> {
    let rows: Vec<(PatientRow, UserRow)> = patients::table
        .inner_join(users::table)
        .filter(patients::status.eq(0))
        .order(patients::patient_id.asc())
        .select((PatientRow::as_select(), UserRow::as_select()))
        .load(conn)?;

    Ok(rows.into_iter().map(into_account).collect())
}

/// Counts inactive patients.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_inactive_patients(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(patients::table
        .filter(patients::status.eq(0))
        .select(count_star())
        .first(conn)?)
}
