// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Patient creation and activation.
//!
//! Activation only ever moves `status` from 0 to 1. Both activation paths
//! select and update inside one immediate transaction, so the records they
//! report are exactly the records they changed.

use diesel::SqliteConnection;
use diesel::prelude::*;
use hms_admin_domain::PatientAccount;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::PatientProfile;
use crate::diesel_schema::patients;
use crate::error::PersistenceError;
use crate::queries::patients::{find_latest_inactive_patient, list_inactive_patients};

/// Creates the patient record for an existing user.
///
/// # Errors
///
/// Returns an error if the user does not exist, already has a patient
/// record, or the insert fails.
pub fn create_patient(
    conn: &mut SqliteConnection,
    user_id: i64,
    profile: &PatientProfile,
    active: bool,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(patients::table)
        .values((
            patients::user_id.eq(user_id),
            patients::address.eq(&profile.address),
            patients::mobile.eq(&profile.mobile),
            patients::symptoms.eq(&profile.symptoms),
            patients::assigned_doctor_id.eq(profile.assigned_doctor_id),
            patients::status.eq(i32::from(active)),
        ))
        .execute(conn)?;

    let patient_id: i64 = conn.get_last_insert_rowid()?;
    info!(patient_id, user_id, active, "Created patient record");

    Ok(patient_id)
}

/// Activates the inactive patient with the highest ID.
///
/// # Returns
///
/// The activated patient, or `None` if there was no inactive patient.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn activate_latest_inactive_patient(
    conn: &mut SqliteConnection,
) -> Result<Option<PatientAccount>, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let Some(mut patient) = find_latest_inactive_patient(conn)? else {
            return Ok(None);
        };

        diesel::update(patients::table)
            .filter(patients::patient_id.eq(patient.patient_id))
            .filter(patients::status.eq(0))
            .set(patients::status.eq(1))
            .execute(conn)?;
        patient.status = true;

        info!(
            patient_id = patient.patient_id,
            user_id = patient.user.user_id,
            "Activated patient"
        );
        Ok(Some(patient))
    })
}

/// Activates every inactive patient with a single `UPDATE`.
///
/// # Returns
///
/// The patients that were activated, in ID order. Empty if there were none.
///
/// # Errors
///
/// Returns an error if the database operation fails. Nothing is activated
/// in that case.
pub fn activate_all_inactive_patients(
    conn: &mut SqliteConnection,
) -> Result<Vec<PatientAccount>, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let mut pending: Vec<PatientAccount> = list_inactive_patients(conn)?;
        if pending.is_empty() {
            return Ok(pending);
        }

        let updated: usize = diesel::update(patients::table)
            .filter(patients::status.eq(0))
            .set(patients::status.eq(1))
            .execute(conn)?;

        if updated != pending.len() {
            return Err(PersistenceError::Other(format!(
                "Expected to activate {} patients but updated {updated}",
                pending.len()
            )));
        }

        for patient in &mut pending {
            patient.status = true;
        }

        info!(count = updated, "Activated all inactive patients");
        Ok(pending)
    })
}
