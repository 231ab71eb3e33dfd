// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the hospital management admin tools.
//!
//! This crate owns the `SQLite` store holding accounts, roles, and the
//! doctor and patient records attached to accounts. It is built on Diesel
//! and exposes a single adapter, [`Persistence`], which the admin tools
//! receive from their caller instead of opening a database themselves.
//!
//! ## Operations
//!
//! - query by filter (`list_inactive_patients`, `find_latest_inactive_patient`)
//! - query by unique key (`get_user_by_username`, `get_doctor_by_user_id`)
//! - bulk update (`activate_all_inactive_patients`)
//! - get-or-create (`get_or_create_group`)
//! - relation refresh (`list_group_names_for_user`)
//!
//! ## Testing Philosophy
//!
//! - Every test opens its own in-memory database via `new_in_memory()`
//! - Migrations run on every connection, so tests always see the real schema
//! - Nothing depends on external infrastructure

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use hms_admin_domain::{
    DoctorRecord, GroupData, GroupName, GroupResolution, MembershipChange, PatientAccount,
    UserAccount, Username,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// bcrypt cost for accounts created in throwaway in-memory databases.
const IN_MEMORY_HASH_COST: u32 = 4;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{DoctorProfile, NewAccount, PatientProfile};
pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Persistence adapter for accounts, roles, doctors and patients.
///
/// One adapter wraps one connection. Callers open it once and pass it by
/// `&mut` into each operation.
pub struct Persistence {
    conn: SqliteConnection,
    hash_cost: u32,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared-cache database, so instances never
    /// see each other's data. Passwords are hashed with a reduced bcrypt cost.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url = format!("file:hms_memdb_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self {
            conn,
            hash_cost: IN_MEMORY_HASH_COST,
        })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// The file is created and migrated if it does not exist.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::configure_shared_file(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self {
            conn,
            hash_cost: bcrypt::DEFAULT_COST,
        })
    }

    /// Opens an existing file-based `SQLite` database.
    ///
    /// Unlike [`Persistence::new_with_file`], a missing file is an error and
    /// nothing is created on disk.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DatabaseConnectionFailed` if the file does
    /// not exist, or any error from opening or initializing it.
    pub fn open_existing<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path: &Path = path.as_ref();
        if !path.is_file() {
            return Err(PersistenceError::DatabaseConnectionFailed(format!(
                "database file {} does not exist",
                path.display()
            )));
        }
        Self::new_with_file(path)
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Accounts
    // ========================================================================

    /// Creates a login account and returns its user ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the username is taken or the insert fails.
    pub fn create_user(&mut self, account: &NewAccount) -> Result<i64, PersistenceError> {
        mutations::accounts::create_user(&mut self.conn, account, self.hash_cost)
    }

    /// Retrieves a user by exact username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_username(
        &mut self,
        username: &Username,
    ) -> Result<Option<UserAccount>, PersistenceError> {
        queries::accounts::get_user_by_username(&mut self.conn, username)
    }

    /// Retrieves a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_id(&mut self, user_id: i64) -> Result<Option<UserAccount>, PersistenceError> {
        queries::accounts::get_user_by_id(&mut self.conn, user_id)
    }

    /// Counts all user accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_users(&mut self) -> Result<i64, PersistenceError> {
        queries::accounts::count_users(&mut self.conn)
    }

    // ========================================================================
    // Groups & Memberships
    // ========================================================================

    /// Retrieves a group by exact name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_group_by_name(
        &mut self,
        name: &GroupName,
    ) -> Result<Option<GroupData>, PersistenceError> {
        queries::accounts::get_group_by_name(&mut self.conn, name)
    }

    /// Returns the named group, creating it if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup or insert fails.
    pub fn get_or_create_group(
        &mut self,
        name: &GroupName,
    ) -> Result<(GroupData, GroupResolution), PersistenceError> {
        mutations::accounts::get_or_create_group(&mut self.conn, name)
    }

    /// Checks whether a user belongs to a group.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn is_member(&mut self, user_id: i64, group_id: i64) -> Result<bool, PersistenceError> {
        queries::accounts::is_member(&mut self.conn, user_id, group_id)
    }

    /// Adds a user to a group; a no-op if they are already a member.
    ///
    /// # Errors
    ///
    /// Returns an error if the user or group does not exist or the insert fails.
    pub fn add_user_to_group(
        &mut self,
        user_id: i64,
        group_id: i64,
    ) -> Result<MembershipChange, PersistenceError> {
        mutations::accounts::add_user_to_group(&mut self.conn, user_id, group_id)
    }

    /// Lists a user's group names as currently stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_group_names_for_user(
        &mut self,
        user_id: i64,
    ) -> Result<Vec<String>, PersistenceError> {
        queries::accounts::list_group_names_for_user(&mut self.conn, user_id)
    }

    /// Lists the usernames of a group's members.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_group_members(&mut self, group_id: i64) -> Result<Vec<String>, PersistenceError> {
        queries::accounts::list_group_members(&mut self.conn, group_id)
    }

    // ========================================================================
    // Doctors
    // ========================================================================

    /// Creates the doctor record for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or already has one.
    pub fn create_doctor(
        &mut self,
        user_id: i64,
        profile: &DoctorProfile,
        approved: bool,
    ) -> Result<i64, PersistenceError> {
        mutations::doctors::create_doctor(&mut self.conn, user_id, profile, approved)
    }

    /// Retrieves the doctor record owned by a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_doctor_by_user_id(
        &mut self,
        user_id: i64,
    ) -> Result<Option<DoctorRecord>, PersistenceError> {
        queries::doctors::get_doctor_by_user_id(&mut self.conn, user_id)
    }

    // ========================================================================
    // Patients
    // ========================================================================

    /// Creates the patient record for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or already has one.
    pub fn create_patient(
        &mut self,
        user_id: i64,
        profile: &PatientProfile,
        active: bool,
    ) -> Result<i64, PersistenceError> {
        mutations::patients::create_patient(&mut self.conn, user_id, profile, active)
    }

    /// Retrieves a patient by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_patient_by_id(
        &mut self,
        patient_id: i64,
    ) -> Result<Option<PatientAccount>, PersistenceError> {
        queries::patients::get_patient_by_id(&mut self.conn, patient_id)
    }

    /// Retrieves the most recently registered inactive patient.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn find_latest_inactive_patient(
        &mut self,
    ) -> Result<Option<PatientAccount>, PersistenceError> {
        queries::patients::find_latest_inactive_patient(&mut self.conn)
    }

    /// Lists every inactive patient in ID order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_inactive_patients(&mut self) -> Result<Vec<PatientAccount>, PersistenceError> {
        queries::patients::list_inactive_patients(&mut self.conn)
    }

    /// Counts inactive patients.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_inactive_patients(&mut self) -> Result<i64, PersistenceError> {
        queries::patients::count_inactive_patients(&mut self.conn)
    }

    /// Activates the most recently registered inactive patient.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn activate_latest_inactive_patient(
        &mut self,
    ) -> Result<Option<PatientAccount>, PersistenceError> {
        mutations::patients::activate_latest_inactive_patient(&mut self.conn)
    }

    /// Activates every inactive patient in one statement.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn activate_all_inactive_patients(
        &mut self,
    ) -> Result<Vec<PatientAccount>, PersistenceError> {
        mutations::patients::activate_all_inactive_patients(&mut self.conn)
    }
}
