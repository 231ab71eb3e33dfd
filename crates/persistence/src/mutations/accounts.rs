// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account, group and membership mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use hms_admin_domain::{GroupData, GroupName, GroupResolution, MembershipChange};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::NewAccount;
use crate::diesel_schema::{groups, user_groups, users};
use crate::error::PersistenceError;
use crate::queries::accounts::{get_group_by_name, is_member};

/// Creates a login account.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `account` - Username, names and plain-text password
/// * `hash_cost` - bcrypt cost factor for the password hash
///
/// # Errors
///
/// Returns an error if hashing fails or the username is already taken.
pub fn create_user(
    conn: &mut SqliteConnection,
    account: &NewAccount,
    hash_cost: u32,
) -> Result<i64, PersistenceError> {
    info!("Creating user with username: {}", account.username);

    let password_hash: String = bcrypt::hash(&account.password, hash_cost)?;

    diesel::insert_into(users::table)
        .values((
            users::username.eq(account.username.as_str()),
            users::first_name.eq(&account.first_name),
            users::last_name.eq(&account.last_name),
            users::password_hash.eq(&password_hash),
        ))
        .execute(conn)?;

    let user_id: i64 = conn.get_last_insert_rowid()?;
    debug!(user_id, "User created");

    Ok(user_id)
}

/// Returns the group with the given name, inserting it first if absent.
///
/// # Errors
///
/// Returns an error if the lookup or insert fails.
pub fn get_or_create_group(
    conn: &mut SqliteConnection,
    name: &GroupName,
) -> Result<(GroupData, GroupResolution), PersistenceError> {
    conn.immediate_transaction(|conn| {
        if let Some(group) = get_group_by_name(conn, name)? {
            debug!(group_id = group.group_id, "Group {} already exists", name);
            return Ok((group, GroupResolution::Existing));
        }

        diesel::insert_into(groups::table)
            .values(groups::name.eq(name.as_str()))
            .execute(conn)?;
        let group_id: i64 = conn.get_last_insert_rowid()?;

        info!(group_id, "Created group {}", name);
        Ok((
            GroupData {
                group_id,
                name: name.as_str().to_string(),
            },
            GroupResolution::Created,
        ))
    })
}

/// Adds a user to a group unless they are already a member.
///
/// An existing membership is left untouched and reported as
/// `MembershipChange::AlreadyMember`.
///
/// # Errors
///
/// Returns an error if the user or group does not exist, or the
/// database operation fails.
pub fn add_user_to_group(
    conn: &mut SqliteConnection,
    user_id: i64,
    group_id: i64,
) -> Result<MembershipChange, PersistenceError> {
    conn.immediate_transaction(|conn| {
        if is_member(conn, user_id, group_id)? {
            debug!(user_id, group_id, "User is already a group member");
            return Ok(MembershipChange::AlreadyMember);
        }

        diesel::insert_into(user_groups::table)
            .values((
                user_groups::user_id.eq(user_id),
                user_groups::group_id.eq(group_id),
            ))
            .execute(conn)?;

        info!(user_id, group_id, "Added user to group");
        Ok(MembershipChange::Added)
    })
}
