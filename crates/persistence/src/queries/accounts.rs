// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account, group and membership queries.

use diesel::SqliteConnection;
use diesel::dsl::{count_star, exists};
use diesel::prelude::*;
use hms_admin_domain::{GroupData, GroupName, UserAccount, Username};
use tracing::debug;

use crate::diesel_schema::{groups, user_groups, users};
use crate::error::PersistenceError;

/// Diesel Queryable struct for the public columns of a user row.
#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
pub(crate) struct UserRow {
    pub user_id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<UserRow> for UserAccount {
    fn from(row: UserRow) -> Self {
        Self {
            user_id: row.user_id,
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
        }
    }
}

/// Diesel Queryable struct for group rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = groups)]
pub(crate) struct GroupRow {
    pub group_id: i64,
    pub name: String,
}

impl From<GroupRow> for GroupData {
    fn from(row: GroupRow) -> Self {
        Self {
            group_id: row.group_id,
            name: row.name,
        }
    }
}

/// Retrieves a user by exact username.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no user has that username.
pub fn get_user_by_username(
    conn: &mut SqliteConnection,
    username: &Username,
) -> Result<Option<UserAccount>, PersistenceError> {
    debug!("Looking up user by username: {}", username);

    let result: Result<UserRow, diesel::result::Error> = users::table
        .filter(users::username.eq(username.as_str()))
        .select(UserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(UserAccount::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a user by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user is not found.
pub fn get_user_by_id(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<UserAccount>, PersistenceError> {
    debug!(user_id, "Looking up user by ID");

    let row: Option<UserRow> = users::table
        .filter(users::user_id.eq(user_id))
        .select(UserRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(UserAccount::from))
}

/// Counts all user accounts.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_users(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(users::table.select(count_star()).first(conn)?)
}

/// Retrieves a group by exact name.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the group does not exist.
pub fn get_group_by_name(
    conn: &mut SqliteConnection,
    name: &GroupName,
) -> Result<Option<GroupData>, PersistenceError> {
    debug!("Looking up group by name: {}", name);

    let row: Option<GroupRow> = groups::table
        .filter(groups::name.eq(name.as_str()))
        .select(GroupRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(GroupData::from))
}

/// Checks whether a user belongs to a group.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn is_member(
    conn: &mut SqliteConnection,
    user_id: i64,
    group_id: i64,
) -> Result<bool, PersistenceError> {
    Ok(diesel::select(exists(
        user_groups::table
            .filter(user_groups::user_id.eq(user_id))
            .filter(user_groups::group_id.eq(group_id)),
    ))
    .get_result(conn)?)
}

/// Lists the names of every group a user belongs to, sorted by name.
///
/// This always reads the membership table, so calling it after a write
/// reflects that write.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_group_names_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<String>, PersistenceError> {
    Ok(groups::table
        .inner_join(user_groups::table)
        .filter(user_groups::user_id.eq(user_id))
        .select(groups::name)
        .order(groups::name.asc())
        .load(conn)?)
}

/// Lists the usernames of every member of a group, sorted by username.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_group_members(
    conn: &mut SqliteConnection,
    group_id: i64,
) -> Result<Vec<String>, PersistenceError> {
    Ok(users::table
        .inner_join(user_groups::table)
        .filter(user_groups::group_id.eq(group_id))
        .select(users::username)
        .order(users::username.asc())
        .load(conn)?)
}
