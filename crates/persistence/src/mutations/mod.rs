// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! ## Module Organization
//!
//! - `accounts` — account creation, get-or-create for groups, memberships
//! - `doctors` — doctor record creation
//! - `patients` — patient record creation and activation
//!
//! Backend-specific helpers (e.g. `get_last_insert_rowid()`) are reached
//! through the `PersistenceBackend` trait.

pub mod accounts;
pub mod doctors;
pub mod patients;
