// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! ## Module Organization
//!
//! - `accounts` — users, groups and group memberships
//! - `doctors` — doctor records
//! - `patients` — patient records joined with their accounts

pub mod accounts;
pub mod doctors;
pub mod patients;
