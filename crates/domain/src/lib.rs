// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account, role and patient types shared by the hospital management
//! admin tools.

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

mod error;
mod outcome;
mod types;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use outcome::{GroupResolution, MembershipChange};
pub use types::{
    DOCTOR_GROUP, DoctorRecord, GroupData, GroupName, PATIENT_GROUP, PatientAccount, UserAccount,
    Username,
};
