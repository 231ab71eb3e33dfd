// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Maintenance operations for the hospital management database.
//!
//! Every operation takes an already-opened [`Persistence`] handle and
//! returns a report or an [`AdminError`]; nothing here prints, opens a
//! database, or reads the environment.
//!
//! - [`activate_latest_patient`] / [`activate_all_patients`] flip the
//!   activation flag on patient accounts.
//! - [`repair_groups`] makes sure a doctor and a patient account hold
//!   their roles.
//!
//! [`Persistence`]: hms_admin_persistence::Persistence

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

mod activator;
mod error;
mod group_repair;

#[cfg(test)]
mod tests;

pub use activator::{
    ActivationMode, ActivationReport, activate, activate_all_patients, activate_latest_patient,
};
pub use error::AdminError;
pub use group_repair::{
    DEFAULT_DOCTOR_USERNAME, DEFAULT_PATIENT_USERNAME, DoctorRepair, PatientRepair, RepairConfig,
    RepairReport, RoleRepair, repair_groups,
};
