// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Smoke test of the hospital management REST API.
//!
//! [`ApiTester`] walks a fixed scenario (connectivity, doctor listing,
//! optional registration, login, profile fetch, profile update, logout)
//! through an [`ApiTransport`]. Every step is attempted; a failed step is
//! recorded as a [`TestResult`] and never stops the sweep.
//!
//! The transport is a trait so the scenario can run against a scripted
//! fake in tests and against [`HttpTransport`] for real runs.

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

mod config;
mod report;
mod result;
mod tester;
mod transport;

#[cfg(test)]
mod tests;

pub use config::{DEFAULT_BASE_URL, ProfileUpdate, RegistrationData, SmokeConfig};
pub use report::{ReportError, Summary, TestReport, render_summary};
pub use result::{SmokeRun, TestResult};
pub use tester::{ApiTester, count_doctors};
pub use transport::{ApiRequest, ApiResponse, ApiTransport, HttpTransport, Method, TransportError};
