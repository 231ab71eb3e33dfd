// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::Serialize;
use std::time::Duration;

/// Address of a locally running development server.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

const DEFAULT_USERNAME: &str = "testuser_20250720_104535";
const DEFAULT_PASSWORD: &str = "password123";

/// Body of the registration request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationData {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub address: String,
    pub mobile: String,
    pub symptoms: String,
    pub assigned_doctor_id: Option<i64>,
}

/// Body of the profile update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    pub address: String,
    pub symptoms: String,
}

impl Default for ProfileUpdate {
    fn default() -> Self {
        Self {
            address: String::from("Updated Address, Pudong New Area, Shanghai"),
            symptoms: String::from("Updated symptom description"),
        }
    }
}

/// Everything a smoke run needs to know about the server and the test account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmokeConfig {
    /// Server root, without a trailing slash.
    pub base_url: String,
    /// Account used for login (and registration when enabled).
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub mobile: String,
    pub symptoms: String,
    /// Fields sent by the update step.
    pub update: ProfileUpdate,
    /// Run the registration step before logging in.
    pub register: bool,
    /// Timeout of the connectivity check.
    pub connect_timeout: Duration,
    /// Timeout of every other request.
    pub request_timeout: Duration,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            first_name: String::from("Test"),
            last_name: String::from("User"),
            address: String::from("Test Address, Chaoyang District, Beijing"),
            mobile: String::from("13800138000"),
            symptoms: String::from("Test symptoms"),
            update: ProfileUpdate::default(),
            register: false,
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl SmokeConfig {
    /// Returns a config for `base_url` with every other field defaulted.
    ///
    /// A trailing slash on `base_url` is dropped.
    #[must_use]
    pub fn for_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Full URL of an API endpoint, e.g. `patient/login/`.
    #[must_use]
    pub fn api_url(&self, endpoint: &str) -> String {
        format!("{}/api/{endpoint}", self.base_url.trim_end_matches('/'))
    }

    /// URL of the server root.
    #[must_use]
    pub fn root_url(&self) -> String {
        format!("{}/", self.base_url.trim_end_matches('/'))
    }

    /// Registration body built from the configured account.
    #[must_use]
    pub fn registration_data(&self) -> RegistrationData {
        RegistrationData {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            confirm_password: self.password.clone(),
            address: self.address.clone(),
            mobile: self.mobile.clone(),
            symptoms: self.symptoms.clone(),
            assigned_doctor_id: None,
        }
    }
}
