// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::Local;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{info, warn};

use crate::config::SmokeConfig;
use crate::result::{SmokeRun, TIMESTAMP_FORMAT, TestResult};
use crate::transport::{ApiRequest, ApiResponse, ApiTransport, Method, TransportError};

const SERVER_CONNECTION: &str = "Server connection";
const DOCTOR_LIST: &str = "Doctor list";
const PATIENT_REGISTER: &str = "Patient registration";
const PATIENT_LOGIN: &str = "Patient login";
const PATIENT_INFO: &str = "Patient info";
const UPDATE_PATIENT_INFO: &str = "Update patient info";
const PATIENT_LOGOUT: &str = "Patient logout";

const MISSING_TOKEN: &str = "missing token, log in first";

/// Number of token characters shown in console output.
const TOKEN_PREVIEW_CHARS: usize = 20;

/// Number of doctors in a doctor-list response.
///
/// Accepts a bare array or an object whose `data` field is an array;
/// anything else counts as zero.
#[must_use]
pub fn count_doctors(body: &Value) -> usize {
    match body {
        Value::Array(doctors) => doctors.len(),
        Value::Object(map) => map.get("data").and_then(Value::as_array).map_or(0, Vec::len),
        _ => 0,
    }
}

/// Why a step's request did not produce the expected JSON response.
enum StepFailure {
    Transport(TransportError),
    Status(ApiResponse),
    InvalidJson(serde_json::Error),
}

impl StepFailure {
    fn describe(&self, action: &str) -> String {
        match self {
            Self::Transport(err) => format!("request error: {err}"),
            Self::Status(response) => {
                format!("{action} failed ({}): {}", response.status, response.body)
            }
            Self::InvalidJson(err) => format!("invalid JSON response: {err}"),
        }
    }
}

/// Python-style truthiness of a JSON value.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn token_preview(token: &str) -> String {
    let preview: String = token.chars().take(TOKEN_PREVIEW_CHARS).collect();
    format!("{preview}...")
}

/// Runs the smoke scenario against one server through one transport.
///
/// The tester holds the token from the login step and the patient ID from
/// the registration step; later steps read them.
pub struct ApiTester<T: ApiTransport> {
    transport: T,
    config: SmokeConfig,
    token: Option<String>,
    patient_id: Option<Value>,
    results: Vec<TestResult>,
}

impl<T: ApiTransport> ApiTester<T> {
    pub const fn new(transport: T, config: SmokeConfig) -> Self {
        Self {
            transport,
            config,
            token: None,
            patient_id: None,
            results: Vec::new(),
        }
    }

    /// Token cached by the last successful login.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Patient ID returned by the last successful registration.
    #[must_use]
    pub const fn patient_id(&self) -> Option<&Value> {
        self.patient_id.as_ref()
    }

    /// Outcomes recorded so far, in order.
    #[must_use]
    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    #[must_use]
    pub const fn config(&self) -> &SmokeConfig {
        &self.config
    }

    /// Returns the transport, e.g. to inspect a scripted fake.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    fn record(
        &mut self,
        test_name: &str,
        success: bool,
        message: String,
        response_data: Option<Value>,
    ) -> bool {
        // Empty payloads are left out of the report.
        let response_data = response_data.filter(is_truthy);
        let result = TestResult::now(test_name, success, message, response_data);
        println!("{}", result.status_line());
        if success {
            info!(test = test_name, "Smoke step passed");
        } else {
            warn!(test = test_name, message = %result.message, "Smoke step failed");
        }
        self.results.push(result);
        success
    }

    /// Sends `request` and parses the body as JSON if the status matches.
    fn expect_json(&self, request: &ApiRequest, expected_status: u16) -> Result<Value, StepFailure> {
        let response = self
            .transport
            .send(request)
            .map_err(StepFailure::Transport)?;
        if response.status != expected_status {
            return Err(StepFailure::Status(response));
        }
        response.json().map_err(StepFailure::InvalidJson)
    }

    fn request(&self, method: Method, endpoint: &str) -> ApiRequest {
        ApiRequest::new(method, self.config.api_url(endpoint), self.timeout())
    }

    const fn timeout(&self) -> Duration {
        self.config.request_timeout
    }

    /// GET `/`; passes on HTTP 200.
    pub fn test_server_connection(&mut self) -> bool {
        let request = ApiRequest::new(
            Method::Get,
            self.config.root_url(),
            self.config.connect_timeout,
        );

        match self.transport.send(&request) {
            Ok(response) if response.status == 200 => {
                self.record(SERVER_CONNECTION, true, String::from("server is up"), None)
            }
            Ok(response) => self.record(
                SERVER_CONNECTION,
                false,
                format!("unexpected server status: {}", response.status),
                None,
            ),
            Err(err) => self.record(
                SERVER_CONNECTION,
                false,
                format!("connection failed: {err}"),
                None,
            ),
        }
    }

    /// GET `/api/doctors/`; passes on HTTP 200 with a JSON body of any shape.
    pub fn test_doctors_list(&mut self) -> bool {
        let request = self.request(Method::Get, "doctors/");

        match self.expect_json(&request, 200) {
            Ok(body) => {
                let count = count_doctors(&body);
                self.record(
                    DOCTOR_LIST,
                    true,
                    format!("fetched doctor list, {count} doctors"),
                    Some(body),
                )
            }
            Err(failure) => self.record(DOCTOR_LIST, false, failure.describe("fetch"), None),
        }
    }

    /// POST the registration data to `/api/patient/register/`; passes on
    /// HTTP 201 and keeps the returned `patient_id`.
    pub fn test_patient_register(&mut self) -> bool {
        let body = match serde_json::to_value(self.config.registration_data()) {
            Ok(body) => body,
            Err(err) => {
                return self.record(
                    PATIENT_REGISTER,
                    false,
                    format!("could not encode registration data: {err}"),
                    None,
                );
            }
        };
        let request = self.request(Method::Post, "patient/register/").with_body(body);

        match self.expect_json(&request, 201) {
            Ok(body) => {
                self.patient_id = body.get("patient_id").filter(|id| !id.is_null()).cloned();
                let shown = self
                    .patient_id
                    .as_ref()
                    .map_or_else(|| String::from("none"), ToString::to_string);
                self.record(
                    PATIENT_REGISTER,
                    true,
                    format!("registered, patient ID: {shown}"),
                    Some(body),
                )
            }
            Err(failure) => {
                self.record(PATIENT_REGISTER, false, failure.describe("registration"), None)
            }
        }
    }

    /// POST the credentials to `/api/patient/login/`.
    ///
    /// Passes on HTTP 200 with a truthy `success` and a string at
    /// `data.token`; the token is cached for the authenticated steps.
    pub fn test_patient_login(&mut self) -> bool {
        let credentials = json!({
            "username": self.config.username,
            "password": self.config.password,
        });
        let request = self
            .request(Method::Post, "patient/login/")
            .with_body(credentials);

        let body = match self.expect_json(&request, 200) {
            Ok(body) => body,
            Err(failure) => {
                return self.record(PATIENT_LOGIN, false, failure.describe("login"), None);
            }
        };

        if !body.get("success").is_some_and(is_truthy) {
            let reason = match body.get("message") {
                Some(Value::String(message)) => message.clone(),
                Some(other) => other.to_string(),
                None => String::from("unknown error"),
            };
            return self.record(
                PATIENT_LOGIN,
                false,
                format!("login failed: {reason}"),
                Some(body),
            );
        }

        let token = body
            .get("data")
            .and_then(|data| data.get("token"))
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_string);

        match token {
            Some(token) => {
                let message = format!("logged in, token: {}", token_preview(&token));
                self.token = Some(token);
                self.record(PATIENT_LOGIN, true, message, Some(body))
            }
            None => self.record(
                PATIENT_LOGIN,
                false,
                String::from("login response is missing a token"),
                Some(body),
            ),
        }
    }

    /// Runs an authenticated step, failing locally when no token is cached.
    fn authenticated_step(
        &mut self,
        test_name: &str,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
        success_message: &str,
        action: &str,
    ) -> bool {
        let Some(token) = self.token.clone() else {
            return self.record(test_name, false, MISSING_TOKEN.to_string(), None);
        };

        let mut request = self.request(method, endpoint).with_token(&token);
        if let Some(body) = body {
            request = request.with_body(body);
        }

        match self.expect_json(&request, 200) {
            Ok(data) => self.record(test_name, true, success_message.to_string(), Some(data)),
            Err(failure) => self.record(test_name, false, failure.describe(action), None),
        }
    }

    /// GET `/api/patient/info/` with the cached token.
    pub fn test_patient_info(&mut self) -> bool {
        self.authenticated_step(
            PATIENT_INFO,
            Method::Get,
            "patient/info/",
            None,
            "fetched patient info",
            "fetch",
        )
    }

    /// PUT the configured address and symptoms to `/api/patient/update/`.
    pub fn test_update_patient_info(&mut self) -> bool {
        let update = json!({
            "address": self.config.update.address,
            "symptoms": self.config.update.symptoms,
        });
        self.authenticated_step(
            UPDATE_PATIENT_INFO,
            Method::Put,
            "patient/update/",
            Some(update),
            "patient info updated",
            "update",
        )
    }

    /// POST `/api/patient/logout/` with the cached token.
    pub fn test_patient_logout(&mut self) -> bool {
        self.authenticated_step(
            PATIENT_LOGOUT,
            Method::Post,
            "patient/logout/",
            None,
            "logged out",
            "logout",
        )
    }

    /// Runs every step in order and returns the outcomes with their summary.
    ///
    /// Registration runs between the doctor listing and login only when
    /// [`SmokeConfig::register`] is set.
    pub fn run_all_tests(&mut self) -> SmokeRun {
        println!("{}", "=".repeat(60));
        println!("Hospital management API smoke test");
        println!("{}", "=".repeat(60));
        println!("Started: {}", Local::now().format(TIMESTAMP_FORMAT));
        println!("Server: {}", self.config.base_url);
        println!("Test user: {}", self.config.username);
        println!("{}", "-".repeat(60));

        self.run_step("Server connection test", Self::test_server_connection);
        self.run_step("Doctor list endpoint test", Self::test_doctors_list);
        if self.config.register {
            self.run_step(
                "Patient registration endpoint test",
                Self::test_patient_register,
            );
        }
        self.run_step("Patient login endpoint test", Self::test_patient_login);
        self.run_step("Patient info endpoint test", Self::test_patient_info);
        self.run_step(
            "Update patient info endpoint test",
            Self::test_update_patient_info,
        );
        self.run_step("Patient logout endpoint test", Self::test_patient_logout);

        SmokeRun::from_results(self.results.clone())
    }

    fn run_step(&mut self, description: &str, step: fn(&mut Self) -> bool) {
        println!();
        println!("> {description}");
        step(self);
    }
}
