// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde_json::json;
use std::time::Duration;

use super::{LOGIN_OK, ScriptedTransport};
use crate::{ApiTester, Method, SmokeConfig, TransportError, count_doctors};

fn tester(transport: ScriptedTransport) -> ApiTester<ScriptedTransport> {
    ApiTester::new(transport, SmokeConfig::for_base_url("http://api.test/"))
}

fn logged_in(transport: ScriptedTransport) -> ApiTester<ScriptedTransport> {
    let mut tester = tester(transport);
    assert!(tester.test_patient_login());
    tester
}

#[test]
fn test_count_doctors_accepts_bare_list() {
    assert_eq!(count_doctors(&json!([{"id": 1}, {"id": 2}, {"id": 3}])), 3);
}

#[test]
fn test_count_doctors_accepts_data_wrapper() {
    assert_eq!(count_doctors(&json!({"data": [{"id": 1}, {"id": 2}]})), 2);
}

#[test]
fn test_count_doctors_defaults_to_zero() {
    assert_eq!(count_doctors(&json!({"doctors": [1, 2]})), 0);
    assert_eq!(count_doctors(&json!({"data": "nope"})), 0);
    assert_eq!(count_doctors(&json!("text")), 0);
}

#[test]
fn test_server_connection_uses_short_timeout() {
    let mut tester = tester(ScriptedTransport::new().reply(200, "<html></html>"));

    assert!(tester.test_server_connection());

    let requests = tester.transport().requests();
    assert_eq!(requests[0].url, "http://api.test/");
    assert_eq!(requests[0].method, Method::Get);
    assert_eq!(requests[0].timeout, Duration::from_secs(5));
    assert_eq!(tester.results()[0].message, "server is up");
}

#[test]
fn test_server_connection_reports_bad_status() {
    let mut tester = tester(ScriptedTransport::new().reply(503, "down"));

    assert!(!tester.test_server_connection());
    assert_eq!(tester.results()[0].message, "unexpected server status: 503");
}

#[test]
fn test_server_connection_records_transport_failure() {
    let mut tester = tester(ScriptedTransport::new().fail(TransportError::Timeout {
        url: String::from("http://api.test/"),
        timeout: Duration::from_secs(5),
    }));

    assert!(!tester.test_server_connection());
    let message = &tester.results()[0].message;
    assert!(message.starts_with("connection failed:"), "{message}");
    assert!(message.contains("timed out after 5s"), "{message}");
}

#[test]
fn test_doctor_list_unrelated_shape_still_passes() {
    let mut tester = tester(ScriptedTransport::new().reply(200, r#"{"count": 7}"#));

    assert!(tester.test_doctors_list());

    let result = &tester.results()[0];
    assert_eq!(result.message, "fetched doctor list, 0 doctors");
    assert_eq!(result.response_data, Some(json!({"count": 7})));
    assert_eq!(
        tester.transport().request_urls(),
        vec![String::from("http://api.test/api/doctors/")]
    );
}

#[test]
fn test_doctor_list_empty_payload_is_not_stored() {
    let mut tester = tester(ScriptedTransport::new().reply(200, "[]"));

    assert!(tester.test_doctors_list());

    let result = &tester.results()[0];
    assert_eq!(result.message, "fetched doctor list, 0 doctors");
    assert_eq!(result.response_data, None);
}

#[test]
fn test_doctor_list_counts_wrapped_list() {
    let mut tester = tester(ScriptedTransport::new().reply(200, r#"{"data": [{}, {}]}"#));

    assert!(tester.test_doctors_list());
    assert_eq!(tester.results()[0].message, "fetched doctor list, 2 doctors");
}

#[test]
fn test_doctor_list_non_json_body_fails() {
    let mut tester = tester(ScriptedTransport::new().reply(200, "<html>oops</html>"));

    assert!(!tester.test_doctors_list());
    assert!(tester.results()[0].message.starts_with("invalid JSON response"));
}

#[test]
fn test_doctor_list_bad_status_includes_body() {
    let mut tester = tester(ScriptedTransport::new().reply(500, "Internal Server Error"));

    assert!(!tester.test_doctors_list());
    assert_eq!(
        tester.results()[0].message,
        "fetch failed (500): Internal Server Error"
    );
}

#[test]
fn test_login_caches_token_and_previews_it() {
    let mut tester = tester(ScriptedTransport::new().reply(200, LOGIN_OK));

    assert!(tester.test_patient_login());

    assert_eq!(tester.token(), Some("0123456789abcdefghijKLMNOP"));
    assert_eq!(
        tester.results()[0].message,
        "logged in, token: 0123456789abcdefghij..."
    );
    let request = &tester.transport().requests()[0];
    assert_eq!(request.method, Method::Post);
    assert_eq!(
        request.body,
        Some(json!({"username": "testuser_20250720_104535", "password": "password123"}))
    );
    assert_eq!(request.token, None);
}

#[test]
fn test_login_falsy_success_uses_message() {
    let mut tester = tester(
        ScriptedTransport::new().reply(200, r#"{"success": false, "message": "account inactive"}"#),
    );

    assert!(!tester.test_patient_login());
    assert_eq!(tester.results()[0].message, "login failed: account inactive");
    assert_eq!(tester.token(), None);
}

#[test]
fn test_login_without_message_reports_unknown_error() {
    let mut tester = tester(ScriptedTransport::new().reply(200, r#"{"success": 0}"#));

    assert!(!tester.test_patient_login());
    assert_eq!(tester.results()[0].message, "login failed: unknown error");
}

#[test]
fn test_login_without_token_fails() {
    let mut tester = tester(ScriptedTransport::new().reply(200, r#"{"success": true, "data": {}}"#));

    assert!(!tester.test_patient_login());
    assert_eq!(
        tester.results()[0].message,
        "login response is missing a token"
    );
    assert_eq!(tester.token(), None);
}

#[test]
fn test_login_bad_status_includes_body() {
    let mut tester = tester(ScriptedTransport::new().reply(401, r#"{"detail": "bad credentials"}"#));

    assert!(!tester.test_patient_login());
    assert_eq!(
        tester.results()[0].message,
        r#"login failed (401): {"detail": "bad credentials"}"#
    );
}

#[test]
fn test_token_steps_without_login_make_no_calls() {
    let mut tester = tester(ScriptedTransport::new());

    assert!(!tester.test_patient_info());
    assert!(!tester.test_update_patient_info());
    assert!(!tester.test_patient_logout());

    assert!(tester.transport().requests().is_empty());
    assert_eq!(tester.results().len(), 3);
    for result in tester.results() {
        assert!(!result.success);
        assert!(result.message.contains("missing token"), "{}", result.message);
    }
}

#[test]
fn test_authenticated_steps_send_token() {
    let transport = ScriptedTransport::new()
        .reply(200, LOGIN_OK)
        .reply(200, r#"{"username": "testuser"}"#)
        .reply(200, r#"{"success": true}"#)
        .reply(200, r#"{"success": true}"#);
    let mut tester = logged_in(transport);

    assert!(tester.test_patient_info());
    assert!(tester.test_update_patient_info());
    assert!(tester.test_patient_logout());

    let requests = tester.transport().requests();
    assert_eq!(requests.len(), 4);
    for request in &requests[1..] {
        assert_eq!(request.token.as_deref(), Some("0123456789abcdefghijKLMNOP"));
        assert_eq!(request.timeout, Duration::from_secs(10));
    }
    assert_eq!(requests[1].method, Method::Get);
    assert_eq!(requests[1].url, "http://api.test/api/patient/info/");
    assert_eq!(requests[2].method, Method::Put);
    assert_eq!(
        requests[2].body,
        Some(json!({
            "address": "Updated Address, Pudong New Area, Shanghai",
            "symptoms": "Updated symptom description",
        }))
    );
    assert_eq!(requests[3].method, Method::Post);
    assert_eq!(requests[3].url, "http://api.test/api/patient/logout/");
}

#[test]
fn test_update_failure_includes_status_and_body() {
    let transport = ScriptedTransport::new()
        .reply(200, LOGIN_OK)
        .reply(400, r#"{"mobile": ["required"]}"#);
    let mut tester = logged_in(transport);

    assert!(!tester.test_update_patient_info());
    assert_eq!(
        tester.results()[1].message,
        r#"update failed (400): {"mobile": ["required"]}"#
    );
}

#[test]
fn test_register_captures_patient_id() {
    let mut tester = tester(ScriptedTransport::new().reply(201, r#"{"patient_id": 42}"#));

    assert!(tester.test_patient_register());

    assert_eq!(tester.patient_id(), Some(&json!(42)));
    assert_eq!(tester.results()[0].message, "registered, patient ID: 42");
    let body = tester.transport().requests()[0].body.clone().unwrap();
    assert_eq!(body["username"], "testuser_20250720_104535");
    assert_eq!(body["confirm_password"], "password123");
    assert_eq!(body["assigned_doctor_id"], serde_json::Value::Null);
}

#[test]
fn test_register_requires_created_status() {
    let mut tester = tester(ScriptedTransport::new().reply(200, r#"{"patient_id": 42}"#));

    assert!(!tester.test_patient_register());
    assert_eq!(tester.patient_id(), None);
    assert!(tester.results()[0].message.starts_with("registration failed (200)"));
}

#[test]
fn test_run_all_tests_continues_after_failures() {
    let transport = ScriptedTransport::new()
        .reply(200, "ok")
        .reply(500, "boom")
        .reply(200, r#"{"success": false}"#);
    let mut tester = tester(transport);

    let run = tester.run_all_tests();

    let names: Vec<&str> = run.results.iter().map(|r| r.test_name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Server connection",
            "Doctor list",
            "Patient login",
            "Patient info",
            "Update patient info",
            "Patient logout",
        ]
    );
    assert_eq!(run.summary.total_tests, 6);
    assert_eq!(run.summary.passed_tests, 1);
    assert_eq!(run.summary.failed_tests, 5);
    assert!(!run.all_passed());
    assert_eq!(tester.transport().requests().len(), 3);
}

#[test]
fn test_run_all_tests_passes_end_to_end() {
    let transport = ScriptedTransport::new()
        .reply(200, "ok")
        .reply(200, "[1, 2, 3]")
        .reply(200, LOGIN_OK)
        .reply(200, "{}")
        .reply(200, "{}")
        .reply(200, "{}");
    let mut tester = tester(transport);

    let run = tester.run_all_tests();

    assert!(run.all_passed());
    assert_eq!(run.summary.success_rate, "100.0%");
    assert_eq!(run.results[1].message, "fetched doctor list, 3 doctors");
}

#[test]
fn test_run_all_tests_registers_before_login_when_enabled() {
    let transport = ScriptedTransport::new()
        .reply(200, "ok")
        .reply(200, "[]")
        .reply(201, r#"{"patient_id": 9}"#)
        .reply(200, LOGIN_OK)
        .reply(200, "{}")
        .reply(200, "{}")
        .reply(200, "{}");
    let config = SmokeConfig {
        register: true,
        ..SmokeConfig::for_base_url("http://api.test")
    };
    let mut tester = ApiTester::new(transport, config);

    let run = tester.run_all_tests();

    assert_eq!(run.summary.total_tests, 7);
    assert!(run.all_passed());
    assert_eq!(run.results[2].test_name, "Patient registration");
    assert_eq!(
        tester.transport().request_urls()[2],
        "http://api.test/api/patient/register/"
    );
}
