// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Runs the real HTTP transport against a small axum stand-in for the API.

use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use serde_json::{Value, json};
use std::net::SocketAddr;

use crate::{ApiTester, HttpTransport, SmokeConfig, TestReport};

const TOKEN: &str = "e2e-token-abcdefghijklmnopqrstuvwxyz";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == format!("Token {TOKEN}"))
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["username"] == "testuser_20250720_104535" && body["password"] == "password123" {
        (
            StatusCode::OK,
            Json(json!({"success": true, "data": {"token": TOKEN}})),
        )
    } else {
        (
            StatusCode::OK,
            Json(json!({"success": false, "message": "invalid credentials"})),
        )
    }
}

async fn info(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if authorized(&headers) {
        (StatusCode::OK, Json(json!({"username": "testuser_20250720_104535"})))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"detail": "no token"})))
    }
}

async fn update(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if authorized(&headers) && body.get("address").is_some() {
        (StatusCode::OK, Json(json!({"success": true})))
    } else {
        (StatusCode::BAD_REQUEST, Json(json!({"success": false})))
    }
}

async fn logout(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if authorized(&headers) {
        (StatusCode::OK, Json(json!({"success": true})))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"detail": "no token"})))
    }
}

fn app() -> Router {
    Router::new()
        .route("/", get(|| async { "Hospital management" }))
        .route(
            "/api/doctors/",
            get(|| async { Json(json!({"data": [{"id": 1}, {"id": 2}]})) }),
        )
        .route(
            "/api/patient/register/",
            post(|| async { (StatusCode::CREATED, Json(json!({"patient_id": 17}))) }),
        )
        .route("/api/patient/login/", post(login))
        .route("/api/patient/info/", get(info))
        .route("/api/patient/update/", put(update))
        .route("/api/patient/logout/", post(logout))
}

/// Serves the stand-in API on an ephemeral port from a background thread.
fn spawn_server() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, app()).await.unwrap();
        });
    });

    addr
}

#[test]
fn test_full_sweep_against_live_server() {
    let addr = spawn_server();
    let config = SmokeConfig {
        register: true,
        ..SmokeConfig::for_base_url(&format!("http://{addr}"))
    };
    let mut tester = ApiTester::new(HttpTransport::new().unwrap(), config);

    let run = tester.run_all_tests();

    for result in &run.results {
        assert!(result.success, "{}", result.status_line());
    }
    assert_eq!(run.summary.total_tests, 7);
    assert_eq!(run.results[1].message, "fetched doctor list, 2 doctors");
    assert_eq!(tester.patient_id(), Some(&json!(17)));

    let dir = tempfile::tempdir().unwrap();
    let path = TestReport::from(&run).write_to_dir(dir.path()).unwrap();
    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("api_test_report_"));
    assert!(name.ends_with(".json"));
}

#[test]
fn test_wrong_credentials_fail_login_and_authenticated_steps() {
    let addr = spawn_server();
    let config = SmokeConfig {
        password: String::from("wrong"),
        ..SmokeConfig::for_base_url(&format!("http://{addr}"))
    };
    let mut tester = ApiTester::new(HttpTransport::new().unwrap(), config);

    let run = tester.run_all_tests();

    assert_eq!(run.summary.passed_tests, 2);
    assert_eq!(run.summary.failed_tests, 4);
    assert_eq!(run.results[2].message, "login failed: invalid credentials");
}

#[test]
fn test_unreachable_server_fails_every_step() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let mut tester = ApiTester::new(
        HttpTransport::new().unwrap(),
        SmokeConfig::for_base_url(&format!("http://{addr}")),
    );

    let run = tester.run_all_tests();

    assert_eq!(run.summary.total_tests, 6);
    assert_eq!(run.summary.passed_tests, 0);
    assert!(run.results[0].message.starts_with("connection failed:"));
    assert!(run.results[1].message.starts_with("request error:"));
    assert!(run.results[3].message.contains("missing token"));
}
