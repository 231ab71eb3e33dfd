// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Failures below the HTTP status level.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} timed out after {}s", .timeout.as_secs())]
    Timeout { url: String, timeout: Duration },

    #[error("could not connect to {url}: {detail}")]
    Connection { url: String, detail: String },

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// HTTP verbs the scenario uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

/// One outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    /// JSON body, if any.
    pub body: Option<Value>,
    /// Sent as `Authorization: Token <token>`.
    pub token: Option<String>,
    pub timeout: Duration,
}

impl ApiRequest {
    #[must_use]
    pub const fn new(method: Method, url: String, timeout: Duration) -> Self {
        Self {
            method,
            url,
            body: None,
            token: None,
            timeout,
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }
}

/// Status and raw body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON.
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Sends requests on behalf of the tester.
///
/// Implementations keep one logical client session: cookies set by one
/// response are sent with later requests.
pub trait ApiTransport {
    /// Sends a request and returns the response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns an error if no response was received.
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// Transport backed by a blocking `reqwest` client with a cookie store.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| TransportError::ClientBuild(e.to_string()))?;
        Ok(Self { client })
    }
}

impl ApiTransport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        debug!(method = ?request.method, url = %request.url, "Sending request");

        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
            Method::Put => self.client.put(&request.url),
        }
        .timeout(request.timeout);

        if let Some(token) = &request.token {
            builder = builder.header(AUTHORIZATION, format!("Token {token}"));
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let classify = |e: reqwest::Error| {
            if e.is_timeout() {
                TransportError::Timeout {
                    url: request.url.clone(),
                    timeout: request.timeout,
                }
            } else if e.is_connect() {
                TransportError::Connection {
                    url: request.url.clone(),
                    detail: e.to_string(),
                }
            } else {
                TransportError::Http(e.to_string())
            }
        };

        let response = builder.send().map_err(classify)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(classify)?;

        debug!(status, bytes = body.len(), "Received response");
        Ok(ApiResponse { status, body })
    }
}
