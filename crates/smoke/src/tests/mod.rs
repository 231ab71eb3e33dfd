// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod e2e_tests;
mod tester_tests;

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::{ApiRequest, ApiResponse, ApiTransport, TransportError};

/// Transport that replays canned replies in order and records every request.
///
/// Running out of replies is reported as a connection failure.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<ApiResponse, TransportError>>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, status: u16, body: &str) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Ok(ApiResponse::new(status, body)));
        self
    }

    pub fn fail(self, error: TransportError) -> Self {
        self.replies.borrow_mut().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_urls(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.url.clone()).collect()
    }
}

impl ApiTransport for ScriptedTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.borrow_mut().push(request.clone());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::Connection {
                    url: request.url.clone(),
                    detail: String::from("no scripted reply"),
                })
            })
    }
}

pub const LOGIN_OK: &str =
    r#"{"success": true, "data": {"token": "0123456789abcdefghijKLMNOP"}}"#;
