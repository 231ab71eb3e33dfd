// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::report::Summary;

/// Format of [`TestResult::timestamp`].
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Outcome of one scenario step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub test_name: String,
    pub success: bool,
    pub message: String,
    /// Local time the step finished.
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_data: Option<Value>,
}

impl TestResult {
    /// Records an outcome stamped with the current local time.
    #[must_use]
    pub fn now(
        test_name: &str,
        success: bool,
        message: String,
        response_data: Option<Value>,
    ) -> Self {
        Self {
            test_name: test_name.to_string(),
            success,
            message,
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            response_data,
        }
    }

    /// One-line console rendering, e.g. `[PASS] Patient login: logged in`.
    #[must_use]
    pub fn status_line(&self) -> String {
        let status = if self.success { "PASS" } else { "FAIL" };
        format!("[{status}] {}: {}", self.test_name, self.message)
    }
}

/// Every outcome of a sweep plus its summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SmokeRun {
    pub results: Vec<TestResult>,
    pub summary: Summary,
}

impl SmokeRun {
    #[must_use]
    pub fn from_results(results: Vec<TestResult>) -> Self {
        let summary = Summary::from_results(&results);
        Self { results, summary }
    }

    /// True iff every recorded step succeeded.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.summary.all_passed()
    }

    /// The failed outcomes in scenario order.
    pub fn failures(&self) -> impl Iterator<Item = &TestResult> {
        self.results.iter().filter(|r| !r.success)
    }
}
