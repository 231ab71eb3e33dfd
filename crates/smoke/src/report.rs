// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::result::{SmokeRun, TestResult};

/// Errors raised while saving a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write report to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Pass/fail totals of a sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_tests: usize,
    pub passed_tests: usize,
    pub failed_tests: usize,
    /// Percentage with one decimal place, e.g. `"83.3%"`.
    pub success_rate: String,
}

impl Summary {
    #[must_use]
    pub fn from_results(results: &[TestResult]) -> Self {
        let total_tests = results.len();
        let passed_tests = results.iter().filter(|r| r.success).count();
        Self {
            total_tests,
            passed_tests,
            failed_tests: total_tests - passed_tests,
            success_rate: format_rate(passed_tests, total_tests),
        }
    }

    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.passed_tests == self.total_tests
    }
}

#[allow(clippy::cast_precision_loss)]
fn format_rate(passed: usize, total: usize) -> String {
    if total == 0 {
        return String::from("0.0%");
    }
    format!("{:.1}%", passed as f64 / total as f64 * 100.0)
}

/// Console rendering of a finished sweep: totals, then one bullet per failure.
#[must_use]
pub fn render_summary(run: &SmokeRun) -> Vec<String> {
    let summary = &run.summary;
    let mut lines = vec![
        format!("Total tests: {}", summary.total_tests),
        format!("Passed: {}", summary.passed_tests),
        format!("Failed: {}", summary.failed_tests),
        format!("Success rate: {}", summary.success_rate),
    ];

    if summary.failed_tests > 0 {
        lines.push(String::new());
        lines.push(String::from("Failed tests:"));
        lines.extend(
            run.failures()
                .map(|r| format!("  - {}: {}", r.test_name, r.message)),
        );
    }

    lines
}

/// The JSON document saved after a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestReport {
    pub summary: Summary,
    pub test_results: Vec<TestResult>,
}

impl From<&SmokeRun> for TestReport {
    fn from(run: &SmokeRun) -> Self {
        Self {
            summary: run.summary.clone(),
            test_results: run.results.clone(),
        }
    }
}

impl TestReport {
    /// File name for a report generated at `at`.
    #[must_use]
    pub fn file_name(at: &DateTime<Local>) -> String {
        format!("api_test_report_{}.json", at.format("%Y%m%d_%H%M%S"))
    }

    /// Writes the report into `dir`, named after the current local time.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, ReportError> {
        self.write_to_dir_at(dir, &Local::now())
    }

    /// Writes the report into `dir`, named after `at`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write_to_dir_at(
        &self,
        dir: &Path,
        at: &DateTime<Local>,
    ) -> Result<PathBuf, ReportError> {
        let path = dir.join(Self::file_name(at));
        let json = serde_json::to_string_pretty(self)?;

        std::fs::write(&path, json).map_err(|source| ReportError::Write {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), "Saved smoke test report");
        Ok(path)
    }
}
