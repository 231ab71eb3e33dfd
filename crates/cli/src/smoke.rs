// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use clap::Parser;
use hms_api_smoke::{
    ApiTester, ApiTransport, DEFAULT_BASE_URL, HttpTransport, SmokeConfig, TestReport,
    render_summary,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

use crate::{exit_code, print_lines};

/// Check that every endpoint of the hospital management API responds.
#[derive(Parser, Debug)]
#[command(name = "api-smoke-test", author, version, about, long_about = None)]
pub struct SmokeArgs {
    /// Root URL of the server under test.
    #[arg(long, env = "HMS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Login name of the test account; defaults to the built-in test user.
    #[arg(short, long, env = "HMS_API_USERNAME")]
    pub username: Option<String>,

    /// Password of the test account; defaults to the built-in test password.
    #[arg(short, long, env = "HMS_API_PASSWORD")]
    pub password: Option<String>,

    /// Directory the JSON report is written to.
    #[arg(long, env = "HMS_REPORT_DIR", default_value = ".")]
    pub report_dir: PathBuf,

    /// Register the test account before logging in.
    #[arg(long)]
    pub register: bool,
}

impl SmokeArgs {
    #[must_use]
    pub fn config(&self) -> SmokeConfig {
        let mut config = SmokeConfig::for_base_url(&self.base_url);
        if let Some(username) = &self.username {
            config.username.clone_from(username);
        }
        if let Some(password) = &self.password {
            config.password.clone_from(password);
        }
        config.register = self.register;
        config
    }
}

/// Runs `api-smoke-test`; exits zero iff every step passed and the report was saved.
#[must_use]
pub fn run_smoke(args: &SmokeArgs) -> ExitCode {
    let transport = match HttpTransport::new() {
        Ok(transport) => transport,
        Err(err) => {
            error!("Failed to create HTTP client: {err}");
            println!("Could not start the API test: {err}");
            return ExitCode::FAILURE;
        }
    };

    exit_code(sweep(transport, args))
}

/// Runs the sweep, prints the summary and saves the report.
pub(crate) fn sweep<T: ApiTransport>(transport: T, args: &SmokeArgs) -> bool {
    let mut tester = ApiTester::new(transport, args.config());
    let run = tester.run_all_tests();

    println!();
    println!("{}", "=".repeat(60));
    println!("Test report");
    println!("{}", "=".repeat(60));
    print_lines(&render_summary(&run));

    let saved = match TestReport::from(&run).write_to_dir(&args.report_dir) {
        Ok(path) => {
            println!();
            println!("Detailed report saved to: {}", path.display());
            true
        }
        Err(err) => {
            error!("Failed to save report: {err}");
            println!();
            println!("Could not save report: {err}");
            false
        }
    };

    if run.all_passed() {
        println!();
        println!("All API tests passed!");
    } else {
        println!();
        println!("Some API tests failed; check the server status and endpoint implementations.");
    }

    run.all_passed() && saved
}
