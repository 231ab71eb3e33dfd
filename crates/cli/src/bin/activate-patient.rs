// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use clap::Parser;
use hms_admin_cli::{ActivateArgs, init_tracing, run_activate};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: ActivateArgs = ActivateArgs::parse();
    init_tracing();
    run_activate(&args)
}
