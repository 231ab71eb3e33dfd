// Copyright (C) 2024-2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project Automation
//!
//! - `cargo xtask ci` runs lint, build, test and migration verification
//! - `cargo xtask verify-migrations` applies, reverts and re-applies every
//!   migration against an in-memory `SQLite` database
//! - `cargo xtask seed-demo` writes a database holding the demo doctor and
//!   patient accounts so the admin tools can be tried locally

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{
    fmt::Debug,
    io,
    path::{Path, PathBuf},
    process::Output,
};

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{eyre::Context, Result};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use duct::cmd;
use hms_admin_domain::Username;
use hms_admin_persistence::{DoctorProfile, NewAccount, PatientProfile, Persistence};
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../crates/persistence/migrations");

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, build, test, migrations)
    CI,

    /// Build the project
    #[command(visible_alias = "b")]
    Build,

    /// Run cargo check
    #[command(visible_alias = "c")]
    Check,

    /// Lint formatting and clippy
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy on the project
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Check for formatting issues in the project
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Fix formatting issues in the project
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Run tests
    #[command(visible_alias = "t")]
    Test,

    /// Apply, revert and re-apply every migration
    #[command(visible_alias = "vm")]
    VerifyMigrations,

    /// Create a database with the demo doctor and patient accounts
    #[command(visible_alias = "seed")]
    SeedDemo {
        /// Database file to create or extend
        #[arg(long, default_value = "db.sqlite3")]
        database: PathBuf,
    },
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::Check => check(),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintFormatting => lint_format(),
            Self::FixFormatting => fix_format(),
            Self::Test => test(),
            Self::VerifyMigrations => verify_migrations(),
            Self::SeedDemo { database } => seed_demo(&database),
        }
    }
}

/// Run CI checks (lint, build, test, migrations)
fn ci() -> Result<()> {
    lint()?;
    build()?;
    test()?;
    verify_migrations()?;
    Ok(())
}

/// Build the project
fn build() -> Result<()> {
    run_cargo(vec!["build", "--all-targets", "--all-features"])
}

/// Run cargo check
fn check() -> Result<()> {
    run_cargo(vec!["check", "--all-targets", "--all-features"])
}

/// Lint formatting and clippy
fn lint() -> Result<()> {
    lint_clippy()?;
    lint_format()?;
    Ok(())
}

/// Run clippy on the project
fn lint_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

/// Lint formatting issues in the project
fn lint_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all", "--check"])
}

/// Fix formatting issues in the project
fn fix_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all"])
}

/// Run every test target in the workspace
fn test() -> Result<()> {
    run_cargo(vec!["test", "--all-targets", "--all-features"])
}

/// Run a cargo subcommand with the default toolchain
fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

/// Run a cargo subcommand with the nightly toolchain
fn run_cargo_nightly(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args)
        // CARGO env var is set because we're running in a cargo subcommand
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

/// Check that every migration's `down.sql` undoes its `up.sql`.
///
/// The migrations are applied to an in-memory database, reverted in full,
/// and applied again. A `down.sql` that leaves a table behind makes the
/// second pass fail.
fn verify_migrations() -> Result<()> {
    let mut conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;

    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .wrap_err("Failed to enable foreign keys on SQLite")?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to apply migrations: {e}"))?;
    tracing::info!("Applied {} migrations", applied.len());

    let reverted = conn
        .revert_all_migrations(MIGRATIONS)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to revert migrations: {e}"))?;
    tracing::info!("Reverted {} migrations", reverted.len());

    let reapplied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to re-apply migrations: {e}"))?;

    if reapplied.len() != applied.len() {
        return Err(color_eyre::eyre::eyre!(
            "Migration round trip mismatch: applied {}, re-applied {}",
            applied.len(),
            reapplied.len()
        ));
    }

    tracing::info!("Migrations verified");
    Ok(())
}

struct DemoAccount {
    username: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    role: DemoRole,
}

enum DemoRole {
    Doctor,
    InactivePatient,
}

const DEMO_ACCOUNTS: &[DemoAccount] = &[
    DemoAccount {
        username: "doctor_zhang",
        first_name: "Wei",
        last_name: "Zhang",
        role: DemoRole::Doctor,
    },
    DemoAccount {
        username: "patient_li",
        first_name: "Na",
        last_name: "Li",
        role: DemoRole::InactivePatient,
    },
    DemoAccount {
        username: "patient_wang",
        first_name: "Fang",
        last_name: "Wang",
        role: DemoRole::InactivePatient,
    },
];

/// Create (or extend) a database holding the demo accounts.
///
/// Accounts that already exist are left untouched, so the command can be
/// re-run after the admin tools have changed the data.
fn seed_demo(database: &Path) -> Result<()> {
    let mut persistence = Persistence::new_with_file(database)
        .wrap_err_with(|| format!("Failed to open {}", database.display()))?;

    for account in DEMO_ACCOUNTS {
        let username = Username::new(account.username)?;
        if persistence.get_user_by_username(&username)?.is_some() {
            tracing::info!("{} already exists, skipping", account.username);
            continue;
        }

        let user_id = persistence.create_user(&NewAccount {
            username,
            first_name: account.first_name.to_string(),
            last_name: account.last_name.to_string(),
            password: String::from("password123"),
        })?;

        match account.role {
            DemoRole::Doctor => {
                persistence.create_doctor(user_id, &DoctorProfile::default(), true)?;
            }
            DemoRole::InactivePatient => {
                persistence.create_patient(user_id, &PatientProfile::default(), false)?;
            }
        }
        tracing::info!("Created {}", account.username);
    }

    tracing::info!(
        "{} holds {} users, {} waiting for activation",
        database.display(),
        persistence.count_users()?,
        persistence.count_inactive_patients()?
    );
    Ok(())
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command that was run may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
