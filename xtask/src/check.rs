use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::run::{cargo, OnFailure};

/// Embedded target the libraries must build for.
const EMBEDDED_TARGET: &str = "thumbv7em-none-eabihf";

pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔍 Checking workspace...".cyan().bold());
    println!();

    let total_start = Instant::now();

    // no_std builds, with and without defmt logging
    for package in ["input-platform", "input-events"] {
        cargo(
            &format!("Checking {package} ({EMBEDDED_TARGET})"),
            &["check", "-p", package, "--target", EMBEDDED_TARGET],
            OnFailure::Abort,
        )?;
        cargo(
            &format!("Checking {package} with defmt"),
            &[
                "check",
                "-p",
                package,
                "--target",
                EMBEDDED_TARGET,
                "--features",
                "defmt",
            ],
            OnFailure::Abort,
        )?;
    }

    cargo(
        "Checking simulator (host)",
        &["check", "-p", "input-sim", "--all-targets"],
        OnFailure::Abort,
    )?;

    cargo(
        "Running clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        OnFailure::Warn,
    )?;

    let fmt = cargo("Checking formatting", &["fmt", "--all", "--check"], OnFailure::Warn)?;
    if !fmt.status.success() {
        eprintln!("     Run 'cargo fmt --all' to fix");
    }

    println!(
        "{}",
        format!(
            "✓ All checks completed in {:.2}s",
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}
