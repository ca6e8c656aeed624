// Desktop/tooling crate: unwrap/expect/panic acceptable in non-embedded code.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod check;
mod doc;
mod replay;
mod run;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "input-events development tasks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the libraries for the embedded target, then clippy and rustfmt
    Check,
    /// Run unit, integration and doc tests
    Test {
        /// Run only unit tests
        #[arg(long)]
        unit: bool,
        /// Run only integration tests (crates/*/tests)
        #[arg(long)]
        integration: bool,
        /// Cases per proptest property (PROPTEST_CASES)
        #[arg(long)]
        proptest_cases: Option<u32>,
    },
    /// Build and optionally open documentation
    Doc {
        /// Open documentation in browser
        #[arg(long)]
        open: bool,
    },
    /// Replay simulator scenarios (all bundled ones by default)
    Replay {
        /// Scenario files; defaults to crates/sim/scenarios/*.json
        scenarios: Vec<std::path::PathBuf>,
        /// Pace output in real time
        #[arg(long)]
        realtime: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => check::run(),
        Commands::Test {
            unit,
            integration,
            proptest_cases,
        } => test::run(unit, integration, proptest_cases),
        Commands::Doc { open } => doc::run(open),
        Commands::Replay {
            scenarios,
            realtime,
        } => replay::run(&scenarios, realtime),
    }
}
