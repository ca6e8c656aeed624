//! `input-sim`: replay a pin scenario and print the events it produces
//!
//! ```text
//! cargo run -p input-sim -- crates/sim/scenarios/double_click.json
//! cargo run -p input-sim -- --realtime crates/sim/scenarios/encoder_turn.json
//! RUST_LOG=input_sim=debug cargo run -p input-sim -- --json scenario.json
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use input_sim::{replay, LoggedEvent, Scenario};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "input-sim")]
#[command(about = "Replay a timed pin scenario through the input event engine", long_about = None)]
#[command(version)]
struct Args {
    /// Scenario JSON file
    scenario: PathBuf,
    /// Print each event when it happened instead of all at once
    #[arg(long)]
    realtime: bool,
    /// Print the event log as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("input_sim=info,warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let text = std::fs::read_to_string(&args.scenario)
        .with_context(|| format!("reading {}", args.scenario.display()))?;
    let scenario = Scenario::from_json(&text)
        .with_context(|| format!("parsing {}", args.scenario.display()))?;

    let log = replay(&scenario)?;
    tracing::info!(events = log.len(), "replay finished");

    if args.realtime {
        pace(&log, !args.json).await;
    } else if !args.json {
        for event in &log {
            println!("{event}");
        }
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&log)?);
    }
    Ok(())
}

/// Sleep between events so they appear at their recorded times.
async fn pace(log: &[LoggedEvent], print: bool) {
    let mut previous_ms = 0;
    for event in log {
        let wait = event.at_ms.saturating_sub(previous_ms);
        tokio::time::sleep(Duration::from_millis(u64::from(wait))).await;
        previous_ms = event.at_ms;
        if print {
            println!("{event}");
        }
    }
}
