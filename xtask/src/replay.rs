use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::run::{cargo, OnFailure};

const SCENARIO_DIR: &str = "crates/sim/scenarios";

pub fn run(scenarios: &[PathBuf], realtime: bool) -> Result<()> {
    println!();
    println!("{}", "▶ Replaying scenarios...".cyan().bold());
    println!();

    let files = if scenarios.is_empty() {
        bundled(Path::new(SCENARIO_DIR))?
    } else {
        scenarios.to_vec()
    };
    anyhow::ensure!(!files.is_empty(), "no scenarios found in {SCENARIO_DIR}");

    for file in &files {
        let path = file.to_string_lossy();
        let mut args = vec!["run", "--quiet", "-p", "input-sim", "--", &*path];
        if realtime {
            args.push("--realtime");
        }
        let output = cargo(&format!("Replaying {path}"), &args, OnFailure::Abort)?;
        print!("{}", String::from_utf8_lossy(&output.stdout));
        println!();
    }

    Ok(())
}

/// Every `.json` file in `dir`, sorted by name.
fn bundled(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
