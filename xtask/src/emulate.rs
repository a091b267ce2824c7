use anyhow::{Context, Result};
use std::process::Command;

use crate::step;

/// Run the console lamp emulator in the foreground.
pub fn run(secs: u64, log: &str) -> Result<()> {
    step::banner(&format!("💡 Running lamp emulator for {secs}s..."));

    let status = Command::new("cargo")
        .args(["run", "-p", "firmware", "--example", "lamp_emulator", "--features", "emulator"])
        .env("LAMP_EMULATOR_SECS", secs.to_string())
        .env("RUST_LOG", log)
        .status()
        .context("failed to run cargo")?;

    if !status.success() {
        anyhow::bail!("emulator exited with {status}");
    }
    Ok(())
}
