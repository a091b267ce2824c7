use anyhow::Result;
use std::time::Instant;

use crate::step::{self, OnFailure, TARGET};

pub fn run() -> Result<()> {
    step::banner("🔍 Checking lamp firmware builds...");
    let start = Instant::now();

    step::run(
        "Hardware target (STM32H7)",
        step::cargo(&["check", "-p", "firmware", "--target", TARGET, "--features", "hardware"]),
        OnFailure::Abort,
    )?;
    step::run(
        "Emulator target (host)",
        step::cargo(&["check", "-p", "firmware", "--features", "emulator", "--examples"]),
        OnFailure::Abort,
    )?;
    // The platform seams must stay usable without std.
    step::run(
        "Platform crate (no_std)",
        step::cargo(&["check", "-p", "platform", "--target", TARGET, "--no-default-features"]),
        OnFailure::Abort,
    )?;
    step::run(
        "Clippy",
        step::cargo(&["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"]),
        OnFailure::Warn,
    )?;
    step::run("Formatting", step::cargo(&["fmt", "--all", "--check"]), OnFailure::Warn)?;

    step::finished("All checks completed", start);
    Ok(())
}
