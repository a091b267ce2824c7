//! Timed build steps with coloured progress output.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::{Command, Output};
use std::time::Instant;

/// Cross-compilation target of the lamp board.
pub const TARGET: &str = "thumbv7em-none-eabihf";

/// Probe-rs chip name of the lamp board.
pub const CHIP: &str = "STM32H743ZITx";

/// How a failing step affects the whole task.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum OnFailure {
    Abort,
    Warn,
}

/// `cargo <args>`.
pub fn cargo(args: &[&str]) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(args);
    cmd
}

/// Run `cmd` as a labelled step and report how it went.
///
/// Returns the captured output when the command succeeded.
pub fn run(label: &str, mut cmd: Command, on_failure: OnFailure) -> Result<Option<Output>> {
    println!("{}", format!("  {label}...").cyan());
    let start = Instant::now();

    let output = cmd
        .output()
        .with_context(|| format!("failed to spawn step: {label}"))?;

    if output.status.success() {
        println!(
            "{}",
            format!("  ✓ {label} passed in {:.2}s", start.elapsed().as_secs_f64()).green()
        );
        println!();
        return Ok(Some(output));
    }

    match on_failure {
        OnFailure::Abort => {
            eprintln!("{}", format!("  ✗ {label} failed").red().bold());
            eprintln!();
            eprintln!("{}", String::from_utf8_lossy(&output.stderr));
            anyhow::bail!("{label} failed");
        }
        OnFailure::Warn => {
            eprintln!("{}", format!("  ⚠ {label} reported problems").yellow().bold());
            eprintln!("{}", String::from_utf8_lossy(&output.stderr));
            println!();
            Ok(None)
        }
    }
}

/// Banner printed before a task's steps.
pub fn banner(title: &str) {
    println!();
    println!("{}", title.cyan().bold());
    println!();
}

/// Footer printed after all steps passed.
pub fn finished(what: &str, start: Instant) {
    println!(
        "{}",
        format!("✓ {what} in {:.2}s", start.elapsed().as_secs_f64())
            .green()
            .bold()
    );
    println!();
}
