use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

use crate::step::{self, OnFailure, CHIP, TARGET};

pub fn run(release: bool) -> Result<()> {
    let profile = if release { "release" } else { "debug" };
    step::banner(&format!("🔨 Building lamp firmware ({profile})..."));
    let start = Instant::now();

    let mut args = vec!["build", "-p", "firmware", "--target", TARGET, "--features", "hardware"];
    if release {
        args.push("--release");
    }
    step::run("Firmware build", step::cargo(&args), OnFailure::Abort)?;

    let elf = format!("target/{TARGET}/{profile}/firmware");
    show_binary_size(&elf);

    println!("{}", format!("📡 Flashing {CHIP}...").cyan().bold());
    let flash = Command::new("probe-rs")
        .args(["download", "--chip", CHIP, elf.as_str()])
        .status()
        .context("failed to run probe-rs. Is probe-rs installed? (cargo install probe-rs-tools)")?;
    if !flash.success() {
        anyhow::bail!("flash failed - check that the probe is connected and the board is powered");
    }

    step::finished("Lamp firmware flashed", start);
    println!(
        "   {}",
        format!("Use 'probe-rs attach --chip {CHIP} {elf}' to view RTT logs").dimmed()
    );
    println!();
    Ok(())
}

fn show_binary_size(elf: &str) {
    let Ok(out) = Command::new("rust-size").args(["-A", elf]).output() else {
        return;
    };
    if out.status.success() {
        println!("{}", "📊 Binary size:".cyan());
        for line in String::from_utf8_lossy(&out.stdout).lines() {
            println!("   {}", line.dimmed());
        }
        println!();
    }
}
