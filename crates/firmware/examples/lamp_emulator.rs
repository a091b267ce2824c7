//! Lamp task emulator
//!
//! Runs lamp tasks against the console board:
//! - red and green blink, contending on one region
//! - two tasks race for the red lamp; the loser finds it claimed and parks
//! - a second-green task finds no lamp fitted and parks
//!
//! Run with: cargo run --example lamp_emulator --features emulator
//! Log level via RUST_LOG (default `info`); run time via LAMP_EMULATOR_SECS.

use std::sync::OnceLock;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use firmware::config::{LampConfig, FIRMWARE_VERSION, RED_LAMP};
use firmware::emulator::{console_bank, EmulatorBank};
use firmware::LampTask;
use platform::{LedInstance, SpinRegion};

// Host spin is far faster than the MCU; stretch the delay so blinks are visible.
const EMULATOR_DELAY: u32 = 60_000_000;

static BOARD: OnceLock<EmulatorBank> = OnceLock::new();
static LAMP_REGION: SpinRegion = SpinRegion::new();

fn spawn_lamp(config: LampConfig) -> tokio::task::JoinHandle<()> {
    let board = BOARD.get_or_init(console_bank);
    let config = config.with_delay(EMULATOR_DELAY);
    tokio::task::spawn_blocking(move || {
        LampTask::new(board, &LAMP_REGION, config.spin_delay(), config).run()
    })
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let secs = std::env::var("LAMP_EMULATOR_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(5);

    tracing::info!("Lamp firmware v{} - emulator ({}s)", FIRMWARE_VERSION, secs);

    let tasks = [
        spawn_lamp(RED_LAMP),
        spawn_lamp(LampConfig::led("green", LedInstance::Green1)),
        spawn_lamp(LampConfig::led("red-shadow", LedInstance::Red)),
        spawn_lamp(LampConfig::led("green2", LedInstance::Green2)),
    ];

    tokio::time::sleep(Duration::from_secs(secs)).await;

    for task in &tasks {
        if task.is_finished() {
            tracing::error!("a lamp task returned");
        }
    }
    tracing::info!("emulator stopping");

    // Lamp tasks never return; leave them to process exit.
    std::process::exit(0);
}
