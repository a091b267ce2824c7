//! Lamp firmware - Main Entry Point
//!
//! Hardware-only entry point for the STM32H743ZI Nucleo-144 board.
//!
//! | Instance | Lamp   | MCU pin |
//! |----------|--------|---------|
//! | 0        | green  | PB0     |
//! | 1        | orange | PE1     |
//! | 2        | red    | PB14    |
//! | 3        | green2 | not fitted |

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_stm32::gpio::{AnyPin, Level, Output, Speed};
use platform::SpinRegion;
use static_cell::StaticCell;

use firmware::config::{FIRMWARE_VERSION, LAMP_SLOTS, RED_LAMP};
use firmware::{LampTask, LedBank};

// Logger + panic handler
use {defmt_rtt as _, panic_probe as _};

type BoardLeds = LedBank<Output<'static, AnyPin>, LAMP_SLOTS>;

static LEDS: StaticCell<BoardLeds> = StaticCell::new();

// Every lamp task guards its on-transitions with this region.
static LAMP_REGION: SpinRegion = SpinRegion::new();

/// Red lamp task body.
///
/// The lamp task busy-waits and never yields, so it owns the thread-mode
/// executor from the moment it is first polled. Tasks that need to keep
/// running alongside it belong on an interrupt executor.
#[embassy_executor::task]
async fn red_lamp_task(leds: &'static BoardLeds) {
    LampTask::new(leds, &LAMP_REGION, RED_LAMP.spin_delay(), RED_LAMP).run()
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    defmt::info!("Lamp firmware v{=str}", FIRMWARE_VERSION);

    let p = embassy_stm32::init(Default::default());

    // Lamps start dark; the task's first cycle lights the red one.
    let green = Output::new(p.PB0, Level::Low, Speed::Low).degrade();
    let orange = Output::new(p.PE1, Level::Low, Speed::Low).degrade();
    let red = Output::new(p.PB14, Level::Low, Speed::Low).degrade();

    let leds = LEDS.init(LedBank::new([Some(green), Some(orange), Some(red), None]));
    defmt::info!("LED bank ready: {=usize} of {=usize} lamps fitted", leds.fitted(), LAMP_SLOTS);

    match spawner.spawn(red_lamp_task(leds)) {
        Ok(()) => defmt::info!("Spawned lamp task: {=str}", RED_LAMP.name),
        Err(_) => defmt::error!("Lamp task pool exhausted: {=str}", RED_LAMP.name),
    }
}
