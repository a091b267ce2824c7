//! Lamp firmware
//!
//! Kernel task that takes exclusive ownership of one indicator lamp and
//! blinks it forever, guarding each on-transition with a shared
//! mutual-exclusion region. A task that cannot acquire its lamp parks itself
//! in a terminal fault loop instead of bringing the system down.
//!
//! # Architecture
//!
//! ```text
//! Task layer (lamp)
//!         ↓
//! Platform seams (platform: DeviceFacade, ExclusiveRegion, IdleStrategy)
//!         ↓
//! Drivers (leds: LED bank over embedded-hal pins)
//!         ↓
//! Embassy HAL (STM32H7) or console pins (emulator)
//! ```
//!
//! # Features
//!
//! - `hardware` - Build for STM32H7 target (embassy, defmt)
//! - `emulator` - Build for desktop (tokio, tracing, console lamps)
//! - `std` - Enable standard library
//!
//! # Examples
//!
//! ## Hardware Target
//!
//! ```bash
//! cargo build --release --target thumbv7em-none-eabihf --features hardware
//! ```
//!
//! ## Emulator Target
//!
//! ```bash
//! cargo run --example lamp_emulator --features emulator
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
// Upgrade relevant warns to deny; keep pedantic as warn (too noisy for firmware)
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
// unsafe fn body is not implicitly unsafe block
// Logging discipline (allow println in tests via clippy.toml)
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![warn(clippy::dbg_macro)] // dbg! should not be left in committed code
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)] // common in Rust crates; not a real issue
#![allow(clippy::missing_errors_doc)] // most errors are self-explanatory
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

#[macro_use]
mod fmt;

pub mod config;
pub mod lamp;
pub mod leds;

#[cfg(feature = "emulator")]
pub mod emulator;

// Re-export key types
pub use config::{LampConfig, RED_LAMP};
pub use lamp::{Lamp, LampTask, Toggler};
pub use leds::{LedBank, LedHandle};
