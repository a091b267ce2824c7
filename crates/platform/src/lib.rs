//! Platform layer for the lamp firmware
//!
//! Trait seams between a kernel task and the things it does not own: the
//! device drivers behind a facade, the mutual-exclusion primitive, and the
//! way the task passes time. Tasks are written against these traits only,
//! so the same task code runs on hardware, in the host emulator, and under
//! the recording mocks in tests.
//!
//! # Architecture Layers
//!
//! ```text
//! Task layer (firmware crate: lamp task)
//!         ↓
//! Platform seams (this crate: DeviceFacade, ExclusiveRegion, IdleStrategy)
//!         ↓
//! Drivers (firmware crate: LED bank over embedded-hal pins)
//!         ↓
//! Hardware Layer (Embassy HAL + PAC)
//! ```
//!
//! # Features
//!
//! - `std`: Enable standard library support and the [`mocks`] module
//! - `defmt`: Enable `defmt::Format` derives on all public types
//!
//! # Example
//!
//! ```
//! use platform::{ExclusiveRegion, SpinRegion};
//!
//! static REGION: SpinRegion = SpinRegion::new();
//!
//! let guard = REGION.guard();
//! assert!(REGION.is_held());
//! drop(guard);
//! assert!(!REGION.is_held());
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)] // unsafe fn body is not implicitly unsafe block
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::must_use_candidate)] // plain accessors; callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod device;
pub mod error;
pub mod idle;
pub mod sync;

#[cfg(any(test, feature = "std"))]
pub mod mocks;

pub use device::{
    DeviceFacade, DeviceKind, InstanceId, LedInstance, Opened, PinState, ResourceId, Uid,
};
pub use error::AcquireError;
pub use idle::{IdleStrategy, SpinDelay, FAULT_SENTINEL};
pub use sync::{ExclusiveRegion, RegionGuard, SpinRegion};
