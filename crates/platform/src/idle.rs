//! Idle strategies
//!
//! A task that waits without a timer goes through [`IdleStrategy`], so a
//! timed yield can later replace the spin without touching the task's cycle
//! structure.
//!
//! [`SpinDelay`] is an active delay of a fixed iteration count. It is not a
//! calibrated time unit and it never yields: on a single core it consumes the
//! whole time slice of the calling task while it runs.

use core::hint::black_box;

/// Value written on every fault-state iteration.
pub const FAULT_SENTINEL: u32 = 0xBEEF_BEEF;

/// How a task passes time between device transitions.
pub trait IdleStrategy {
    /// One inter-transition delay.
    fn idle(&mut self);

    /// One iteration of the terminal fault loop.
    ///
    /// Must not touch devices or shared state.
    fn park(&mut self);
}

impl<T: IdleStrategy + ?Sized> IdleStrategy for &mut T {
    fn idle(&mut self) {
        (**self).idle();
    }

    fn park(&mut self) {
        (**self).park();
    }
}

/// Busy-count delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpinDelay {
    iterations: u32,
}

impl SpinDelay {
    /// Delay of `iterations` empty loop turns.
    pub const fn new(iterations: u32) -> Self {
        Self { iterations }
    }

    /// Configured iteration count.
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }
}

impl IdleStrategy for SpinDelay {
    fn idle(&mut self) {
        // black_box keeps the optimiser from deleting the loop
        let mut count = 0u32;
        while black_box(count) < self.iterations {
            count = count.wrapping_add(1);
        }
    }

    fn park(&mut self) {
        black_box(FAULT_SENTINEL);
    }
}
