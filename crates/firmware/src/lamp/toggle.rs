//! Steady-state toggling.
//!
//! Each cycle:
//!
//! ```text
//! enter ─ on ─ idle ─ leave ─ off ─ idle
//! └──────── guarded ───────┘
//! ```
//!
//! Only the on-transition and the idle after it run inside the region. The
//! off-transition is issued unguarded; this asymmetry is part of the task's
//! contract and must not be folded into one symmetric bracket.

use platform::{DeviceFacade, ExclusiveRegion, IdleStrategy};

use super::Lamp;

/// Drives an acquired lamp forever.
pub struct Toggler<'a, D: DeviceFacade, R, I> {
    lamp: Lamp<'a, D>,
    region: &'a R,
    idle: I,
}

impl<'a, D, R, I> Toggler<'a, D, R, I>
where
    D: DeviceFacade,
    R: ExclusiveRegion,
    I: IdleStrategy,
{
    /// Toggle `lamp`, guarding its on-transitions with `region`.
    pub fn new(lamp: Lamp<'a, D>, region: &'a R, idle: I) -> Self {
        Self { lamp, region, idle }
    }

    /// One on/off cycle.
    pub fn cycle(&mut self) {
        let guard = self.region.guard();
        self.lamp.on();
        self.idle.idle();
        drop(guard);

        self.lamp.off();
        self.idle.idle();
    }

    /// Cycle forever.
    pub fn run(mut self) -> ! {
        loop {
            self.cycle();
        }
    }
}
