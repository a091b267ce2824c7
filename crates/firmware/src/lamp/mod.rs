//! Lamp task
//!
//! One kernel task that owns one lamp. Lifecycle:
//!
//! ```text
//! run() ──► acquire() ──ok──► Toggler::run()      (never returns)
//!                    └─fail─► park_forever()      (never returns)
//! ```
//!
//! The device handle lives inside the task value. Nothing outside the task
//! can reach the lamp through it, and a failed open leaves the task with no
//! handle at all, so the fault state cannot touch the device even by
//! mistake.

pub mod fault;
pub mod toggle;

pub use fault::park_forever;
pub use toggle::Toggler;

use platform::{AcquireError, DeviceFacade, ExclusiveRegion, IdleStrategy, PinState, Uid};

use crate::config::LampConfig;

/// An opened lamp: the only way to drive the device.
pub struct Lamp<'d, D: DeviceFacade> {
    facade: &'d D,
    handle: D::Handle,
    uid: Uid,
}

impl<'d, D: DeviceFacade> Lamp<'d, D> {
    /// Open the device named by `config` and validate the result.
    pub fn acquire(facade: &'d D, config: &LampConfig) -> Result<Self, AcquireError> {
        let (handle, uid) = facade.open(config.kind, config.instance).into_result()?;
        Ok(Self {
            facade,
            handle,
            uid,
        })
    }

    /// Uid the facade issued for this lamp.
    pub fn uid(&self) -> Uid {
        self.uid
    }

    /// Drive the lamp. Write failures are the facade's business.
    pub fn set(&self, state: PinState) {
        self.facade.write_bit(&self.handle, self.uid, state);
    }

    /// Logical 1.
    pub fn on(&self) {
        self.set(PinState::High);
    }

    /// Logical 0.
    pub fn off(&self) {
        self.set(PinState::Low);
    }
}

/// Task body: acquisition, then toggling or fault.
pub struct LampTask<'a, D: DeviceFacade, R, I> {
    facade: &'a D,
    region: &'a R,
    idle: I,
    config: LampConfig,
    lamp: Option<Lamp<'a, D>>,
}

impl<'a, D, R, I> LampTask<'a, D, R, I>
where
    D: DeviceFacade,
    R: ExclusiveRegion,
    I: IdleStrategy,
{
    /// Task for `config`, driving devices through `facade` and guarding its
    /// on-transitions with `region`.
    pub fn new(facade: &'a D, region: &'a R, idle: I, config: LampConfig) -> Self {
        Self {
            facade,
            region,
            idle,
            config,
            lamp: None,
        }
    }

    /// Task configuration.
    pub fn config(&self) -> &LampConfig {
        &self.config
    }

    /// Whether a lamp has been acquired.
    pub fn is_acquired(&self) -> bool {
        self.lamp.is_some()
    }

    /// Open the configured device.
    ///
    /// `true` iff a handle came back with a valid identifier; the lamp is then
    /// held by the task. Every failure class gives `false` and stores nothing.
    pub fn acquire(&mut self) -> bool {
        match Lamp::acquire(self.facade, &self.config) {
            Ok(lamp) => {
                info!(
                    "lamp {}: acquired instance {} (uid {})",
                    self.config.name,
                    self.config.instance.get(),
                    lamp.uid().get()
                );
                self.lamp = Some(lamp);
                true
            }
            Err(err) => {
                warn!(
                    "lamp {}: open of instance {} failed: {}",
                    self.config.name,
                    self.config.instance.get(),
                    err.as_str()
                );
                false
            }
        }
    }

    /// Task entry point. Never returns.
    pub fn run(mut self) -> ! {
        info!("lamp {}: task started", self.config.name);
        if self.acquire() {
            if let Some(lamp) = self.lamp.take() {
                Toggler::new(lamp, self.region, self.idle).run()
            }
        }
        error!("lamp {}: entering fault state", self.config.name);
        park_forever(self.idle)
    }
}
