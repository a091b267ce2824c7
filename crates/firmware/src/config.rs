//! Compile-time task configuration
//!
//! Which device each lamp task targets and how long it idles between
//! transitions. Nothing here is runtime-configurable.

use platform::{DeviceKind, InstanceId, LedInstance, SpinDelay};

/// Firmware version (synchronized with Cargo.toml)
pub const FIRMWARE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Busy-count between lamp transitions.
///
/// An iteration count, not a duration: the wall-clock period depends on core
/// clock and optimisation level.
pub const DELAY_ITERATIONS: u32 = 0x20_FFFF;

/// Number of lamp slots the LED bank exposes (instances 0..=3).
pub const LAMP_SLOTS: usize = 4;

/// Device kind targeted by the default lamp task.
pub const TARGET_KIND: DeviceKind = DeviceKind::Led;

/// Instance targeted by the default lamp task.
pub const TARGET_INSTANCE: InstanceId = LedInstance::Red.id();

/// Static description of one lamp task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LampConfig {
    /// Name used in log output
    pub name: &'static str,
    /// Device kind to open
    pub kind: DeviceKind,
    /// Device instance to open
    pub instance: InstanceId,
    /// Busy-count between transitions
    pub delay_iterations: u32,
}

impl LampConfig {
    /// Task toggling `led` with the default delay.
    pub const fn led(name: &'static str, led: LedInstance) -> Self {
        Self {
            name,
            kind: DeviceKind::Led,
            instance: led.id(),
            delay_iterations: DELAY_ITERATIONS,
        }
    }

    /// Same task with a different busy-count.
    pub const fn with_delay(self, delay_iterations: u32) -> Self {
        Self {
            delay_iterations,
            ..self
        }
    }

    /// Spin delay matching this configuration.
    pub const fn spin_delay(&self) -> SpinDelay {
        SpinDelay::new(self.delay_iterations)
    }
}

/// The red lamp task.
pub const RED_LAMP: LampConfig = LampConfig {
    name: "red",
    kind: TARGET_KIND,
    instance: TARGET_INSTANCE,
    delay_iterations: DELAY_ITERATIONS,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn red_lamp_targets_instance_two() {
        assert_eq!(RED_LAMP.kind, DeviceKind::Led);
        assert_eq!(RED_LAMP.instance.get(), 2);
        assert_eq!(RED_LAMP.delay_iterations, 0x20_FFFF);
    }

    #[test]
    fn with_delay_keeps_target() {
        let fast = RED_LAMP.with_delay(10);
        assert_eq!(fast.instance, RED_LAMP.instance);
        assert_eq!(fast.spin_delay().iterations(), 10);
    }

    #[test]
    fn led_constructor_uses_default_delay() {
        let green = LampConfig::led("green", LedInstance::Green1);
        assert_eq!(green.instance.get(), 0);
        assert_eq!(green.delay_iterations, DELAY_ITERATIONS);
    }
}
