//! Desktop emulator board.
//!
//! Console lamps behind the same [`LedBank`] driver the hardware uses. Each
//! pin logs its transitions through `tracing` instead of toggling a GPIO.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};

use crate::config::LAMP_SLOTS;
use crate::leds::LedBank;

/// Output pin that reports its level changes.
pub struct ConsolePin {
    label: &'static str,
    lit: bool,
}

impl ConsolePin {
    /// Unlit pin named `label`.
    pub const fn new(label: &'static str) -> Self {
        Self { label, lit: false }
    }

    /// Current level.
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    fn set(&mut self, lit: bool) {
        if self.lit != lit {
            tracing::info!(lamp = self.label, "{}", if lit { "●" } else { "○" });
        }
        self.lit = lit;
    }
}

impl ErrorType for ConsolePin {
    type Error = Infallible;
}

impl OutputPin for ConsolePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true);
        Ok(())
    }
}

/// Lamp bank of the emulated board.
pub type EmulatorBank = LedBank<ConsolePin, LAMP_SLOTS>;

/// Emulated board: same fitting as the Nucleo (no second green lamp).
pub fn console_bank() -> EmulatorBank {
    LedBank::new([
        Some(ConsolePin::new("green")),
        Some(ConsolePin::new("orange")),
        Some(ConsolePin::new("red")),
        None,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::{DeviceFacade, DeviceKind, LedInstance, PinState};

    #[test]
    fn console_pin_tracks_level() {
        let mut pin = ConsolePin::new("red");
        assert!(!pin.is_lit());
        pin.set_high().unwrap();
        assert!(pin.is_lit());
        pin.set_low().unwrap();
        assert!(!pin.is_lit());
    }

    #[test]
    fn console_bank_matches_nucleo_fitting() {
        let bank = console_bank();
        assert_eq!(bank.fitted(), 3);

        let (handle, uid) = bank
            .open(DeviceKind::Led, LedInstance::Red.id())
            .into_result()
            .unwrap();
        bank.write_bit(&handle, uid, PinState::High);
        assert!(bank.is_claimed(LedInstance::Red.id()));

        let green2 = bank.open(DeviceKind::Led, LedInstance::Green2.id());
        assert!(green2.handle.is_none());
    }
}
