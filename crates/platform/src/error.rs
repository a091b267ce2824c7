//! Error types shared across the platform layer

use thiserror_no_std::Error;

/// Why a device could not be acquired.
///
/// Callers that only need the pass/fail answer treat every variant the same
/// way; the variants exist so diagnostics can still tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AcquireError {
    /// The facade returned no handle
    #[error("no driver for the requested device")]
    NoDevice,
    /// The device is owned by someone else
    #[error("device already in use")]
    InUse,
    /// The facade does not know the device
    #[error("unknown device")]
    Unknown,
}

impl AcquireError {
    /// Short name for log output.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoDevice => "no-device",
            Self::InUse => "in-use",
            Self::Unknown => "unknown",
        }
    }
}
