//! Device facade abstraction
//!
//! The narrow open / write-bit interface a task uses to reach a hardware
//! output without depending on driver internals. A task opens a device once,
//! inspects the returned [`ResourceId`], and from then on addresses the
//! device only through the handle and the [`Uid`] it was given.

use crate::error::AcquireError;

/// Class of device a facade can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceKind {
    /// Single-bit indicator lamp
    Led,
    /// Seven-segment display
    Segment,
    /// Serial port
    Serial,
}

/// Instance number of a device within its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InstanceId(u8);

impl InstanceId {
    /// Wrap a raw instance number.
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    /// Raw instance number.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Instance number as a table index.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Lamp numbering on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LedInstance {
    /// First green lamp
    Green1 = 0,
    /// Orange lamp
    Orange = 1,
    /// Red lamp
    Red = 2,
    /// Second green lamp
    Green2 = 3,
}

impl LedInstance {
    /// All lamps in instance order.
    pub const ALL: [Self; 4] = [Self::Green1, Self::Orange, Self::Red, Self::Green2];

    /// Facade instance number of this lamp.
    pub const fn id(self) -> InstanceId {
        InstanceId::new(self as u8)
    }
}

impl From<LedInstance> for InstanceId {
    fn from(led: LedInstance) -> Self {
        led.id()
    }
}

/// Identifier a facade issues for a successfully opened device.
///
/// Carried by [`ResourceId::Valid`]; every later write by the owner
/// presents it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Uid(u16);

impl Uid {
    /// Wrap a raw identifier. Facade implementations only.
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub const fn get(self) -> u16 {
        self.0
    }
}

/// Outcome class returned alongside a device handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResourceId {
    /// Device opened and usable through the carried uid
    Valid(Uid),
    /// Another owner holds the device
    InUse,
    /// No such device
    Unknown,
}

impl ResourceId {
    /// `true` only for [`ResourceId::Valid`].
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Uid of a valid identifier.
    pub const fn uid(self) -> Option<Uid> {
        match self {
            Self::Valid(uid) => Some(uid),
            Self::InUse | Self::Unknown => None,
        }
    }
}

/// Logical level written to a single-bit device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinState {
    /// Logic 1 (lamp on)
    High,
    /// Logic 0 (lamp off)
    Low,
}

impl From<bool> for PinState {
    fn from(value: bool) -> Self {
        if value {
            Self::High
        } else {
            Self::Low
        }
    }
}

impl From<PinState> for bool {
    fn from(value: PinState) -> Self {
        matches!(value, PinState::High)
    }
}

/// Raw result of [`DeviceFacade::open`].
///
/// A handle may be present even when `id` is not valid (the device node
/// exists but is owned elsewhere). Use [`Opened::into_result`] rather than
/// looking at the handle directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opened<H> {
    /// Channel to the device, absent when no driver was found
    pub handle: Option<H>,
    /// Outcome class
    pub id: ResourceId,
}

impl<H> Opened<H> {
    /// Opened and usable.
    pub const fn valid(handle: H, uid: Uid) -> Self {
        Self {
            handle: Some(handle),
            id: ResourceId::Valid(uid),
        }
    }

    /// Driver found, device owned elsewhere.
    pub const fn in_use(handle: H) -> Self {
        Self {
            handle: Some(handle),
            id: ResourceId::InUse,
        }
    }

    /// No driver for this kind / instance.
    pub const fn absent() -> Self {
        Self {
            handle: None,
            id: ResourceId::Unknown,
        }
    }

    /// Validate the outcome.
    ///
    /// Succeeds iff a handle is present and the identifier is valid. An
    /// absent handle is reported as [`AcquireError::NoDevice`] whatever the
    /// identifier says; a present handle with a failing identifier is
    /// dropped without being used.
    pub fn into_result(self) -> Result<(H, Uid), AcquireError> {
        let Some(handle) = self.handle else {
            return Err(AcquireError::NoDevice);
        };
        match self.id {
            ResourceId::Valid(uid) => Ok((handle, uid)),
            ResourceId::InUse => Err(AcquireError::InUse),
            ResourceId::Unknown => Err(AcquireError::Unknown),
        }
    }
}

/// Narrow open / write-bit interface onto device drivers.
///
/// Methods take `&self`: a facade is shared by every task in the system and
/// implementations serialise access internally.
pub trait DeviceFacade {
    /// Channel to an opened device
    type Handle;

    /// Request a channel to `instance` of `kind`.
    fn open(&self, kind: DeviceKind, instance: InstanceId) -> Opened<Self::Handle>;

    /// Drive a single-bit device to `value`.
    ///
    /// Treated as infallible by callers; implementations report their own
    /// failures.
    fn write_bit(&self, handle: &Self::Handle, uid: Uid, value: PinState);
}

impl<T: DeviceFacade + ?Sized> DeviceFacade for &T {
    type Handle = T::Handle;

    fn open(&self, kind: DeviceKind, instance: InstanceId) -> Opened<Self::Handle> {
        (**self).open(kind, instance)
    }

    fn write_bit(&self, handle: &Self::Handle, uid: Uid, value: PinState) {
        (**self).write_bit(handle, uid, value);
    }
}
