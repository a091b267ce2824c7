//! LED bank driver.
//!
//! Concrete [`DeviceFacade`] for [`DeviceKind::Led`] over a fixed table of
//! `embedded-hal` output pins. Slot `n` serves instance `n`; a slot may be
//! empty when the board has no lamp for that instance.
//!
//! # Ownership
//!
//! | Open of...                  | Handle  | Identifier        |
//! |-----------------------------|---------|-------------------|
//! | populated, unclaimed slot   | present | valid (fresh uid) |
//! | populated, claimed slot     | present | already-in-use    |
//! | empty or out-of-range slot  | absent  | unknown           |
//! | any other device kind       | absent  | unknown           |
//!
//! Claims are never released. Writes carrying a uid other than the slot
//! owner's are dropped.
//!
//! # Locking
//!
//! Bank state sits behind a blocking mutex on [`CriticalSectionRawMutex`], so
//! tasks on any priority level (and ISRs) may share one bank. Each lock holds
//! the critical section for a single pin write or a table lookup.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embedded_hal::digital::{self, OutputPin};

use platform::{DeviceFacade, DeviceKind, InstanceId, Opened, PinState, Uid};

/// Channel to one lamp slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedHandle {
    instance: InstanceId,
}

impl LedHandle {
    /// Instance this handle addresses.
    pub fn instance(&self) -> InstanceId {
        self.instance
    }
}

struct Slot<P> {
    pin: P,
    owner: Option<Uid>,
}

struct BankState<P, const N: usize> {
    slots: [Option<Slot<P>>; N],
    next_uid: u16,
}

/// Bank of `N` lamp slots.
pub struct LedBank<P, const N: usize> {
    state: Mutex<CriticalSectionRawMutex, RefCell<BankState<P, N>>>,
}

impl<P: OutputPin, const N: usize> LedBank<P, N> {
    /// Bank over `pins`; `None` marks a slot with no lamp fitted.
    pub fn new(pins: [Option<P>; N]) -> Self {
        Self {
            state: Mutex::new(RefCell::new(BankState {
                slots: pins.map(|pin| pin.map(|pin| Slot { pin, owner: None })),
                next_uid: 1,
            })),
        }
    }

    /// Whether `instance` has been handed out.
    pub fn is_claimed(&self, instance: InstanceId) -> bool {
        self.state.lock(|cell| {
            cell.borrow()
                .slots
                .get(instance.index())
                .and_then(Option::as_ref)
                .is_some_and(|slot| slot.owner.is_some())
        })
    }

    /// Number of populated slots.
    pub fn fitted(&self) -> usize {
        self.state
            .lock(|cell| cell.borrow().slots.iter().filter(|s| s.is_some()).count())
    }
}

impl<P: OutputPin, const N: usize> DeviceFacade for LedBank<P, N> {
    type Handle = LedHandle;

    fn open(&self, kind: DeviceKind, instance: InstanceId) -> Opened<LedHandle> {
        if kind != DeviceKind::Led {
            debug!("led bank: refusing non-led open of instance {}", instance.get());
            return Opened::absent();
        }

        self.state.lock(|cell| {
            let mut state = cell.borrow_mut();
            let BankState { slots, next_uid } = &mut *state;

            let Some(slot) = slots.get_mut(instance.index()).and_then(Option::as_mut) else {
                debug!("led bank: no lamp fitted at instance {}", instance.get());
                return Opened::absent();
            };

            let handle = LedHandle { instance };
            if slot.owner.is_some() {
                debug!("led bank: instance {} already claimed", instance.get());
                return Opened::in_use(handle);
            }

            let uid = Uid::new(*next_uid);
            *next_uid = next_uid.wrapping_add(1);
            slot.owner = Some(uid);
            trace!("led bank: instance {} claimed as uid {}", instance.get(), uid.get());
            Opened::valid(handle, uid)
        })
    }

    fn write_bit(&self, handle: &LedHandle, uid: Uid, value: PinState) {
        self.state.lock(|cell| {
            let mut state = cell.borrow_mut();
            let Some(slot) = state
                .slots
                .get_mut(handle.instance.index())
                .and_then(Option::as_mut)
            else {
                return;
            };
            if slot.owner != Some(uid) {
                warn!(
                    "led bank: write to instance {} with foreign uid {}",
                    handle.instance.get(),
                    uid.get()
                );
                return;
            }
            let level = match value {
                PinState::High => digital::PinState::High,
                PinState::Low => digital::PinState::Low,
            };
            if slot.pin.set_state(level).is_err() {
                warn!("led bank: pin write failed on instance {}", handle.instance.get());
            }
        });
    }
}
