//! Mock implementations for testing
//!
//! Recording doubles for every platform seam. All of them write into one
//! shared [`Trace`], so a test can assert on the global order of opens,
//! region entries and exits, device writes, and idles across several tasks.

#![cfg(any(test, feature = "std"))]
// Test support code: arithmetic on counters and sequence numbers cannot overflow in practice.
#![allow(clippy::arithmetic_side_effects)]

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::device::{DeviceFacade, DeviceKind, InstanceId, Opened, PinState, ResourceId, Uid};
use crate::idle::IdleStrategy;
use crate::sync::ExclusiveRegion;

/// Label attached to every recorded event.
pub type Tag = &'static str;

/// Something a mock observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// `DeviceFacade::open`
    Open(DeviceKind, InstanceId),
    /// `DeviceFacade::write_bit`
    Write(PinState),
    /// `ExclusiveRegion::enter` returned
    Enter,
    /// `ExclusiveRegion::leave` about to release
    Leave,
    /// `IdleStrategy::idle`
    Idle,
    /// `IdleStrategy::park`
    Park,
}

/// One recorded event. `seq` is a global logical timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    /// Position in the trace, strictly increasing
    pub seq: u64,
    /// Who produced it
    pub tag: Tag,
    /// What happened
    pub kind: EventKind,
}

#[derive(Default)]
struct TraceLog {
    next_seq: u64,
    events: Vec<Event>,
}

/// Shared, thread-safe event log.
#[derive(Clone, Default)]
pub struct Trace {
    log: Arc<Mutex<TraceLog>>,
}

impl Trace {
    /// Empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, TraceLog> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an event and return its timestamp.
    pub fn record(&self, tag: Tag, kind: EventKind) -> u64 {
        let mut log = self.lock();
        let seq = log.next_seq;
        log.next_seq += 1;
        log.events.push(Event { seq, tag, kind });
        seq
    }

    /// Snapshot of every event so far.
    pub fn events(&self) -> Vec<Event> {
        self.lock().events.clone()
    }

    /// Event kinds produced by `tag`, in order.
    pub fn kinds_for(&self, tag: Tag) -> Vec<EventKind> {
        self.lock()
            .events
            .iter()
            .filter(|e| e.tag == tag)
            .map(|e| e.kind)
            .collect()
    }

    /// Number of events by `tag` matching `kind`.
    pub fn count(&self, tag: Tag, kind: EventKind) -> usize {
        self.lock()
            .events
            .iter()
            .filter(|e| e.tag == tag && e.kind == kind)
            .count()
    }

    /// Closed `[enter, leave]` intervals recorded by `tag`.
    ///
    /// A trailing `Enter` without its `Leave` is ignored.
    pub fn guarded_intervals(&self, tag: Tag) -> Vec<(u64, u64)> {
        let mut intervals = Vec::new();
        let mut open = None;
        for event in self.lock().events.iter().filter(|e| e.tag == tag) {
            match event.kind {
                EventKind::Enter => open = Some(event.seq),
                EventKind::Leave => {
                    if let Some(start) = open.take() {
                        intervals.push((start, event.seq));
                    }
                }
                _ => {}
            }
        }
        intervals
    }
}

/// Scripted result for [`MockDevice::open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// Handle present, identifier valid
    Valid,
    /// Handle present, identifier already-in-use
    InUse,
    /// Handle present, identifier unknown
    Unknown,
    /// No handle, identifier unknown
    Absent,
}

impl OpenOutcome {
    /// Every outcome the facade contract allows.
    pub const ALL: [Self; 4] = [Self::Valid, Self::InUse, Self::Unknown, Self::Absent];
}

/// Uid issued by [`MockDevice`] for a valid open.
pub const MOCK_UID: Uid = Uid::new(0x0A11);

/// Handle issued by [`MockDevice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockHandle {
    /// Instance that was opened
    pub instance: InstanceId,
}

/// Facade that answers every open with a scripted outcome and records
/// all traffic.
pub struct MockDevice {
    trace: Trace,
    tag: Tag,
    outcome: OpenOutcome,
}

impl MockDevice {
    /// Mock answering opens with `outcome`.
    pub fn new(trace: Trace, tag: Tag, outcome: OpenOutcome) -> Self {
        Self {
            trace,
            tag,
            outcome,
        }
    }

    /// Number of writes recorded for this mock.
    pub fn writes(&self) -> usize {
        self.trace
            .kinds_for(self.tag)
            .iter()
            .filter(|k| matches!(k, EventKind::Write(_)))
            .count()
    }
}

impl DeviceFacade for MockDevice {
    type Handle = MockHandle;

    fn open(&self, kind: DeviceKind, instance: InstanceId) -> Opened<MockHandle> {
        self.trace.record(self.tag, EventKind::Open(kind, instance));
        let handle = MockHandle { instance };
        match self.outcome {
            OpenOutcome::Valid => Opened::valid(handle, MOCK_UID),
            OpenOutcome::InUse => Opened::in_use(handle),
            OpenOutcome::Unknown => Opened {
                handle: Some(handle),
                id: ResourceId::Unknown,
            },
            OpenOutcome::Absent => Opened::absent(),
        }
    }

    fn write_bit(&self, _handle: &MockHandle, _uid: Uid, value: PinState) {
        self.trace.record(self.tag, EventKind::Write(value));
    }
}

/// Region wrapper that records entries and exits around a real region.
///
/// `Enter` is recorded after the inner region admits the caller and `Leave`
/// before it is released, so recorded intervals nest inside the real ones.
pub struct RecordingRegion<R> {
    inner: Arc<R>,
    trace: Trace,
    tag: Tag,
}

impl<R: ExclusiveRegion> RecordingRegion<R> {
    /// Record traffic on `inner` under `tag`.
    pub fn new(inner: Arc<R>, trace: Trace, tag: Tag) -> Self {
        Self { inner, trace, tag }
    }
}

impl<R: ExclusiveRegion> ExclusiveRegion for RecordingRegion<R> {
    fn enter(&self) {
        self.inner.enter();
        self.trace.record(self.tag, EventKind::Enter);
    }

    fn leave(&self) {
        self.trace.record(self.tag, EventKind::Leave);
        self.inner.leave();
    }
}

/// Panic payload raised by [`CountingIdle`] when its cap is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapReached {
    /// Calls made, including the one that hit the cap
    pub calls: usize,
}

/// Idle strategy that records every call and stops the task after `cap`
/// calls by unwinding with a [`CapReached`] payload.
///
/// This is how tests bound loops that never return.
pub struct CountingIdle {
    trace: Trace,
    tag: Tag,
    cap: usize,
    calls: usize,
}

impl CountingIdle {
    /// Stop after `cap` idle or park calls.
    pub fn new(trace: Trace, tag: Tag, cap: usize) -> Self {
        Self {
            trace,
            tag,
            cap,
            calls: 0,
        }
    }

    fn tick(&mut self, kind: EventKind) {
        self.trace.record(self.tag, kind);
        self.calls += 1;
        if self.calls >= self.cap {
            std::panic::panic_any(CapReached { calls: self.calls });
        }
    }
}

impl IdleStrategy for CountingIdle {
    fn idle(&mut self) {
        self.tick(EventKind::Idle);
    }

    fn park(&mut self) {
        self.tick(EventKind::Park);
    }
}

/// Run a diverging closure until it unwinds and return the cap payload.
///
/// Returns `None` if the closure unwound for any other reason.
pub fn run_until_cap<F>(body: F) -> Option<CapReached>
where
    F: FnOnce(),
{
    let err = std::panic::catch_unwind(std::panic::AssertUnwindSafe(body)).err()?;
    err.downcast_ref::<CapReached>().copied()
}
