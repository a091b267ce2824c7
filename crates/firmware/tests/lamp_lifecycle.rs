//! Lamp task lifecycle against recording mocks.
//!
//! Every loop here is bounded by `CountingIdle`: the task unwinds with a
//! `CapReached` payload once its idle budget is spent, which is the only
//! way a lamp task ever stops.

// Test files legitimately use arithmetic for verification; allow at file level.
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]

use std::sync::Arc;

use firmware::config::{LampConfig, RED_LAMP};
use firmware::LampTask;
use platform::mocks::{
    run_until_cap, CapReached, CountingIdle, EventKind, MockDevice, OpenOutcome, RecordingRegion,
    Trace,
};
use platform::{DeviceKind, PinState, SpinRegion};
use proptest::prelude::*;

const TAG: &str = "red";

/// Run the red task once with `outcome` scripted, stopping after `cap`
/// idle/park calls.
fn run_red(outcome: OpenOutcome, cap: usize) -> (Trace, Option<CapReached>) {
    run_task(RED_LAMP, outcome, cap)
}

fn run_task(config: LampConfig, outcome: OpenOutcome, cap: usize) -> (Trace, Option<CapReached>) {
    let trace = Trace::new();
    let device = MockDevice::new(trace.clone(), TAG, outcome);
    let region = RecordingRegion::new(Arc::new(SpinRegion::new()), trace.clone(), TAG);
    let idle = CountingIdle::new(trace.clone(), TAG, cap);

    let stopped = run_until_cap(|| LampTask::new(&device, &region, idle, config).run());
    (trace, stopped)
}

fn is_touch(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Write(_) | EventKind::Enter | EventKind::Leave)
}

// Scenario: valid open, N cycles.
#[test]
fn valid_open_toggles_in_strict_alternation() {
    const CYCLES: usize = 5;
    let (trace, stopped) = run_red(OpenOutcome::Valid, 2 * CYCLES);
    assert_eq!(stopped, Some(CapReached { calls: 2 * CYCLES }));

    let kinds = trace.kinds_for(TAG);
    assert_eq!(kinds[0], EventKind::Open(DeviceKind::Led, RED_LAMP.instance));

    let cycle = [
        EventKind::Enter,
        EventKind::Write(PinState::High),
        EventKind::Idle,
        EventKind::Leave,
        EventKind::Write(PinState::Low),
        EventKind::Idle,
    ];
    let expected: Vec<EventKind> = cycle.iter().copied().cycle().take(cycle.len() * CYCLES).collect();
    assert_eq!(kinds[1..], expected[..]);

    assert_eq!(trace.count(TAG, EventKind::Write(PinState::High)), CYCLES);
    assert_eq!(trace.count(TAG, EventKind::Write(PinState::Low)), CYCLES);
}

// Scenario: absent handle, unknown id.
#[test]
fn absent_handle_parks_without_touching_anything() {
    let (trace, stopped) = run_red(OpenOutcome::Absent, 20);
    assert_eq!(stopped, Some(CapReached { calls: 20 }));

    let kinds = trace.kinds_for(TAG);
    assert_eq!(kinds.len(), 21);
    assert_eq!(kinds[0], EventKind::Open(DeviceKind::Led, RED_LAMP.instance));
    assert!(kinds[1..].iter().all(|k| *k == EventKind::Park));
}

// Scenario: handle present but already in use.
#[test]
fn in_use_is_treated_like_absent() {
    let (in_use, _) = run_red(OpenOutcome::InUse, 20);
    let (absent, _) = run_red(OpenOutcome::Absent, 20);
    assert_eq!(in_use.kinds_for(TAG), absent.kinds_for(TAG));
}

#[test]
fn unknown_id_with_handle_is_treated_like_absent() {
    let (unknown, _) = run_red(OpenOutcome::Unknown, 20);
    let (absent, _) = run_red(OpenOutcome::Absent, 20);
    assert_eq!(unknown.kinds_for(TAG), absent.kinds_for(TAG));
}

#[test]
fn open_targets_configured_device() {
    let config = LampConfig {
        kind: DeviceKind::Serial,
        ..LampConfig::led("serial", platform::LedInstance::Orange)
    };
    let (trace, _) = run_task(config, OpenOutcome::Absent, 1);
    assert_eq!(
        trace.kinds_for(TAG)[0],
        EventKind::Open(DeviceKind::Serial, config.instance)
    );
}

#[test]
fn on_writes_inside_region_off_writes_outside() {
    let (trace, _) = run_red(OpenOutcome::Valid, 40);
    let intervals = trace.guarded_intervals(TAG);
    assert_eq!(intervals.len(), 20);

    let inside = |seq: u64| intervals.iter().any(|&(enter, leave)| enter < seq && seq < leave);
    for event in trace.events() {
        match event.kind {
            EventKind::Write(PinState::High) => assert!(inside(event.seq), "on-write at {} unguarded", event.seq),
            EventKind::Write(PinState::Low) => assert!(!inside(event.seq), "off-write at {} guarded", event.seq),
            _ => {}
        }
    }
}

#[test]
fn region_entries_never_nest() {
    let (trace, _) = run_red(OpenOutcome::Valid, 30);
    let mut depth = 0_i32;
    for kind in trace.kinds_for(TAG) {
        match kind {
            EventKind::Enter => depth += 1,
            EventKind::Leave => depth -= 1,
            _ => {}
        }
        assert!((0..=1).contains(&depth));
    }
    assert_eq!(depth, 0);
}

#[test]
fn toggle_loop_runs_until_stopped_from_outside() {
    for cap in [1, 2, 7, 100] {
        let (trace, stopped) = run_red(OpenOutcome::Valid, cap);
        assert_eq!(stopped.map(|c| c.calls), Some(cap));
        assert_eq!(trace.count(TAG, EventKind::Idle), cap);
    }
}

#[test]
fn unwinding_mid_cycle_releases_region() {
    let trace = Trace::new();
    let inner = Arc::new(SpinRegion::new());
    let device = MockDevice::new(trace.clone(), TAG, OpenOutcome::Valid);
    let region = RecordingRegion::new(Arc::clone(&inner), trace.clone(), TAG);
    // Odd cap: stops on the idle inside the region.
    let idle = CountingIdle::new(trace.clone(), TAG, 3);

    let stopped = run_until_cap(|| LampTask::new(&device, &region, idle, RED_LAMP).run());

    assert!(stopped.is_some());
    assert!(!inner.is_held());
    assert_eq!(trace.kinds_for(TAG).last(), Some(&EventKind::Leave));
}

proptest! {
    /// Only a valid open leads to toggling; every failure class parks.
    #[test]
    fn acquisition_is_deterministic(
        outcome in proptest::sample::select(OpenOutcome::ALL.to_vec()),
        cap in 1usize..64,
    ) {
        let (trace, stopped) = run_red(outcome, cap);
        prop_assert_eq!(stopped.map(|c| c.calls), Some(cap));

        let kinds = trace.kinds_for(TAG);
        let toggled = kinds.iter().any(is_touch);
        prop_assert_eq!(toggled, outcome == OpenOutcome::Valid);
        prop_assert_eq!(trace.count(TAG, EventKind::Park) == cap, outcome != OpenOutcome::Valid);
    }

    /// A failed acquisition never reaches the device or the region.
    #[test]
    fn failed_acquisition_is_contained(
        outcome in proptest::sample::select(vec![OpenOutcome::InUse, OpenOutcome::Unknown, OpenOutcome::Absent]),
        cap in 1usize..256,
    ) {
        let (trace, _) = run_red(outcome, cap);
        prop_assert!(!trace.kinds_for(TAG).iter().any(is_touch));
    }
}
