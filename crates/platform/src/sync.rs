//! Mutual-exclusion region abstraction
//!
//! A guarded region is the code between [`ExclusiveRegion::enter`] and the
//! matching [`ExclusiveRegion::leave`]. Two tasks contending on the same
//! region never have their guarded sections overlap. Admission order among
//! waiters is not specified.
//!
//! Prefer [`ExclusiveRegion::guard`] over raw enter/leave pairs: the returned
//! [`RegionGuard`] leaves the region when dropped, so an early exit (or an
//! unwind on host builds) cannot leave the region held.

use spin::mutex::SpinMutex;

/// Enter / leave bracket around a critical region.
pub trait ExclusiveRegion {
    /// Block until exclusive access is granted.
    fn enter(&self);

    /// Release the region.
    ///
    /// Must be called by the same logical owner that called [`enter`](Self::enter).
    fn leave(&self);

    /// Enter the region and return a guard that leaves it on drop.
    fn guard(&self) -> RegionGuard<'_, Self> {
        self.enter();
        RegionGuard { region: self }
    }
}

impl<T: ExclusiveRegion + ?Sized> ExclusiveRegion for &T {
    fn enter(&self) {
        (**self).enter();
    }

    fn leave(&self) {
        (**self).leave();
    }
}

/// Proof of being inside a region. Leaves the region when dropped.
#[must_use = "dropping the guard immediately leaves the region"]
pub struct RegionGuard<'r, R: ExclusiveRegion + ?Sized> {
    region: &'r R,
}

impl<R: ExclusiveRegion + ?Sized> Drop for RegionGuard<'_, R> {
    fn drop(&mut self) {
        self.region.leave();
    }
}

/// Spin lock region over [`spin::mutex::SpinMutex`].
///
/// `enter` spins without yielding. On a preemptive kernel the holder is
/// eventually rescheduled and leaves; on a purely cooperative executor two
/// tasks must never contend on the same `SpinRegion`.
pub struct SpinRegion {
    lock: SpinMutex<()>,
}

impl SpinRegion {
    /// New, unheld region. Usable in a `static`.
    pub const fn new() -> Self {
        Self {
            lock: SpinMutex::new(()),
        }
    }

    /// Enter without blocking. Returns `false` if the region is held.
    pub fn try_enter(&self) -> bool {
        // The region outlives the guard; `leave` releases it.
        self.lock.try_lock().map(core::mem::forget).is_some()
    }

    /// Whether some task is currently inside the region.
    pub fn is_held(&self) -> bool {
        self.lock.is_locked()
    }
}

impl Default for SpinRegion {
    fn default() -> Self {
        Self::new()
    }
}

impl ExclusiveRegion for SpinRegion {
    fn enter(&self) {
        core::mem::forget(self.lock.lock());
    }

    fn leave(&self) {
        // SAFETY: `leave` is only called by the owner that entered (see
        // `ExclusiveRegion::leave`), whose guard was forgotten in `enter` or
        // `try_enter`. The mutex protects `()`, so no data is exposed.
        unsafe { self.lock.force_unlock() };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_enter_fails_while_held() {
        let region = SpinRegion::new();
        assert!(region.try_enter());
        assert!(region.is_held());
        assert!(!region.try_enter());
        region.leave();
        assert!(!region.is_held());
        assert!(region.try_enter());
    }

    #[test]
    fn guard_leaves_on_drop() {
        let region = SpinRegion::new();
        {
            let _guard = region.guard();
            assert!(region.is_held());
        }
        assert!(!region.is_held());
    }

    #[test]
    fn guard_through_reference() {
        let region = SpinRegion::new();
        let by_ref = &region;
        let guard = by_ref.guard();
        assert!(region.is_held());
        drop(guard);
        assert!(!region.is_held());
    }

    #[test]
    fn enter_waits_for_leave_on_another_thread() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let region = Arc::new(SpinRegion::new());
        let released = Arc::new(AtomicBool::new(false));
        region.enter();

        let waiter = {
            let region = Arc::clone(&region);
            let released = Arc::clone(&released);
            std::thread::spawn(move || {
                region.enter();
                let saw_release = released.load(Ordering::SeqCst);
                region.leave();
                saw_release
            })
        };

        std::thread::sleep(std::time::Duration::from_millis(20));
        released.store(true, Ordering::SeqCst);
        region.leave();

        assert!(waiter.join().unwrap());
        assert!(!region.is_held());
    }

    #[test]
    fn contending_threads_never_overlap() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let region = Arc::new(SpinRegion::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let region = Arc::clone(&region);
                let inside = Arc::clone(&inside);
                std::thread::spawn(move || {
                    for _ in 0..1_000 {
                        let _guard = region.guard();
                        let now = inside.fetch_add(1, Ordering::SeqCst);
                        assert_eq!(now, 0, "two holders inside the region");
                        std::hint::spin_loop();
                        inside.fetch_sub(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }
        assert!(!region.is_held());
    }
}
