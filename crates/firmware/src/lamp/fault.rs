//! Terminal fault state.
//!
//! Entered when acquisition fails. The task keeps its scheduler slot but
//! does nothing observable: no device access, no region traffic, no retry.

use platform::IdleStrategy;

/// Park the task forever.
pub fn park_forever<I: IdleStrategy>(mut idle: I) -> ! {
    loop {
        idle.park();
    }
}
