//! Timestamp sources for note inserts.
//!
//! # Responsibility
//! - Provide `now()` in epoch milliseconds to the write path.
//! - Allow tests to pin time so equal timestamps can be forced.
//!
//! # Invariants
//! - `SystemClock` follows the wall clock and may repeat a value across
//!   fast consecutive calls.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of insert timestamps.
pub trait Clock: Send + Sync {
    /// Current time in epoch milliseconds.
    fn now_ms(&self) -> i64;
}

/// Wall-clock time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| {
                i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
            })
    }
}

/// Manually driven time source.
///
/// A clock from [`ManualClock::new`] returns the same value until moved with
/// [`ManualClock::set`] or [`ManualClock::advance`]. One from
/// [`ManualClock::ticking`] also moves by `step_ms` after every reading.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicI64,
    step_ms: i64,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self::ticking(start_ms, 0)
    }

    /// Starts at `start_ms` and advances by `step_ms` on each `now_ms()`.
    pub fn ticking(start_ms: i64, step_ms: i64) -> Self {
        Self {
            now_ms: AtomicI64::new(start_ms),
            step_ms,
        }
    }

    pub fn set(&self, now_ms: i64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }

    pub fn advance(&self, delta_ms: i64) {
        self.now_ms.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.fetch_add(self.step_ms, Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, ManualClock, SystemClock};

    #[test]
    fn manual_clock_holds_until_moved() {
        let clock = ManualClock::new(100);
        assert_eq!(clock.now_ms(), 100);
        assert_eq!(clock.now_ms(), 100);
        clock.advance(5);
        assert_eq!(clock.now_ms(), 105);
        clock.set(1);
        assert_eq!(clock.now_ms(), 1);
    }

    #[test]
    fn ticking_clock_moves_after_each_reading() {
        let clock = ManualClock::ticking(7, 2);
        assert_eq!(clock.now_ms(), 7);
        assert_eq!(clock.now_ms(), 9);
        clock.set(0);
        assert_eq!(clock.now_ms(), 0);
        assert_eq!(clock.now_ms(), 2);
    }

    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.now_ms() > 1_577_836_800_000);
    }
}
