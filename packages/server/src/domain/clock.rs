//! Strictly increasing nanosecond clock for the periodic feed.

use std::sync::atomic::{AtomicI64, Ordering};

use hibiki_shared::time::get_unix_timestamp_nanos;

type ClockSource = Box<dyn Fn() -> i64 + Send + Sync>;

/// Wall clock that never repeats or goes backwards.
///
/// Each reading is `max(source(), previous + 1)`, so readings stay strictly
/// increasing across all callers even when the wall clock stalls or is
/// stepped back.
pub struct MonotonicClock {
    source: ClockSource,
    last: AtomicI64,
}

impl MonotonicClock {
    /// Clock backed by the system wall clock in Unix nanoseconds
    pub fn new() -> Self {
        Self::with_source(get_unix_timestamp_nanos)
    }

    pub fn with_source<F>(source: F) -> Self
    where
        F: Fn() -> i64 + Send + Sync + 'static,
    {
        Self {
            source: Box::new(source),
            last: AtomicI64::new(i64::MIN),
        }
    }

    /// Next reading, strictly greater than every earlier one
    pub fn now(&self) -> i64 {
        let observed = (self.source)();
        let mut previous = self.last.load(Ordering::Acquire);
        loop {
            let next = observed.max(previous.saturating_add(1));
            match self
                .last
                .compare_exchange_weak(previous, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return next,
                Err(actual) => previous = actual,
            }
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}
