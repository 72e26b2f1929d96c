//! Single-flight flags.

use std::sync::atomic::{AtomicBool, Ordering};

/// Holds an in-flight flag raised until dropped.
///
/// Dropping the guard clears the flag on every exit path, including early
/// returns and panics unwinding through the request.
#[derive(Debug)]
pub struct FlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> FlightGuard<'a> {
    /// Raises `flag`, or returns `None` if it is already raised.
    pub fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
