//! Idle/Busy latch for single-flight UI workflows

use std::cell::Cell;

/// Single-threaded latch that lets one action run at a time.
///
/// The dashboard runs on the browser's UI thread, so a `Cell` is enough.
/// A trigger that arrives while the latch is held gets `None` back and is
/// expected to do nothing.
#[derive(Debug, Default)]
pub struct BusyLatch {
    busy: Cell<bool>,
}

impl BusyLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to enter the busy state
    pub fn try_acquire(&self) -> Option<BusyGuard<'_>> {
        if self.busy.replace(true) {
            None
        } else {
            Some(BusyGuard { latch: self })
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }
}

/// Releases the latch when dropped
#[derive(Debug)]
pub struct BusyGuard<'a> {
    latch: &'a BusyLatch,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.latch.busy.set(false);
    }
}
