// src/engine/guard.rs

//! Re-entrancy guard: at most one run in flight, extra triggers are dropped.

use std::sync::atomic::{AtomicBool, Ordering};

/// Single shared `busy` flag.
///
/// This is a gate, not a queue: a trigger that finds the guard busy is lost.
#[derive(Debug, Default)]
pub struct RunGuard {
    busy: AtomicBool,
}

impl RunGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically flip `busy` from false to true. Returns whether this call
    /// won; on `false` the caller must skip the run entirely.
    pub fn try_enter(&self) -> bool {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Reset `busy` unconditionally.
    pub fn leave(&self) {
        self.busy.store(false, Ordering::Release);
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// RAII form of [`try_enter`](Self::try_enter): the returned permit calls
    /// [`leave`](Self::leave) when dropped, on every exit path.
    pub fn acquire(&self) -> Option<RunPermit<'_>> {
        self.try_enter().then(|| RunPermit { guard: self })
    }
}

/// Proof of a successful [`RunGuard::acquire`].
#[derive(Debug)]
pub struct RunPermit<'a> {
    guard: &'a RunGuard,
}

impl Drop for RunPermit<'_> {
    fn drop(&mut self) {
        self.guard.leave();
    }
}
