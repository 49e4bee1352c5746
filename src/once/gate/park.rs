use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering::Acquire;
use std::sync::{Condvar, Mutex, PoisonError};

/// Portable waiting for platforms without the futex path: a mutex and condvar pair per gate.
///
/// The mutex guards nothing but the sleep itself; the gate's state word stays the single source
/// of truth and is only ever read here.
pub(crate) struct WaitQueue {
    lock: Mutex<()>,
    cvar: Condvar,
}

impl WaitQueue {
    pub const fn new() -> WaitQueue {
        WaitQueue {
            lock: Mutex::new(()),
            cvar: Condvar::new(),
        }
    }

    /// Blocks while `state` still holds `current`.
    pub fn wait(&self, state: &AtomicU32, current: u32) {
        // A poisoned lock is recoverable: no state lives inside it.
        let mut guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        while state.load(Acquire) == current {
            guard = self.cvar.wait(guard).unwrap_or_else(PoisonError::into_inner);
        }
    }

    pub fn wake_all(&self, _state: &AtomicU32) {
        // Taking the lock orders this wake after any waiter that checked the state but hasn't
        // reached its condvar sleep yet, so the notification cannot be missed.
        drop(self.lock.lock().unwrap_or_else(PoisonError::into_inner));
        self.cvar.notify_all();
    }
}
