use std::ptr;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering::Acquire;

use libc::{FUTEX_PRIVATE_FLAG, FUTEX_WAIT, FUTEX_WAKE, c_int, timespec};

/// Futex-backed waiting: threads sleep on the gate's state word itself, so the queue needs no
/// storage of its own.
pub(crate) struct WaitQueue;

impl WaitQueue {
    pub const fn new() -> WaitQueue {
        WaitQueue
    }

    /// Blocks while `state` still holds `current`. Spurious returns are absorbed here; callers
    /// still re-examine the state themselves because it may have changed again by the time this
    /// returns.
    pub fn wait(&self, state: &AtomicU32, current: u32) {
        while state.load(Acquire) == current {
            futex_wait(state, current);
        }
    }

    pub fn wake_all(&self, state: &AtomicU32) {
        futex_wake_all(state);
    }
}

fn futex_wait(word: &AtomicU32, expected: u32) {
    // The kernel re-checks the word under its own lock, so a wake between our load and the
    // syscall turns into an immediate EAGAIN return. EINTR is handled by the caller's loop.
    // SAFETY: word outlives the call and FUTEX_WAIT never writes through the pointer.
    unsafe {
        libc::syscall(
            libc::SYS_futex,
            word.as_ptr(),
            FUTEX_WAIT | FUTEX_PRIVATE_FLAG,
            expected as c_int,
            ptr::null::<timespec>(),
        );
    }
}

fn futex_wake_all(word: &AtomicU32) {
    // SAFETY: word outlives the call; FUTEX_WAKE only uses the address as a key.
    unsafe {
        libc::syscall(
            libc::SYS_futex,
            word.as_ptr(),
            FUTEX_WAKE | FUTEX_PRIVATE_FLAG,
            c_int::MAX,
        );
    }
}
