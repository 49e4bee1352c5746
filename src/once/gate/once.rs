use std::convert::Infallible;
use std::fmt::{self, Debug, Formatter};
use std::mem;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering::{Acquire, Release};

use super::WaitQueue;
use super::state::{INITIALIZING, OnceState, READY, UNINITIALIZED};

/// A one-shot execute-once gate.
///
/// A `Once` guards an action so that it runs at most once across any number of threads. The first
/// caller to arrive runs the action; every caller that arrives while it is running blocks until
/// it finishes; every caller after that returns immediately. Everything the action wrote is
/// visible to every thread the gate releases, because the `Ready` store uses `Release` ordering
/// and all observing loads use `Acquire`.
///
/// # State Machine
/// | From | To | When |
/// |-|-|-|
/// | `Uninitialized` | `Initializing` | a caller wins the race to construct |
/// | `Initializing` | `Ready` | the action returns successfully (terminal) |
/// | `Initializing` | `Uninitialized` | the action fails or panics (retryable) |
///
/// Failure does not poison the gate: the failed attempt is rolled back, waiting threads are
/// released and the next caller runs the action again. Only the caller whose closure actually ran
/// sees the error.
///
/// # Examples
/// ```
/// use sync_lib::once::gate::Once;
///
/// static GATE: Once = Once::new();
///
/// let mut launched = false;
/// GATE.call_once(|| launched = true);
/// GATE.call_once(|| unreachable!("only the first call runs"));
/// assert!(launched);
/// assert!(GATE.is_ready());
/// ```
pub struct Once {
    state: AtomicU32,
    waiters: WaitQueue,
}

/// Rolls a failed construction attempt back to `Uninitialized` and releases every waiting
/// thread. Armed for the whole time a caller's closure runs, so a panic unwinds through it.
struct Rollback<'a>(&'a Once);

impl Drop for Rollback<'_> {
    fn drop(&mut self) {
        self.0.transition(UNINITIALIZED);
    }
}

impl Once {
    /// Creates a new gate in the `Uninitialized` state.
    ///
    /// # Examples
    /// ```
    /// use sync_lib::once::gate::Once;
    /// let gate = Once::new();
    /// assert!(gate.state().is_uninitialized());
    /// ```
    pub const fn new() -> Once {
        Once {
            state: AtomicU32::new(UNINITIALIZED),
            waiters: WaitQueue::new(),
        }
    }

    /// Returns true once a guarded action has run to completion. After this returns true it never
    /// returns false again, and all memory effects of the action are visible to the caller.
    pub fn is_ready(&self) -> bool {
        self.state.load(Acquire) == READY
    }

    /// Returns a snapshot of the gate's state. See [`OnceState`] for the staleness caveat.
    ///
    /// # Examples
    /// ```
    /// use sync_lib::once::gate::Once;
    ///
    /// let gate = Once::new();
    /// assert!(gate.state().is_uninitialized());
    /// gate.call_once(|| ());
    /// assert!(gate.state().is_ready());
    /// ```
    pub fn state(&self) -> OnceState {
        OnceState::from_word(self.state.load(Acquire))
    }

    /// Blocks the calling thread until some construction attempt has succeeded. Returns
    /// immediately if the gate is already `Ready`.
    ///
    /// Note that this waits out failed attempts too: if the current attempt is rolled back, the
    /// waiter goes back to sleep until one succeeds. A gate that nobody ever completes blocks
    /// forever.
    pub fn wait(&self) {
        loop {
            match self.state.load(Acquire) {
                READY => return,
                other => self.waiters.wait(&self.state, other),
            }
        }
    }

    /// Runs `f` exactly once across all threads, blocking concurrent callers until it completes.
    ///
    /// If `f` panics the gate is rolled back as described in [`try_call_once`](Once::try_call_once)
    /// and the panic propagates to this caller.
    ///
    /// Calling `call_once` from within `f` on the same gate deadlocks.
    ///
    /// # Examples
    /// ```
    /// use std::sync::atomic::AtomicUsize;
    /// use std::sync::atomic::Ordering::Relaxed;
    ///
    /// use sync_lib::once::gate::Once;
    ///
    /// static GATE: Once = Once::new();
    /// static RUNS: AtomicUsize = AtomicUsize::new(0);
    ///
    /// std::thread::scope(|scope| {
    ///     for _ in 0..8 {
    ///         scope.spawn(|| GATE.call_once(|| { RUNS.fetch_add(1, Relaxed); }));
    ///     }
    /// });
    /// assert_eq!(RUNS.load(Relaxed), 1);
    /// ```
    pub fn call_once<F>(&self, f: F)
    where
        F: FnOnce(),
    {
        match self.try_call_once(|| {
            f();
            Ok::<(), Infallible>(())
        }) {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    /// Runs the fallible `f` at most once across all threads.
    ///
    /// The first caller to arrive runs `f`; concurrent callers block. On `Ok` the gate becomes
    /// `Ready` and every present and future caller returns `Ok(())` without running anything. On
    /// `Err` the gate rolls back to `Uninitialized`, the error is returned to this caller only,
    /// and the released waiters race to run their own closures.
    ///
    /// A blocked caller therefore never returns an error produced by somebody else's closure:
    /// it either observes `Ready`, or becomes the next constructor itself.
    ///
    /// # Examples
    /// ```
    /// use sync_lib::once::gate::Once;
    ///
    /// let gate = Once::new();
    /// assert!(gate.try_call_once(|| Err("not yet")).is_err());
    /// assert!(gate.state().is_uninitialized());
    ///
    /// assert!(gate.try_call_once(|| Ok::<_, &str>(())).is_ok());
    /// assert!(gate.is_ready());
    /// ```
    pub fn try_call_once<F, E>(&self, f: F) -> Result<(), E>
    where
        F: FnOnce() -> Result<(), E>,
    {
        if self.is_ready() {
            return Ok(());
        }
        self.try_call_once_slow(f)
    }

    #[cold]
    fn try_call_once_slow<F, E>(&self, f: F) -> Result<(), E>
    where
        F: FnOnce() -> Result<(), E>,
    {
        // Win the race to construct, or wait out whoever did. The CAS uses Acquire on success so
        // that a retrying constructor observes everything a rolled-back attempt wrote.
        loop {
            match self
                .state
                .compare_exchange(UNINITIALIZED, INITIALIZING, Acquire, Acquire)
            {
                Ok(_) => break,
                Err(READY) => return Ok(()),
                Err(_) => self.waiters.wait(&self.state, INITIALIZING),
            }
        }

        let rollback = Rollback(self);
        match f() {
            Ok(()) => {
                mem::forget(rollback);
                self.transition(READY);
                Ok(())
            }
            Err(e) => {
                drop(rollback);
                Err(e)
            }
        }
    }

    /// Publishes a state change and releases every thread sleeping on the gate.
    fn transition(&self, to: u32) {
        self.state.store(to, Release);
        self.waiters.wake_all(&self.state);
    }
}

impl Default for Once {
    fn default() -> Once {
        Once::new()
    }
}

impl Debug for Once {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Once").field(&self.state()).finish()
    }
}
