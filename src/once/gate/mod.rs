//! A module containing [`Once`] and associtated types.
//!
//! [`Once`] is the execute-once gate that the rest of the crate is built on. [`OnceState`] is a
//! snapshot of the gate's internal state machine, mostly useful for inspection and tests.
//!
//! Blocking is delegated to a `WaitQueue` with two interchangeable implementations: a futex-based
//! one used on Linux when the `futex` feature is enabled (the default), and a portable
//! [`Mutex`](std::sync::Mutex) / [`Condvar`](std::sync::Condvar) fallback used everywhere else.

mod once;
mod state;

#[cfg(all(target_os = "linux", feature = "futex"))]
mod futex;
#[cfg(all(target_os = "linux", feature = "futex"))]
pub(crate) use futex::WaitQueue;

#[cfg(not(all(target_os = "linux", feature = "futex")))]
mod park;
#[cfg(not(all(target_os = "linux", feature = "futex")))]
pub(crate) use park::WaitQueue;

pub use once::*;
pub use state::*;
