//! A module containing [`Lazy`] and the [`singleton!`](crate::singleton) macro.
//!
//! [`Lazy`] completes the provider picture: where a [`OnceCell`](super::cell::OnceCell) is handed
//! a constructor at every call site, a `Lazy` owns its constructor from the start, so a bare
//! dereference is enough to get (and, the first time, build) the instance. Declared `static`, it
//! is the process-wide singleton: one instance, constructed on first access, alive until
//! teardown.

mod lazy;
mod singleton;
mod tests;

pub use lazy::*;
