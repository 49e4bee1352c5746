//! This crate is my attempt at writing (some key parts of) a standard library's synchronization
//! primitives.
//!
//! # Purpose
//! This repo / crate is a project that I'm working on as a learning experience, with no expectation
//! for it to be used in production. After spending some time on data structures, I wanted to
//! understand what actually happens between "two threads race to initialize a global" and "every
//! thread sees the same, fully built value". Writing the primitives myself is the only way I've
//! found to properly internalize the ordering guarantees involved.
//!
//! # Method
//! Everything here is written based on my existing understanding and problem solving. I'm not
//! following any guides or copying from the standard library but neither am I restricting myself
//! from looking things up or referring to existing crates, especially their APIs. This project
//! isn't intended to copy Rust's [`std`] but rather takes a lot of inspiration from it.
//!
//! The centerpiece is the one-shot gate in [`once::gate`]: a guarded action runs at most once
//! across all threads, every concurrent caller blocks until it completes, and the gate's `Ready`
//! store pairs with the observers' loads so nobody can read a half-built value. The value cell and
//! the lazy provider in [`once::cell`] and [`once::lazy`] are deliberately thin layers over that
//! gate; the correctness burden stays in one place instead of being re-rolled with manual fences
//! at every use site.
//!
//! # Error Handling
//! A one-shot primitive has to pick a policy for failed initialization, and the options genuinely
//! differ across ecosystems (poison forever, or roll back and retry). This crate rolls back: a
//! failed or panicking initializer returns the gate to its uninitialized state and wakes every
//! waiter, so a later caller can try again. The error itself is surfaced only to the caller whose
//! closure actually ran.
//!
//! When this crate employs errors via [`Result`]s, it does so in a method that is strongly typed,
//! with structs that implement [`Error`](std::error::Error) and hand back whatever the operation
//! couldn't consume (see [`AlreadySetError`](once::cell::AlreadySetError)).
//!
//! # Dependencies
//! At the moment, this crate uses `std`, mostly for [`Mutex`](std::sync::Mutex) and
//! [`Condvar`](std::sync::Condvar) in the portable blocking path. On Linux the default `futex`
//! feature replaces that path with thin `libc` syscall wrappers, which is both how the real
//! implementations block and a good excuse to learn the futex interface.
//!
//! This crate also depends on some derive macros because they're helpful and remove the need for
//! some very repetitive programming.
//!
//! # Potential Future Additions
//! - Locks:
//!   - Mutex / RwLock (on top of the same futex layer)
//!   - Reentrancy detection for the gate
//! - Channels:
//!   - Oneshot completion signal
//!   - SPSC queue

#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod once;

pub(crate) mod util;
