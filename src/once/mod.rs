//! One-shot initialization primitives.
//!
//! # Purpose
//! I wrote these types to pin down exactly one contract: no matter how many threads race to
//! create a value, construction runs once, everyone else blocks, and every thread that gets a
//! reference observes the complete value. Each layer here is a different API over that contract.
//!
//! # Method
//! [`gate`] owns all of the synchronization: the atomic state machine, the blocking and the
//! ordering guarantees. [`cell`] adds a typed slot for the constructed value and [`lazy`] adds
//! storage for the constructor itself, so neither of the higher layers touches an atomic
//! directly.

pub mod cell;
pub mod gate;
pub mod lazy;
