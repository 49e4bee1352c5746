#![cfg(test)]

use std::collections::HashSet;
use std::sync::{Barrier, Mutex};
use std::thread;

use super::*;
use crate::singleton;
use crate::util::count::InitCounter;
use crate::util::panic::assert_panics;

#[test]
fn test_constructs_on_first_access_only() {
    let constructions = InitCounter::new();
    let lazy = Lazy::new(|| {
        constructions.record();
        7
    });

    assert_eq!(
        constructions.count(),
        0,
        "Declaring a provider should not construct."
    );
    assert_eq!(*lazy, 7, "First access should construct.");
    assert_eq!(*lazy, 7);
    assert_eq!(Lazy::force(&lazy), &7);
    assert_eq!(
        constructions.count(),
        1,
        "Repeated access should reuse the instance."
    );
}

#[test]
fn test_get_does_not_construct() {
    let lazy = Lazy::new(|| 1);
    assert_eq!(
        Lazy::get(&lazy),
        None,
        "get should not trigger construction."
    );
    Lazy::force(&lazy);
    assert_eq!(Lazy::get(&lazy), Some(&1));
}

#[test]
fn test_all_threads_observe_one_identity() {
    const THREADS: usize = 100;

    let constructions = InitCounter::new();
    let lazy = Lazy::new(|| {
        constructions.record();
        [0_u64; 4]
    });
    let barrier = Barrier::new(THREADS);
    let identities = Mutex::new(HashSet::new());

    thread::scope(|scope| {
        for _ in 0..THREADS {
            scope.spawn(|| {
                barrier.wait();
                let instance = Lazy::force(&lazy);
                identities
                    .lock()
                    .expect("no recording thread panics")
                    .insert(std::ptr::from_ref(instance) as usize);
            });
        }
    });

    assert_eq!(
        identities
            .into_inner()
            .expect("all recording threads have joined")
            .len(),
        1,
        "Every thread should resolve the provider to the identical instance."
    );
    assert_eq!(constructions.count(), 1);
}

#[test]
fn test_panicked_construction_stays_failed() {
    let lazy: Lazy<u8, _> = Lazy::new(|| panic!("constructor exploded"));

    assert_panics!(
        {
            Lazy::force(&lazy);
        },
        "The first access should propagate the constructor's panic."
    );
    assert_panics!({ Lazy::force(&lazy) }, contains "consumed");
    assert_eq!(
        Lazy::get(&lazy),
        None,
        "A provider whose constructor panicked should stay empty."
    );
}

#[test]
fn test_singleton_macro() {
    singleton!(
        /// Answer to everything, computed reluctantly.
        ANSWER: u64 = 6 * 7
    );

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| assert_eq!(*ANSWER, 42));
        }
    });
    assert_eq!(
        Lazy::get(&ANSWER),
        Some(&42),
        "The macro should declare an ordinary Lazy static."
    );
}

#[test]
fn test_default_and_debug() {
    let lazy: Lazy<Vec<u8>> = Lazy::default();
    assert_eq!(format!("{lazy:?}"), "Lazy(<unconstructed>)");
    assert!(lazy.is_empty(), "Default should construct T::default().");
    assert_eq!(format!("{lazy:?}"), "Lazy([])");
}
